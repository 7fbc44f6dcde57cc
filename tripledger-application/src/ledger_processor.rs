use crate::{
    error::LedgerParseError,
    ledger_service::summarize_ledger,
    model::{ParsedLedger, TripSummary},
    ports::LedgerParser,
};

#[derive(Clone, Copy)]
pub struct LedgerProcessor<'a> {
    parser: &'a dyn LedgerParser,
}

impl<'a> LedgerProcessor<'a> {
    pub fn new(parser: &'a dyn LedgerParser) -> Self {
        Self { parser }
    }

    pub fn parse(&self, content: &str) -> Result<ParsedLedger, LedgerParseError> {
        self.parser.parse(content)
    }

    /// Parses several ledger chunks as one document joined with newlines.
    /// Line numbers in errors and issues refer to the joined document.
    pub fn parse_sequence<'c, I>(&self, chunks: I) -> Result<ParsedLedger, LedgerParseError>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let joined = chunks.into_iter().collect::<Vec<_>>().join("\n");
        self.parser.parse(&joined)
    }

    pub fn summarize(
        &self,
        content: &str,
    ) -> Result<(ParsedLedger, TripSummary), LedgerParseError> {
        let ledger = self.parse(content)?;
        let summary = summarize_ledger(&ledger);
        Ok((ledger, summary))
    }
}
