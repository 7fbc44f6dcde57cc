use chrono::{DateTime, Utc};
use fxhash::FxHashSet;
use std::str::FromStr;
use tripledger_application::{LedgerParseError, LedgerParser, ParsedLedger};
use tripledger_domain::{
    Currency, Expense, InvolvedSetResolver, LedgerEntry, Money, Participant, ParticipantId,
    Settlement,
};
use tripledger_parser::{
    ExpenseStmt, Involved, ParseError, SettlementStmt, Statement as ParserStatement,
    StatementWithLine, parse_ledger,
};

/// Reads the plain-text ledger format into domain entries.
#[derive(Default)]
pub struct TextLedgerParser {
    default_currency: Option<Currency>,
}

impl TextLedgerParser {
    /// Expenses without an explicit currency get `currency`.
    pub fn with_default_currency(currency: Currency) -> Self {
        Self {
            default_currency: Some(currency),
        }
    }
}

impl LedgerParser for TextLedgerParser {
    fn parse(&self, content: &str) -> Result<ParsedLedger, LedgerParseError> {
        let ledger = parse_ledger(content).map_err(|err| match err {
            ParseError::SyntaxError { line, detail } => {
                LedgerParseError::SyntaxError { line, detail }
            }
        })?;

        // Families may be declared anywhere in the document.
        let mut participants = Vec::new();
        let mut declared: FxHashSet<&str> = FxHashSet::default();
        for StatementWithLine { line, statement } in &ledger.statements {
            if let ParserStatement::Family(decl) = statement {
                if !declared.insert(decl.id) {
                    return Err(LedgerParseError::DuplicateParticipant {
                        name: decl.id.to_string(),
                        line: *line,
                    });
                }
                participants.push(Participant::new(decl.id, decl.name));
            }
        }

        let ensure_declared = |name: &str, line: usize| {
            if declared.contains(name) {
                Ok(ParticipantId::from(name))
            } else {
                Err(LedgerParseError::UndefinedParticipant {
                    name: name.to_string(),
                    line,
                })
            }
        };
        let resolver = InvolvedSetResolver::new(&participants);

        let mut entries = Vec::with_capacity(ledger.statements.len());
        for StatementWithLine { line, statement } in ledger.statements {
            let entry = match statement {
                ParserStatement::Family(_) => continue,
                ParserStatement::Expense(stmt) => {
                    self.to_expense(stmt, line, &ensure_declared, &resolver)?
                }
                ParserStatement::Settlement(stmt) => to_settlement(stmt, line, &ensure_declared)?,
            };
            entries.push((entry, line));
        }

        let mut parsed = ParsedLedger {
            participants,
            ..ParsedLedger::default()
        };
        for (entry, line) in entries {
            parsed.push_entry(entry, line);
        }

        tracing::debug!(
            "Parsed ledger with {} families and {} entries",
            parsed.participants.len(),
            parsed.entries.len()
        );
        Ok(parsed)
    }
}

impl TextLedgerParser {
    fn to_expense<F>(
        &self,
        stmt: ExpenseStmt<'_>,
        line: usize,
        ensure_declared: &F,
        resolver: &InvolvedSetResolver<'_>,
    ) -> Result<LedgerEntry, LedgerParseError>
    where
        F: Fn(&str, usize) -> Result<ParticipantId, LedgerParseError>,
    {
        let payer = ensure_declared(stmt.payer, line)?;
        let involved = match stmt.involved {
            Involved::All => resolver.resolve(None),
            Involved::Listed(ids) => {
                let listed = ids
                    .into_iter()
                    .map(|id| ensure_declared(id, line))
                    .collect::<Result<Vec<_>, _>>()?;
                resolver.resolve(Some(listed.as_slice()))
            }
        };
        let currency = stmt
            .currency
            .map(Currency::new)
            .or_else(|| self.default_currency.clone());

        Ok(LedgerEntry::Expense(Expense {
            payer,
            involved,
            amount: parse_amount(stmt.amount, line)?,
            currency,
            created_at: parse_timestamp(stmt.timestamp, line)?,
        }))
    }
}

fn to_settlement<F>(
    stmt: SettlementStmt<'_>,
    line: usize,
    ensure_declared: &F,
) -> Result<LedgerEntry, LedgerParseError>
where
    F: Fn(&str, usize) -> Result<ParticipantId, LedgerParseError>,
{
    Ok(LedgerEntry::Settlement(Settlement {
        from: ensure_declared(stmt.from, line)?,
        to: ensure_declared(stmt.to, line)?,
        amount: parse_amount(stmt.amount, line)?,
        created_at: parse_timestamp(stmt.timestamp, line)?,
    }))
}

fn parse_amount(literal: &str, line: usize) -> Result<Money, LedgerParseError> {
    Money::from_str(literal).map_err(|_| LedgerParseError::InvalidAmount {
        literal: literal.to_string(),
        line,
    })
}

fn parse_timestamp(
    literal: Option<&str>,
    line: usize,
) -> Result<Option<DateTime<Utc>>, LedgerParseError> {
    literal
        .map(|literal| {
            DateTime::parse_from_rfc3339(literal)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| LedgerParseError::InvalidTimestamp {
                    literal: literal.to_string(),
                    line,
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    const TRIP: &str = r#"
family a "Aoki"
family b "Baba"
family c "Chiba" // joined late

a paid 90 JPY for a, b, c @ 2024-03-01T12:00:00Z
b paid 12.50 for all
c settled 30 to a
"#;

    #[test]
    fn parses_families_and_entries() {
        let parsed = TextLedgerParser::default().parse(TRIP).expect("parse failed");

        let names: Vec<&str> = parsed
            .participants
            .iter()
            .map(|participant| participant.name.as_str())
            .collect();
        assert_eq!(names, ["Aoki", "Baba", "Chiba"]);
        assert_eq!(parsed.entry_lines, vec![6, 7, 8]);

        let LedgerEntry::Expense(first) = &parsed.entries[0] else {
            panic!("expected an expense");
        };
        assert_eq!(first.amount, Money::from_i64(90));
        assert_eq!(first.currency, Some(Currency::new("JPY")));
        assert_eq!(first.involved.len(), 3);
        assert_eq!(
            first.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );

        let LedgerEntry::Expense(second) = &parsed.entries[1] else {
            panic!("expected an expense");
        };
        let everyone: Vec<&str> = second.involved.iter().map(ParticipantId::as_str).collect();
        assert_eq!(everyone, ["a", "b", "c"]);
        assert_eq!(second.amount, Money::new(1250, 2));

        assert!(matches!(parsed.entries[2], LedgerEntry::Settlement(_)));
    }

    #[rstest]
    #[case::repeated_ids("a paid 90 for a, a, b", &["a", "b"])]
    #[case::repeated_out_of_order("a paid 90 for b, a, b, a", &["b", "a"])]
    #[case::everyone("a paid 90 for all", &["a", "b", "c"])]
    #[case::no_for_clause("a paid 90", &["a", "b", "c"])]
    fn expenses_carry_a_resolved_involved_set(#[case] line: &str, #[case] expected: &[&str]) {
        let input = format!("family a \"A\"\nfamily b \"B\"\n{line}\nfamily c \"C\"");

        let parsed = TextLedgerParser::default().parse(&input).expect("parse failed");

        let LedgerEntry::Expense(expense) = &parsed.entries[0] else {
            panic!("expected an expense");
        };
        let involved: Vec<&str> = expense.involved.iter().map(ParticipantId::as_str).collect();
        assert_eq!(involved, expected);
    }

    #[test]
    fn families_may_follow_their_entries() {
        let parsed = TextLedgerParser::default()
            .parse("a settled 5 to b\nfamily a \"A\"\nfamily b \"B\"")
            .expect("parse failed");

        assert_eq!(parsed.participants.len(), 2);
        assert_eq!(parsed.entry_lines, vec![1]);
    }

    #[test]
    fn default_currency_fills_missing_codes() {
        let parser = TextLedgerParser::with_default_currency(Currency::new("EUR"));
        let parsed = parser
            .parse("family a \"A\"\na paid 10\na paid 10 USD")
            .expect("parse failed");

        let currencies: Vec<Option<&str>> = parsed
            .entries
            .iter()
            .map(|entry| match entry {
                LedgerEntry::Expense(expense) => expense.currency.as_ref().map(Currency::code),
                LedgerEntry::Settlement(_) => None,
            })
            .collect();
        assert_eq!(currencies, [Some("EUR"), Some("USD")]);
    }

    #[rstest]
    #[case::undefined_payer(
        "family a \"A\"\nz paid 10",
        LedgerParseError::UndefinedParticipant { name: "z".to_string(), line: 2 }
    )]
    #[case::undefined_involved(
        "family a \"A\"\na paid 10 for a, q",
        LedgerParseError::UndefinedParticipant { name: "q".to_string(), line: 2 }
    )]
    #[case::undefined_settlement_target(
        "family a \"A\"\na settled 10 to x",
        LedgerParseError::UndefinedParticipant { name: "x".to_string(), line: 2 }
    )]
    #[case::duplicate_family(
        "family a \"A\"\nfamily a \"Again\"",
        LedgerParseError::DuplicateParticipant { name: "a".to_string(), line: 2 }
    )]
    #[case::bad_timestamp(
        "family a \"A\"\na paid 10 @ yesterday",
        LedgerParseError::InvalidTimestamp { literal: "yesterday".to_string(), line: 2 }
    )]
    #[case::amount_overflow(
        "family a \"A\"\na paid 99999999999999999999999999999999999",
        LedgerParseError::InvalidAmount {
            literal: "99999999999999999999999999999999999".to_string(),
            line: 2,
        }
    )]
    fn rejects_malformed_ledgers(#[case] input: &str, #[case] expected: LedgerParseError) {
        let err = TextLedgerParser::default().parse(input).unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn syntax_errors_keep_their_line() {
        let err = TextLedgerParser::default()
            .parse("family a \"A\"\na paid lots")
            .unwrap_err();

        assert!(matches!(err, LedgerParseError::SyntaxError { line: 2, .. }));
    }
}
