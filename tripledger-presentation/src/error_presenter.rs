use tripledger_application::LedgerParseError;
use tripledger_i18n as i18n;

pub fn format_ledger_parse_error(error: &LedgerParseError) -> String {
    match error {
        LedgerParseError::SyntaxError { line, detail } => {
            i18n::syntax_error(*line, detail.clone()).to_string()
        }
        LedgerParseError::UndefinedParticipant { name, line } => {
            i18n::undefined_family(name, *line)
        }
        LedgerParseError::DuplicateParticipant { name, line } => {
            i18n::duplicate_family(name, *line)
        }
        LedgerParseError::InvalidAmount { literal, line } => i18n::invalid_amount(literal, *line),
        LedgerParseError::InvalidTimestamp { literal, line } => {
            i18n::invalid_timestamp(literal, *line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::syntax_error(LedgerParseError::SyntaxError {
        line: 1,
        detail: "unexpected token".to_string(),
    })]
    #[case::undefined_participant(LedgerParseError::UndefinedParticipant {
        name: "zed".to_string(),
        line: 3,
    })]
    #[case::duplicate_participant(LedgerParseError::DuplicateParticipant {
        name: "a".to_string(),
        line: 4,
    })]
    #[case::invalid_amount(LedgerParseError::InvalidAmount {
        literal: "1e99".to_string(),
        line: 5,
    })]
    #[case::invalid_timestamp(LedgerParseError::InvalidTimestamp {
        literal: "yesterday".to_string(),
        line: 6,
    })]
    fn format_ledger_parse_error_includes_line(#[case] error: LedgerParseError) {
        let result = format_ledger_parse_error(&error);
        assert!(result.contains(&error.line().to_string()));
    }
}
