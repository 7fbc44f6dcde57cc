#![warn(clippy::uninlined_format_args)]

mod i18n;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while_m_n, take_while1},
    character::complete::{char, digit1, multispace1, satisfy},
    combinator::{not, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, terminated},
};

/// `family <id> "<display name>"`
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyDecl<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Involved<'a> {
    /// `for all`, or no `for` clause at all.
    All,
    Listed(Vec<&'a str>),
}

/// `<payer> paid <amount> [<CUR>] [for ...] [@ <timestamp>]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseStmt<'a> {
    pub payer: &'a str,
    /// Decimal literal, e.g. `90` or `12.50`.
    pub amount: &'a str,
    pub currency: Option<&'a str>,
    pub involved: Involved<'a>,
    pub timestamp: Option<&'a str>,
}

/// `<from> settled <amount> to <to> [@ <timestamp>]`
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementStmt<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: &'a str,
    pub timestamp: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Family(FamilyDecl<'a>),
    Expense(ExpenseStmt<'a>),
    Settlement(SettlementStmt<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || is_japanese_char(c)
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' | // Hiragana
        '\u{30A0}'..='\u{30FF}' | // Katakana
        '\u{4E00}'..='\u{9FFF}' | // Kanji
        '\u{3400}'..='\u{4DBF}'   // Kanji extension
    )
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(is_identifier_char).parse(input)
}

// Keyword not immediately followed by another identifier character.
fn keyword<'a>(
    word: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    terminated(tag_no_case(word), not(satisfy(is_identifier_char)))
}

fn sp(input: &str) -> IResult<&str, &str> {
    fn fullwidth_space(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c == '\u{3000}').parse(input)
    }

    fn comment(input: &str) -> IResult<&str, &str> {
        delimited(tag("/*"), take_until("*/"), tag("*/")).parse(input)
    }

    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("//"), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((
        multispace1,
        fullwidth_space,
        comment,
        line_comment,
    ))))
    .parse(input)
}

fn amount(input: &str) -> IResult<&str, &str> {
    recognize((digit1, opt((char('.'), digit1)))).parse(input)
}

fn currency(input: &str) -> IResult<&str, &str> {
    terminated(
        take_while_m_n(3, 3, |c: char| c.is_ascii_uppercase()),
        not(satisfy(is_identifier_char)),
    )
    .parse(input)
}

fn timestamp(input: &str) -> IResult<&str, &str> {
    preceded(
        (char('@'), sp),
        take_while1(|c: char| !c.is_whitespace() && c != '/'),
    )
    .parse(input)
}

fn display_name(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"')).parse(input)
}

fn identifier_list(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1((sp, alt((tag(","), tag("，"))), sp), identifier).parse(input)
}

fn involved(input: &str) -> IResult<&str, Involved<'_>> {
    preceded(
        (keyword("for"), sp),
        alt((
            keyword("all").map(|_| Involved::All),
            identifier_list.map(Involved::Listed),
        )),
    )
    .parse(input)
}

// family <id> "<name>"
fn family(input: &str) -> IResult<&str, FamilyDecl<'_>> {
    (keyword("family"), sp, identifier, sp, display_name)
        .map(|(_, _, id, _, name)| FamilyDecl { id, name })
        .parse(input)
}

// <payer> paid <amount> [<CUR>] [for ...] [@ <timestamp>]
fn expense(input: &str) -> IResult<&str, ExpenseStmt<'_>> {
    (
        identifier, // payer
        sp,
        keyword("paid"),
        sp,
        amount,
        opt(preceded(sp, currency)),
        opt(preceded(sp, involved)),
        opt(preceded(sp, timestamp)),
    )
        .map(
            |(payer, _, _, _, amount, currency, involved, timestamp)| ExpenseStmt {
                payer,
                amount,
                currency,
                involved: involved.unwrap_or(Involved::All),
                timestamp,
            },
        )
        .parse(input)
}

// <from> settled <amount> to <to> [@ <timestamp>]
fn settlement(input: &str) -> IResult<&str, SettlementStmt<'_>> {
    (
        identifier, // from
        sp,
        keyword("settled"),
        sp,
        amount,
        sp,
        keyword("to"),
        sp,
        identifier, // to
        opt(preceded(sp, timestamp)),
    )
        .map(
            |(from, _, _, _, amount, _, _, _, to, timestamp)| SettlementStmt {
                from,
                to,
                amount,
                timestamp,
            },
        )
        .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        family.map(Statement::Family),
        expense.map(Statement::Expense),
        settlement.map(Statement::Settlement),
    ))
    .parse(input)
}

fn statement_with_sp(input: &str) -> IResult<&str, Statement<'_>> {
    (sp, statement, sp).map(|(_, stmt, _)| stmt).parse(input)
}

/// Parses a whole ledger, one statement per line.
pub fn parse_ledger(input: &str) -> Result<Ledger<'_>, ParseError> {
    let mut statements = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let (rest, _) = sp(line).map_err(|e| ParseError::SyntaxError {
            line: idx + 1,
            detail: i18n::syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }
        match statement_with_sp(rest) {
            Ok((rest, stmt)) => {
                if !rest.trim().is_empty() {
                    return Err(ParseError::SyntaxError {
                        line: idx + 1,
                        detail: i18n::syntax_error_unparsed_detail(rest.trim()),
                    });
                }
                statements.push(StatementWithLine {
                    line: idx + 1,
                    statement: stmt,
                });
            }
            Err(e) => {
                return Err(ParseError::SyntaxError {
                    line: idx + 1,
                    detail: i18n::syntax_error_detail(e),
                });
            }
        }
    }

    Ok(Ledger { statements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn single_statement(input: &str) -> Statement<'_> {
        let ledger = parse_ledger(input).expect("should parse");
        assert_eq!(ledger.statements.len(), 1);
        ledger.statements.into_iter().next().expect("one statement").statement
    }

    #[rstest]
    #[case::ascii(r#"family tanaka "Tanaka family""#, "tanaka", "Tanaka family")]
    #[case::japanese(r#"family 田中 "田中家""#, "田中", "田中家")]
    #[case::uppercase_keyword(r#"FAMILY x "X""#, "x", "X")]
    fn parses_family_declarations(#[case] input: &str, #[case] id: &str, #[case] name: &str) {
        assert_eq!(
            single_statement(input),
            Statement::Family(FamilyDecl { id, name })
        );
    }

    #[rstest]
    #[case::everyone_implicit(
        "a paid 90",
        ExpenseStmt {
            payer: "a",
            amount: "90",
            currency: None,
            involved: Involved::All,
            timestamp: None,
        }
    )]
    #[case::everyone_explicit(
        "a paid 12.50 EUR for all",
        ExpenseStmt {
            payer: "a",
            amount: "12.50",
            currency: Some("EUR"),
            involved: Involved::All,
            timestamp: None,
        }
    )]
    #[case::listed(
        "a paid 90 for a, b",
        ExpenseStmt {
            payer: "a",
            amount: "90",
            currency: None,
            involved: Involved::Listed(vec!["a", "b"]),
            timestamp: None,
        }
    )]
    #[case::fullwidth_comma(
        "a paid 90 JPY for a，b",
        ExpenseStmt {
            payer: "a",
            amount: "90",
            currency: Some("JPY"),
            involved: Involved::Listed(vec!["a", "b"]),
            timestamp: None,
        }
    )]
    #[case::with_timestamp(
        "a paid 30 for b @ 2026-07-01T12:00:00Z",
        ExpenseStmt {
            payer: "a",
            amount: "30",
            currency: None,
            involved: Involved::Listed(vec!["b"]),
            timestamp: Some("2026-07-01T12:00:00Z"),
        }
    )]
    #[case::id_starting_with_all(
        "a paid 30 for allen",
        ExpenseStmt {
            payer: "a",
            amount: "30",
            currency: None,
            involved: Involved::Listed(vec!["allen"]),
            timestamp: None,
        }
    )]
    fn parses_expenses(#[case] input: &str, #[case] expected: ExpenseStmt<'_>) {
        assert_eq!(single_statement(input), Statement::Expense(expected));
    }

    #[rstest]
    #[case::plain(
        "b settled 30 to a",
        SettlementStmt { from: "b", to: "a", amount: "30", timestamp: None }
    )]
    #[case::decimal_with_timestamp(
        "b settled 30.25 to a @2026-07-02T08:30:00+09:00",
        SettlementStmt {
            from: "b",
            to: "a",
            amount: "30.25",
            timestamp: Some("2026-07-02T08:30:00+09:00"),
        }
    )]
    fn parses_settlements(#[case] input: &str, #[case] expected: SettlementStmt<'_>) {
        assert_eq!(single_statement(input), Statement::Settlement(expected));
    }

    #[rstest]
    #[case::trailing_line_comment("a paid 90 for a, b // dinner")]
    #[case::inline_comment("a /* ramen */ paid 90 for a, b")]
    #[case::leading_spaces("   a paid 90 for a, b")]
    fn accepts_comments_and_spacing(#[case] input: &str) {
        let Statement::Expense(expense) = single_statement(input) else {
            panic!("expected expense");
        };
        assert_eq!(expense.involved, Involved::Listed(vec!["a", "b"]));
    }

    #[rstest]
    #[case::comment_only("// nothing here")]
    #[case::blank("   ")]
    #[case::empty("")]
    fn ignores_empty_lines(#[case] input: &str) {
        let ledger = parse_ledger(input).expect("should parse");
        assert!(ledger.statements.is_empty());
    }

    #[test]
    fn keeps_line_numbers() {
        let ledger = parse_ledger(
            "family a \"A\"\n\n// comment\na paid 10\nb settled 5 to a\n",
        )
        .expect("should parse");

        let lines: Vec<usize> = ledger.statements.iter().map(|s| s.line).collect();
        assert_eq!(lines, [1, 4, 5]);
    }

    #[rstest]
    #[case::missing_amount("a paid for b", 1)]
    #[case::negative_amount("a paid -5", 1)]
    #[case::trailing_garbage("family a \"A\"\nb settled 5 to a extra", 2)]
    #[case::unterminated_comment("a paid 5 /* oops", 1)]
    #[case::unterminated_name("family a \"A", 1)]
    fn reports_syntax_errors_with_line(#[case] input: &str, #[case] expected_line: usize) {
        match parse_ledger(input) {
            Err(ParseError::SyntaxError { line, .. }) => assert_eq!(line, expected_line),
            Ok(ledger) => panic!("expected syntax error, got {ledger:?}"),
        }
    }
}
