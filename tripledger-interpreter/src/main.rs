use std::{borrow::Cow, env, fs, process};

use tripledger_application::LedgerProcessor;
use tripledger_domain::Currency;
use tripledger_infrastructure::TextLedgerParser;
use tripledger_presentation::{SummaryPresenter, format_ledger_parse_error};

mod config;

use config::{CliConfig, init_logging};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    let config = CliConfig::from_env();
    init_logging(&config);

    if let Err(err) = run(&config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(config: &CliConfig) -> CliResult<()> {
    let Some(path) = env::args().nth(1) else {
        return Err("Usage: tripledger-interpreter <file.ledger>".into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let parser = match &config.currency {
        Some(code) => TextLedgerParser::with_default_currency(Currency::new(code.as_str())),
        None => TextLedgerParser::default(),
    };
    let processor = LedgerProcessor::new(&parser);

    let (ledger, summary) = processor
        .summarize(&source)
        .map_err(|err| format_ledger_parse_error(&err))?;
    tracing::info!(
        "Summarized '{}': {} families, {} entries, {} transfers",
        path,
        ledger.participants.len(),
        ledger.entries.len(),
        summary.transfers.len()
    );

    let view = SummaryPresenter::render_with_currency(
        &summary,
        &ledger.participants,
        config.currency.as_deref(),
    );
    print!("{}", view.to_text());

    Ok(())
}
