use std::env;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Shown in amount headers and assumed for expenses without a code.
    pub currency: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_vars(
            env::var("TRIPLEDGER_LOG").ok(),
            env::var("TRIPLEDGER_CURRENCY").ok(),
        )
    }

    fn from_vars(log_filter: Option<String>, currency: Option<String>) -> Self {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            log_filter: log_filter
                .and_then(non_blank)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            currency: currency.and_then(non_blank).map(|code| code.to_uppercase()),
        }
    }
}

/// Installs the fmt subscriber on stderr; `RUST_LOG` wins over the config.
pub fn init_logging(config: &CliConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
