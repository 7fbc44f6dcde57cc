#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod summary_presenter;
pub mod text_table;

pub use error_presenter::format_ledger_parse_error;
pub use summary_presenter::{SummaryPresenter, SummaryView};
