#![warn(clippy::uninlined_format_args)]

pub mod parser;
pub mod store;

pub use parser::TextLedgerParser;
pub use store::InMemoryLedgerStore;
