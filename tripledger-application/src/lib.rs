#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_processor;
pub mod ledger_service;
pub mod model;
pub mod ports;
mod summary;

pub use error::{LedgerParseError, LedgerStoreError, TripLedgerError};
pub use ledger_processor::LedgerProcessor;
pub use ledger_service::{TripLedgerService, summarize_ledger};
pub use model::{
    EntryId, EntryIssue, EntryRef, ExpenseDraft, IssueKind, ParsedLedger, ParticipantBalance,
    SettlementDraft, StoredEntry, TripId, TripSummary,
};
pub use ports::{LedgerParser, LedgerStore, ParticipantDirectory};
