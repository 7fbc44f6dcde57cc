#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Balances, Currency, Expense, LedgerEntry, Money, Participant, ParticipantId, Settlement,
    Transfer,
};
pub use services::{
    BalanceCalculator, DebtResolver, EntryValidator, EntryWarning, FlaggedEntry,
    InvolvedSetResolver, RejectedEntry, RejectionReason, SETTLED_THRESHOLD, ValidationReport,
    compute_balances, compute_transfers,
};
