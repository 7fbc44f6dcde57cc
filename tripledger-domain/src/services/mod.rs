pub mod balance_calculator;
pub mod debt_resolver;
pub mod entry_validator;
pub mod involved_set_resolver;

pub use balance_calculator::{BalanceCalculator, compute_balances};
pub use debt_resolver::{DebtResolver, SETTLED_THRESHOLD, compute_transfers};
pub use entry_validator::{
    EntryValidator, EntryWarning, FlaggedEntry, RejectedEntry, RejectionReason, ValidationReport,
};
pub use involved_set_resolver::InvolvedSetResolver;
