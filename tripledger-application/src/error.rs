use crate::model::{EntryId, TripId};
use tripledger_domain::{ParticipantId, RejectionReason};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerStoreError {
    #[error("trip '{0}' not found")]
    TripNotFound(TripId),
    #[error("entry {entry} not found in trip '{trip}'")]
    EntryNotFound { trip: TripId, entry: EntryId },
    #[error("participant '{0}' is already registered")]
    DuplicateParticipant(ParticipantId),
    #[error("participant '{0}' not found")]
    ParticipantNotFound(ParticipantId),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerParseError {
    #[error("{detail}")]
    SyntaxError { line: usize, detail: String },
    #[error("undefined family '{name}' at line {line}")]
    UndefinedParticipant { name: String, line: usize },
    #[error("family '{name}' declared twice (line {line})")]
    DuplicateParticipant { name: String, line: usize },
    #[error("invalid amount '{literal}' at line {line}")]
    InvalidAmount { literal: String, line: usize },
    #[error("invalid timestamp '{literal}' at line {line}")]
    InvalidTimestamp { literal: String, line: usize },
}

impl LedgerParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::SyntaxError { line, .. }
            | Self::UndefinedParticipant { line, .. }
            | Self::DuplicateParticipant { line, .. }
            | Self::InvalidAmount { line, .. }
            | Self::InvalidTimestamp { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripLedgerError {
    #[error(transparent)]
    Store(#[from] LedgerStoreError),
    #[error("entry rejected: {0}")]
    Rejected(#[from] RejectionReason),
    #[error("'{0}' is not a participant of this trip")]
    UnknownParticipant(ParticipantId),
}
