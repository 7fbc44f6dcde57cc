use arcstr::ArcStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tripledger_domain::{
    Currency, EntryWarning, LedgerEntry, Money, Participant, ParticipantId, RejectionReason,
    Transfer,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(ArcStr);

impl TripId {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned identifier of a ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredEntry {
    pub id: EntryId,
    pub entry: LedgerEntry,
}

/// An expense as entered by a user, before `involved` is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub payer: ParticipantId,
    /// `None` or empty splits the expense across every participant.
    pub involved: Option<Vec<ParticipantId>>,
    pub amount: Money,
    pub currency: Option<Currency>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SettlementDraft {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
    pub created_at: Option<DateTime<Utc>>,
}

/// A ledger read from text, with the source line of every entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedLedger {
    pub participants: Vec<Participant>,
    pub entries: Vec<LedgerEntry>,
    pub entry_lines: Vec<usize>,
}

impl ParsedLedger {
    pub fn push_entry(&mut self, entry: LedgerEntry, line: usize) {
        self.entries.push(entry);
        self.entry_lines.push(line);
    }
}

/// Where an entry came from, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryRef {
    Line(usize),
    Stored(EntryId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    Rejected(RejectionReason),
    Warning(EntryWarning),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryIssue {
    pub entry: EntryRef,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantBalance {
    pub id: ParticipantId,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripSummary {
    pub balances: Vec<ParticipantBalance>,
    pub transfers: Vec<Transfer>,
    pub issues: Vec<EntryIssue>,
}

impl TripSummary {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn rejected_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue.kind, IssueKind::Rejected(_)))
            .count()
    }
}
