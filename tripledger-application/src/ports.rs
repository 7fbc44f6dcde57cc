use crate::{
    error::{LedgerParseError, LedgerStoreError},
    model::{EntryId, ParsedLedger, StoredEntry, TripId},
};
use std::collections::HashMap;
use tripledger_domain::{LedgerEntry, Participant, ParticipantId};

/// CRUD boundary of the document store holding trips.
pub trait LedgerStore: Send + Sync {
    fn participants(&self, trip: &TripId) -> Result<Vec<Participant>, LedgerStoreError>;

    /// Entries in insertion order.
    fn entries(&self, trip: &TripId) -> Result<Vec<StoredEntry>, LedgerStoreError>;

    fn add_participant(
        &self,
        trip: &TripId,
        participant: Participant,
    ) -> Result<(), LedgerStoreError>;

    fn remove_participant(
        &self,
        trip: &TripId,
        participant: &ParticipantId,
    ) -> Result<(), LedgerStoreError>;

    fn add_entry(&self, trip: &TripId, entry: LedgerEntry) -> Result<EntryId, LedgerStoreError>;

    fn remove_entry(&self, trip: &TripId, entry: EntryId) -> Result<(), LedgerStoreError>;
}

pub trait LedgerParser: Send + Sync {
    fn parse(&self, content: &str) -> Result<ParsedLedger, LedgerParseError>;
}

pub trait ParticipantDirectory: Send + Sync {
    fn display_name(&self, id: &ParticipantId) -> Option<&str>;
}

impl ParticipantDirectory for HashMap<ParticipantId, String> {
    fn display_name(&self, id: &ParticipantId) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl ParticipantDirectory for [Participant] {
    fn display_name(&self, id: &ParticipantId) -> Option<&str> {
        self.iter()
            .find(|participant| participant.id == *id)
            .map(|participant| participant.name.as_str())
    }
}

impl ParticipantDirectory for Vec<Participant> {
    fn display_name(&self, id: &ParticipantId) -> Option<&str> {
        self.as_slice().display_name(id)
    }
}
