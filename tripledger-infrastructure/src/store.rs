use dashmap::DashMap;
use indexmap::IndexMap;
use std::sync::Arc;
use tripledger_application::{EntryId, LedgerStore, LedgerStoreError, StoredEntry, TripId};
use tripledger_domain::{LedgerEntry, Participant, ParticipantId};

#[derive(Debug, Default)]
struct TripRecord {
    participants: IndexMap<ParticipantId, Participant>,
    entries: IndexMap<EntryId, LedgerEntry>,
    next_entry: u64,
}

/// Process-local trip store.
///
/// Entries keep insertion order; removing one shifts the rest without
/// reusing its id. A trip must exist (`create_trip`) before anything is
/// recorded in it.
#[derive(Clone, Default)]
pub struct InMemoryLedgerStore {
    inner: Arc<DashMap<TripId, TripRecord>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the trip already existed.
    pub fn create_trip(&self, trip: TripId) -> bool {
        let mut created = false;
        self.inner.entry(trip).or_insert_with(|| {
            created = true;
            TripRecord::default()
        });
        created
    }

    pub fn delete_trip(&self, trip: &TripId) -> bool {
        self.inner.remove(trip).is_some()
    }

    pub fn contains_trip(&self, trip: &TripId) -> bool {
        self.inner.contains_key(trip)
    }

    fn with_trip<F, R>(&self, trip: &TripId, f: F) -> Result<R, LedgerStoreError>
    where
        F: FnOnce(&TripRecord) -> R,
    {
        self.inner
            .get(trip)
            .map(|record| f(record.value()))
            .ok_or_else(|| LedgerStoreError::TripNotFound(trip.clone()))
    }

    fn with_trip_mut<F, R>(&self, trip: &TripId, f: F) -> Result<R, LedgerStoreError>
    where
        F: FnOnce(&mut TripRecord) -> Result<R, LedgerStoreError>,
    {
        let mut record = self
            .inner
            .get_mut(trip)
            .ok_or_else(|| LedgerStoreError::TripNotFound(trip.clone()))?;
        f(record.value_mut())
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn participants(&self, trip: &TripId) -> Result<Vec<Participant>, LedgerStoreError> {
        self.with_trip(trip, |record| record.participants.values().cloned().collect())
    }

    fn entries(&self, trip: &TripId) -> Result<Vec<StoredEntry>, LedgerStoreError> {
        self.with_trip(trip, |record| {
            record
                .entries
                .iter()
                .map(|(id, entry)| StoredEntry {
                    id: *id,
                    entry: entry.clone(),
                })
                .collect()
        })
    }

    fn add_participant(
        &self,
        trip: &TripId,
        participant: Participant,
    ) -> Result<(), LedgerStoreError> {
        self.with_trip_mut(trip, |record| {
            if record.participants.contains_key(&participant.id) {
                return Err(LedgerStoreError::DuplicateParticipant(participant.id));
            }
            record
                .participants
                .insert(participant.id.clone(), participant);
            Ok(())
        })
    }

    fn remove_participant(
        &self,
        trip: &TripId,
        participant: &ParticipantId,
    ) -> Result<(), LedgerStoreError> {
        self.with_trip_mut(trip, |record| {
            record
                .participants
                .shift_remove(participant)
                .map(|_| ())
                .ok_or_else(|| LedgerStoreError::ParticipantNotFound(participant.clone()))
        })
    }

    fn add_entry(&self, trip: &TripId, entry: LedgerEntry) -> Result<EntryId, LedgerStoreError> {
        self.with_trip_mut(trip, |record| {
            record.next_entry += 1;
            let id = EntryId(record.next_entry);
            record.entries.insert(id, entry);
            Ok(id)
        })
    }

    fn remove_entry(&self, trip: &TripId, entry: EntryId) -> Result<(), LedgerStoreError> {
        self.with_trip_mut(trip, |record| {
            record
                .entries
                .shift_remove(&entry)
                .map(|_| ())
                .ok_or_else(|| LedgerStoreError::EntryNotFound {
                    trip: trip.clone(),
                    entry,
                })
        })
    }
}
