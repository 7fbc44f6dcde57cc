use crate::{
    error::TripLedgerError,
    model::{EntryId, EntryRef, ExpenseDraft, ParsedLedger, SettlementDraft, TripId, TripSummary},
    ports::LedgerStore,
    summary::summarize_entries,
};
use tripledger_domain::{
    EntryValidator, Expense, InvolvedSetResolver, LedgerEntry, Participant, ParticipantId,
    Settlement,
};

/// Records entries for a trip and reports its balances and settlement plan.
#[derive(Clone, Copy)]
pub struct TripLedgerService<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> TripLedgerService<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    pub fn add_participant(
        &self,
        trip: &TripId,
        participant: Participant,
    ) -> Result<(), TripLedgerError> {
        Ok(self.store.add_participant(trip, participant)?)
    }

    pub fn remove_participant(
        &self,
        trip: &TripId,
        participant: &ParticipantId,
    ) -> Result<(), TripLedgerError> {
        Ok(self.store.remove_participant(trip, participant)?)
    }

    /// Stores an expense with its `involved` list made explicit.
    pub fn record_expense(
        &self,
        trip: &TripId,
        draft: ExpenseDraft,
    ) -> Result<EntryId, TripLedgerError> {
        let participants = self.store.participants(trip)?;
        let resolver = InvolvedSetResolver::new(&participants);

        let involved = resolver.resolve(draft.involved.as_deref());
        if let Some(unknown) = std::iter::once(&draft.payer)
            .chain(involved.iter())
            .find(|id| !id.is_empty() && !resolver.is_known(id))
        {
            return Err(TripLedgerError::UnknownParticipant(unknown.clone()));
        }

        let entry = LedgerEntry::Expense(Expense {
            payer: draft.payer,
            involved,
            amount: draft.amount,
            currency: draft.currency,
            created_at: draft.created_at,
        });
        self.store_checked(trip, &participants, entry)
    }

    pub fn record_settlement(
        &self,
        trip: &TripId,
        draft: SettlementDraft,
    ) -> Result<EntryId, TripLedgerError> {
        let participants = self.store.participants(trip)?;
        let resolver = InvolvedSetResolver::new(&participants);
        if let Some(unknown) = [&draft.from, &draft.to]
            .into_iter()
            .find(|id| !id.is_empty() && !resolver.is_known(id))
        {
            return Err(TripLedgerError::UnknownParticipant(unknown.clone()));
        }

        let entry = LedgerEntry::Settlement(Settlement {
            from: draft.from,
            to: draft.to,
            amount: draft.amount,
            created_at: draft.created_at,
        });
        self.store_checked(trip, &participants, entry)
    }

    pub fn remove_entry(&self, trip: &TripId, entry: EntryId) -> Result<(), TripLedgerError> {
        Ok(self.store.remove_entry(trip, entry)?)
    }

    pub fn summarize(&self, trip: &TripId) -> Result<TripSummary, TripLedgerError> {
        let participants = self.store.participants(trip)?;
        let (ids, entries): (Vec<EntryId>, Vec<LedgerEntry>) = self
            .store
            .entries(trip)?
            .into_iter()
            .map(|stored| (stored.id, stored.entry))
            .unzip();

        Ok(summarize_entries(&participants, &entries, |index| {
            EntryRef::Stored(ids[index])
        }))
    }

    pub fn summarize_ledger(&self, ledger: &ParsedLedger) -> TripSummary {
        summarize_ledger(ledger)
    }

    fn store_checked(
        &self,
        trip: &TripId,
        participants: &[Participant],
        entry: LedgerEntry,
    ) -> Result<EntryId, TripLedgerError> {
        let warnings = EntryValidator::new(participants).check(&entry)?;
        for warning in &warnings {
            tracing::info!("Recording entry in trip {} with warning: {}", trip, warning);
        }

        let id = self.store.add_entry(trip, entry)?;
        tracing::debug!("Recorded entry {} in trip {}", id, trip);
        Ok(id)
    }
}

/// Summary of a ledger read from text; issues point at source lines.
pub fn summarize_ledger(ledger: &ParsedLedger) -> TripSummary {
    summarize_entries(&ledger.participants, &ledger.entries, |index| {
        EntryRef::Line(ledger.entry_lines.get(index).copied().unwrap_or(index + 1))
    })
}
