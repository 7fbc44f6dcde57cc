use crate::model::{Participant, ParticipantId};
use fxhash::FxHashSet;

/// Resolves which participants share an expense at ingestion time, so stored
/// expenses always carry an explicit `involved` list.
pub struct InvolvedSetResolver<'a> {
    participants: &'a [Participant],
}

impl<'a> InvolvedSetResolver<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        Self { participants }
    }

    /// Explicit ids deduplicated in first-occurrence order, or every
    /// participant when nothing was requested.
    pub fn resolve(&self, requested: Option<&[ParticipantId]>) -> Vec<ParticipantId> {
        match requested {
            Some(ids) if !ids.is_empty() => {
                let mut seen: FxHashSet<&str> = FxHashSet::default();
                ids.iter()
                    .filter(|id| seen.insert(id.as_str()))
                    .cloned()
                    .collect()
            }
            _ => self.all(),
        }
    }

    pub fn all(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .map(|participant| participant.id.clone())
            .collect()
    }

    pub fn is_known(&self, id: &ParticipantId) -> bool {
        self.participants
            .iter()
            .any(|participant| participant.id == *id)
    }
}
