use crate::model::{EntryIssue, EntryRef, IssueKind, ParticipantBalance, TripSummary};
use tripledger_domain::{
    EntryValidator, LedgerEntry, Participant, compute_balances, compute_transfers,
};

/// Validates, balances and settles `entries`. `entry_ref` maps an entry's
/// position to how callers refer to it.
pub(crate) fn summarize_entries<F>(
    participants: &[Participant],
    entries: &[LedgerEntry],
    entry_ref: F,
) -> TripSummary
where
    F: Fn(usize) -> EntryRef,
{
    let report = EntryValidator::new(participants).validate(entries);

    let mut issues: Vec<EntryIssue> = report
        .rejected
        .into_iter()
        .map(|rejected| EntryIssue {
            entry: entry_ref(rejected.index),
            kind: IssueKind::Rejected(rejected.reason),
        })
        .chain(report.warnings.into_iter().map(|flagged| EntryIssue {
            entry: entry_ref(flagged.index),
            kind: IssueKind::Warning(flagged.warning),
        }))
        .collect();
    issues.sort_by_key(|issue| match issue.entry {
        EntryRef::Line(line) => line as u64,
        EntryRef::Stored(id) => id.0,
    });

    for issue in &issues {
        match &issue.kind {
            IssueKind::Rejected(reason) => {
                tracing::warn!("Skipping entry {:?}: {}", issue.entry, reason)
            }
            IssueKind::Warning(warning) => {
                tracing::info!("Entry {:?}: {}", issue.entry, warning)
            }
        }
    }

    let balances = compute_balances(participants, report.accepted.iter().copied());
    let transfers = compute_transfers(participants, &balances);

    TripSummary {
        balances: balances
            .into_iter()
            .map(|(id, balance)| ParticipantBalance { id, balance })
            .collect(),
        transfers,
        issues,
    }
}
