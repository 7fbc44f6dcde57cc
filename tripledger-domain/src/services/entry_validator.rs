use crate::model::{Expense, LedgerEntry, Money, Participant, ParticipantId, Settlement};
use fxhash::FxHashSet;

/// Why an entry does not contribute to balances.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("amount must be positive (found {0})")]
    NonPositiveAmount(Money),
    #[error("amount {0} exceeds the per-entry limit")]
    AmountOutOfRange(Money),
    #[error("settlement from '{0}' to itself")]
    SelfSettlement(ParticipantId),
    #[error("participant id is empty")]
    EmptyParticipantId,
    #[error("expense involves nobody")]
    EmptyInvolvedSet,
}

/// Suspicious but still counted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntryWarning {
    #[error("payer '{0}' is not among the involved participants")]
    PayerNotInvolved(ParticipantId),
    #[error("'{0}' is not a registered participant")]
    UnknownParticipant(ParticipantId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Position in the validated sequence.
    pub index: usize,
    pub reason: RejectionReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlaggedEntry {
    pub index: usize,
    pub warning: EntryWarning,
}

#[derive(Debug)]
pub struct ValidationReport<'e> {
    pub accepted: Vec<&'e LedgerEntry>,
    pub rejected: Vec<RejectedEntry>,
    pub warnings: Vec<FlaggedEntry>,
}

impl ValidationReport<'_> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.warnings.is_empty()
    }
}

/// Optional pre-filter reporting the entries the balance calculator would
/// skip. Rejects exactly those; warnings never drop an entry.
pub struct EntryValidator<'a> {
    participants: &'a [Participant],
    known: FxHashSet<&'a str>,
}

impl<'a> EntryValidator<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        let known = participants
            .iter()
            .map(|participant| participant.id.as_str())
            .collect();
        Self {
            participants,
            known,
        }
    }

    pub fn check(&self, entry: &LedgerEntry) -> Result<Vec<EntryWarning>, RejectionReason> {
        match entry {
            LedgerEntry::Settlement(settlement) => check_settlement(settlement)?,
            LedgerEntry::Expense(expense) => self.check_expense(expense)?,
        }

        let mut warnings = self.unknown_ids(entry.participant_ids());
        if let LedgerEntry::Expense(expense) = entry
            && !self.payer_involved(expense)
        {
            warnings.push(EntryWarning::PayerNotInvolved(expense.payer.clone()));
        }
        Ok(warnings)
    }

    pub fn validate<'e, I>(&self, entries: I) -> ValidationReport<'e>
    where
        I: IntoIterator<Item = &'e LedgerEntry>,
    {
        let mut report = ValidationReport {
            accepted: Vec::new(),
            rejected: Vec::new(),
            warnings: Vec::new(),
        };

        for (index, entry) in entries.into_iter().enumerate() {
            match self.check(entry) {
                Ok(warnings) => {
                    report.accepted.push(entry);
                    report.warnings.extend(
                        warnings
                            .into_iter()
                            .map(|warning| FlaggedEntry { index, warning }),
                    );
                }
                Err(reason) => report.rejected.push(RejectedEntry { index, reason }),
            }
        }

        report
    }

    fn check_expense(&self, expense: &Expense) -> Result<(), RejectionReason> {
        if expense.involved.is_empty() && self.participants.is_empty() {
            return Err(RejectionReason::EmptyInvolvedSet);
        }
        check_amount(expense.amount)
    }

    fn payer_involved(&self, expense: &Expense) -> bool {
        if expense.involved.is_empty() {
            self.known.contains(expense.payer.as_str())
        } else {
            expense.involved.contains(&expense.payer)
        }
    }

    fn unknown_ids<'i, I>(&self, ids: I) -> Vec<EntryWarning>
    where
        I: IntoIterator<Item = &'i ParticipantId>,
    {
        let mut reported: FxHashSet<&str> = FxHashSet::default();
        ids.into_iter()
            .filter(|id| !self.known.contains(id.as_str()) && reported.insert(id.as_str()))
            .map(|id| EntryWarning::UnknownParticipant(id.clone()))
            .collect()
    }
}

fn check_settlement(settlement: &Settlement) -> Result<(), RejectionReason> {
    if settlement.from.is_empty() || settlement.to.is_empty() {
        return Err(RejectionReason::EmptyParticipantId);
    }
    if settlement.from == settlement.to {
        return Err(RejectionReason::SelfSettlement(settlement.from.clone()));
    }
    check_amount(settlement.amount)
}

fn check_amount(amount: Money) -> Result<(), RejectionReason> {
    if !amount.is_positive() {
        Err(RejectionReason::NonPositiveAmount(amount))
    } else if amount > Money::MAX_ENTRY_AMOUNT {
        Err(RejectionReason::AmountOutOfRange(amount))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn families() -> Vec<Participant> {
        vec![Participant::new("a", "Abe"), Participant::new("b", "Baba")]
    }

    fn expense(payer: &str, involved: &[&str], amount: i64) -> LedgerEntry {
        LedgerEntry::Expense(Expense {
            payer: payer.into(),
            involved: involved.iter().copied().map(ParticipantId::from).collect(),
            amount: Money::from_i64(amount),
            currency: None,
            created_at: None,
        })
    }

    fn settlement(from: &str, to: &str, amount: i64) -> LedgerEntry {
        LedgerEntry::Settlement(Settlement {
            from: from.into(),
            to: to.into(),
            amount: Money::from_i64(amount),
            created_at: None,
        })
    }

    #[rstest]
    #[case::valid_expense(expense("a", &["a", "b"], 10), Ok(vec![]))]
    #[case::valid_settlement(settlement("b", "a", 10), Ok(vec![]))]
    #[case::implicit_everyone(expense("a", &[], 10), Ok(vec![]))]
    #[case::zero_expense(
        expense("a", &["a"], 0),
        Err(RejectionReason::NonPositiveAmount(Money::ZERO))
    )]
    #[case::negative_settlement(
        settlement("a", "b", -5),
        Err(RejectionReason::NonPositiveAmount(Money::from_i64(-5)))
    )]
    #[case::oversized_expense(
        LedgerEntry::Expense(Expense {
            payer: "a".into(),
            involved: vec!["a".into(), "b".into()],
            amount: Money::MAX_ENTRY_AMOUNT + Money::CENT,
            currency: None,
            created_at: None,
        }),
        Err(RejectionReason::AmountOutOfRange(Money::MAX_ENTRY_AMOUNT + Money::CENT))
    )]
    #[case::largest_settlement(
        LedgerEntry::Settlement(Settlement {
            from: "a".into(),
            to: "b".into(),
            amount: Money::MAX_ENTRY_AMOUNT,
            created_at: None,
        }),
        Ok(vec![])
    )]
    #[case::self_settlement(
        settlement("a", "a", 5),
        Err(RejectionReason::SelfSettlement("a".into()))
    )]
    #[case::empty_id(settlement("", "a", 5), Err(RejectionReason::EmptyParticipantId))]
    #[case::payer_outside(
        expense("a", &["b"], 10),
        Ok(vec![EntryWarning::PayerNotInvolved("a".into())])
    )]
    #[case::unknown_involved(
        expense("a", &["a", "z", "z"], 10),
        Ok(vec![EntryWarning::UnknownParticipant("z".into())])
    )]
    #[case::unknown_payer_outside(
        expense("x", &["a"], 10),
        Ok(vec![
            EntryWarning::UnknownParticipant("x".into()),
            EntryWarning::PayerNotInvolved("x".into()),
        ])
    )]
    #[case::unknown_settlement_party(
        settlement("x", "a", 10),
        Ok(vec![EntryWarning::UnknownParticipant("x".into())])
    )]
    fn check_cases(
        families: Vec<Participant>,
        #[case] entry: LedgerEntry,
        #[case] expected: Result<Vec<EntryWarning>, RejectionReason>,
    ) {
        let validator = EntryValidator::new(&families);
        assert_eq!(validator.check(&entry), expected);
    }

    #[test]
    fn empty_involved_without_participants_is_rejected() {
        let validator = EntryValidator::new(&[]);
        assert_eq!(
            validator.check(&expense("a", &[], 10)),
            Err(RejectionReason::EmptyInvolvedSet)
        );
    }

    #[rstest]
    fn validate_splits_accepted_and_rejected(families: Vec<Participant>) {
        let entries = vec![
            expense("a", &["a", "b"], 10),
            settlement("b", "b", 3),
            expense("a", &["b"], 4),
            settlement("a", "b", 0),
        ];
        let validator = EntryValidator::new(&families);

        let report = validator.validate(&entries);

        assert_eq!(report.accepted, vec![&entries[0], &entries[2]]);
        assert_eq!(
            report.rejected,
            vec![
                RejectedEntry {
                    index: 1,
                    reason: RejectionReason::SelfSettlement("b".into()),
                },
                RejectedEntry {
                    index: 3,
                    reason: RejectionReason::NonPositiveAmount(Money::ZERO),
                },
            ]
        );
        assert_eq!(
            report.warnings,
            vec![FlaggedEntry {
                index: 2,
                warning: EntryWarning::PayerNotInvolved("a".into()),
            }]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn rejection_messages_are_readable() {
        assert_eq!(
            RejectionReason::SelfSettlement("a".into()).to_string(),
            "settlement from 'a' to itself"
        );
        assert_eq!(
            RejectionReason::NonPositiveAmount(Money::from_i64(-3)).to_string(),
            "amount must be positive (found -3)"
        );
    }
}
