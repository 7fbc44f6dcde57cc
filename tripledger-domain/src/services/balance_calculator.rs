use crate::model::{Balances, Expense, LedgerEntry, Money, Participant, ParticipantId, Settlement};

/// Folds ledger entries into a net balance per participant.
///
/// Malformed entries (non-positive or oversized amount, self-settlement,
/// empty ids, nobody involved) are skipped rather than reported; see
/// [`EntryValidator`](crate::services::EntryValidator) for visibility into them.
pub struct BalanceCalculator<'a> {
    participants: &'a [Participant],
    balances: Balances,
}

impl<'a> BalanceCalculator<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        let balances: Balances = participants
            .iter()
            .map(|participant| (participant.id.clone(), Money::ZERO))
            .collect();

        Self {
            participants,
            balances,
        }
    }

    pub fn apply(&mut self, entry: &LedgerEntry) {
        match entry {
            LedgerEntry::Settlement(settlement) => self.apply_settlement(settlement),
            LedgerEntry::Expense(expense) => self.apply_expense(expense),
        }
    }

    pub fn apply_all<'e, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'e LedgerEntry>,
    {
        for entry in entries {
            self.apply(entry);
        }
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn into_balances(self) -> Balances {
        self.balances
    }

    fn apply_settlement(&mut self, settlement: &Settlement) {
        let Settlement {
            from, to, amount, ..
        } = settlement;

        if from.is_empty() || to.is_empty() || from == to || !is_valid_amount(*amount) {
            tracing::debug!(
                from = %from,
                to = %to,
                amount = %amount,
                "Skipping malformed settlement"
            );
            return;
        }

        if !self.apply_deltas([(from, *amount), (to, -*amount)]) {
            tracing::debug!(from = %from, to = %to, "Skipping settlement that overflows balances");
        }
    }

    fn apply_expense(&mut self, expense: &Expense) {
        let participants = self.participants;
        let fallback;
        let involved: &[ParticipantId] = if expense.involved.is_empty() {
            fallback = participants
                .iter()
                .map(|participant| participant.id.clone())
                .collect::<Vec<_>>();
            &fallback
        } else {
            &expense.involved
        };

        let fair_share = match expense.amount.split_evenly(involved.len()) {
            Some(share) if is_valid_amount(expense.amount) => share,
            _ => {
                tracing::debug!(
                    payer = %expense.payer,
                    amount = %expense.amount,
                    involved_count = involved.len(),
                    "Skipping malformed expense"
                );
                return;
            }
        };

        let payer_share = expense.amount - fair_share;
        let deltas = involved.iter().map(|id| {
            if *id == expense.payer {
                (id, payer_share)
            } else {
                (id, -fair_share)
            }
        });
        if !self.apply_deltas(deltas) {
            tracing::debug!(payer = %expense.payer, "Skipping expense that overflows balances");
        }
    }

    /// Applies every delta or none of them. Returns `false` on overflow.
    fn apply_deltas<'d, I>(&mut self, deltas: I) -> bool
    where
        I: IntoIterator<Item = (&'d ParticipantId, Money)>,
    {
        let mut staged: Vec<(&ParticipantId, Money)> = Vec::new();
        for (id, delta) in deltas {
            let position = staged.iter().position(|(staged_id, _)| *staged_id == id);
            let current = match position {
                Some(index) => staged[index].1,
                None => self
                    .balances
                    .get(id.as_str())
                    .copied()
                    .unwrap_or(Money::ZERO),
            };
            let Some(next) = current.checked_add(delta) else {
                return false;
            };
            match position {
                Some(index) => staged[index].1 = next,
                None => staged.push((id, next)),
            }
        }

        for (id, balance) in staged {
            self.balances.insert(id.clone(), balance);
        }
        true
    }
}

/// Positive and no larger than [`Money::MAX_ENTRY_AMOUNT`].
fn is_valid_amount(amount: Money) -> bool {
    amount.is_positive() && amount <= Money::MAX_ENTRY_AMOUNT
}

/// Net balance per participant after folding `entries` in order.
///
/// Every participant starts at zero; ids that only appear in entries are
/// appended after the participants.
pub fn compute_balances<'e, I>(participants: &[Participant], entries: I) -> Balances
where
    I: IntoIterator<Item = &'e LedgerEntry>,
{
    let mut calculator = BalanceCalculator::new(participants);
    calculator.apply_all(entries);
    calculator.into_balances()
}
