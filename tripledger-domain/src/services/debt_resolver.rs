use crate::model::{Balances, Money, Participant, ParticipantId, Transfer};
use fxhash::FxHashSet;

/// Balances within this distance of zero count as settled.
pub const SETTLED_THRESHOLD: Money = Money::CENT;

struct Position<'a> {
    id: &'a ParticipantId,
    remaining: Money,
}

/// Greedy debtor/creditor matcher.
///
/// Debtors and creditors keep the participant order; matching is positional,
/// not by magnitude, so the plan is not guaranteed to have the fewest
/// transfers.
pub struct DebtResolver;

impl DebtResolver {
    /// Builds the transfers that would bring every balance back to zero.
    ///
    /// Emitted amounts are rounded to cents while the bookkeeping keeps full
    /// precision. An unbalanced input leaves the unmatched remainder
    /// unresolved.
    pub fn resolve(&self, participants: &[Participant], balances: &Balances) -> Vec<Transfer> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut creditors: Vec<Position<'_>> = Vec::new();
        let mut debtors: Vec<Position<'_>> = Vec::new();

        for participant in participants {
            if !seen.insert(participant.id.as_str()) {
                continue;
            }
            let Some(&balance) = balances.get(participant.id.as_str()) else {
                continue;
            };

            if balance > SETTLED_THRESHOLD {
                creditors.push(Position {
                    id: &participant.id,
                    remaining: balance,
                });
            } else if balance < -SETTLED_THRESHOLD {
                debtors.push(Position {
                    id: &participant.id,
                    remaining: balance.abs(),
                });
            }
        }

        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];
            let amount = debtor.remaining.min(creditor.remaining);

            transfers.push(Transfer {
                from: debtor.id.clone(),
                to: creditor.id.clone(),
                amount: amount.round_to_cents(),
            });

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if debtor.remaining < SETTLED_THRESHOLD {
                i += 1;
            }
            if creditor.remaining < SETTLED_THRESHOLD {
                j += 1;
            }
        }

        if i < debtors.len() || j < creditors.len() {
            let unmatched_debt: Money = debtors[i..].iter().map(|p| p.remaining).sum();
            let unmatched_credit: Money = creditors[j..].iter().map(|p| p.remaining).sum();
            tracing::warn!(
                unmatched_debt = %unmatched_debt,
                unmatched_credit = %unmatched_credit,
                "Balances do not net to zero; leaving remainder unresolved"
            );
        }

        transfers
    }
}

/// Greedy settlement plan for `balances`, walking debtors and creditors in
/// `participants` order.
pub fn compute_transfers(participants: &[Participant], balances: &Balances) -> Vec<Transfer> {
    DebtResolver.resolve(participants, balances)
}
