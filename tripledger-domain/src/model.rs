use arcstr::ArcStr;
use chrono::{DateTime, Utc};
use either::Either;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

/// Opaque participant ("family") identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(ArcStr);

impl ParticipantId {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(ArcStr::from(value))
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: ArcStr,
}

impl Participant {
    pub fn new(id: impl Into<ArcStr>, name: impl Into<ArcStr>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
        }
    }
}

/// Currency label attached to an expense. Never used in arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(ArcStr);

impl Currency {
    pub fn new(code: impl Into<ArcStr>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed-point monetary amount in the trip's common unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// 0.01, the smallest displayable amount.
    pub const CENT: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));
    /// 10^15, the largest amount a single entry may carry.
    pub const MAX_ENTRY_AMOUNT: Self =
        Self(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    /// `num * 10^-scale`, e.g. `Money::new(1250, 2)` is 12.50.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Equal share of `self` across `parts` recipients, without pre-rounding.
    /// Returns `None` for zero parts.
    pub fn split_evenly(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts)).map(Self)
    }

    /// Rounds to two fractional digits, midpoints away from zero.
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Money a payer spent on behalf of the involved participants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub payer: ParticipantId,
    /// Empty means "all participants"; ingestion normally resolves it first.
    #[serde(default)]
    pub involved: Vec<ParticipantId>,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A payment already made from one participant to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEntry {
    Expense(Expense),
    Settlement(Settlement),
}

impl LedgerEntry {
    /// Payer then involved ids for expenses, `from` then `to` for settlements.
    pub fn participant_ids(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        match self {
            Self::Expense(expense) => {
                Either::Left(std::iter::once(&expense.payer).chain(expense.involved.iter()))
            }
            Self::Settlement(settlement) => {
                Either::Right([&settlement.from, &settlement.to].into_iter())
            }
        }
    }
}

impl From<Expense> for LedgerEntry {
    fn from(value: Expense) -> Self {
        Self::Expense(value)
    }
}

impl From<Settlement> for LedgerEntry {
    fn from(value: Settlement) -> Self {
        Self::Settlement(value)
    }
}

/// Net position per participant: positive is owed money, negative owes money.
///
/// Iteration order is participant order first, then ids first seen in entries.
pub type Balances = IndexMap<ParticipantId, Money, FxBuildHasher>;

/// A directed payment from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact(Money::from_i64(90), 3, Money::from_i64(30))]
    #[case::fractional(Money::from_i64(10), 4, Money::new(250, 2))]
    #[case::single(Money::new(1999, 2), 1, Money::new(1999, 2))]
    fn split_evenly_divides_without_rounding(
        #[case] amount: Money,
        #[case] parts: usize,
        #[case] expected: Money,
    ) {
        assert_eq!(amount.split_evenly(parts), Some(expected));
    }

    #[test]
    fn split_evenly_rejects_zero_parts() {
        assert_eq!(Money::from_i64(10).split_evenly(0), None);
    }

    #[rstest]
    #[case::half_cent_up("33.335", "33.34")]
    #[case::below_half("33.3333333", "33.33")]
    #[case::negative_half("-0.005", "-0.01")]
    #[case::already_cents("45", "45")]
    fn round_to_cents_rounds_midpoint_away_from_zero(#[case] input: &str, #[case] expected: &str) {
        let money: Money = input.parse().expect("valid decimal");
        let expected: Money = expected.parse().expect("valid decimal");
        assert_eq!(money.round_to_cents(), expected);
    }

    #[test]
    fn cent_constant_is_one_hundredth() {
        assert_eq!(Money::CENT, Money::new(1, 2));
    }

    #[test]
    fn max_entry_amount_is_ten_to_the_fifteenth() {
        assert_eq!(Money::MAX_ENTRY_AMOUNT, Money::from_i64(1_000_000_000_000_000));
    }

    #[test]
    fn checked_add_reports_overflow() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_i64(1)), None);
        assert_eq!(
            Money::from_i64(2).checked_add(Money::from_i64(-5)),
            Some(Money::from_i64(-3))
        );
    }

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(Money::new(3000, 2).to_string(), "30");
        assert_eq!(Money::new(1250, 2).to_string(), "12.5");
    }

    #[test]
    fn ledger_entry_serializes_with_kind_tag() {
        let entry = LedgerEntry::Settlement(Settlement {
            from: "b".into(),
            to: "a".into(),
            amount: Money::from_i64(30),
            created_at: None,
        });
        let value = serde_json::to_value(&entry).expect("serializable");
        assert_eq!(value["kind"], "settlement");
        assert_eq!(value["from"], "b");
        assert_eq!(value["amount"], "30");
    }

    #[test]
    fn participant_ids_lists_every_reference() {
        let expense = LedgerEntry::Expense(Expense {
            payer: "a".into(),
            involved: vec!["a".into(), "b".into()],
            amount: Money::from_i64(10),
            currency: None,
            created_at: None,
        });
        let ids: Vec<&str> = expense.participant_ids().map(ParticipantId::as_str).collect();
        assert_eq!(ids, ["a", "a", "b"]);

        let settlement = LedgerEntry::Settlement(Settlement {
            from: "c".into(),
            to: "d".into(),
            amount: Money::from_i64(5),
            created_at: None,
        });
        let ids: Vec<&str> = settlement
            .participant_ids()
            .map(ParticipantId::as_str)
            .collect();
        assert_eq!(ids, ["c", "d"]);
    }
}
