//! Cost table module.
//!
//! A `CostTable` prices a statistic's value. Each value in `[MIN, MAX]` has
//! a *step cost* (the price of the single step that reaches it from the value
//! below) and a *cumulative cost* (the price of reaching it from `MIN`).
//! Higher tiers usually cost more per step.
//!
//! The table is fixed data: the prefix sums are computed once at
//! construction and every query is a slice lookup.

use crate::error::CostTableError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Value of a statistic.
pub type StatValue = i32;

/// Amount of budget points. Signed, since an overspent budget is negative.
pub type Points = i32;

/// Step costs of the standard sheet, for values `-2..=5`.
pub const STANDARD_STEPS: [Points; 8] = [0, 1, 1, 1, 1, 2, 2, 3];

/// Lowest value of the standard sheet.
pub const STANDARD_MIN: StatValue = -2;

/// Highest value of the standard sheet.
pub const STANDARD_MAX: StatValue = 5;

/// Immutable price list for statistic values.
///
/// Two tables built from the same steps are equal and answer every query
/// identically.
///
/// # Examples
///
/// ```rust
/// use pointbuy::CostTable;
///
/// let table = CostTable::standard();
/// assert_eq!(table.min(), -2);
/// assert_eq!(table.max(), 5);
///
/// // Moving from 2 to 3 costs 2 points.
/// assert_eq!(table.step_cost(3), Some(2));
/// // Reaching 5 from -2 costs 0+1+1+1+1+2+2+3.
/// assert_eq!(table.cumulative_cost(5), Some(11));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CostTableDef", into = "CostTableDef")]
pub struct CostTable {
    min: StatValue,
    max: StatValue,
    /// `steps[i]` is the price of reaching `min + i` from `min + i - 1`.
    steps: Vec<Points>,
    /// `totals[i]` is the price of reaching `min + i` from `min`.
    totals: Vec<Points>,
}

/// Serialized shape of a cost table.
#[derive(Serialize, Deserialize)]
struct CostTableDef {
    min: StatValue,
    steps: Vec<Points>,
}

impl TryFrom<CostTableDef> for CostTable {
    type Error = CostTableError;

    fn try_from(def: CostTableDef) -> Result<Self, Self::Error> {
        CostTable::new(def.min, def.steps)
    }
}

impl From<CostTable> for CostTableDef {
    fn from(table: CostTable) -> Self {
        Self {
            min: table.min,
            steps: table.steps,
        }
    }
}

impl CostTable {
    /// Build a table from per-step costs starting at `min`.
    ///
    /// The first step is the baseline and must be free. Steps must not be
    /// negative, which makes the cumulative cost non-decreasing.
    ///
    /// # Errors
    ///
    /// Returns a [`CostTableError`] describing the first offending entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointbuy::{CostTable, CostTableError};
    ///
    /// let table = CostTable::new(0, vec![0, 1, 2]).unwrap();
    /// assert_eq!(table.max(), 2);
    ///
    /// let err = CostTable::new(0, vec![1, 1]).unwrap_err();
    /// assert_eq!(err, CostTableError::NonZeroBaseline(1));
    /// ```
    pub fn new(min: StatValue, steps: Vec<Points>) -> Result<Self, CostTableError> {
        let first = *steps.first().ok_or(CostTableError::EmptySteps)?;
        if first != 0 {
            return Err(CostTableError::NonZeroBaseline(first));
        }

        let span =
            StatValue::try_from(steps.len() - 1).map_err(|_| CostTableError::RangeOverflow)?;
        let max = min.checked_add(span).ok_or(CostTableError::RangeOverflow)?;

        let mut totals = Vec::with_capacity(steps.len());
        let mut running: Points = 0;
        for (index, &cost) in steps.iter().enumerate() {
            if cost < 0 {
                return Err(CostTableError::NegativeStep { index, cost });
            }
            running = running
                .checked_add(cost)
                .ok_or(CostTableError::CostOverflow)?;
            totals.push(running);
        }

        Ok(Self {
            min,
            max,
            steps,
            totals,
        })
    }

    /// Build a table from cumulative totals, one per value starting at `min`.
    ///
    /// This is the "value costs N points" listing many rulebooks print.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointbuy::CostTable;
    ///
    /// let from_totals = CostTable::from_cumulative(-2, &[0, 1, 2, 3, 4, 6, 8, 11]).unwrap();
    /// assert_eq!(from_totals, CostTable::standard());
    /// ```
    pub fn from_cumulative(min: StatValue, totals: &[Points]) -> Result<Self, CostTableError> {
        let first = *totals.first().ok_or(CostTableError::EmptySteps)?;
        if first != 0 {
            return Err(CostTableError::NonZeroBaseline(first));
        }

        let mut steps = Vec::with_capacity(totals.len());
        steps.push(0);
        for (index, pair) in totals.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(CostTableError::DecreasingTotal { index: index + 1 });
            }
            steps.push(pair[1] - pair[0]);
        }

        Self::new(min, steps)
    }

    /// The standard sheet: `[0, 1, 1, 1, 1, 2, 2, 3]` over `[-2, 5]`.
    pub fn standard() -> Self {
        let totals = prefix_sums(&STANDARD_STEPS);
        Self {
            min: STANDARD_MIN,
            max: STANDARD_MAX,
            steps: STANDARD_STEPS.to_vec(),
            totals,
        }
    }

    /// Lowest value, the free baseline.
    pub fn min(&self) -> StatValue {
        self.min
    }

    /// Highest value a statistic can reach.
    pub fn max(&self) -> StatValue {
        self.max
    }

    /// `MIN..=MAX`.
    pub fn range(&self) -> RangeInclusive<StatValue> {
        self.min..=self.max
    }

    /// Per-step costs, starting with the baseline entry.
    pub fn steps(&self) -> &[Points] {
        &self.steps
    }

    /// Whether `value` lies in `[MIN, MAX]`.
    ///
    /// ```rust
    /// use pointbuy::CostTable;
    ///
    /// let table = CostTable::standard();
    /// assert!(table.contains(-2));
    /// assert!(!table.contains(6));
    /// ```
    pub fn contains(&self, value: StatValue) -> bool {
        self.range().contains(&value)
    }

    /// Snap `value` to the nearest bound of the table.
    pub fn clamp(&self, value: StatValue) -> StatValue {
        value.clamp(self.min, self.max)
    }

    /// Price of the single step that reaches `target` from `target - 1`.
    ///
    /// The same amount is refunded when stepping down from `target`. The
    /// baseline `MIN` has step cost 0. Returns `None` outside `[MIN, MAX]`.
    pub fn step_cost(&self, target: StatValue) -> Option<Points> {
        self.index(target).map(|i| self.steps[i])
    }

    /// Total price of reaching `value` from `MIN`. Returns `None` outside
    /// `[MIN, MAX]`.
    pub fn cumulative_cost(&self, value: StatValue) -> Option<Points> {
        self.index(value).map(|i| self.totals[i])
    }

    /// Cumulative cost of `value` after snapping it into range.
    ///
    /// Used to price snapshots that did not come through the allocator, such
    /// as state reloaded under different rules.
    pub fn price(&self, value: StatValue) -> Points {
        match self.index(self.clamp(value)) {
            Some(i) => self.totals[i],
            None => 0,
        }
    }

    /// Change in spent points when moving from `from` to `to`.
    ///
    /// Positive for increases, negative (a refund) for decreases.
    ///
    /// ```rust
    /// use pointbuy::CostTable;
    ///
    /// let table = CostTable::standard();
    /// assert_eq!(table.delta_cost(3, 5), 5);
    /// assert_eq!(table.delta_cost(5, 3), -5);
    /// ```
    pub fn delta_cost(&self, from: StatValue, to: StatValue) -> Points {
        self.price(to) - self.price(from)
    }

    fn index(&self, value: StatValue) -> Option<usize> {
        if self.contains(value) {
            usize::try_from(value - self.min).ok()
        } else {
            None
        }
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn prefix_sums(steps: &[Points]) -> Vec<Points> {
    steps
        .iter()
        .scan(0, |running, &cost| {
            *running += cost;
            Some(*running)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_matches_validated_construction() {
        let built = CostTable::new(STANDARD_MIN, STANDARD_STEPS.to_vec()).unwrap();
        assert_eq!(built, CostTable::standard());
        assert_eq!(built.max(), STANDARD_MAX);
    }

    #[test]
    fn test_cumulative_is_prefix_sum_of_steps() {
        let table = CostTable::standard();
        for value in table.range() {
            let expected: Points = (table.min()..=value)
                .map(|v| table.step_cost(v).unwrap())
                .sum();
            assert_eq!(table.cumulative_cost(value), Some(expected), "value {value}");
        }
    }

    #[test]
    fn test_cumulative_is_non_decreasing_and_zero_at_min() {
        let table = CostTable::standard();
        assert_eq!(table.cumulative_cost(table.min()), Some(0));

        let totals: Vec<Points> = table
            .range()
            .map(|v| table.cumulative_cost(v).unwrap())
            .collect();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(totals, vec![0, 1, 2, 3, 4, 6, 8, 11]);
    }

    #[test]
    fn test_out_of_range_queries_return_none() {
        let table = CostTable::standard();
        assert_eq!(table.step_cost(-3), None);
        assert_eq!(table.step_cost(6), None);
        assert_eq!(table.cumulative_cost(-3), None);
        assert_eq!(table.cumulative_cost(6), None);
    }

    #[test]
    fn test_price_snaps_into_range() {
        let table = CostTable::standard();
        assert_eq!(table.price(-10), 0);
        assert_eq!(table.price(99), 11);
        assert_eq!(table.price(1), 3);
    }

    #[test]
    fn test_clamp() {
        let table = CostTable::standard();
        assert_eq!(table.clamp(99), 5);
        assert_eq!(table.clamp(-99), -2);
        assert_eq!(table.clamp(0), 0);
    }

    #[test]
    fn test_rejects_invalid_steps() {
        assert_eq!(CostTable::new(0, vec![]), Err(CostTableError::EmptySteps));
        assert_eq!(
            CostTable::new(0, vec![0, 2, -1]),
            Err(CostTableError::NegativeStep { index: 2, cost: -1 })
        );
        assert_eq!(
            CostTable::new(StatValue::MAX, vec![0, 1]),
            Err(CostTableError::RangeOverflow)
        );
        assert_eq!(
            CostTable::new(0, vec![0, Points::MAX, 1]),
            Err(CostTableError::CostOverflow)
        );
    }

    #[test]
    fn test_from_cumulative_rejects_decreasing_totals() {
        assert_eq!(
            CostTable::from_cumulative(8, &[0, 1, 3, 2]),
            Err(CostTableError::DecreasingTotal { index: 3 })
        );
        assert_eq!(
            CostTable::from_cumulative(8, &[2, 3]),
            Err(CostTableError::NonZeroBaseline(2))
        );
    }

    #[test]
    fn test_from_cumulative_published_listing() {
        // 8 → 0, 9 → 1, ... 14 → 7, 15 → 9
        let table = CostTable::from_cumulative(8, &[0, 1, 2, 3, 4, 5, 7, 9]).unwrap();
        assert_eq!(table.range(), 8..=15);
        assert_eq!(table.step_cost(14), Some(2));
        assert_eq!(table.cumulative_cost(15), Some(9));
    }

    #[test]
    fn test_identical_steps_give_identical_answers() {
        let a = CostTable::new(-2, STANDARD_STEPS.to_vec()).unwrap();
        let b = CostTable::new(-2, STANDARD_STEPS.to_vec()).unwrap();
        for value in -5..=8 {
            assert_eq!(a.step_cost(value), b.step_cost(value));
            assert_eq!(a.cumulative_cost(value), b.cumulative_cost(value));
            assert_eq!(a.price(value), b.price(value));
        }
    }

    #[test]
    fn test_serde_shape() {
        let table = CostTable::standard();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "min": -2, "steps": [0, 1, 1, 1, 1, 2, 2, 3] })
        );

        let back: CostTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_validates() {
        let result: Result<CostTable, _> =
            serde_json::from_str(r#"{ "min": 0, "steps": [0, -1] }"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("negative"));
    }
}
