//! Error types for point allocation.
//!
//! `Rejection` is the outcome of the allocator protocol: a proposal or a
//! submission that was refused, leaving state untouched. `CostTableError`
//! and `ConfigError` are raised once, while loading the rules.

use crate::cost::{Points, StatValue};
use crate::stat_id::StatId;
use thiserror::Error;

/// Why a proposed change or a submission was refused.
///
/// None of these are faults. The caller decides how to report them; ignoring
/// a rejection and keeping the previous snapshot is a valid policy.
///
/// # Examples
///
/// ```rust
/// use pointbuy::{Rejection, StatId};
///
/// let rejection = Rejection::BudgetExceeded {
///     stat: StatId::from_str("strength"),
///     cost: 3,
///     remaining: 1,
/// };
/// assert_eq!(
///     rejection.to_string(),
///     "Raising strength costs 3 points but only 1 remain"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// An increase whose cost exceeds the remaining budget.
    #[error("Raising {stat} costs {cost} points but only {remaining} remain")]
    BudgetExceeded {
        stat: StatId,
        cost: Points,
        remaining: Points,
    },

    /// The statistic is not part of the allocation snapshot.
    #[error("Unknown statistic: {0}")]
    UnknownStatistic(StatId),

    /// Submission requires the budget to be spent exactly.
    #[error("Budget must be spent exactly before submitting ({remaining} points remaining)")]
    BudgetNotSpent { remaining: Points },
}

/// Problems with a cost table definition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CostTableError {
    #[error("Cost table has no steps")]
    EmptySteps,

    /// The baseline entry must be free so that reaching `MIN` costs nothing.
    #[error("Cost of the baseline value must be 0, got {0}")]
    NonZeroBaseline(Points),

    #[error("Step {index} has negative cost {cost}")]
    NegativeStep { index: usize, cost: Points },

    #[error("Cumulative cost decreases at entry {index}")]
    DecreasingTotal { index: usize },

    #[error("Cost table range overflows")]
    RangeOverflow,

    #[error("Cumulative cost overflows")]
    CostOverflow,
}

/// Problems loading or validating [`PointBuyRules`](crate::PointBuyRules) or
/// a stored [`CharacterRecord`](crate::CharacterRecord).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(String),

    #[error("Invalid cost table: {0}")]
    CostTable(#[from] CostTableError),

    #[error("Capacity must not be negative, got {0}")]
    NegativeCapacity(Points),

    #[error("Rules declare no statistics")]
    NoStatistics,

    #[error("Statistic declared twice: {0}")]
    DuplicateStatistic(StatId),

    #[error("Start value {start} is outside the cost table range [{min}, {max}]")]
    StartOutOfRange {
        start: StatValue,
        min: StatValue,
        max: StatValue,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}
