//! Point-buy rules module.
//!
//! `PointBuyRules` is the configuration of one character-creation form: the
//! budget, the statistics it covers, where they start, and how values are
//! priced. Rules are loaded once at startup and never change afterwards.

use crate::allocation::Allocation;
use crate::allocator::{BudgetAllocator, JumpPolicy};
use crate::cost::{CostTable, Points, StatValue, STANDARD_MIN};
use crate::error::ConfigError;
use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Budget given to the standard sheet.
pub const STANDARD_CAPACITY: Points = 20;

/// Configuration of a point-buy form.
///
/// # Examples
///
/// ```rust
/// use pointbuy::{JumpPolicy, PointBuyRules};
///
/// let rules = PointBuyRules::from_json(r#"{
///     "capacity": 27,
///     "start_value": 8,
///     "statistics": ["str", "dex", "con", "int", "wis", "cha"],
///     "cost_table": { "min": 8, "steps": [0, 1, 1, 1, 1, 1, 2, 2] }
/// }"#).unwrap();
///
/// assert_eq!(rules.capacity, 27);
/// assert_eq!(rules.cost_table.max(), 15);
/// assert_eq!(rules.jump_policy, JumpPolicy::CumulativeDelta);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBuyRules {
    /// Total points to allocate.
    pub capacity: Points,
    /// Value every statistic has on a fresh form.
    pub start_value: StatValue,
    /// Allocatable statistics, in display order.
    pub statistics: Vec<StatId>,
    pub cost_table: CostTable,
    #[serde(default)]
    pub jump_policy: JumpPolicy,
}

impl PointBuyRules {
    /// The standard sheet: 20 points over strength, agility, spirit and
    /// wisdom, each starting at -2 on the standard cost table.
    pub fn standard() -> Self {
        Self {
            capacity: STANDARD_CAPACITY,
            start_value: STANDARD_MIN,
            statistics: StatId::defaults(),
            cost_table: CostTable::standard(),
            jump_policy: JumpPolicy::default(),
        }
    }

    /// Rules whose statistics start at the bottom of a table built from
    /// `steps`.
    ///
    /// ```rust
    /// use pointbuy::PointBuyRules;
    ///
    /// let rules = PointBuyRules::from_steps(10, ["body", "mind"], 0, vec![0, 1, 2]).unwrap();
    /// assert_eq!(rules.start_value, 0);
    /// assert_eq!(rules.cost_table.max(), 2);
    /// ```
    pub fn from_steps<I, S>(
        capacity: Points,
        statistics: I,
        min: StatValue,
        steps: Vec<Points>,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<StatId>,
    {
        let rules = Self {
            capacity,
            start_value: min,
            statistics: statistics.into_iter().map(Into::into).collect(),
            cost_table: CostTable::new(min, steps)?,
            jump_policy: JumpPolicy::default(),
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Parse rules from JSON and validate them.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed input or an invalid cost table,
    /// otherwise whatever [`validate`](Self::validate) reports.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: PointBuyRules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Pretty-printed JSON, in the shape [`from_json`](Self::from_json) reads.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Same rules with a different [`JumpPolicy`].
    pub fn with_jump_policy(mut self, policy: JumpPolicy) -> Self {
        self.jump_policy = policy;
        self
    }

    /// Check the rules for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < 0 {
            return Err(ConfigError::NegativeCapacity(self.capacity));
        }
        if self.statistics.is_empty() {
            return Err(ConfigError::NoStatistics);
        }

        let mut seen = HashSet::new();
        for stat in &self.statistics {
            if !seen.insert(stat) {
                return Err(ConfigError::DuplicateStatistic(stat.clone()));
            }
        }

        if !self.cost_table.contains(self.start_value) {
            return Err(ConfigError::StartOutOfRange {
                start: self.start_value,
                min: self.cost_table.min(),
                max: self.cost_table.max(),
            });
        }
        Ok(())
    }

    /// The allocator these rules describe.
    pub fn allocator(&self) -> BudgetAllocator {
        BudgetAllocator::new(self.cost_table.clone()).with_policy(self.jump_policy)
    }

    /// A fresh form with every statistic at the start value.
    pub fn initial_allocation(&self) -> Allocation {
        Allocation::uniform(self.statistics.iter().cloned(), self.start_value)
    }

    /// Fit a saved snapshot onto these rules.
    ///
    /// The result lists exactly the rules' statistics in their order. Saved
    /// values are kept as they are; statistics missing from `saved` get the
    /// start value, and ids the rules do not know are dropped.
    ///
    /// ```rust
    /// use pointbuy::{Allocation, PointBuyRules, StatId};
    ///
    /// let rules = PointBuyRules::standard();
    /// let saved: Allocation = vec![
    ///     (StatId::from_str("luck"), 3),
    ///     (StatId::from_str("spirit"), 2),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let aligned = rules.align(&saved);
    /// assert_eq!(aligned.values().collect::<Vec<_>>(), vec![-2, -2, 2, -2]);
    /// ```
    pub fn align(&self, saved: &Allocation) -> Allocation {
        self.statistics
            .iter()
            .map(|stat| (stat.clone(), saved.get(stat).unwrap_or(self.start_value)))
            .collect()
    }
}

impl Default for PointBuyRules {
    fn default() -> Self {
        Self::standard()
    }
}
