//! Point-buy form state module.
//!
//! `PointBuy` is the single holder of form state: the current allocation
//! snapshot and the capacity in force. Every edit goes through the
//! allocator, and an accepted edit replaces the snapshot as a whole. The
//! remaining budget is never stored; it is recomputed from the snapshot
//! whenever it is asked for.

use crate::allocation::Allocation;
use crate::allocator::{Accepted, BudgetAllocator};
use crate::cost::{Points, StatValue};
use crate::error::{ConfigError, Rejection};
use crate::rules::PointBuyRules;
use crate::stat_id::StatId;

/// Live point-buy form.
///
/// # Examples
///
/// ```rust
/// use pointbuy::{PointBuy, PointBuyRules, StatId};
///
/// let mut form = PointBuy::new(PointBuyRules::standard()).unwrap();
/// let strength = StatId::from_str("strength");
///
/// form.propose(&strength, 5).unwrap();
/// assert_eq!(form.value(&strength), Some(5));
/// assert_eq!(form.remaining(), 9);
/// assert!(!form.can_submit());
/// ```
#[derive(Debug, Clone)]
pub struct PointBuy {
    rules: PointBuyRules,
    allocator: BudgetAllocator,
    allocation: Allocation,
    capacity: Points,
}

impl PointBuy {
    /// Start a fresh form: every statistic at the start value, the full
    /// capacity available.
    pub fn new(rules: PointBuyRules) -> Result<Self, ConfigError> {
        rules.validate()?;
        let allocation = rules.initial_allocation();
        Ok(Self::from_parts(rules, allocation))
    }

    /// Resume a form from a previously saved snapshot.
    ///
    /// The snapshot is fitted onto the rules' statistics (see
    /// [`PointBuyRules::align`]): missing statistics start at the start
    /// value and unknown ones are dropped. Saved values are otherwise taken
    /// as they are, even outside the table range or over budget. The
    /// recomputed remaining budget reports any overspend and decreases stay
    /// available to recover from it.
    pub fn restore(rules: PointBuyRules, saved: Allocation) -> Result<Self, ConfigError> {
        rules.validate()?;
        for stat in saved.ids().filter(|stat| !rules.statistics.contains(stat)) {
            tracing::warn!("Dropping unknown statistic {} from saved allocation", stat);
        }
        let allocation = rules.align(&saved);
        let form = Self::from_parts(rules, allocation);
        form.warn_if_overspent();
        Ok(form)
    }

    fn from_parts(rules: PointBuyRules, allocation: Allocation) -> Self {
        Self {
            allocator: rules.allocator(),
            capacity: rules.capacity,
            rules,
            allocation,
        }
    }

    /// Rules the form was created with.
    pub fn rules(&self) -> &PointBuyRules {
        &self.rules
    }

    /// Allocator built from the rules.
    pub fn allocator(&self) -> &BudgetAllocator {
        &self.allocator
    }

    /// Current snapshot of statistic values.
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Capacity in force. Starts at the rules' capacity.
    pub fn capacity(&self) -> Points {
        self.capacity
    }

    /// Current value of `stat`, or `None` if the rules do not list it.
    pub fn value(&self, stat: &StatId) -> Option<StatValue> {
        self.allocation.get(stat)
    }

    /// Points spent by the current snapshot.
    pub fn spent(&self) -> Points {
        self.allocator.spent(&self.allocation)
    }

    /// Points left to spend. Negative when overspent.
    pub fn remaining(&self) -> Points {
        self.allocator.total_remaining(&self.allocation, self.capacity)
    }

    /// Propose a new value for `stat` and apply it if accepted.
    ///
    /// On rejection the snapshot is left exactly as it was.
    pub fn propose(&mut self, stat: &StatId, value: StatValue) -> Result<Accepted, Rejection> {
        let accepted = self
            .allocator
            .propose_change(stat, value, &self.allocation, self.capacity)?;
        self.allocation = accepted.allocation.clone();
        Ok(accepted)
    }

    /// Raise `stat` by one step.
    pub fn increment(&mut self, stat: &StatId) -> Result<Accepted, Rejection> {
        let current = self.current(stat)?;
        self.propose(stat, current.saturating_add(1))
    }

    /// Lower `stat` by one step. Never blocked by the budget.
    pub fn decrement(&mut self, stat: &StatId) -> Result<Accepted, Rejection> {
        let current = self.current(stat)?;
        self.propose(stat, current.saturating_sub(1))
    }

    /// Whether the increment control for `stat` should be enabled.
    pub fn can_increment(&self, stat: &StatId) -> bool {
        self.allocator.can_increment(stat, &self.allocation, self.capacity)
    }

    /// Whether the decrement control for `stat` should be enabled.
    pub fn can_decrement(&self, stat: &StatId) -> bool {
        self.value(stat)
            .is_some_and(|value| value > self.allocator.table().min())
    }

    /// Change the capacity, e.g. after a rule change.
    ///
    /// The snapshot is kept even if it now overspends.
    pub fn set_capacity(&mut self, capacity: Points) {
        self.capacity = capacity;
        self.warn_if_overspent();
    }

    /// Whether the budget gate allows submitting.
    pub fn can_submit(&self) -> bool {
        self.remaining() == 0
    }

    /// Final values for export, if the budget is spent exactly.
    pub fn submit(&self) -> Result<Allocation, Rejection> {
        self.allocator.check_submission(&self.allocation, self.capacity)?;
        tracing::debug!("Submitted allocation with {} points spent", self.spent());
        Ok(self.allocation.clone())
    }

    /// Return every statistic to the start value.
    pub fn reset(&mut self) {
        self.allocation = self.rules.initial_allocation();
    }

    fn current(&self, stat: &StatId) -> Result<StatValue, Rejection> {
        self.value(stat)
            .ok_or_else(|| Rejection::UnknownStatistic(stat.clone()))
    }

    fn warn_if_overspent(&self) {
        let remaining = self.remaining();
        if remaining < 0 {
            tracing::warn!(
                "Allocation overspends capacity {} by {} points",
                self.capacity,
                remaining.unsigned_abs()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str) -> StatId {
        StatId::from_str(name)
    }

    fn form() -> PointBuy {
        PointBuy::new(PointBuyRules::standard()).unwrap()
    }

    #[test]
    fn test_new_form_starts_at_min_with_full_budget() {
        let form = form();
        assert!(form.allocation().values().all(|v| v == -2));
        assert_eq!(form.remaining(), 20);
        assert_eq!(form.spent(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_rules() {
        let mut rules = PointBuyRules::standard();
        rules.statistics.clear();
        assert!(PointBuy::new(rules).is_err());
    }

    #[test]
    fn test_rejected_proposal_keeps_snapshot() {
        let mut form = form();
        form.set_capacity(1);
        let before = form.allocation().clone();

        let err = form.propose(&stat("strength"), 0).unwrap_err();
        assert!(matches!(err, Rejection::BudgetExceeded { .. }));
        assert_eq!(form.allocation(), &before);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut form = form();
        let strength = stat("strength");

        form.increment(&strength).unwrap();
        form.increment(&strength).unwrap();
        assert_eq!(form.value(&strength), Some(0));
        assert_eq!(form.remaining(), 18);

        form.decrement(&strength).unwrap();
        assert_eq!(form.value(&strength), Some(-1));
        assert_eq!(form.remaining(), 19);
    }

    #[test]
    fn test_decrement_at_min_is_a_no_op() {
        let mut form = form();
        let accepted = form.decrement(&stat("wisdom")).unwrap();
        assert_eq!(accepted.value, -2);
        assert_eq!(accepted.clamped_from, Some(-3));
        assert!(!form.can_decrement(&stat("wisdom")));
    }

    #[test]
    fn test_increment_unknown_stat() {
        let mut form = form();
        assert_eq!(
            form.increment(&stat("luck")).unwrap_err(),
            Rejection::UnknownStatistic(stat("luck"))
        );
    }

    #[test]
    fn test_lowered_capacity_recovers_through_decreases() {
        let mut form = form();
        let strength = stat("strength");
        form.propose(&strength, 5).unwrap();

        form.set_capacity(8);
        assert_eq!(form.remaining(), -3);
        assert!(!form.can_submit());
        assert!(!form.can_increment(&stat("agility")));

        // 5 -> 4 refunds 3 points.
        form.decrement(&strength).unwrap();
        assert_eq!(form.remaining(), 0);
        assert!(form.can_submit());
    }

    #[test]
    fn test_submit_requires_exact_budget() {
        let mut form = form();
        assert_eq!(
            form.submit().unwrap_err(),
            Rejection::BudgetNotSpent { remaining: 20 }
        );

        form.propose(&stat("strength"), 5).unwrap(); // 11
        form.propose(&stat("agility"), 4).unwrap(); // 8
        form.propose(&stat("spirit"), -1).unwrap(); // 1
        assert_eq!(form.remaining(), 0);

        let submitted = form.submit().unwrap();
        assert_eq!(&submitted, form.allocation());
    }

    #[test]
    fn test_restore_overspent_snapshot() {
        let saved: Allocation = StatId::defaults().into_iter().map(|id| (id, 5)).collect();
        let form = PointBuy::restore(PointBuyRules::standard(), saved).unwrap();
        assert_eq!(form.remaining(), 20 - 44);
        assert!(form.can_decrement(&stat("spirit")));
    }

    #[test]
    fn test_restore_duplicated_stat_recovers_by_decreasing() {
        let saved: Allocation = serde_json::from_str(
            r#"[
                { "stat": "strength", "value": 5 },
                { "stat": "strength", "value": 5 },
                { "stat": "agility", "value": 5 }
            ]"#,
        )
        .unwrap();
        let mut form = PointBuy::restore(PointBuyRules::standard(), saved).unwrap();
        assert_eq!(form.allocation().len(), 4);
        assert_eq!(form.remaining(), -2);

        for _ in 0..7 {
            form.decrement(&stat("strength")).unwrap();
        }
        assert_eq!(form.value(&stat("strength")), Some(-2));
        assert_eq!(form.remaining(), 9);
    }

    #[test]
    fn test_restore_partial_snapshot_fills_missing_stats() {
        let saved: Allocation = vec![(stat("strength"), 5), (stat("charisma"), 4)]
            .into_iter()
            .collect();
        let mut form = PointBuy::restore(PointBuyRules::standard(), saved).unwrap();

        let ids: Vec<&str> = form.allocation().ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["strength", "agility", "spirit", "wisdom"]);
        assert_eq!(form.value(&stat("wisdom")), Some(-2));
        assert_eq!(form.value(&stat("charisma")), None);
        assert_eq!(form.remaining(), 9);

        form.increment(&stat("wisdom")).unwrap();
        assert_eq!(form.value(&stat("wisdom")), Some(-1));
        assert_eq!(form.remaining(), 8);
    }

    #[test]
    fn test_reset() {
        let mut form = form();
        form.propose(&stat("spirit"), 3).unwrap();
        form.reset();
        assert_eq!(form.remaining(), 20);
    }
}
