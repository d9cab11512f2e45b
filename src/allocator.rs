//! Budget allocator module.
//!
//! The `BudgetAllocator` gates every proposed statistic change against the
//! value range and the available budget. It owns no state: it reads an
//! [`Allocation`] snapshot and returns either the accepted next snapshot or
//! a [`Rejection`]. Writing the result back is the caller's job.

use crate::allocation::Allocation;
use crate::cost::{CostTable, Points, StatValue};
use crate::error::Rejection;
use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};

/// How a proposal more than one step away from the current value is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpPolicy {
    /// Price the whole jump with the cumulative-cost delta and accept or
    /// reject it as a unit.
    #[default]
    CumulativeDelta,

    /// Walk the jump one step at a time, each step checked against the
    /// budget left after the previous ones. The value stops at the last
    /// affordable step; the proposal is rejected only if no step is.
    Stepwise,
}

/// An accepted proposal.
///
/// `allocation` is the complete next snapshot; the caller replaces its
/// current snapshot with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub stat: StatId,
    /// Value before the change.
    pub previous: StatValue,
    /// Value after the change.
    pub value: StatValue,
    /// The raw proposal, when it was outside the table range and got snapped
    /// to the nearest bound.
    pub clamped_from: Option<StatValue>,
    /// Points spent by the change. Negative for a refund.
    pub cost: Points,
    /// Remaining budget, recomputed over the whole next snapshot.
    pub remaining: Points,
    pub allocation: Allocation,
}

/// Decides whether proposed statistic changes are admissible.
///
/// # Examples
///
/// ```rust
/// use pointbuy::{Allocation, BudgetAllocator, CostTable, Rejection, StatId};
///
/// let allocator = BudgetAllocator::new(CostTable::standard());
/// let strength = StatId::from_str("strength");
/// let form = Allocation::uniform(StatId::defaults(), -2);
///
/// // Raising strength from -2 to 5 costs 11 of the 20 points.
/// let accepted = allocator.propose_change(&strength, 5, &form, 20).unwrap();
/// assert_eq!(accepted.remaining, 9);
///
/// // With only 10 points, the same jump is refused.
/// let refused = allocator.propose_change(&strength, 5, &form, 10).unwrap_err();
/// assert!(matches!(refused, Rejection::BudgetExceeded { cost: 11, remaining: 10, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BudgetAllocator {
    table: CostTable,
    policy: JumpPolicy,
}

impl BudgetAllocator {
    /// Create an allocator with the default [`JumpPolicy::CumulativeDelta`].
    pub fn new(table: CostTable) -> Self {
        Self {
            table,
            policy: JumpPolicy::default(),
        }
    }

    /// Use `policy` for proposals more than one step away.
    pub fn with_policy(mut self, policy: JumpPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The cost table used to price values.
    pub fn table(&self) -> &CostTable {
        &self.table
    }

    /// How multi-step proposals are priced.
    pub fn policy(&self) -> JumpPolicy {
        self.policy
    }

    /// Total points spent by `allocation`.
    ///
    /// Values outside the table range are priced as their nearest bound.
    /// The sum saturates at `Points::MAX` instead of overflowing.
    pub fn spent(&self, allocation: &Allocation) -> Points {
        allocation
            .values()
            .map(|value| self.table.price(value))
            .fold(0, Points::saturating_add)
    }

    /// `capacity` minus the points spent by `allocation`.
    ///
    /// Pure: the same inputs always give the same result and nothing is
    /// modified. The result is negative when the snapshot overspends, e.g.
    /// after the capacity was lowered. Any capacity is accepted, negative
    /// ones included; the subtraction saturates at the `Points` bounds.
    pub fn total_remaining(&self, allocation: &Allocation, capacity: Points) -> Points {
        capacity.saturating_sub(self.spent(allocation))
    }

    /// Evaluate a proposal to set `stat` to `proposed`.
    ///
    /// 1. `proposed` is snapped into the table range. This is never a
    ///    rejection.
    /// 2. A change that does not cost anything (a decrease or no change) is
    ///    always accepted, whatever the remaining budget.
    /// 3. An increase is priced according to the [`JumpPolicy`] and rejected
    ///    with [`Rejection::BudgetExceeded`] if it costs more than what
    ///    remains.
    ///
    /// The current value is read from `allocation`, which is never modified.
    ///
    /// # Errors
    ///
    /// [`Rejection::UnknownStatistic`] if `stat` is not in `allocation`,
    /// [`Rejection::BudgetExceeded`] if the increase is not affordable.
    pub fn propose_change(
        &self,
        stat: &StatId,
        proposed: StatValue,
        allocation: &Allocation,
        capacity: Points,
    ) -> Result<Accepted, Rejection> {
        let current = allocation
            .get(stat)
            .ok_or_else(|| Rejection::UnknownStatistic(stat.clone()))?;

        let target = self.table.clamp(proposed);
        let clamped_from = (target != proposed).then_some(proposed);

        let cost = self.table.delta_cost(current, target);
        if cost <= 0 {
            return self.accept(stat, current, target, clamped_from, allocation, capacity);
        }

        let remaining = self.total_remaining(allocation, capacity);
        let reached = match self.policy {
            JumpPolicy::CumulativeDelta => {
                if cost > remaining {
                    return Err(self.reject(stat, cost, remaining));
                }
                target
            }
            JumpPolicy::Stepwise => {
                let start = self.table.clamp(current);
                let reached = self.walk_steps(start, target, remaining);
                if reached == start {
                    let first_step = self.table.step_cost(start + 1).unwrap_or(cost);
                    return Err(self.reject(stat, first_step, remaining));
                }
                reached
            }
        };

        self.accept(stat, current, reached, clamped_from, allocation, capacity)
    }

    /// Whether raising `stat` by one step is affordable right now.
    ///
    /// Returns `false` at `MAX` and for statistics not in `allocation`. Useful
    /// to enable or disable an increment control.
    pub fn can_increment(
        &self,
        stat: &StatId,
        allocation: &Allocation,
        capacity: Points,
    ) -> bool {
        let Some(current) = allocation.get(stat) else {
            return false;
        };
        if current >= self.table.max() {
            return false;
        }
        let next = self.table.clamp(current + 1);
        self.table.delta_cost(current, next) <= self.total_remaining(allocation, capacity)
    }

    /// Submission gate: the budget must be spent exactly.
    ///
    /// # Errors
    ///
    /// [`Rejection::BudgetNotSpent`] whenever the remaining budget is not 0,
    /// whether points are left over or overspent.
    pub fn check_submission(
        &self,
        allocation: &Allocation,
        capacity: Points,
    ) -> Result<(), Rejection> {
        let remaining = self.total_remaining(allocation, capacity);
        if remaining != 0 {
            tracing::debug!("Submission blocked: {} points remaining", remaining);
            return Err(Rejection::BudgetNotSpent { remaining });
        }
        Ok(())
    }

    /// Highest value reachable from `start` toward `target` when each step
    /// is paid from `budget`.
    fn walk_steps(&self, start: StatValue, target: StatValue, budget: Points) -> StatValue {
        let mut left = budget;
        let mut reached = start;
        for value in (start + 1)..=target {
            let step = match self.table.step_cost(value) {
                Some(step) => step,
                None => break,
            };
            if step > left {
                tracing::debug!(
                    "Step to {} costs {} with {} points left, stopping at {}",
                    value,
                    step,
                    left,
                    reached
                );
                break;
            }
            left -= step;
            reached = value;
        }
        reached
    }

    fn accept(
        &self,
        stat: &StatId,
        previous: StatValue,
        value: StatValue,
        clamped_from: Option<StatValue>,
        allocation: &Allocation,
        capacity: Points,
    ) -> Result<Accepted, Rejection> {
        let next = allocation
            .with_value(stat, value)
            .ok_or_else(|| Rejection::UnknownStatistic(stat.clone()))?;
        let remaining = self.total_remaining(&next, capacity);
        let cost = self.table.delta_cost(previous, value);

        tracing::debug!(
            "Accepted {}: {} -> {} (cost {}, {} remaining)",
            stat,
            previous,
            value,
            cost,
            remaining
        );

        Ok(Accepted {
            stat: stat.clone(),
            previous,
            value,
            clamped_from,
            cost,
            remaining,
            allocation: next,
        })
    }

    fn reject(&self, stat: &StatId, cost: Points, remaining: Points) -> Rejection {
        tracing::debug!(
            "Rejected raising {}: costs {} with {} remaining",
            stat,
            cost,
            remaining
        );
        Rejection::BudgetExceeded {
            stat: stat.clone(),
            cost,
            remaining,
        }
    }
}
