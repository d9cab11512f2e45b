//! # pointbuy - Point-Buy Allocation Engine
//!
//! A small engine for the point-buy step of tabletop character creation:
//! - **Cost curve**: each statistic value has a price, higher tiers cost more
//! - **Budget gating**: increases are refused when they cost more than remains
//! - **Exact spend**: a character can only be submitted with 0 points left
//! - **Deterministic**: every query is a pure function of the current snapshot
//!
//! ## Core Concepts
//!
//! ```text
//! [edit] → [BudgetAllocator] → Accepted(next Allocation) | Rejection
//!                 ↑
//!            [CostTable]
//! ```
//!
//! 1. **CostTable** prices each value: the step cost of reaching it and the
//!    cumulative cost from the minimum
//! 2. **BudgetAllocator** clamps a proposed value into range, always lets
//!    spending go down, and checks increases against the remaining budget
//! 3. **PointBuy** holds the one current snapshot and swaps it on every
//!    accepted change; the remaining budget is recomputed on demand
//!
//! ## Example
//!
//! ```rust
//! use pointbuy::*;
//!
//! let mut form = PointBuy::new(PointBuyRules::standard()).unwrap();
//! let strength = StatId::from_str("strength");
//! let agility = StatId::from_str("agility");
//!
//! form.propose(&strength, 5).unwrap(); // costs 11
//! form.propose(&agility, 1).unwrap(); // costs 3
//! assert_eq!(form.remaining(), 6);
//!
//! // Submission needs the budget spent exactly.
//! assert!(form.submit().is_err());
//! ```
//!
//! ## Modules
//!
//! - [`stat_id`] - Statistic identifier type
//! - [`cost`] - Cost table (step and cumulative prices)
//! - [`allocation`] - Snapshot of statistic values
//! - [`allocator`] - Budget allocator
//! - [`rules`] - Point-buy configuration
//! - [`sheet`] - Live form state
//! - [`record`] - Exported character record
//! - [`error`] - Error types

pub mod allocation;
pub mod allocator;
pub mod cost;
pub mod error;
pub mod record;
pub mod rules;
pub mod sheet;
pub mod stat_id;

// Re-export main types for convenience
pub use allocation::{Allocation, StatEntry};
pub use allocator::{Accepted, BudgetAllocator, JumpPolicy};
pub use cost::{CostTable, Points, StatValue};
pub use error::{ConfigError, CostTableError, Rejection};
pub use record::CharacterRecord;
pub use rules::PointBuyRules;
pub use sheet::PointBuy;
pub use stat_id::StatId;
