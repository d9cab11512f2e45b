//! Character record module.
//!
//! The record is what leaves the form: the descriptive fields typed by the
//! player plus the final statistic values. Rendering and storage are done
//! elsewhere; this module only defines the data and its JSON form.

use crate::allocation::Allocation;
use crate::cost::{Points, StatValue};
use crate::error::ConfigError;
use crate::rules::PointBuyRules;
use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};

/// A finished (or draft) character.
///
/// # Examples
///
/// ```rust
/// use pointbuy::{CharacterRecord, PointBuyRules};
///
/// let rules = PointBuyRules::standard();
/// let record = CharacterRecord::new("Mira", rules.initial_allocation());
///
/// let json = record.to_json().unwrap();
/// let back = CharacterRecord::from_json(&json).unwrap();
/// assert_eq!(back, record);
/// assert_eq!(back.remaining(&rules), 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterRecord {
    /// Character name.
    pub name: String,
    /// Name of the player.
    pub real_name: String,
    pub age: Option<u32>,
    /// Height in centimetres.
    pub size_cm: Option<u32>,
    pub job: String,
    pub phobia: String,
    pub story: String,
    pub stats: Allocation,
}

impl CharacterRecord {
    pub fn new(name: impl Into<String>, stats: Allocation) -> Self {
        Self {
            name: name.into(),
            stats,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Remaining budget of the stored values under `rules`.
    ///
    /// A record saved under other rules may come back negative.
    pub fn remaining(&self, rules: &PointBuyRules) -> Points {
        rules.allocator().total_remaining(&self.stats, rules.capacity)
    }

    /// Statistic values formatted for the sheet, in declaration order.
    pub fn modifiers(&self) -> Vec<(StatId, String)> {
        self.stats
            .iter()
            .map(|(stat, value)| (stat.clone(), format_modifier(value)))
            .collect()
    }
}

/// Signed display of a statistic value: `+0`, `+3`, `-2`.
///
/// ```rust
/// use pointbuy::record::format_modifier;
///
/// assert_eq!(format_modifier(0), "+0");
/// assert_eq!(format_modifier(3), "+3");
/// assert_eq!(format_modifier(-2), "-2");
/// ```
pub fn format_modifier(value: StatValue) -> String {
    if value < 0 {
        value.to_string()
    } else {
        format!("+{}", value)
    }
}
