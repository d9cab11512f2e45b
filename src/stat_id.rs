//! Statistic identifier module.
//!
//! Provides the `StatId` type, a cheap-to-clone identifier for one
//! allocatable statistic on the character sheet.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Identifier of an allocatable statistic.
///
/// Backed by `Arc<str>` so snapshots can be cloned freely; two ids with the
/// same text compare equal.
///
/// # Examples
///
/// ```rust
/// use pointbuy::StatId;
///
/// let strength = StatId::from_str("strength");
/// let same: StatId = "strength".into();
/// assert_eq!(strength, same);
/// assert_eq!(strength.as_str(), "strength");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatId(Arc<str>);

impl Serialize for StatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(StatId::from(s))
    }
}

impl StatId {
    pub const STRENGTH: &'static str = "strength";
    pub const AGILITY: &'static str = "agility";
    pub const SPIRIT: &'static str = "spirit";
    pub const WISDOM: &'static str = "wisdom";

    /// Create a new `StatId` from a string slice.
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four statistics of the default character sheet, in display order.
    ///
    /// ```rust
    /// use pointbuy::StatId;
    ///
    /// let ids = StatId::defaults();
    /// assert_eq!(ids.len(), 4);
    /// assert_eq!(ids[0].as_str(), "strength");
    /// ```
    pub fn defaults() -> Vec<StatId> {
        [Self::STRENGTH, Self::AGILITY, Self::SPIRIT, Self::WISDOM]
            .into_iter()
            .map(StatId::from_str)
            .collect()
    }
}

impl From<&str> for StatId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for StatId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for StatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order() {
        let names: Vec<String> = StatId::defaults().iter().map(|id| id.to_string()).collect();
        assert_eq!(names, vec!["strength", "agility", "spirit", "wisdom"]);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = StatId::from_str("spirit");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"spirit\"");

        let back: StatId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_owned_and_borrowed_conversions_agree() {
        let a: StatId = String::from("wisdom").into();
        let b: StatId = "wisdom".into();
        assert_eq!(a, b);
    }
}
