//! Allocation snapshot module.
//!
//! An `Allocation` holds the current value of every allocatable statistic.
//! It is owned by exactly one state holder (see [`PointBuy`](crate::PointBuy))
//! and is replaced as a whole on every accepted change; the allocator only
//! reads it.

use crate::cost::StatValue;
use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};

/// One statistic and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub stat: StatId,
    pub value: StatValue,
}

/// Ordered snapshot of statistic values.
///
/// Order is the declaration order of the statistics and is preserved by
/// every operation, so callers can render the snapshot as-is. Each statistic
/// appears at most once; when a source lists one twice, including a
/// deserialized list, the first entry wins.
///
/// # Examples
///
/// ```rust
/// use pointbuy::{Allocation, StatId};
///
/// let form = Allocation::uniform(StatId::defaults(), -2);
/// let strength = StatId::from_str("strength");
///
/// let next = form.with_value(&strength, 1).unwrap();
/// assert_eq!(next.get(&strength), Some(1));
/// // The previous snapshot is untouched.
/// assert_eq!(form.get(&strength), Some(-2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<StatEntry>", into = "Vec<StatEntry>")]
pub struct Allocation {
    entries: Vec<StatEntry>,
}

impl Allocation {
    /// Create an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statistic in `stats` set to `value`.
    ///
    /// A statistic listed more than once is kept once, at its first position.
    pub fn uniform(stats: impl IntoIterator<Item = StatId>, value: StatValue) -> Self {
        stats
            .into_iter()
            .map(|stat| (stat, value))
            .collect()
    }

    /// Current value of `stat`, or `None` if it is not part of the snapshot.
    ///
    /// ```rust
    /// use pointbuy::{Allocation, StatId};
    ///
    /// let form = Allocation::uniform(StatId::defaults(), 0);
    /// assert_eq!(form.get(&StatId::from_str("wisdom")), Some(0));
    /// assert_eq!(form.get(&StatId::from_str("luck")), None);
    /// ```
    pub fn get(&self, stat: &StatId) -> Option<StatValue> {
        self.entries
            .iter()
            .find(|entry| &entry.stat == stat)
            .map(|entry| entry.value)
    }

    /// Whether `stat` is part of the snapshot.
    pub fn contains(&self, stat: &StatId) -> bool {
        self.get(stat).is_some()
    }

    /// A new snapshot with `stat` set to `value`.
    ///
    /// Returns `None` if `stat` is not part of this allocation.
    pub fn with_value(&self, stat: &StatId, value: StatValue) -> Option<Self> {
        let position = self.entries.iter().position(|entry| &entry.stat == stat)?;
        let mut entries = self.entries.clone();
        entries[position].value = value;
        Some(Self { entries })
    }

    /// `(statistic, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&StatId, StatValue)> {
        self.entries.iter().map(|entry| (&entry.stat, entry.value))
    }

    /// Statistic ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &StatId> {
        self.entries.iter().map(|entry| &entry.stat)
    }

    /// Values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = StatValue> + '_ {
        self.entries.iter().map(|entry| entry.value)
    }

    /// Number of statistics in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no statistics.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(StatId, StatValue)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (StatId, StatValue)>>(iter: I) -> Self {
        let mut entries: Vec<StatEntry> = Vec::new();
        for (stat, value) in iter {
            if entries.iter().all(|entry| entry.stat != stat) {
                entries.push(StatEntry { stat, value });
            }
        }
        Self { entries }
    }
}

impl From<Vec<StatEntry>> for Allocation {
    fn from(entries: Vec<StatEntry>) -> Self {
        entries
            .into_iter()
            .map(|entry| (entry.stat, entry.value))
            .collect()
    }
}

impl From<Allocation> for Vec<StatEntry> {
    fn from(allocation: Allocation) -> Self {
        allocation.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StatId {
        StatId::from_str(s)
    }

    #[test]
    fn test_uniform_preserves_order() {
        let alloc = Allocation::uniform(StatId::defaults(), 0);
        let ids: Vec<&str> = alloc.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["strength", "agility", "spirit", "wisdom"]);
        assert!(alloc.values().all(|v| v == 0));
    }

    #[test]
    fn test_duplicates_keep_first() {
        let alloc: Allocation = vec![(id("a"), 1), (id("b"), 2), (id("a"), 3)]
            .into_iter()
            .collect();
        assert_eq!(alloc.len(), 2);
        assert_eq!(alloc.get(&id("a")), Some(1));
    }

    #[test]
    fn test_with_value_unknown_stat() {
        let alloc = Allocation::uniform(vec![id("a")], 0);
        assert_eq!(alloc.with_value(&id("z"), 3), None);
    }

    #[test]
    fn test_with_value_keeps_position() {
        let alloc = Allocation::uniform(vec![id("a"), id("b"), id("c")], 0);
        let next = alloc.with_value(&id("b"), 4).unwrap();
        let pairs: Vec<(String, StatValue)> =
            next.iter().map(|(s, v)| (s.to_string(), v)).collect();
        assert_eq!(
            pairs,
            vec![("a".into(), 0), ("b".into(), 4), ("c".into(), 0)]
        );
    }

    #[test]
    fn test_serializes_as_entry_list() {
        let alloc = Allocation::uniform(vec![id("strength")], 2);
        let json = serde_json::to_value(&alloc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "stat": "strength", "value": 2 }])
        );
        let back: Allocation = serde_json::from_value(json).unwrap();
        assert_eq!(back, alloc);
    }

    #[test]
    fn test_deserialize_keeps_first_duplicate() {
        let json = r#"[
            { "stat": "strength", "value": 5 },
            { "stat": "agility", "value": 1 },
            { "stat": "strength", "value": 3 }
        ]"#;
        let alloc: Allocation = serde_json::from_str(json).unwrap();
        assert_eq!(alloc.len(), 2);
        assert_eq!(alloc.get(&id("strength")), Some(5));
        assert_eq!(alloc.values().collect::<Vec<_>>(), vec![5, 1]);
    }

    #[test]
    fn test_empty() {
        let alloc = Allocation::new();
        assert!(alloc.is_empty());
        assert_eq!(alloc.get(&id("a")), None);
        assert!(!alloc.contains(&id("a")));
    }
}
