//! Week identifiers.

use serde::{Deserialize, Serialize};

use crate::constants::WEEKS_TOTAL;

/// A week of the study plan, always within `1..=WEEKS_TOTAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WeekId(u32);

impl WeekId {
    /// Create a week id, or `None` when the number is outside the plan.
    pub fn new(number: u32) -> Option<Self> {
        (1..=WEEKS_TOTAL).contains(&number).then_some(Self(number))
    }

    /// 1-based week number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// Storage key of this week (`week-N`).
    pub fn key(self) -> String {
        format!("week-{}", self.0)
    }

    /// Every week of the plan, in order.
    pub fn all() -> impl Iterator<Item = WeekId> {
        (1..=WEEKS_TOTAL).map(WeekId)
    }
}

impl std::fmt::Display for WeekId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u32> for WeekId {
    type Error = InvalidWeek;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        WeekId::new(number).ok_or_else(|| InvalidWeek(number.to_string()))
    }
}

impl From<WeekId> for u32 {
    fn from(week: WeekId) -> Self {
        week.0
    }
}

impl std::str::FromStr for WeekId {
    type Err = InvalidWeek;

    /// Accepts either the bare number (`"3"`) or the storage key (`"week-3"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("week-").unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .ok()
            .and_then(WeekId::new)
            .ok_or_else(|| InvalidWeek(s.to_string()))
    }
}

/// A week number or key that does not name a week of the plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("week must be between 1 and {WEEKS_TOTAL}, got {0:?}")]
pub struct InvalidWeek(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_and_key() {
        assert_eq!("3".parse::<WeekId>().unwrap().number(), 3);
        assert_eq!("week-10".parse::<WeekId>().unwrap().number(), 10);
        assert!("week-11".parse::<WeekId>().is_err());
        assert!("0".parse::<WeekId>().is_err());
        assert!("abc".parse::<WeekId>().is_err());
    }

    #[test]
    fn test_all_weeks_in_order() {
        let keys: Vec<String> = WeekId::all().map(WeekId::key).collect();
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[0], "week-1");
        assert_eq!(keys[9], "week-10");
    }
}
