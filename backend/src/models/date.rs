use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Calendar date of an item, without time of day or timezone.
///
/// Missing dates are not nulls: they are carried as the zero-date sentinel
/// `0000-00-00`, which is also what gets persisted and returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ItemDate {
    /// The `0000-00-00` sentinel.
    #[default]
    Zero,
    /// A real calendar day.
    Day(NaiveDate),
}

/// Error returned when a date string is neither empty nor `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date '{input}': expected YYYY-MM-DD")]
pub struct ItemDateError {
    pub input: String,
}

impl ItemDate {
    /// Wire and storage form of the zero-date.
    pub const ZERO: &'static str = "0000-00-00";

    const FORMAT: &'static str = "%Y-%m-%d";

    /// Parse a date as submitted by a client.
    ///
    /// Empty (or whitespace-only) input and the literal sentinel both map to
    /// [`ItemDate::Zero`]. A full RFC 3339 timestamp is accepted and truncated
    /// to its calendar day.
    pub fn parse(input: &str) -> Result<Self, ItemDateError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == Self::ZERO {
            return Ok(Self::Zero);
        }

        if let Ok(day) = NaiveDate::parse_from_str(trimmed, Self::FORMAT) {
            return Ok(Self::Day(day));
        }

        chrono::DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self::Day(dt.date_naive()))
            .map_err(|_| ItemDateError {
                input: input.to_string(),
            })
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::Day)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }
}

impl fmt::Display for ItemDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str(Self::ZERO),
            Self::Day(day) => write!(f, "{}", day.format(Self::FORMAT)),
        }
    }
}

impl FromStr for ItemDate {
    type Err = ItemDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for ItemDate {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl Serialize for ItemDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(Self::Zero),
            Some(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ItemDate;

    #[test]
    fn test_parse_iso_day() {
        let date = ItemDate::parse("2024-03-01").unwrap();
        assert_eq!(date, ItemDate::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(date.to_string(), "2024-03-01");
    }

    #[test]
    fn test_empty_is_zero_date() {
        assert_eq!(ItemDate::parse("").unwrap(), ItemDate::Zero);
        assert_eq!(ItemDate::parse("   ").unwrap(), ItemDate::Zero);
        assert_eq!(ItemDate::Zero.to_string(), "0000-00-00");
    }

    #[test]
    fn test_sentinel_round_trips() {
        let date: ItemDate = "0000-00-00".parse().unwrap();
        assert!(date.is_zero());
        assert_eq!(date.to_string(), ItemDate::ZERO);
    }

    #[test]
    fn test_rfc3339_truncated_to_day() {
        let date = ItemDate::parse("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(date.to_string(), "2024-01-15");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = ItemDate::parse("2024-13-45").unwrap_err();
        assert!(err.to_string().contains("2024-13-45"));
        assert!(ItemDate::parse("yesterday").is_err());
    }

    #[test]
    fn test_serde_null_and_missing_as_zero() {
        let date: ItemDate = serde_json::from_str("null").unwrap();
        assert!(date.is_zero());

        let json = serde_json::to_string(&ItemDate::from_ymd(2023, 12, 31).unwrap()).unwrap();
        assert_eq!(json, "\"2023-12-31\"");
    }
}
