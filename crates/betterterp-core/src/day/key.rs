use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, ParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day, rendered as `YYYY-MM-DD`.
///
/// Ordering matches the string ordering of the rendered key, so keys can be
/// compared either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` for an impossible date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whole days between 1970-01-01 and this date.
    pub fn days_since_epoch(&self) -> i64 {
        self.0
            .signed_duration_since(NaiveDate::default())
            .num_days()
    }

    /// The day after this one. Saturates at the end of chrono's range.
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), KEY_FORMAT).map(Self)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_zero_padded() {
        let key = DateKey::from_ymd(2024, 3, 7).unwrap();
        assert_eq!(key.to_string(), "2024-03-07");
    }

    #[test]
    fn parses_rendered_form() {
        let key: DateKey = "2024-12-08".parse().unwrap();
        assert_eq!(key, DateKey::from_ymd(2024, 12, 8).unwrap());
        assert!("2024-13-01".parse::<DateKey>().is_err());
        assert!("yesterday".parse::<DateKey>().is_err());
    }

    #[test]
    fn ordering_matches_string_ordering() {
        let a = DateKey::from_ymd(2024, 9, 30).unwrap();
        let b = DateKey::from_ymd(2024, 10, 1).unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn epoch_day_count() {
        assert_eq!(DateKey::from_ymd(1970, 1, 1).unwrap().days_since_epoch(), 0);
        assert_eq!(DateKey::from_ymd(1970, 1, 2).unwrap().days_since_epoch(), 1);
        assert_eq!(
            DateKey::from_ymd(2024, 12, 8).unwrap().days_since_epoch(),
            20065
        );
    }

    #[test]
    fn succ_crosses_month_boundary() {
        let key = DateKey::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(key.succ().to_string(), "2024-03-01");
    }
}
