//! Calendar month selector used for aggregation and month navigation.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A year plus a month in `1..=12`. Day and time are never part of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// Unchecked wire shape; decoding goes through [`YearMonth::new`].
#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = ValidationError;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_instant(instant: &DateTime<Utc>) -> Self {
        Self::from_date(instant.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns `true` when the instant's UTC calendar date lies in this month.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        Self::from_instant(instant) == *self
    }

    /// Moves the selector by `months`, carrying across year boundaries.
    pub fn shift(&self, months: i32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    /// Heading shown above a month's breakdown, e.g. `March, 2024`.
    pub fn label(&self) -> String {
        let name = self
            .month
            .checked_sub(1)
            .and_then(|index| MONTH_NAMES.get(index as usize))
            .copied()
            .unwrap_or("?");
        format!("{name}, {}", self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parses the `YYYY-MM` form produced by [`fmt::Display`].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn shift_carries_across_year_boundaries() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(january.shift(13), YearMonth::new(2025, 2).unwrap());
        assert_eq!(january.shift(-25), YearMonth::new(2021, 12).unwrap());
        assert_eq!(january.next().previous(), january);
    }

    #[test]
    fn contains_ignores_day_and_time() {
        let march = YearMonth::new(2024, 3).unwrap();
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let before = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        assert!(march.contains(&first));
        assert!(march.contains(&last));
        assert!(!march.contains(&before));
        assert!(!march.contains(&after));
    }

    #[test]
    fn parses_and_labels_months() {
        let parsed: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(parsed, YearMonth::new(2024, 3).unwrap());
        assert_eq!(parsed.to_string(), "2024-03");
        assert_eq!(parsed.label(), "March, 2024");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
    }

    #[test]
    fn decoding_rejects_out_of_range_months() {
        for raw in [r#"{"year":2024,"month":0}"#, r#"{"year":2024,"month":13}"#] {
            let err = serde_json::from_str::<YearMonth>(raw).expect_err(raw);
            assert!(err.to_string().contains("invalid month"), "{err}");
        }
        let decoded: YearMonth = serde_json::from_str(r#"{"year":2024,"month":12}"#).unwrap();
        assert_eq!(decoded, YearMonth::new(2024, 12).unwrap());
        assert_eq!(decoded.label(), "December, 2024");
    }
}
