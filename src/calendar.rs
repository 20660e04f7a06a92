//! Calendar utilities: ISO dates, period windows and the inclusive day sequence.
//!
//! All scheduling happens on whole calendar days. Dates are `chrono::NaiveDate`
//! and travel as `YYYY-MM-DD` strings.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// ISO date format used everywhere in snapshots and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| PlannerError::InvalidDate(s.to_string()))
}

/// Parse an optional date, mapping empty or malformed input to `None`.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Inclusive sequence of days from `start` to `end`.
///
/// Empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// An inclusive scheduling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse a period from two ISO strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// A period of `length` days starting at `start`.
    pub fn starting_at(start: NaiveDate, length: u32) -> Result<Self> {
        if length == 0 {
            return Err(PlannerError::InvalidPeriod("length must be at least one day".to_string()));
        }
        let end = start
            .checked_add_days(Days::new(u64::from(length - 1)))
            .ok_or_else(|| PlannerError::InvalidPeriod(format!("{} + {} days overflows", start, length)))?;
        Ok(Self::new(start, end))
    }

    /// Ordered days of the window (empty when inverted).
    pub fn days(&self) -> Vec<NaiveDate> {
        days_between(self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// The same window moved forward by `days`.
    pub fn shifted(&self, days: u64) -> Result<Self> {
        let start = shift_date(self.start, days)?;
        let end = shift_date(self.end, days)?;
        Ok(Self::new(start, end))
    }

    /// Stable key naming this window, e.g. `2025-08-18_2025-08-23`.
    pub fn key(&self) -> String {
        format!("{}_{}", format_date(self.start), format_date(self.end))
    }

    /// Inverse of [`Period::key`].
    pub fn from_key(key: &str) -> Result<Self> {
        let (start, end) = key
            .split_once('_')
            .ok_or_else(|| PlannerError::InvalidPeriod(format!("malformed period key: {}", key)))?;
        Self::parse(start, end)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", format_date(self.start), format_date(self.end))
    }
}

/// Move a date forward by `days`.
pub fn shift_date(day: NaiveDate, days: u64) -> Result<NaiveDate> {
    day.checked_add_days(Days::new(days))
        .ok_or_else(|| PlannerError::InvalidDate(format!("{} + {} days overflows", day, days)))
}

/// Serde adapter for optional dates that never fails on bad input.
///
/// `null`, a missing field, an empty string, a malformed string or a non-string
/// value all decode to `None`.
pub mod lenient_date {
    use std::fmt;

    use chrono::NaiveDate;
    use serde::de::{self, Deserializer, Visitor};
    use serde::ser::Serializer;

    use super::{format_date, parse_date_lenient};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(day) => serializer.serialize_str(&format_date(*day)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        deserializer.deserialize_any(LenientDateVisitor)
    }

    struct LenientDateVisitor;

    impl<'de> Visitor<'de> for LenientDateVisitor {
        type Value = Option<NaiveDate>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an ISO date string or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(parse_date_lenient(v))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(LenientDateVisitor)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(None)
        }
    }
}
