//! Day-of-week tokens used to match trips against pricing configurations.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the seven fixed weekday tokens.
///
/// Serialized as the lowercase English day name (`"monday"` .. `"sunday"`),
/// which is also the form stored in a configuration's `applicable_days`.
///
/// # Example
///
/// ```
/// use fare_engine::models::DayOfWeek;
///
/// let day: DayOfWeek = "Saturday".parse().unwrap();
/// assert_eq!(day, DayOfWeek::Saturday);
/// assert_eq!(day.to_string(), "saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Returns the lowercase token for this day.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// Returns the day of the week a trip on `date` falls on.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fare_engine::models::DayOfWeek;
    ///
    /// // 2026-01-17 is a Saturday
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
    /// assert_eq!(DayOfWeek::of(date), DayOfWeek::Saturday);
    /// ```
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == token)
            .ok_or_else(|| EngineError::InvalidRequest {
                field: "day_of_week".to_string(),
                message: format!("unknown weekday token '{}'", s),
            })
    }
}
