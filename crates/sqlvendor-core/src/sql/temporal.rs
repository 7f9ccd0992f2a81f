//! Temporal units for date-part extraction

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A field that can be extracted from a date, time or timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TemporalUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Nanosecond,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    WeekOfMonth,
    WeekOfYear,
    Offset,
    TimezoneHour,
    TimezoneMinute,
    Epoch,
}

impl TemporalUnit {
    pub const ALL: [TemporalUnit; 18] = [
        TemporalUnit::Year,
        TemporalUnit::Quarter,
        TemporalUnit::Month,
        TemporalUnit::Week,
        TemporalUnit::Day,
        TemporalUnit::Hour,
        TemporalUnit::Minute,
        TemporalUnit::Second,
        TemporalUnit::Nanosecond,
        TemporalUnit::DayOfWeek,
        TemporalUnit::DayOfMonth,
        TemporalUnit::DayOfYear,
        TemporalUnit::WeekOfMonth,
        TemporalUnit::WeekOfYear,
        TemporalUnit::Offset,
        TemporalUnit::TimezoneHour,
        TemporalUnit::TimezoneMinute,
        TemporalUnit::Epoch,
    ];

    /// Canonical name, also the field name used when a dialect has no
    /// vendor-specific one
    pub fn name(&self) -> &'static str {
        match self {
            TemporalUnit::Year => "year",
            TemporalUnit::Quarter => "quarter",
            TemporalUnit::Month => "month",
            TemporalUnit::Week => "week",
            TemporalUnit::Day => "day",
            TemporalUnit::Hour => "hour",
            TemporalUnit::Minute => "minute",
            TemporalUnit::Second => "second",
            TemporalUnit::Nanosecond => "nanosecond",
            TemporalUnit::DayOfWeek => "day_of_week",
            TemporalUnit::DayOfMonth => "day_of_month",
            TemporalUnit::DayOfYear => "day_of_year",
            TemporalUnit::WeekOfMonth => "week_of_month",
            TemporalUnit::WeekOfYear => "week_of_year",
            TemporalUnit::Offset => "offset",
            TemporalUnit::TimezoneHour => "timezone_hour",
            TemporalUnit::TimezoneMinute => "timezone_minute",
            TemporalUnit::Epoch => "epoch",
        }
    }
}

impl FromStr for TemporalUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        TemporalUnit::ALL
            .into_iter()
            .find(|unit| unit.name() == normalized)
            .ok_or_else(|| format!("Unknown temporal unit: '{}'", s))
    }
}

impl TryFrom<String> for TemporalUnit {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemporalUnit> for String {
    fn from(unit: TemporalUnit) -> Self {
        unit.name().to_string()
    }
}

impl std::fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
