//! Analytics window

use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;
use std::fmt;

/// Lookback window for analytics. Unknown or absent values mean `Month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
}

impl TimeRange {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("week") => TimeRange::Week,
            Some("year") => TimeRange::Year,
            _ => TimeRange::Month,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }

    /// Inclusive lower bound of the window ending at `now`.
    ///
    /// Calendar arithmetic: a month back from March 31 is the last day of
    /// February.
    pub fn start_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            TimeRange::Week => now.checked_sub_signed(Duration::days(7)),
            TimeRange::Month => now.checked_sub_months(Months::new(1)),
            TimeRange::Year => now.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
