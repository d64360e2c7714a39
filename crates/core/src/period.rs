use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WINDOW_DAYS: u32 = 8;

/// The span of alert dates a report covers: `start` is exclusive, `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl ReportWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        ReportWindow { start, end }
    }

    /// The `days` days ending on (and including) `end`.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        ReportWindow {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date > self.start && date <= self.end
    }
}
