use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive date-range filter. Either bound may be omitted, meaning
/// unbounded on that side; both absent means "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl fmt::Display for DateRangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_bound = |b: Option<NaiveDate>| match b {
            Some(d) => d.to_string(),
            None => "..".to_string(),
        };
        write!(f, "{} to {}", fmt_bound(self.start), fmt_bound(self.end))
    }
}

impl DateRangeFilter {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRangeFilter { start, end }
    }

    pub fn is_unbounded(self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}
