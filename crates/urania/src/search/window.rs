use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::DEFAULT_ORB_DEGREES;
use crate::error::InputError;

/// Closed time span a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Calendar span of a window, as reported alongside ingress results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SearchWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InputError> {
        if end < start {
            return Err(InputError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// `months` calendar months from `start`.
    pub fn months(start: DateTime<Utc>, months: u32) -> Result<Self, InputError> {
        let end = start
            .checked_add_months(Months::new(months))
            .ok_or_else(|| InputError::InvalidDate(format!("{start} + {months} months")))?;
        Self::new(start, end)
    }

    /// The standard scan horizon: one calendar year from `start`.
    pub fn one_year(start: DateTime<Utc>) -> Result<Self, InputError> {
        Self::months(start, 12)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Daily samples at the start's time of day, both ends included.
    pub fn daily(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        (0..)
            .map(move |n| self.start + Duration::days(n))
            .take_while(move |at| *at <= self.end)
    }

    /// Midnight UTC of every calendar day from the start's date to the end's.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .date_naive()
            .iter_days()
            .take_while(move |d| *d <= self.end.date_naive())
    }

    /// Re-scan points one calendar month apart, starting at the window start.
    pub fn monthly(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        (0..)
            .map_while(move |n| self.start.checked_add_months(Months::new(n)))
            .take_while(move |at| *at <= self.end)
    }

    pub fn period(&self) -> SearchPeriod {
        SearchPeriod {
            start: self.start.date_naive(),
            end: self.end.date_naive(),
        }
    }
}

/// Tunables of the scanner. `Default` gives the standard values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSettings {
    /// Aspect orb in whole degrees
    pub orb_degrees: u8,
    /// Hourly steps allowed when refining a lunation
    pub lunation_max_steps: u32,
    /// Retrograde periods shorter than this are dropped
    pub min_retrograde_days: i64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            orb_degrees: DEFAULT_ORB_DEGREES,
            lunation_max_steps: 48,
            min_retrograde_days: 15,
        }
    }
}
