//! Stay period value object.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Arrival and departure dates of a stay. Start is always before end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStay")]
pub struct StayPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawStay {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawStay> for StayPeriod {
    type Error = ValidationError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        StayPeriod::new(raw.start, raw.end)
    }
}

impl StayPeriod {
    /// Creates a stay, rejecting `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::invalid_date_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Parses `YYYY-MM-DD` strings as submitted by the search and
    /// reservation forms.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_date("start", start)?;
        let end = parse_date("end", end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Half-open overlap: a departure on the day of another arrival is fine.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD"))
}
