//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for reservation bounds, approvals and activity times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Source of the "current" instant for time-sensitive operations.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        now()
    }
}

/// Clock frozen at a single instant, for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Parse a timestamp as RFC 3339, or as a zone-less `YYYY-MM-DDTHH:MM[:SS]`
/// (also accepting a space separator) interpreted as UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when no format matches.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, ValidationError> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ValidationError::InvalidTimestamp(input.to_string()))
}

/// First instant of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last whole second of `date` (`23:59:59`).
#[must_use]
pub fn end_of_day(date: NaiveDate) -> Timestamp {
    date.and_hms_opt(23, 59, 59)
        .map_or_else(|| start_of_day(date), |naive| naive.and_utc())
}
