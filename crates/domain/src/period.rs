//! Closed time intervals and inclusive calendar-day ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// A closed interval `[start, end]` of instants.
///
/// `end >= start` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Period {
    #[must_use]
    pub const fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// `start <= instant <= end`.
    #[must_use]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Closed-interval overlap: touching endpoints count.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Calendar days of the start and end instants.
    #[must_use]
    pub fn days(&self) -> DayRange {
        DayRange::new(self.start.date_naive(), self.end.date_naive())
    }
}

/// An inclusive range of calendar days `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DayRange {
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Intersection with `other`, or `None` when the two share no day.
    #[must_use]
    pub fn clip(&self, other: &Self) -> Option<Self> {
        let from = self.from.max(other.from);
        let to = self.to.min(other.to);
        (from <= to).then_some(Self { from, to })
    }

    /// Number of days covered, counting both ends (`0` for an inverted range).
    #[must_use]
    pub fn len_days(&self) -> u64 {
        u64::try_from((self.to - self.from).num_days() + 1).unwrap_or(0)
    }

    /// Every day of the range in order.
    pub fn iter(self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |day| *day <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn should_contain_both_endpoints() {
        let period = Period::new(at(10, 8), at(12, 17));
        assert!(period.contains(at(10, 8)));
        assert!(period.contains(at(12, 17)));
        assert!(!period.contains(at(12, 18)));
    }

    #[test]
    fn should_overlap_when_endpoints_touch() {
        let existing = Period::new(at(10, 0), at(12, 0));
        let candidate = Period::new(at(12, 0), at(14, 0));
        assert!(existing.overlaps(&candidate));
        assert!(candidate.overlaps(&existing));
    }

    #[test]
    fn should_not_overlap_when_disjoint() {
        let a = Period::new(at(10, 0), at(11, 0));
        let b = Period::new(at(11, 1), at(14, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn should_clip_day_ranges() {
        let range = DayRange::new(day(11), day(18));
        let span = DayRange::new(day(9), day(13));
        assert_eq!(range.clip(&span), Some(DayRange::new(day(11), day(13))));
        assert_eq!(range.clip(&DayRange::new(day(19), day(20))), None);
    }

    #[test]
    fn should_count_days_inclusively() {
        assert_eq!(DayRange::new(day(11), day(13)).len_days(), 3);
        assert_eq!(DayRange::new(day(11), day(11)).len_days(), 1);
        assert_eq!(DayRange::new(day(12), day(11)).len_days(), 0);
    }

    #[test]
    fn should_iterate_every_day() {
        let days: Vec<_> = DayRange::new(day(11), day(13)).iter().collect();
        assert_eq!(days, vec![day(11), day(12), day(13)]);
    }
}
