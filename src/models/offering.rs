//! Course offering model.
//!
//! An offering is one term-specific instance of a course: a meeting
//! pattern (weekdays plus a start/end time on a 24h HHMM clock) and a
//! unit range. Offerings know how to test for scheduling conflicts
//! against each other and whether they fit into a candidate schedule.

use serde::{Deserialize, Serialize};

use super::schedule::{AddCheck, Schedule};
use super::term::{Term, Weekday};

/// A variable unit range (`min <= max`).
///
/// Many courses can be taken for a unit count anywhere in the range;
/// the unit-allocation policy in [`Schedule::fulfilled_units`] decides
/// how many units above the minimum a schedule actually claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRange {
    /// Minimum units the course can be taken for.
    pub min: i32,
    /// Maximum units the course can be taken for.
    pub max: i32,
}

impl UnitRange {
    /// Creates a unit range.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A fixed unit count (`min == max`).
    pub fn fixed(units: i32) -> Self {
        Self::new(units, units)
    }

    /// Units available above the minimum.
    #[inline]
    pub fn spread(&self) -> i32 {
        self.max - self.min
    }
}

/// One term-specific instance of a course.
///
/// Times are integers encoding HHMM on a 24h clock (e.g. `930`, `1415`).
/// The *effective* times equal the raw times unless time-conflict
/// checking has been suppressed for the parent course, in which case
/// both are `0` — a sentinel interval that never overlaps anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Parent course id.
    pub course_id: String,
    /// Parent course name.
    pub course_name: String,
    /// Unit range (shared with the parent course).
    pub units: UnitRange,
    /// Term this offering meets in.
    pub term: Term,
    /// Meeting weekdays (non-empty for well-formed catalog data).
    pub days: Vec<Weekday>,
    /// Meeting start time (HHMM).
    pub start_time: i32,
    /// Meeting end time (HHMM).
    pub end_time: i32,
    /// Start time used for conflict checking.
    pub effective_start_time: i32,
    /// End time used for conflict checking.
    pub effective_end_time: i32,
}

impl CourseOffering {
    /// Creates an offering with effective times equal to the raw times.
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        units: UnitRange,
        term: Term,
        days: Vec<Weekday>,
        start_time: i32,
        end_time: i32,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            units,
            term,
            days,
            start_time,
            end_time,
            effective_start_time: start_time,
            effective_end_time: end_time,
        }
    }

    /// Whether the two offerings meet on at least one common weekday.
    pub fn shares_day_with(&self, other: &CourseOffering) -> bool {
        self.days.iter().any(|day| other.days.contains(day))
    }

    /// Scheduling conflict test.
    ///
    /// Checks run in order and short-circuit: different term — no
    /// conflict; no weekday in common — no conflict; disjoint effective
    /// time intervals (half-open `[start, end)`) — no conflict.
    /// Anything else conflicts. An offering whose time checking is
    /// suppressed has `effective start == end == 0` and therefore never
    /// reaches the conflicting branch.
    pub fn conflicts_with(&self, other: &CourseOffering) -> bool {
        if other.term != self.term {
            return false;
        }
        if !self.shares_day_with(other) {
            return false;
        }
        if (self.effective_start_time < other.effective_start_time
            || self.effective_start_time >= other.effective_end_time)
            && (other.effective_start_time < self.effective_start_time
                || other.effective_start_time >= self.effective_end_time)
        {
            return false;
        }
        true
    }

    /// Whether this offering can be added to the schedule.
    pub fn fits_in(&self, schedule: &Schedule) -> bool {
        self.fits_in_with_conflicts(schedule).can_add
    }

    /// Addability check with the conflicting course ids on failure.
    pub fn fits_in_with_conflicts(&self, schedule: &Schedule) -> AddCheck {
        schedule.can_add_course_offering_with_conflicts(self)
    }

    /// Suppresses or restores this offering's time-conflict checking.
    pub(crate) fn set_time_ignored(&mut self, ignored: bool) {
        if ignored {
            self.effective_start_time = 0;
            self.effective_end_time = 0;
        } else {
            self.effective_start_time = self.start_time;
            self.effective_end_time = self.end_time;
        }
    }
}
