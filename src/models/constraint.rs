//! Per-term load constraints.
//!
//! A constraint is an immutable policy that any set of course offerings
//! placed in a single term must satisfy: a cap on the summed minimum
//! units, a cap on the number of distinct meeting days, and a set of
//! allowed weekdays.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::offering::CourseOffering;
use super::term::Weekday;

/// A per-term scheduling constraint.
///
/// The default allows 18 minimum units, all five weekdays, and up to
/// five distinct meeting days — i.e. the day checks are vacuous until
/// either the day cap drops below five or a weekday is disallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Maximum summed *minimum* units per term. `0` disables the check.
    pub max_units_per_term: i32,
    /// Maximum number of distinct meeting days per term.
    pub max_days_per_term: usize,
    /// Weekdays on which courses may meet.
    pub allowed_days: Vec<Weekday>,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            max_units_per_term: 18,
            max_days_per_term: 5,
            allowed_days: Weekday::ALL.to_vec(),
        }
    }
}

impl Constraint {
    /// Creates a constraint with the given unit and day caps and all
    /// weekdays allowed.
    pub fn new(max_units_per_term: i32, max_days_per_term: usize) -> Self {
        Self {
            max_units_per_term,
            max_days_per_term,
            ..Self::default()
        }
    }

    /// Restricts the allowed weekdays.
    pub fn with_allowed_days(mut self, allowed_days: Vec<Weekday>) -> Self {
        self.allowed_days = allowed_days;
        self
    }

    /// Whether courses may meet on the given weekday.
    pub fn allows_day(&self, day: Weekday) -> bool {
        self.allowed_days.contains(&day)
    }

    /// Tests a candidate set of offerings for one term.
    ///
    /// When `max_units_per_term > 0`, the sum of the offerings' minimum
    /// units must not exceed it. When the day cap is below five or a
    /// weekday is disallowed, the union of the offerings' meeting days
    /// must fit the cap and be a subset of the allowed days. Checks that
    /// do not apply are vacuously satisfied.
    pub fn is_satisfied_by<'a, I>(&self, offerings: I) -> bool
    where
        I: IntoIterator<Item = &'a CourseOffering> + Clone,
    {
        if self.max_units_per_term > 0 {
            let min_sum: i32 = offerings.clone().into_iter().map(|off| off.units.min).sum();
            if min_sum > self.max_units_per_term {
                return false;
            }
        }

        if self.max_days_per_term < 5 || self.allowed_days.len() < 5 {
            let union: BTreeSet<Weekday> = offerings
                .into_iter()
                .flat_map(|off| off.days.iter().copied())
                .collect();
            if union.len() > self.max_days_per_term {
                return false;
            }
            if union.iter().any(|day| !self.allows_day(*day)) {
                return false;
            }
        }

        true
    }
}
