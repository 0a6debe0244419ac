//! Course catalog entity.
//!
//! A course aggregates all of its term-specific offerings and carries
//! the user-toggled flags (picked, waived, already taken, time ignored,
//! repeated). The flags are shared state between the schedule frontier
//! and the requirement display; only the planner session mutates them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::offering::{CourseOffering, UnitRange};
use super::term::Term;
use crate::planner::ScheduleList;

/// Outcome of a pickability check, with advisory feedback.
///
/// The boolean is authoritative; the feedback string is a human-readable
/// hint and carries no semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickFeedback {
    /// Whether at least one offering fits at least one frontier schedule.
    pub can_pick: bool,
    /// Reason the course cannot be picked, empty when it can.
    pub feedback: String,
}

impl PickFeedback {
    fn pickable() -> Self {
        Self {
            can_pick: true,
            feedback: String::new(),
        }
    }

    fn blocked(feedback: impl Into<String>) -> Self {
        Self {
            can_pick: false,
            feedback: feedback.into(),
        }
    }
}

/// A catalog course with all of its offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course id (e.g. `"CS 229"`).
    pub id: String,
    /// Course title.
    pub name: String,
    /// Listed instructors.
    pub instructors: Vec<String>,
    /// Catalog description.
    pub desc: String,
    /// Grading basis.
    pub grading: String,
    /// Unit range.
    pub units: UnitRange,
    /// Terms with at least one offering (derived from the offerings).
    pub terms: Vec<Term>,
    /// Term-specific offerings.
    pub offerings: Vec<CourseOffering>,
    /// Currently picked into the schedule frontier.
    pub pick: bool,
    /// Marked as already taken.
    pub already_taken: bool,
    /// Marked as waived.
    pub waived: bool,
    /// Time-conflict checking suppressed.
    pub time_ignored: bool,
    /// Marked for repeated enrollment.
    pub repeated: bool,
    /// Number of repeats when `repeated`.
    pub repeat_times: Option<u32>,
}

impl Course {
    /// Creates a course with no offerings and all flags cleared.
    pub fn new(id: impl Into<String>, name: impl Into<String>, units: UnitRange) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instructors: Vec::new(),
            desc: String::new(),
            grading: String::new(),
            units,
            terms: Vec::new(),
            offerings: Vec::new(),
            pick: false,
            already_taken: false,
            waived: false,
            time_ignored: false,
            repeated: false,
            repeat_times: None,
        }
    }

    /// Sets the instructors.
    pub fn with_instructors(mut self, instructors: Vec<String>) -> Self {
        self.instructors = instructors;
        self
    }

    /// Sets the description.
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Sets the grading basis.
    pub fn with_grading(mut self, grading: impl Into<String>) -> Self {
        self.grading = grading.into();
        self
    }

    /// Adds an offering, extending the derived term list if needed.
    pub fn with_offering(mut self, offering: CourseOffering) -> Self {
        if !self.terms.contains(&offering.term) {
            self.terms.push(offering.term.clone());
        }
        self.offerings.push(offering);
        self
    }

    /// Suppresses time-conflict checking on every offering.
    pub fn ignore_time(&mut self) {
        self.time_ignored = true;
        for offering in &mut self.offerings {
            offering.set_time_ignored(true);
        }
    }

    /// Restores time-conflict checking on every offering.
    pub fn unignore_time(&mut self) {
        self.time_ignored = false;
        for offering in &mut self.offerings {
            offering.set_time_ignored(false);
        }
    }

    /// Marks the course for repeated enrollment.
    pub fn repeat(&mut self, times: u32) {
        self.repeated = true;
        self.repeat_times = Some(times);
    }

    /// Clears the repeat marking.
    pub fn clear_repeat(&mut self) {
        self.repeated = false;
        self.repeat_times = None;
    }

    /// Search-filter predicate: case- and whitespace-insensitive
    /// substring match against id plus name.
    pub fn matches(&self, filter: &str) -> bool {
        let strip = |s: &str| {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        };
        strip(&format!("{}{}", self.id, self.name)).contains(&strip(filter))
    }

    /// Whether at least one offering fits at least one frontier schedule.
    pub fn can_be_picked(&self, list: &ScheduleList) -> bool {
        self.can_be_picked_with_feedback(list).can_pick
    }

    /// Pickability check with a reason on failure.
    pub fn can_be_picked_with_feedback(&self, list: &ScheduleList) -> PickFeedback {
        self.can_be_picked_with_feedback_rng(list, &mut rand::rng())
    }

    /// Pickability check with a caller-supplied random source.
    ///
    /// Checks run in order, most general reason first: no offerings at
    /// all; no offering in an open term; no offering on an allowed day;
    /// no allowed-day offering in an open term. Then a fit attempt over
    /// every (schedule, offering) pair, short-circuiting on the first
    /// fit. While the frontier is below the exact-check threshold the
    /// scan is exhaustive; above it, a bounded number of uniformly
    /// random schedules is tried instead, which can misreport a
    /// pickable course as unpickable. On failure the feedback names the
    /// courses that blocked the attempts.
    pub fn can_be_picked_with_feedback_rng<R: Rng>(
        &self,
        list: &ScheduleList,
        rng: &mut R,
    ) -> PickFeedback {
        if self.offerings.is_empty() {
            return PickFeedback::blocked("This course is not offered.");
        }

        let open_terms: HashSet<String> = list.terms().iter().map(Term::id).collect();
        if self.terms.iter().all(|term| !open_terms.contains(&term.id())) {
            return PickFeedback::blocked("This course is not offered in the selected terms.");
        }

        if let Some(constraint) = list.constraint() {
            if self
                .offerings
                .iter()
                .all(|off| off.days.iter().any(|day| !constraint.allows_day(*day)))
            {
                return PickFeedback::blocked("This course is not offered in the selected days.");
            }

            if self
                .offerings
                .iter()
                .filter(|off| open_terms.contains(&off.term.id()))
                .all(|off| off.days.iter().any(|day| !constraint.allows_day(*day)))
            {
                return PickFeedback::blocked(
                    "This course is not offered in the selected days and terms.",
                );
            }
        }

        let mut conflicts: Vec<String> = Vec::new();
        let schedules = list.schedules();
        let limits = list.limits();

        if schedules.is_empty() || schedules.len() < limits.exact_pick_threshold {
            for schedule in schedules {
                for offering in &self.offerings {
                    let check = offering.fits_in_with_conflicts(schedule);
                    if check.can_add {
                        return PickFeedback::pickable();
                    }
                    conflicts.extend(check.conflicts);
                }
            }
        } else {
            for _ in 0..limits.pick_sample_draws {
                let schedule = &schedules[rng.random_range(0..schedules.len())];
                for offering in &self.offerings {
                    let check = offering.fits_in_with_conflicts(schedule);
                    if check.can_add {
                        return PickFeedback::pickable();
                    }
                    conflicts.extend(check.conflicts);
                }
            }
        }

        let mut seen = HashSet::new();
        let unique: Vec<String> = conflicts
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        PickFeedback::blocked(format!("Consider removing {}", unique.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constraint::Constraint;
    use crate::models::term::{TermPeriod, Weekday};

    fn autumn() -> Term {
        Term::new(TermPeriod::Autumn, "2012-2013")
    }

    fn course_with_offering(id: &str, days: Vec<Weekday>, start: i32, end: i32) -> Course {
        let units = UnitRange::new(3, 5);
        Course::new(id, id, units).with_offering(CourseOffering::new(
            id,
            id,
            units,
            autumn(),
            days,
            start,
            end,
        ))
    }

    #[test]
    fn test_derived_terms_deduplicate() {
        let units = UnitRange::fixed(3);
        let course = Course::new("CS 1", "One", units)
            .with_offering(CourseOffering::new(
                "CS 1",
                "One",
                units,
                autumn(),
                vec![Weekday::Mon],
                900,
                950,
            ))
            .with_offering(CourseOffering::new(
                "CS 1",
                "One",
                units,
                autumn(),
                vec![Weekday::Tue],
                1000,
                1050,
            ));
        assert_eq!(course.terms, vec![autumn()]);
        assert_eq!(course.offerings.len(), 2);
    }

    #[test]
    fn test_ignore_time_rewrites_effective_times() {
        let mut course = course_with_offering("CS 1", vec![Weekday::Mon], 900, 950);
        course.ignore_time();
        assert!(course.time_ignored);
        assert_eq!(course.offerings[0].effective_start_time, 0);
        assert_eq!(course.offerings[0].effective_end_time, 0);
        // Raw times untouched
        assert_eq!(course.offerings[0].start_time, 900);

        course.unignore_time();
        assert_eq!(course.offerings[0].effective_start_time, 900);
        assert_eq!(course.offerings[0].effective_end_time, 950);
    }

    #[test]
    fn test_matches_filter() {
        let course = Course::new("CS 229", "Machine Learning", UnitRange::new(3, 5));
        assert!(course.matches("cs229"));
        assert!(course.matches("machine learn"));
        assert!(course.matches("  CS 229 "));
        assert!(course.matches(""));
        assert!(!course.matches("cs 230"));
    }

    #[test]
    fn test_not_offered_feedback() {
        let list = ScheduleList::new(vec![autumn()], None);
        let course = Course::new("CS 1", "One", UnitRange::fixed(3));
        let result = course.can_be_picked_with_feedback(&list);
        assert!(!result.can_pick);
        assert_eq!(result.feedback, "This course is not offered.");
    }

    #[test]
    fn test_not_offered_in_selected_terms_feedback() {
        let winter = Term::new(TermPeriod::Winter, "2012-2013");
        let list = ScheduleList::new(vec![winter], None);
        let course = course_with_offering("CS 1", vec![Weekday::Mon], 900, 950);
        let result = course.can_be_picked_with_feedback(&list);
        assert!(!result.can_pick);
        assert_eq!(
            result.feedback,
            "This course is not offered in the selected terms."
        );
    }

    #[test]
    fn test_not_offered_in_selected_days_feedback() {
        let constraint = Constraint::new(18, 5).with_allowed_days(vec![Weekday::Tue, Weekday::Thu]);
        let list = ScheduleList::new(vec![autumn()], Some(constraint));
        let course = course_with_offering("CS 1", vec![Weekday::Mon, Weekday::Wed], 900, 950);
        let result = course.can_be_picked_with_feedback(&list);
        assert!(!result.can_pick);
        assert_eq!(
            result.feedback,
            "This course is not offered in the selected days."
        );
    }

    #[test]
    fn test_day_and_term_combination_feedback() {
        // Offered on an allowed day in a closed term, and on a
        // disallowed day in the open term.
        let winter = Term::new(TermPeriod::Winter, "2012-2013");
        let units = UnitRange::new(3, 5);
        let course = Course::new("CS 1", "One", units)
            .with_offering(CourseOffering::new(
                "CS 1",
                "One",
                units,
                winter,
                vec![Weekday::Tue],
                900,
                950,
            ))
            .with_offering(CourseOffering::new(
                "CS 1",
                "One",
                units,
                autumn(),
                vec![Weekday::Mon],
                900,
                950,
            ));

        let constraint = Constraint::new(18, 5).with_allowed_days(vec![Weekday::Tue, Weekday::Thu]);
        let list = ScheduleList::new(vec![autumn()], Some(constraint));
        let result = course.can_be_picked_with_feedback(&list);
        assert!(!result.can_pick);
        assert_eq!(
            result.feedback,
            "This course is not offered in the selected days and terms."
        );
    }

    #[test]
    fn test_pickable_into_empty_frontier() {
        let list = ScheduleList::new(vec![autumn()], None);
        let course = course_with_offering("CS 1", vec![Weekday::Mon], 900, 950);
        let result = course.can_be_picked_with_feedback(&list);
        assert!(result.can_pick);
        assert!(result.feedback.is_empty());
    }

    #[test]
    fn test_conflict_feedback_names_blocking_course() {
        // Scenario C: second course overlaps the only offering of the
        // first; feedback names the first.
        let mut list = ScheduleList::new(vec![autumn()], None);
        let first = course_with_offering("CS 1", vec![Weekday::Mon], 900, 950);
        list.add_course(&first);

        let second = course_with_offering("CS 2", vec![Weekday::Mon], 930, 1020);
        let result = second.can_be_picked_with_feedback(&list);
        assert!(!result.can_pick);
        assert_eq!(result.feedback, "Consider removing CS 1");
    }
}
