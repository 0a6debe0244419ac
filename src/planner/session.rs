//! The planning session.
//!
//! `Planner` owns everything a single user session touches: the course
//! repository, the chosen programs and specialization, the waived /
//! already-taken / time-ignored / repeat bookkeeping, the built-in
//! degree requirements, and the schedule frontier. Every user-toggled
//! course flag is mutated here and nowhere else, so the frontier and
//! the flags cannot diverge.
//!
//! Requirement evaluation goes through [`Planner::fulfills`], which
//! adjusts the requirement for waivers and already-taken courses before
//! consulting the frontier, then folds the discount back into the
//! recorded progress.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::{
    Constraint, Course, CourseRequirement, PickFeedback, Requirement, Schedule, TakenCourse,
    Term, UnitRequirement, Weekday, FOUNDATION_COURSE_IDS,
};
use crate::planner::{Program, ScheduleList, SearchLimits, Specialization};

/// Courses accepted for the Significant Implementation requirement.
pub const SIGNIFICANT_IMPLEMENTATION_COURSE_IDS: [&str; 9] = [
    "CS 140", "CS 143", "CS 144", "CS 145", "CS 148", "CS 210B", "CS 221", "CS 243", "CS 248",
];

/// A course marked for repeated enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatEntry {
    /// Course id.
    pub course_id: String,
    /// Number of repeats.
    pub times: u32,
}

/// Replayable snapshot of a session's user state.
///
/// The byte format this travels in (local storage, a file, a database
/// row) is the caller's concern; the type only fixes the shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    /// Picked course ids, in pick order.
    pub courses: Vec<String>,
    /// Waived course ids.
    pub waived_courses: Vec<String>,
    /// Already-taken courses with earned units.
    pub already_taken: Vec<TakenCourse>,
    /// Course ids with time-conflict checking suppressed.
    pub time_ignored_courses: Vec<String>,
    /// Courses marked for repeated enrollment.
    pub repeat_courses: Vec<RepeatEntry>,
    /// Open term ids.
    pub terms: Vec<String>,
    /// Constraint: maximum minimum-units per term.
    pub max_units_per_term: i32,
    /// Constraint: maximum distinct meeting days per term.
    pub max_days_per_term: usize,
    /// Constraint: allowed weekdays.
    pub allowed_days: Vec<Weekday>,
    /// Chosen program name, empty when none.
    pub program: String,
}

/// A single-user planning session.
pub struct Planner {
    catalog: Catalog,
    programs: Vec<Program>,
    foundations_requirement: Requirement,
    significant_implementation_requirement: Requirement,
    total_unit_requirement: Requirement,
    electives_requirement: Option<Requirement>,
    specialization: Option<Specialization>,
    waived_ids: Vec<String>,
    already_taken: Vec<TakenCourse>,
    time_ignored_ids: Vec<String>,
    repeats: Vec<RepeatEntry>,
    schedule_list: ScheduleList,
    active_requirements: Vec<Requirement>,
}

impl Planner {
    /// Creates a session over a resolved catalog and program list.
    ///
    /// Starts with no open terms, no constraint, and no specialization;
    /// the built-in requirements (45 Total Units, Foundations,
    /// Significant Implementation) are active immediately.
    pub fn new(catalog: Catalog, programs: Vec<Program>) -> Self {
        let foundation_ids: Vec<String> =
            FOUNDATION_COURSE_IDS.iter().map(|s| s.to_string()).collect();
        let sig_impl_ids: Vec<String> = SIGNIFICANT_IMPLEMENTATION_COURSE_IDS
            .iter()
            .map(|s| s.to_string())
            .collect();

        let foundations_requirement = Requirement::Course(CourseRequirement::new(
            "Foundations",
            5,
            catalog.filter_known(&foundation_ids, "Foundations"),
        ));
        let significant_implementation_requirement = Requirement::Course(CourseRequirement::new(
            "Significant Implementation",
            1,
            catalog.filter_known(&sig_impl_ids, "Significant Implementation"),
        ));
        let total_unit_requirement = Requirement::Unit(UnitRequirement::new(
            "45 Total Units",
            45,
            catalog.course_ids(),
        ));

        let active_requirements = vec![
            total_unit_requirement.clone(),
            foundations_requirement.clone(),
            significant_implementation_requirement.clone(),
        ];

        Self {
            catalog,
            programs,
            foundations_requirement,
            significant_implementation_requirement,
            total_unit_requirement,
            electives_requirement: None,
            specialization: None,
            waived_ids: Vec::new(),
            already_taken: Vec::new(),
            time_ignored_ids: Vec::new(),
            repeats: Vec::new(),
            schedule_list: ScheduleList::new(Vec::new(), None),
            active_requirements,
        }
    }

    /// Overrides the frontier's search cost caps.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.schedule_list = self.schedule_list.with_limits(limits);
        self
    }

    /// The course repository.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The available programs.
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// The schedule frontier.
    pub fn schedule_list(&self) -> &ScheduleList {
        &self.schedule_list
    }

    /// The live candidate schedules.
    pub fn schedules(&self) -> &[Schedule] {
        self.schedule_list.schedules()
    }

    /// The currently active requirements, with the progress recorded by
    /// the last [`Planner::refresh_requirements`] call.
    pub fn requirements(&self) -> &[Requirement] {
        &self.active_requirements
    }

    /// The derived electives requirement, set by
    /// [`Planner::set_specialization`].
    pub fn electives_requirement(&self) -> Option<&Requirement> {
        self.electives_requirement.as_ref()
    }

    /// The chosen specialization, if any.
    pub fn specialization(&self) -> Option<&Specialization> {
        self.specialization.as_ref()
    }

    /// The open terms.
    pub fn terms(&self) -> &[Term] {
        self.schedule_list.terms()
    }

    /// The active constraint, if any.
    pub fn constraint(&self) -> Option<&Constraint> {
        self.schedule_list.constraint()
    }

    /// The picked courses, in pick order.
    pub fn courses(&self) -> &[Course] {
        self.schedule_list.courses()
    }

    /// Waived course ids.
    pub fn waived_course_ids(&self) -> &[String] {
        &self.waived_ids
    }

    /// Already-taken courses with earned units.
    pub fn already_taken_courses(&self) -> &[TakenCourse] {
        &self.already_taken
    }

    /// Replaces the open terms.
    pub fn set_terms(&mut self, terms: Vec<Term>) {
        self.schedule_list.set_terms(terms);
    }

    /// Opens a term.
    pub fn add_term(&mut self, term: Term) {
        self.schedule_list.add_term(term);
    }

    /// Closes a term.
    pub fn remove_term(&mut self, term: &Term) {
        self.schedule_list.remove_term(term);
    }

    /// Replaces the per-term constraint.
    pub fn set_constraint(&mut self, constraint: Constraint) {
        self.schedule_list.set_constraint(Some(constraint));
    }

    /// Chooses a specialization, rebuilding the electives requirement
    /// and the active requirement list.
    ///
    /// Electives are every catalog course not claimed by the
    /// foundations requirement or any specialization requirement.
    pub fn set_specialization(&mut self, specialization: Specialization) {
        let mut claimed: HashSet<&str> = self
            .foundations_requirement
            .course_ids()
            .iter()
            .map(String::as_str)
            .collect();
        for requirement in specialization.requirements() {
            claimed.extend(requirement.course_ids().iter().map(String::as_str));
        }
        let electives_ids: Vec<String> = self
            .total_unit_requirement
            .course_ids()
            .iter()
            .filter(|id| !claimed.contains(id.as_str()))
            .cloned()
            .collect();
        let electives =
            Requirement::Course(CourseRequirement::new("Electives", 0, electives_ids));

        self.active_requirements = vec![
            self.foundations_requirement.clone(),
            self.significant_implementation_requirement.clone(),
            electives.clone(),
            self.total_unit_requirement.clone(),
        ];
        self.active_requirements
            .extend(specialization.requirements().into_iter().cloned());

        self.electives_requirement = Some(electives);
        self.specialization = Some(specialization);
    }

    /// Whether the course can currently be picked. Unknown ids are
    /// logged and unpickable.
    pub fn can_pick(&self, course_id: &str) -> bool {
        match self.catalog.course(course_id) {
            Some(course) => self.schedule_list.can_pick(course),
            None => {
                tracing::warn!(course_id, "course not found");
                false
            }
        }
    }

    /// Pickability with feedback. `None` for unknown ids.
    pub fn can_pick_with_feedback(&self, course_id: &str) -> Option<PickFeedback> {
        let course = self.catalog.course(course_id)?;
        Some(self.schedule_list.can_pick_with_feedback(course))
    }

    /// Picks a course into the frontier. Unknown ids are logged and
    /// ignored; callers should pre-check with [`Planner::can_pick`].
    pub fn add_course(&mut self, course_id: &str) {
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return;
        };
        course.pick = true;
        let picked = course.clone();
        self.schedule_list.add_course(&picked);
    }

    /// Unpicks a course and rebuilds the frontier.
    pub fn remove_course(&mut self, course_id: &str) {
        if let Some(course) = self.catalog.course_mut(course_id) {
            course.pick = false;
        }
        self.schedule_list.remove_course(course_id);
    }

    /// Marks a course as waived. Double waives and unknown ids are
    /// logged and ignored.
    pub fn add_waived_course(&mut self, course_id: &str) {
        if self.waived_ids.iter().any(|id| id == course_id) {
            tracing::warn!(course_id, "course already waived");
            return;
        }
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return;
        };
        course.waived = true;
        self.waived_ids.push(course_id.to_string());
    }

    /// Clears a course's waiver.
    pub fn remove_waived_course(&mut self, course_id: &str) {
        if let Some(course) = self.catalog.course_mut(course_id) {
            course.waived = false;
        }
        let Some(position) = self.waived_ids.iter().position(|id| id == course_id) else {
            tracing::warn!(course_id, "course not found in waived courses");
            return;
        };
        self.waived_ids.remove(position);
    }

    /// Marks a course as already taken for the given units. Double
    /// marks and unknown ids are logged and ignored.
    pub fn add_already_taken_course(&mut self, course_id: &str, units: i32) {
        if self
            .already_taken
            .iter()
            .any(|taken| taken.course_id == course_id)
        {
            tracing::warn!(course_id, "course already marked as taken");
            return;
        }
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return;
        };
        course.already_taken = true;
        self.already_taken.push(TakenCourse::new(course_id, units));
    }

    /// Clears a course's already-taken mark.
    pub fn remove_already_taken_course(&mut self, course_id: &str) {
        if let Some(course) = self.catalog.course_mut(course_id) {
            course.already_taken = false;
        }
        let Some(position) = self
            .already_taken
            .iter()
            .position(|taken| taken.course_id == course_id)
        else {
            tracing::warn!(course_id, "course not marked as already taken");
            return;
        };
        self.already_taken.remove(position);
    }

    /// The units recorded for an already-taken course.
    pub fn already_taken_units(&self, course_id: &str) -> Option<i32> {
        self.already_taken
            .iter()
            .find(|taken| taken.course_id == course_id)
            .map(|taken| taken.units)
    }

    /// Updates the units recorded for an already-taken course.
    pub fn set_already_taken_units(&mut self, course_id: &str, units: i32) {
        let Some(taken) = self
            .already_taken
            .iter_mut()
            .find(|taken| taken.course_id == course_id)
        else {
            tracing::warn!(course_id, "course not marked as already taken");
            return;
        };
        taken.units = units;
    }

    /// Suppresses time-conflict checking for a course and rebuilds the
    /// frontier with the relaxed meeting times.
    pub fn ignore_time(&mut self, course_id: &str) {
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return;
        };
        course.ignore_time();
        if !self.time_ignored_ids.iter().any(|id| id == course_id) {
            self.time_ignored_ids.push(course_id.to_string());
        }
        self.refresh_schedule_list();
    }

    /// Restores time-conflict checking for a course and rebuilds the
    /// frontier.
    pub fn unignore_time(&mut self, course_id: &str) {
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return;
        };
        course.unignore_time();
        self.time_ignored_ids.retain(|id| id != course_id);
        self.refresh_schedule_list();
    }

    /// Marks a course for repeated enrollment (once).
    pub fn add_repeat(&mut self, course_id: &str) {
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return;
        };
        course.repeat(1);
        self.repeats.push(RepeatEntry {
            course_id: course_id.to_string(),
            times: 1,
        });
    }

    /// Clears a course's repeat marking and rebuilds the frontier.
    pub fn remove_repeat(&mut self, course_id: &str) {
        self.repeats.retain(|entry| entry.course_id != course_id);
        if let Some(course) = self.catalog.course_mut(course_id) {
            course.clear_repeat();
        }
        self.refresh_schedule_list();
    }

    /// Updates the repeat count of a course already marked for repeats.
    ///
    /// Returns whether the update took effect.
    pub fn update_repeat(&mut self, course_id: &str, times: u32) -> bool {
        let Some(course) = self.catalog.course_mut(course_id) else {
            tracing::warn!(course_id, "course not found");
            return false;
        };
        if !course.repeated {
            tracing::warn!(course_id, "course not selected for repeat yet");
            return false;
        }
        course.repeat(times);
        if let Some(entry) = self
            .repeats
            .iter_mut()
            .find(|entry| entry.course_id == course_id)
        {
            entry.times = times;
        }
        true
    }

    /// Evaluates a requirement, recording combined progress.
    ///
    /// The requirement is first adjusted for waivers and already-taken
    /// courses, then evaluated against the frontier. The recorded
    /// progress folds the discount back in:
    /// `fulfilled = adjusted.fulfilled + (required - adjusted.required)`.
    pub fn fulfills(&self, requirement: &mut Requirement) -> bool {
        let mut adjusted = requirement.adjusted(&self.waived_ids, &self.already_taken);
        let satisfied = self.schedule_list.fulfills(&mut adjusted);
        requirement
            .set_fulfilled(adjusted.fulfilled() + requirement.required() - adjusted.required());
        satisfied
    }

    /// Re-evaluates every active requirement, refreshing the recorded
    /// progress readable through [`Planner::requirements`].
    pub fn refresh_requirements(&mut self) {
        let mut requirements = std::mem::take(&mut self.active_requirements);
        for requirement in &mut requirements {
            self.fulfills(requirement);
        }
        self.active_requirements = requirements;
    }

    /// The first `limit` frontier schedules whose per-term allocation
    /// satisfies every active unit requirement.
    ///
    /// Returns no schedules at all when any active course requirement
    /// is unmet — no schedule can help with those.
    pub fn schedules_meeting_requirements(&self, limit: Option<usize>) -> Vec<&Schedule> {
        let mut course_reqs: Vec<Requirement> = Vec::new();
        let mut unit_reqs: Vec<Requirement> = Vec::new();
        for requirement in &self.active_requirements {
            match requirement {
                Requirement::Course(_) => course_reqs.push(requirement.clone()),
                Requirement::Unit(_) => unit_reqs.push(requirement.clone()),
            }
        }

        for requirement in &mut course_reqs {
            if !self.fulfills(requirement) {
                return Vec::new();
            }
        }

        let adjusted: Vec<Requirement> = unit_reqs
            .iter()
            .map(|req| req.adjusted(&self.waived_ids, &self.already_taken))
            .collect();

        let limit = limit.unwrap_or(usize::MAX);
        let mut result = Vec::new();
        for schedule in self.schedule_list.schedules() {
            let meets_all = adjusted.iter().all(|requirement| match requirement {
                Requirement::Unit(unit) => schedule.fulfills(unit),
                Requirement::Course(_) => true,
            });
            if meets_all {
                result.push(schedule);
                if result.len() >= limit {
                    break;
                }
            }
        }
        result
    }

    /// Captures the replayable user state.
    pub fn snapshot(&self) -> PlannerState {
        let constraint = self.schedule_list.constraint().cloned().unwrap_or_default();
        PlannerState {
            courses: self
                .schedule_list
                .courses()
                .iter()
                .map(|course| course.id.clone())
                .collect(),
            waived_courses: self.waived_ids.clone(),
            already_taken: self.already_taken.clone(),
            time_ignored_courses: self.time_ignored_ids.clone(),
            repeat_courses: self.repeats.clone(),
            terms: self.schedule_list.terms().iter().map(Term::id).collect(),
            max_units_per_term: constraint.max_units_per_term,
            max_days_per_term: constraint.max_days_per_term,
            allowed_days: constraint.allowed_days,
            program: self
                .specialization
                .as_ref()
                .map(|spec| spec.name().to_string())
                .unwrap_or_default(),
        }
    }

    /// Replays a snapshot, replacing any current selections.
    ///
    /// Replay order matters: terms, then constraint, then
    /// specialization, then time-ignored and repeat marks, then picks,
    /// waivers, and already-taken courses. Unknown ids are logged and
    /// skipped.
    pub fn restore(&mut self, state: &PlannerState) {
        self.clear_selections();

        let terms: Vec<Term> = state
            .terms
            .iter()
            .filter_map(|id| {
                let term = Term::parse_id(id);
                if term.is_none() {
                    tracing::warn!(term_id = %id, "unparseable term id skipped");
                }
                term
            })
            .collect();
        self.set_terms(terms);

        self.set_constraint(Constraint {
            max_units_per_term: state.max_units_per_term,
            max_days_per_term: state.max_days_per_term,
            allowed_days: state.allowed_days.clone(),
        });

        if !state.program.is_empty() {
            let program = self
                .programs
                .iter()
                .find(|program| program.name == state.program)
                .cloned();
            match program {
                Some(program) => self.set_specialization(Specialization::single_depth(program)),
                None => tracing::warn!(program = %state.program, "program not found"),
            }
        }

        for course_id in &state.time_ignored_courses {
            self.ignore_time(course_id);
        }
        for entry in &state.repeat_courses {
            self.add_repeat(&entry.course_id);
            self.update_repeat(&entry.course_id, entry.times);
        }
        for course_id in &state.courses {
            self.add_course(course_id);
        }
        for course_id in &state.waived_courses {
            self.add_waived_course(course_id);
        }
        for taken in &state.already_taken {
            self.add_already_taken_course(&taken.course_id, taken.units);
        }
    }

    /// Clears every user selection: picks, waivers, already-taken and
    /// repeat marks, time suppression, terms, and the constraint.
    pub fn clear_selections(&mut self) {
        let picked: Vec<String> = self
            .schedule_list
            .courses()
            .iter()
            .map(|course| course.id.clone())
            .collect();
        for course_id in &picked {
            if let Some(course) = self.catalog.course_mut(course_id) {
                course.pick = false;
            }
        }
        let waived = std::mem::take(&mut self.waived_ids);
        for course_id in &waived {
            if let Some(course) = self.catalog.course_mut(course_id) {
                course.waived = false;
            }
        }
        let taken = std::mem::take(&mut self.already_taken);
        for entry in &taken {
            if let Some(course) = self.catalog.course_mut(&entry.course_id) {
                course.already_taken = false;
            }
        }
        let ignored = std::mem::take(&mut self.time_ignored_ids);
        for course_id in &ignored {
            if let Some(course) = self.catalog.course_mut(course_id) {
                course.unignore_time();
            }
        }
        let repeats = std::mem::take(&mut self.repeats);
        for entry in &repeats {
            if let Some(course) = self.catalog.course_mut(&entry.course_id) {
                course.clear_repeat();
            }
        }

        let limits = self.schedule_list.limits().clone();
        self.schedule_list = ScheduleList::new(Vec::new(), None).with_limits(limits);
    }

    /// Pushes fresh catalog clones of the picked courses into the
    /// frontier and rebuilds it. Needed after mutating effective
    /// meeting times, which the frontier's stored clones do not see.
    fn refresh_schedule_list(&mut self) {
        let picked: Vec<Course> = self
            .schedule_list
            .courses()
            .iter()
            .map(|course| {
                self.catalog
                    .course(&course.id)
                    .cloned()
                    .unwrap_or_else(|| course.clone())
            })
            .collect();
        self.schedule_list.set_courses(picked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseRecord;
    use crate::models::{TermPeriod, UnitRange};

    fn autumn() -> Term {
        Term::new(TermPeriod::Autumn, "2012-2013")
    }

    fn winter() -> Term {
        Term::new(TermPeriod::Winter, "2012-2013")
    }

    fn record(id: &str, offerings: Vec<(Term, Vec<Weekday>, i32, i32)>) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            name: id.to_string(),
            desc: String::new(),
            instructors: Vec::new(),
            grading: String::new(),
            units: UnitRange::new(3, 5),
            course_offerings: offerings
                .into_iter()
                .map(|(term, days, start, end)| crate::catalog::OfferingRecord {
                    term,
                    days,
                    start,
                    end,
                })
                .collect(),
        }
    }

    fn sample_catalog() -> Catalog {
        let mut records = Vec::new();
        // All five foundation courses, offered without conflicts
        for (i, id) in FOUNDATION_COURSE_IDS.iter().enumerate() {
            let hour = 900 + 100 * i as i32;
            records.push(record(
                id,
                vec![(autumn(), vec![Weekday::Mon, Weekday::Wed], hour, hour + 50)],
            ));
        }
        records.push(record(
            "CS 140",
            vec![(winter(), vec![Weekday::Tue, Weekday::Thu], 900, 950)],
        ));
        records.push(record(
            "CS 229",
            vec![(winter(), vec![Weekday::Mon, Weekday::Wed], 900, 950)],
        ));
        records.push(record(
            "CS 245",
            vec![(winter(), vec![Weekday::Mon, Weekday::Wed], 930, 1020)],
        ));
        Catalog::from_records(records)
    }

    fn sample_program() -> Program {
        Program {
            name: "Artificial Intelligence".to_string(),
            breadth_course_ids: vec!["CS 245".to_string()],
            depth_course_ids: vec!["CS 229".to_string()],
            single_depth_reqs: vec![Requirement::Unit(UnitRequirement::new(
                "Depth",
                4,
                vec!["CS 229".to_string()],
            ))],
            primary_depth_reqs: Vec::new(),
            secondary_depth_reqs: Vec::new(),
        }
    }

    fn sample_planner() -> Planner {
        let mut planner = Planner::new(sample_catalog(), vec![sample_program()]);
        planner.set_terms(vec![autumn(), winter()]);
        planner
    }

    #[test]
    fn test_add_course_sets_flag_and_expands_frontier() {
        let mut planner = sample_planner();
        assert!(planner.can_pick("CS 229"));
        planner.add_course("CS 229");

        assert!(planner.catalog().course("CS 229").unwrap().pick);
        assert_eq!(planner.courses().len(), 1);
        assert_eq!(planner.schedules().len(), 1);

        planner.remove_course("CS 229");
        assert!(!planner.catalog().course("CS 229").unwrap().pick);
        assert!(planner.courses().is_empty());
    }

    #[test]
    fn test_unknown_course_is_a_no_op() {
        let mut planner = sample_planner();
        planner.add_course("CS 999");
        assert!(planner.courses().is_empty());
        assert!(!planner.can_pick("CS 999"));
        assert!(planner.can_pick_with_feedback("CS 999").is_none());
    }

    #[test]
    fn test_already_taken_satisfies_unit_requirement() {
        // Scenario E: a 4-unit requirement over a course taken for 4
        // units is satisfied without the course in any schedule.
        let mut planner = sample_planner();
        planner.add_already_taken_course("CS 229", 4);

        let mut requirement = Requirement::Unit(UnitRequirement::new(
            "Depth",
            4,
            vec!["CS 229".to_string()],
        ));
        assert!(planner.fulfills(&mut requirement));
        // Discount folded back into recorded progress
        assert_eq!(requirement.fulfilled(), 4);
        assert!(planner
            .schedules()
            .iter()
            .all(|schedule| schedule.is_empty()));
    }

    #[test]
    fn test_waiver_discounts_course_requirement() {
        let mut planner = sample_planner();
        planner.add_waived_course("CS 103");

        let mut foundations = planner.requirements()[1].clone();
        assert_eq!(foundations.name(), "Foundations");
        planner.fulfills(&mut foundations);
        assert_eq!(foundations.fulfilled(), 1);
    }

    #[test]
    fn test_double_waive_is_rejected() {
        let mut planner = sample_planner();
        planner.add_waived_course("CS 103");
        planner.add_waived_course("CS 103");
        assert_eq!(planner.waived_course_ids().len(), 1);

        planner.remove_waived_course("CS 103");
        assert!(planner.waived_course_ids().is_empty());
        assert!(!planner.catalog().course("CS 103").unwrap().waived);
    }

    #[test]
    fn test_taken_units_bookkeeping() {
        let mut planner = sample_planner();
        planner.add_already_taken_course("CS 229", 3);
        assert_eq!(planner.already_taken_units("CS 229"), Some(3));

        planner.set_already_taken_units("CS 229", 5);
        assert_eq!(planner.already_taken_units("CS 229"), Some(5));

        planner.remove_already_taken_course("CS 229");
        assert_eq!(planner.already_taken_units("CS 229"), None);
    }

    #[test]
    fn test_set_specialization_builds_electives() {
        let mut planner = sample_planner();
        planner.set_specialization(Specialization::single_depth(sample_program()));

        let electives = planner.electives_requirement().unwrap();
        // Everything except the foundations and the depth course
        assert!(electives.course_ids().contains(&"CS 140".to_string()));
        assert!(electives.course_ids().contains(&"CS 245".to_string()));
        assert!(!electives.course_ids().contains(&"CS 229".to_string()));
        assert!(!electives.course_ids().contains(&"CS 103".to_string()));

        let names: Vec<&str> = planner
            .requirements()
            .iter()
            .map(|req| req.name())
            .collect();
        assert_eq!(
            names,
            [
                "Foundations",
                "Significant Implementation",
                "Electives",
                "45 Total Units",
                "Depth"
            ]
        );
    }

    #[test]
    fn test_ignore_time_unlocks_conflicting_course() {
        let mut planner = sample_planner();
        planner.add_course("CS 229");
        // CS 245 overlaps CS 229 on Mon/Wed
        assert!(!planner.can_pick("CS 245"));

        planner.ignore_time("CS 245");
        assert!(planner.can_pick("CS 245"));
        planner.add_course("CS 245");
        assert!(planner
            .schedules()
            .iter()
            .any(|schedule| schedule.offering_count() == 2));

        planner.unignore_time("CS 245");
        // The frontier replay drops the now-conflicting course
        assert_eq!(planner.courses().len(), 1);
    }

    #[test]
    fn test_repeat_bookkeeping() {
        let mut planner = sample_planner();
        assert!(!planner.update_repeat("CS 229", 2));

        planner.add_repeat("CS 229");
        assert!(planner.catalog().course("CS 229").unwrap().repeated);
        assert!(planner.update_repeat("CS 229", 2));
        assert_eq!(
            planner.catalog().course("CS 229").unwrap().repeat_times,
            Some(2)
        );

        planner.remove_repeat("CS 229");
        assert!(!planner.catalog().course("CS 229").unwrap().repeated);
    }

    #[test]
    fn test_schedules_meeting_requirements() {
        let mut planner = sample_planner();
        planner.set_specialization(Specialization::single_depth(sample_program()));

        // Unmet course requirements mean no schedule qualifies
        assert!(planner.schedules_meeting_requirements(Some(5)).is_empty());

        // Take everything the course requirements ask for, with enough
        // units to cover the unit requirements too
        for id in FOUNDATION_COURSE_IDS {
            planner.add_already_taken_course(id, 5);
        }
        planner.add_already_taken_course("CS 140", 5);
        planner.add_already_taken_course("CS 229", 15);

        let qualifying = planner.schedules_meeting_requirements(Some(5));
        assert_eq!(qualifying.len(), 1);
    }

    #[test]
    fn test_refresh_requirements_records_progress() {
        let mut planner = sample_planner();
        planner.add_already_taken_course("CS 103", 4);
        planner.refresh_requirements();

        let foundations = planner
            .requirements()
            .iter()
            .find(|req| req.name() == "Foundations")
            .unwrap();
        assert_eq!(foundations.fulfilled(), 1);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut planner = sample_planner();
        planner.set_constraint(Constraint::new(12, 4));
        planner.set_specialization(Specialization::single_depth(sample_program()));
        planner.add_course("CS 229");
        planner.add_waived_course("CS 103");
        planner.add_already_taken_course("CS 140", 4);
        planner.ignore_time("CS 245");

        let state = planner.snapshot();

        let mut replayed = Planner::new(sample_catalog(), vec![sample_program()]);
        replayed.restore(&state);

        assert_eq!(replayed.snapshot(), state);
        assert!(replayed.catalog().course("CS 229").unwrap().pick);
        assert!(replayed.catalog().course("CS 103").unwrap().waived);
        assert!(replayed.catalog().course("CS 245").unwrap().time_ignored);
        assert_eq!(replayed.already_taken_units("CS 140"), Some(4));
        assert_eq!(replayed.terms().len(), 2);
        assert_eq!(
            replayed.constraint().unwrap().max_units_per_term,
            12
        );
        assert_eq!(
            replayed.specialization().unwrap().name(),
            "Artificial Intelligence"
        );
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut planner = sample_planner();
        planner.set_constraint(Constraint::new(12, 4));
        planner.add_course("CS 229");

        let state = planner.snapshot();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: PlannerState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
