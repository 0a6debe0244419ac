//! The candidate-schedule frontier.
//!
//! # Algorithm
//!
//! The frontier holds every conflict-free, constraint-satisfying way to
//! place one offering of each picked course into the open terms. Adding
//! a course branches every frontier schedule over the course's fitting
//! offerings; schedules with no fitting offering are dropped. Removing
//! a course (or changing terms or the constraint) rebuilds the frontier
//! from scratch by replaying the surviving picks against a single empty
//! schedule — retraction cannot be done incrementally without knowing
//! which branches depended on the removed course.
//!
//! # Sampling
//!
//! Three caps bound the cost on large inputs, each trading completeness
//! for latency:
//! - expansion works from a deterministic evenly spaced sample once the
//!   pre-expansion frontier exceeds `frontier_cap`;
//! - pickability testing switches from an exhaustive scan to random
//!   draws at `exact_pick_threshold` schedules;
//! - unit-requirement evaluation takes the best of random draws above
//!   `unit_sample_draws` schedules, so it can only undercount.

use rand::Rng;
use std::collections::HashSet;

use crate::models::{
    Constraint, Course, PickFeedback, Requirement, Schedule, Term,
};

/// Cost caps for the frontier search.
///
/// The defaults reproduce the reference policy; they are configuration
/// points, not invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Frontier size at which pickability checks stop being exhaustive.
    pub exact_pick_threshold: usize,
    /// Random (schedule, offering) probes for a sampled pickability check.
    pub pick_sample_draws: usize,
    /// Pre-expansion frontier size above which `add_course` expands an
    /// evenly spaced sample instead of every schedule.
    pub frontier_cap: usize,
    /// Frontier size above which unit fulfillment samples schedules.
    pub unit_sample_draws: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            exact_pick_threshold: 500,
            pick_sample_draws: 1000,
            frontier_cap: 1000,
            unit_sample_draws: 100,
        }
    }
}

/// The set of live candidate schedules for the picked courses.
#[derive(Debug, Clone)]
pub struct ScheduleList {
    schedules: Vec<Schedule>,
    courses: Vec<Course>,
    terms: Vec<Term>,
    constraint: Option<Constraint>,
    limits: SearchLimits,
}

impl ScheduleList {
    /// Creates a frontier with no picked courses: a single empty
    /// schedule over the given terms.
    pub fn new(mut terms: Vec<Term>, constraint: Option<Constraint>) -> Self {
        terms.sort();
        let schedules = vec![Schedule::new(&terms, constraint.clone())];
        Self {
            schedules,
            courses: Vec::new(),
            terms,
            constraint,
            limits: SearchLimits::default(),
        }
    }

    /// Overrides the search cost caps.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Reconstructs a frontier from a course list, keeping only the
    /// courses that are still pickable as they are replayed in order.
    pub fn rebuild(
        courses: Vec<Course>,
        terms: Vec<Term>,
        constraint: Option<Constraint>,
        limits: SearchLimits,
    ) -> Self {
        let mut list = Self::new(terms, constraint).with_limits(limits);
        for course in courses {
            if list.can_pick(&course) {
                list.add_course(&course);
            }
        }
        list
    }

    /// The live candidate schedules.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Number of live candidate schedules.
    pub fn schedule_count(&self) -> usize {
        self.schedules.len()
    }

    /// The picked courses, in pick order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The open terms, sorted.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The active per-term constraint, if any.
    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// The active search cost caps.
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Whether the course can currently be picked.
    pub fn can_pick(&self, course: &Course) -> bool {
        course.can_be_picked(self)
    }

    /// Pickability with a human-readable reason on failure.
    pub fn can_pick_with_feedback(&self, course: &Course) -> PickFeedback {
        course.can_be_picked_with_feedback(self)
    }

    /// Expands the frontier with one offering of the course per branch.
    ///
    /// Every (schedule, fitting offering) pair becomes a new frontier
    /// entry; schedules where no offering fits are dropped. Callers are
    /// expected to pre-check with [`ScheduleList::can_pick`] — if no
    /// offering fits anywhere the frontier collapses to empty. Above
    /// `frontier_cap` pre-expansion schedules, only an evenly spaced
    /// sample of the frontier is expanded.
    pub fn add_course(&mut self, course: &Course) {
        let mut expanded: Vec<Schedule> = Vec::new();
        let count = self.schedules.len();

        if count > self.limits.frontier_cap {
            let samples = self.limits.frontier_cap;
            for sample in 0..samples {
                let index = sample * (count - 1) / (samples - 1).max(1);
                Self::branch_into(&self.schedules[index], course, &mut expanded);
            }
        } else {
            for schedule in &self.schedules {
                Self::branch_into(schedule, course, &mut expanded);
            }
        }

        self.courses.push(course.clone());
        self.schedules = expanded;
        tracing::debug!(
            course_id = %course.id,
            frontier = self.schedules.len(),
            "frontier expanded"
        );
    }

    fn branch_into(schedule: &Schedule, course: &Course, out: &mut Vec<Schedule>) {
        for offering in &course.offerings {
            if schedule.can_add_course_offering(offering) {
                let mut child = schedule.clone();
                child.add(offering.clone());
                out.push(child);
            }
        }
    }

    /// Drops the course and rebuilds the frontier by replay.
    pub fn remove_course(&mut self, course_id: &str) {
        self.courses.retain(|course| course.id != course_id);
        self.recalculate();
    }

    /// Replaces the picked-course list and rebuilds the frontier.
    pub fn set_courses(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        self.recalculate();
    }

    /// Opens a term. Duplicate terms are logged and ignored.
    pub fn add_term(&mut self, term: Term) {
        if self.terms.contains(&term) {
            tracing::warn!(term_id = %term.id(), "term already open");
            return;
        }
        self.terms.push(term);
        self.terms.sort();
        self.recalculate();
    }

    /// Closes a term. Unknown terms are logged and ignored.
    pub fn remove_term(&mut self, term: &Term) {
        let Some(position) = self.terms.iter().position(|t| t == term) else {
            tracing::warn!(term_id = %term.id(), "cannot close a term that is not open");
            return;
        };
        self.terms.remove(position);
        self.recalculate();
    }

    /// Replaces the open terms and rebuilds the frontier.
    pub fn set_terms(&mut self, mut terms: Vec<Term>) {
        terms.sort();
        self.terms = terms;
        self.recalculate();
    }

    /// Replaces the constraint and rebuilds the frontier.
    pub fn set_constraint(&mut self, constraint: Option<Constraint>) {
        self.constraint = constraint;
        self.recalculate();
    }

    /// Rebuilds the frontier from scratch by replaying the picked
    /// courses, dropping any that are no longer pickable.
    pub fn recalculate(&mut self) {
        let courses = std::mem::take(&mut self.courses);
        self.schedules = vec![Schedule::new(&self.terms, self.constraint.clone())];
        for course in courses {
            if self.can_pick(&course) {
                self.add_course(&course);
            }
        }
    }

    /// Evaluates a requirement against the frontier, recording progress
    /// in `requirement.fulfilled`.
    pub fn fulfills(&self, requirement: &mut Requirement) -> bool {
        self.fulfills_with_rng(requirement, &mut rand::rng())
    }

    /// Requirement evaluation with a caller-supplied random source.
    ///
    /// Course requirements count picked member courses; they can never
    /// hold on an empty frontier. Unit requirements take the best
    /// fulfilled-unit figure over the whole frontier, or over random
    /// draws above the sampling cap — the sampled figure can only
    /// undercount, never overcount.
    pub fn fulfills_with_rng<R: Rng>(&self, requirement: &mut Requirement, rng: &mut R) -> bool {
        match requirement {
            Requirement::Course(req) => {
                if self.schedules.is_empty() {
                    req.fulfilled = 0;
                    return false;
                }
                let picked: HashSet<&str> =
                    self.courses.iter().map(|course| course.id.as_str()).collect();
                req.fulfilled = req
                    .course_ids
                    .iter()
                    .filter(|id| picked.contains(id.as_str()))
                    .count() as i32;
                req.fulfilled >= req.required_count
            }
            Requirement::Unit(req) => {
                req.fulfilled = 0;
                if self.schedules.len() > self.limits.unit_sample_draws {
                    for _ in 0..self.limits.unit_sample_draws {
                        let schedule = &self.schedules[rng.random_range(0..self.schedules.len())];
                        let fulfilled = schedule.fulfilled_units(req);
                        if fulfilled > req.fulfilled {
                            req.fulfilled = fulfilled;
                        }
                    }
                } else {
                    for schedule in &self.schedules {
                        let fulfilled = schedule.fulfilled_units(req);
                        if fulfilled > req.fulfilled {
                            req.fulfilled = fulfilled;
                        }
                    }
                }
                req.fulfilled >= req.required_units
            }
        }
    }
}
