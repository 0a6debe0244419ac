//! Degree requirements.
//!
//! A requirement asks for either a number of courses from a list
//! (course requirement) or a number of units earned from a list (unit
//! requirement). Requirements are adjustable: waived and already-taken
//! courses reduce the remaining target, producing a new requirement
//! and never mutating the original.
//!
//! Unit requirements partition their course list into foundation and
//! non-foundation members at construction time; the partition drives
//! the allocation order and the foundation-unit cap in
//! [`crate::models::Schedule::fulfilled_units`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The five foundation courses whose combined unit contribution toward
/// any unit requirement is capped.
pub const FOUNDATION_COURSE_IDS: [&str; 5] = ["CS 103", "CS 107", "CS 109", "CS 110", "CS 161"];

/// Maximum units the foundation courses may contribute toward a unit
/// requirement.
pub const FOUNDATION_UNIT_CAP: i32 = 10;

/// Per-term unit budget assumed when no constraint caps units.
pub const UNCONSTRAINED_TERM_UNITS: i32 = 24;

/// The requirement name that never discounts waived courses.
const NO_WAIVE_NAME: &str = "Significant Implementation";

/// A course the student has already taken, with the units earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakenCourse {
    /// Course id.
    pub course_id: String,
    /// Units actually earned.
    pub units: i32,
}

impl TakenCourse {
    /// Creates a taken-course record.
    pub fn new(course_id: impl Into<String>, units: i32) -> Self {
        Self {
            course_id: course_id.into(),
            units,
        }
    }
}

/// A degree requirement: a course count or a unit count over a course
/// list.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Requires a number of courses from the list.
    Course(CourseRequirement),
    /// Requires a number of units earned from the list.
    Unit(UnitRequirement),
}

impl Requirement {
    /// Requirement name.
    pub fn name(&self) -> &str {
        match self {
            Requirement::Course(req) => &req.name,
            Requirement::Unit(req) => &req.name,
        }
    }

    /// The remaining target: a course count or a unit count, whichever
    /// this requirement tracks.
    pub fn required(&self) -> i32 {
        match self {
            Requirement::Course(req) => req.required_count,
            Requirement::Unit(req) => req.required_units,
        }
    }

    /// Progress recorded by the last fulfillment evaluation.
    pub fn fulfilled(&self) -> i32 {
        match self {
            Requirement::Course(req) => req.fulfilled,
            Requirement::Unit(req) => req.fulfilled,
        }
    }

    /// Overwrites the recorded progress.
    pub fn set_fulfilled(&mut self, fulfilled: i32) {
        match self {
            Requirement::Course(req) => req.fulfilled = fulfilled,
            Requirement::Unit(req) => req.fulfilled = fulfilled,
        }
    }

    /// Ids of the courses that can count toward this requirement.
    pub fn course_ids(&self) -> &[String] {
        match self {
            Requirement::Course(req) => &req.course_ids,
            Requirement::Unit(req) => &req.course_ids,
        }
    }

    /// A new requirement with the target reduced by waived and
    /// already-taken courses.
    pub fn adjusted(&self, waived_ids: &[String], already_taken: &[TakenCourse]) -> Requirement {
        match self {
            Requirement::Course(req) => {
                Requirement::Course(req.adjusted(waived_ids, already_taken))
            }
            Requirement::Unit(req) => Requirement::Unit(req.adjusted(waived_ids, already_taken)),
        }
    }

    /// Short human-readable progress line, e.g. `"3 of 5 courses"`.
    pub fn progress_text(&self) -> String {
        match self {
            Requirement::Course(req) => req.progress_text(),
            Requirement::Unit(req) => req.progress_text(),
        }
    }

    /// Instruction line shown next to the requirement's course list.
    pub fn instructions(&self) -> String {
        match self {
            Requirement::Course(req) => req.instructions(),
            Requirement::Unit(req) => req.instructions(),
        }
    }
}

/// Requires a number of specific courses from a list.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRequirement {
    /// Requirement name.
    pub name: String,
    /// Number of courses still required.
    pub required_count: i32,
    /// Ids of the courses that count.
    pub course_ids: Vec<String>,
    /// Progress recorded by the last fulfillment evaluation.
    pub fulfilled: i32,
}

impl CourseRequirement {
    /// Creates a course requirement.
    pub fn new(name: impl Into<String>, required_count: i32, course_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            required_count,
            course_ids,
            fulfilled: 0,
        }
    }

    /// A new requirement with the count reduced by member courses that
    /// are waived or already taken.
    ///
    /// The Significant Implementation requirement never discounts
    /// waivers; the course must actually have been taken.
    pub fn adjusted(&self, waived_ids: &[String], already_taken: &[TakenCourse]) -> Self {
        let allows_waive = !self.name.contains(NO_WAIVE_NAME);

        let mut counted: HashSet<&str> = already_taken
            .iter()
            .map(|taken| taken.course_id.as_str())
            .collect();
        if allows_waive {
            counted.extend(waived_ids.iter().map(String::as_str));
        }

        let already_counted = self
            .course_ids
            .iter()
            .filter(|id| counted.contains(id.as_str()))
            .count() as i32;

        Self::new(
            self.name.clone(),
            self.required_count - already_counted,
            self.course_ids.clone(),
        )
    }

    /// Progress line, e.g. `"3 of 5 courses"`.
    pub fn progress_text(&self) -> String {
        format!("{} of {}", self.fulfilled, pluralize("course", self.required_count))
    }

    /// Instruction line for the course list.
    pub fn instructions(&self) -> String {
        format!(
            "Click to select {} from the following list",
            pluralize("course", self.required_count)
        )
    }
}

/// Requires a number of units earned from a course list.
///
/// The foundation partition is derived from the course list once, at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRequirement {
    /// Requirement name.
    pub name: String,
    /// Units still required.
    pub required_units: i32,
    /// Ids of the courses that count.
    pub course_ids: Vec<String>,
    /// Progress recorded by the last fulfillment evaluation.
    pub fulfilled: i32,
    non_foundation_ids: HashSet<String>,
    foundation_ids: Vec<String>,
}

impl UnitRequirement {
    /// Creates a unit requirement, partitioning the course list into
    /// foundation and non-foundation members.
    pub fn new(name: impl Into<String>, required_units: i32, course_ids: Vec<String>) -> Self {
        let foundation: HashSet<&str> = FOUNDATION_COURSE_IDS.iter().copied().collect();
        let non_foundation_ids = course_ids
            .iter()
            .filter(|id| !foundation.contains(id.as_str()))
            .cloned()
            .collect();
        let foundation_ids = course_ids
            .iter()
            .filter(|id| foundation.contains(id.as_str()))
            .cloned()
            .collect();
        Self {
            name: name.into(),
            required_units,
            course_ids,
            fulfilled: 0,
            non_foundation_ids,
            foundation_ids,
        }
    }

    /// Whether the course counts toward this requirement and is not a
    /// foundation course.
    pub fn covers_non_foundation(&self, course_id: &str) -> bool {
        self.non_foundation_ids.contains(course_id)
    }

    /// Whether the course counts toward this requirement and is a
    /// foundation course.
    pub fn covers_foundation(&self, course_id: &str) -> bool {
        self.foundation_ids.iter().any(|id| id == course_id)
    }

    /// A new requirement with the unit target reduced by the recorded
    /// units of already-taken member courses. Waivers carry no units
    /// and do not reduce unit requirements.
    pub fn adjusted(&self, _waived_ids: &[String], already_taken: &[TakenCourse]) -> Self {
        let member: HashSet<&str> = self.course_ids.iter().map(String::as_str).collect();
        let taken_units: i32 = already_taken
            .iter()
            .filter(|taken| member.contains(taken.course_id.as_str()))
            .map(|taken| taken.units)
            .sum();

        Self::new(
            self.name.clone(),
            self.required_units - taken_units,
            self.course_ids.clone(),
        )
    }

    /// Progress line, e.g. `"27 of 45 units"`.
    pub fn progress_text(&self) -> String {
        format!("{} of {}", self.fulfilled, pluralize("unit", self.required_units))
    }

    /// Instruction line for the course list.
    pub fn instructions(&self) -> String {
        format!(
            "Click to select {} from the following list",
            pluralize("unit", self.required_units)
        )
    }
}

fn pluralize(noun: &str, count: i32) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
