//! Course-planning domain models.
//!
//! Provides the core data types for representing catalogs, candidate
//! schedules, and degree requirements: academic terms, per-term load
//! constraints, course offerings with meeting patterns, courses, the
//! per-term schedule container, and the requirement family.

mod constraint;
mod course;
mod offering;
mod requirement;
mod schedule;
mod term;

pub use constraint::Constraint;
pub use course::{Course, PickFeedback};
pub use offering::{CourseOffering, UnitRange};
pub use requirement::{
    CourseRequirement, Requirement, TakenCourse, UnitRequirement, FOUNDATION_COURSE_IDS,
    FOUNDATION_UNIT_CAP, UNCONSTRAINED_TERM_UNITS,
};
pub use schedule::{AddCheck, Schedule};
pub use term::{Term, TermPeriod, Weekday};
