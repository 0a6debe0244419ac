//! Catalog interface records and their resolution.
//!
//! The loader-facing shape of the catalog: plain serde records
//! mirroring the JSON the external loader produces, and resolution
//! functions turning them into domain entities. How the JSON gets here
//! (files, network, embedded) is the caller's concern; run
//! [`crate::validation`] over the records before resolving if the
//! source is untrusted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{
    Course, CourseOffering, CourseRequirement, Requirement, Term, UnitRange, UnitRequirement,
    Weekday,
};
use crate::planner::Program;

/// One course as produced by the catalog loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Unique course id.
    pub id: String,
    /// Course title.
    pub name: String,
    /// Catalog description.
    #[serde(default)]
    pub desc: String,
    /// Listed instructors.
    #[serde(default)]
    pub instructors: Vec<String>,
    /// Grading basis.
    #[serde(default)]
    pub grading: String,
    /// Unit range.
    pub units: UnitRange,
    /// Term-specific offerings.
    #[serde(default)]
    pub course_offerings: Vec<OfferingRecord>,
}

/// One offering within a [`CourseRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingRecord {
    /// Term the offering meets in.
    pub term: Term,
    /// Meeting weekdays.
    pub days: Vec<Weekday>,
    /// Start time (HHMM).
    pub start: i32,
    /// End time (HHMM).
    pub end: i32,
}

/// One program as produced by the program loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    /// Program name.
    pub name: String,
    /// Course ids counting toward breadth.
    #[serde(default)]
    pub breadth_courses: Vec<String>,
    /// Course ids counting toward depth.
    #[serde(default)]
    pub depth_courses: Vec<String>,
    /// Requirement sets per specialization shape.
    pub requirements: ProgramRequirements,
}

/// The requirement sets of a [`ProgramRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRequirements {
    /// Requirements for a single-depth specialization.
    #[serde(default)]
    pub single_depth: Vec<RequirementRecord>,
    /// Requirements contributed as a dual-depth primary.
    #[serde(default)]
    pub primary_depth: Vec<RequirementRecord>,
    /// Requirements contributed as a dual-depth secondary.
    #[serde(default)]
    pub secondary_depth: Vec<RequirementRecord>,
}

/// One requirement within a [`ProgramRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementRecord {
    /// Requirement kind tag: `"CourseRequirement"` or `"UnitRequirement"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Requirement name.
    pub name: String,
    /// Required course count or unit count, per the kind.
    pub required: i32,
    /// Ids of the courses that count.
    pub courses: Vec<String>,
}

/// The resolved course repository, indexed by course id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Resolves loader records into a catalog.
    ///
    /// Records reusing an already-seen id are logged and skipped.
    pub fn from_records(records: Vec<CourseRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            if catalog.index.contains_key(&record.id) {
                tracing::warn!(course_id = %record.id, "duplicate course record skipped");
                continue;
            }
            let course = resolve_course(record);
            catalog.index.insert(course.id.clone(), catalog.courses.len());
            catalog.courses.push(course);
        }
        catalog
    }

    /// Looks up a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.index.get(id).map(|&i| &self.courses[i])
    }

    /// Looks up a course by id for mutation.
    pub fn course_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.index.get(id).map(|&i| &mut self.courses[i])
    }

    /// All courses, in record order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All course ids, in record order.
    pub fn course_ids(&self) -> Vec<String> {
        self.courses.iter().map(|course| course.id.clone()).collect()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog holds no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Keeps only the given ids, dropping unknown ones with a warning.
    pub(crate) fn filter_known(&self, ids: &[String], context: &str) -> Vec<String> {
        ids.iter()
            .filter(|id| {
                let known = self.index.contains_key(id.as_str());
                if !known {
                    tracing::warn!(course_id = %id, context, "unknown course id skipped");
                }
                known
            })
            .cloned()
            .collect()
    }
}

fn resolve_course(record: CourseRecord) -> Course {
    let mut course = Course::new(record.id.clone(), record.name.clone(), record.units)
        .with_instructors(record.instructors)
        .with_desc(record.desc)
        .with_grading(record.grading);
    for offering in record.course_offerings {
        course = course.with_offering(CourseOffering::new(
            record.id.clone(),
            record.name.clone(),
            record.units,
            offering.term,
            offering.days,
            offering.start,
            offering.end,
        ));
    }
    course
}

/// Resolves a program record against the catalog.
///
/// Unknown course ids and unknown requirement kind tags are logged and
/// skipped rather than failing the whole program.
pub fn resolve_program(record: &ProgramRecord, catalog: &Catalog) -> Program {
    let resolve_reqs = |records: &[RequirementRecord]| -> Vec<Requirement> {
        records
            .iter()
            .filter_map(|req| resolve_requirement(req, catalog))
            .collect()
    };

    Program {
        name: record.name.clone(),
        breadth_course_ids: catalog.filter_known(&record.breadth_courses, "breadth"),
        depth_course_ids: catalog.filter_known(&record.depth_courses, "depth"),
        single_depth_reqs: resolve_reqs(&record.requirements.single_depth),
        primary_depth_reqs: resolve_reqs(&record.requirements.primary_depth),
        secondary_depth_reqs: resolve_reqs(&record.requirements.secondary_depth),
    }
}

fn resolve_requirement(record: &RequirementRecord, catalog: &Catalog) -> Option<Requirement> {
    let course_ids = catalog.filter_known(&record.courses, &record.name);
    match record.kind.as_str() {
        "CourseRequirement" => Some(Requirement::Course(CourseRequirement::new(
            record.name.clone(),
            record.required,
            course_ids,
        ))),
        "UnitRequirement" => Some(Requirement::Unit(UnitRequirement::new(
            record.name.clone(),
            record.required,
            course_ids,
        ))),
        other => {
            tracing::warn!(kind = other, name = %record.name, "unknown requirement type skipped");
            None
        }
    }
}
