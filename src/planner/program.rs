//! Degree programs and specializations.
//!
//! A program bundles the requirement sets a student can pursue it
//! under: one set for a single-depth specialization, and separate
//! primary/secondary sets for dual-depth combinations. A specialization
//! is a chosen program (or pair of programs) and selects which
//! requirement set applies.

use crate::models::Requirement;
use crate::planner::ScheduleList;

/// A degree program resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Program name (e.g. `"Artificial Intelligence"`).
    pub name: String,
    /// Course ids counting toward breadth.
    pub breadth_course_ids: Vec<String>,
    /// Course ids counting toward depth.
    pub depth_course_ids: Vec<String>,
    /// Requirements when pursued as a single depth.
    pub single_depth_reqs: Vec<Requirement>,
    /// Requirements contributed as the primary of a dual depth.
    pub primary_depth_reqs: Vec<Requirement>,
    /// Requirements contributed as the secondary of a dual depth.
    pub secondary_depth_reqs: Vec<Requirement>,
}

/// A chosen depth specialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Specialization {
    /// One program pursued alone.
    SingleDepth {
        /// The chosen program.
        program: Program,
    },
    /// Two programs combined.
    DualDepth {
        /// Primary program (contributes its primary-depth requirements).
        primary: Program,
        /// Secondary program (contributes its secondary-depth requirements).
        secondary: Program,
    },
}

impl Specialization {
    /// Single-depth specialization over a program.
    pub fn single_depth(program: Program) -> Self {
        Self::SingleDepth { program }
    }

    /// Dual-depth specialization over a primary and secondary program.
    pub fn dual_depth(primary: Program, secondary: Program) -> Self {
        Self::DualDepth { primary, secondary }
    }

    /// The defining program name (the primary one for dual depth).
    pub fn name(&self) -> &str {
        match self {
            Specialization::SingleDepth { program } => &program.name,
            Specialization::DualDepth { primary, .. } => &primary.name,
        }
    }

    /// The requirements this specialization imposes.
    pub fn requirements(&self) -> Vec<&Requirement> {
        match self {
            Specialization::SingleDepth { program } => program.single_depth_reqs.iter().collect(),
            Specialization::DualDepth { primary, secondary } => primary
                .primary_depth_reqs
                .iter()
                .chain(secondary.secondary_depth_reqs.iter())
                .collect(),
        }
    }

    /// The breadth requirement, when the specialization defines one.
    pub fn breadth_requirement(&self) -> Option<&Requirement> {
        self.requirements()
            .into_iter()
            .find(|req| req.name() == "Breadth")
    }

    /// Every requirement other than breadth.
    pub fn depth_requirements(&self) -> Vec<&Requirement> {
        self.requirements()
            .into_iter()
            .filter(|req| req.name() != "Breadth")
            .collect()
    }

    /// The requirements currently satisfied by the frontier, with their
    /// recorded progress.
    pub fn fulfilled_requirements(&self, list: &ScheduleList) -> Vec<Requirement> {
        self.requirements()
            .into_iter()
            .cloned()
            .filter_map(|mut req| list.fulfills(&mut req).then_some(req))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRequirement, UnitRequirement};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn program(name: &str) -> Program {
        Program {
            name: name.to_string(),
            breadth_course_ids: ids(&["CS 240"]),
            depth_course_ids: ids(&["CS 229"]),
            single_depth_reqs: vec![
                Requirement::Course(CourseRequirement::new("Breadth", 3, ids(&["CS 240"]))),
                Requirement::Unit(UnitRequirement::new("Depth", 27, ids(&["CS 229"]))),
            ],
            primary_depth_reqs: vec![Requirement::Unit(UnitRequirement::new(
                "Primary Depth",
                21,
                ids(&["CS 229"]),
            ))],
            secondary_depth_reqs: vec![Requirement::Unit(UnitRequirement::new(
                "Secondary Depth",
                12,
                ids(&["CS 229"]),
            ))],
        }
    }

    #[test]
    fn test_single_depth_requirements() {
        let spec = Specialization::single_depth(program("AI"));
        assert_eq!(spec.name(), "AI");
        let names: Vec<&str> = spec.requirements().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Breadth", "Depth"]);
    }

    #[test]
    fn test_dual_depth_concatenates() {
        let spec = Specialization::dual_depth(program("AI"), program("Systems"));
        assert_eq!(spec.name(), "AI");
        let names: Vec<&str> = spec.requirements().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Primary Depth", "Secondary Depth"]);
    }

    #[test]
    fn test_breadth_split() {
        let spec = Specialization::single_depth(program("AI"));
        assert_eq!(spec.breadth_requirement().unwrap().name(), "Breadth");
        let depth: Vec<&str> = spec.depth_requirements().iter().map(|r| r.name()).collect();
        assert_eq!(depth, ["Depth"]);
    }
}
