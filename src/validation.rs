//! Input validation for catalog and program data.
//!
//! Checks structural integrity of loader records before resolution.
//! Detects:
//! - Duplicate course ids
//! - Inverted or negative unit ranges
//! - Offerings with no meeting days
//! - Offerings whose end time is not after their start time
//! - Program entries referencing unknown courses
//! - Unknown requirement type tags

use std::collections::HashSet;

use crate::catalog::{Catalog, CourseRecord, ProgramRecord, RequirementRecord};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two courses share the same id.
    DuplicateId,
    /// A unit range has `min > max` or a negative bound.
    InvalidUnitRange,
    /// An offering has no meeting days.
    EmptyDays,
    /// An offering's end time is not after its start time.
    InvalidTimeRange,
    /// A program references a course that doesn't exist.
    UnknownCourseReference,
    /// A requirement carries an unknown type tag.
    UnknownRequirementType,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates course records before catalog resolution.
///
/// Checks:
/// 1. No duplicate course ids
/// 2. `0 <= units.min <= units.max` on every course
/// 3. Every offering has at least one meeting day
/// 4. Every offering's end time is after its start time
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(records: &[CourseRecord]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for record in records {
        if !seen_ids.insert(record.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course id: {}", record.id),
            ));
        }

        if record.units.min < 0 || record.units.min > record.units.max {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidUnitRange,
                format!(
                    "Course '{}' has invalid unit range {}-{}",
                    record.id, record.units.min, record.units.max
                ),
            ));
        }

        for offering in &record.course_offerings {
            if offering.days.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyDays,
                    format!(
                        "Course '{}' has an offering in {} with no meeting days",
                        record.id,
                        offering.term.id()
                    ),
                ));
            }
            if offering.end <= offering.start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeRange,
                    format!(
                        "Course '{}' has an offering in {} ending at {} before it starts at {}",
                        record.id,
                        offering.term.id(),
                        offering.end,
                        offering.start
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates program records against a resolved catalog.
///
/// Checks:
/// 1. Every breadth and depth course id exists in the catalog
/// 2. Every requirement course id exists in the catalog
/// 3. Every requirement type tag is known
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_programs(records: &[ProgramRecord], catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    for record in records {
        for (list_name, ids) in [
            ("breadth", &record.breadth_courses),
            ("depth", &record.depth_courses),
        ] {
            for id in ids {
                if catalog.course(id).is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownCourseReference,
                        format!(
                            "Program '{}' {} list references unknown course '{}'",
                            record.name, list_name, id
                        ),
                    ));
                }
            }
        }

        let requirement_sets = [
            &record.requirements.single_depth,
            &record.requirements.primary_depth,
            &record.requirements.secondary_depth,
        ];
        for requirements in requirement_sets {
            for requirement in requirements {
                check_requirement(record, requirement, catalog, &mut errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_requirement(
    record: &ProgramRecord,
    requirement: &RequirementRecord,
    catalog: &Catalog,
    errors: &mut Vec<ValidationError>,
) {
    if !matches!(
        requirement.kind.as_str(),
        "CourseRequirement" | "UnitRequirement"
    ) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownRequirementType,
            format!(
                "Program '{}' requirement '{}' has unknown type '{}'",
                record.name, requirement.name, requirement.kind
            ),
        ));
    }

    for id in &requirement.courses {
        if catalog.course(id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourseReference,
                format!(
                    "Program '{}' requirement '{}' references unknown course '{}'",
                    record.name, requirement.name, id
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OfferingRecord, ProgramRequirements};
    use crate::models::{Term, TermPeriod, UnitRange, Weekday};

    fn offering(days: Vec<Weekday>, start: i32, end: i32) -> OfferingRecord {
        OfferingRecord {
            term: Term::new(TermPeriod::Autumn, "2012-2013"),
            days,
            start,
            end,
        }
    }

    fn course(id: &str, units: UnitRange, offerings: Vec<OfferingRecord>) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            name: id.to_string(),
            desc: String::new(),
            instructors: Vec::new(),
            grading: String::new(),
            units,
            course_offerings: offerings,
        }
    }

    fn valid_records() -> Vec<CourseRecord> {
        vec![
            course(
                "CS 103",
                UnitRange::new(3, 5),
                vec![offering(vec![Weekday::Mon, Weekday::Wed], 1100, 1150)],
            ),
            course("CS 229", UnitRange::new(3, 4), Vec::new()),
        ]
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&valid_records()).is_ok());
    }

    #[test]
    fn test_duplicate_course_id() {
        let mut records = valid_records();
        records.push(course("CS 103", UnitRange::fixed(3), Vec::new()));

        let errors = validate_catalog(&records).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_inverted_unit_range() {
        let records = vec![course("CS 1", UnitRange::new(5, 3), Vec::new())];
        let errors = validate_catalog(&records).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidUnitRange));
    }

    #[test]
    fn test_negative_units() {
        let records = vec![course("CS 1", UnitRange::new(-1, 3), Vec::new())];
        let errors = validate_catalog(&records).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidUnitRange));
    }

    #[test]
    fn test_empty_days() {
        let records = vec![course(
            "CS 1",
            UnitRange::fixed(3),
            vec![offering(Vec::new(), 900, 950)],
        )];
        let errors = validate_catalog(&records).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDays));
    }

    #[test]
    fn test_inverted_times() {
        let records = vec![course(
            "CS 1",
            UnitRange::fixed(3),
            vec![offering(vec![Weekday::Mon], 950, 900)],
        )];
        let errors = validate_catalog(&records).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTimeRange));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let records = vec![
            course("CS 1", UnitRange::new(5, 3), Vec::new()),
            course(
                "CS 1",
                UnitRange::fixed(3),
                vec![offering(Vec::new(), 900, 950)],
            ),
        ];
        let errors = validate_catalog(&records).unwrap_err();
        assert!(errors.len() >= 3);
    }

    fn program_record(requirement: RequirementRecord) -> ProgramRecord {
        ProgramRecord {
            name: "AI".to_string(),
            breadth_courses: vec!["CS 103".to_string()],
            depth_courses: vec!["CS 229".to_string()],
            requirements: ProgramRequirements {
                single_depth: vec![requirement],
                primary_depth: Vec::new(),
                secondary_depth: Vec::new(),
            },
        }
    }

    #[test]
    fn test_valid_program() {
        let catalog = Catalog::from_records(valid_records());
        let record = program_record(RequirementRecord {
            kind: "UnitRequirement".to_string(),
            name: "Depth".to_string(),
            required: 21,
            courses: vec!["CS 229".to_string()],
        });
        assert!(validate_programs(&[record], &catalog).is_ok());
    }

    #[test]
    fn test_unknown_course_reference() {
        let catalog = Catalog::from_records(valid_records());
        let record = program_record(RequirementRecord {
            kind: "UnitRequirement".to_string(),
            name: "Depth".to_string(),
            required: 21,
            courses: vec!["CS 999".to_string()],
        });
        let errors = validate_programs(&[record], &catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownCourseReference));
    }

    #[test]
    fn test_unknown_requirement_type() {
        let catalog = Catalog::from_records(valid_records());
        let record = program_record(RequirementRecord {
            kind: "Mystery".to_string(),
            name: "Bogus".to_string(),
            required: 1,
            courses: Vec::new(),
        });
        let errors = validate_programs(&[record], &catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownRequirementType));
    }
}
