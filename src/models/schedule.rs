//! Candidate schedule model.
//!
//! A schedule assigns course offerings to open terms, one bucket per
//! term. Well-formed schedules are conflict-free within each bucket and
//! satisfy the attached constraint; callers keep them that way by
//! checking [`Schedule::can_add_course_offering`] before mutating.
//!
//! The unit-accounting policy for unit requirements also lives here:
//! given a per-term unit budget, every offering is seeded at its minimum
//! units and the remaining budget is greedily granted to offerings the
//! requirement covers, non-foundation courses first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter;

use super::constraint::Constraint;
use super::offering::CourseOffering;
use super::requirement::{UnitRequirement, FOUNDATION_UNIT_CAP, UNCONSTRAINED_TERM_UNITS};
use super::term::Term;

/// Result of an addability check.
///
/// On failure, `conflicts` carries the course ids the caller would have
/// to remove: the single conflicting course for a time conflict, or
/// every course already in the term for a constraint violation (any of
/// them might need to go).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCheck {
    /// Whether the offering can be added.
    pub can_add: bool,
    /// Course ids standing in the way when it cannot.
    pub conflicts: Vec<String>,
}

impl AddCheck {
    fn ok() -> Self {
        Self {
            can_add: true,
            conflicts: Vec::new(),
        }
    }

    fn blocked(conflicts: Vec<String>) -> Self {
        Self {
            can_add: false,
            conflicts,
        }
    }
}

/// An assignment of course offerings to open terms.
///
/// Buckets are keyed by term id in a `BTreeMap` so iteration order is
/// stable — the greedy unit top-up in [`Schedule::fulfilled_units`] is
/// order-sensitive once the budget runs out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    constraint: Option<Constraint>,
    buckets: BTreeMap<String, Vec<CourseOffering>>,
}

impl Schedule {
    /// Creates an empty schedule with one bucket per open term.
    pub fn new(terms: &[Term], constraint: Option<Constraint>) -> Self {
        let buckets = terms
            .iter()
            .map(|term| (term.id(), Vec::new()))
            .collect();
        Self {
            constraint,
            buckets,
        }
    }

    /// The attached constraint, if any.
    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Ids of the open terms.
    pub fn term_ids(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// The offerings placed in the given term, empty for unknown terms.
    pub fn offerings_in(&self, term_id: &str) -> &[CourseOffering] {
        self.buckets.get(term_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All placed offerings across all terms.
    pub fn offerings(&self) -> impl Iterator<Item = &CourseOffering> {
        self.buckets.values().flatten()
    }

    /// Number of placed offerings.
    pub fn offering_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether no offering has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Whether the offering can be added without violating anything.
    pub fn can_add_course_offering(&self, offering: &CourseOffering) -> bool {
        self.can_add_course_offering_with_conflicts(offering).can_add
    }

    /// Addability check with conflict feedback.
    ///
    /// Fails with no conflicts when the offering's term is not open.
    /// Fails naming the first conflicting course when one is found.
    /// Fails naming every course already in the term when the candidate
    /// set would violate the constraint. Succeeds otherwise.
    pub fn can_add_course_offering_with_conflicts(&self, offering: &CourseOffering) -> AddCheck {
        let term_id = offering.term.id();
        let Some(bucket) = self.buckets.get(&term_id) else {
            return AddCheck::blocked(Vec::new());
        };

        for placed in bucket {
            if placed.conflicts_with(offering) {
                return AddCheck::blocked(vec![placed.course_id.clone()]);
            }
        }

        if let Some(constraint) = &self.constraint {
            if !constraint.is_satisfied_by(bucket.iter().chain(iter::once(offering))) {
                return AddCheck::blocked(
                    bucket.iter().map(|off| off.course_id.clone()).collect(),
                );
            }
        }

        AddCheck::ok()
    }

    /// Appends the offering to its term bucket.
    ///
    /// The caller must have verified addability; adding to a term that
    /// is not open is a caller error, logged and ignored.
    pub fn add(&mut self, offering: CourseOffering) {
        let term_id = offering.term.id();
        let Some(bucket) = self.buckets.get_mut(&term_id) else {
            tracing::warn!(
                course_id = %offering.course_id,
                term_id = %term_id,
                "offering is for a term that is not open; was addability checked first?"
            );
            return;
        };
        bucket.push(offering);
    }

    /// Removes every offering of the given course from its term bucket.
    pub fn remove(&mut self, offering: &CourseOffering) {
        let term_id = offering.term.id();
        let Some(bucket) = self.buckets.get_mut(&term_id) else {
            tracing::warn!(
                course_id = %offering.course_id,
                term_id = %term_id,
                "removal from a term that is not open"
            );
            return;
        };
        bucket.retain(|placed| placed.course_id != offering.course_id);
    }

    /// Units this schedule contributes toward a unit requirement.
    ///
    /// Per term: every offering is seeded at its minimum units and the
    /// remaining budget (the constraint's unit cap, or 24 when
    /// unconstrained) is granted greedily, first to non-foundation
    /// courses the requirement covers, then to foundation courses, each
    /// topped up by at most its unit spread. Only allocations of covered
    /// offerings count. Foundation allocations beyond the cap of
    /// [`FOUNDATION_UNIT_CAP`] units are subtracted from the total.
    pub fn fulfilled_units(&self, requirement: &UnitRequirement) -> i32 {
        let budget = match &self.constraint {
            Some(c) if c.max_units_per_term > 0 => c.max_units_per_term,
            _ => UNCONSTRAINED_TERM_UNITS,
        };

        let mut units_towards_req = 0;
        let mut foundations_total = 0;

        for bucket in self.buckets.values() {
            let mut alloc: Vec<i32> = bucket.iter().map(|off| off.units.min).collect();
            let mut units_left = budget - alloc.iter().sum::<i32>();

            for (i, off) in bucket.iter().enumerate() {
                if !requirement.covers_non_foundation(&off.course_id) {
                    continue;
                }
                let added = off.units.spread().min(units_left);
                alloc[i] += added;
                units_left -= added;
                units_towards_req += alloc[i];
            }

            for (i, off) in bucket.iter().enumerate() {
                if !requirement.covers_foundation(&off.course_id) {
                    continue;
                }
                let added = off.units.spread().min(units_left);
                alloc[i] += added;
                units_left -= added;
                units_towards_req += alloc[i];
                foundations_total += alloc[i];
            }
        }

        units_towards_req - (foundations_total - FOUNDATION_UNIT_CAP).max(0)
    }

    /// Whether this schedule alone satisfies the unit requirement.
    pub fn fulfills(&self, requirement: &UnitRequirement) -> bool {
        self.fulfilled_units(requirement) >= requirement.required_units
    }
}
