//! Multi-term course planning: schedule enumeration and degree-requirement
//! fulfillment.
//!
//! Given a course catalog, a set of open academic terms, and per-term load
//! constraints, this crate maintains the set of all feasible schedules for
//! the courses a student has picked so far (the *frontier*), and evaluates
//! degree requirements (course counts and unit counts) against it. When the
//! frontier grows past configurable caps, the search falls back to sampling
//! and trades completeness for bounded cost.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Term`, `Weekday`, `Constraint`,
//!   `CourseOffering`, `Course`, `Schedule`, `Requirement`
//! - **`planner`**: The candidate-schedule frontier (`ScheduleList`),
//!   programs and specializations, and the `Planner` session that owns all
//!   user state
//! - **`catalog`**: Serde-facing input records and their resolution into
//!   domain entities
//! - **`validation`**: Input integrity checks (duplicate ids, unit ranges,
//!   day lists, dangling course references)
//!
//! # Architecture
//!
//! The crate is a plain library with no ambient state: the `Planner` owns
//! the course repository and every user-toggled flag, and all frontier
//! mutation flows through it. Rendering, storage, and catalog loading are
//! the caller's concern.

pub mod catalog;
pub mod models;
pub mod planner;
pub mod validation;
