//! Frontier search and session orchestration.
//!
//! # Usage
//!
//! ```
//! use course_plan::models::{Constraint, Term, TermPeriod};
//! use course_plan::planner::Planner;
//! # use course_plan::catalog::Catalog;
//!
//! let mut planner = Planner::new(Catalog::default(), Vec::new());
//! planner.set_terms(vec![
//!     Term::new(TermPeriod::Autumn, "2012-2013"),
//!     Term::new(TermPeriod::Winter, "2012-2013"),
//! ]);
//! planner.set_constraint(Constraint::new(18, 5));
//! // planner.add_course("CS 229") once the catalog is loaded
//! assert_eq!(planner.schedules().len(), 1);
//! ```

mod program;
mod schedule_list;
mod session;

pub use program::{Program, Specialization};
pub use schedule_list::{ScheduleList, SearchLimits};
pub use session::{Planner, PlannerState, RepeatEntry, SIGNIFICANT_IMPLEMENTATION_COURSE_IDS};
