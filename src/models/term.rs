//! Academic calendar vocabulary: terms and weekdays.
//!
//! A term is one academic period (e.g. Autumn of the 2012-2013 year).
//! Terms order by year first and then by the period cycle
//! Autumn < Winter < Spring < Summer; the ordering is used for stable
//! display and iteration only.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A weekday on which courses can meet.
///
/// Serialized with the short tokens the catalog uses (`"Mon"` .. `"Fri"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    /// All five weekdays, in week order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// The catalog token for this weekday.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The period within an academic year.
///
/// The derived `Ord` follows the display cycle: Autumn comes first
/// within a year label, then Winter, Spring, Summer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermPeriod {
    Autumn,
    Winter,
    Spring,
    Summer,
}

impl TermPeriod {
    /// The catalog token for this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermPeriod::Autumn => "Autumn",
            TermPeriod::Winter => "Winter",
            TermPeriod::Spring => "Spring",
            TermPeriod::Summer => "Summer",
        }
    }
}

impl fmt::Display for TermPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An academic term: a period within a year label.
///
/// The year is a label (e.g. `"2012-2013"`), not a number; labels compare
/// lexicographically, which matches the academic-year convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Period within the academic year.
    pub period: TermPeriod,
    /// Academic year label (e.g. `"2012-2013"`).
    pub year: String,
}

impl Term {
    /// Creates a term.
    pub fn new(period: TermPeriod, year: impl Into<String>) -> Self {
        Self {
            period,
            year: year.into(),
        }
    }

    /// Stable unique identifier: period token followed by the year label
    /// (e.g. `"Autumn2012-2013"`).
    pub fn id(&self) -> String {
        format!("{}{}", self.period, self.year)
    }

    /// Parses a term id produced by [`Term::id`] back into a term.
    ///
    /// Returns `None` when the id starts with no known period token.
    pub fn parse_id(id: &str) -> Option<Term> {
        let period = [
            TermPeriod::Autumn,
            TermPeriod::Winter,
            TermPeriod::Spring,
            TermPeriod::Summer,
        ]
        .into_iter()
        .find(|p| id.starts_with(p.as_str()))?;
        let year = &id[period.as_str().len()..];
        if year.is_empty() {
            return None;
        }
        Some(Term::new(period, year))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.period.cmp(&other.period))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.period, self.year)
    }
}
