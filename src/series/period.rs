//! Observation periods
//!
//! BIE reports observation dates as period strings whose precision depends on
//! the series frequency (`2023`, `2023/01`, `2023/01/15`). [`Period`] parses
//! those into an orderable value and [`DateRange`] filters on them.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::error::SeriesError;

fn period_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})(?:[/-]?(\d{2})(?:[/-]?(\d{2}))?)?$").expect("valid period pattern")
    })
}

/// How much of a period is specified
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Year,
    Month,
    Day,
}

/// A parsed observation period.
///
/// Ordering is chronological; a coarser period sorts before its own
/// sub-periods (`2023` < `2023/01` < `2023/01/15`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn month(year: i32, month: u32) -> Result<Self, SeriesError> {
        if !(1..=12).contains(&month) {
            return Err(SeriesError::InvalidPeriod(format!("{year}/{month:02}")));
        }
        Ok(Self {
            year,
            month: Some(month),
            day: None,
        })
    }

    pub fn day(year: i32, month: u32, day: u32) -> Result<Self, SeriesError> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(SeriesError::InvalidPeriod(format!(
                "{year}/{month:02}/{day:02}"
            )));
        }
        Ok(Self {
            year,
            month: Some(month),
            day: Some(day),
        })
    }

    /// Parse a BIE period or a user-supplied bound.
    ///
    /// Accepts `YYYY`, `YYYY/MM`, `YYYY-MM`, `YYYYMM`, `YYYY/MM/DD`,
    /// `YYYY-MM-DD` and `YYYYMMDD`.
    pub fn parse(input: &str) -> Result<Self, SeriesError> {
        let trimmed = input.trim();
        let invalid = || SeriesError::InvalidPeriod(trimmed.to_string());

        let caps = period_pattern().captures(trimmed).ok_or_else(invalid)?;
        let number = |idx: usize| caps.get(idx).map(|m| m.as_str().parse::<u32>());

        let year = caps[1].parse::<i32>().map_err(|_| invalid())?;
        match (number(2), number(3)) {
            (None, _) => Ok(Self::year(year)),
            (Some(Ok(month)), None) => Self::month(year, month).map_err(|_| invalid()),
            (Some(Ok(month)), Some(Ok(day))) => Self::day(year, month, day).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    pub fn precision(&self) -> Precision {
        match (self.month, self.day) {
            (None, _) => Precision::Year,
            (Some(_), None) => Precision::Month,
            (Some(_), Some(_)) => Precision::Day,
        }
    }

    /// Drop the components finer than `precision`.
    pub fn truncate(&self, precision: Precision) -> Self {
        match precision {
            Precision::Year => Self::year(self.year),
            Precision::Month => Self {
                year: self.year,
                month: self.month,
                day: None,
            },
            Precision::Day => *self,
        }
    }

    fn key(&self) -> (i32, u32, u32) {
        (self.year, self.month.unwrap_or(0), self.day.unwrap_or(0))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.day) {
            (None, _) => write!(f, "{:04}", self.year),
            (Some(m), None) => write!(f, "{:04}/{:02}", self.year, m),
            (Some(m), Some(d)) => write!(f, "{:04}/{:02}/{:02}", self.year, m, d),
        }
    }
}

impl FromStr for Period {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Inclusive period bounds.
///
/// Each bound is compared at its own precision, so `to = 2023/01` keeps
/// `2023/01/31` and `from = 2023` keeps `2023/01`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<Period>,
    pub to: Option<Period>,
}

impl DateRange {
    /// Build a range, rejecting bounds that can match nothing.
    ///
    /// Bounds of different precision are compared at the coarser one, so
    /// `2023/06..=2023` and `2023/01/15..=2023/01` are both valid.
    pub fn new(from: Option<Period>, to: Option<Period>) -> Result<Self, SeriesError> {
        if let (Some(f), Some(t)) = (from, to) {
            let common = f.precision().min(t.precision());
            if f.truncate(common) > t.truncate(common) {
                return Err(SeriesError::InvalidRange {
                    from: f.to_string(),
                    to: t.to_string(),
                });
            }
        }
        Ok(Self { from, to })
    }

    /// Range with no bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, period: &Period) -> bool {
        let after_start = self
            .from
            .map_or(true, |from| period.truncate(from.precision()) >= from);
        let before_end = self
            .to
            .map_or(true, |to| period.truncate(to.precision()) <= to);
        after_start && before_end
    }
}
