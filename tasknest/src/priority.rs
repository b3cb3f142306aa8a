//! Deadline urgency
//!
//! Pure functions mapping a deadline to a remaining-days count and a
//! priority tier. Nothing here touches the store or the clock except
//! [`today`], which the interaction layer uses to supply "today" to the
//! services.

use crate::config::{DEADLINE_FORMAT, HIGH_PRIORITY_BELOW_DAYS, MEDIUM_PRIORITY_MAX_DAYS};
use crate::error::{AppError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency tier derived from the remaining days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deadline together with the values derived from it.
///
/// Fields are private so a schedule can only be produced by
/// [`Schedule::compute`]; storing one therefore always writes the three
/// columns consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    deadline: Option<NaiveDate>,
    days_remaining: Option<i64>,
    priority: Priority,
}

impl Schedule {
    pub fn compute(deadline: Option<NaiveDate>, today: NaiveDate) -> Self {
        let days_remaining = days_remaining(deadline, today);
        Self {
            deadline,
            days_remaining,
            priority: priority(days_remaining),
        }
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn days_remaining(&self) -> Option<i64> {
        self.days_remaining
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// Whole calendar days from `today` to `deadline`.
///
/// `None` when there is no deadline. Negative values mean overdue.
/// Both sides are calendar dates, so the difference is already whole days.
pub fn days_remaining(deadline: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    deadline.map(|due| due.signed_duration_since(today).num_days())
}

/// Priority tier for a remaining-days count.
pub fn priority(days_remaining: Option<i64>) -> Priority {
    match days_remaining {
        None => Priority::Low,
        Some(days) if days < HIGH_PRIORITY_BELOW_DAYS => Priority::High,
        Some(days) if days <= MEDIUM_PRIORITY_MAX_DAYS => Priority::Medium,
        Some(_) => Priority::Low,
    }
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse deadline text as entered in a date field.
///
/// Blank input means "no deadline".
pub fn parse_deadline(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT)
        .map(Some)
        .map_err(|e| AppError::Validation(format!("Invalid deadline '{}': {}", trimmed, e)))
}

/// Human-facing description of how close a deadline is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DueLabel {
    Overdue(i64),
    Today,
    Tomorrow,
    InDays(i64),
}

impl DueLabel {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Overdue(-d),
            0 => Self::Today,
            1 => Self::Tomorrow,
            d => Self::InDays(d),
        }
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue(days) => write!(f, "Overdue by {} days", days),
            Self::Today => f.write_str("Due today"),
            Self::Tomorrow => f.write_str("Due tomorrow"),
            Self::InDays(days) => write!(f, "{} days left", days),
        }
    }
}
