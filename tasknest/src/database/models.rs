//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to frontend.

use crate::priority::{Priority, Schedule};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Board column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Columns in board order
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::Doing, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sidebar folder owning one board
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Position in the sidebar, contiguous across all folders
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

/// A task card on a folder's board
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    pub folder_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub deadline: Option<NaiveDate>,
    /// Cached at the last deadline write; projections recompute it
    pub days_remaining: Option<i64>,
    /// Cached at the last deadline write; projections recompute it
    pub priority: Priority,
    /// Position within the (folder, status) column
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create task request
#[derive(Debug)]
pub struct CreateTaskRequest {
    pub folder_id: String,
    pub title: String,
    pub schedule: Schedule,
}

/// Update task request
///
/// A schedule replaces the deadline and both derived columns in the
/// same statement.
#[derive(Debug)]
pub struct UpdateTaskRequest {
    pub id: String,
    pub title: Option<String>,
    pub schedule: Option<Schedule>,
}
