//! Board service
//!
//! Read-only views over the task records: the three-column board of one
//! folder and the cross-folder dashboard of urgent work.
//!
//! Remaining days and priority are recomputed from the deadline on every
//! read, so a card's urgency advances as days pass even when the task
//! itself is never edited.

use crate::config::DASHBOARD_MAX_DAYS_REMAINING;
use crate::database::{Folder, Repository, Task, TaskStatus};
use crate::error::Result;
use crate::priority::{DueLabel, Schedule};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// A task as displayed, with urgency computed for the viewing day
#[derive(Debug, Clone, Serialize)]
pub struct TaskCard {
    #[serde(flatten)]
    pub task: Task,
    pub due: Option<DueLabel>,
}

impl TaskCard {
    pub fn project(mut task: Task, today: NaiveDate) -> Self {
        let schedule = Schedule::compute(task.deadline, today);
        task.days_remaining = schedule.days_remaining();
        task.priority = schedule.priority();

        Self {
            due: task.days_remaining.map(DueLabel::from_days),
            task,
        }
    }
}

/// One folder's tasks split into columns, each sorted by position
#[derive(Debug, Clone, Default, Serialize)]
pub struct Board {
    pub todo: Vec<TaskCard>,
    pub doing: Vec<TaskCard>,
    pub done: Vec<TaskCard>,
}

impl Board {
    pub fn column(&self, status: TaskStatus) -> &[TaskCard] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<TaskCard> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::Done => &mut self.done,
        }
    }
}

/// An urgent task on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardEntry {
    #[serde(flatten)]
    pub card: TaskCard,
    /// Name of the owning folder, if it could be resolved
    pub folder_name: Option<String>,
}

/// Partition one folder's tasks into board columns.
pub fn project_board(tasks: Vec<Task>, today: NaiveDate) -> Board {
    let mut board = Board::default();

    for task in tasks {
        let status = task.status;
        board.column_mut(status).push(TaskCard::project(task, today));
    }

    for status in TaskStatus::ALL {
        board.column_mut(status).sort_by_key(|card| card.task.sort_order);
    }

    board
}

/// Open tasks that are overdue or due within the dashboard window,
/// most urgent first.
pub fn urgent_tasks(tasks: Vec<Task>, folders: &[Folder], today: NaiveDate) -> Vec<DashboardEntry> {
    let folder_names: HashMap<&str, &str> = folders
        .iter()
        .map(|f| (f.id.as_str(), f.name.as_str()))
        .collect();

    let mut entries: Vec<DashboardEntry> = tasks
        .into_iter()
        .filter(|task| task.status != TaskStatus::Done)
        .map(|task| TaskCard::project(task, today))
        .filter(|card| {
            card.task
                .days_remaining
                .is_some_and(|days| days <= DASHBOARD_MAX_DAYS_REMAINING)
        })
        .map(|card| DashboardEntry {
            folder_name: folder_names
                .get(card.task.folder_id.as_str())
                .map(|name| name.to_string()),
            card,
        })
        .collect();

    entries.sort_by_key(|entry| entry.card.task.days_remaining);
    entries
}

/// Service producing board and dashboard views
#[derive(Clone)]
pub struct BoardService {
    repo: Repository,
}

impl BoardService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// The board of one folder as of `today`
    pub async fn board(&self, folder_id: &str, today: NaiveDate) -> Result<Board> {
        let tasks = self.repo.list_tasks_in_folder(folder_id).await?;
        Ok(project_board(tasks, today))
    }

    /// Urgent open tasks across every folder as of `today`
    pub async fn dashboard(&self, today: NaiveDate) -> Result<Vec<DashboardEntry>> {
        let tasks = self.repo.list_tasks().await?;
        let folders = self.repo.list_folders().await?;
        Ok(urgent_tasks(tasks, &folders, today))
    }
}
