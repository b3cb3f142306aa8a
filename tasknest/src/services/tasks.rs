//! Tasks service
//!
//! Owns task lifecycle on a folder's board: creation at the end of the
//! todo column, edits that keep the derived urgency in step with the
//! deadline, drag-and-drop moves, and confirmed deletion.
//!
//! Operations on a task that has vanished since the caller's last read
//! are silent no-ops.

use crate::database::{CreateTaskRequest, Repository, Task, TaskStatus, UpdateTaskRequest};
use crate::error::{AppError, Result};
use crate::ordering::{DropTarget, MoveIntent, Placement};
use crate::priority::Schedule;
use chrono::NaiveDate;
use serde::Serialize;

impl MoveIntent<TaskStatus> {
    /// Decode a drop reported by the interaction layer.
    ///
    /// Column containers are identified by their status name; any other
    /// id is taken to be a task.
    pub fn from_drop(active_id: &str, over_id: &str) -> Self {
        let target = match over_id.parse::<TaskStatus>() {
            Ok(status) => DropTarget::Group(status),
            Err(_) => DropTarget::Item(over_id.to_string()),
        };

        Self {
            item: active_id.to_string(),
            target,
        }
    }
}

/// Changes requested by the task editor
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    /// `Some(None)` clears the deadline
    pub deadline: Option<Option<NaiveDate>>,
}

/// A task deletion awaiting confirmation
#[derive(Debug, Clone, Serialize)]
pub struct PendingTaskDeletion {
    id: String,
    title: String,
}

impl PendingTaskDeletion {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Service for managing tasks
#[derive(Clone)]
pub struct TasksService {
    repo: Repository,
}

impl TasksService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a task at the end of the folder's todo column
    pub async fn create_task(
        &self,
        folder_id: &str,
        title: &str,
        deadline: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Task> {
        let title = validate_title(title)?;
        tracing::info!("Creating task in folder {}: {}", folder_id, title);

        let req = CreateTaskRequest {
            folder_id: folder_id.to_string(),
            title,
            schedule: Schedule::compute(deadline, today),
        };

        let task = self.repo.create_task(req).await?;

        tracing::info!("Task created successfully: {}", task.id);
        Ok(task)
    }

    /// Get a task by ID
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        self.repo.get_task(id).await
    }

    /// Apply an edit. A deadline change rewrites the deadline, remaining
    /// days and priority together.
    ///
    /// Returns `None` if the task no longer exists.
    pub async fn update_task(&self, id: &str, edit: TaskEdit, today: NaiveDate) -> Result<Option<Task>> {
        let title = edit.title.as_deref().map(validate_title).transpose()?;
        let schedule = edit.deadline.map(|deadline| Schedule::compute(deadline, today));

        if title.is_none() && schedule.is_none() {
            return self.repo.get_task(id).await;
        }

        tracing::debug!("Updating task: {}", id);

        let req = UpdateTaskRequest {
            id: id.to_string(),
            title,
            schedule,
        };

        let task = self.repo.update_task(req).await?;
        if task.is_none() {
            tracing::warn!("Ignoring edit of vanished task: {}", id);
        }

        Ok(task)
    }

    /// Move a task on its board.
    ///
    /// The folder's positions are read, the move planned and every changed
    /// position written in one transaction. Returns the writes that were
    /// applied; empty when the move was a no-op or referenced a task that
    /// no longer exists.
    pub async fn move_task(&self, intent: &MoveIntent<TaskStatus>) -> Result<Vec<Placement<TaskStatus>>> {
        let writes = match self.repo.move_task(intent).await {
            Ok(Some(writes)) => writes,
            Ok(None) => {
                tracing::warn!("Ignoring move of vanished task: {}", intent.item);
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("Move of task {} failed: {}", intent.item, e);
                return Err(e);
            }
        };

        if writes.is_empty() {
            tracing::debug!("Move of task {} changes nothing", intent.item);
        } else {
            tracing::info!("Moved task {} ({} positions rewritten)", intent.item, writes.len());
        }

        Ok(writes)
    }

    /// First step of deletion: describe what would be removed.
    ///
    /// Returns `None` if the task no longer exists.
    pub async fn request_delete(&self, id: &str) -> Result<Option<PendingTaskDeletion>> {
        let pending = self.repo.get_task(id).await?.map(|task| PendingTaskDeletion {
            id: task.id,
            title: task.title,
        });

        Ok(pending)
    }

    /// Second step of deletion: remove the task and close the gap in its
    /// column. Returns the removed task, or `None` if it was already gone.
    pub async fn confirm_delete(&self, pending: PendingTaskDeletion) -> Result<Option<Task>> {
        tracing::info!("Deleting task: {}", pending.id);

        let removed = self.repo.delete_task(&pending.id).await?;

        match &removed {
            Some(_) => tracing::info!("Task deleted successfully: {}", pending.id),
            None => tracing::warn!("Task already deleted: {}", pending.id),
        }

        Ok(removed)
    }
}

fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Task title cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
