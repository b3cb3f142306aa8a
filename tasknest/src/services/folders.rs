//! Folders service
//!
//! Sidebar folders: creation at the end of the list, renaming,
//! drag-and-drop reordering, and confirmed deletion that takes the
//! folder's tasks with it.

use crate::database::{Folder, FolderRemoval, Repository};
use crate::error::{AppError, Result};
use crate::ordering::{MoveIntent, Placement};
use serde::Serialize;

/// A folder deletion awaiting confirmation
#[derive(Debug, Clone, Serialize)]
pub struct PendingFolderDeletion {
    id: String,
    name: String,
    task_count: i64,
}

impl PendingFolderDeletion {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tasks that will be deleted along with the folder
    pub fn task_count(&self) -> i64 {
        self.task_count
    }
}

/// Service for managing folders
#[derive(Clone)]
pub struct FoldersService {
    repo: Repository,
}

impl FoldersService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a folder at the end of the sidebar
    pub async fn create_folder(&self, name: &str) -> Result<Folder> {
        let name = validate_name(name)?;
        tracing::info!("Creating folder: {}", name);

        let folder = self.repo.create_folder(&name).await?;

        tracing::info!("Folder created: {}", folder.id);
        Ok(folder)
    }

    /// Get a folder by ID
    pub async fn get_folder(&self, id: &str) -> Result<Option<Folder>> {
        self.repo.get_folder(id).await
    }

    /// List all folders in sidebar order
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        self.repo.list_folders().await
    }

    /// Rename a folder. Returns `None` if it no longer exists.
    pub async fn rename_folder(&self, id: &str, name: &str) -> Result<Option<Folder>> {
        let name = validate_name(name)?;
        tracing::info!("Renaming folder {} to {}", id, name);

        let folder = self.repo.rename_folder(id, &name).await?;
        if folder.is_none() {
            tracing::warn!("Ignoring rename of vanished folder: {}", id);
        }

        Ok(folder)
    }

    /// Move a folder within the sidebar.
    ///
    /// Returns the writes that were applied; empty for a no-op or when
    /// either folder no longer exists.
    pub async fn move_folder(&self, intent: &MoveIntent<()>) -> Result<Vec<Placement<()>>> {
        let writes = match self.repo.move_folder(intent).await {
            Ok(writes) => writes,
            Err(e) => {
                tracing::error!("Move of folder {} failed: {}", intent.item, e);
                return Err(e);
            }
        };

        if writes.is_empty() {
            tracing::debug!("Move of folder {} changes nothing", intent.item);
        } else {
            tracing::info!("Moved folder {} ({} positions rewritten)", intent.item, writes.len());
        }

        Ok(writes)
    }

    /// First step of deletion: describe what would be removed.
    ///
    /// Returns `None` if the folder no longer exists.
    pub async fn request_delete(&self, id: &str) -> Result<Option<PendingFolderDeletion>> {
        let Some(folder) = self.repo.get_folder(id).await? else {
            return Ok(None);
        };
        let task_count = self.repo.count_tasks_in_folder(id).await?;

        Ok(Some(PendingFolderDeletion {
            id: folder.id,
            name: folder.name,
            task_count,
        }))
    }

    /// Second step of deletion: remove the folder and all of its tasks
    /// together. Returns `None` if the folder was already gone.
    pub async fn confirm_delete(&self, pending: PendingFolderDeletion) -> Result<Option<FolderRemoval>> {
        tracing::info!("Deleting folder: {} ({})", pending.name, pending.id);

        let removal = match self.repo.delete_folder_cascade(&pending.id).await {
            Ok(removal) => removal,
            Err(e) => {
                tracing::error!("Deleting folder {} failed: {}", pending.id, e);
                return Err(e);
            }
        };

        match &removal {
            Some(r) => tracing::info!(
                "Folder deleted: {} ({} tasks removed)",
                pending.id,
                r.tasks_removed
            ),
            None => tracing::warn!("Folder already deleted: {}", pending.id),
        }

        Ok(removal)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Folder name cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
