//! Application state and initialization
//!
//! This module opens the record store under a data directory and wires
//! every service to it. All services are reachable through AppState.

use crate::config::DATABASE_FILE_NAME;
use crate::database::{create_pool, FolderRemoval, Repository};
use crate::error::Result;
use crate::services::{
    BoardService, FoldersService, PendingFolderDeletion, PreferencesService, TasksService,
};
use std::path::{Path, PathBuf};

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub folders: FoldersService,
    pub tasks: TasksService,
    pub board: BoardService,
    pub preferences: PreferencesService,
}

impl AppState {
    /// Open (creating if needed) the store under `data_dir`
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tracing::info!("Initializing application in {:?}", data_dir);

        std::fs::create_dir_all(&data_dir)?;

        let pool = create_pool(&data_dir.join(DATABASE_FILE_NAME)).await?;
        let repo = Repository::new(pool);

        let state = Self {
            data_dir,
            folders: FoldersService::new(repo.clone()),
            tasks: TasksService::new(repo.clone()),
            board: BoardService::new(repo.clone()),
            preferences: PreferencesService::new(repo),
        };

        tracing::info!("Application initialized successfully");

        Ok(state)
    }

    /// Confirm a folder deletion and drop any saved view pointing at it
    pub async fn delete_folder(&self, pending: PendingFolderDeletion) -> Result<Option<FolderRemoval>> {
        let folder_id = pending.id().to_string();
        let removal = self.folders.confirm_delete(pending).await?;
        self.preferences.forget_folder(&folder_id).await?;
        Ok(removal)
    }
}
