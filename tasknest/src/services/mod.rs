//! Services module
//!
//! Business logic services that coordinate between callers and the repository.

pub mod board;
pub mod folders;
pub mod preferences;
pub mod tasks;

pub use board::{Board, BoardService, DashboardEntry, TaskCard};
pub use folders::{FoldersService, PendingFolderDeletion};
pub use preferences::{PreferencesService, Theme, ViewSelection};
pub use tasks::{PendingTaskDeletion, TaskEdit, TasksService};
