//! TaskNest library
//!
//! Ordering engine and local store for a folder-based kanban board:
//! priority from deadlines, contiguous drag-and-drop ordering, and the
//! services that persist tasks, folders and preferences.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod ordering;
pub mod priority;
pub mod services;

pub use app::AppState;
pub use error::{AppError, Result};
