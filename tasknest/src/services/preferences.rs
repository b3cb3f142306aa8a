//! Preferences service
//!
//! Small key-value preferences kept in the settings table: the last
//! opened view and the colour theme.

use crate::config::{DASHBOARD_SENTINEL, LAST_VIEW_KEY, THEME_KEY};
use crate::database::{Folder, Repository};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// What the main area shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "folder_id", rename_all = "lowercase")]
pub enum ViewSelection {
    Dashboard,
    Folder(String),
}

impl ViewSelection {
    fn to_stored(&self) -> &str {
        match self {
            ViewSelection::Dashboard => DASHBOARD_SENTINEL,
            ViewSelection::Folder(id) => id,
        }
    }

    fn from_stored(value: String) -> Self {
        if value == DASHBOARD_SENTINEL {
            ViewSelection::Dashboard
        } else {
            ViewSelection::Folder(value)
        }
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Service for reading and writing preferences
#[derive(Clone)]
pub struct PreferencesService {
    repo: Repository,
}

impl PreferencesService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Get a raw preference value
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.repo.get_setting(key).await
    }

    /// Set a raw preference value
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!("Setting preference {} = {}", key, value);
        self.repo.set_setting(key, value).await
    }

    /// The saved view, without checking that its folder still exists
    pub async fn last_view(&self) -> Result<Option<ViewSelection>> {
        Ok(self.get(LAST_VIEW_KEY).await?.map(ViewSelection::from_stored))
    }

    pub async fn set_last_view(&self, view: &ViewSelection) -> Result<()> {
        self.set(LAST_VIEW_KEY, view.to_stored()).await
    }

    pub async fn clear_last_view(&self) -> Result<()> {
        self.repo.delete_setting(LAST_VIEW_KEY).await
    }

    /// Choose the view to show at startup.
    ///
    /// With no folders nothing is selected, whatever was saved. Otherwise
    /// a saved dashboard or a saved folder that still exists wins, and
    /// anything else falls back to the dashboard.
    pub async fn restore_view(&self, folders: &[Folder]) -> Result<Option<ViewSelection>> {
        if folders.is_empty() {
            return Ok(None);
        }

        let restored = match self.last_view().await? {
            Some(ViewSelection::Folder(id)) if folders.iter().any(|f| f.id == id) => {
                ViewSelection::Folder(id)
            }
            Some(ViewSelection::Folder(id)) => {
                tracing::debug!("Saved folder {} no longer exists", id);
                ViewSelection::Dashboard
            }
            Some(ViewSelection::Dashboard) | None => ViewSelection::Dashboard,
        };

        Ok(Some(restored))
    }

    /// Drop the saved view if it points at `folder_id`
    pub async fn forget_folder(&self, folder_id: &str) -> Result<()> {
        if self.last_view().await? == Some(ViewSelection::Folder(folder_id.to_string())) {
            tracing::info!("Clearing saved view of deleted folder {}", folder_id);
            self.clear_last_view().await?;
        }
        Ok(())
    }

    pub async fn theme(&self) -> Result<Theme> {
        let Some(value) = self.get(THEME_KEY).await? else {
            return Ok(Theme::default());
        };

        Ok(Theme::parse(&value).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using light", value);
            Theme::default()
        }))
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.set(THEME_KEY, theme.as_str()).await
    }

    /// Flip between light and dark, returning the new theme
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().await?.toggle();
        self.set_theme(theme).await?;
        Ok(theme)
    }
}
