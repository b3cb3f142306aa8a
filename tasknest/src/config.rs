//! Application configuration constants
//!
//! Central location for thresholds, storage names and preference keys
//! used throughout the board core.

// ===== Priority Thresholds =====

/// Tasks with fewer remaining days than this are high priority
/// (overdue tasks included).
pub const HIGH_PRIORITY_BELOW_DAYS: i64 = 3;

/// Tasks with at most this many remaining days (and not high) are medium
/// priority. Anything further out, or without a deadline, is low.
pub const MEDIUM_PRIORITY_MAX_DAYS: i64 = 7;

// ===== Dashboard =====

/// Open tasks due within this many days (or overdue) appear on the dashboard
pub const DASHBOARD_MAX_DAYS_REMAINING: i64 = 2;

// ===== Storage =====

/// SQLite database file created inside the data directory
pub const DATABASE_FILE_NAME: &str = "tasknest.db";

/// Accepted deadline text format (matches an HTML date input)
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

// ===== UI Preferences =====

/// Preference key holding the last selected folder id or the dashboard sentinel
pub const LAST_VIEW_KEY: &str = "tasknest_last_folder";

/// Preference key holding the colour theme
pub const THEME_KEY: &str = "theme";

/// Stored in place of a folder id when the dashboard was the last view
pub const DASHBOARD_SENTINEL: &str = "dashboard";
