//! Repository layer for database operations
//!
//! This module provides CRUD operations for folders, tasks and settings.
//! Any write touching more than one record runs in a single transaction:
//! an order batch or a cascading delete either lands in full or not at all.

use super::models::*;
use crate::error::{AppError, Result};
use crate::ordering::{self, MoveIntent, Placement};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

/// Result of removing a folder together with its tasks
#[derive(Debug, Clone)]
pub struct FolderRemoval {
    pub folder: Folder,
    pub tasks_removed: u64,
}

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Folders =====

    /// Create a folder at the end of the sidebar
    pub async fn create_folder(&self, name: &str) -> Result<Folder> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let existing: Vec<(String, i64)> = sqlx::query_as("SELECT id, sort_order FROM folders")
            .fetch_all(&mut *tx)
            .await?;
        let existing: Vec<Placement<()>> = existing
            .into_iter()
            .map(|(id, order)| Placement::new(id, (), order))
            .collect();
        let sort_order = ordering::next_order(&existing, ());

        let folder = sqlx::query_as::<_, Folder>(
            r#"
            INSERT INTO folders (id, name, sort_order, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(sort_order)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Created folder: {} at position {}", id, sort_order);
        Ok(folder)
    }

    /// Get a folder by ID
    pub async fn get_folder(&self, id: &str) -> Result<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(folder)
    }

    /// List all folders in sidebar order
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            r#"
            SELECT * FROM folders
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(folders)
    }

    /// Rename a folder. Returns `None` if it no longer exists.
    pub async fn rename_folder(&self, id: &str, name: &str) -> Result<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>(
            r#"
            UPDATE folders SET name = ? WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if folder.is_some() {
            tracing::debug!("Renamed folder: {}", id);
        }
        Ok(folder)
    }

    /// Current sidebar positions of every folder
    pub async fn folder_placements(&self) -> Result<Vec<Placement<()>>> {
        let mut conn = self.pool.acquire().await?;
        read_folder_placements(&mut conn).await
    }

    /// Move a folder within the sidebar.
    ///
    /// The snapshot is read, the move planned and every changed position
    /// written inside one transaction, so overlapping moves cannot plan
    /// against the same stale snapshot. Returns the applied writes; empty
    /// for a no-op or a move naming a folder that no longer exists.
    pub async fn move_folder(&self, intent: &MoveIntent<()>) -> Result<Vec<Placement<()>>> {
        let mut tx = self.pool.begin().await?;

        let snapshot = read_folder_placements(&mut tx).await?;
        let writes = ordering::plan_move(&snapshot, intent);
        if writes.is_empty() {
            return Ok(writes);
        }

        write_folder_order(&mut tx, &writes).await?;
        commit_batch(tx, &writes).await?;

        tracing::debug!("Applied {} folder order writes", writes.len());
        Ok(writes)
    }

    /// Count the tasks owned by a folder
    pub async fn count_tasks_in_folder(&self, folder_id: &str) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE folder_id = ?")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Delete a folder and every task it owns, then close the gap it
    /// leaves in the sidebar order.
    ///
    /// Returns `None` if the folder no longer exists. Any failure rolls
    /// back the whole removal and is reported as [`AppError::CascadeDelete`].
    pub async fn delete_folder_cascade(&self, id: &str) -> Result<Option<FolderRemoval>> {
        let cascade = |e: sqlx::Error| AppError::CascadeDelete {
            id: id.to_string(),
            reason: e.to_string(),
        };

        let mut tx = self.pool.begin().await.map_err(cascade)?;

        let Some(folder) = sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(cascade)?
        else {
            return Ok(None);
        };

        let tasks_removed = sqlx::query("DELETE FROM tasks WHERE folder_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(cascade)?
            .rows_affected();

        sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(cascade)?;

        let remaining: Vec<(String, i64)> =
            sqlx::query_as("SELECT id, sort_order FROM folders ORDER BY sort_order ASC, created_at ASC")
                .fetch_all(&mut *tx)
                .await
                .map_err(cascade)?;
        let remaining: Vec<Placement<()>> = remaining
            .into_iter()
            .map(|(id, order)| Placement::new(id, (), order))
            .collect();

        for write in ordering::compact(&remaining, ()) {
            sqlx::query("UPDATE folders SET sort_order = ? WHERE id = ?")
                .bind(write.order)
                .bind(&write.id)
                .execute(&mut *tx)
                .await
                .map_err(cascade)?;
        }

        tx.commit().await.map_err(cascade)?;

        tracing::debug!("Deleted folder: {} with {} tasks", id, tasks_removed);
        Ok(Some(FolderRemoval {
            folder,
            tasks_removed,
        }))
    }

    // ===== Tasks =====

    /// Create a task at the end of its folder's todo column
    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<Task> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let folder_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE id = ?")
            .bind(&req.folder_id)
            .fetch_one(&mut *tx)
            .await?;

        if folder_count == 0 {
            return Err(AppError::FolderNotFound(req.folder_id));
        }

        let column: Vec<(String, i64)> =
            sqlx::query_as("SELECT id, sort_order FROM tasks WHERE folder_id = ? AND status = ?")
                .bind(&req.folder_id)
                .bind(TaskStatus::Todo)
                .fetch_all(&mut *tx)
                .await?;
        let column: Vec<Placement<TaskStatus>> = column
            .into_iter()
            .map(|(id, order)| Placement::new(id, TaskStatus::Todo, order))
            .collect();
        let sort_order = ordering::next_order(&column, TaskStatus::Todo);

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, folder_id, title, status, deadline, days_remaining,
                               priority, sort_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&req.folder_id)
        .bind(&req.title)
        .bind(TaskStatus::Todo)
        .bind(req.schedule.deadline())
        .bind(req.schedule.days_remaining())
        .bind(req.schedule.priority())
        .bind(sort_order)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Created task: {} in folder: {}", id, req.folder_id);
        Ok(task)
    }

    /// Get a task by ID
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    /// List the tasks of one folder by column position
    pub async fn list_tasks_in_folder(&self, folder_id: &str) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE folder_id = ?
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// List every task across all folders
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Update a task's title and/or schedule. Returns `None` if the task
    /// no longer exists.
    pub async fn update_task(&self, req: UpdateTaskRequest) -> Result<Option<Task>> {
        let now = Utc::now();

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE tasks SET updated_at = ");
        query.push_bind(now);

        if let Some(title) = &req.title {
            query.push(", title = ").push_bind(title);
        }

        if let Some(schedule) = &req.schedule {
            query.push(", deadline = ").push_bind(schedule.deadline());
            query.push(", days_remaining = ").push_bind(schedule.days_remaining());
            query.push(", priority = ").push_bind(schedule.priority());
        }

        query.push(" WHERE id = ").push_bind(&req.id);
        query.push(" RETURNING *");

        let task = query
            .build_query_as::<Task>()
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!("Updated task: {}", req.id);
        Ok(task)
    }

    /// Current column positions of every task in a folder
    pub async fn task_placements(&self, folder_id: &str) -> Result<Vec<Placement<TaskStatus>>> {
        let mut conn = self.pool.acquire().await?;
        read_task_placements(&mut conn, folder_id).await
    }

    /// Move a task on its folder's board.
    ///
    /// Reads the folder's snapshot, plans the move and writes every
    /// changed position inside one transaction. Returns `None` if the
    /// moved task no longer exists, otherwise the applied writes (empty
    /// for a no-op or a drop onto a vanished task).
    pub async fn move_task(
        &self,
        intent: &MoveIntent<TaskStatus>,
    ) -> Result<Option<Vec<Placement<TaskStatus>>>> {
        let mut tx = self.pool.begin().await?;

        let folder_id: Option<String> = sqlx::query_scalar("SELECT folder_id FROM tasks WHERE id = ?")
            .bind(&intent.item)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(folder_id) = folder_id else {
            return Ok(None);
        };

        let snapshot = read_task_placements(&mut tx, &folder_id).await?;
        let writes = ordering::plan_move(&snapshot, intent);
        if writes.is_empty() {
            return Ok(Some(writes));
        }

        write_task_order(&mut tx, &writes).await?;
        commit_batch(tx, &writes).await?;

        tracing::debug!("Applied {} task order writes", writes.len());
        Ok(Some(writes))
    }

    /// Write a batch of task positions atomically.
    ///
    /// Writes are issued in the given order. If any record is missing or
    /// any statement fails, nothing is committed and
    /// [`AppError::BatchWrite`] is returned.
    pub async fn apply_task_order(&self, writes: &[Placement<TaskStatus>]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        write_task_order(&mut tx, writes).await?;
        commit_batch(tx, writes).await?;

        tracing::debug!("Applied {} task order writes", writes.len());
        Ok(())
    }

    /// Delete a task and close the gap it leaves in its column.
    ///
    /// Returns the removed task, or `None` if it no longer exists.
    pub async fn delete_task(&self, id: &str) -> Result<Option<Task>> {
        let mut tx = self.pool.begin().await?;

        let Some(task) = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let siblings: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT id, sort_order FROM tasks
            WHERE folder_id = ? AND status = ?
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(&task.folder_id)
        .bind(task.status)
        .fetch_all(&mut *tx)
        .await?;
        let siblings: Vec<Placement<TaskStatus>> = siblings
            .into_iter()
            .map(|(id, order)| Placement::new(id, task.status, order))
            .collect();

        for write in ordering::compact(&siblings, task.status) {
            sqlx::query("UPDATE tasks SET sort_order = ? WHERE id = ?")
                .bind(write.order)
                .bind(&write.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!("Deleted task: {}", id);
        Ok(Some(task))
    }

    // ===== Settings =====

    /// Get/set settings
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Set setting: {} = {}", key, value);
        Ok(())
    }

    pub async fn delete_setting(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted setting: {}", key);
        Ok(())
    }
}

async fn read_folder_placements(conn: &mut SqliteConnection) -> Result<Vec<Placement<()>>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT id, sort_order FROM folders ORDER BY sort_order ASC, created_at ASC",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, order)| Placement::new(id, (), order))
        .collect())
}

async fn read_task_placements(
    conn: &mut SqliteConnection,
    folder_id: &str,
) -> Result<Vec<Placement<TaskStatus>>> {
    let rows: Vec<(String, TaskStatus, i64)> = sqlx::query_as(
        r#"
        SELECT id, status, sort_order FROM tasks
        WHERE folder_id = ?
        ORDER BY sort_order ASC, created_at ASC
        "#,
    )
    .bind(folder_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, status, order)| Placement::new(id, status, order))
        .collect())
}

async fn write_folder_order(conn: &mut SqliteConnection, writes: &[Placement<()>]) -> Result<()> {
    for write in writes {
        let rows = sqlx::query("UPDATE folders SET sort_order = ? WHERE id = ?")
            .bind(write.order)
            .bind(&write.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| batch_error(&write.id, e.to_string()))?
            .rows_affected();

        if rows != 1 {
            return Err(batch_error(&write.id, "folder no longer exists"));
        }
    }

    Ok(())
}

async fn write_task_order(conn: &mut SqliteConnection, writes: &[Placement<TaskStatus>]) -> Result<()> {
    let now = Utc::now();

    for write in writes {
        let rows = sqlx::query(
            "UPDATE tasks SET status = ?, sort_order = ?, updated_at = ? WHERE id = ?",
        )
        .bind(write.group)
        .bind(write.order)
        .bind(now)
        .bind(&write.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| batch_error(&write.id, e.to_string()))?
        .rows_affected();

        if rows != 1 {
            return Err(batch_error(&write.id, "task no longer exists"));
        }
    }

    Ok(())
}

async fn commit_batch<G>(tx: Transaction<'_, Sqlite>, writes: &[Placement<G>]) -> Result<()> {
    tx.commit()
        .await
        .map_err(|e| batch_error(writes.first().map_or("", |w| w.id.as_str()), e.to_string()))
}

fn batch_error(id: &str, reason: impl Into<String>) -> AppError {
    AppError::BatchWrite {
        id: id.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::priority::{Priority, Schedule};
    use chrono::NaiveDate;

    async fn create_test_repo() -> Repository {
        Repository::new(memory_pool().await)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    async fn add_task(repo: &Repository, folder_id: &str, title: &str) -> Task {
        repo.create_task(CreateTaskRequest {
            folder_id: folder_id.to_string(),
            title: title.to_string(),
            schedule: Schedule::compute(None, today()),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_folders_append_in_order() {
        let repo = create_test_repo().await;

        let work = repo.create_folder("Work").await.unwrap();
        let home = repo.create_folder("Home").await.unwrap();

        assert_eq!(work.sort_order, 0);
        assert_eq!(home.sort_order, 1);

        let folders = repo.list_folders().await.unwrap();
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Home"]);
    }

    #[tokio::test]
    async fn test_rename_missing_folder() {
        let repo = create_test_repo().await;

        let renamed = repo.rename_folder("missing", "Nope").await.unwrap();
        assert!(renamed.is_none());
    }

    #[tokio::test]
    async fn test_create_task_appends_to_todo() {
        let repo = create_test_repo().await;
        let folder = repo.create_folder("Work").await.unwrap();

        let first = add_task(&repo, &folder.id, "First").await;
        let second = add_task(&repo, &folder.id, "Second").await;

        assert_eq!(first.status, TaskStatus::Todo);
        assert_eq!(first.sort_order, 0);
        assert_eq!(second.sort_order, 1);
        assert_eq!(first.priority, Priority::Low);
    }

    #[tokio::test]
    async fn test_create_task_in_missing_folder() {
        let repo = create_test_repo().await;

        let result = repo
            .create_task(CreateTaskRequest {
                folder_id: "missing".to_string(),
                title: "Orphan".to_string(),
                schedule: Schedule::compute(None, today()),
            })
            .await;

        assert!(matches!(result, Err(AppError::FolderNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_schedule_writes_all_derived_columns() {
        let repo = create_test_repo().await;
        let folder = repo.create_folder("Work").await.unwrap();
        let task = add_task(&repo, &folder.id, "Report").await;

        let deadline = NaiveDate::from_ymd_opt(2024, 3, 16);
        let updated = repo
            .update_task(UpdateTaskRequest {
                id: task.id.clone(),
                title: None,
                schedule: Some(Schedule::compute(deadline, today())),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Report");
        assert_eq!(updated.deadline, deadline);
        assert_eq!(updated.days_remaining, Some(1));
        assert_eq!(updated.priority, Priority::High);
    }

    #[tokio::test]
    async fn test_update_missing_task() {
        let repo = create_test_repo().await;

        let updated = repo
            .update_task(UpdateTaskRequest {
                id: "missing".to_string(),
                title: Some("New".to_string()),
                schedule: None,
            })
            .await
            .unwrap();

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_apply_task_order_rolls_back_on_missing_row() {
        let repo = create_test_repo().await;
        let folder = repo.create_folder("Work").await.unwrap();
        let a = add_task(&repo, &folder.id, "A").await;

        let writes = vec![
            Placement::new(a.id.clone(), TaskStatus::Doing, 0),
            Placement::new("vanished", TaskStatus::Doing, 1),
        ];
        let result = repo.apply_task_order(&writes).await;

        assert!(matches!(result, Err(AppError::BatchWrite { .. })));

        let unchanged = repo.get_task(&a.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, TaskStatus::Todo);
        assert_eq!(unchanged.sort_order, 0);
    }

    #[tokio::test]
    async fn test_move_task_reports_vanished_task() {
        let repo = create_test_repo().await;

        let outcome = repo
            .move_task(&MoveIntent::onto_group("missing", TaskStatus::Done))
            .await
            .unwrap();

        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_overlapping_moves_keep_columns_contiguous() {
        let repo = create_test_repo().await;
        let folder = repo.create_folder("Work").await.unwrap();
        let a = add_task(&repo, &folder.id, "A").await;
        let b = add_task(&repo, &folder.id, "B").await;
        add_task(&repo, &folder.id, "C").await;
        add_task(&repo, &folder.id, "D").await;

        let first = MoveIntent::onto_group(a.id.as_str(), TaskStatus::Doing);
        let second = MoveIntent::onto_group(b.id.as_str(), TaskStatus::Doing);
        let (left, right) = (repo.clone(), repo.clone());
        let (r1, r2) = tokio::join!(left.move_task(&first), right.move_task(&second));
        r1.unwrap().unwrap();
        r2.unwrap().unwrap();

        let placements = repo.task_placements(&folder.id).await.unwrap();
        for status in TaskStatus::ALL {
            let mut orders: Vec<i64> = placements
                .iter()
                .filter(|p| p.group == status)
                .map(|p| p.order)
                .collect();
            orders.sort_unstable();
            let expected: Vec<i64> = (0..orders.len() as i64).collect();
            assert_eq!(orders, expected, "column {} is not contiguous", status);
        }
    }

    #[tokio::test]
    async fn test_move_folder_in_one_transaction() {
        let repo = create_test_repo().await;
        let a = repo.create_folder("A").await.unwrap();
        let b = repo.create_folder("B").await.unwrap();
        let c = repo.create_folder("C").await.unwrap();

        let writes = repo
            .move_folder(&MoveIntent::onto_item(c.id.as_str(), a.id.as_str()))
            .await
            .unwrap();
        assert_eq!(writes.len(), 3);

        let placements = repo.folder_placements().await.unwrap();
        assert_eq!(
            placements,
            vec![
                Placement::new(c.id, (), 0),
                Placement::new(a.id, (), 1),
                Placement::new(b.id, (), 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_task_compacts_column() {
        let repo = create_test_repo().await;
        let folder = repo.create_folder("Work").await.unwrap();
        let a = add_task(&repo, &folder.id, "A").await;
        let b = add_task(&repo, &folder.id, "B").await;
        let c = add_task(&repo, &folder.id, "C").await;

        let removed = repo.delete_task(&b.id).await.unwrap();
        assert_eq!(removed.map(|t| t.id), Some(b.id));

        let placements = repo.task_placements(&folder.id).await.unwrap();
        assert_eq!(
            placements,
            vec![
                Placement::new(a.id, TaskStatus::Todo, 0),
                Placement::new(c.id, TaskStatus::Todo, 1),
            ]
        );

        assert!(repo.delete_task("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_folder_cascade() {
        let repo = create_test_repo().await;
        let work = repo.create_folder("Work").await.unwrap();
        let home = repo.create_folder("Home").await.unwrap();
        let garden = repo.create_folder("Garden").await.unwrap();
        add_task(&repo, &work.id, "Report").await;
        add_task(&repo, &work.id, "Slides").await;
        let kept = add_task(&repo, &home.id, "Laundry").await;

        let removal = repo.delete_folder_cascade(&work.id).await.unwrap().unwrap();
        assert_eq!(removal.tasks_removed, 2);
        assert_eq!(removal.folder.name, "Work");

        assert_eq!(repo.count_tasks_in_folder(&work.id).await.unwrap(), 0);
        assert!(repo.get_task(&kept.id).await.unwrap().is_some());

        let placements = repo.folder_placements().await.unwrap();
        assert_eq!(
            placements,
            vec![Placement::new(home.id, (), 0), Placement::new(garden.id, (), 1)]
        );

        assert!(repo.delete_folder_cascade(&work.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_settings() {
        let repo = create_test_repo().await;

        repo.set_setting("theme", "dark").await.unwrap();

        let value = repo.get_setting("theme").await.unwrap();
        assert_eq!(value, Some("dark".to_string()));

        repo.set_setting("theme", "light").await.unwrap();

        let updated = repo.get_setting("theme").await.unwrap();
        assert_eq!(updated, Some("light".to_string()));

        repo.delete_setting("theme").await.unwrap();
        assert_eq!(repo.get_setting("theme").await.unwrap(), None);
    }
}
