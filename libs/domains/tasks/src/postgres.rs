use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::TryStreamExt;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};
use std::future::Future;
use std::time::Duration;

use crate::{
    error::{TaskError, TaskResult},
    models::{Task, TaskInput},
    repository::TaskRepository,
};

/// Per-statement timeout for CRUD calls.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

const TASK_COLUMNS: &str = "id, title, description, priority, category, status, created_at";

/// PostgreSQL implementation of TaskRepository using raw SQL over the pool
///
/// Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
    query_timeout: Duration,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_timeout(db, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    /// Run one storage call under the statement timeout.
    async fn bounded<T, F>(&self, fut: F, on_error: fn(String) -> TaskError) -> TaskResult<T>
    where
        F: Future<Output = TaskResult<T>>,
    {
        bounded(self.query_timeout, fut, on_error).await
    }
}

/// Run a storage call under `timeout`.
///
/// An elapsed timeout becomes `on_error`, the same variant the call itself
/// reports on a database error.
pub(crate) async fn bounded<T, F>(
    timeout: Duration,
    fut: F,
    on_error: fn(String) -> TaskError,
) -> TaskResult<T>
where
    F: Future<Output = TaskResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_error(format!("query timed out after {:?}", timeout))),
    }
}

/// Helper struct for deserializing task rows from the database
///
/// Text columns other than `title` are nullable and read back as "".
#[derive(Debug, FromQueryResult)]
struct TaskRow {
    id: i32,
    title: String,
    description: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    status: Option<String>,
    created_at: NaiveDateTime,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            priority: row.priority.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            status: row.status.unwrap_or_default(),
            created_at: row.created_at.and_utc(),
        }
    }
}

/// Classify an error raised while pulling rows off the list stream.
///
/// The statement only runs on the first poll, so a query error before any row
/// arrived is a failed query rather than a broken stream.
fn row_error(err: DbErr, rows_read: usize) -> TaskError {
    match err {
        DbErr::Type(_) | DbErr::TryIntoErr { .. } => TaskError::Scan(err.to_string()),
        DbErr::Query(_) | DbErr::Conn(_) | DbErr::ConnectionAcquire(_) if rows_read == 0 => {
            TaskError::List(err.to_string())
        }
        other => TaskError::Iterate(other.to_string()),
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: TaskInput) -> TaskResult<Task> {
        let sql = format!(
            "INSERT INTO tasks (title, description, priority, category, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {TASK_COLUMNS}"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.title.into(),
                input.description.into(),
                input.priority.into(),
                input.category.into(),
                input.status.into(),
            ],
        );

        let row = self
            .bounded(
                async {
                    TaskRow::find_by_statement(stmt)
                        .one(&self.db)
                        .await
                        .map_err(|e| TaskError::Create(e.to_string()))?
                        .ok_or_else(|| TaskError::Create("insert returned no row".to_string()))
                },
                TaskError::Create,
            )
            .await?;

        tracing::info!(task_id = row.id, "Created task");
        Ok(row.into())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks");
        let stmt = Statement::from_string(DbBackend::Postgres, sql);

        self.bounded(
            async {
                let mut rows = TaskRow::find_by_statement(stmt)
                    .stream(&self.db)
                    .await
                    .map_err(|e| TaskError::List(e.to_string()))?;

                let mut tasks = Vec::new();
                while let Some(row) = rows
                    .try_next()
                    .await
                    .map_err(|e| row_error(e, tasks.len()))?
                {
                    tasks.push(row.into());
                }
                Ok(tasks)
            },
            TaskError::List,
        )
        .await
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = self
            .bounded(
                async {
                    TaskRow::find_by_statement(stmt)
                        .one(&self.db)
                        .await
                        .map_err(|e| TaskError::Get(e.to_string()))
                },
                TaskError::Get,
            )
            .await?;

        Ok(row.map(Task::from))
    }

    async fn update(&self, id: i32, input: TaskInput) -> TaskResult<Option<Task>> {
        let sql = format!(
            "UPDATE tasks SET title = $1, description = $2, priority = $3, category = $4, \
             status = $5 WHERE id = $6 RETURNING {TASK_COLUMNS}"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.title.into(),
                input.description.into(),
                input.priority.into(),
                input.category.into(),
                input.status.into(),
                id.into(),
            ],
        );

        let row = self
            .bounded(
                async {
                    TaskRow::find_by_statement(stmt)
                        .one(&self.db)
                        .await
                        .map_err(|e| TaskError::Update(e.to_string()))
                },
                TaskError::Update,
            )
            .await?;

        if row.is_some() {
            tracing::info!(task_id = id, "Updated task");
        }
        Ok(row.map(Task::from))
    }

    async fn delete(&self, id: i32) -> TaskResult<Option<i32>> {
        #[derive(Debug, FromQueryResult)]
        struct DeletedRow {
            id: i32,
        }

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM tasks WHERE id = $1 RETURNING id",
            [id.into()],
        );

        let row = self
            .bounded(
                async {
                    DeletedRow::find_by_statement(stmt)
                        .one(&self.db)
                        .await
                        .map_err(|e| TaskError::Delete(e.to_string()))
                },
                TaskError::Delete,
            )
            .await?;

        if row.is_some() {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(row.map(|r| r.id))
    }
}
