//! Startup DDL for the `tasks` table.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::time::Duration;

use crate::error::{TaskError, TaskResult};
use crate::postgres::bounded;

/// Startup DDL timeout.
pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Idempotent; never touches existing rows.
pub const TASKS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    priority TEXT,
    category TEXT,
    status TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Make sure the `tasks` table exists.
///
/// Safe to call on every startup. Callers should treat an error as fatal.
pub async fn ensure_schema(db: &DatabaseConnection, timeout: Duration) -> TaskResult<()> {
    tracing::debug!("Ensuring tasks table exists");

    bounded(
        timeout,
        async {
            db.execute_unprepared(TASKS_TABLE_DDL)
                .await
                .map_err(|e| TaskError::Schema(e.to_string()))
        },
        TaskError::Schema,
    )
    .await?;

    tracing::info!("Tasks table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    #[tokio::test]
    async fn test_ensure_schema_runs_ddl() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        assert!(ensure_schema(&db, DEFAULT_INIT_TIMEOUT).await.is_ok());

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_schema_failure_is_schema_error() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal(
                "permission denied".to_string(),
            ))])
            .into_connection();

        let err = ensure_schema(&db, DEFAULT_INIT_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, TaskError::Schema(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_ddl_times_out_as_schema_error() {
        let err = bounded(
            DEFAULT_INIT_TIMEOUT,
            std::future::pending::<TaskResult<()>>(),
            TaskError::Schema,
        )
        .await
        .unwrap_err();

        match err {
            TaskError::Schema(detail) => assert!(detail.contains("timed out after 5s")),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_ddl_is_idempotent() {
        assert!(TASKS_TABLE_DDL.contains("CREATE TABLE IF NOT EXISTS tasks"));
        assert!(TASKS_TABLE_DDL.contains("id SERIAL PRIMARY KEY"));
    }
}
