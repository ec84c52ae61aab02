use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Task domain errors.
///
/// `Display` is the exact message returned to the client. Variants that wrap
/// a `String` carry the internal cause, which is logged and never sent.
/// Malformed bodies are rejected earlier by `axum_helpers::JsonBody`.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid task ID")]
    InvalidId(String),

    #[error("Task not found")]
    NotFound(i32),

    #[error("Failed to create task")]
    Create(String),

    #[error("Failed to fetch tasks")]
    List(String),

    #[error("Error scanning tasks")]
    Scan(String),

    #[error("Error iterating tasks")]
    Iterate(String),

    #[error("Failed to fetch task")]
    Get(String),

    #[error("Failed to update task")]
    Update(String),

    #[error("Failed to delete task")]
    Delete(String),

    #[error("Failed to create tasks table")]
    Schema(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Internal cause for storage failures, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TaskError::Create(cause)
            | TaskError::List(cause)
            | TaskError::Scan(cause)
            | TaskError::Iterate(cause)
            | TaskError::Get(cause)
            | TaskError::Update(cause)
            | TaskError::Delete(cause)
            | TaskError::Schema(cause) => Some(cause),
            TaskError::InvalidId(_) | TaskError::NotFound(_) => None,
        }
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match &err {
            TaskError::InvalidId(raw) => {
                tracing::debug!(id = %raw, "Rejected non-integer task id");
                AppError::BadRequest(err.to_string())
            }
            TaskError::NotFound(id) => {
                tracing::debug!(task_id = id, "Task not found");
                AppError::NotFound(err.to_string())
            }
            _ => {
                if let Some(detail) = err.detail() {
                    tracing::error!(cause = %detail, "{}", err);
                }
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_client_messages_hide_internal_cause() {
        let err = TaskError::Create("connection refused".to_string());
        assert_eq!(err.to_string(), "Failed to create task");
        assert_eq!(err.detail(), Some("connection refused"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TaskError::InvalidId("abc".into()), StatusCode::BAD_REQUEST),
            (TaskError::NotFound(7), StatusCode::NOT_FOUND),
            (TaskError::List("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (TaskError::Scan("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (TaskError::Iterate("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (TaskError::Delete("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status(), expected);
        }
    }

    #[test]
    fn test_app_error_carries_fixed_message() {
        let app: AppError = TaskError::Iterate("stream reset".into()).into();
        assert_eq!(
            app,
            AppError::InternalServerError("Error iterating tasks".to_string())
        );
    }
}
