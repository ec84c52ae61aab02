use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::JsonBody;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{DeletedTask, Task, TaskInput};
use crate::repository::TaskRepository;
use crate::service::TaskService;

const TAG: &str = "tasks";

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, delete_task),
    components(schemas(Task, TaskInput, DeletedTask)),
    tags(
        (name = TAG, description = "Task CRUD endpoints")
    )
)]
pub struct ApiDoc;

/// Create the task router with all HTTP endpoints
///
/// `/tasks` and `/tasks/` both address the collection.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(shared_service)
}

/// Integer task id from the path.
///
/// Anything that does not parse as `i32` is rejected with
/// `400 Invalid task ID` before the body is looked at.
pub struct TaskId(pub i32);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = TaskError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| TaskError::InvalidId(e.body_text()))?;

        raw.parse::<i32>()
            .map(TaskId)
            .map_err(|_| TaskError::InvalidId(raw))
    }
}

/// List all tasks
#[utoipa::path(
    get,
    path = "/tasks/",
    tag = TAG,
    responses(
        (status = 200, description = "All tasks", body = Vec<Task>),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks))
}

/// Create a new task
///
/// A `null` body is taken as an input with every field empty.
#[utoipa::path(
    post,
    path = "/tasks/",
    tag = TAG,
    request_body = TaskInput,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid request body", body = String, content_type = "text/plain"),
        (status = 500, description = "Failed to create task", body = String, content_type = "text/plain")
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    JsonBody(input): JsonBody<Option<TaskInput>>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input.unwrap_or_default()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task ID", body = String, content_type = "text/plain"),
        (status = 404, description = "Task not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Failed to fetch task", body = String, content_type = "text/plain")
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    TaskId(id): TaskId,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(id).await?;
    Ok(Json(task))
}

/// Replace a task's fields
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = TaskInput,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid task ID or request body", body = String, content_type = "text/plain"),
        (status = 404, description = "Task not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Failed to update task", body = String, content_type = "text/plain")
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    TaskId(id): TaskId,
    JsonBody(input): JsonBody<Option<TaskInput>>,
) -> TaskResult<Json<Task>> {
    let task = service.update_task(id, input.unwrap_or_default()).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = DeletedTask),
        (status = 400, description = "Invalid task ID", body = String, content_type = "text/plain"),
        (status = 404, description = "Task not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Failed to delete task", body = String, content_type = "text/plain")
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    TaskId(id): TaskId,
) -> TaskResult<Json<DeletedTask>> {
    let deleted = service.delete_task(id).await?;
    Ok(Json(deleted))
}
