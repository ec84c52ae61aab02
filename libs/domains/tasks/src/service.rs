use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{DeletedTask, Task, TaskInput};
use crate::repository::TaskRepository;

/// Service layer for Task operations
///
/// Turns repository `None` results into `NotFound`; everything else passes
/// straight through.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_task(&self, input: TaskInput) -> TaskResult<Task> {
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Full replace of the mutable fields
    #[instrument(skip(self, input))]
    pub async fn update_task(&self, id: i32, input: TaskInput) -> TaskResult<Task> {
        self.repository
            .update(id, input)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<DeletedTask> {
        self.repository
            .delete(id)
            .await?
            .map(DeletedTask::new)
            .ok_or(TaskError::NotFound(id))
    }
}
