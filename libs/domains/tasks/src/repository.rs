use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskInput};

/// Repository trait for Task persistence
///
/// Every method maps to exactly one storage statement. "Not found" is
/// reported as `None`, leaving the decision to the service layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task; storage assigns `id` and `created_at`
    async fn create(&self, input: TaskInput) -> TaskResult<Task>;

    /// All tasks in storage order
    async fn list(&self) -> TaskResult<Vec<Task>>;

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Replace the mutable fields and return the row as stored
    async fn update(&self, id: i32, input: TaskInput) -> TaskResult<Option<Task>>;

    /// Delete a task, returning the id of the removed row
    async fn delete(&self, id: i32) -> TaskResult<Option<i32>>;
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: BTreeMap<i32, Task>,
    last_id: i32,
}

/// In-memory implementation of TaskRepository (for development/testing)
///
/// Ids come from a counter that only moves forward, so deleted ids are
/// never handed out again.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: TaskInput) -> TaskResult<Task> {
        let mut state = self.state.write().await;

        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| TaskError::Create("task id space exhausted".to_string()))?;
        state.last_id = id;
        let task = Task::from_input(id, input, Utc::now());
        state.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: TaskInput) -> TaskResult<Option<Task>> {
        let mut state = self.state.write().await;

        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply_input(input);

        tracing::info!(task_id = id, "Updated task");
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: i32) -> TaskResult<Option<i32>> {
        let mut state = self.state.write().await;

        let removed = state.tasks.remove(&id).map(|task| task.id);
        if removed.is_some() {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: "d".to_string(),
            priority: "low".to_string(),
            category: "x".to_string(),
            status: "open".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_fails_once_ids_run_out() {
        let repo = InMemoryTaskRepository::new();
        repo.create(input("last")).await.unwrap();
        repo.state.write().await.last_id = i32::MAX;

        let err = repo.create(input("overflow")).await.unwrap_err();

        assert!(matches!(err, TaskError::Create(ref detail) if detail.contains("exhausted")));
        assert_eq!(repo.state.read().await.last_id, i32::MAX);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let repo = InMemoryTaskRepository::new();

        let task = repo.create(input("A")).await.unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "A");

        let fetched = repo.get_by_id(task.id).await.unwrap();
        assert_eq!(fetched, Some(task));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.create(input("A")).await.unwrap();
        assert_eq!(repo.delete(first.id).await.unwrap(), Some(first.id));

        let second = repo.create(input("B")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(input("A")).await.unwrap();

        let updated = repo.update(task.id, input("B")).await.unwrap().unwrap();
        assert_eq!(updated.title, "B");
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_missing_rows_are_none() {
        let repo = InMemoryTaskRepository::new();

        assert!(repo.get_by_id(1).await.unwrap().is_none());
        assert!(repo.update(1, input("A")).await.unwrap().is_none());
        assert!(repo.delete(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.list().await.unwrap().is_empty());

        repo.create(input("A")).await.unwrap();
        repo.create(input("B")).await.unwrap();

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["A", "B"]);
    }
}
