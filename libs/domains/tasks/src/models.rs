use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Task entity as stored and returned to clients.
///
/// Labels (`priority`, `category`, `status`) are free-form strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned by storage, never reused
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub status: String,
    /// Set once at insert time
    pub created_at: DateTime<Utc>,
}

/// Payload for create and update.
///
/// Decoding is lenient: keys match case-insensitively, missing or `null`
/// fields become empty strings, and unknown keys (including `id` and
/// `createdAt`) are ignored so clients cannot set storage-owned fields.
/// A field holding anything other than a string or `null` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "Map<String, Value>")]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub status: String,
}

impl TryFrom<Map<String, Value>> for TaskInput {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut input = TaskInput::default();

        for (key, value) in fields {
            let slot = match key.to_ascii_lowercase().as_str() {
                "title" => &mut input.title,
                "description" => &mut input.description,
                "priority" => &mut input.priority,
                "category" => &mut input.category,
                "status" => &mut input.status,
                _ => continue,
            };

            match value {
                Value::Null => {}
                Value::String(text) => *slot = text,
                other => return Err(format!("field `{key}` must be a string, got {other}")),
            }
        }

        Ok(input)
    }
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedTask {
    #[schema(example = "Task deleted")]
    pub message: String,
    pub id: i32,
}

impl DeletedTask {
    pub const MESSAGE: &'static str = "Task deleted";

    pub fn new(id: i32) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            id,
        }
    }
}

impl Task {
    /// Build a task from an input plus the storage-owned fields.
    pub fn from_input(id: i32, input: TaskInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            category: input.category,
            status: input.status,
            created_at,
        }
    }

    /// Replace every mutable field, keeping `id` and `created_at`.
    pub fn apply_input(&mut self, input: TaskInput) {
        self.title = input.title;
        self.description = input.description;
        self.priority = input.priority;
        self.category = input.category;
        self.status = input.status;
    }
}
