//! In-memory task storage consumed by the task routes.

use crate::json::{JsonRecord, ToJson};
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub description: String,
}

impl Task {
    pub fn new(name: &str, description: &str) -> Task {
        Task {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl JsonRecord for Task {
    fn json_fields(&self) -> Vec<(&'static str, &dyn ToJson)> {
        vec![
            ("name", &self.name as &dyn ToJson),
            ("description", &self.description as &dyn ToJson),
        ]
    }
}

/// The narrow interface the server needs from task storage.
///
/// Implementations are shared between workers and must serialize their
/// own mutations.
pub trait TaskStore: Send + Sync {
    fn add_task(&self, name: &str, description: &str) -> Task;
    fn tasks(&self) -> Vec<Task>;
    fn tasks_by_name(&self, name: &str) -> Vec<Task>;
}

#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> MemoryTaskStore {
        MemoryTaskStore::default()
    }
}

impl TaskStore for MemoryTaskStore {
    fn add_task(&self, name: &str, description: &str) -> Task {
        let task = Task::new(name, description);
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task.clone());
        task
    }

    fn tasks(&self) -> Vec<Task> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn tasks_by_name(&self, name: &str) -> Vec<Task> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| t.name == name)
            .cloned()
            .collect()
    }
}
