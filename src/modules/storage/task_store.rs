use crate::core::traits::StorageBackend;
use anyhow::Result;
use tracing::{debug, warn};

/// Storage key holding the serialized task list
pub const TASKS_KEY: &str = "pomodoro_tasks";

/// Ordered list of free-text tasks, rewritten in full on every change
pub struct TaskStore {
    backend: Box<dyn StorageBackend>,
}

impl TaskStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Current tasks. Missing or unreadable data is an empty list.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.backend.get_item(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read tasks, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "stored tasks are not a list of strings, starting empty");
                Vec::new()
            }
        }
    }

    /// Append a task. Blank text is ignored.
    pub fn add(&self, text: &str) -> Result<Vec<String>> {
        let mut tasks = self.load();
        let text = text.trim();
        if text.is_empty() {
            return Ok(tasks);
        }

        tasks.push(text.to_string());
        self.save(&tasks)?;
        debug!(count = tasks.len(), "task added");
        Ok(tasks)
    }

    /// Remove the task at `index`. Out-of-range indices change nothing.
    pub fn delete(&self, index: usize) -> Result<Vec<String>> {
        let mut tasks = self.load();
        if index >= tasks.len() {
            return Ok(tasks);
        }

        tasks.remove(index);
        self.save(&tasks)?;
        debug!(count = tasks.len(), "task deleted");
        Ok(tasks)
    }

    fn save(&self, tasks: &[String]) -> Result<()> {
        let raw = serde_json::to_string(tasks)?;
        self.backend.set_item(TASKS_KEY, &raw)
    }
}
