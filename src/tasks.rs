use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::Task;
use crate::reorder::ReorderEngine;

/// The ordered to-do list. Sequence order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksStore {
    tasks: Vec<Task>,
}

impl TasksStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TasksStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task. Text that trims to nothing is rejected with `None`.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        };
        debug!(id = %task.id, "task added");
        self.tasks.push(task);
        self.tasks.last()
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != len_before
    }

    /// Flips `completed` on the task with `id`; nothing else changes.
    pub fn toggle_complete(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.completed = !t.completed;
                true
            }
            None => false,
        }
    }

    /// Commits a pending drag from `engine` against this list.
    pub fn finish_reorder(&mut self, engine: &mut ReorderEngine) -> bool {
        engine.drag_end(&mut self.tasks)
    }
}
