//! Task management for beatbook.
//!
//! The task list lives in memory and is written back to its storage slot
//! in full after every mutation. The collection is seeded exactly once per
//! store lifetime: from the persisted slot when present, from the built-in
//! sample set otherwise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::config::TasksConfig;
use crate::error::{Error, Result};
use crate::notify::{Notice, NoticeSink};
use crate::storage::Storage;

pub const DEFAULT_TASKS_SLOT: &str = "tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low|medium|high)"
            ))),
        }
    }
}

/// Estimated effort for a task.
///
/// Persisted untagged so the slot stays a bare number-or-string, matching
/// blobs written by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EstimatedTime {
    Minutes(u64),
    Text(String),
}

impl EstimatedTime {
    /// Interpret CLI input: a plain integer is minutes, anything else is
    /// kept as free text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(minutes) => EstimatedTime::Minutes(minutes),
            Err(_) => EstimatedTime::Text(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatedTime::Minutes(minutes) => write!(f, "{minutes} min"),
            EstimatedTime::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// A single task record.
///
/// Field names on the wire match the web client's camelCase blobs, so a
/// previously persisted collection loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Advisory display date; never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<EstimatedTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

fn default_priority() -> Priority {
    Priority::Medium
}

/// Generate a fresh record id.
pub fn generate_id() -> String {
    Ulid::new().to_string().to_ascii_lowercase()
}

/// The sample set used when no slot has been persisted yet.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Sample Task 1".to_string(),
            description: "This is a sample task".to_string(),
            completed: false,
            due_date: Some("2023-12-31".to_string()),
            priority: Priority::High,
            category: "Work".to_string(),
            estimated_time: Some(EstimatedTime::Minutes(120)),
            subtasks: Vec::new(),
        },
        Task {
            id: "2".to_string(),
            title: "Sample Task 2".to_string(),
            description: "This is another sample task".to_string(),
            completed: true,
            due_date: Some("2023-11-30".to_string()),
            priority: Priority::Medium,
            category: "Personal".to_string(),
            estimated_time: Some(EstimatedTime::Minutes(60)),
            subtasks: Vec::new(),
        },
    ]
}

/// In-memory task collection with write-through persistence.
///
/// Single-writer: one store owns the slot for its lifetime. Every mutation
/// persists the full collection, then informs the notice sink.
pub struct TaskStore {
    storage: Storage,
    slot: String,
    tasks: Vec<Task>,
    sink: Box<dyn NoticeSink>,
}

impl TaskStore {
    /// Open the store, seeding the collection exactly once.
    ///
    /// An absent or malformed slot falls back to [`default_tasks`]; this is
    /// never an error.
    pub fn open(storage: Storage, config: &TasksConfig, sink: Box<dyn NoticeSink>) -> Result<Self> {
        let slot = config.slot.clone();
        let tasks = match storage.load_slot::<Vec<Task>>(&slot)? {
            Some(tasks) => tasks,
            None => default_tasks(),
        };
        Ok(Self {
            storage,
            slot,
            tasks,
            sink,
        })
    }

    /// The current collection, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Append a task.
    ///
    /// Id uniqueness is the caller's contract; the store does not
    /// deduplicate.
    pub fn create(&mut self, task: Task) -> Result<()> {
        self.tasks.push(task);
        self.persist()?;
        self.emit(Notice::new(
            "Task Created",
            "Your new task has been added to the system.",
        ));
        Ok(())
    }

    /// Replace the task whose id matches `task.id`.
    ///
    /// An unknown id leaves the collection unchanged; the collection is
    /// still re-persisted and the update notice still fires.
    pub fn update(&mut self, task: Task) -> Result<()> {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        }
        self.persist()?;
        self.emit(Notice::new(
            "Task Updated",
            "Your task has been successfully updated.",
        ));
        Ok(())
    }

    /// Remove the task with the given id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks.retain(|task| task.id != id);
        self.persist()?;
        self.emit(Notice::new(
            "Task Deleted",
            "The task has been removed from your list.",
        ));
        Ok(())
    }

    /// Flip the completion flag of the task with the given id.
    ///
    /// The notice text depends on the new state. Unknown ids toggle nothing
    /// and emit nothing.
    pub fn toggle(&mut self, id: &str) -> Result<()> {
        let new_state = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                Some(task.completed)
            }
            None => None,
        };
        self.persist()?;

        match new_state {
            Some(true) => self.emit(Notice::new(
                "Task Completed",
                "The task has been marked as completed.",
            )),
            Some(false) => self.emit(Notice::new(
                "Task Reopened",
                "The task has been reopened.",
            )),
            None => {}
        }
        Ok(())
    }

    /// Write the full collection back to the slot.
    ///
    /// An empty collection is persisted too: deleting the last task must
    /// survive a restart.
    fn persist(&self) -> Result<()> {
        self.storage.save_slot(&self.slot, &self.tasks)
    }

    fn emit(&mut self, notice: Notice) {
        if let Err(err) = self.sink.notify(&notice) {
            tracing::warn!(%err, title = notice.title.as_str(), "dropping notice");
        }
    }
}
