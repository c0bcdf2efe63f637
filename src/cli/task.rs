//! beatbook task command implementations.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::notify::{BufferSink, NoticeDestination, NoticeSink};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;
use crate::task::{generate_id, EstimatedTime, Priority, Subtask, Task, TaskStore};

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub due: Option<String>,
    pub priority: String,
    pub category: String,
    pub estimate: Option<String>,
    pub subtasks: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub notices: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub estimate: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub notices: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub notices: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ToggleOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub notices: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub completed: bool,
    pub pending: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Store plus the buffer its notices land in when no external destination
/// was configured.
struct StoreContext {
    store: TaskStore,
    buffer: Option<BufferSink>,
}

impl StoreContext {
    fn open(data_dir: Option<PathBuf>, notices: Option<&str>) -> Result<Self> {
        let config = load_config()?;
        let dir = data_dir
            .or_else(|| config.storage.dir.clone())
            .unwrap_or_else(Storage::default_dir);
        let storage = Storage::new(dir);
        storage.init()?;

        match NoticeDestination::parse(notices) {
            Some(destination) => {
                let sink: Box<dyn NoticeSink> = Box::new(destination.open()?);
                Ok(Self {
                    store: TaskStore::open(storage, &config.tasks, sink)?,
                    buffer: None,
                })
            }
            None => {
                let buffer = BufferSink::new();
                let sink: Box<dyn NoticeSink> = Box::new(buffer.clone());
                Ok(Self {
                    store: TaskStore::open(storage, &config.tasks, sink)?,
                    buffer: Some(buffer),
                })
            }
        }
    }

    /// Render buffered notices into the human output.
    fn flush_notices(&self, human: &mut HumanOutput) {
        if let Some(buffer) = &self.buffer {
            for notice in buffer.drain() {
                human.push_detail(format!("{}: {}", notice.title, notice.description));
            }
        }
    }
}

fn load_config() -> Result<Config> {
    let cwd = std::env::current_dir()?;
    Ok(Config::load_from_dir(&cwd))
}

fn parse_priority(raw: &str) -> Result<Priority> {
    raw.parse()
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let priority = parse_priority(&options.priority)?;
    let mut context = StoreContext::open(options.data_dir, options.notices.as_deref())?;

    let task = Task {
        id: generate_id(),
        title: options.title,
        description: options.description,
        completed: false,
        due_date: options.due,
        priority,
        category: options.category,
        estimated_time: options.estimate.as_deref().map(EstimatedTime::parse),
        subtasks: options
            .subtasks
            .into_iter()
            .map(|title| Subtask {
                id: generate_id(),
                title,
                completed: false,
            })
            .collect(),
    };

    context.store.create(task.clone())?;

    let mut human = HumanOutput::new(format!("beatbook task add: created {}", task.id));
    human.push_summary("id", task.id.clone());
    human.push_summary("title", task.title.clone());
    human.push_summary("priority", task.priority.to_string());
    context.flush_notices(&mut human);
    human.push_next_step("beatbook task list");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task add",
        &task,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut context = StoreContext::open(options.data_dir, options.notices.as_deref())?;

    let mut task = context
        .store
        .get(&options.id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    if let Some(title) = options.title {
        task.title = title;
    }
    if let Some(description) = options.description {
        task.description = description;
    }
    if let Some(due) = options.due {
        task.due_date = Some(due);
    }
    if let Some(priority) = options.priority.as_deref() {
        task.priority = parse_priority(priority)?;
    }
    if let Some(category) = options.category {
        task.category = category;
    }
    if let Some(estimate) = options.estimate.as_deref() {
        task.estimated_time = Some(EstimatedTime::parse(estimate));
    }

    context.store.update(task.clone())?;

    let mut human = HumanOutput::new(format!("beatbook task edit: updated {}", task.id));
    human.push_summary("id", task.id.clone());
    human.push_summary("title", task.title.clone());
    context.flush_notices(&mut human);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task edit",
        &task,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut context = StoreContext::open(options.data_dir, options.notices.as_deref())?;

    let existed = context.store.get(&options.id).is_some();
    context.store.delete(&options.id)?;

    #[derive(serde::Serialize)]
    struct RmReport {
        id: String,
        removed: bool,
    }

    let report = RmReport {
        id: options.id.clone(),
        removed: existed,
    };

    let mut human = HumanOutput::new(format!("beatbook task rm: {}", options.id));
    human.push_summary("removed", if existed { "yes" } else { "no" });
    if !existed {
        human.push_warning(format!("no task with id {} (no-op)", options.id));
    }
    context.flush_notices(&mut human);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task rm",
        &report,
        Some(&human),
    )
}

pub fn run_toggle(options: ToggleOptions) -> Result<()> {
    let mut context = StoreContext::open(options.data_dir, options.notices.as_deref())?;

    context.store.toggle(&options.id)?;
    let task = context.store.get(&options.id).cloned();

    #[derive(serde::Serialize)]
    struct ToggleReport {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        completed: Option<bool>,
    }

    let report = ToggleReport {
        id: options.id.clone(),
        completed: task.as_ref().map(|t| t.completed),
    };

    let header = match &task {
        Some(task) if task.completed => format!("beatbook task toggle: {} completed", task.id),
        Some(task) => format!("beatbook task toggle: {} reopened", task.id),
        None => format!("beatbook task toggle: {}", options.id),
    };

    let mut human = HumanOutput::new(header);
    if task.is_none() {
        human.push_warning(format!("no task with id {} (no-op)", options.id));
    }
    context.flush_notices(&mut human);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task toggle",
        &report,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let context = StoreContext::open(options.data_dir, None)?;

    let tasks: Vec<Task> = context
        .store
        .tasks()
        .iter()
        .filter(|task| {
            if options.completed {
                task.completed
            } else if options.pending {
                !task.completed
            } else {
                true
            }
        })
        .cloned()
        .collect();

    let mut human = HumanOutput::new(format!("beatbook task list: {} tasks", tasks.len()));
    for task in &tasks {
        let mark = if task.completed { "x" } else { " " };
        let mut line = format!("[{mark}] {} {} ({})", task.id, task.title, task.priority);
        if !task.category.is_empty() {
            line.push_str(&format!(" #{}", task.category));
        }
        human.push_detail(line);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task list",
        &tasks,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let context = StoreContext::open(options.data_dir, None)?;

    let task = context
        .store
        .get(&options.id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut human = HumanOutput::new(format!("beatbook task show: {}", task.id));
    human.push_summary("title", task.title.clone());
    human.push_summary("completed", if task.completed { "yes" } else { "no" });
    human.push_summary("priority", task.priority.to_string());
    if let Some(due) = &task.due_date {
        human.push_summary("due", due.clone());
    }
    if !task.category.is_empty() {
        human.push_summary("category", task.category.clone());
    }
    if let Some(estimate) = &task.estimated_time {
        human.push_summary("estimate", estimate.to_string());
    }
    if !task.description.is_empty() {
        human.push_detail(task.description.clone());
    }
    for subtask in &task.subtasks {
        let mark = if subtask.completed { "x" } else { " " };
        human.push_detail(format!("[{mark}] {}", subtask.title));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task show",
        &task,
        Some(&human),
    )
}
