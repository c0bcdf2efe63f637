//! Command-line interface for beatbook
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod library;
mod task;

/// beatbook - silent disco prep, offline
///
/// A CLI that keeps a local task list and a BPM-tagged track library for
/// silent disco organizers.
#[derive(Parser, Debug)]
#[command(name = "beatbook")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding persisted slots (defaults to the platform data dir)
    #[arg(long, global = true, env = "BEATBOOK_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    /// Notice destination: "-" for stdout JSONL, or a file path
    #[arg(long, global = true, env = "BEATBOOK_NOTICES")]
    pub notices: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task list management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Track library browsing
    #[command(subcommand)]
    Library(LibraryCommands),
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(long, default_value = "")]
        description: String,

        /// Advisory due date (free-form, e.g. "2026-09-01")
        #[arg(long)]
        due: Option<String>,

        /// Priority: low, medium, high
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Free-text category label
        #[arg(long, default_value = "")]
        category: String,

        /// Estimated effort: minutes or free text (e.g. "90" or "2 evenings")
        #[arg(long)]
        estimate: Option<String>,

        /// Subtask title (repeatable)
        #[arg(long)]
        subtask: Vec<String>,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New due date
        #[arg(long)]
        due: Option<String>,

        /// New priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// New category label
        #[arg(long)]
        category: Option<String>,

        /// New estimated effort
        #[arg(long)]
        estimate: Option<String>,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: String,
    },

    /// Flip a task between completed and open
    Toggle {
        /// Task id
        id: String,
    },

    /// List tasks
    List {
        /// Only completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only open tasks
        #[arg(long)]
        pending: bool,
    },

    /// Show one task in full
    Show {
        /// Task id
        id: String,
    },
}

/// Library subcommands
#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// List tracks within a BPM range
    List {
        /// Lower BPM bound, inclusive (default from config)
        #[arg(long)]
        min_bpm: Option<u16>,

        /// Upper BPM bound, inclusive (default from config)
        #[arg(long)]
        max_bpm: Option<u16>,

        /// Only tracks from one service: spotify, apple
        #[arg(long)]
        service: Option<String>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    title,
                    description,
                    due,
                    priority,
                    category,
                    estimate,
                    subtask,
                } => task::run_add(task::AddOptions {
                    title,
                    description,
                    due,
                    priority,
                    category,
                    estimate,
                    subtasks: subtask,
                    data_dir: self.data_dir,
                    notices: self.notices,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                    due,
                    priority,
                    category,
                    estimate,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    description,
                    due,
                    priority,
                    category,
                    estimate,
                    data_dir: self.data_dir,
                    notices: self.notices,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions {
                    id,
                    data_dir: self.data_dir,
                    notices: self.notices,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Toggle { id } => task::run_toggle(task::ToggleOptions {
                    id,
                    data_dir: self.data_dir,
                    notices: self.notices,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::List { completed, pending } => task::run_list(task::ListOptions {
                    completed,
                    pending,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Show { id } => task::run_show(task::ShowOptions {
                    id,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Library(cmd) => match cmd {
                LibraryCommands::List {
                    min_bpm,
                    max_bpm,
                    service,
                } => library::run_list(library::ListOptions {
                    min_bpm,
                    max_bpm,
                    service,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
        }
    }
}
