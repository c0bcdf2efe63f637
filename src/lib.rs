//! beatbook - silent disco prep library
//!
//! This library provides the core functionality for the beatbook CLI:
//! a local-first task list with write-through persistence and a
//! BPM-tagged track library.
//!
//! # Core Concepts
//!
//! - **Tasks**: ordered records persisted as a single JSON slot
//! - **Slots**: named blobs under the data directory, replaced atomically
//! - **Notices**: human-readable mutation outcomes for a presentation layer
//! - **BPM filter**: read-only range view over the track library
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.beatbook.toml`
//! - `error`: Error types and result aliases
//! - `library`: Track library and BPM range filter
//! - `notify`: Notice types and sinks
//! - `output`: Human and JSON output envelopes
//! - `storage`: Slot storage with atomic writes
//! - `task`: Task records and the task store

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod notify;
pub mod output;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
