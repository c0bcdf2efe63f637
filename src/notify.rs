//! Mutation notices for presentation layers.
//!
//! Every task mutation produces a human-readable notice (the web client
//! rendered these as toasts). Notices are emitted as JSON lines to stdout
//! or a configured file, or buffered in memory for the CLI's own output.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

pub const NOTICE_SCHEMA_VERSION: &str = "beatbook.notice.v1";

#[derive(Debug, Clone)]
pub enum NoticeDestination {
    Stdout,
    File(PathBuf),
}

impl NoticeDestination {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed == "-" {
                return Some(NoticeDestination::Stdout);
            }
            Some(NoticeDestination::File(PathBuf::from(trimmed)))
        })
    }

    pub fn open(&self) -> Result<JsonlSink> {
        match self {
            NoticeDestination::Stdout => Ok(JsonlSink::stdout()),
            NoticeDestination::File(path) => JsonlSink::file(path),
        }
    }
}

/// A human-readable mutation outcome: short title, one sentence of detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Envelope used when a notice is written to a JSONL destination.
#[derive(Debug, Clone, Serialize)]
struct NoticeEnvelope<'a> {
    schema_version: &'static str,
    timestamp: DateTime<Utc>,
    title: &'a str,
    description: &'a str,
}

/// Consumer of mutation notices.
///
/// A sink failure must never fail the mutation that produced the notice;
/// the store logs and drops sink errors.
pub trait NoticeSink {
    fn notify(&mut self, notice: &Notice) -> Result<()>;
}

/// Sink that writes schema-versioned JSONL notices to a stream.
pub struct JsonlSink {
    writer: Box<dyn Write + Send>,
}

impl JsonlSink {
    /// Emit notices to stdout.
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
        }
    }

    /// Emit notices to a file, creating it if necessary.
    pub fn file(path: &Path) -> Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            writer: Box::new(file),
        })
    }
}

impl NoticeSink for JsonlSink {
    fn notify(&mut self, notice: &Notice) -> Result<()> {
        let envelope = NoticeEnvelope {
            schema_version: NOTICE_SCHEMA_VERSION,
            timestamp: Utc::now(),
            title: &notice.title,
            description: &notice.description,
        };
        let serialized = serde_json::to_vec(&envelope)?;
        self.writer.write_all(&serialized)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush().map_err(Error::Io)?;
        Ok(())
    }
}

/// Sink that buffers notices in memory.
///
/// Clones share the same buffer, so a handle kept by the caller stays
/// valid after another clone is handed to a store.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notice, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self
            .notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *notices)
    }
}

impl NoticeSink for BufferSink {
    fn notify(&mut self, notice: &Notice) -> Result<()> {
        let mut notices = self
            .notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        notices.push(notice.clone());
        Ok(())
    }
}

/// Sink that discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NoticeSink for NullSink {
    fn notify(&mut self, _notice: &Notice) -> Result<()> {
        Ok(())
    }
}
