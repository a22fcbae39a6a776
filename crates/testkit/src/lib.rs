#![warn(missing_docs)]
//! Shared fixtures and transcript plumbing for tests and the console.

mod fixtures;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cmdplus_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub use fixtures::*;

/// First line of every transcript.
#[derive(Debug, Serialize)]
pub struct SessionRecord<'a> {
    /// Wall-clock time the session started.
    pub started_at: DateTime<Utc>,
    /// Where the world came from (a path, or "demo").
    pub world: &'a str,
    /// Operator the commands ran as.
    pub operator: &'a str,
}

impl<'a> SessionRecord<'a> {
    /// Header for a session starting now.
    pub fn new(world: &'a str, operator: &'a str) -> Self {
        Self {
            started_at: Utc::now(),
            world,
            operator,
        }
    }
}

/// One executed command.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord<'a> {
    /// Script tick the command ran at (line number for interactive input).
    pub tick: SimTick,
    /// The command as typed.
    pub command: &'a str,
    /// Feedback and error lines.
    pub lines: &'a [String],
    /// Value the command returned.
    pub result: i32,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create transcript {}", path.display()))?;
        debug!(path = %path.display(), "Opened transcript");
        Ok(Self { file })
    }

    /// Append one record as a JSON line.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
