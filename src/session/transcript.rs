//! Append-only conversation log

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::command::resolver::ResolutionResult;

/// Plain-text transcript. Each exchange is written as the prompt on a
/// tab-indented line, then the displayed response and a blank line.
#[derive(Debug)]
pub struct Transcript {
    path: PathBuf,
    file: File,
}

impl Transcript {
    /// Open (or create) the log for appending, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// Like [`Transcript::open`], but a log that cannot be opened is logged
    /// and skipped so the conversation can go on without one.
    pub fn open_or_skip(path: &Path) -> Option<Self> {
        match Self::open(path) {
            Ok(transcript) => Some(transcript),
            Err(e) => {
                tracing::warn!("Failed to open transcript {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mark the start of a session
    pub fn begin_session(&mut self, session_id: Uuid) -> io::Result<()> {
        writeln!(self.file, "--- session {session_id} ---")?;
        self.file.flush()
    }

    pub fn record_prompt(&mut self, prompt: &str) -> io::Result<()> {
        writeln!(self.file, "\t\t\t{prompt}")?;
        self.file.flush()
    }

    pub fn record_response(&mut self, result: &ResolutionResult) -> io::Result<()> {
        write!(self.file, "{}\n\n", result.display_text())?;
        self.file.flush()
    }
}
