//! Speech output

use std::io;
use std::process::{Command, Stdio};

/// Something that can read text aloud
pub trait Voice: Send {
    fn say(&self, text: &str) -> io::Result<()>;
}

/// Drops everything; used when speech is off
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentVoice;

impl Voice for SilentVoice {
    fn say(&self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Speaks through an external text-to-speech program (`espeak`, `say`, ...)
#[derive(Debug, Clone)]
pub struct CommandVoice {
    program: String,
}

impl CommandVoice {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Voice for CommandVoice {
    /// Blocks until the program has finished speaking
    fn say(&self, text: &str) -> io::Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let status = Command::new(&self.program)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("{} exited with {}", self.program, status)))
        }
    }
}
