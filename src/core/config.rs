//! Assistant configuration with documented defaults
//!
//! Values are read from an optional TOML file; every field has a default so a
//! partial file (or none at all) is valid. CLI flags override on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConvivaError, Result};

/// Configuration for a conversational session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    // === CATALOGUE ===
    /// Path to the intent catalogue (`.json` or `.toml`)
    pub catalogue_path: PathBuf,

    // === TRANSCRIPT ===
    /// Append-only conversation log. `None` disables the transcript.
    pub transcript_path: Option<PathBuf>,

    // === SPEECH ===
    /// Whether responses are also spoken through the voice program
    pub speak: bool,

    /// Text-to-speech program, invoked with the text as its only argument
    pub voice_program: String,

    // === DISPATCH ===
    /// Upper bound on a single handler call, in milliseconds
    ///
    /// A handler still running after this long is reported to the user as
    /// failed. The call itself is not interrupted.
    pub handler_timeout_ms: u64,

    /// Seed for response selection. `None` seeds from entropy.
    pub seed: Option<u64>,

    // === HANDLERS ===
    /// Program used to open URLs (browser launcher)
    pub opener_program: String,

    /// Program spawned by the `open-cmd` intent
    pub terminal_program: String,

    /// Base URL of the page-summary endpoint used by `wikipedia-search`
    pub wikipedia_endpoint: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            catalogue_path: PathBuf::from("data/intents.json"),
            transcript_path: Some(PathBuf::from("data/conversation_history.txt")),

            speak: false,
            voice_program: "espeak".into(),

            // Long enough for a page-summary round trip on a slow link
            handler_timeout_ms: 15_000,
            seed: None,

            opener_program: "xdg-open".into(),
            terminal_program: "x-terminal-emulator".into(),
            wikipedia_endpoint: "https://en.wikipedia.org/api/rest_v1/page/summary".into(),
        }
    }
}

impl AssistantConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AssistantConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn handler_timeout(&self) -> Duration {
        Duration::from_millis(self.handler_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.handler_timeout_ms == 0 {
            return Err(ConvivaError::Config(
                "handler_timeout_ms must be greater than zero".into(),
            ));
        }

        if self.catalogue_path.as_os_str().is_empty() {
            return Err(ConvivaError::Config("catalogue_path must not be empty".into()));
        }

        if self.speak && self.voice_program.trim().is_empty() {
            return Err(ConvivaError::Config(
                "voice_program is required when speak is enabled".into(),
            ));
        }

        Ok(())
    }
}
