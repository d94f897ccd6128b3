//! Built-in intent handlers
//!
//! Thin wrappers around the clock, the process launcher and an HTTP lookup.
//! Intents without a handler here (summarizer, file chat, video downloader)
//! still resolve; they just produce no side channel.

pub mod clock;
pub mod launcher;
pub mod repeat;
pub mod wikipedia;

pub use clock::Clock;
pub use launcher::{TerminalLauncher, WebSearch};
pub use repeat::Repeat;
pub use wikipedia::WikipediaSearch;

use std::sync::Arc;

use crate::command::dispatcher::HandlerRegistry;
use crate::core::config::AssistantConfig;
use crate::session::voice::CommandVoice;

pub const TIME_TELLING: &str = "time-telling";
pub const REPEAT: &str = "repeat";
pub const OPEN_CMD: &str = "open-cmd";
pub const SEARCH_GOOGLE: &str = "search-google";
pub const PLAY_YOUTUBE_VIDEO: &str = "play-youtube-video";
pub const WIKIPEDIA_SEARCH: &str = "wikipedia-search";

/// Registry with every built-in handler, configured from `config`.
///
/// `repeat` speaks through the configured voice program whether or not the
/// session has speech turned on.
pub fn default_registry(config: &AssistantConfig) -> HandlerRegistry {
    let repeat_voice = Arc::new(CommandVoice::new(config.voice_program.clone()));
    let mut registry = HandlerRegistry::new();
    registry
        .register(TIME_TELLING, Clock::new())
        .register(REPEAT, Repeat::new(repeat_voice))
        .register(OPEN_CMD, TerminalLauncher::new(config.terminal_program.clone()))
        .register(SEARCH_GOOGLE, WebSearch::google(config.opener_program.clone()))
        .register(PLAY_YOUTUBE_VIDEO, WebSearch::youtube(config.opener_program.clone()))
        .register(WIKIPEDIA_SEARCH, WikipediaSearch::new(config.wikipedia_endpoint.clone()));
    registry
}
