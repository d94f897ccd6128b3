//! Handler dispatch - maps a resolved tag to its handler and contains failures

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use thiserror::Error;

use crate::intent::tokenizer::tokenize;

/// Prefix of every message produced for a failed handler
pub const APOLOGY_PREFIX: &str = "Sorry, your prompt is giving me an error: ";

/// Extra output from a handler, shown and spoken after the main response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideChannel {
    /// Text appended to the printed response
    pub display: String,
    /// Text appended to the spoken response
    pub speech: String,
}

impl SideChannel {
    pub fn new(display: impl Into<String>, speech: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            speech: speech.into(),
        }
    }

    /// Same text on both channels
    pub fn both(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display: text.clone(),
            speech: text,
        }
    }

    pub fn apology(error: &HandlerError) -> Self {
        Self::both(format!("{APOLOGY_PREFIX}{error}"))
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty() && self.speech.is_empty()
    }
}

/// Everything a handler gets to see about the prompt that selected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerCall {
    /// Core prompt and parameters rejoined around the marker
    pub prompt: String,
    /// The part of the prompt that was scored
    pub core_prompt: String,
    /// Text after the first `-p` marker, untouched
    pub parameters: String,
}

impl HandlerCall {
    pub fn new(core_prompt: impl Into<String>, parameters: impl Into<String>) -> Self {
        let core_prompt = core_prompt.into();
        let parameters = parameters.into();
        Self {
            prompt: format!("{core_prompt} -p {parameters}"),
            core_prompt,
            parameters,
        }
    }

    /// Parameter text with surrounding whitespace removed, `None` when blank
    pub fn parameter_text(&self) -> Option<&str> {
        let text = self.parameters.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Whether the scored part of the prompt contains `word` as a token
    pub fn mentions(&self, word: &str) -> bool {
        tokenize(&self.core_prompt).iter().any(|token| token == word)
    }
}

/// Failure reported by a handler
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
    #[error("handler crashed: {0}")]
    Panicked(String),
}

/// A capability bound to one intent tag
pub trait Handler: Send + Sync {
    fn handle(&self, call: &HandlerCall) -> Result<SideChannel, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&HandlerCall) -> Result<SideChannel, HandlerError> + Send + Sync,
{
    fn handle(&self, call: &HandlerCall) -> Result<SideChannel, HandlerError> {
        self(call)
    }
}

/// Tag -> handler lookup supplied by the surrounding application
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: AHashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same tag
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        handler: impl Handler + 'static,
    ) -> &mut Self {
        self.handlers.insert(tag.into(), Arc::new(handler));
        self
    }

    /// Register a closure as a handler
    pub fn register_fn<F>(&mut self, tag: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerCall) -> Result<SideChannel, HandlerError> + Send + Sync + 'static,
    {
        self.register(tag, handler)
    }

    pub fn get(&self, tag: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(tag).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Invokes handlers and turns every failure into an apology side channel
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Run the handler registered for `tag`.
    ///
    /// Returns `None` when no handler is registered. Never fails: handler
    /// errors and panics come back as [`SideChannel::apology`].
    pub fn dispatch(&self, tag: &str, call: &HandlerCall) -> Option<SideChannel> {
        let Some(handler) = self.registry.get(tag) else {
            tracing::debug!(tag, "No handler registered");
            return None;
        };

        tracing::info!(tag, parameters = call.parameters.trim(), "Dispatching intent");

        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(call))) {
            Ok(Ok(side_channel)) => Some(side_channel),
            Ok(Err(error)) => {
                tracing::warn!(tag, %error, "Handler failed");
                Some(SideChannel::apology(&error))
            }
            Err(payload) => {
                let error = HandlerError::Panicked(panic_message(payload.as_ref()));
                tracing::error!(tag, %error, "Handler panicked");
                Some(SideChannel::apology(&error))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
