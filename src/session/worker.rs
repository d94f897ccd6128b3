//! Async session worker - runs handlers off the calling task with a deadline

use std::time::Duration;

use rand::Rng;

use crate::command::dispatcher::{HandlerError, SideChannel};
use crate::command::resolver::ResolutionResult;
use crate::session::assistant::Assistant;

/// Wraps an [`Assistant`] so a slow or blocking handler cannot stall the
/// caller's runtime.
///
/// Scoring still happens on the calling task. The handler runs on tokio's
/// blocking pool; past `timeout` the call is reported as failed and its
/// result, if it ever arrives, is discarded.
pub struct SessionWorker<R = rand_chacha::ChaCha8Rng> {
    assistant: Assistant<R>,
    timeout: Duration,
}

impl<R: Rng> SessionWorker<R> {
    pub fn new(assistant: Assistant<R>, timeout: Duration) -> Self {
        Self { assistant, timeout }
    }

    pub fn assistant(&mut self) -> &mut Assistant<R> {
        &mut self.assistant
    }

    pub async fn resolve(&mut self, prompt: &str) -> ResolutionResult {
        let outcome = self.assistant.plan(prompt);

        let Some(call) = outcome.call.clone() else {
            return outcome.finish(None);
        };

        let dispatcher = self.assistant.dispatcher().clone();
        let tag = outcome.tag.clone();
        let task = tokio::task::spawn_blocking(move || dispatcher.dispatch(&tag, &call));

        let side_channel = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(side_channel)) => side_channel,
            Ok(Err(join_error)) => {
                let error = HandlerError::Panicked(join_error.to_string());
                tracing::error!(tag = %outcome.tag, %error, "Handler worker failed");
                Some(SideChannel::apology(&error))
            }
            Err(_) => {
                let error = HandlerError::TimedOut(self.timeout);
                tracing::warn!(tag = %outcome.tag, %error, "Handler timed out");
                Some(SideChannel::apology(&error))
            }
        };

        outcome.finish(side_channel)
    }
}
