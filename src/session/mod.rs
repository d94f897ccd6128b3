//! Conversational sessions
//!
//! A [`Conversation`] greets once, then for each prompt: log it, resolve it
//! through the [`SessionWorker`], log the answer and speak it.

pub mod assistant;
pub mod transcript;
pub mod voice;
pub mod worker;

pub use assistant::Assistant;
pub use transcript::Transcript;
pub use voice::{CommandVoice, SilentVoice, Voice};
pub use worker::SessionWorker;

use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::command::resolver::ResolutionResult;
use crate::intent::catalogue::IntentCatalogue;

pub struct Conversation<R = ChaCha8Rng> {
    id: Uuid,
    worker: SessionWorker<R>,
    voice: Arc<dyn Voice + Sync>,
    transcript: Option<Transcript>,
}

impl<R: Rng> Conversation<R> {
    pub fn new(
        worker: SessionWorker<R>,
        voice: Arc<dyn Voice + Sync>,
        transcript: Option<Transcript>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            worker,
            voice,
            transcript,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Open the session: mark the transcript and speak a greeting.
    ///
    /// Returns the greeting text for display.
    pub async fn start(&mut self) -> String {
        if let Some(transcript) = self.transcript.as_mut() {
            if let Err(e) = transcript.begin_session(self.id) {
                tracing::warn!("Failed to write transcript {}: {}", transcript.path().display(), e);
            }
        }

        let greeting = self.worker.assistant().greeting();
        tracing::info!(session = %self.id, "Session started");
        self.speak(greeting.clone()).await;
        greeting
    }

    /// Answer one prompt. Transcript and speech failures are logged only.
    pub async fn respond(&mut self, prompt: &str) -> ResolutionResult {
        if let Some(transcript) = self.transcript.as_mut() {
            if let Err(e) = transcript.record_prompt(prompt) {
                tracing::warn!("Failed to write transcript {}: {}", transcript.path().display(), e);
            }
        }

        let result = self.worker.resolve(prompt).await;
        tracing::debug!(session = %self.id, tag = %result.tag, "Resolved prompt");

        if let Some(transcript) = self.transcript.as_mut() {
            if let Err(e) = transcript.record_response(&result) {
                tracing::warn!("Failed to write transcript {}: {}", transcript.path().display(), e);
            }
        }

        self.speak(result.speech_text()).await;
        result
    }

    /// Swap in a new catalogue for every later prompt
    pub fn reload(&mut self, catalogue: IntentCatalogue) {
        let intents = catalogue.len();
        self.worker.assistant().catalogue().swap(catalogue);
        tracing::info!(session = %self.id, intents, "Catalogue reloaded");
    }

    async fn speak(&self, text: String) {
        let voice = Arc::clone(&self.voice);
        match tokio::task::spawn_blocking(move || voice.say(&text)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Speech failed: {}", e),
            Err(e) => tracing::warn!("Speech worker failed: {}", e),
        }
    }
}
