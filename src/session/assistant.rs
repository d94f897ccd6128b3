//! The session boundary: one prompt in, one `ResolutionResult` out

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::command::dispatcher::{Dispatcher, HandlerRegistry};
use crate::command::resolver::{plan, Outcome, ResolutionResult};
use crate::intent::catalogue::CatalogueHandle;

/// Resolves prompts against a catalogue and runs the matching handler inline.
///
/// The random source only decides which response text is used; tags and
/// handler targets depend on the prompt alone.
pub struct Assistant<R = ChaCha8Rng> {
    catalogue: CatalogueHandle,
    dispatcher: Dispatcher,
    rng: R,
}

impl Assistant<ChaCha8Rng> {
    /// Seeded assistant; `None` seeds from entropy
    pub fn seeded(
        catalogue: CatalogueHandle,
        registry: Arc<HandlerRegistry>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(catalogue, registry, rng)
    }
}

impl<R: Rng> Assistant<R> {
    pub fn new(catalogue: CatalogueHandle, registry: Arc<HandlerRegistry>, rng: R) -> Self {
        Self {
            catalogue,
            dispatcher: Dispatcher::new(registry),
            rng,
        }
    }

    pub fn catalogue(&self) -> &CatalogueHandle {
        &self.catalogue
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// A random reply from the first (greeting) intent
    pub fn greeting(&mut self) -> String {
        let catalogue = self.catalogue.snapshot();
        catalogue
            .greeting()
            .responses
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve without running the handler
    pub fn plan(&mut self, prompt: &str) -> Outcome {
        let catalogue = self.catalogue.snapshot();
        plan(&catalogue, prompt, &mut self.rng)
    }

    /// Resolve a prompt and run its handler on the calling thread.
    ///
    /// Never fails: handler problems come back in the side channel.
    pub fn resolve(&mut self, prompt: &str) -> ResolutionResult {
        let outcome = self.plan(prompt);
        let side_channel = outcome
            .call
            .as_ref()
            .and_then(|call| self.dispatcher.dispatch(&outcome.tag, call));
        outcome.finish(side_channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::dispatcher::{HandlerCall, HandlerError, SideChannel};
    use crate::command::resolver::{EMPTY_TAG, UNKNOWN_TAG};
    use crate::intent::catalogue::IntentCatalogue;
    use crate::intent::rule::IntentRule;

    fn catalogue() -> CatalogueHandle {
        IntentCatalogue::new(vec![
            IntentRule::new("greeting", "say hello")
                .with_patterns(["hello", "hi"])
                .with_responses(["Welcome back!"]),
            IntentRule::new("repeat", "repeat something")
                .with_required(["repeat"])
                .with_responses(["Okay."]),
            IntentRule::new("wikipedia-search", "search wikipedia")
                .with_patterns(["wikipedia", "search"])
                .with_responses(["Searching."]),
            IntentRule::new("unknown", "").with_responses(["I did not get that."]),
        ])
        .unwrap()
        .into()
    }

    fn registry() -> Arc<HandlerRegistry> {
        let mut registry = HandlerRegistry::new();
        registry
            .register_fn("repeat", |call: &HandlerCall| {
                Ok(SideChannel::both(format!(" {}", call.parameter_text().unwrap_or(""))))
            })
            .register_fn("wikipedia-search", |_: &HandlerCall| {
                Err(HandlerError::Failed("offline".into()))
            });
        Arc::new(registry)
    }

    #[test]
    fn test_greeting_comes_from_first_intent() {
        let mut assistant = Assistant::seeded(catalogue(), registry(), Some(3));
        assert_eq!(assistant.greeting(), "Welcome back!");
    }

    #[test]
    fn test_resolve_runs_handler_with_parameters() {
        let mut assistant = Assistant::seeded(catalogue(), registry(), Some(3));
        let result = assistant.resolve("repeat -p good night");

        assert_eq!(result.tag, "repeat");
        assert_eq!(result.response, "Okay.");
        assert_eq!(result.display_text(), "Okay. good night");
    }

    #[test]
    fn test_resolve_contains_handler_error() {
        let mut assistant = Assistant::seeded(catalogue(), registry(), Some(3));
        let result = assistant.resolve("search wikipedia -p rust");

        assert_eq!(result.tag, "wikipedia-search");
        let side = result.side_channel.unwrap();
        assert!(side.display.contains("offline"));
        assert_eq!(side.display, side.speech);
    }

    #[test]
    fn test_resolve_greeting_without_handler_has_no_side_channel() {
        let mut assistant = Assistant::seeded(catalogue(), registry(), Some(3));
        let result = assistant.resolve("hello there");
        assert_eq!(result.tag, "greeting");
        assert!(result.side_channel.is_none());
    }

    #[test]
    fn test_resolve_empty_and_unknown() {
        let mut assistant = Assistant::seeded(catalogue(), registry(), Some(3));

        let empty = assistant.resolve("");
        assert_eq!(empty.tag, EMPTY_TAG);
        assert_eq!(empty.response, "");

        let unknown = assistant.resolve("bake me a cake");
        assert_eq!(unknown.tag, UNKNOWN_TAG);
        assert_eq!(unknown.response, "I did not get that.");
    }

    #[test]
    fn test_resolve_sees_swapped_catalogue() {
        let handle = catalogue();
        let mut assistant = Assistant::seeded(handle.clone(), registry(), Some(3));
        assert_eq!(assistant.resolve("weather").tag, UNKNOWN_TAG);

        handle.swap(
            IntentCatalogue::new(vec![
                IntentRule::new("greeting", "").with_responses(["Hi"]),
                IntentRule::new("weather", "check the weather")
                    .with_patterns(["weather"])
                    .with_responses(["Sunny."]),
                IntentRule::new("unknown", "").with_responses(["?"]),
            ])
            .unwrap(),
        );
        assert_eq!(assistant.resolve("weather").tag, "weather");
    }
}
