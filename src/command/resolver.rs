//! Intent resolution - picks the outcome of a prompt from its score vector

use rand::seq::SliceRandom;
use rand::Rng;

use crate::command::dispatcher::{HandlerCall, SideChannel};
use crate::intent::catalogue::IntentCatalogue;
use crate::intent::rule::IntentRule;
use crate::intent::scorer::{score_catalogue, Score};
use crate::intent::tokenizer::{split_parameters, tokenize};

/// Tag returned for a blank prompt
pub const EMPTY_TAG: &str = "empty";
/// Tag returned when nothing scored above zero
pub const UNKNOWN_TAG: &str = "unknown";
/// Tag returned alongside a clarification question
pub const CLASH_TAG: &str = "";

/// What the scores say about a prompt, before any response is picked
#[derive(Debug, Clone)]
pub enum Decision<'c> {
    /// Exactly two rules tied for the top score
    Clash(Vec<&'c IntentRule>),
    /// The core prompt is the empty string
    Empty,
    /// First rule in catalogue order holding the top score
    Match(&'c IntentRule),
    /// Every rule scored zero
    Fallback(&'c IntentRule),
}

/// Decide between clash, empty, match and fallback, in that order.
///
/// Only a two-way tie asks for clarification. A tie between three or more
/// rules goes to the first of them in catalogue order. Scores are paired with
/// rules by position; entries past the end of either side are ignored.
pub fn decide<'c>(
    catalogue: &'c IntentCatalogue,
    core_prompt: &str,
    scores: &[Score],
) -> Decision<'c> {
    let scored: Vec<(&'c IntentRule, Score)> =
        catalogue.rules().iter().zip(scores.iter().copied()).collect();
    let best = scored.iter().map(|&(_, score)| score).max().unwrap_or(0);
    let winners: Vec<&'c IntentRule> = scored
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(rule, _)| rule)
        .collect();

    if winners.len() == 2 {
        return Decision::Clash(winners);
    }

    if core_prompt.is_empty() {
        return Decision::Empty;
    }

    match winners.first() {
        Some(&rule) if best != 0 => Decision::Match(rule),
        _ => Decision::Fallback(catalogue.fallback()),
    }
}

/// `"Do you want <a> or <b>"` built from the tied rules' verbs
pub fn clash_question(rules: &[&IntentRule]) -> String {
    let verbs: Vec<&str> = rules.iter().map(|rule| rule.verb.as_str()).collect();
    format!("Do you want {}", verbs.join(" or "))
}

/// A resolved prompt whose handler, if any, has not run yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub response: String,
    pub tag: String,
    /// Set only for a match; the handler to run is looked up by `tag`
    pub call: Option<HandlerCall>,
}

impl Outcome {
    fn reply(response: String, tag: &str) -> Self {
        Self {
            response,
            tag: tag.to_string(),
            call: None,
        }
    }

    /// Attach the handler's output
    pub fn finish(self, side_channel: Option<SideChannel>) -> ResolutionResult {
        ResolutionResult {
            response: self.response,
            side_channel,
            tag: self.tag,
        }
    }
}

/// Final answer for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub response: String,
    pub side_channel: Option<SideChannel>,
    pub tag: String,
}

impl ResolutionResult {
    /// Response followed by the display side channel
    pub fn display_text(&self) -> String {
        match &self.side_channel {
            Some(side) => format!("{}{}", self.response, side.display),
            None => self.response.clone(),
        }
    }

    /// Response followed by the speech side channel
    pub fn speech_text(&self) -> String {
        match &self.side_channel {
            Some(side) => format!("{}{}", self.response, side.speech),
            None => self.response.clone(),
        }
    }
}

/// Tokenize, score and decide, picking a response with `rng`.
///
/// Pure apart from the random draw; the handler is left for the caller.
pub fn plan<R: Rng + ?Sized>(catalogue: &IntentCatalogue, prompt: &str, rng: &mut R) -> Outcome {
    let (core_prompt, parameters) = split_parameters(prompt);
    let tokens = tokenize(core_prompt);
    let scores = score_catalogue(&tokens, catalogue);
    tracing::debug!(?tokens, ?scores, "Scored prompt");

    match decide(catalogue, core_prompt, &scores) {
        Decision::Clash(rules) => {
            let question = clash_question(&rules);
            tracing::debug!(%question, "Intent clash");
            Outcome::reply(question, CLASH_TAG)
        }
        Decision::Empty => Outcome::reply(String::new(), EMPTY_TAG),
        Decision::Match(rule) => Outcome {
            response: pick_response(rule, rng),
            tag: rule.tag.clone(),
            call: Some(HandlerCall::new(core_prompt, parameters)),
        },
        Decision::Fallback(rule) => Outcome::reply(pick_response(rule, rng), UNKNOWN_TAG),
    }
}

fn pick_response<R: Rng + ?Sized>(rule: &IntentRule, rng: &mut R) -> String {
    rule.responses.choose(rng).cloned().unwrap_or_default()
}
