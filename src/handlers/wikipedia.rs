//! Encyclopedia summary lookup
//!
//! Parameters name the page; a leading digit sets how many sentences of the
//! summary to keep (`-p 3 rust language`). The request is blocking, so this
//! handler belongs on a worker thread.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::command::dispatcher::{Handler, HandlerCall, HandlerError, SideChannel};

const DEFAULT_SENTENCES: usize = 2;
const DEFAULT_TOPIC: &str = "Wikipedia";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Subset of the page-summary response we use
#[derive(Debug, Deserialize)]
struct PageSummary {
    extract: String,
}

#[derive(Debug, Clone)]
pub struct WikipediaSearch {
    endpoint: String,
}

impl WikipediaSearch {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn page_url(&self, topic: &str) -> Result<Url, HandlerError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| HandlerError::Failed(format!("bad endpoint {}: {e}", self.endpoint)))?;
        url.path_segments_mut()
            .map_err(|_| {
                HandlerError::Failed(format!("endpoint {} cannot take a path", self.endpoint))
            })?
            .pop_if_empty()
            .push(&topic.replace(' ', "_"));
        Ok(url)
    }

    fn fetch(&self, topic: &str) -> Result<String, HandlerError> {
        let url = self.page_url(topic)?;
        tracing::debug!(%url, "Fetching page summary");

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client.get(url).send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(HandlerError::Failed(format!(
                "I could not find a page about {topic}"
            ))),
            status if !status.is_success() => Err(HandlerError::Failed(format!(
                "the encyclopedia answered {status}"
            ))),
            _ => Ok(response.json::<PageSummary>()?.extract),
        }
    }
}

impl Handler for WikipediaSearch {
    fn handle(&self, call: &HandlerCall) -> Result<SideChannel, HandlerError> {
        let (sentences, topic) = parse_query(call.parameter_text().unwrap_or(DEFAULT_TOPIC));
        let summary = self.fetch(topic)?;
        Ok(SideChannel::both(format!(
            "\n{}",
            first_sentences(&summary, sentences)
        )))
    }
}

/// Split an optional leading sentence count off the topic
pub fn parse_query(query: &str) -> (usize, &str) {
    let query = query.trim();
    let mut chars = query.chars();
    match chars.next().and_then(|c| c.to_digit(10)) {
        Some(count) if count > 0 => {
            let topic = chars.as_str().trim();
            if topic.is_empty() {
                (count as usize, DEFAULT_TOPIC)
            } else {
                (count as usize, topic)
            }
        }
        _ => (DEFAULT_SENTENCES, query),
    }
}

/// First `count` sentences of `text`; a sentence ends at `.`, `!` or `?`
/// followed by whitespace or the end of the text.
pub fn first_sentences(text: &str, count: usize) -> &str {
    let text = text.trim();
    let mut seen = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                seen += 1;
                if seen == count {
                    return &text[..index + c.len_utf8()];
                }
            }
        }
    }

    text
}
