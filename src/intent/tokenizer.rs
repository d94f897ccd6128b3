//! Prompt tokenization and parameter extraction

/// Marker separating the scored part of a prompt from its handler parameters
pub const PARAMETER_MARKER: &str = "-p";

/// Punctuation that ends a token, in addition to whitespace
const SEPARATORS: [char; 5] = [',', ';', '?', '!', '.'];

/// Split a raw prompt at the first parameter marker.
///
/// Returns `(core_prompt, parameters)`. Without a marker the whole prompt is
/// the core and the parameters are empty. Neither half is trimmed.
pub fn split_parameters(prompt: &str) -> (&str, &str) {
    prompt.split_once(PARAMETER_MARKER).unwrap_or((prompt, ""))
}

/// Lowercase `text` and split it into words.
///
/// Words are separated by whitespace runs or by any of `, ; ? ! .`; blank
/// fragments between adjacent separators are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
