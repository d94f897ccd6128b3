//! Load intent catalogues from JSON or TOML files

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::intent::catalogue::IntentCatalogue;
use crate::intent::rule::IntentRule;

/// Errors that make a catalogue unusable. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Catalogue needs a greeting and a fallback intent, found {0} intent(s)")]
    TooFewIntents(usize),
    #[error("Intent #{0} has a blank tag")]
    BlankTag(usize),
    #[error("Duplicate intent tag: {0}")]
    DuplicateTag(String),
    #[error("Intent '{0}' has no responses")]
    NoResponses(String),
    #[error("Intent '{0}' contains a blank match word")]
    BlankWord(String),
    #[error("Fallback intent '{0}' must have no required words and no patterns")]
    FallbackNotBlank(String),
}

/// On-disk layouts: a bare list of intents, or a table with an `intents` list
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogueFile {
    Bare(Vec<IntentRule>),
    Wrapped { intents: Vec<IntentRule> },
}

impl CatalogueFile {
    fn into_rules(self) -> Vec<IntentRule> {
        match self {
            CatalogueFile::Bare(rules) => rules,
            CatalogueFile::Wrapped { intents } => intents,
        }
    }
}

/// Parse and validate a catalogue from JSON text
pub fn catalogue_from_json(json: &str) -> Result<IntentCatalogue, CatalogueError> {
    let file: CatalogueFile = serde_json::from_str(json)?;
    IntentCatalogue::new(file.into_rules())
}

/// Parse and validate a catalogue from TOML text (`[[intents]]` tables)
pub fn catalogue_from_toml(content: &str) -> Result<IntentCatalogue, CatalogueError> {
    let file: CatalogueFile = toml::from_str(content)?;
    IntentCatalogue::new(file.into_rules())
}

/// Load a catalogue file, picking the format from its extension.
///
/// `.toml` files are read as TOML; anything else is read as JSON.
pub fn load_catalogue(path: &Path) -> Result<IntentCatalogue, CatalogueError> {
    let content = fs::read_to_string(path)?;
    let catalogue = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => catalogue_from_toml(&content)?,
        _ => catalogue_from_json(&content)?,
    };

    tracing::info!(
        "Loaded {} intents from {}",
        catalogue.len(),
        path.display()
    );
    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_JSON: &str = r#"[
        {"tag": "greeting", "verb": "say hello", "patterns": ["hello"], "responses": ["Hi!"]},
        {"tag": "unknown", "verb": "", "responses": ["Sorry?"]}
    ]"#;

    #[test]
    fn test_parse_bare_json_list() {
        let catalogue = catalogue_from_json(MINIMAL_JSON).unwrap();
        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.greeting().tag, "greeting");
        assert_eq!(catalogue.fallback().tag, "unknown");
    }

    #[test]
    fn test_parse_wrapped_json() {
        let json = format!(r#"{{"intents": {}}}"#, MINIMAL_JSON);
        let catalogue = catalogue_from_json(&json).unwrap();
        assert_eq!(catalogue.len(), 2);
    }

    #[test]
    fn test_parse_toml_tables() {
        let toml_str = r#"
[[intents]]
tag = "greeting"
verb = "say hello"
patterns = ["hello"]
responses = ["Hi!"]

[[intents]]
tag = "repeat"
verb = "repeat something"
required-words = ["repeat"]
responses = ["Okay"]

[[intents]]
tag = "unknown"
responses = ["Sorry?"]
"#;
        let catalogue = catalogue_from_toml(toml_str).unwrap();
        assert_eq!(catalogue.len(), 3);
        assert!(catalogue.get("repeat").unwrap().required_words.contains("repeat"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = catalogue_from_json("[{\"tag\": ");
        assert!(matches!(result, Err(CatalogueError::JsonError(_))));
    }

    #[test]
    fn test_missing_responses_field_is_error() {
        let json = r#"[{"tag": "a"}, {"tag": "b", "responses": ["x"]}]"#;
        assert!(catalogue_from_json(json).is_err());
    }

    #[test]
    fn test_load_catalogue_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MINIMAL_JSON.as_bytes()).unwrap();

        let catalogue = load_catalogue(file.path()).unwrap();
        assert_eq!(catalogue.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_catalogue(Path::new("definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogueError::IoError(_))));
    }

    #[test]
    fn test_shipped_catalogue_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/intents.json");
        let catalogue = load_catalogue(&path).unwrap();
        assert_eq!(catalogue.greeting().tag, "greeting");
        assert_eq!(catalogue.fallback().tag, "unknown");
    }
}
