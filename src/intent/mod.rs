//! Intent catalogue, tokenizer and scorer
//!
//! raw prompt -> split_parameters -> tokenize -> score_catalogue -> Vec<Score>

pub mod catalogue;
pub mod loader;
pub mod rule;
pub mod scorer;
pub mod tokenizer;

pub use catalogue::{CatalogueHandle, IntentCatalogue};
pub use loader::{catalogue_from_json, catalogue_from_toml, load_catalogue, CatalogueError};
pub use rule::IntentRule;
pub use scorer::{score_catalogue, score_rule, Score};
pub use tokenizer::{split_parameters, tokenize, PARAMETER_MARKER};
