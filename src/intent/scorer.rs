//! Token overlap scoring of a prompt against every intent rule

use crate::intent::catalogue::IntentCatalogue;
use crate::intent::rule::IntentRule;

/// Match score of one rule for one prompt
pub type Score = u32;

/// Score every rule in catalogue order.
pub fn score_catalogue(tokens: &[String], catalogue: &IntentCatalogue) -> Vec<Score> {
    catalogue
        .rules()
        .iter()
        .map(|rule| score_rule(tokens, rule))
        .collect()
}

/// Score a single rule.
///
/// Each input token found in `required_words` adds one point, counting
/// repeats. Pattern words only count once that tally equals the number of
/// required words; a rule with hard prerequisites never earns pattern points
/// from a partial match.
pub fn score_rule(tokens: &[String], rule: &IntentRule) -> Score {
    let required_score = count_members(tokens, |t| rule.required_words.contains(t));

    let pattern_score = if required_score as usize == rule.required_words.len() {
        count_members(tokens, |t| rule.patterns.contains(t))
    } else {
        0
    };

    required_score + pattern_score
}

fn count_members(tokens: &[String], is_member: impl Fn(&str) -> bool) -> Score {
    tokens.iter().filter(|t| is_member(t.as_str())).count() as Score
}
