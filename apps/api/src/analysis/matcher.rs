//! Keyword Matcher — whole-word search of catalog keywords in document text.

use std::collections::BTreeMap;

use crate::analysis::catalog::RoleCatalog;

/// Role → keywords found in the document, in catalog order.
/// Roles with no matches are absent.
pub type MatchedKeywords = BTreeMap<String, Vec<String>>;

/// Tests every keyword of every role against `text` as a whole word.
///
/// A keyword listed under several roles counts for each of them.
pub fn find_matching_keywords(text: &str, catalog: &RoleCatalog) -> MatchedKeywords {
    let mut matched = MatchedKeywords::new();

    for (role, keywords) in catalog.iter() {
        let found: Vec<String> = keywords
            .iter()
            .filter(|kw| kw.is_found_in(text))
            .map(|kw| kw.as_str().to_string())
            .collect();

        if !found.is_empty() {
            matched.insert(role.to_string(), found);
        }
    }

    matched
}
