//! Decides which catalog field a free-text query is aimed at.
//!
//! The decision is an ordered rule table: the first rule whose predicate
//! holds picks the field, and anything unmatched is searched as a title.

use crate::types::search_field::SearchFieldTag;

/// Query fragments that mark a subject search. Matched as case-insensitive
/// substrings, so "sciences" still hits "science".
pub const GENRE_KEYWORDS: [&str; 7] = [
    "mystery", "romance", "horror", "thriller", "fantasy", "science", "fiction",
];

pub const FALLBACK: SearchFieldTag = SearchFieldTag::Title;

type Predicate = fn(&str) -> bool;

/// Checked top to bottom, first match wins.
pub const RULES: &[(Predicate, SearchFieldTag)] = &[
    (is_blank, SearchFieldTag::Title),
    (mentions_genre, SearchFieldTag::Subject),
    (has_several_words, SearchFieldTag::Author),
];

pub fn classify(query: &str) -> SearchFieldTag {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(query))
        .map(|(_, tag)| *tag)
        .unwrap_or(FALLBACK)
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

fn mentions_genre(query: &str) -> bool {
    let lower = query.to_lowercase();
    GENRE_KEYWORDS.iter().any(|genre| lower.contains(genre))
}

fn has_several_words(query: &str) -> bool {
    query.split_whitespace().nth(1).is_some()
}
