//! Word tables for caption analysis.

/// Words skipped when ranking caption themes. Lowercase, three letters or
/// more (shorter tokens are dropped before this list is consulted).
pub(crate) const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "and", "any", "are", "because", "been",
    "before", "being", "below", "between", "both", "but", "can", "could", "did", "does", "doing",
    "down", "during", "each", "even", "every", "few", "for", "from", "further", "get", "got",
    "had", "has", "have", "having", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "into", "its", "itself", "just", "let", "like", "more", "most", "much", "must", "myself",
    "nor", "not", "now", "off", "once", "one", "only", "other", "our", "ours", "ourselves", "out",
    "over", "own", "really", "same", "she", "should", "some", "still", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "too", "under", "until", "very", "was", "way", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Keyword groups for the theme categories. A category scores one point per
/// occurrence of any of its keywords in the combined caption text.
pub(crate) const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "travel",
        &["travel", "trip", "vacation", "explore", "adventure", "journey"],
    ),
    (
        "fitness",
        &["fitness", "gym", "workout", "health", "exercise", "training"],
    ),
    (
        "food",
        &["food", "recipe", "cooking", "delicious", "restaurant", "meal"],
    ),
    (
        "fashion",
        &["fashion", "style", "outfit", "clothing", "designer", "trend"],
    ),
    (
        "business",
        &["business", "entrepreneur", "success", "money", "investment", "work"],
    ),
    (
        "lifestyle",
        &["lifestyle", "life", "happiness", "motivation", "inspiration", "goals"],
    ),
];

pub(crate) fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}
