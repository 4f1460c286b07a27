//! Frequency ranking shared by the theme and hashtag summaries.

use std::collections::HashMap;

use profint_core::TermCount;

/// Counts `terms` and returns the `limit` most frequent. Ties keep the order
/// in which the terms first appeared.
pub(crate) fn rank_terms<I, S>(terms: I, limit: usize) -> Vec<TermCount>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: HashMap<String, (u64, usize)> = HashMap::new();
    for (position, term) in terms.into_iter().enumerate() {
        counts
            .entry(term.into())
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<(String, u64, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);
    ranked
        .into_iter()
        .map(|(term, count, _)| TermCount::new(term, count))
        .collect()
}

/// Number of distinct values in `terms`.
pub(crate) fn distinct_count<'a, I>(terms: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: std::collections::HashSet<&str> = terms.into_iter().collect();
    u64::try_from(distinct.len()).unwrap_or(u64::MAX)
}
