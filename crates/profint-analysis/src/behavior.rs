//! Posting cadence, caption themes and interaction patterns.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Timelike};

use profint_core::precision::round_2dp;
use profint_core::{
    ActivityWindow, AnalysisConfig, AutomationIndicator, BehaviorSummary, ContentTypeCounts,
    EngagementSummary, HashtagSummary, MediaKind, NoDataReason, Post, PostingCadence, Section,
    TermCount,
};

use crate::lexicon::{is_stop_word, THEME_KEYWORDS};
use crate::terms::{distinct_count, rank_terms};

const SECONDS_PER_DAY: f64 = 86_400.0;
const MIN_THEME_TOKEN_CHARS: usize = 3;

/// Summarizes the post history.
///
/// An empty history yields `no_data` with reason `no_posts`. The order of
/// `posts` does not matter; everything order-sensitive (intervals, theme
/// tie-breaks, first-seen locations) reads the posts oldest first.
#[must_use]
pub fn analyze_behavior(posts: &[Post], config: &AnalysisConfig) -> Section<BehaviorSummary> {
    let mut chronological: Vec<&Post> = posts.iter().collect();
    chronological.sort_by_key(|post| post.taken_at);

    let (Some(first), Some(last)) = (chronological.first(), chronological.last()) else {
        return Section::no_data(NoDataReason::NoPosts);
    };
    let activity_window = ActivityWindow {
        earliest: first.taken_at,
        latest: last.taken_at,
    };

    let summary = BehaviorSummary {
        post_count: u64::try_from(posts.len()).unwrap_or(u64::MAX),
        posting_frequency: posting_frequency(&chronological),
        dominant_themes: dominant_themes(&chronological, config.top_themes),
        activity_window,
        cadence: cadence(&chronological),
        content_types: content_types(&chronological),
        theme_categories: theme_categories(&chronological),
        engagement: engagement(&chronological),
        hashtags: hashtags(&chronological, config.top_hashtags),
        unique_mentions: distinct_count(
            chronological
                .iter()
                .flat_map(|post| post.mentions.iter().map(String::as_str)),
        ),
        locations: locations(&chronological),
        automation_indicators: automation_indicators(&chronological, config),
    };

    tracing::debug!(
        post_count = summary.post_count,
        themes = summary.dominant_themes.len(),
        "behavior analyzed"
    );
    Section::Available(summary)
}

/// Posts per 7-day window over the span between the first and last post.
#[allow(clippy::cast_precision_loss)]
fn posting_frequency(chronological: &[&Post]) -> Option<f64> {
    let (first, last) = (chronological.first()?, chronological.last()?);
    if chronological.len() < 2 {
        return None;
    }
    let span_days = (last.taken_at - first.taken_at).num_seconds() as f64 / SECONDS_PER_DAY;
    if span_days <= 0.0 {
        return None;
    }
    Some(round_2dp(chronological.len() as f64 / (span_days / 7.0)))
}

#[allow(clippy::cast_precision_loss)]
fn cadence(chronological: &[&Post]) -> PostingCadence {
    let mut hour_histogram = [0u64; 24];
    let mut weekday_histogram = [0u64; 7];
    let mut monthly_activity: BTreeMap<String, u64> = BTreeMap::new();

    for post in chronological {
        hour_histogram[post.taken_at.hour() as usize] += 1;
        weekday_histogram[post.taken_at.weekday().num_days_from_monday() as usize] += 1;
        *monthly_activity
            .entry(post.taken_at.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }

    let intervals: Vec<f64> = chronological
        .windows(2)
        .map(|pair| (pair[1].taken_at - pair[0].taken_at).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();

    let (average_days_between_posts, consistency_score) = if intervals.is_empty() {
        (None, None)
    } else {
        let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
        let variance =
            intervals.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / intervals.len() as f64;
        let consistency = if mean > 0.0 {
            (100.0 - (variance / mean) * 10.0).max(0.0)
        } else {
            50.0
        };
        (Some(round_2dp(mean)), Some(round_2dp(consistency)))
    };

    PostingCadence {
        average_days_between_posts,
        consistency_score,
        most_frequent_interval_days: most_frequent_interval(chronological),
        hour_histogram,
        weekday_histogram,
        monthly_activity,
    }
}

/// Mode of the whole-day gaps between consecutive posts.
fn most_frequent_interval(chronological: &[&Post]) -> Option<u64> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for pair in chronological.windows(2) {
        let days = u64::try_from((pair[1].taken_at - pair[0].taken_at).num_days()).unwrap_or(0);
        *counts.entry(days).or_insert(0) += 1;
    }
    // `max_by_key` keeps the last of equal counts, so walk longest gap first.
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, count)| count)
        .map(|(days, _)| days)
}

fn dominant_themes(chronological: &[&Post], top_themes: usize) -> Vec<TermCount> {
    rank_terms(
        chronological
            .iter()
            .flat_map(|post| theme_tokens(post.caption_text())),
        top_themes,
    )
}

/// Caption words that can carry a theme.
///
/// URLs, email addresses and `@mentions` are skipped; surrounding
/// punctuation is stripped (`#travel` counts as `travel`); tokens that are
/// short, numeric or stop words are dropped.
fn theme_tokens(caption: &str) -> Vec<String> {
    caption
        .split_whitespace()
        .filter(|raw| !is_link_like(raw))
        .filter_map(|raw| {
            let token = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            let keep = token.chars().count() >= MIN_THEME_TOKEN_CHARS
                && !token.chars().all(|c| c.is_ascii_digit())
                && !is_stop_word(&token);
            keep.then_some(token)
        })
        .collect()
}

fn is_link_like(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    raw.contains('@') || lower.contains("://") || lower.starts_with("www.")
}

fn content_types(chronological: &[&Post]) -> ContentTypeCounts {
    let mut counts = ContentTypeCounts::default();
    for post in chronological {
        match post.media_kind {
            MediaKind::Photo => counts.photo += 1,
            MediaKind::Video => counts.video += 1,
            MediaKind::Carousel => counts.carousel += 1,
        }
    }
    counts
}

/// Keyword hits per theme category across all captions, highest first.
/// Categories without a hit are left out.
fn theme_categories(chronological: &[&Post]) -> Vec<TermCount> {
    let text = chronological
        .iter()
        .map(|post| post.caption_text().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut categories: Vec<TermCount> = THEME_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let hits: usize = keywords.iter().map(|kw| text.matches(*kw).count()).sum();
            TermCount::new(*category, u64::try_from(hits).unwrap_or(u64::MAX))
        })
        .filter(|tc| tc.count > 0)
        .collect();
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories
}

#[allow(clippy::cast_precision_loss)]
fn engagement(chronological: &[&Post]) -> EngagementSummary {
    let n = chronological.len().max(1) as f64;
    let likes: u64 = chronological.iter().map(|p| p.like_count).sum();
    let comments: u64 = chronological.iter().map(|p| p.comment_count).sum();
    EngagementSummary {
        average_likes: round_2dp(likes as f64 / n),
        average_comments: round_2dp(comments as f64 / n),
    }
}

fn hashtags(chronological: &[&Post], top_hashtags: usize) -> HashtagSummary {
    let all = || {
        chronological
            .iter()
            .flat_map(|post| post.hashtags.iter().map(String::as_str))
    };
    HashtagSummary {
        unique_count: distinct_count(all()),
        top: rank_terms(all(), top_hashtags),
    }
}

/// Distinct location names in the order they first appear.
fn locations(chronological: &[&Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    chronological
        .iter()
        .filter_map(|post| post.location.as_deref())
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect()
}

fn automation_indicators(chronological: &[&Post], config: &AnalysisConfig) -> Vec<AutomationIndicator> {
    if chronological.len() < config.automation_min_posts {
        return Vec::new();
    }
    let hours: HashSet<u32> = chronological.iter().map(|p| p.taken_at.hour()).collect();
    if hours.len() <= config.automation_max_distinct_hours {
        vec![AutomationIndicator::RegularPostingHours]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "behavior_test.rs"]
mod tests;
