//! Mapping from [`crate::raw`] records to the typed model in `profint-core`.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use profint_core::{MediaKind, Post, Profile, RelationshipSet};

use crate::error::{Resource, SourceError};
use crate::raw::{LooseAccount, LooseNumber, LooseTimestamp, RawPost, RawProfile};

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w@])@([A-Za-z0-9_.]+)").expect("valid mention regex"));

/// Builds a [`Profile`] from a raw record.
///
/// Missing counts become 0, missing flags become `false`, and blank or `"N/A"`
/// text becomes absent.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] when the record carries no identifier.
/// `requested` is only used to name the missing profile in the error.
pub fn ingest_profile(raw: RawProfile, requested: &str) -> Result<Profile, SourceError> {
    let Some(identifier) = clean_text(raw.identifier) else {
        return Err(SourceError::NotFound {
            identifier: requested.to_owned(),
        });
    };

    Ok(Profile {
        identifier,
        platform_id: clean_text(raw.platform_id.map(crate::raw::LooseNumberOrText::into_text)),
        display_name: clean_text(raw.display_name),
        biography: clean_text(raw.biography).unwrap_or_default(),
        external_url: clean_text(raw.external_url),
        follower_count: count(raw.follower_count.as_ref()),
        following_count: count(raw.following_count.as_ref()),
        post_count: count(raw.post_count.as_ref()),
        is_private: raw.is_private.unwrap_or(false),
        is_verified: raw.is_verified.unwrap_or(false),
        is_business: raw.is_business.unwrap_or(false),
        business_category: clean_text(raw.business_category),
        profile_pic_url: clean_text(raw.profile_pic_url),
    })
}

/// Builds a [`RelationshipSet`] from the two raw lists.
///
/// Leading `@` signs are stripped and blank names dropped.
///
/// # Errors
///
/// Returns [`SourceError::Unavailable`] when either list is missing.
pub fn ingest_relationships(
    followers: Option<Vec<LooseAccount>>,
    following: Option<Vec<LooseAccount>>,
) -> Result<RelationshipSet, SourceError> {
    let (Some(followers), Some(following)) = (followers, following) else {
        return Err(SourceError::Unavailable {
            resource: Resource::Relationships,
            reason: "follower or following list missing".to_owned(),
        });
    };

    Ok(RelationshipSet::new(
        account_names(&followers),
        account_names(&following),
    ))
}

fn account_names(accounts: &[LooseAccount]) -> Vec<String> {
    accounts
        .iter()
        .filter_map(|account| normalize_handle(account.name()))
        .collect()
}

fn normalize_handle(name: &str) -> Option<String> {
    let handle = name.trim().trim_start_matches('@');
    (!handle.is_empty()).then(|| handle.to_owned())
}

/// Converts raw posts, dropping any without a usable timestamp, and returns
/// them newest first.
#[must_use]
pub fn ingest_posts(raw: Vec<RawPost>) -> Vec<Post> {
    let total = raw.len();
    let mut posts: Vec<Post> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, post)| ingest_post(post, index))
        .collect();

    let dropped = total - posts.len();
    if dropped > 0 {
        tracing::debug!(dropped, total, "skipped posts without a parseable timestamp");
    }

    // Stable sort keeps source order for posts sharing a timestamp.
    posts.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    posts
}

fn ingest_post(raw: RawPost, index: usize) -> Option<Post> {
    let taken_at = raw.taken_at.as_ref().and_then(parse_timestamp)?;

    let identifier = clean_text(raw.shortcode)
        .or_else(|| clean_text(raw.id.map(crate::raw::LooseNumberOrText::into_text)))
        .unwrap_or_else(|| format!("post-{index}"));

    let caption = clean_text(raw.caption);
    let caption_str = caption.as_deref().unwrap_or("");

    let hashtags = match raw.hashtags {
        Some(tags) => dedup_preserving_order(
            tags.iter()
                .filter_map(|tag| normalize_tag(tag))
                .collect(),
        ),
        None => extract_hashtags(caption_str),
    };

    let mentions = match raw.mentions {
        Some(accounts) => dedup_preserving_order(account_names(&accounts)),
        None => extract_mentions(caption_str),
    };

    let media_kind = media_kind(
        raw.media_kind.as_deref(),
        raw.is_video,
        raw.mediacount.as_ref().and_then(LooseNumber::to_u64),
        raw.media.len(),
    );

    Some(Post {
        identifier,
        taken_at,
        caption,
        like_count: count(raw.likes.as_ref()),
        comment_count: count(raw.comments.as_ref()),
        media: raw.media,
        media_kind,
        hashtags,
        mentions,
        location: raw
            .location
            .as_ref()
            .and_then(|loc| clean_text(loc.name().map(str::to_owned))),
    })
}

fn media_kind(
    explicit: Option<&str>,
    is_video: Option<bool>,
    item_count: Option<u64>,
    media_refs: usize,
) -> MediaKind {
    if let Some(kind) = explicit {
        match kind.trim().to_ascii_lowercase().as_str() {
            "video" | "graphvideo" | "reel" => return MediaKind::Video,
            "carousel" | "sidecar" | "graphsidecar" | "album" => return MediaKind::Carousel,
            "photo" | "image" | "graphimage" => return MediaKind::Photo,
            _ => {}
        }
    }
    if is_video == Some(true) {
        return MediaKind::Video;
    }
    if item_count.is_some_and(|n| n > 1) || media_refs > 1 {
        return MediaKind::Carousel;
    }
    MediaKind::Photo
}

/// Parses RFC 3339, naive `YYYY-MM-DD[T ]HH:MM:SS` (as UTC), or Unix seconds.
pub(crate) fn parse_timestamp(raw: &LooseTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        LooseTimestamp::Seconds(secs) => DateTime::from_timestamp(*secs, 0),
        #[allow(clippy::cast_possible_truncation)]
        LooseTimestamp::FractionalSeconds(secs) if secs.is_finite() => {
            DateTime::from_timestamp(secs.trunc() as i64, 0)
        }
        LooseTimestamp::FractionalSeconds(_) => None,
        LooseTimestamp::Text(text) => parse_timestamp_text(text.trim()),
    }
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Hashtags in `text`, lower-cased without `#`, first occurrence order.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    dedup_preserving_order(
        HASHTAG_RE
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).and_then(|m| normalize_tag(m.as_str())))
            .collect(),
    )
}

/// `@mentions` in `text` without the `@`, first occurrence order. Email
/// addresses are not mentions.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    dedup_preserving_order(
        MENTION_RE
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim_end_matches('.'))
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}

fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim().trim_start_matches('#');
    (!tag.is_empty()).then(|| tag.to_lowercase())
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

fn count(value: Option<&LooseNumber>) -> u64 {
    value.and_then(LooseNumber::to_u64).unwrap_or(0)
}

/// Trims `value`; blank strings and `"N/A"` count as absent.
fn clean_text(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
