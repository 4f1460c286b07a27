//! Loosely typed records as sources actually return them.
//!
//! Every field is optional and several accept more than one JSON shape (counts
//! as numbers or numeric strings, timestamps as RFC 3339 strings or Unix
//! seconds, accounts as bare names or `{ "username": ... }` objects). Nothing
//! outside [`crate::ingest`] should read these types.

use serde::Deserialize;

/// A count that may arrive as an integer, a float or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(u64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// Best-effort conversion; negative, non-finite and non-numeric values yield `None`.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            LooseNumber::Int(n) => Some(*n),
            LooseNumber::Float(f) => float_to_u64(*f),
            LooseNumber::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
                cleaned
                    .parse::<u64>()
                    .ok()
                    .or_else(|| cleaned.parse::<f64>().ok().and_then(float_to_u64))
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_u64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64)
}

/// A timestamp as RFC 3339 text, a naive `YYYY-MM-DD HH:MM:SS` string
/// (interpreted as UTC), or Unix seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseTimestamp {
    Seconds(i64),
    FractionalSeconds(f64),
    Text(String),
}

/// An account reference: either a bare name or an object carrying one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseAccount {
    Name(String),
    Object {
        #[serde(alias = "identifier", alias = "handle")]
        username: String,
    },
}

impl LooseAccount {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            LooseAccount::Name(name) | LooseAccount::Object { username: name } => name,
        }
    }
}

/// A location: either a bare name or an object with a `name` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseLocation {
    Name(String),
    Object { name: Option<String> },
}

impl LooseLocation {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            LooseLocation::Name(name) => Some(name),
            LooseLocation::Object { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    #[serde(alias = "username", alias = "handle")]
    pub identifier: Option<String>,
    #[serde(alias = "userid", alias = "user_id")]
    pub platform_id: Option<LooseNumberOrText>,
    #[serde(alias = "full_name")]
    pub display_name: Option<String>,
    #[serde(alias = "bio")]
    pub biography: Option<String>,
    #[serde(alias = "external_link", alias = "website")]
    pub external_url: Option<String>,
    #[serde(alias = "followers")]
    pub follower_count: Option<LooseNumber>,
    #[serde(alias = "followees", alias = "following")]
    pub following_count: Option<LooseNumber>,
    #[serde(alias = "mediacount", alias = "posts_count", alias = "media_count")]
    pub post_count: Option<LooseNumber>,
    pub is_private: Option<bool>,
    pub is_verified: Option<bool>,
    #[serde(alias = "is_business_account")]
    pub is_business: Option<bool>,
    #[serde(alias = "business_category_name")]
    pub business_category: Option<String>,
    #[serde(alias = "profile_pic")]
    pub profile_pic_url: Option<String>,
}

/// Platform ids show up both as numbers and as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumberOrText {
    Int(u64),
    Text(String),
}

impl LooseNumberOrText {
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            LooseNumberOrText::Int(n) => n.to_string(),
            LooseNumberOrText::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    pub shortcode: Option<String>,
    pub id: Option<LooseNumberOrText>,
    #[serde(alias = "date_utc", alias = "timestamp")]
    pub taken_at: Option<LooseTimestamp>,
    pub caption: Option<String>,
    #[serde(alias = "like_count")]
    pub likes: Option<LooseNumber>,
    #[serde(alias = "comment_count")]
    pub comments: Option<LooseNumber>,
    #[serde(default, alias = "media_urls")]
    pub media: Vec<String>,
    pub is_video: Option<bool>,
    /// Explicit `photo` / `video` / `carousel` (also `image`, `sidecar`).
    #[serde(alias = "typename")]
    pub media_kind: Option<String>,
    /// Number of items in the post; more than one means a carousel.
    pub mediacount: Option<LooseNumber>,
    #[serde(alias = "caption_hashtags")]
    pub hashtags: Option<Vec<String>>,
    #[serde(alias = "tagged_users")]
    pub mentions: Option<Vec<LooseAccount>>,
    pub location: Option<LooseLocation>,
}

/// Body of a relationships response. A missing list means the source could
/// not provide it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRelationships {
    pub followers: Option<Vec<LooseAccount>>,
    #[serde(alias = "followees")]
    pub following: Option<Vec<LooseAccount>>,
}

/// Body of a posts response: either a bare array or `{ "posts": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPostsPage {
    List(Vec<RawPost>),
    Envelope { posts: Vec<RawPost> },
}

impl RawPostsPage {
    #[must_use]
    pub fn into_posts(self) -> Vec<RawPost> {
        match self {
            RawPostsPage::List(posts) | RawPostsPage::Envelope { posts } => posts,
        }
    }
}

/// One offline capture of everything a run needs. `null` or missing lists
/// mean that resource was not captured.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub profile: RawProfile,
    pub followers: Option<Vec<LooseAccount>>,
    #[serde(alias = "followees")]
    pub following: Option<Vec<LooseAccount>>,
    pub posts: Option<Vec<RawPost>>,
}
