//! Immutable snapshots of the target account as supplied by a data source.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile metadata for the target account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Handle the run was started for (e.g. the username).
    pub identifier: String,
    /// Numeric or opaque id assigned by the platform, when known.
    pub platform_id: Option<String>,
    pub display_name: Option<String>,
    /// Biography text. Empty when the account has none.
    pub biography: String,
    /// The profile's dedicated link field.
    pub external_url: Option<String>,
    pub follower_count: u64,
    pub following_count: u64,
    pub post_count: u64,
    pub is_private: bool,
    pub is_verified: bool,
    pub is_business: bool,
    pub business_category: Option<String>,
    pub profile_pic_url: Option<String>,
}

impl Profile {
    /// Creates an empty public profile for `identifier`.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.is_private
    }

    #[must_use]
    pub fn has_biography(&self) -> bool {
        !self.biography.trim().is_empty()
    }
}

/// Follower and following identifiers for the target account.
///
/// Sources often return a sample rather than the full lists, so the declared
/// totals from the profile can be attached with [`RelationshipSet::with_totals`].
/// The effective counts never drop below the sampled set sizes, which keeps
/// `mutual_count <= min(follower_count, following_count)` true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipSet {
    pub followers: BTreeSet<String>,
    pub following: BTreeSet<String>,
    pub follower_total: Option<u64>,
    pub following_total: Option<u64>,
}

impl RelationshipSet {
    pub fn new<F, G, S>(followers: F, following: G) -> Self
    where
        F: IntoIterator<Item = S>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            followers: followers.into_iter().map(Into::into).collect(),
            following: following.into_iter().map(Into::into).collect(),
            follower_total: None,
            following_total: None,
        }
    }

    /// Attaches the totals the platform reports for the full lists.
    #[must_use]
    pub fn with_totals(mut self, followers: u64, following: u64) -> Self {
        self.follower_total = Some(followers);
        self.following_total = Some(following);
        self
    }

    /// Identifiers present in both the follower and the following set.
    pub fn mutuals(&self) -> impl Iterator<Item = &String> {
        self.followers.intersection(&self.following)
    }

    #[must_use]
    pub fn follower_count(&self) -> u64 {
        effective_count(self.follower_total, self.followers.len())
    }

    #[must_use]
    pub fn following_count(&self) -> u64 {
        effective_count(self.following_total, self.following.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.follower_count() == 0 && self.following_count() == 0
    }
}

fn effective_count(total: Option<u64>, sampled: usize) -> u64 {
    let sampled = u64::try_from(sampled).unwrap_or(u64::MAX);
    total.unwrap_or(0).max(sampled)
}

/// How a post's media is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
    Carousel,
}

/// A single post from the target's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub identifier: String,
    pub taken_at: DateTime<Utc>,
    pub caption: Option<String>,
    pub like_count: u64,
    pub comment_count: u64,
    /// References (usually URLs) to the attached media.
    pub media: Vec<String>,
    pub media_kind: MediaKind,
    /// Hashtags without the leading `#`, lower-cased.
    pub hashtags: Vec<String>,
    /// Tagged or mentioned accounts without the leading `@`.
    pub mentions: Vec<String>,
    pub location: Option<String>,
}

impl Post {
    #[must_use]
    pub fn new(identifier: impl Into<String>, taken_at: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            taken_at,
            caption: None,
            like_count: 0,
            comment_count: 0,
            media: Vec::new(),
            media_kind: MediaKind::Photo,
            hashtags: Vec::new(),
            mentions: Vec::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn caption_text(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}
