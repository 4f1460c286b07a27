//! Offline source backed by one JSON capture.

use std::path::Path;

use profint_core::{Post, Profile, RelationshipSet};

use crate::error::{Resource, SourceError};
use crate::ingest::{ingest_posts, ingest_profile, ingest_relationships};
use crate::raw::Snapshot;
use crate::source::DataSource;

/// Serves a single captured profile.
///
/// The document looks like
/// `{"profile": {...}, "followers": [...], "following": [...], "posts": [...]}`.
/// A `null` or missing list makes that resource unavailable. Any identifier
/// other than the captured one is not found.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Io`] if the file cannot be read.
    /// - [`SourceError::Deserialize`] if it is not a snapshot document.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Parses a snapshot document held in memory. `context` names it in errors.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Deserialize`] if `json` is not a snapshot document.
    pub fn from_json(json: &str, context: &str) -> Result<Self, SourceError> {
        let snapshot = serde_json::from_str(json).map_err(|e| SourceError::Deserialize {
            context: format!("snapshot {context}"),
            source: e,
        })?;
        Ok(Self::from_snapshot(snapshot))
    }

    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    fn matches(&self, identifier: &str) -> bool {
        self.snapshot
            .profile
            .identifier
            .as_deref()
            .is_some_and(|captured| {
                captured
                    .trim()
                    .trim_start_matches('@')
                    .eq_ignore_ascii_case(identifier.trim().trim_start_matches('@'))
            })
    }

    fn not_found(identifier: &str) -> SourceError {
        SourceError::NotFound {
            identifier: identifier.to_owned(),
        }
    }
}

impl DataSource for SnapshotSource {
    async fn fetch_profile(&self, identifier: &str) -> Result<Profile, SourceError> {
        if !self.matches(identifier) {
            return Err(Self::not_found(identifier));
        }
        ingest_profile(self.snapshot.profile.clone(), identifier)
    }

    async fn fetch_relationships(&self, identifier: &str) -> Result<RelationshipSet, SourceError> {
        if !self.matches(identifier) {
            return Err(SourceError::unavailable(
                Resource::Relationships,
                &Self::not_found(identifier),
            ));
        }
        ingest_relationships(
            self.snapshot.followers.clone(),
            self.snapshot.following.clone(),
        )
    }

    async fn fetch_posts(&self, identifier: &str, limit: usize) -> Result<Vec<Post>, SourceError> {
        if !self.matches(identifier) {
            return Err(SourceError::unavailable(
                Resource::Posts,
                &Self::not_found(identifier),
            ));
        }
        let Some(raw) = self.snapshot.posts.clone() else {
            return Err(SourceError::Unavailable {
                resource: Resource::Posts,
                reason: "snapshot has no posts".to_owned(),
            });
        };
        let mut posts = ingest_posts(raw);
        posts.truncate(limit);
        Ok(posts)
    }
}
