//! One end-to-end run: fetch, analyze, assemble.

use chrono::{DateTime, Utc};

use profint_core::{AnalysisConfig, NoDataReason, Post, Profile, RelationshipSet, Report, Section};
use profint_source::{DataSource, SourceError};

use crate::assemble::{assemble, AnalyzerOutputs};
use crate::behavior::analyze_behavior;
use crate::error::RunError;
use crate::footprint::extract_footprint;
use crate::metrics::profile_metrics;
use crate::network::analyze_network;
use crate::security::{assess_privacy, assess_security};

/// Source data for one run, with per-resource availability.
#[derive(Debug, Clone)]
pub struct Collected {
    pub profile: Profile,
    pub relationships: Section<RelationshipSet>,
    pub posts: Section<Vec<Post>>,
    /// When the last fetch completed.
    pub fetched_at: DateTime<Utc>,
}

/// Fetches everything for `identifier` and produces its report.
///
/// A private profile is never asked for relationships or posts. Failures on
/// those two fetches are logged and turned into `no_data` sections; only the
/// profile fetch can fail the run.
///
/// # Errors
///
/// - [`RunError::NotFound`] if the identifier does not resolve.
/// - [`RunError::Source`] for any other failure fetching the profile.
pub async fn run_report<S: DataSource>(
    source: &S,
    identifier: &str,
    config: &AnalysisConfig,
    post_limit: usize,
) -> Result<Report, RunError> {
    tracing::info!(identifier, "starting profile analysis");

    let collected = collect(source, identifier, post_limit).await?;
    let outputs = analyze(&collected, config);
    let report = assemble(outputs, collected.fetched_at);

    tracing::info!(
        identifier = %report.identifier(),
        footprint = report.footprint.len(),
        security = report.security.len(),
        network_available = report.network.is_available(),
        behavior_available = report.behavior.is_available(),
        "profile analysis complete"
    );
    Ok(report)
}

/// Runs the fetch half of a run.
///
/// # Errors
///
/// See [`run_report`].
pub async fn collect<S: DataSource>(
    source: &S,
    identifier: &str,
    post_limit: usize,
) -> Result<Collected, RunError> {
    let profile = source
        .fetch_profile(identifier)
        .await
        .map_err(|e| match e {
            SourceError::NotFound { identifier } => RunError::NotFound { identifier },
            other => RunError::Source(other),
        })?;

    if profile.is_private {
        tracing::info!(
            identifier = %profile.identifier,
            "account is private, skipping relationships and posts"
        );
        return Ok(Collected {
            profile,
            relationships: Section::no_data(NoDataReason::PrivateAccount),
            posts: Section::no_data(NoDataReason::PrivateAccount),
            fetched_at: Utc::now(),
        });
    }

    let (relationships, posts) = tokio::join!(
        source.fetch_relationships(&profile.identifier),
        source.fetch_posts(&profile.identifier, post_limit),
    );
    let fetched_at = Utc::now();

    let relationships = match relationships {
        Ok(set) => {
            tracing::debug!(
                followers = set.followers.len(),
                following = set.following.len(),
                "relationships fetched"
            );
            Section::Available(set.with_totals(profile.follower_count, profile.following_count))
        }
        Err(e) => {
            tracing::warn!(identifier = %profile.identifier, error = %e, "relationships unavailable");
            Section::no_data(NoDataReason::SourceUnavailable)
        }
    };

    let posts = match posts {
        Ok(posts) => {
            tracing::debug!(count = posts.len(), "posts fetched");
            Section::Available(posts)
        }
        Err(e) => {
            tracing::warn!(identifier = %profile.identifier, error = %e, "posts unavailable");
            Section::no_data(NoDataReason::SourceUnavailable)
        }
    };

    Ok(Collected {
        profile,
        relationships,
        posts,
        fetched_at,
    })
}

/// Runs every analyzer over already collected data.
#[must_use]
pub fn analyze(collected: &Collected, config: &AnalysisConfig) -> AnalyzerOutputs {
    let profile = &collected.profile;
    let posts: &[Post] = collected
        .posts
        .as_available()
        .map(Vec::as_slice)
        .unwrap_or_default();

    let network = match &collected.relationships {
        Section::Available(set) => Section::Available(analyze_network(set, config)),
        Section::NoData { reason } => Section::no_data(*reason),
    };

    let behavior = match &collected.posts {
        Section::Available(posts) => analyze_behavior(posts, config),
        Section::NoData { reason } => Section::no_data(*reason),
    };

    let footprint = extract_footprint(profile, posts);
    let security = assess_security(profile, &footprint, config);
    let privacy = assess_privacy(profile, &footprint, config);

    AnalyzerOutputs {
        profile: profile.clone(),
        profile_metrics: profile_metrics(profile),
        network,
        footprint,
        security,
        privacy,
        behavior,
    }
}
