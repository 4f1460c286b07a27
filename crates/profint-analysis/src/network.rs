//! Relationship-graph statistics.

use profint_core::precision::round_2dp;
use profint_core::{AnalysisConfig, NetworkStats, RelationshipSet, SuspiciousPattern};

/// Computes counts, the follow ratio and suspicious patterns for `relationships`.
///
/// The ratio is `followers / max(following, 1)`; with both sides empty it is
/// 0 and nothing is flagged. Counts come from
/// [`RelationshipSet::follower_count`] and
/// [`RelationshipSet::following_count`], so declared totals attached to a
/// sampled set are honoured.
#[must_use]
pub fn analyze_network(relationships: &RelationshipSet, config: &AnalysisConfig) -> NetworkStats {
    let follower_count = relationships.follower_count();
    let following_count = relationships.following_count();
    let mutual_count = u64::try_from(relationships.mutuals().count()).unwrap_or(u64::MAX);

    #[allow(clippy::cast_precision_loss)]
    let ratio = if follower_count == 0 && following_count == 0 {
        0.0
    } else {
        follower_count as f64 / following_count.max(1) as f64
    };

    let reciprocity_anomaly = follower_count > 0
        && following_count < config.anomaly_following_floor
        && ratio >= config.anomaly_multiplier;

    let mut suspicious_patterns = Vec::new();
    if reciprocity_anomaly {
        suspicious_patterns.push(SuspiciousPattern::ReciprocityAnomaly);
    }
    if following_count > 0 && ratio > config.extreme_ratio_ceiling {
        suspicious_patterns.push(SuspiciousPattern::ExtremeFollowRatio);
    }
    if following_count > 0 && ratio < config.follow_spam_ratio_floor {
        suspicious_patterns.push(SuspiciousPattern::FollowSpam);
    }

    tracing::debug!(
        follower_count,
        following_count,
        mutual_count,
        ratio,
        reciprocity_anomaly,
        "network analyzed"
    );

    NetworkStats {
        follower_count,
        following_count,
        mutual_count,
        follow_ratio: round_2dp(ratio),
        reciprocity_anomaly,
        suspicious_patterns,
    }
}
