//! Heuristic scores computed from the profile snapshot alone.

use profint_core::precision::round_2dp;
use profint_core::{Profile, ProfileMetrics};

/// Engagement potential, influence, authenticity and completion, each 0–100.
///
/// Engagement potential and influence need at least one follower and are 0
/// otherwise. Authenticity starts at 50 and gains points for verification, a
/// biography over 20 characters, an external link and more than 1 000
/// followers. Completion gives 25 points each for a display name, a
/// biography, a profile picture and at least one post.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn profile_metrics(profile: &Profile) -> ProfileMetrics {
    let followers = profile.follower_count as f64;

    let (engagement_potential, influence_score) = if profile.follower_count > 0 {
        let engagement = (profile.post_count as f64 / followers * 1000.0).min(100.0);
        let influence = if profile.following_count > 0 {
            (followers / profile.following_count as f64 * 10.0).min(100.0)
        } else {
            100.0
        };
        (engagement, influence)
    } else {
        (0.0, 0.0)
    };

    let mut authenticity = 50.0;
    if profile.is_verified {
        authenticity += 20.0;
    }
    if profile.biography.chars().count() > 20 {
        authenticity += 10.0;
    }
    if profile.external_url.is_some() {
        authenticity += 10.0;
    }
    if profile.follower_count > 1000 {
        authenticity += 10.0;
    }

    let completion_parts = [
        profile.display_name.is_some(),
        profile.has_biography(),
        profile.profile_pic_url.is_some(),
        profile.post_count > 0,
    ];
    let completion = 25.0 * completion_parts.iter().filter(|present| **present).count() as f64;

    ProfileMetrics {
        engagement_potential: round_2dp(engagement_potential),
        influence_score: round_2dp(influence_score),
        authenticity_score: round_2dp(f64::min(authenticity, 100.0)),
        profile_completion: completion,
    }
}
