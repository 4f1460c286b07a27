//! Outputs of the individual analyzers.
//!
//! Field declaration order is the JSON key order, so reorder with care.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::precision::{serialize_2dp, serialize_opt_2dp};

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FootprintKind {
    Email,
    Phone,
    ExternalLink,
}

impl FootprintKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FootprintKind::Email => "email",
            FootprintKind::Phone => "phone",
            FootprintKind::ExternalLink => "external-link",
        }
    }

    /// Email and phone findings are contact artifacts; links are not.
    #[must_use]
    pub fn is_contact(self) -> bool {
        matches!(self, FootprintKind::Email | FootprintKind::Phone)
    }
}

impl std::fmt::Display for FootprintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a footprint artifact was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FootprintSource {
    Bio,
    Caption,
    LinkField,
}

impl std::fmt::Display for FootprintSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FootprintSource::Bio => write!(f, "bio"),
            FootprintSource::Caption => write!(f, "caption"),
            FootprintSource::LinkField => write!(f, "link-field"),
        }
    }
}

/// A contact or linking artifact. `value` is already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintFinding {
    pub kind: FootprintKind,
    pub value: String,
    pub source: FootprintSource,
}

// ---------------------------------------------------------------------------
// Security & privacy
// ---------------------------------------------------------------------------

/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityCategory {
    ContactExposure,
    LinkExposure,
    MetadataExposure,
    PrivacyState,
}

impl SecurityCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityCategory::ContactExposure => "contact-exposure",
            SecurityCategory::LinkExposure => "link-exposure",
            SecurityCategory::MetadataExposure => "metadata-exposure",
            SecurityCategory::PrivacyState => "privacy-state",
        }
    }
}

impl std::fmt::Display for SecurityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single exposure finding. Two findings are the same finding when their
/// category and description match; severity does not take part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub category: SecurityCategory,
    pub severity: Severity,
    pub description: String,
}

impl SecurityFinding {
    #[must_use]
    pub fn new(category: SecurityCategory, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn same_finding(&self, other: &Self) -> bool {
        self.category == other.category && self.description == other.description
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Aggregate privacy posture: a 0–100 score where 100 is fully private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyAssessment {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Profile metrics
// ---------------------------------------------------------------------------

/// Heuristic 0–100 scores derived from the profile snapshot alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    #[serde(serialize_with = "serialize_2dp")]
    pub engagement_potential: f64,
    #[serde(serialize_with = "serialize_2dp")]
    pub influence_score: f64,
    #[serde(serialize_with = "serialize_2dp")]
    pub authenticity_score: f64,
    #[serde(serialize_with = "serialize_2dp")]
    pub profile_completion: f64,
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspiciousPattern {
    /// Far more followers than followed accounts while following very few.
    ReciprocityAnomaly,
    /// Follower/following ratio above the configured ceiling.
    ExtremeFollowRatio,
    /// Follows many accounts while being followed by few.
    FollowSpam,
}

impl std::fmt::Display for SuspiciousPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuspiciousPattern::ReciprocityAnomaly => write!(f, "reciprocity anomaly"),
            SuspiciousPattern::ExtremeFollowRatio => write!(f, "extreme follow ratio"),
            SuspiciousPattern::FollowSpam => write!(f, "follow spam"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub follower_count: u64,
    pub following_count: u64,
    pub mutual_count: u64,
    /// `follower_count / max(following_count, 1)`, two decimals.
    #[serde(serialize_with = "serialize_2dp")]
    pub follow_ratio: f64,
    pub reciprocity_anomaly: bool,
    pub suspicious_patterns: Vec<SuspiciousPattern>,
}

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

/// A ranked term with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

impl TermCount {
    #[must_use]
    pub fn new(term: impl Into<String>, count: u64) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityWindow {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl ActivityWindow {
    /// Whole days from the oldest known post to `as_of`. The account is at
    /// least this old; zero if `as_of` precedes the oldest post.
    #[must_use]
    pub fn account_age_days(&self, as_of: DateTime<Utc>) -> u64 {
        u64::try_from((as_of - self.earliest).num_days()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingCadence {
    #[serde(serialize_with = "serialize_opt_2dp")]
    pub average_days_between_posts: Option<f64>,
    /// 0–100; higher means more evenly spaced posts.
    #[serde(serialize_with = "serialize_opt_2dp")]
    pub consistency_score: Option<f64>,
    /// Most common gap between consecutive posts in whole days; ties go to
    /// the shorter gap.
    pub most_frequent_interval_days: Option<u64>,
    /// Posts per UTC hour of day, index 0 = 00:00.
    pub hour_histogram: [u64; 24],
    /// Posts per weekday, index 0 = Monday.
    pub weekday_histogram: [u64; 7],
    /// `YYYY-MM` → post count.
    pub monthly_activity: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeCounts {
    pub photo: u64,
    pub video: u64,
    pub carousel: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSummary {
    #[serde(serialize_with = "serialize_2dp")]
    pub average_likes: f64,
    #[serde(serialize_with = "serialize_2dp")]
    pub average_comments: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagSummary {
    pub unique_count: u64,
    pub top: Vec<TermCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationIndicator {
    /// Posts cluster into very few distinct hours of the day.
    RegularPostingHours,
}

impl std::fmt::Display for AutomationIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomationIndicator::RegularPostingHours => write!(f, "very regular posting hours"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSummary {
    pub post_count: u64,
    /// Posts per 7-day window. `None` with fewer than two posts or a zero span.
    #[serde(serialize_with = "serialize_opt_2dp")]
    pub posting_frequency: Option<f64>,
    pub dominant_themes: Vec<TermCount>,
    pub activity_window: ActivityWindow,
    pub cadence: PostingCadence,
    pub content_types: ContentTypeCounts,
    pub theme_categories: Vec<TermCount>,
    pub engagement: EngagementSummary,
    pub hashtags: HashtagSummary,
    pub unique_mentions: u64,
    pub locations: Vec<String>,
    pub automation_indicators: Vec<AutomationIndicator>,
}
