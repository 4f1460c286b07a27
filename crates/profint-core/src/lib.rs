//! Shared domain types for profint.
//!
//! Holds the immutable value objects every pipeline stage consumes
//! ([`Profile`], [`RelationshipSet`], [`Post`]), the findings the analyzers
//! produce, the assembled [`Report`], and configuration loading.

pub mod analysis_config;
pub mod app_config;
pub mod config;
pub mod error;
pub mod findings;
pub mod precision;
pub mod profile;
pub mod report;
pub mod section;

pub use analysis_config::{load_analysis_config, AnalysisConfig};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use findings::{
    ActivityWindow, AutomationIndicator, BehaviorSummary, ContentTypeCounts, EngagementSummary,
    FootprintFinding, FootprintKind, FootprintSource, HashtagSummary, NetworkStats,
    PostingCadence, PrivacyAssessment, ProfileMetrics, RiskLevel, SecurityCategory,
    SecurityFinding, Severity, SuspiciousPattern, TermCount,
};
pub use profile::{MediaKind, Post, Profile, RelationshipSet};
pub use report::Report;
pub use section::{NoDataReason, Section};
