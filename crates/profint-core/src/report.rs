//! The canonical result of one run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::findings::{
    BehaviorSummary, FootprintFinding, NetworkStats, PrivacyAssessment, ProfileMetrics,
    SecurityFinding,
};
use crate::profile::Profile;
use crate::section::Section;

/// Everything known about the target after one run.
///
/// Built once by the assembler and only ever handed out by reference to the
/// serializers. The field order here is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub profile: Profile,
    pub profile_metrics: ProfileMetrics,
    pub network: Section<NetworkStats>,
    pub footprint: Vec<FootprintFinding>,
    pub security: Vec<SecurityFinding>,
    pub privacy: PrivacyAssessment,
    pub behavior: Section<BehaviorSummary>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.profile.identifier
    }
}
