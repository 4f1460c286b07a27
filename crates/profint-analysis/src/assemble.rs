//! Composition of analyzer outputs into the final [`Report`].

use chrono::{DateTime, Utc};

use profint_core::{
    BehaviorSummary, FootprintFinding, NetworkStats, PrivacyAssessment, Profile, ProfileMetrics,
    Report, Section, SecurityFinding,
};

/// Everything the analyzers produced for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOutputs {
    pub profile: Profile,
    pub profile_metrics: ProfileMetrics,
    pub network: Section<NetworkStats>,
    pub footprint: Vec<FootprintFinding>,
    pub security: Vec<SecurityFinding>,
    pub privacy: PrivacyAssessment,
    pub behavior: Section<BehaviorSummary>,
}

/// Builds the report. `generated_at` is the current time, but never earlier
/// than `fetched_at`, the moment the last source fetch completed.
#[must_use]
pub fn assemble(outputs: AnalyzerOutputs, fetched_at: DateTime<Utc>) -> Report {
    let generated_at = Utc::now().max(fetched_at);
    let AnalyzerOutputs {
        profile,
        profile_metrics,
        network,
        footprint,
        security,
        privacy,
        behavior,
    } = outputs;

    Report {
        profile,
        profile_metrics,
        network,
        footprint,
        security,
        privacy,
        behavior,
        generated_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use profint_core::{AnalysisConfig, NoDataReason, RiskLevel};

    use super::*;
    use crate::metrics::profile_metrics;

    fn outputs() -> AnalyzerOutputs {
        let profile = Profile::new("target");
        AnalyzerOutputs {
            profile_metrics: profile_metrics(&profile),
            profile,
            network: Section::no_data(NoDataReason::SourceUnavailable),
            footprint: Vec::new(),
            security: Vec::new(),
            privacy: PrivacyAssessment {
                score: 70,
                risk_level: RiskLevel::Low,
                recommendations: Vec::new(),
            },
            behavior: crate::behavior::analyze_behavior(&[], &AnalysisConfig::default()),
        }
    }

    #[test]
    fn generated_at_is_never_before_fetch() {
        let future_fetch = Utc::now() + Duration::hours(1);
        let report = assemble(outputs(), future_fetch);
        assert!(report.generated_at >= future_fetch);

        let past_fetch = Utc::now() - Duration::hours(1);
        let report = assemble(outputs(), past_fetch);
        assert!(report.generated_at > past_fetch);
    }

    #[test]
    fn assembling_twice_differs_only_in_timestamp() {
        let fetched_at = Utc::now();
        let mut a = assemble(outputs(), fetched_at);
        let b = assemble(outputs(), fetched_at);
        a.generated_at = b.generated_at;
        assert_eq!(a, b);
    }
}
