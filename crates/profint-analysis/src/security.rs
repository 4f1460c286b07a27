//! Exposure findings and the aggregate privacy score.
//!
//! Both functions read the footprint instead of re-scanning text, so what
//! counts as an exposed email or phone is exactly what the footprint reports.

use profint_core::{
    AnalysisConfig, FootprintFinding, FootprintKind, FootprintSource, PrivacyAssessment, Profile,
    RiskLevel, SecurityCategory, SecurityFinding, Severity,
};

const PUBLIC_PENALTY: u8 = 30;
const EXTERNAL_LINK_PENALTY: u8 = 10;
const DETAILED_BIO_PENALTY: u8 = 5;
const EMAIL_PENALTY: u8 = 20;
const PHONE_PENALTY: u8 = 25;

const HIGH_RISK_BELOW: u8 = 30;
const MEDIUM_RISK_BELOW: u8 = 70;
const RECOMMEND_BELOW: u8 = 50;

const RECOMMENDATIONS: &[&str] = &[
    "Make the profile private",
    "Remove personal contact details from the biography",
    "Enable two-factor authentication",
];

/// Derives exposure findings, most severe first, then by category name.
///
/// Every profile gets one `privacy-state` notice. Exposure findings are only
/// raised for public profiles. Duplicate `(category, description)` pairs keep
/// the first finding.
#[must_use]
pub fn assess_security(
    profile: &Profile,
    footprint: &[FootprintFinding],
    config: &AnalysisConfig,
) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();

    if profile.is_private {
        findings.push(SecurityFinding::new(
            SecurityCategory::PrivacyState,
            Severity::Info,
            "Account is private",
        ));
        return findings;
    }

    findings.push(SecurityFinding::new(
        SecurityCategory::PrivacyState,
        Severity::Info,
        "Account is public",
    ));

    if has_kind(footprint, FootprintKind::Email) {
        findings.push(SecurityFinding::new(
            SecurityCategory::ContactExposure,
            Severity::High,
            "Email address publicly visible",
        ));
    }
    if has_kind(footprint, FootprintKind::Phone) {
        findings.push(SecurityFinding::new(
            SecurityCategory::ContactExposure,
            Severity::High,
            "Phone number publicly visible",
        ));
    }

    let bio_has_contact = footprint
        .iter()
        .any(|f| f.source == FootprintSource::Bio && f.kind.is_contact());
    if profile.has_biography() && !bio_has_contact {
        findings.push(SecurityFinding::new(
            SecurityCategory::MetadataExposure,
            Severity::Low,
            "Biography publicly visible",
        ));
    }
    if is_detailed_biography(profile, config) {
        findings.push(SecurityFinding::new(
            SecurityCategory::MetadataExposure,
            Severity::Low,
            "Detailed biography",
        ));
    }

    if profile.external_url.is_some() {
        findings.push(SecurityFinding::new(
            SecurityCategory::LinkExposure,
            Severity::Low,
            "External link on profile",
        ));
    }

    if (profile.is_business || profile.is_verified)
        && has_kind(footprint, FootprintKind::ExternalLink)
    {
        findings.push(SecurityFinding::new(
            SecurityCategory::ContactExposure,
            Severity::Medium,
            "Business or verified account lists a public contact link",
        ));
    }

    order_findings(dedup_findings(findings))
}

/// Scores how private the profile is, from 100 (nothing exposed) down to 0.
#[must_use]
pub fn assess_privacy(
    profile: &Profile,
    footprint: &[FootprintFinding],
    config: &AnalysisConfig,
) -> PrivacyAssessment {
    let mut penalty: u8 = 0;
    if profile.is_public() {
        penalty = penalty.saturating_add(PUBLIC_PENALTY);
    }
    if profile.external_url.is_some() {
        penalty = penalty.saturating_add(EXTERNAL_LINK_PENALTY);
    }
    if is_detailed_biography(profile, config) {
        penalty = penalty.saturating_add(DETAILED_BIO_PENALTY);
    }
    if has_kind(footprint, FootprintKind::Email) {
        penalty = penalty.saturating_add(EMAIL_PENALTY);
    }
    if has_kind(footprint, FootprintKind::Phone) {
        penalty = penalty.saturating_add(PHONE_PENALTY);
    }
    let score = 100u8.saturating_sub(penalty);

    let risk_level = if score < HIGH_RISK_BELOW {
        RiskLevel::High
    } else if score < MEDIUM_RISK_BELOW {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let recommendations = if score < RECOMMEND_BELOW {
        RECOMMENDATIONS.iter().map(|r| (*r).to_owned()).collect()
    } else {
        Vec::new()
    };

    PrivacyAssessment {
        score,
        risk_level,
        recommendations,
    }
}

fn has_kind(footprint: &[FootprintFinding], kind: FootprintKind) -> bool {
    footprint.iter().any(|f| f.kind == kind)
}

fn is_detailed_biography(profile: &Profile, config: &AnalysisConfig) -> bool {
    profile.biography.chars().count() > config.detailed_bio_chars
}

fn dedup_findings(findings: Vec<SecurityFinding>) -> Vec<SecurityFinding> {
    let mut kept: Vec<SecurityFinding> = Vec::with_capacity(findings.len());
    for finding in findings {
        if !kept.iter().any(|k| k.same_finding(&finding)) {
            kept.push(finding);
        }
    }
    kept
}

fn order_findings(mut findings: Vec<SecurityFinding>) -> Vec<SecurityFinding> {
    findings.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    findings
}

#[cfg(test)]
#[path = "security_test.rs"]
mod tests;
