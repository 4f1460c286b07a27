//! HTML rendering from an embedded template.
//!
//! The template carries `{{{NAME}}}` placeholders, one per report section.
//! Placeholders are filled in a single pass over the template, so text taken
//! from the profile is never re-scanned for placeholders. Every value that
//! originates outside this crate goes through [`encode_text`].

use std::borrow::Cow;
use std::sync::LazyLock;

use html_escape::encode_text;
use regex::Regex;

use profint_core::{
    BehaviorSummary, FootprintFinding, NetworkStats, NoDataReason, PrivacyAssessment, Profile,
    ProfileMetrics, Report, Section, SecurityFinding, TermCount,
};

use crate::error::ReportError;

const TEMPLATE: &str = include_str!("templates/report.html");

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\{([A-Z_]+)\}\}\}").expect("valid placeholder regex"));

/// Renders `report` as a standalone HTML document.
///
/// # Errors
///
/// Returns [`ReportError::Template`] if the template names a placeholder
/// this renderer does not know.
pub fn to_html(report: &Report) -> Result<String, ReportError> {
    render(TEMPLATE, report)
}

fn render(template: &str, report: &Report) -> Result<String, ReportError> {
    let mut out = String::with_capacity(template.len() * 2);
    let mut last = 0;
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        out.push_str(&fill(name.as_str(), report)?);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

fn fill(name: &str, report: &Report) -> Result<String, ReportError> {
    let html = match name {
        "IDENTIFIER" => esc(report.identifier()).into_owned(),
        "GENERATED_AT" => report
            .generated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        "PROFILE" => profile_html(&report.profile),
        "METRICS" => metrics_html(&report.profile_metrics),
        "NETWORK" => section_html(&report.network, network_html),
        "FOOTPRINT" => footprint_html(&report.footprint),
        "SECURITY" => security_html(&report.security),
        "PRIVACY" => privacy_html(&report.privacy),
        "BEHAVIOR" => match &report.behavior {
            Section::Available(summary) => behavior_html(
                summary,
                summary.activity_window.account_age_days(report.generated_at),
            ),
            Section::NoData { reason } => no_data_html(*reason),
        },
        other => return Err(ReportError::Template(other.to_owned())),
    };
    Ok(html)
}

fn esc(text: &str) -> Cow<'_, str> {
    encode_text(text)
}

fn esc_opt(text: Option<&str>) -> String {
    text.map_or_else(|| "n/a".to_owned(), |t| esc(t).into_owned())
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_owned()
}

/// A two-column table. Labels are trusted; values must already be escaped.
fn table(rows: &[(&str, String)]) -> String {
    let body: String = rows
        .iter()
        .map(|(label, value)| format!("<tr><th>{label}</th><td>{value}</td></tr>\n"))
        .collect();
    format!("<table>\n{body}</table>")
}

fn no_data_html(reason: NoDataReason) -> String {
    format!("<p class=\"no-data\">No data: {reason}.</p>")
}

fn section_html<T>(section: &Section<T>, render: fn(&T) -> String) -> String {
    match section {
        Section::Available(value) => render(value),
        Section::NoData { reason } => no_data_html(*reason),
    }
}

fn term_list(terms: &[TermCount]) -> String {
    if terms.is_empty() {
        return "<p class=\"no-data\">None.</p>".to_owned();
    }
    let items: String = terms
        .iter()
        .map(|t| format!("<li>{} ({})</li>\n", esc(&t.term), t.count))
        .collect();
    format!("<ol>\n{items}</ol>")
}

fn profile_html(profile: &Profile) -> String {
    table(&[
        ("Identifier", esc(&profile.identifier).into_owned()),
        ("Display name", esc_opt(profile.display_name.as_deref())),
        (
            "Biography",
            if profile.has_biography() {
                format!("<span class=\"bio\">{}</span>", esc(&profile.biography))
            } else {
                "n/a".to_owned()
            },
        ),
        (
            "External link",
            profile
                .external_url
                .as_deref()
                .map_or_else(|| "n/a".to_owned(), |url| format!("<code>{}</code>", esc(url))),
        ),
        ("Followers", profile.follower_count.to_string()),
        ("Following", profile.following_count.to_string()),
        ("Posts", profile.post_count.to_string()),
        ("Private", yes_no(profile.is_private)),
        ("Verified", yes_no(profile.is_verified)),
        ("Business", yes_no(profile.is_business)),
        (
            "Business category",
            esc_opt(profile.business_category.as_deref()),
        ),
        ("Platform id", esc_opt(profile.platform_id.as_deref())),
    ])
}

fn metrics_html(metrics: &ProfileMetrics) -> String {
    table(&[
        (
            "Engagement potential",
            format!("{:.2}", metrics.engagement_potential),
        ),
        ("Influence score", format!("{:.2}", metrics.influence_score)),
        (
            "Authenticity score",
            format!("{:.2}", metrics.authenticity_score),
        ),
        (
            "Profile completion",
            format!("{:.0}%", metrics.profile_completion),
        ),
    ])
}

fn network_html(stats: &NetworkStats) -> String {
    let patterns = if stats.suspicious_patterns.is_empty() {
        "none".to_owned()
    } else {
        stats
            .suspicious_patterns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    table(&[
        ("Followers", stats.follower_count.to_string()),
        ("Following", stats.following_count.to_string()),
        ("Mutual", stats.mutual_count.to_string()),
        ("Follow ratio", format!("{:.2}", stats.follow_ratio)),
        ("Reciprocity anomaly", yes_no(stats.reciprocity_anomaly)),
        ("Suspicious patterns", patterns),
    ])
}

fn footprint_html(findings: &[FootprintFinding]) -> String {
    if findings.is_empty() {
        return "<p class=\"no-data\">No contact or link artifacts found.</p>".to_owned();
    }
    let rows: String = findings
        .iter()
        .map(|f| {
            format!(
                "<tr><td>{}</td><td><code>{}</code></td><td>{}</td></tr>\n",
                f.kind,
                esc(&f.value),
                f.source
            )
        })
        .collect();
    format!("<table>\n<tr><th>Kind</th><th>Value</th><th>Found in</th></tr>\n{rows}</table>")
}

fn security_html(findings: &[SecurityFinding]) -> String {
    if findings.is_empty() {
        return "<p class=\"no-data\">No findings.</p>".to_owned();
    }
    let items: String = findings
        .iter()
        .map(|f| {
            format!(
                "<li><span class=\"severity severity-{sev}\">{sev}</span> {cat}: {desc}</li>\n",
                sev = f.severity,
                cat = f.category,
                desc = esc(&f.description)
            )
        })
        .collect();
    format!("<ul>\n{items}</ul>")
}

fn privacy_html(privacy: &PrivacyAssessment) -> String {
    let mut html = table(&[
        ("Privacy score", format!("{} / 100", privacy.score)),
        ("Risk level", privacy.risk_level.to_string()),
    ]);
    if !privacy.recommendations.is_empty() {
        let items: String = privacy
            .recommendations
            .iter()
            .map(|r| format!("<li>{}</li>\n", esc(r)))
            .collect();
        html.push_str("\n<h4>Recommendations</h4>\n<ul>\n");
        html.push_str(&items);
        html.push_str("</ul>");
    }
    html
}

fn behavior_html(summary: &BehaviorSummary, account_age_days: u64) -> String {
    let opt_2dp = |value: Option<f64>, unit: &str| {
        value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.2}{unit}"))
    };
    let automation = if summary.automation_indicators.is_empty() {
        "none".to_owned()
    } else {
        summary
            .automation_indicators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let content = &summary.content_types;
    let locations = if summary.locations.is_empty() {
        "none".to_owned()
    } else {
        summary
            .locations
            .iter()
            .map(|l| esc(l).into_owned())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let overview = table(&[
        ("Posts analyzed", summary.post_count.to_string()),
        (
            "Posting frequency",
            opt_2dp(summary.posting_frequency, " per week"),
        ),
        (
            "Active from",
            summary
                .activity_window
                .earliest
                .format("%Y-%m-%d %H:%M UTC")
                .to_string(),
        ),
        (
            "Active until",
            summary
                .activity_window
                .latest
                .format("%Y-%m-%d %H:%M UTC")
                .to_string(),
        ),
        (
            "Average days between posts",
            opt_2dp(summary.cadence.average_days_between_posts, ""),
        ),
        (
            "Consistency score",
            opt_2dp(summary.cadence.consistency_score, ""),
        ),
        (
            "Most frequent gap",
            summary
                .cadence
                .most_frequent_interval_days
                .map_or_else(|| "n/a".to_owned(), |d| format!("{d} days")),
        ),
        (
            "Account age (estimated)",
            format!("at least {account_age_days} days"),
        ),
        (
            "Content types",
            format!(
                "photo {}, video {}, carousel {}",
                content.photo, content.video, content.carousel
            ),
        ),
        (
            "Average likes",
            format!("{:.2}", summary.engagement.average_likes),
        ),
        (
            "Average comments",
            format!("{:.2}", summary.engagement.average_comments),
        ),
        (
            "Unique hashtags",
            summary.hashtags.unique_count.to_string(),
        ),
        ("Unique mentions", summary.unique_mentions.to_string()),
        ("Locations", locations),
        ("Automation indicators", automation),
    ]);

    let weekdays: String = WEEKDAYS
        .iter()
        .zip(summary.cadence.weekday_histogram.iter())
        .map(|(day, count)| format!("<tr><th>{day}</th><td>{count}</td></tr>\n"))
        .collect();
    let months: String = summary
        .cadence
        .monthly_activity
        .iter()
        .map(|(month, count)| format!("<tr><th>{}</th><td>{count}</td></tr>\n", esc(month)))
        .collect();

    format!(
        "{overview}\n\
         <h3>Dominant themes</h3>\n{}\n\
         <h3>Theme categories</h3>\n{}\n\
         <h3>Top hashtags</h3>\n{}\n\
         <h3>Posts by weekday (UTC)</h3>\n<table>\n{weekdays}</table>\n\
         <h3>Monthly activity</h3>\n<table>\n{months}</table>",
        term_list(&summary.dominant_themes),
        term_list(&summary.theme_categories),
        term_list(&summary.hashtags.top),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use profint_core::{
        ActivityWindow, AutomationIndicator, ContentTypeCounts, EngagementSummary,
        FootprintKind, FootprintSource, HashtagSummary, PostingCadence, RiskLevel,
        SecurityCategory, Severity, SuspiciousPattern,
    };

    use super::*;

    pub(crate) fn sample_report() -> Report {
        let mut profile = Profile::new("target");
        profile.display_name = Some("Target Person".to_owned());
        profile.biography = "contact: a@b.com".to_owned();
        profile.follower_count = 1000;
        profile.following_count = 10;
        profile.post_count = 2;

        let earliest = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let latest = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let mut hour_histogram = [0; 24];
        hour_histogram[9] = 2;

        Report {
            profile,
            profile_metrics: ProfileMetrics {
                engagement_potential: 2.0,
                influence_score: 100.0,
                authenticity_score: 60.0,
                profile_completion: 75.0,
            },
            network: Section::Available(NetworkStats {
                follower_count: 1000,
                following_count: 10,
                mutual_count: 2,
                follow_ratio: 100.0,
                reciprocity_anomaly: true,
                suspicious_patterns: vec![SuspiciousPattern::ReciprocityAnomaly],
            }),
            footprint: vec![FootprintFinding {
                kind: FootprintKind::Email,
                value: "a@b.com".to_owned(),
                source: FootprintSource::Bio,
            }],
            security: vec![
                SecurityFinding::new(
                    SecurityCategory::ContactExposure,
                    Severity::High,
                    "Email address publicly visible",
                ),
                SecurityFinding::new(
                    SecurityCategory::PrivacyState,
                    Severity::Info,
                    "Account is public",
                ),
            ],
            privacy: PrivacyAssessment {
                score: 50,
                risk_level: RiskLevel::Medium,
                recommendations: Vec::new(),
            },
            behavior: Section::Available(BehaviorSummary {
                post_count: 2,
                posting_frequency: Some(2.0),
                dominant_themes: vec![TermCount::new("coffee", 2)],
                activity_window: ActivityWindow { earliest, latest },
                cadence: PostingCadence {
                    average_days_between_posts: Some(7.0),
                    consistency_score: Some(100.0),
                    most_frequent_interval_days: Some(7),
                    hour_histogram,
                    weekday_histogram: [2, 0, 0, 0, 0, 0, 0],
                    monthly_activity: BTreeMap::from([("2024-01".to_owned(), 2)]),
                },
                content_types: ContentTypeCounts {
                    photo: 1,
                    video: 1,
                    carousel: 0,
                },
                theme_categories: vec![TermCount::new("food", 1)],
                engagement: EngagementSummary {
                    average_likes: 12.5,
                    average_comments: 0.33,
                },
                hashtags: HashtagSummary {
                    unique_count: 1,
                    top: vec![TermCount::new("coffee", 1)],
                },
                unique_mentions: 0,
                locations: vec!["Lisbon".to_owned()],
                automation_indicators: vec![AutomationIndicator::RegularPostingHours],
            }),
            generated_at: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn renders_every_section() {
        let html = to_html(&sample_report()).unwrap();
        for id in ["profile", "network", "footprint", "security", "behavior"] {
            assert!(html.contains(&format!("<section id=\"{id}\">")), "missing {id}");
        }
        assert!(!html.contains("{{{"));
        assert!(html.contains("Profile report: target"));
        assert!(html.contains("2024-02-01 12:00:00 UTC"));
        assert!(html.contains("<td>100.00</td>"));
        assert!(html.contains("severity-high"));
        assert!(html.contains("coffee (2)"));
    }

    #[test]
    fn behavior_shows_typical_gap_and_account_age() {
        let html = to_html(&sample_report()).unwrap();
        assert!(html.contains("<th>Most frequent gap</th><td>7 days</td>"));
        assert!(html.contains("<td>at least 31 days</td>"));
    }

    #[test]
    fn attacker_text_is_escaped() {
        let mut report = sample_report();
        report.profile.biography = "<script>alert('bio')</script>".to_owned();
        report.profile.display_name = Some("<script>name</script>".to_owned());
        if let Section::Available(behavior) = &mut report.behavior {
            behavior.dominant_themes = vec![TermCount::new("x<script>y", 3)];
            behavior.locations = vec!["<script>loc</script>".to_owned()];
        }
        report.footprint[0].value = "https://evil.example/<script>".to_owned();

        let html = to_html(&report).unwrap();
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;alert('bio')&lt;/script&gt;"));
    }

    #[test]
    fn placeholder_text_in_profile_is_not_expanded() {
        let mut report = sample_report();
        report.profile.biography = "{{{PROFILE}}}".to_owned();
        let html = to_html(&report).unwrap();
        assert!(html.contains("{{{PROFILE}}}"));
    }

    #[test]
    fn no_data_sections_render_their_reason() {
        let mut report = sample_report();
        report.network = Section::no_data(NoDataReason::PrivateAccount);
        report.behavior = Section::no_data(NoDataReason::NoPosts);
        let html = to_html(&report).unwrap();
        assert!(html.contains("No data: private account."));
        assert!(html.contains("No data: no posts."));
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let err = render("<p>{{{MYSTERY}}}</p>", &sample_report()).unwrap_err();
        assert!(matches!(err, ReportError::Template(ref name) if name == "MYSTERY"));
    }
}
