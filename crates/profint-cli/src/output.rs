//! Report files on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use profint_core::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Html,
    Both,
}

impl OutputFormat {
    fn json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    fn html(self) -> bool {
        matches!(self, Self::Html | Self::Both)
    }
}

/// `profint_report_{identifier}_{YYYYmmdd_HHMMSS}`, with anything outside
/// `[A-Za-z0-9_-]` in the identifier replaced by `_`.
pub(crate) fn report_file_stem(identifier: &str, generated_at: DateTime<Utc>) -> String {
    let safe: String = identifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "profint_report_{safe}_{}",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Writes the requested renderings of `report` into `dir`, creating it if
/// needed. Returns the written paths, JSON first.
pub(crate) fn write_report(
    report: &Report,
    dir: &Path,
    format: OutputFormat,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let stem = report_file_stem(report.identifier(), report.generated_at);
    let mut written = Vec::with_capacity(2);

    if format.json() {
        let path = dir.join(format!("{stem}.json"));
        write_file(&path, &profint_report::to_json(report)?)?;
        written.push(path);
    }
    if format.html() {
        let path = dir.join(format!("{stem}.html"));
        write_file(&path, &profint_report::to_html(report)?)?;
        written.push(path);
    }

    tracing::info!(
        identifier = %report.identifier(),
        files = written.len(),
        dir = %dir.display(),
        "report written"
    );
    Ok(written)
}

/// Reads a saved JSON report and writes its HTML rendering next to it, or into
/// `out_dir` when given.
pub(crate) fn render_saved_report(
    report_json: &Path,
    out_dir: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let content = std::fs::read_to_string(report_json)
        .with_context(|| format!("failed to read {}", report_json.display()))?;
    let report = profint_report::from_json(&content)
        .with_context(|| format!("{} is not a profint JSON report", report_json.display()))?;

    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => report_json
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let stem = report_json.file_stem().map_or_else(
        || report_file_stem(report.identifier(), report.generated_at),
        |s| s.to_string_lossy().into_owned(),
    );
    let path = dir.join(format!("{stem}.html"));
    write_file(&path, &profint_report::to_html(&report)?)?;
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use profint_core::{PrivacyAssessment, Profile, ProfileMetrics, RiskLevel, Section};

    use super::*;

    fn report(identifier: &str) -> Report {
        Report {
            profile: Profile::new(identifier),
            profile_metrics: ProfileMetrics {
                engagement_potential: 0.0,
                influence_score: 0.0,
                authenticity_score: 50.0,
                profile_completion: 0.0,
            },
            network: Section::no_data(profint_core::NoDataReason::SourceUnavailable),
            footprint: Vec::new(),
            security: Vec::new(),
            privacy: PrivacyAssessment {
                score: 100,
                risk_level: RiskLevel::Low,
                recommendations: Vec::new(),
            },
            behavior: Section::no_data(profint_core::NoDataReason::NoPosts),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    #[test]
    fn file_stem_uses_identifier_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            report_file_stem("target_user", at),
            "profint_report_target_user_20240309_140507"
        );
    }

    #[test]
    fn file_stem_sanitizes_path_characters() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            report_file_stem("../first.last", at),
            "profint_report____first_last_20240101_000000"
        );
    }

    #[test]
    fn write_report_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let written = write_report(&report("target"), &out, OutputFormat::Both).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("profint_report_target_20240309_140507.json"));
        assert!(written[1].ends_with("profint_report_target_20240309_140507.html"));
        let json = std::fs::read_to_string(&written[0]).unwrap();
        assert!(json.contains("\"identifier\": \"target\""));
        let html = std::fs::read_to_string(&written[1]).unwrap();
        assert!(html.contains("target"));
    }

    #[test]
    fn write_report_single_format() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_report(&report("target"), dir.path(), OutputFormat::Html).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].extension().unwrap(), "html");
    }

    #[test]
    fn render_saved_report_writes_html_beside_json() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_report(&report("target"), dir.path(), OutputFormat::Json).unwrap();

        let html_path = render_saved_report(&written[0], None).unwrap();
        assert_eq!(html_path, dir.path().join("profint_report_target_20240309_140507.html"));
        assert!(std::fs::read_to_string(html_path).unwrap().contains("<html"));
    }

    #[test]
    fn render_rejects_non_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.json");
        std::fs::write(&path, "{\"hello\": 1}").unwrap();
        assert!(render_saved_report(&path, None).is_err());
    }
}
