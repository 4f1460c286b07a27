//! JSON rendering and parsing.
//!
//! Keys follow the field declaration order of [`Report`]; counts stay
//! integers and ratios are written with at most two decimals.

use profint_core::Report;

use crate::error::ReportError;

/// Pretty-printed UTF-8 JSON for `report`.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if serialization fails.
pub fn to_json(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parses a report previously written by [`to_json`].
///
/// # Errors
///
/// Returns [`ReportError::Json`] if `json` is not a report document.
pub fn from_json(json: &str) -> Result<Report, ReportError> {
    Ok(serde_json::from_str(json)?)
}
