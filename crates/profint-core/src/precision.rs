//! Fixed two-decimal rounding for ratios and scores.
//!
//! Analyzers round with [`round_2dp`] when they compute a value; the
//! `serialize_*` helpers re-apply it at the JSON boundary so the rendered
//! precision holds even for hand-built reports.

use serde::Serializer;

/// Rounds `value` to two decimal places. Non-finite input becomes `0.0`.
#[must_use]
pub fn round_2dp(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// `serialize_with` adapter for `f64` fields.
///
/// # Errors
///
/// Propagates the serializer's error.
#[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serde
pub fn serialize_2dp<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_2dp(*value))
}

/// `serialize_with` adapter for `Option<f64>` fields.
///
/// # Errors
///
/// Propagates the serializer's error.
#[allow(clippy::ref_option)] // signature fixed by serde
pub fn serialize_opt_2dp<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round_2dp(*v)),
        None => serializer.serialize_none(),
    }
}
