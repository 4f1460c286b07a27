//! Explicit absence markers for report sections that depend on optional data.

use serde::{Deserialize, Serialize};

/// Why a section carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
    /// The data source could not supply the underlying records.
    SourceUnavailable,
    /// The account is private, so the records were not requested.
    PrivateAccount,
    /// The source answered with an empty post history.
    NoPosts,
}

impl std::fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoDataReason::SourceUnavailable => write!(f, "source unavailable"),
            NoDataReason::PrivateAccount => write!(f, "private account"),
            NoDataReason::NoPosts => write!(f, "no posts"),
        }
    }
}

/// A report section that is either populated or explicitly marked empty.
///
/// Serializes with a `status` tag: `{"status": "available", ...fields}` or
/// `{"status": "no_data", "reason": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Available(T),
    NoData { reason: NoDataReason },
}

impl<T> Section<T> {
    #[must_use]
    pub fn no_data(reason: NoDataReason) -> Self {
        Section::NoData { reason }
    }

    #[must_use]
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Section::Available(value) => Some(value),
            Section::NoData { .. } => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Section::Available(_))
    }

    #[must_use]
    pub fn no_data_reason(&self) -> Option<NoDataReason> {
        match self {
            Section::Available(_) => None,
            Section::NoData { reason } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        count: u64,
    }

    #[test]
    fn available_section_is_tagged_inline() {
        let section = Section::Available(Payload { count: 3 });
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json, serde_json::json!({"status": "available", "count": 3}));
    }

    #[test]
    fn no_data_section_carries_reason() {
        let section: Section<Payload> = Section::no_data(NoDataReason::PrivateAccount);
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "no_data", "reason": "private_account"})
        );
        assert_eq!(section.no_data_reason(), Some(NoDataReason::PrivateAccount));
        assert!(section.as_available().is_none());
    }

    #[test]
    fn sections_parse_back() {
        let parsed: Section<Payload> =
            serde_json::from_str(r#"{"status":"available","count":7}"#).unwrap();
        assert_eq!(parsed, Section::Available(Payload { count: 7 }));
        let parsed: Section<Payload> =
            serde_json::from_str(r#"{"status":"no_data","reason":"no_posts"}"#).unwrap();
        assert_eq!(parsed, Section::no_data(NoDataReason::NoPosts));
    }
}
