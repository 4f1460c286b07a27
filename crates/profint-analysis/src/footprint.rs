//! Contact and link artifacts in the profile's own text.
//!
//! Text is scanned in three passes: URLs, then email addresses, then phone
//! numbers. Each pass blanks out what it matched so later passes never see
//! it, which keeps digits inside a URL or an address from being reported as
//! a phone number.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use profint_core::{FootprintFinding, FootprintKind, FootprintSource, Post, Profile};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"'`]+"#).expect("valid url regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}\b")
        .expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?(?:\d{1,3}[ .-]?)?(?:\(\d{1,4}\)[ .-]?)?\d(?:[ .-]?\d)+")
        .expect("valid phone regex")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}[-./]\d{1,2}[-./]\d{1,2}|\d{1,2}[-./]\d{1,2}[-./]\d{2,4})$")
        .expect("valid date regex")
});

/// Year ranges (`2023-2024`) and thousands-grouped amounts (`1.000.000`,
/// `1,500,000`, `1 500 000`) with one separator throughout.
static NOT_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}-\d{4}|\d{1,3}(?:\.\d{3})+|\d{1,3}(?:,\d{3})+|\d{1,3}(?: \d{3})+)$")
        .expect("valid number-grouping regex")
});

/// Query parameters that only track where a click came from.
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "igshid", "igsh", "mc_cid", "mc_eid", "si", "ref", "ref_src",
];

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Scans the biography, the link field and every caption (oldest post first)
/// for contact artifacts.
///
/// Findings are deduplicated on their normalized `(kind, value)`; the first
/// sighting wins. Malformed text never fails, it just yields nothing.
/// `posts` is expected newest first, as sources return them.
#[must_use]
pub fn extract_footprint(profile: &Profile, posts: &[Post]) -> Vec<FootprintFinding> {
    let mut collector = Collector::default();

    collector.scan_text(&profile.biography, FootprintSource::Bio);

    if let Some(link) = profile.external_url.as_deref() {
        if let Some(value) = normalize_url(link) {
            collector.push(FootprintKind::ExternalLink, value, FootprintSource::LinkField);
        }
    }

    for post in posts.iter().rev() {
        collector.scan_text(post.caption_text(), FootprintSource::Caption);
    }

    tracing::debug!(
        identifier = %profile.identifier,
        findings = collector.findings.len(),
        "footprint extracted"
    );
    collector.findings
}

#[derive(Default)]
struct Collector {
    seen: HashSet<(FootprintKind, String)>,
    findings: Vec<FootprintFinding>,
}

impl Collector {
    fn push(&mut self, kind: FootprintKind, value: String, source: FootprintSource) {
        if self.seen.insert((kind, value.clone())) {
            self.findings.push(FootprintFinding {
                kind,
                value,
                source,
            });
        }
    }

    fn scan_text(&mut self, text: &str, source: FootprintSource) {
        if text.trim().is_empty() {
            return;
        }

        // `www.` right after `@` is an email domain, left for the email pass.
        let (urls, rest) = take_matches(&URL_RE, text, |before| before != Some('@'));
        for raw in urls {
            if let Some(value) = normalize_url(trim_trailing_punctuation(&raw)) {
                self.push(FootprintKind::ExternalLink, value, source);
            }
        }

        let (emails, rest) = take_matches(&EMAIL_RE, &rest, |_| true);
        for email in emails {
            self.push(FootprintKind::Email, email.to_lowercase(), source);
        }

        for phone in phone_candidates(&rest) {
            self.push(FootprintKind::Phone, phone, source);
        }
    }
}

/// Returns every match of `re` in `text` that `accept` allows, given the
/// character just before the match, and the text with those matches
/// replaced by spaces.
fn take_matches(
    re: &Regex,
    text: &str,
    accept: impl Fn(Option<char>) -> bool,
) -> (Vec<String>, String) {
    let mut found = Vec::new();
    let mut blanked = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        if !accept(text[..m.start()].chars().next_back()) {
            continue;
        }
        blanked.push_str(&text[last..m.start()]);
        blanked.push_str(&" ".repeat(m.as_str().len()));
        found.push(m.as_str().to_owned());
        last = m.end();
    }
    blanked.push_str(&text[last..]);
    (found, blanked)
}

fn trim_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '}'])
}

/// Canonical digits-only phone numbers in `text`.
fn phone_candidates(text: &str) -> Vec<String> {
    PHONE_RE
        .find_iter(text)
        .filter(|m| {
            // A run glued to surrounding digits or letters is part of something else.
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .filter(|m| !DATE_RE.is_match(m.as_str()) && !NOT_PHONE_RE.is_match(m.as_str()))
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|digits| (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()))
        .collect()
}

/// Reduces a URL to scheme, host, path and any non-tracking query
/// parameters. Bare hosts (`example.com/shop`) are read as `https`.
/// Returns `None` for anything that does not parse as an http(s) URL.
pub(crate) fn normalize_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    if !host.contains('.') && host != "localhost" {
        return None;
    }

    let mut normalized = match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    };
    normalized.push_str(url.path().trim_end_matches('/'));

    let kept: Vec<String> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| {
            if value.is_empty() {
                key.into_owned()
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    if !kept.is_empty() {
        normalized.push('?');
        normalized.push_str(&kept.join("&"));
    }

    Some(normalized)
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

#[cfg(test)]
#[path = "footprint_test.rs"]
mod tests;
