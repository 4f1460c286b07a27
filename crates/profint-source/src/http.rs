//! JSON-over-HTTP export source.
//!
//! Reads from a service that already exposes a legitimate client's view of the
//! platform:
//!
//! | Call | Endpoint |
//! |---|---|
//! | profile | `GET {base}/profiles/{id}` |
//! | relationships | `GET {base}/profiles/{id}/relationships` |
//! | posts | `GET {base}/profiles/{id}/posts?limit={n}` |

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use profint_core::{Post, Profile, RelationshipSet};

use crate::error::{Resource, SourceError};
use crate::ingest::{ingest_posts, ingest_profile, ingest_relationships};
use crate::raw::{RawPostsPage, RawProfile, RawRelationships};
use crate::retry::retry_with_backoff;
use crate::source::DataSource;

/// Characters left unescaped in the identifier path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for a profile export service.
pub struct HttpSource {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpSource {
    /// Creates a source for the export service at `base_url`.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors (429, 5xx, network errors).
    ///
    /// # Errors
    ///
    /// - [`SourceError::InvalidBaseUrl`] if `base_url` is not an http(s) URL.
    /// - [`SourceError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SourceError> {
        let parsed = Url::parse(base_url).map_err(|e| SourceError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    fn profile_url(&self, identifier: &str) -> String {
        format!(
            "{}/profiles/{}",
            self.base_url,
            utf8_percent_encode(identifier, SEGMENT)
        )
    }

    /// GETs `url` with retries and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T, SourceError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(SourceError::RateLimited { retry_after_secs });
            }

            if !status.is_success() {
                return Err(SourceError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await?;

        serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

impl DataSource for HttpSource {
    async fn fetch_profile(&self, identifier: &str) -> Result<Profile, SourceError> {
        let url = self.profile_url(identifier);
        let raw: RawProfile = match self.get_json(&url, &format!("profile({identifier})")).await {
            Ok(raw) => raw,
            Err(SourceError::UnexpectedStatus { status: 404, .. }) => {
                return Err(SourceError::NotFound {
                    identifier: identifier.to_owned(),
                });
            }
            Err(e) => return Err(e),
        };
        ingest_profile(raw, identifier)
    }

    async fn fetch_relationships(&self, identifier: &str) -> Result<RelationshipSet, SourceError> {
        let url = format!("{}/relationships", self.profile_url(identifier));
        let raw: RawRelationships = self
            .get_json(&url, &format!("relationships({identifier})"))
            .await
            .map_err(|e| SourceError::unavailable(Resource::Relationships, &e))?;
        ingest_relationships(raw.followers, raw.following)
    }

    async fn fetch_posts(&self, identifier: &str, limit: usize) -> Result<Vec<Post>, SourceError> {
        let url = format!("{}/posts?limit={limit}", self.profile_url(identifier));
        let page: RawPostsPage = self
            .get_json(&url, &format!("posts({identifier})"))
            .await
            .map_err(|e| SourceError::unavailable(Resource::Posts, &e))?;
        let mut posts = ingest_posts(page.into_posts());
        posts.truncate(limit);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpSource {
        HttpSource::new(base, 5, "profint-test/0.1", 0, 0).unwrap()
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = HttpSource::new("ftp://example.com", 5, "ua", 0, 0)
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::InvalidBaseUrl { .. }));
        assert!(HttpSource::new("not a url", 5, "ua", 0, 0).is_err());
    }

    #[test]
    fn identifier_is_percent_encoded() {
        let src = source("http://localhost:9000/api/");
        assert_eq!(
            src.profile_url("a b/c"),
            "http://localhost:9000/api/profiles/a%20b%2Fc"
        );
        assert_eq!(
            src.profile_url("first.last_99"),
            "http://localhost:9000/api/profiles/first.last_99"
        );
    }
}
