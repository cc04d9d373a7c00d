//! OMDb HTTP client for movie metadata lookup.
//!
//! # Responsibility
//! - Resolve a free-text title against the OMDb API with a bounded request
//!   timeout.
//! - Normalize OMDb's `"N/A"` markers to absent fields.
//! - Verify poster URLs are reachable and substitute the fixed fallback
//!   path when they are not.
//!
//! # Invariants
//! - OMDb signals lookup misses with `Response: "False"` inside an HTTP 200
//!   body; those surface as `MetadataError::Lookup`, never as a record.

use super::{MetadataError, MetadataProvider, MovieMetadata};
use log::{error, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed poster path served when the looked-up URL is unreachable.
pub const FALLBACK_POSTER: &str = "/static/fallback_poster.jpeg";

/// OMDb wire payload for a by-title lookup.
///
/// Error payloads reuse the same shape with `Response: "False"` and an
/// `Error` message, so every field stays optional.
#[derive(Debug, Clone, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Blocking OMDb client.
pub struct OmdbClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    /// Creates a client with the given API key.
    ///
    /// # Errors
    /// - `MetadataError::Http` when the underlying HTTP client cannot be
    ///   built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, MetadataError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: OMDB_BASE_URL.to_string(),
        })
    }

    /// Creates a client with the API key taken from `OMDB_API_KEY`.
    ///
    /// # Errors
    /// - `MetadataError::Lookup` when the variable is unset or empty.
    pub fn from_env() -> Result<Self, MetadataError> {
        let api_key = std::env::var(OMDB_API_KEY_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                MetadataError::Lookup(format!("environment variable {OMDB_API_KEY_ENV} is not set"))
            })?;
        Self::new(api_key)
    }

    /// Checks that a poster URL is reachable, substituting the fixed
    /// fallback path when it is not.
    pub fn resolve_poster(&self, url: &str) -> String {
        let reachable = self
            .http
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .is_ok();
        if reachable {
            url.to_string()
        } else {
            info!("event=poster_check module=metadata status=fallback");
            FALLBACK_POSTER.to_string()
        }
    }
}

impl MetadataProvider for OmdbClient {
    fn fetch_by_title(&self, title: &str) -> Result<MovieMetadata, MetadataError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                error!("event=metadata_fetch module=metadata status=error error={err}");
                MetadataError::Http(err)
            })?;

        let payload: OmdbPayload = response.json().map_err(|err| {
            error!("event=metadata_fetch module=metadata status=error error_code=decode error={err}");
            MetadataError::MalformedResponse(err.to_string())
        })?;

        let metadata = metadata_from_payload(payload)?;
        info!("event=metadata_fetch module=metadata status=ok");
        Ok(metadata)
    }
}

fn metadata_from_payload(payload: OmdbPayload) -> Result<MovieMetadata, MetadataError> {
    if payload.response.as_deref() == Some("False") {
        let message = payload
            .error
            .unwrap_or_else(|| "movie not found".to_string());
        return Err(MetadataError::Lookup(message));
    }

    let title = normalize_field(payload.title).ok_or_else(|| {
        MetadataError::MalformedResponse("payload carries no title".to_string())
    })?;

    Ok(MovieMetadata {
        title,
        director: normalize_field(payload.director),
        year: normalize_field(payload.year),
        imdb_rating: normalize_field(payload.imdb_rating),
        poster: normalize_field(payload.poster),
    })
}

/// Maps OMDb's `"N/A"` marker and blank strings to an absent field.
fn normalize_field(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty() && text != "N/A")
}

#[cfg(test)]
mod tests {
    use super::{metadata_from_payload, normalize_field, OmdbPayload};
    use crate::metadata::MetadataError;

    fn decode(json: &str) -> OmdbPayload {
        serde_json::from_str(json).expect("payload should decode")
    }

    #[test]
    fn decodes_full_payload_and_normalizes_na_markers() {
        let payload = decode(
            r#"{
                "Title": "Inception",
                "Director": "Christopher Nolan",
                "Year": "2010",
                "imdbRating": "8.8",
                "Poster": "N/A",
                "Response": "True"
            }"#,
        );
        let metadata = metadata_from_payload(payload).unwrap();
        assert_eq!(metadata.title, "Inception");
        assert_eq!(metadata.year.as_deref(), Some("2010"));
        assert_eq!(metadata.poster, None);
    }

    #[test]
    fn error_payload_becomes_lookup_error() {
        let payload = decode(r#"{"Response": "False", "Error": "Movie not found!"}"#);
        match metadata_from_payload(payload) {
            Err(MetadataError::Lookup(message)) => assert_eq!(message, "Movie not found!"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn payload_without_title_is_malformed() {
        let payload = decode(r#"{"Response": "True", "Year": "2010"}"#);
        assert!(matches!(
            metadata_from_payload(payload),
            Err(MetadataError::MalformedResponse(_))
        ));
    }

    #[test]
    fn normalize_field_trims_and_drops_blank_values() {
        assert_eq!(
            normalize_field(Some(" 2010 ".to_string())).as_deref(),
            Some("2010")
        );
        assert_eq!(normalize_field(Some("  ".to_string())), None);
        assert_eq!(normalize_field(Some("N/A".to_string())), None);
        assert_eq!(normalize_field(None), None);
    }
}
