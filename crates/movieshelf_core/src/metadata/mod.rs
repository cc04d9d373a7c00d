//! Movie metadata lookup (external collaborator of the data layer).
//!
//! # Responsibility
//! - Define the provider contract and the plain-data record a lookup yields.
//! - Convert lookup records into movie drafts the library facade accepts.
//!
//! # Invariants
//! - The library facade never calls a provider; callers fetch metadata
//!   first and pass plain data in.
//! - Network failure, lookup misses and malformed payloads yield a uniform
//!   error result, never a partial record.

use crate::model::movie::NewMovie;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod omdb;

static LEADING_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})").expect("valid year regex"));

/// Errors from metadata lookup and conversion.
#[derive(Debug)]
pub enum MetadataError {
    /// Transport-level failure (connection, timeout, HTTP status).
    Http(reqwest::Error),
    /// The provider answered but found no movie for the title.
    Lookup(String),
    /// The provider's payload cannot be used as a movie record.
    MalformedResponse(String),
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "metadata request failed: {err}"),
            Self::Lookup(message) => write!(f, "metadata lookup failed: {message}"),
            Self::MalformedResponse(message) => {
                write!(f, "malformed metadata response: {message}")
            }
        }
    }
}

impl Error for MetadataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MetadataError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Descriptive movie fields as a lookup returns them.
///
/// Fields other than `title` stay raw strings because providers report
/// loose formats (year ranges, `"N/A"` markers already normalized to
/// `None` by the client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieMetadata {
    pub title: String,
    pub director: Option<String>,
    pub year: Option<String>,
    pub imdb_rating: Option<String>,
    pub poster: Option<String>,
}

impl MovieMetadata {
    /// Converts this record into a draft the library facade accepts.
    ///
    /// The release year is the leading four-digit run of the raw year
    /// field, so range values like `2012-2014` resolve to their start.
    /// An unparseable global rating is dropped rather than failing the
    /// conversion.
    ///
    /// # Errors
    /// - `MalformedResponse` when the year is missing or carries no
    ///   four-digit prefix; a draft requires a release year.
    pub fn to_movie_draft(&self) -> Result<NewMovie, MetadataError> {
        let year_text = self.year.as_deref().ok_or_else(|| {
            MetadataError::MalformedResponse(format!("missing year for `{}`", self.title))
        })?;
        let release_year = extract_release_year(year_text).ok_or_else(|| {
            MetadataError::MalformedResponse(format!(
                "unusable year `{year_text}` for `{}`",
                self.title
            ))
        })?;

        Ok(NewMovie {
            title: self.title.clone(),
            director: self.director.clone(),
            release_year,
            rating: self
                .imdb_rating
                .as_deref()
                .and_then(|value| value.parse::<f64>().ok())
                .filter(|value| value.is_finite()),
            poster: self.poster.clone(),
        })
    }
}

/// Provider contract: resolve a free-text title to descriptive fields.
pub trait MetadataProvider {
    fn fetch_by_title(&self, title: &str) -> Result<MovieMetadata, MetadataError>;
}

fn extract_release_year(value: &str) -> Option<i32> {
    LEADING_YEAR_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::{extract_release_year, MetadataError, MovieMetadata};

    fn metadata(year: Option<&str>, imdb_rating: Option<&str>) -> MovieMetadata {
        MovieMetadata {
            title: "Inception".to_string(),
            director: Some("Christopher Nolan".to_string()),
            year: year.map(str::to_string),
            imdb_rating: imdb_rating.map(str::to_string),
            poster: None,
        }
    }

    #[test]
    fn extract_release_year_takes_leading_four_digits() {
        assert_eq!(extract_release_year("2010"), Some(2010));
        assert_eq!(extract_release_year("2012-2014"), Some(2012));
        assert_eq!(extract_release_year("circa 2010"), None);
        assert_eq!(extract_release_year(""), None);
    }

    #[test]
    fn draft_conversion_parses_year_and_rating() {
        let draft = metadata(Some("2010"), Some("8.8")).to_movie_draft().unwrap();
        assert_eq!(draft.release_year, 2010);
        assert_eq!(draft.rating, Some(8.8));
        assert_eq!(draft.director.as_deref(), Some("Christopher Nolan"));
    }

    #[test]
    fn draft_conversion_drops_unparseable_rating() {
        let draft = metadata(Some("2010"), Some("not-rated"))
            .to_movie_draft()
            .unwrap();
        assert_eq!(draft.rating, None);
    }

    #[test]
    fn draft_conversion_requires_a_usable_year() {
        assert!(matches!(
            metadata(None, None).to_movie_draft(),
            Err(MetadataError::MalformedResponse(_))
        ));
        assert!(matches!(
            metadata(Some("unknown"), None).to_movie_draft(),
            Err(MetadataError::MalformedResponse(_))
        ));
    }
}
