//! Movie domain model.
//!
//! # Responsibility
//! - Define the persisted movie record and the plain-data draft used to
//!   insert one.
//!
//! # Invariants
//! - `title` is the reuse key when adding from metadata; the facade never
//!   creates two movies with the same title.
//! - `rating` is the global (IMDb-style) score, set once at insert and never
//!   updated afterwards. Per-user scores live on the collection entry.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate key assigned by storage on insert.
pub type MovieId = i64;

/// A catalog movie, shared by every user whose collection references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable storage id.
    pub id: MovieId,
    /// Title as returned by the metadata lookup (or entered manually).
    pub title: String,
    /// Director name when known.
    pub director: Option<String>,
    /// Release year.
    pub release_year: i32,
    /// Global score, immutable after insert.
    pub rating: Option<f64>,
    /// Poster image URL when known.
    pub poster: Option<String>,
}

/// Plain-data draft for inserting a movie.
///
/// This is the shape callers hand to the facade after a metadata lookup;
/// it carries no id because identity is assigned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    /// Required, non-blank after trimming.
    pub title: String,
    pub director: Option<String>,
    pub release_year: i32,
    /// Global score captured at lookup time, if any.
    pub rating: Option<f64>,
    pub poster: Option<String>,
}

/// Validation failure for a movie draft.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieValidationError {
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// Global rating is NaN or infinite.
    NonFiniteRating(f64),
}

impl Display for MovieValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "movie title must not be blank"),
            Self::NonFiniteRating(value) => {
                write!(f, "movie rating must be a finite number, got {value}")
            }
        }
    }
}

impl Error for MovieValidationError {}

impl NewMovie {
    /// Creates a draft with only the required fields set.
    pub fn new(title: impl Into<String>, release_year: i32) -> Self {
        Self {
            title: title.into(),
            director: None,
            release_year,
            rating: None,
            poster: None,
        }
    }

    /// Checks draft invariants before persistence.
    ///
    /// # Errors
    /// - `BlankTitle` when the title trims to nothing.
    /// - `NonFiniteRating` when a global rating is present but not finite.
    pub fn validate(&self) -> Result<(), MovieValidationError> {
        if self.title.trim().is_empty() {
            return Err(MovieValidationError::BlankTitle);
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() {
                return Err(MovieValidationError::NonFiniteRating(rating));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MovieValidationError, NewMovie};

    #[test]
    fn validate_rejects_blank_title() {
        let draft = NewMovie::new("   ", 2010);
        assert_eq!(draft.validate(), Err(MovieValidationError::BlankTitle));
    }

    #[test]
    fn validate_rejects_non_finite_rating() {
        let mut draft = NewMovie::new("Inception", 2010);
        draft.rating = Some(f64::NAN);
        assert!(matches!(
            draft.validate(),
            Err(MovieValidationError::NonFiniteRating(_))
        ));
    }

    #[test]
    fn validate_accepts_minimal_draft() {
        assert_eq!(NewMovie::new("Inception", 2010).validate(), Ok(()));
    }
}
