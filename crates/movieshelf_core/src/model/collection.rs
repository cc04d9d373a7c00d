//! Collection entry domain model (the user/movie link).
//!
//! # Invariants
//! - At most one entry exists per `(user_id, movie_id)` pair.
//! - `movie_rating` is the owning user's personal score and is independent
//!   of the movie's global rating.

use crate::model::movie::MovieId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by storage on insert.
pub type EntryId = i64;

/// One row of a user's collection: a link to a catalog movie plus the
/// user's own rating for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    /// Stable storage id.
    pub id: EntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Linked catalog movie.
    pub movie_id: MovieId,
    /// Personal score, unset until the user rates the movie.
    pub movie_rating: Option<f64>,
}
