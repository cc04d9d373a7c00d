//! User domain model.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - Name uniqueness is a domain rule enforced by the library facade before
//!   insert, not a storage constraint.

use serde::{Deserialize, Serialize};

/// Surrogate key assigned by storage on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// An account holding a personal movie collection.
///
/// Deleting a user cascades to its collection entries at the storage layer;
/// movies left without any remaining entry are purged by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable storage id.
    pub id: UserId,
    /// Display name, unique across users by domain rule.
    pub name: String,
}
