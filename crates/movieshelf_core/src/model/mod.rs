//! Domain model for the movie library.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the user/movie/collection-entry shapes free of storage details.
//!
//! # Invariants
//! - Every persisted record is identified by a stable integer id assigned
//!   on insert.
//! - A collection entry links exactly one user to exactly one movie.

pub mod collection;
pub mod movie;
pub mod user;
