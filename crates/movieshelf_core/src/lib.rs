//! Core domain logic for the movieshelf library.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use metadata::omdb::{OmdbClient, FALLBACK_POSTER};
pub use metadata::{MetadataError, MetadataProvider, MovieMetadata};
pub use model::collection::{CollectionEntry, EntryId};
pub use model::movie::{Movie, MovieId, MovieValidationError, NewMovie};
pub use model::user::{User, UserId};
pub use repo::collection_repo::{CollectionRepository, SqliteCollectionRepository};
pub use repo::movie_repo::{MovieRepository, SqliteMovieRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{ensure_store_ready, StoreError, StoreResult};
pub use service::library_service::{DeletedUser, LibraryError, LibraryService, RemovedMovie};
pub use service::rating::{parse_user_rating, RatingParseError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
