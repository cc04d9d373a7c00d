//! Movie library facade.
//!
//! # Responsibility
//! - Expose intent-revealing domain operations over the entity store.
//! - Enforce the invariants raw storage does not: user-name uniqueness,
//!   movie reuse by title, duplicate-entry conflicts, orphan purge.
//!
//! # Invariants
//! - Every mutating operation runs in one immediate transaction; a failure
//!   rolls back in full and leaves no partial effects.
//! - Orphan purge is decided per movie: a movie is deleted only when no
//!   entry from any user still references it.
//! - Personal ratings live on collection entries; the movie's global rating
//!   is never touched after insert.

use crate::model::collection::{CollectionEntry, EntryId};
use crate::model::movie::{Movie, MovieId, MovieValidationError, NewMovie};
use crate::model::user::{User, UserId};
use crate::repo::collection_repo::{CollectionRepository, SqliteCollectionRepository};
use crate::repo::movie_repo::{MovieRepository, SqliteMovieRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{ensure_store_ready, StoreError};
use log::error;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from library facade operations.
#[derive(Debug)]
pub enum LibraryError {
    /// User name is blank after trim.
    EmptyUserName,
    /// Another user already carries this name.
    DuplicateUserName(String),
    /// The user's collection already links this movie.
    AlreadyInCollection { user_id: UserId, movie_id: MovieId },
    /// Rating is NaN or infinite.
    InvalidRating(f64),
    /// Rejected movie draft.
    InvalidMovie(MovieValidationError),
    /// Target user does not exist.
    UserNotFound(UserId),
    /// Target movie does not exist.
    MovieNotFound(MovieId),
    /// Target collection entry does not exist.
    EntryNotFound(EntryId),
    /// The user exists but has no entry for this movie.
    NotInCollection { user_id: UserId, movie_id: MovieId },
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUserName => write!(f, "user name must not be blank"),
            Self::DuplicateUserName(name) => write!(f, "user name already taken: `{name}`"),
            Self::AlreadyInCollection { user_id, movie_id } => write!(
                f,
                "movie {movie_id} is already in the collection of user {user_id}"
            ),
            Self::InvalidRating(value) => {
                write!(f, "rating must be a finite number, got {value}")
            }
            Self::InvalidMovie(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::MovieNotFound(id) => write!(f, "movie not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "collection entry not found: {id}"),
            Self::NotInCollection { user_id, movie_id } => write!(
                f,
                "movie {movie_id} is not in the collection of user {user_id}"
            ),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent library state: {details}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMovie(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for LibraryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UserNotFound(id) => Self::UserNotFound(id),
            StoreError::MovieNotFound(id) => Self::MovieNotFound(id),
            StoreError::EntryNotFound(id) => Self::EntryNotFound(id),
            StoreError::Validation(err) => Self::InvalidMovie(err),
            other => Self::Store(other),
        }
    }
}

impl From<rusqlite::Error> for LibraryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(StoreError::from(value))
    }
}

/// Outcome of removing a movie from one user's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedMovie {
    /// The affected movie as it was stored before any purge.
    pub movie: Movie,
    /// Whether the movie row itself was deleted because no entry from any
    /// user referenced it anymore.
    pub purged: bool,
}

/// Outcome of deleting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUser {
    /// The deleted user's former name.
    pub name: String,
    /// Number of movies purged because the deleted entries were their last
    /// references.
    pub purged_movies: usize,
}

/// Library facade over a migrated SQLite connection.
#[derive(Debug)]
pub struct LibraryService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> LibraryService<'conn> {
    /// Constructs a facade from a migrated/ready connection.
    ///
    /// # Errors
    /// - Rejects connections whose schema version or physical shape does
    ///   not match the migrations known by this binary.
    pub fn try_new(conn: &'conn Connection) -> Result<Self, LibraryError> {
        ensure_store_ready(conn)?;
        Ok(Self { conn })
    }

    /// Lists all users. Store failures degrade to an empty list and are
    /// logged, never surfaced.
    pub fn list_users(&self) -> Vec<User> {
        match SqliteUserRepository::new(self.conn).list_users() {
            Ok(users) => users,
            Err(err) => {
                error!("event=list_users module=service status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Lists all catalog movies. Store failures degrade to an empty list
    /// and are logged, never surfaced.
    pub fn list_movies(&self) -> Vec<Movie> {
        match SqliteMovieRepository::new(self.conn).list_movies() {
            Ok(movies) => movies,
            Err(err) => {
                error!("event=list_movies module=service status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Returns one user's collection entries, or `None` when no such user
    /// exists. Store failures degrade to an empty list and are logged.
    pub fn collection_for_user(&self, user_id: UserId) -> Option<Vec<CollectionEntry>> {
        match SqliteUserRepository::new(self.conn).get_user(user_id) {
            Ok(Some(_)) => {}
            Ok(None) => return None,
            Err(err) => {
                error!(
                    "event=collection_for_user module=service status=error user_id={user_id} error={err}"
                );
                return Some(Vec::new());
            }
        }

        match SqliteCollectionRepository::new(self.conn).entries_for_user(user_id) {
            Ok(entries) => Some(entries),
            Err(err) => {
                error!(
                    "event=collection_for_user module=service status=error user_id={user_id} error={err}"
                );
                Some(Vec::new())
            }
        }
    }

    /// Gets the entry linking one user to one movie, if any.
    pub fn entry_for(
        &self,
        user_id: UserId,
        movie_id: MovieId,
    ) -> Result<Option<CollectionEntry>, LibraryError> {
        let entry = SqliteCollectionRepository::new(self.conn).entry_for(user_id, movie_id)?;
        Ok(entry)
    }

    /// Finds one user by exact name. `Ok(None)` means no such user and is
    /// distinct from a store failure.
    pub fn find_user_by_name(&self, name: &str) -> Result<Option<User>, LibraryError> {
        let user = SqliteUserRepository::new(self.conn).find_user_by_name(name)?;
        Ok(user)
    }

    /// Gets one catalog movie by id.
    pub fn get_movie(&self, movie_id: MovieId) -> Result<Option<Movie>, LibraryError> {
        let movie = SqliteMovieRepository::new(self.conn).get_movie(movie_id)?;
        Ok(movie)
    }

    /// Creates one user with a unique, non-blank name.
    ///
    /// # Errors
    /// - `EmptyUserName` when the name trims to nothing; no row is created.
    /// - `DuplicateUserName` when the name is already taken; no row is
    ///   created.
    pub fn create_user(&self, name: &str) -> Result<User, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyUserName);
        }

        let tx = self.begin_tx()?;
        let users = SqliteUserRepository::new(&tx);
        if users.find_user_by_name(name)?.is_some() {
            return Err(LibraryError::DuplicateUserName(name.to_string()));
        }
        let user = users.insert_user(name)?;
        tx.commit()?;
        Ok(user)
    }

    /// Adds a movie to one user's collection.
    ///
    /// A movie with the same title is reused instead of duplicated; only the
    /// collection entry is created. The entry starts with an unset personal
    /// rating regardless of the draft's global rating.
    ///
    /// # Errors
    /// - `InvalidMovie` when the draft fails validation; nothing is written.
    /// - `UserNotFound` when no such user exists.
    /// - `AlreadyInCollection` when the user already links this movie;
    ///   nothing changes.
    pub fn add_movie_to_user(
        &self,
        draft: &NewMovie,
        user_id: UserId,
    ) -> Result<CollectionEntry, LibraryError> {
        draft.validate().map_err(LibraryError::InvalidMovie)?;

        let tx = self.begin_tx()?;
        if SqliteUserRepository::new(&tx).get_user(user_id)?.is_none() {
            return Err(LibraryError::UserNotFound(user_id));
        }

        let movies = SqliteMovieRepository::new(&tx);
        let movie = match movies.find_movie_by_title(draft.title.as_str())? {
            Some(existing) => existing,
            None => movies.insert_movie(draft)?,
        };

        let entries = SqliteCollectionRepository::new(&tx);
        if entries.entry_for(user_id, movie.id)?.is_some() {
            return Err(LibraryError::AlreadyInCollection {
                user_id,
                movie_id: movie.id,
            });
        }
        let entry = entries.insert_entry(user_id, movie.id)?;
        tx.commit()?;
        Ok(entry)
    }

    /// Sets the personal rating on one collection entry.
    ///
    /// Only `movie_rating` on the entry is mutated; the movie's global
    /// rating is untouched. Range validation happens at the boundary via
    /// [`crate::service::rating::parse_user_rating`]; this method only
    /// re-validates finiteness.
    ///
    /// # Errors
    /// - `InvalidRating` for NaN/infinite input; storage is not touched.
    /// - `EntryNotFound` when no such entry exists.
    pub fn rate_movie(&self, entry_id: EntryId, rating: f64) -> Result<CollectionEntry, LibraryError> {
        if !rating.is_finite() {
            return Err(LibraryError::InvalidRating(rating));
        }

        let tx = self.begin_tx()?;
        let entries = SqliteCollectionRepository::new(&tx);
        entries.set_entry_rating(entry_id, rating)?;
        let entry = entries
            .get_entry(entry_id)?
            .ok_or(LibraryError::InconsistentState(
                "rated entry not found in read-back",
            ))?;
        tx.commit()?;
        Ok(entry)
    }

    /// Removes a movie from one user's collection and purges the movie row
    /// when no entry from any user references it anymore.
    ///
    /// # Errors
    /// - `UserNotFound` / `MovieNotFound` when either endpoint is missing.
    /// - `NotInCollection` when the user has no entry for this movie.
    pub fn remove_movie_from_user(
        &self,
        user_id: UserId,
        movie_id: MovieId,
    ) -> Result<RemovedMovie, LibraryError> {
        let tx = self.begin_tx()?;
        if SqliteUserRepository::new(&tx).get_user(user_id)?.is_none() {
            return Err(LibraryError::UserNotFound(user_id));
        }

        let movies = SqliteMovieRepository::new(&tx);
        let movie = movies
            .get_movie(movie_id)?
            .ok_or(LibraryError::MovieNotFound(movie_id))?;

        let entries = SqliteCollectionRepository::new(&tx);
        let entry = entries
            .entry_for(user_id, movie_id)?
            .ok_or(LibraryError::NotInCollection { user_id, movie_id })?;

        entries.delete_entry(entry.id)?;
        let purged = !entries.movie_has_entries(movie_id)?;
        if purged {
            movies.delete_movie(movie_id)?;
        }

        tx.commit()?;
        Ok(RemovedMovie { movie, purged })
    }

    /// Deletes one user, cascading its collection entries and purging every
    /// movie left without any remaining entry.
    ///
    /// The entry cascade is a storage-level rule; the movie purge is decided
    /// here, per movie, so titles still linked by other users survive.
    ///
    /// # Errors
    /// - `UserNotFound` when no such user exists.
    pub fn delete_user(&self, user_id: UserId) -> Result<DeletedUser, LibraryError> {
        let tx = self.begin_tx()?;
        let users = SqliteUserRepository::new(&tx);
        let user = users
            .get_user(user_id)?
            .ok_or(LibraryError::UserNotFound(user_id))?;

        let entries = SqliteCollectionRepository::new(&tx);
        let affected_movie_ids = entries.movie_ids_for_user(user_id)?;

        users.delete_user(user_id)?;

        let movies = SqliteMovieRepository::new(&tx);
        let mut purged_movies = 0;
        for movie_id in affected_movie_ids {
            if !entries.movie_has_entries(movie_id)? {
                movies.delete_movie(movie_id)?;
                purged_movies += 1;
            }
        }

        tx.commit()?;
        Ok(DeletedUser {
            name: user.name,
            purged_movies,
        })
    }

    fn begin_tx(&self) -> Result<Transaction<'conn>, LibraryError> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        Ok(tx)
    }
}
