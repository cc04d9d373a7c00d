//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (users, movies, collection
//!   entries) and their SQLite implementations.
//! - Isolate SQL details from facade/business orchestration.
//!
//! # Invariants
//! - Write paths enforce model validation before SQL mutations.
//! - Repository APIs return semantic errors (typed `*NotFound`) in addition
//!   to DB transport errors.
//! - Repositories operate on migrated connections; readiness is probed via
//!   [`ensure_store_ready`].

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::collection::EntryId;
use crate::model::movie::{MovieId, MovieValidationError};
use crate::model::user::UserId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection_repo;
pub mod movie_repo;
pub mod user_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from entity store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Rejected movie draft.
    Validation(MovieValidationError),
    /// Target user row does not exist.
    UserNotFound(UserId),
    /// Target movie row does not exist.
    MovieNotFound(MovieId),
    /// Target collection entry does not exist.
    EntryNotFound(EntryId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::MovieNotFound(id) => write!(f, "movie not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "collection entry not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "entity store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "entity store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "entity store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<MovieValidationError> for StoreError {
    fn from(value: MovieValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Verifies that a connection carries the fully migrated library schema.
///
/// # Errors
/// - `UninitializedConnection` when `PRAGMA user_version` does not match the
///   latest migration known by this binary.
/// - `MissingRequiredTable` / `MissingRequiredColumn` when the physical
///   schema diverges from the migrated shape.
pub fn ensure_store_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in [
        ("users", &["id", "name"][..]),
        (
            "movies",
            &["id", "title", "director", "release_year", "rating", "poster"][..],
        ),
        (
            "user_movies",
            &["id", "user_id", "movie_id", "movie_rating"][..],
        ),
    ] {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(StoreError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &'static str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
