//! Collection entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level persistence for the `user_movies` join table.
//! - Expose the reference probes the orphan-purge rule is built on.
//!
//! # Invariants
//! - The `(user_id, movie_id)` UNIQUE constraint is the storage backstop;
//!   the library facade checks for an existing entry first so duplicates
//!   surface as a domain conflict, not a constraint violation.
//! - `set_entry_rating` touches `movie_rating` only.

use crate::model::collection::{CollectionEntry, EntryId};
use crate::model::movie::MovieId;
use crate::model::user::UserId;
use crate::repo::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    movie_id,
    movie_rating
FROM user_movies";

/// Repository interface for collection entries.
pub trait CollectionRepository {
    /// Inserts one entry with an unset personal rating.
    fn insert_entry(&self, user_id: UserId, movie_id: MovieId) -> StoreResult<CollectionEntry>;
    /// Gets one entry by id.
    fn get_entry(&self, id: EntryId) -> StoreResult<Option<CollectionEntry>>;
    /// Gets the entry linking one user to one movie, if any.
    fn entry_for(&self, user_id: UserId, movie_id: MovieId)
        -> StoreResult<Option<CollectionEntry>>;
    /// Lists one user's entries ordered by id.
    fn entries_for_user(&self, user_id: UserId) -> StoreResult<Vec<CollectionEntry>>;
    /// Updates the personal rating on one entry.
    fn set_entry_rating(&self, id: EntryId, rating: f64) -> StoreResult<()>;
    /// Deletes one entry row.
    fn delete_entry(&self, id: EntryId) -> StoreResult<()>;
    /// Returns whether any entry still references the given movie.
    fn movie_has_entries(&self, movie_id: MovieId) -> StoreResult<bool>;
    /// Lists the distinct movie ids referenced by one user's entries.
    fn movie_ids_for_user(&self, user_id: UserId) -> StoreResult<Vec<MovieId>>;
}

/// SQLite-backed collection entry repository.
pub struct SqliteCollectionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCollectionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CollectionRepository for SqliteCollectionRepository<'_> {
    fn insert_entry(&self, user_id: UserId, movie_id: MovieId) -> StoreResult<CollectionEntry> {
        self.conn.execute(
            "INSERT INTO user_movies (user_id, movie_id) VALUES (?1, ?2);",
            params![user_id, movie_id],
        )?;
        Ok(CollectionEntry {
            id: self.conn.last_insert_rowid(),
            user_id,
            movie_id,
            movie_rating: None,
        })
    }

    fn get_entry(&self, id: EntryId) -> StoreResult<Option<CollectionEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_entry_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn entry_for(
        &self,
        user_id: UserId,
        movie_id: MovieId,
    ) -> StoreResult<Option<CollectionEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("{ENTRY_SELECT_SQL} WHERE user_id = ?1 AND movie_id = ?2;"),
                params![user_id, movie_id],
                parse_entry_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn entries_for_user(&self, user_id: UserId) -> StoreResult<Vec<CollectionEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"))?;
        let mut rows = stmt.query([user_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }

    fn set_entry_rating(&self, id: EntryId, rating: f64) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE user_movies SET movie_rating = ?2 WHERE id = ?1;",
            params![id, rating],
        )?;
        if changed == 0 {
            return Err(StoreError::EntryNotFound(id));
        }
        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM user_movies WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(StoreError::EntryNotFound(id));
        }
        Ok(())
    }

    fn movie_has_entries(&self, movie_id: MovieId) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM user_movies
                WHERE movie_id = ?1
            );",
            [movie_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn movie_ids_for_user(&self, user_id: UserId) -> StoreResult<Vec<MovieId>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT movie_id
             FROM user_movies
             WHERE user_id = ?1
             ORDER BY movie_id ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }
}

fn parse_entry_row(row: &Row<'_>) -> rusqlite::Result<CollectionEntry> {
    Ok(CollectionEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        movie_id: row.get("movie_id")?,
        movie_rating: row.get("movie_rating")?,
    })
}
