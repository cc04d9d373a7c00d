//! Movie repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level movie persistence over the `movies` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewMovie::validate()` before SQL mutations.
//! - The global `rating` column is written once at insert; no update path
//!   for it exists here.

use crate::model::movie::{Movie, MovieId, NewMovie};
use crate::repo::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    title,
    director,
    release_year,
    rating,
    poster
FROM movies";

/// Repository interface for movie rows.
pub trait MovieRepository {
    /// Inserts one movie from a validated draft and returns it with its
    /// assigned id.
    fn insert_movie(&self, draft: &NewMovie) -> StoreResult<Movie>;
    /// Gets one movie by id.
    fn get_movie(&self, id: MovieId) -> StoreResult<Option<Movie>>;
    /// Finds one movie by exact title.
    fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>>;
    /// Lists all movies ordered by id.
    fn list_movies(&self) -> StoreResult<Vec<Movie>>;
    /// Deletes one movie row.
    fn delete_movie(&self, id: MovieId) -> StoreResult<()>;
}

/// SQLite-backed movie repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn insert_movie(&self, draft: &NewMovie) -> StoreResult<Movie> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO movies (title, director, release_year, rating, poster)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.title.as_str(),
                draft.director.as_deref(),
                draft.release_year,
                draft.rating,
                draft.poster.as_deref(),
            ],
        )?;

        Ok(Movie {
            id: self.conn.last_insert_rowid(),
            title: draft.title.clone(),
            director: draft.director.clone(),
            release_year: draft.release_year,
            rating: draft.rating,
            poster: draft.poster.clone(),
        })
    }

    fn get_movie(&self, id: MovieId) -> StoreResult<Option<Movie>> {
        let movie = self
            .conn
            .query_row(
                &format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_movie_row,
            )
            .optional()?;
        Ok(movie)
    }

    fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>> {
        let movie = self
            .conn
            .query_row(
                &format!("{MOVIE_SELECT_SQL} WHERE title = ?1;"),
                [title],
                parse_movie_row,
            )
            .optional()?;
        Ok(movie)
    }

    fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut movies = Vec::new();
        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }
        Ok(movies)
    }

    fn delete_movie(&self, id: MovieId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM movies WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(StoreError::MovieNotFound(id));
        }
        Ok(())
    }
}

fn parse_movie_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get("id")?,
        title: row.get("title")?,
        director: row.get("director")?,
        release_year: row.get("release_year")?,
        rating: row.get("rating")?,
        poster: row.get("poster")?,
    })
}
