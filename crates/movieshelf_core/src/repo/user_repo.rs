//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level user persistence over the `users` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Name uniqueness is NOT enforced here; the library facade checks it
//!   inside the same transaction as the insert.
//! - `delete_user` removes the row only; collection entries cascade at the
//!   storage layer.

use crate::model::user::{User, UserId};
use crate::repo::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for user rows.
pub trait UserRepository {
    /// Inserts one user and returns it with its assigned id.
    fn insert_user(&self, name: &str) -> StoreResult<User>;
    /// Gets one user by id.
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;
    /// Finds one user by exact name.
    fn find_user_by_name(&self, name: &str) -> StoreResult<Option<User>>;
    /// Lists all users ordered by id.
    fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Deletes one user row; entries cascade.
    fn delete_user(&self, id: UserId) -> StoreResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, name: &str) -> StoreResult<User> {
        self.conn
            .execute("INSERT INTO users (name) VALUES (?1);", [name])?;
        Ok(User {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name FROM users WHERE id = ?1;",
                [id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn find_user_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name FROM users WHERE name = ?1;",
                [name],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM users ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(StoreError::UserNotFound(id));
        }
        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
