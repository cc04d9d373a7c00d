//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the library store.
//! - Configure connection pragmas and trigger schema migrations before
//!   returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`; the user→entry cascade
//!   depends on it.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with mode, duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with mode, duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    match open_and_bootstrap(open) {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err((stage, err)) => {
            error!(
                "event=db_open module=db status=error mode={mode} stage={stage} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn open_and_bootstrap(
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> Result<Connection, (&'static str, DbError)> {
    let mut conn = open().map_err(|err| ("connect", DbError::from(err)))?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| ("configure", DbError::from(err)))?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|err| ("configure", DbError::from(err)))?;

    apply_migrations(&mut conn).map_err(|err| ("migrate", err))?;
    Ok(conn)
}
