//! Connection bootstrap for the marina database.

use super::schema::{ensure_schema, SchemaState};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MEMORY_TARGET: &str = ":memory:";

/// Opens (or creates) the marina database file.
///
/// The returned connection enforces foreign keys, waits up to five seconds
/// on a locked file and carries the current schema.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    prepare(path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway in-memory marina database, used by tests.
pub fn open_db_in_memory() -> DbResult<Connection> {
    prepare(MEMORY_TARGET.to_string(), Connection::open_in_memory)
}

fn prepare(
    target: String,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect()
        .map_err(|source| DbError::Open {
            target: target.clone(),
            source,
        })
        .and_then(|mut conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            let state = ensure_schema(&mut conn)?;
            Ok((conn, state))
        });

    match result {
        Ok((conn, state)) => {
            info!(
                "event=db_open module=db status=ok target={} schema={} duration_ms={}",
                target,
                match state {
                    SchemaState::Created => "created",
                    SchemaState::Current => "current",
                },
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error target={} duration_ms={} error={}",
                target,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
