//! Marina table layout and its version stamp.
//!
//! The whole layout lives in `schema.sql`. A file without a stamp gets the
//! script applied once; a file stamped with [`SCHEMA_VERSION`] is used
//! as-is. Any other stamp is refused.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Version stamped into `PRAGMA user_version` once the layout exists.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Outcome of [`ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Boats and slips tables were just created.
    Created,
    /// The file already carried the current layout.
    Current,
}

/// Reads the version stamp; `0` for a file marina has never touched.
pub fn stamped_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Creates the boats/slips layout on an unstamped file.
pub(crate) fn ensure_schema(conn: &mut Connection) -> DbResult<SchemaState> {
    match stamped_version(conn)? {
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            info!(
                "event=db_schema module=db status=ok action=create version={}",
                SCHEMA_VERSION
            );
            Ok(SchemaState::Created)
        }
        SCHEMA_VERSION => Ok(SchemaState::Current),
        found => Err(DbError::SchemaMismatch {
            found,
            expected: SCHEMA_VERSION,
        }),
    }
}
