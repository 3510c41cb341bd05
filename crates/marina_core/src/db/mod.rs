//! SQLite file handling for the marina store.
//!
//! Connections handed out here always carry the boats/slips layout; see
//! [`schema`] for how the layout is stamped.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::SCHEMA_VERSION;

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or preparing a marina database.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open `target` (a file path, or `:memory:`).
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// The file is stamped with a layout this build does not know.
    SchemaMismatch { found: u32, expected: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open marina database `{target}`: {source}")
            }
            Self::SchemaMismatch { found, expected } => write!(
                f,
                "marina database is stamped with schema {found}, this build uses {expected}"
            ),
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
