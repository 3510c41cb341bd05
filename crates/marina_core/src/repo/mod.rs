//! Repository layer: persistence contracts and the SQLite store.
//!
//! # Responsibility
//! - Define per-entity data access contracts (`BoatRepository`,
//!   `SlipRepository`) and a unit-of-work seam (`Transactional`).
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Write paths validate the entity before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Updates and deletes of a missing row return a semantic not-found error.

pub mod boat_repo;
pub mod slip_repo;

use crate::db::schema::{stamped_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::boat::{BoatId, BoatValidationError};
use crate::model::slip::SlipId;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub use boat_repo::{BoatListQuery, BoatRepository};
pub use slip_repo::{SlipListQuery, SlipRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for marina persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BoatValidationError),
    Db(DbError),
    BoatNotFound(BoatId),
    SlipNotFound(SlipId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::BoatNotFound(id) => write!(f, "boat not found: {id}"),
            Self::SlipNotFound(id) => write!(f, "slip not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted marina data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoatValidationError> for RepoError {
    fn from(value: BoatValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Unit-of-work seam for operations that touch more than one entity.
pub trait Transactional {
    /// Runs `work` so that all of its reads and writes commit together or
    /// not at all. Must not be nested.
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<RepoError>;
}

/// Everything a marina service needs from storage.
pub trait MarinaStore: BoatRepository + SlipRepository + Transactional {}

impl<T> MarinaStore for T where T: BoatRepository + SlipRepository + Transactional {}

/// SQLite-backed marina store over a connection opened by `db::open_db`.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Wraps a connection after checking that its schema is usable.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Wraps a connection already vetted by [`SqliteStore::try_new`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub(crate) fn conn(&self) -> &'conn Connection {
        self.conn
    }
}

impl Transactional for SqliteStore<'_> {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<RepoError>,
    {
        // IMMEDIATE takes the write lock up front so check-then-write
        // sequences cannot interleave with another writer.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        let value = work(self)?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("boats", &["id", "name", "type", "length", "at_sea"]),
    ("slips", &["id", "number", "current_boat", "arrival_date"]),
];

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = SCHEMA_VERSION;
    let actual_version = stamped_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
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

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
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
