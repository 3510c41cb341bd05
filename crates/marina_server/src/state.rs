//! Shared application state.

use marina_core::db::{open_db, open_db_in_memory};
use marina_core::{MarinaResult, RepoError, SqliteStore};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ApiError;

/// State shared across handlers.
///
/// One connection serves every request; the mutex makes each service call
/// the only writer while it runs.
pub struct AppState {
    conn: Mutex<Connection>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Opens the database file at `path`, creating its tables if needed.
    pub fn open(path: &Path) -> Result<Self, RepoError> {
        Self::from_connection(open_db(path)?)
    }

    pub fn in_memory() -> Result<Self, RepoError> {
        Self::from_connection(open_db_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, RepoError> {
        SqliteStore::try_new(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `work` against the store on the blocking pool while holding the
    /// connection lock.
    pub async fn with_store<T, F>(self: &Arc<Self>, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(SqliteStore<'_>) -> MarinaResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        let outcome = tokio::task::spawn_blocking(move || {
            // A panicked call has already rolled its transaction back.
            let conn = state.conn.lock().unwrap_or_else(PoisonError::into_inner);
            let store = SqliteStore::new(&conn);
            work(store)
        })
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))?;
        Ok(outcome?)
    }
}
