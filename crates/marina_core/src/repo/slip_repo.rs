//! Slip repository contract and SQLite implementation.
//!
//! # Invariants
//! - At most one slip row names a given boat as `current_boat`
//!   (enforced by a partial unique index).
//! - `list_slips` returns rows in creation order.

use crate::model::boat::BoatId;
use crate::model::slip::{Slip, SlipId};
use crate::repo::{parse_uuid, RepoError, RepoResult, SqliteStore};
use log::debug;
use rusqlite::{params, Row};

const SLIP_SELECT_SQL: &str = "SELECT
    id,
    number,
    current_boat,
    arrival_date
FROM slips";

/// Filter options for listing slips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlipListQuery {
    /// `Some(true)` for occupied slips, `Some(false)` for vacant ones.
    pub occupied: Option<bool>,
}

/// Repository interface for slip CRUD and occupancy lookups.
pub trait SlipRepository {
    fn create_slip(&self, slip: &Slip) -> RepoResult<SlipId>;
    fn get_slip(&self, id: SlipId) -> RepoResult<Option<Slip>>;
    fn list_slips(&self, query: &SlipListQuery) -> RepoResult<Vec<Slip>>;
    /// Finds the slip whose `current_boat` is `boat_id`.
    fn find_slip_by_boat(&self, boat_id: BoatId) -> RepoResult<Option<Slip>>;
    fn update_slip(&self, slip: &Slip) -> RepoResult<()>;
    fn delete_slip(&self, id: SlipId) -> RepoResult<()>;
}

impl SlipRepository for SqliteStore<'_> {
    fn create_slip(&self, slip: &Slip) -> RepoResult<SlipId> {
        self.conn().execute(
            "INSERT INTO slips (id, number, current_boat, arrival_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                slip.id.to_string(),
                slip.number,
                slip.current_boat.map(|id| id.to_string()),
                slip.arrival_date.as_deref(),
            ],
        )?;

        debug!("event=slip_insert module=repo status=ok slip_id={}", slip.id);
        Ok(slip.id)
    }

    fn get_slip(&self, id: SlipId) -> RepoResult<Option<Slip>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SLIP_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_slip_row(row)?));
        }

        Ok(None)
    }

    fn list_slips(&self, query: &SlipListQuery) -> RepoResult<Vec<Slip>> {
        let mut sql = format!("{SLIP_SELECT_SQL} WHERE 1 = 1");

        match query.occupied {
            Some(true) => sql.push_str(" AND current_boat IS NOT NULL"),
            Some(false) => sql.push_str(" AND current_boat IS NULL"),
            None => {}
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut slips = Vec::new();

        while let Some(row) = rows.next()? {
            slips.push(parse_slip_row(row)?);
        }

        Ok(slips)
    }

    fn find_slip_by_boat(&self, boat_id: BoatId) -> RepoResult<Option<Slip>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SLIP_SELECT_SQL} WHERE current_boat = ?1 LIMIT 1;"))?;

        let mut rows = stmt.query([boat_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_slip_row(row)?));
        }

        Ok(None)
    }

    fn update_slip(&self, slip: &Slip) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE slips
             SET
                number = ?1,
                current_boat = ?2,
                arrival_date = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                slip.number,
                slip.current_boat.map(|id| id.to_string()),
                slip.arrival_date.as_deref(),
                slip.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::SlipNotFound(slip.id));
        }

        Ok(())
    }

    fn delete_slip(&self, id: SlipId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM slips WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::SlipNotFound(id));
        }

        Ok(())
    }
}

fn parse_slip_row(row: &Row<'_>) -> RepoResult<Slip> {
    let id_text: String = row.get("id")?;
    let current_boat = match row.get::<_, Option<String>>("current_boat")? {
        Some(value) => Some(parse_uuid(&value, "slips.current_boat")?),
        None => None,
    };

    Ok(Slip {
        id: parse_uuid(&id_text, "slips.id")?,
        number: row.get("number")?,
        current_boat,
        arrival_date: row.get("arrival_date")?,
    })
}
