//! Boat repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Boat::validate()` before SQL mutations.
//! - `list_boats` returns rows in creation order.

use crate::model::boat::{Boat, BoatId};
use crate::repo::{bool_to_int, parse_uuid, RepoError, RepoResult, SqliteStore};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const BOAT_SELECT_SQL: &str = "SELECT
    id,
    name,
    type,
    length,
    at_sea
FROM boats";

/// Filter options for listing boats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoatListQuery {
    /// `Some(true)` for boats at sea, `Some(false)` for docked boats.
    pub at_sea: Option<bool>,
}

/// Repository interface for boat CRUD operations.
pub trait BoatRepository {
    fn create_boat(&self, boat: &Boat) -> RepoResult<BoatId>;
    fn get_boat(&self, id: BoatId) -> RepoResult<Option<Boat>>;
    fn list_boats(&self, query: &BoatListQuery) -> RepoResult<Vec<Boat>>;
    fn update_boat(&self, boat: &Boat) -> RepoResult<()>;
    fn delete_boat(&self, id: BoatId) -> RepoResult<()>;
}

impl BoatRepository for SqliteStore<'_> {
    fn create_boat(&self, boat: &Boat) -> RepoResult<BoatId> {
        boat.validate()?;

        self.conn().execute(
            "INSERT INTO boats (id, name, type, length, at_sea)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                boat.id.to_string(),
                boat.name.as_str(),
                boat.kind.as_deref(),
                boat.length,
                bool_to_int(boat.at_sea),
            ],
        )?;

        debug!("event=boat_insert module=repo status=ok boat_id={}", boat.id);
        Ok(boat.id)
    }

    fn get_boat(&self, id: BoatId) -> RepoResult<Option<Boat>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{BOAT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_boat_row(row)?));
        }

        Ok(None)
    }

    fn list_boats(&self, query: &BoatListQuery) -> RepoResult<Vec<Boat>> {
        let mut sql = format!("{BOAT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(at_sea) = query.at_sea {
            sql.push_str(" AND at_sea = ?");
            bind_values.push(Value::Integer(bool_to_int(at_sea)));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut boats = Vec::new();

        while let Some(row) = rows.next()? {
            boats.push(parse_boat_row(row)?);
        }

        Ok(boats)
    }

    fn update_boat(&self, boat: &Boat) -> RepoResult<()> {
        boat.validate()?;

        let changed = self.conn().execute(
            "UPDATE boats
             SET
                name = ?1,
                type = ?2,
                length = ?3,
                at_sea = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                boat.name.as_str(),
                boat.kind.as_deref(),
                boat.length,
                bool_to_int(boat.at_sea),
                boat.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::BoatNotFound(boat.id));
        }

        Ok(())
    }

    fn delete_boat(&self, id: BoatId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM boats WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::BoatNotFound(id));
        }

        Ok(())
    }
}

fn parse_boat_row(row: &Row<'_>) -> RepoResult<Boat> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "boats.id")?;

    let at_sea = match row.get::<_, i64>("at_sea")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid at_sea value `{other}` in boats.at_sea"
            )));
        }
    };

    let boat = Boat {
        id,
        name: row.get("name")?,
        kind: row.get("type")?,
        length: row.get("length")?,
        at_sea,
    };
    boat.validate()?;
    Ok(boat)
}
