//! Slip domain model.
//!
//! A slip is `VACANT` while `current_boat` is `None` and `OCCUPIED`
//! otherwise. Only [`Slip::occupy`] and [`Slip::vacate`] move between the two.

use crate::model::boat::BoatId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a slip.
pub type SlipId = Uuid;

/// A docking slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slip {
    pub id: SlipId,
    pub number: i64,
    pub current_boat: Option<BoatId>,
    /// Set together with `current_boat` by convention; free text.
    pub arrival_date: Option<String>,
}

impl Slip {
    /// Creates a vacant slip with a freshly generated id.
    pub fn new(number: i64) -> Self {
        Self::with_id(Uuid::new_v4(), number)
    }

    pub fn with_id(id: SlipId, number: i64) -> Self {
        Self {
            id,
            number,
            current_boat: None,
            arrival_date: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.current_boat.is_some()
    }

    pub fn occupy(&mut self, boat_id: BoatId, arrival_date: impl Into<String>) {
        self.current_boat = Some(boat_id);
        self.arrival_date = Some(arrival_date.into());
    }

    /// Clears occupancy and returns the boat that was moored here, if any.
    pub fn vacate(&mut self) -> Option<BoatId> {
        self.arrival_date = None;
        self.current_boat.take()
    }

    /// Canonical relative path of this slip resource.
    pub fn self_link(&self) -> String {
        format!("/slips/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::Slip;
    use uuid::Uuid;

    #[test]
    fn occupy_then_vacate_returns_to_vacant() {
        let mut slip = Slip::new(4);
        assert!(!slip.is_occupied());

        let boat_id = Uuid::new_v4();
        slip.occupy(boat_id, "2024-05-01");
        assert!(slip.is_occupied());
        assert_eq!(slip.arrival_date.as_deref(), Some("2024-05-01"));

        assert_eq!(slip.vacate(), Some(boat_id));
        assert!(!slip.is_occupied());
        assert!(slip.arrival_date.is_none());
        assert_eq!(slip.vacate(), None);
    }
}
