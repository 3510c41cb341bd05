//! Arrival/departure manager.
//!
//! # Responsibility
//! - Moor a boat in a vacant slip and release it again.
//!
//! # Invariants
//! - `VACANT --dock--> OCCUPIED --undock--> VACANT`; no other transition.
//! - A slip holds at most one boat and a boat occupies at most one slip.
//! - Slip and boat are written in one transaction, so both change or
//!   neither does.

use crate::model::request::{DockField, DockRequest};
use crate::model::slip::Slip;
use crate::repo::MarinaStore;
use crate::service::{load_boat, load_slip, MarinaError, MarinaResult};
use log::info;

/// Arrival/departure manager over a marina store.
pub struct ArrivalService<S: MarinaStore> {
    store: S,
}

impl<S: MarinaStore> ArrivalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Docks `request.boat` in slip `slip_id` as of `request.date`.
    ///
    /// Checks run in a fixed order: slip exists, slip is vacant, `boat` and
    /// `date` are present strings, boat exists, boat is at sea.
    pub fn dock(&self, slip_id: &str, request: DockRequest) -> MarinaResult<Slip> {
        self.store.atomically(|store| {
            let mut slip = load_slip(store, slip_id)?;
            if slip.is_occupied() {
                return Err(MarinaError::SlipOccupied(slip.id));
            }

            let boat_id = DockField::require(request.boat, "boat")?;
            let date = DockField::require(request.date, "date")?;

            let mut boat = load_boat(store, &boat_id)?;
            if boat.is_docked() {
                return Err(MarinaError::BoatAlreadyDocked(boat.id));
            }

            slip.occupy(boat.id, date);
            boat.moor();
            store.update_slip(&slip)?;
            store.update_boat(&boat)?;

            info!(
                "event=boat_dock module=service status=ok slip_id={} boat_id={}",
                slip.id, boat.id
            );
            Ok(slip)
        })
    }

    /// Releases the boat in slip `slip_id` back to sea.
    pub fn undock(&self, slip_id: &str) -> MarinaResult<Slip> {
        self.store.atomically(|store| {
            let mut slip = load_slip(store, slip_id)?;
            let Some(boat_id) = slip.current_boat else {
                return Err(MarinaError::SlipVacant(slip.id));
            };

            let mut boat = store
                .get_boat(boat_id)?
                .ok_or_else(|| MarinaError::BoatNotFound(boat_id.to_string()))?;

            boat.put_to_sea();
            store.update_boat(&boat)?;
            slip.vacate();
            store.update_slip(&slip)?;

            info!(
                "event=boat_undock module=service status=ok slip_id={} boat_id={}",
                slip.id, boat.id
            );
            Ok(slip)
        })
    }
}
