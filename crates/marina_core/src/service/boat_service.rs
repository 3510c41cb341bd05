//! Boat manager.
//!
//! # Responsibility
//! - Create, read, patch, replace and delete boats.
//! - Keep the occupying slip in step when a docked boat is replaced or
//!   deleted.
//!
//! # Invariants
//! - New boats start at sea.
//! - Patch never touches `at_sea`; replace always resets it to `true`.
//! - Deleting a boat leaves no slip pointing at it.

use crate::model::boat::Boat;
use crate::model::request::{BoatPatch, NewBoat};
use crate::repo::{BoatListQuery, MarinaStore};
use crate::service::{load_boat, MarinaResult};
use log::{info, warn};

/// Boat manager over a marina store.
pub struct BoatService<S: MarinaStore> {
    store: S,
}

impl<S: MarinaStore> BoatService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new boat at sea.
    pub fn create_boat(&self, request: NewBoat) -> MarinaResult<Boat> {
        let mut boat = Boat::new(request.name);
        boat.kind = request.kind;
        boat.length = request.length;
        boat.validate()?;

        self.store.create_boat(&boat)?;
        info!("event=boat_create module=service status=ok boat_id={}", boat.id);
        Ok(boat)
    }

    pub fn get_boat(&self, id: &str) -> MarinaResult<Boat> {
        load_boat(&self.store, id)
    }

    pub fn list_boats(&self, query: &BoatListQuery) -> MarinaResult<Vec<Boat>> {
        Ok(self.store.list_boats(query)?)
    }

    /// Applies only the fields present in `patch`.
    pub fn patch_boat(&self, id: &str, patch: BoatPatch) -> MarinaResult<Boat> {
        self.store.atomically(|store| {
            let mut boat = load_boat(store, id)?;
            if let Some(name) = patch.name {
                boat.name = name;
            }
            if let Some(kind) = patch.kind {
                boat.kind = Some(kind);
            }
            if let Some(length) = patch.length {
                boat.length = Some(length);
            }
            boat.validate()?;

            store.update_boat(&boat)?;
            info!("event=boat_patch module=service status=ok boat_id={}", boat.id);
            Ok(boat)
        })
    }

    /// Replaces every writable field and returns the boat to sea.
    ///
    /// A docked boat's slip is vacated in the same transaction.
    pub fn replace_boat(&self, id: &str, request: NewBoat) -> MarinaResult<Boat> {
        self.store.atomically(|store| {
            let mut boat = load_boat(store, id)?;
            boat.name = request.name;
            boat.kind = request.kind;
            boat.length = request.length;
            boat.validate()?;

            if boat.is_docked() {
                release_berth(store, &boat)?;
            }
            boat.put_to_sea();

            store.update_boat(&boat)?;
            info!("event=boat_replace module=service status=ok boat_id={}", boat.id);
            Ok(boat)
        })
    }

    /// Deletes a boat, first vacating any slip it occupies.
    pub fn delete_boat(&self, id: &str) -> MarinaResult<()> {
        self.store.atomically(|store| {
            let boat = load_boat(store, id)?;
            release_berth(store, &boat)?;

            store.delete_boat(boat.id)?;
            info!("event=boat_delete module=service status=ok boat_id={}", boat.id);
            Ok(())
        })
    }
}

/// Vacates the slip holding `boat`, if there is one.
fn release_berth<S: MarinaStore>(store: &S, boat: &Boat) -> MarinaResult<()> {
    match store.find_slip_by_boat(boat.id)? {
        Some(mut slip) => {
            slip.vacate();
            store.update_slip(&slip)?;
            info!(
                "event=slip_release module=service status=ok slip_id={} boat_id={}",
                slip.id, boat.id
            );
        }
        None if boat.is_docked() => {
            warn!(
                "event=slip_release module=service status=skipped boat_id={} reason=no_slip_holds_docked_boat",
                boat.id
            );
        }
        None => {}
    }
    Ok(())
}
