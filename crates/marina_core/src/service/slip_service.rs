//! Slip manager.
//!
//! # Responsibility
//! - Create, read, patch, replace and delete slips.
//! - Return the occupying boat to sea when a slip is replaced or deleted.
//!
//! # Invariants
//! - New slips are vacant.
//! - Patch cannot change occupancy; replace always vacates.
//! - A missing occupant never blocks replace or delete.

use crate::model::request::{NewSlip, SlipPatch};
use crate::model::slip::Slip;
use crate::repo::{MarinaStore, SlipListQuery};
use crate::service::{load_slip, MarinaResult};
use log::{info, warn};

/// Slip manager over a marina store.
pub struct SlipService<S: MarinaStore> {
    store: S,
}

impl<S: MarinaStore> SlipService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a vacant slip.
    pub fn create_slip(&self, request: NewSlip) -> MarinaResult<Slip> {
        let slip = Slip::new(request.number);
        self.store.create_slip(&slip)?;
        info!("event=slip_create module=service status=ok slip_id={}", slip.id);
        Ok(slip)
    }

    pub fn get_slip(&self, id: &str) -> MarinaResult<Slip> {
        load_slip(&self.store, id)
    }

    pub fn list_slips(&self, query: &SlipListQuery) -> MarinaResult<Vec<Slip>> {
        Ok(self.store.list_slips(query)?)
    }

    /// Applies `number` and/or `arrival_date` when provided.
    pub fn patch_slip(&self, id: &str, patch: SlipPatch) -> MarinaResult<Slip> {
        self.store.atomically(|store| {
            let mut slip = load_slip(store, id)?;
            if let Some(number) = patch.number {
                slip.number = number;
            }
            if let Some(arrival_date) = patch.arrival_date {
                slip.arrival_date = Some(arrival_date);
            }

            store.update_slip(&slip)?;
            info!("event=slip_patch module=service status=ok slip_id={}", slip.id);
            Ok(slip)
        })
    }

    /// Replaces the slip number and forces the slip vacant.
    pub fn replace_slip(&self, id: &str, request: NewSlip) -> MarinaResult<Slip> {
        self.store.atomically(|store| {
            let mut slip = load_slip(store, id)?;
            evict_occupant(store, &mut slip)?;
            slip.number = request.number;

            store.update_slip(&slip)?;
            info!("event=slip_replace module=service status=ok slip_id={}", slip.id);
            Ok(slip)
        })
    }

    /// Deletes a slip, first returning its boat to sea.
    pub fn delete_slip(&self, id: &str) -> MarinaResult<()> {
        self.store.atomically(|store| {
            let mut slip = load_slip(store, id)?;
            evict_occupant(store, &mut slip)?;

            store.delete_slip(slip.id)?;
            info!("event=slip_delete module=service status=ok slip_id={}", slip.id);
            Ok(())
        })
    }
}

/// Vacates `slip` in memory and puts its boat back to sea in storage.
fn evict_occupant<S: MarinaStore>(store: &S, slip: &mut Slip) -> MarinaResult<()> {
    let Some(boat_id) = slip.vacate() else {
        return Ok(());
    };

    match store.get_boat(boat_id)? {
        Some(mut boat) => {
            boat.put_to_sea();
            store.update_boat(&boat)?;
            info!(
                "event=boat_evict module=service status=ok slip_id={} boat_id={}",
                slip.id, boat_id
            );
        }
        None => {
            warn!(
                "event=boat_evict module=service status=skipped slip_id={} boat_id={} reason=occupant_missing",
                slip.id, boat_id
            );
        }
    }
    Ok(())
}
