//! Marina use-case services.
//!
//! # Responsibility
//! - Enforce the boat/slip occupancy rules above the repository layer.
//! - Run every multi-entity change as one storage transaction.
//!
//! # Invariants
//! - A boat is docked iff exactly one slip names it as `current_boat`.
//! - A slip's `current_boat` references an existing, docked boat.
//! - Service APIs take opaque string ids; unparseable ids are not-found.

pub mod arrival_service;
pub mod boat_service;
pub mod error;
pub mod slip_service;

pub use arrival_service::ArrivalService;
pub use boat_service::BoatService;
pub use error::{ErrorKind, MarinaError, MarinaResult};
pub use slip_service::SlipService;

use crate::model::boat::{Boat, BoatId};
use crate::model::parse_id;
use crate::model::slip::{Slip, SlipId};
use crate::repo::{BoatRepository, SlipRepository};

fn resolve_boat_id(id: &str) -> MarinaResult<BoatId> {
    parse_id(id).ok_or_else(|| MarinaError::BoatNotFound(id.to_string()))
}

fn resolve_slip_id(id: &str) -> MarinaResult<SlipId> {
    parse_id(id).ok_or_else(|| MarinaError::SlipNotFound(id.to_string()))
}

fn load_boat<R: BoatRepository + ?Sized>(repo: &R, id: &str) -> MarinaResult<Boat> {
    let boat_id = resolve_boat_id(id)?;
    repo.get_boat(boat_id)?
        .ok_or_else(|| MarinaError::BoatNotFound(id.to_string()))
}

fn load_slip<R: SlipRepository + ?Sized>(repo: &R, id: &str) -> MarinaResult<Slip> {
    let slip_id = resolve_slip_id(id)?;
    repo.get_slip(slip_id)?
        .ok_or_else(|| MarinaError::SlipNotFound(id.to_string()))
}
