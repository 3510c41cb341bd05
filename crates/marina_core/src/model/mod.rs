//! Marina domain model.
//!
//! # Responsibility
//! - Define the boat and slip records and their occupancy helpers.
//! - Define the typed request schemas decoded at the API boundary.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID that is never reused.
//! - A slip references its occupant by boat id; the boat only carries the
//!   `at_sea` flag. Services keep both sides in step.

pub mod boat;
pub mod request;
pub mod slip;

use uuid::Uuid;

/// Parses an opaque path identifier.
///
/// Returns `None` for anything that is not a UUID, which callers report as
/// not-found rather than as a validation failure.
pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}
