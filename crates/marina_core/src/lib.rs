//! Core domain logic for the marina API.
//! This crate is the single source of truth for boat/slip occupancy rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::boat::{Boat, BoatId, BoatValidationError};
pub use model::request::{
    BoatPatch, DockField, DockRequest, NewBoat, NewSlip, SlipPatch, ValidationError,
};
pub use model::slip::{Slip, SlipId};
pub use repo::{
    BoatListQuery, BoatRepository, MarinaStore, RepoError, RepoResult, SlipListQuery,
    SlipRepository, SqliteStore, Transactional,
};
pub use service::{
    ArrivalService, BoatService, ErrorKind, MarinaError, MarinaResult, SlipService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
