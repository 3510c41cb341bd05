//! HTTP surface for the marina API.
//!
//! Maps routes onto `marina_core` services and service errors onto status
//! codes. Holds no business rules of its own.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, SharedState};
