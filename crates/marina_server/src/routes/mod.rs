//! Route table and shared handler helpers.

pub mod arrivals;
pub mod boats;
pub mod slips;

use axum::body::Bytes;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, put};
use axum::Router;
use log::info;
use marina_core::{Boat, Slip, ValidationError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

use crate::error::ApiError;
use crate::state::SharedState;

/// Entity body plus its canonical `self` path.
#[derive(Debug, Serialize)]
pub struct Resource<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(rename = "self")]
    pub self_link: String,
}

impl From<Boat> for Resource<Boat> {
    fn from(boat: Boat) -> Self {
        Self {
            self_link: boat.self_link(),
            entity: boat,
        }
    }
}

impl From<Slip> for Resource<Slip> {
    fn from(slip: Slip) -> Self {
        Self {
            self_link: slip.self_link(),
            entity: slip,
        }
    }
}

/// Build the marina router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        // Boats
        .route(
            "/boats",
            get(boats::list_boats)
                .post(boats::create_boat)
                .patch(id_required)
                .put(id_required)
                .delete(id_required),
        )
        .route(
            "/boats/",
            get(boats::list_boats)
                .patch(id_required)
                .put(id_required)
                .delete(id_required),
        )
        .route(
            "/boats/:id",
            get(boats::get_boat)
                .patch(boats::patch_boat)
                .put(boats::replace_boat)
                .delete(boats::delete_boat),
        )
        // Slips
        .route(
            "/slips",
            get(slips::list_slips)
                .post(slips::create_slip)
                .patch(id_required)
                .put(id_required)
                .delete(id_required),
        )
        .route(
            "/slips/",
            get(slips::list_slips)
                .patch(id_required)
                .put(id_required)
                .delete(id_required),
        )
        .route(
            "/slips/:id",
            get(slips::get_slip)
                .patch(slips::patch_slip)
                .put(slips::replace_slip)
                .delete(slips::delete_slip),
        )
        // Arrivals
        .route(
            "/slips/:id/boat",
            put(arrivals::dock).delete(arrivals::undock),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// GET /
pub async fn index() -> &'static str {
    "Marina API"
}

async fn id_required() -> ApiError {
    ApiError::MissingId
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http status=done method={} path={} http_status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

/// Decodes a JSON request body into its typed schema.
pub(crate) fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ValidationError::Malformed(err.to_string()).into())
}
