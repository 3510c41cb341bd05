//! Arrival/departure handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use marina_core::{ArrivalService, DockRequest, Slip};

use super::{decode, Resource};
use crate::error::ApiError;
use crate::state::SharedState;

/// PUT /slips/:id/boat
pub async fn dock(
    State(state): State<SharedState>,
    Path(slip_id): Path<String>,
    body: Bytes,
) -> Result<Json<Resource<Slip>>, ApiError> {
    let request: DockRequest = decode(&body)?;
    let slip = state
        .with_store(move |store| ArrivalService::new(store).dock(&slip_id, request))
        .await?;
    Ok(Json(slip.into()))
}

/// DELETE /slips/:id/boat
///
/// Answers 204 with an empty body.
pub async fn undock(
    State(state): State<SharedState>,
    Path(slip_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| ArrivalService::new(store).undock(&slip_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
