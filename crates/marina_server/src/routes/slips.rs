//! Slip handlers.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use marina_core::{NewSlip, Slip, SlipListQuery, SlipPatch, SlipService};
use serde::Deserialize;

use super::{decode, Resource};
use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct SlipListParams {
    pub occupied: Option<bool>,
}

/// POST /slips
pub async fn create_slip(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Resource<Slip>>), ApiError> {
    let request: NewSlip = decode(&body)?;
    let slip = state
        .with_store(move |store| SlipService::new(store).create_slip(request))
        .await?;
    Ok((StatusCode::CREATED, Json(slip.into())))
}

/// GET /slips
pub async fn list_slips(
    State(state): State<SharedState>,
    params: Result<Query<SlipListParams>, QueryRejection>,
) -> Result<Json<Vec<Resource<Slip>>>, ApiError> {
    let Query(params) = params?;
    let query = SlipListQuery {
        occupied: params.occupied,
    };
    let slips = state
        .with_store(move |store| SlipService::new(store).list_slips(&query))
        .await?;
    Ok(Json(slips.into_iter().map(Resource::from).collect()))
}

/// GET /slips/:id
pub async fn get_slip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Resource<Slip>>, ApiError> {
    let slip = state
        .with_store(move |store| SlipService::new(store).get_slip(&id))
        .await?;
    Ok(Json(slip.into()))
}

/// PATCH /slips/:id
pub async fn patch_slip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Resource<Slip>>, ApiError> {
    let patch: SlipPatch = decode(&body)?;
    let slip = state
        .with_store(move |store| SlipService::new(store).patch_slip(&id, patch))
        .await?;
    Ok(Json(slip.into()))
}

/// PUT /slips/:id
pub async fn replace_slip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Resource<Slip>>, ApiError> {
    let request: NewSlip = decode(&body)?;
    let slip = state
        .with_store(move |store| SlipService::new(store).replace_slip(&id, request))
        .await?;
    Ok(Json(slip.into()))
}

/// DELETE /slips/:id
pub async fn delete_slip(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| SlipService::new(store).delete_slip(&id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
