//! Boat handlers.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use marina_core::{Boat, BoatListQuery, BoatPatch, BoatService, NewBoat};
use serde::Deserialize;

use super::{decode, Resource};
use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct BoatListParams {
    pub at_sea: Option<bool>,
}

/// POST /boats
pub async fn create_boat(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Resource<Boat>>), ApiError> {
    let request: NewBoat = decode(&body)?;
    let boat = state
        .with_store(move |store| BoatService::new(store).create_boat(request))
        .await?;
    Ok((StatusCode::CREATED, Json(boat.into())))
}

/// GET /boats
pub async fn list_boats(
    State(state): State<SharedState>,
    params: Result<Query<BoatListParams>, QueryRejection>,
) -> Result<Json<Vec<Resource<Boat>>>, ApiError> {
    let Query(params) = params?;
    let query = BoatListQuery {
        at_sea: params.at_sea,
    };
    let boats = state
        .with_store(move |store| BoatService::new(store).list_boats(&query))
        .await?;
    Ok(Json(boats.into_iter().map(Resource::from).collect()))
}

/// GET /boats/:id
pub async fn get_boat(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Resource<Boat>>, ApiError> {
    let boat = state
        .with_store(move |store| BoatService::new(store).get_boat(&id))
        .await?;
    Ok(Json(boat.into()))
}

/// PATCH /boats/:id
pub async fn patch_boat(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Resource<Boat>>, ApiError> {
    let patch: BoatPatch = decode(&body)?;
    let boat = state
        .with_store(move |store| BoatService::new(store).patch_boat(&id, patch))
        .await?;
    Ok(Json(boat.into()))
}

/// PUT /boats/:id
pub async fn replace_boat(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Resource<Boat>>, ApiError> {
    let request: NewBoat = decode(&body)?;
    let boat = state
        .with_store(move |store| BoatService::new(store).replace_boat(&id, request))
        .await?;
    Ok(Json(boat.into()))
}

/// DELETE /boats/:id
pub async fn delete_boat(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| BoatService::new(store).delete_boat(&id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
