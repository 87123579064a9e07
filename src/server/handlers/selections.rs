use axum::extract::{Extension, Json, Path};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{Coordinate, Selection};
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct PointParams {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: String,
}

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<Selection>, Error> {
    let selection = api.create_selection().await?;

    Ok(selection.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<Json<Selection>, Error> {
    let selection = api.find_selection(token).await?;

    Ok(selection.into())
}

pub async fn set_origin(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
    Json(params): Json<PointParams>,
) -> Result<Json<Selection>, Error> {
    let coordinate = Coordinate::new(params.latitude, params.longitude)?;
    let selection = api.set_origin(token, coordinate).await?;

    Ok(selection.into())
}

pub async fn set_destination(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
    Json(params): Json<PointParams>,
) -> Result<Json<Selection>, Error> {
    let coordinate = Coordinate::new(params.latitude, params.longitude)?;
    let selection = api.set_destination(token, coordinate).await?;

    Ok(selection.into())
}

pub async fn search_origin(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
    Json(params): Json<SearchParams>,
) -> Result<Json<Selection>, Error> {
    let selection = api.search_origin(token, params.query).await?;

    Ok(selection.into())
}

pub async fn search_destination(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
    Json(params): Json<SearchParams>,
) -> Result<Json<Selection>, Error> {
    let selection = api.search_destination(token, params.query).await?;

    Ok(selection.into())
}

pub async fn use_current_location(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<Json<Selection>, Error> {
    let selection = api.use_current_location(token).await?;

    Ok(selection.into())
}

pub async fn reset(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<Json<Selection>, Error> {
    let selection = api.reset_selection(token).await?;

    Ok(selection.into())
}

pub async fn discard(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<(), Error> {
    api.discard_selection(token).await
}
