use axum::extract::{Extension, Json, Path};
use axum_macros::debug_handler;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::Route;
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct CreateRouteParams {
    name: String,
    selection_token: Uuid,
}

#[debug_handler]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Path(group_id): Path<Uuid>,
    Json(params): Json<CreateRouteParams>,
) -> Result<Json<Route>, Error> {
    let route = api
        .create_route(group_id, params.name, params.selection_token)
        .await?;

    Ok(route.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path((group_id, route_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Route>, Error> {
    let route = api.find_route(group_id, route_id).await?;

    Ok(route.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<Route>>, Error> {
    let routes = api.list_routes(group_id).await?;

    Ok(routes.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path((group_id, route_id)): Path<(Uuid, Uuid)>,
) -> Result<(), Error> {
    api.delete_route(group_id, route_id).await
}
