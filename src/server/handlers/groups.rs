use axum::extract::{Extension, Json, Path};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::Group;
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct CreateGroupParams {
    name: String,
    start_time: String,
    end_time: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateGroupParams>,
) -> Result<Json<Group>, Error> {
    let group = api
        .create_group(params.name, params.start_time, params.end_time)
        .await?;

    Ok(group.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Group>, Error> {
    let group = api.find_group(id).await?;

    Ok(group.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Group>>, Error> {
    let groups = api.list_groups().await?;

    Ok(groups.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<(), Error> {
    api.delete_group(id).await
}
