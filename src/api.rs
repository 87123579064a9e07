use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Coordinate, Group, Route, Selection};
use crate::error::Error;

/// Wire shape of the directions collaborator's answer. Provider coordinate
/// pairs arrive as `[longitude, latitude]`.
#[derive(Clone, Debug, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DirectionsRoute {
    pub geometry: Option<Geometry>,
    /// Meters.
    pub distance: Option<f64>,
    /// Seconds.
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}

#[async_trait]
pub trait Geocoder {
    async fn search(&self, query: &str) -> Result<Vec<Coordinate>, Error>;
}

#[async_trait]
pub trait Directions {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DirectionsResponse, Error>;
}

#[async_trait]
pub trait Locator {
    async fn request_permission(&self) -> Result<bool, Error>;
    async fn current_position(&self) -> Result<Coordinate, Error>;
}

pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type DynDirections = Arc<dyn Directions + Send + Sync>;
pub type DynLocator = Arc<dyn Locator + Send + Sync>;

#[async_trait]
pub trait SelectionAPI {
    async fn create_selection(&self) -> Result<Selection, Error>;
    async fn find_selection(&self, token: Uuid) -> Result<Selection, Error>;
    async fn set_origin(&self, token: Uuid, coordinate: Coordinate) -> Result<Selection, Error>;
    async fn set_destination(
        &self,
        token: Uuid,
        coordinate: Coordinate,
    ) -> Result<Selection, Error>;
    async fn search_origin(&self, token: Uuid, query: String) -> Result<Selection, Error>;
    async fn search_destination(&self, token: Uuid, query: String) -> Result<Selection, Error>;
    async fn use_current_location(&self, token: Uuid) -> Result<Selection, Error>;
    async fn reset_selection(&self, token: Uuid) -> Result<Selection, Error>;
    async fn discard_selection(&self, token: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn create_route(
        &self,
        group_id: Uuid,
        name: String,
        selection_token: Uuid,
    ) -> Result<Route, Error>;
    async fn find_route(&self, group_id: Uuid, id: Uuid) -> Result<Route, Error>;
    async fn list_routes(&self, group_id: Uuid) -> Result<Vec<Route>, Error>;
    async fn delete_route(&self, group_id: Uuid, id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait GroupAPI {
    async fn create_group(
        &self,
        name: String,
        start_time: String,
        end_time: String,
    ) -> Result<Group, Error>;
    async fn find_group(&self, id: Uuid) -> Result<Group, Error>;
    async fn list_groups(&self) -> Result<Vec<Group>, Error>;
    async fn delete_group(&self, id: Uuid) -> Result<(), Error>;
}

pub trait API: SelectionAPI + RouteAPI + GroupAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
