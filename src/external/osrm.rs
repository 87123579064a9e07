use async_trait::async_trait;
use std::env;

use crate::api::{Directions, DirectionsResponse};
use crate::entities::Coordinate;
use crate::error::{upstream_error, Error};

/// Directions collaborator backed by an OSRM routing endpoint.
#[derive(Debug)]
pub struct Osrm;

#[async_trait]
impl Directions for Osrm {
    #[tracing::instrument]
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DirectionsResponse, Error> {
        let api_base = env::var("OSRM_API_BASE")?;
        let url = format!(
            "https://{}/route/v1/driving/{},{};{},{}",
            api_base,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("overview", "full")])
            .query(&[("geometries", "geojson")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 500 {
            return Err(upstream_error());
        }

        // request-level errors arrive as a non-Ok body code, keep parsing 4xx
        let data: DirectionsResponse = res.json().await?;

        Ok(data)
    }
}
