use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::env;

use crate::api::Locator;
use crate::entities::Coordinate;
use crate::error::{invalid_input_error, permission_denied_error, upstream_error, Error};

/// Location collaborator backed by a Google geolocation endpoint.
#[derive(Debug)]
pub struct GoogleGeolocation;

#[derive(Clone, Debug, Deserialize)]
struct GeolocateResponse {
    location: LatLng,
}

#[derive(Clone, Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl Locator for GoogleGeolocation {
    #[tracing::instrument]
    async fn request_permission(&self) -> Result<bool, Error> {
        Ok(env::var("GOOGLE_MAPS_API_KEY").is_ok())
    }

    #[tracing::instrument]
    async fn current_position(&self) -> Result<Coordinate, Error> {
        let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
        let key = env::var("GOOGLE_MAPS_API_KEY")?;
        let url = format!("https://{}/geolocation/v1/geolocate", api_base);

        let res = reqwest::Client::new()
            .post(url)
            .query(&[("key", key)])
            .json(&json!({ "considerIp": true }))
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code == 403 {
            return Err(permission_denied_error());
        } else if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: GeolocateResponse = res.json().await?;

        Coordinate::new(data.location.lat, data.location.lng)
    }
}
