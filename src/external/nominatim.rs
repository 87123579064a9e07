use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use crate::api::Geocoder;
use crate::entities::Coordinate;
use crate::error::{invalid_input_error, upstream_error, Error};

/// Geocoding collaborator backed by a Nominatim search endpoint.
#[derive(Debug)]
pub struct Nominatim;

#[derive(Clone, Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for Nominatim {
    #[tracing::instrument]
    async fn search(&self, query: &str) -> Result<Vec<Coordinate>, Error> {
        let api_base = env::var("NOMINATIM_API_BASE")?;
        let url = format!("https://{}/search", api_base);

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("q", query)])
            .query(&[("format", "jsonv2")])
            .query(&[("limit", "5")])
            .header("User-Agent", "wayline")
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let results: Vec<SearchResult> = res.json().await?;

        // the provider reports coordinates as strings; skip unparsable rows
        let candidates = results
            .iter()
            .filter_map(|result| {
                let latitude = result.lat.parse().ok()?;
                let longitude = result.lon.parse().ok()?;
                Coordinate::new(latitude, longitude).ok()
            })
            .collect();

        Ok(candidates)
    }
}
