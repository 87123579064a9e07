use crate::api::Geocoder;
use crate::entities::Coordinate;
use crate::error::{invalid_input_error, place_not_found_error, Error};

/// Resolves a free-text place query to a single coordinate.
///
/// Blank queries are rejected before the provider is consulted. Ambiguity is
/// resolved by taking the provider's first candidate.
#[tracing::instrument(skip(geocoder))]
pub async fn resolve<G>(geocoder: &G, query: &str) -> Result<Coordinate, Error>
where
    G: Geocoder + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(invalid_input_error());
    }

    let candidates = geocoder.search(query).await?;

    // first match wins
    candidates
        .into_iter()
        .next()
        .ok_or_else(place_not_found_error)
}
