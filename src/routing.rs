use std::time::Duration;

use tokio::time::timeout;

use crate::api::{Directions, DirectionsResponse};
use crate::entities::{round_km, Coordinate, RoutePlan};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a drivable path and total distance for the pair.
///
/// Never fails: a provider error, an unusable response or a timeout all
/// degrade to the two-point straight-line plan, so routing can never block
/// saving a route.
#[tracing::instrument(skip(directions))]
pub async fn fetch_plan<D>(directions: &D, origin: Coordinate, destination: Coordinate) -> RoutePlan
where
    D: Directions + ?Sized,
{
    let response = match timeout(FETCH_TIMEOUT, directions.route(origin, destination)).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            tracing::warn!(code = err.code, "directions request failed, falling back to straight line");
            return RoutePlan::fallback(origin, destination);
        }
        Err(_) => {
            tracing::warn!("directions request timed out, falling back to straight line");
            return RoutePlan::fallback(origin, destination);
        }
    };

    match plan_from_response(response, origin, destination) {
        Some(plan) => plan,
        None => {
            tracing::warn!("unusable directions response, falling back to straight line");
            RoutePlan::fallback(origin, destination)
        }
    }
}

fn plan_from_response(
    response: DirectionsResponse,
    origin: Coordinate,
    destination: Coordinate,
) -> Option<RoutePlan> {
    if response.code != "Ok" {
        return None;
    }

    let route = response.routes.into_iter().next()?;
    let coordinates = route.geometry?.coordinates;
    if coordinates.is_empty() {
        return None;
    }

    let path = coordinates
        .iter()
        .map(|&[longitude, latitude]| Coordinate {
            latitude,
            longitude,
        })
        .collect();

    let distance_km = match route.distance {
        Some(meters) => round_km(meters / 1000.0),
        None => round_km(origin.haversine_km(&destination)),
    };
    let duration_min = route.duration.map(|seconds| (seconds / 60.0).round());

    Some(RoutePlan {
        path,
        distance_km,
        duration_min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tokio_test::block_on;

    use crate::api::{DirectionsRoute, Geometry};
    use crate::error::{upstream_error, Error};

    struct Failing;

    #[async_trait]
    impl Directions for Failing {
        async fn route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
        ) -> Result<DirectionsResponse, Error> {
            Err(upstream_error())
        }
    }

    struct Fixed(DirectionsResponse);

    #[async_trait]
    impl Directions for Fixed {
        async fn route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
        ) -> Result<DirectionsResponse, Error> {
            Ok(self.0.clone())
        }
    }

    fn eiffel() -> Coordinate {
        Coordinate::new(48.8584, 2.2945).unwrap()
    }

    fn louvre() -> Coordinate {
        Coordinate::new(48.8606, 2.3376).unwrap()
    }

    fn paris_response() -> DirectionsResponse {
        DirectionsResponse {
            code: "Ok".into(),
            routes: vec![DirectionsRoute {
                geometry: Some(Geometry {
                    coordinates: vec![
                        [2.2945, 48.8584],
                        [2.3100, 48.8590],
                        [2.3376, 48.8606],
                    ],
                }),
                distance: Some(4230.0),
                duration: Some(540.0),
            }],
        }
    }

    #[test]
    fn provider_failure_degrades_to_straight_line() {
        let plan = block_on(fetch_plan(&Failing, eiffel(), louvre()));

        assert_eq!(plan.path, vec![eiffel(), louvre()]);
        assert_eq!(plan.distance_km, 3.2);
        assert!(plan.duration_min.is_none());
    }

    #[test]
    fn non_ok_code_degrades_to_straight_line() {
        let response = DirectionsResponse {
            code: "NoRoute".into(),
            routes: vec![],
        };

        let plan = block_on(fetch_plan(&Fixed(response), eiffel(), louvre()));

        assert_eq!(plan.path, vec![eiffel(), louvre()]);
        assert_eq!(plan.distance_km, 3.2);
    }

    #[test]
    fn empty_route_list_degrades_to_straight_line() {
        let response = DirectionsResponse {
            code: "Ok".into(),
            routes: vec![],
        };

        let plan = block_on(fetch_plan(&Fixed(response), eiffel(), louvre()));

        assert_eq!(plan.path, vec![eiffel(), louvre()]);
    }

    #[test]
    fn missing_geometry_degrades_to_straight_line() {
        let response = DirectionsResponse {
            code: "Ok".into(),
            routes: vec![DirectionsRoute {
                geometry: None,
                distance: Some(4230.0),
                duration: None,
            }],
        };

        let plan = block_on(fetch_plan(&Fixed(response), eiffel(), louvre()));

        assert_eq!(plan.path, vec![eiffel(), louvre()]);
    }

    #[test]
    fn provider_pairs_are_reordered_and_scaled() {
        let plan = block_on(fetch_plan(&Fixed(paris_response()), eiffel(), louvre()));

        assert_eq!(plan.path.len(), 3);
        assert_eq!(plan.path[0], eiffel());
        assert_eq!(plan.path[2], louvre());
        assert_eq!(plan.distance_km, 4.2);
        assert_eq!(plan.duration_min, Some(9.0));
    }

    #[test]
    fn missing_distance_keeps_the_path_with_a_straight_line_estimate() {
        let mut response = paris_response();
        response.routes[0].distance = None;

        let plan = block_on(fetch_plan(&Fixed(response), eiffel(), louvre()));

        assert_eq!(plan.path.len(), 3);
        assert_eq!(plan.distance_km, 3.2);
    }

    #[test]
    fn zero_distance_only_when_endpoints_coincide() {
        let plan = block_on(fetch_plan(&Failing, eiffel(), eiffel()));
        assert_eq!(plan.distance_km, 0.0);
        assert_eq!(plan.path.len(), 2);

        let plan = block_on(fetch_plan(&Failing, eiffel(), louvre()));
        assert!(plan.distance_km > 0.0);
    }
}
