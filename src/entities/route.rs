use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinate;
use crate::error::{validation_error, Error};

/// A path and total distance for a chosen pair of endpoints, either fetched
/// from the directions provider or degraded to the straight line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub path: Vec<Coordinate>,
    pub distance_km: f64,
    pub duration_min: Option<f64>,
}

impl RoutePlan {
    /// The two-point straight-line plan. Duration is unknowable here.
    pub fn fallback(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            path: vec![origin, destination],
            distance_km: round_km(origin.haversine_km(&destination)),
            duration_min: None,
        }
    }
}

pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub distance_km: f64,
    pub unit: String,
    pub duration_min: Option<f64>,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub coordinates: Vec<Coordinate>,
    pub created_at: DateTime<Utc>,
}

impl Route {
    /// Validates a save request and assembles the immutable record. The
    /// record is never mutated afterwards; correcting a route means deleting
    /// and recreating it through the owning group's list.
    pub fn new(
        name: &str,
        origin: Option<Coordinate>,
        destination: Option<Coordinate>,
        plan: Option<RoutePlan>,
    ) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(validation_error("please enter a route name"));
        }

        let (origin, destination) = match (origin, destination) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => {
                return Err(validation_error(
                    "please select both origin and destination points",
                ))
            }
        };

        // saving must never wait on routing; substitute the straight line
        let plan = plan.unwrap_or_else(|| RoutePlan::fallback(origin, destination));

        let mut coordinates = if plan.path.len() >= 2 {
            plan.path
        } else {
            vec![origin, destination]
        };

        // pin the path to the chosen endpoints; provider geometry is snapped
        // to the road network and may start or end slightly off them
        if coordinates.first() != Some(&origin) {
            coordinates.insert(0, origin);
        }
        if coordinates.last() != Some(&destination) {
            coordinates.push(destination);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            distance_km: plan.distance_km,
            unit: "km".into(),
            duration_min: plan.duration_min,
            origin,
            destination,
            coordinates,
            created_at: Utc::now(),
        })
    }
}
