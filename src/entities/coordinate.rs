use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid_input_error());
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_of_identical_points_is_zero() {
        let p = Coordinate::new(48.8584, 2.2945).unwrap();

        assert_eq!(p.haversine_km(&p), 0.0);
    }

    #[test]
    fn haversine_between_paris_landmarks() {
        let eiffel = Coordinate::new(48.8584, 2.2945).unwrap();
        let louvre = Coordinate::new(48.8606, 2.3376).unwrap();

        let km = eiffel.haversine_km(&louvre);

        assert!((km - 3.16).abs() < 0.05, "unexpected distance: {}", km);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(-90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(90.0, -180.0).is_ok());
    }
}
