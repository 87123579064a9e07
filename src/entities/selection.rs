use serde::Serialize;
use uuid::Uuid;

use crate::entities::{Coordinate, RoutePlan};

/// Map center used before any position is known (New York).
const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 40.7128,
    longitude: -74.0060,
};

const WIDE_SPAN: f64 = 0.0922;
const FOCUS_SPAN: f64 = 0.05;

/// One route-picking session. Lives in memory for the duration of the
/// selection screen and is discarded without trace unless a route is saved.
#[derive(Clone, Debug, Serialize)]
pub struct Selection {
    pub token: Uuid,
    pub mode: Mode,
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    pub plan: Option<RoutePlan>,
    pub user_location: Option<Coordinate>,
    pub camera: Camera,
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    AwaitingOrigin,
    AwaitingDestination,
}

/// The single mutable camera resource; only selection transitions write it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Camera {
    Center { coordinate: Coordinate, span: f64 },
    Fit { coordinates: Vec<Coordinate> },
}

impl Selection {
    pub fn new(user_location: Option<Coordinate>) -> Self {
        Self {
            token: Uuid::new_v4(),
            mode: Mode::AwaitingOrigin,
            origin: None,
            destination: None,
            plan: None,
            camera: Camera::Center {
                coordinate: user_location.unwrap_or(DEFAULT_CENTER),
                span: WIDE_SPAN,
            },
            user_location,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_origin(&mut self, coordinate: Coordinate) {
        self.origin = Some(coordinate);
        if self.mode == Mode::AwaitingOrigin {
            self.mode = Mode::AwaitingDestination;
        }
        self.endpoint_changed(coordinate);
    }

    /// Setting the destination never changes the mode, so either endpoint
    /// stays re-pickable afterwards.
    pub fn set_destination(&mut self, coordinate: Coordinate) {
        self.destination = Some(coordinate);
        self.endpoint_changed(coordinate);
    }

    /// Assigns to whichever endpoint the current mode selects.
    pub fn choose(&mut self, coordinate: Coordinate) {
        match self.mode {
            Mode::AwaitingOrigin => self.set_origin(coordinate),
            Mode::AwaitingDestination => self.set_destination(coordinate),
        }
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.destination = None;
        self.plan = None;
        self.mode = Mode::AwaitingOrigin;
        self.generation += 1;
        self.camera = Camera::Center {
            coordinate: self.user_location.unwrap_or(DEFAULT_CENTER),
            span: WIDE_SPAN,
        };
    }

    /// Both endpoints chosen; the pair a fetch should run for.
    pub fn chosen_pair(&self) -> Option<(Coordinate, Coordinate)> {
        match (self.origin, self.destination) {
            (Some(origin), Some(destination)) => Some((origin, destination)),
            _ => None,
        }
    }

    /// Applies a fetched plan if `generation` still matches, i.e. no endpoint
    /// changed while the fetch was in flight. Returns false when the plan is
    /// stale and was discarded.
    pub fn apply_plan(&mut self, generation: u64, plan: RoutePlan) -> bool {
        if generation != self.generation {
            return false;
        }

        if plan.path.len() > 1 {
            self.camera = Camera::Fit {
                coordinates: plan.path.clone(),
            };
        }
        self.plan = Some(plan);

        true
    }

    fn endpoint_changed(&mut self, coordinate: Coordinate) {
        self.generation += 1;
        self.plan = None;

        if self.chosen_pair().is_none() {
            self.camera = Camera::Center {
                coordinate,
                span: FOCUS_SPAN,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    #[test]
    fn selecting_endpoints_walks_the_expected_modes() {
        let mut selection = Selection::new(None);
        assert_eq!(selection.mode, Mode::AwaitingOrigin);

        selection.set_origin(coordinate(48.8584, 2.2945));
        assert_eq!(selection.mode, Mode::AwaitingDestination);

        selection.set_destination(coordinate(48.8606, 2.3376));
        assert_eq!(selection.mode, Mode::AwaitingDestination);

        selection.reset();
        assert_eq!(selection.mode, Mode::AwaitingOrigin);
        assert!(selection.origin.is_none());
        assert!(selection.destination.is_none());
        assert!(selection.plan.is_none());
    }

    #[test]
    fn re_picking_an_endpoint_clears_the_plan_but_keeps_the_other() {
        let origin = coordinate(48.8584, 2.2945);
        let destination = coordinate(48.8606, 2.3376);

        let mut selection = Selection::new(None);
        selection.set_origin(origin);
        selection.set_destination(destination);

        let generation = selection.generation();
        assert!(selection.apply_plan(generation, RoutePlan::fallback(origin, destination)));

        let moved = coordinate(48.8529, 2.3500);
        selection.set_origin(moved);

        assert_eq!(selection.mode, Mode::AwaitingDestination);
        assert_eq!(selection.origin, Some(moved));
        assert_eq!(selection.destination, Some(destination));
        assert!(selection.plan.is_none());
    }

    #[test]
    fn stale_plans_are_discarded() {
        let a = coordinate(0.0, 0.0);
        let b = coordinate(1.0, 1.0);
        let c = coordinate(2.0, 2.0);

        let mut selection = Selection::new(None);
        selection.set_origin(a);
        selection.set_destination(b);
        let stale = selection.generation();

        // the user moves the destination while the (a, b) fetch is in flight
        selection.set_destination(c);

        assert!(!selection.apply_plan(stale, RoutePlan::fallback(a, b)));
        assert!(selection.plan.is_none());

        let current = selection.generation();
        assert!(selection.apply_plan(current, RoutePlan::fallback(a, c)));
        assert_eq!(selection.plan.as_ref().unwrap().path, vec![a, c]);
    }

    #[test]
    fn current_location_fills_the_endpoint_the_mode_selects() {
        let here = coordinate(40.7128, -74.0060);
        let there = coordinate(40.7306, -73.9866);

        let mut selection = Selection::new(Some(here));
        selection.choose(here);
        assert_eq!(selection.origin, Some(here));
        assert_eq!(selection.mode, Mode::AwaitingDestination);

        selection.choose(there);
        assert_eq!(selection.destination, Some(there));
    }

    #[test]
    fn camera_follows_the_session() {
        let origin = coordinate(48.8584, 2.2945);
        let destination = coordinate(48.8606, 2.3376);

        let mut selection = Selection::new(None);
        assert!(matches!(selection.camera, Camera::Center { .. }));

        selection.set_origin(origin);
        assert_eq!(
            selection.camera,
            Camera::Center {
                coordinate: origin,
                span: FOCUS_SPAN
            }
        );

        selection.set_destination(destination);
        let generation = selection.generation();
        selection.apply_plan(generation, RoutePlan::fallback(origin, destination));
        assert_eq!(
            selection.camera,
            Camera::Fit {
                coordinates: vec![origin, destination]
            }
        );
    }
}
