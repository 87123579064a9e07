mod coordinate;
mod group;
mod route;
mod selection;

pub use coordinate::Coordinate;
pub use group::Group;
pub use route::{round_km, Route, RoutePlan};
pub use selection::{Camera, Mode, Selection};
