pub mod coordinates;
pub mod route;

pub use coordinates::{Coordinates, LatLngLiteral};
pub use route::{RouteAlternative, RouteLeg, RouteRequest, RouteResult, TextValue, TravelMode};
