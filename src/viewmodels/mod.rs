pub mod route_viewmodel;

pub use route_viewmodel::{CalculateOutcome, RouteViewModel};
