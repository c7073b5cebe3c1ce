// Módulo de mapas: interfaz común + implementación web (Google Maps JS)

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod traits;

pub use traits::{MapError, MapProvider, MapView};

#[cfg(target_arch = "wasm32")]
pub use web::GoogleMapsProvider;
