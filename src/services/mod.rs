// Services: SOLO carga del SDK externo

pub mod sdk_loader;

pub use sdk_loader::{load_maps_sdk, watch_auth_failure};
