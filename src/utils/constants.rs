/// Raíz donde se monta la aplicación
pub const APP_ROOT_ID: &str = "app";

/// Contenedor del mapa (pantalla completa)
pub const MAP_CONTAINER_ID: &str = "map";

// IDs de los elementos del panel de control
pub const ORIGIN_INPUT_ID: &str = "route-origin";
pub const DESTINATION_INPUT_ID: &str = "route-destination";
pub const CALCULATE_BUTTON_ID: &str = "route-calculate";
pub const CLEAR_BUTTON_ID: &str = "route-clear";
pub const RECENTER_BUTTON_ID: &str = "route-recenter";
pub const DISTANCE_TEXT_ID: &str = "route-distance";
pub const DURATION_TEXT_ID: &str = "route-duration";
pub const ERROR_TEXT_ID: &str = "route-error";
