use thiserror::Error;

use crate::config::SdkConfig;
use crate::models::{Coordinates, RouteRequest, RouteResult};

/// Capacidades del proveedor de mapas que usa la vista de búsqueda.
///
/// El proveedor es dueño del handle del mapa, del overlay de ruta y de los
/// widgets de autocompletado. Todo se ejecuta en el hilo del event loop.
#[allow(async_fn_in_trait)]
pub trait MapProvider {
    /// Objeto opaco de direcciones que se dibuja como overlay
    type Directions: Clone + 'static;

    /// Cargar el SDK (una sola vez)
    async fn initialize(&self, sdk: &SdkConfig) -> Result<(), MapError>;

    /// Registrar el aviso de clave rechazada. Puede llegar después de
    /// `initialize`, cuando el mapa ya se ha creado.
    fn on_auth_failure(&self, handler: Box<dyn Fn(MapError)>) -> Result<(), MapError>;

    /// Crear el mapa dentro del contenedor con la vista indicada.
    /// Si el contenedor es un nodo nuevo (re-render completo), el mapa, el
    /// marcador, el overlay y los autocompletados anteriores se descartan.
    fn render_map(&self, container_id: &str, view: &MapView) -> Result<(), MapError>;

    /// Pedir una ruta al servicio remoto
    async fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> Result<RouteResult<Self::Directions>, MapError>;

    /// Dibujar (`Some`) o quitar (`None`) el overlay de ruta
    fn show_route(&self, directions: Option<&Self::Directions>) -> Result<(), MapError>;

    /// Desplazar la vista hasta una coordenada
    fn pan_to(&self, center: Coordinates) -> Result<(), MapError>;

    /// Activar autocompletado de lugares en un input.
    /// `on_change` recibe el texto final cuando el usuario elige una sugerencia.
    fn attach_autocomplete(
        &self,
        input_id: &str,
        on_change: Box<dyn Fn(String)>,
    ) -> Result<(), MapError>;

    /// El mapa está creado y acepta comandos de vista
    fn is_ready(&self) -> bool;
}

/// Vista del mapa: centro, zoom y marcador opcional
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: f64,
    pub marker: Option<Coordinates>,
}

impl Default for MapView {
    fn default() -> Self {
        let center = Coordinates::new(23.2599, 77.4126);
        Self {
            center,
            zoom: 5.0,
            marker: Some(center),
        }
    }
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,
    #[error("Maps SDK failed to load: {0}")]
    SdkLoad(String),
    #[error("Maps SDK did not load within {0} ms")]
    SdkTimeout(u32),
    #[error("GOOGLE_MAPS_API_KEY is not configured")]
    MissingApiKey,
    #[error("Google Maps rejected the API key")]
    AuthFailure,
    #[error("Invalid route request: {0}")]
    InvalidRequest(String),
    #[error("Place not found: {0}")]
    NotFound(String),
    #[error("No route found between origin and destination")]
    NoRoute,
    #[error("Query limit exceeded")]
    QuotaExceeded,
    #[error("Request denied by the maps service")]
    RequestDenied,
    #[error("Device is offline")]
    Offline,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl MapError {
    /// Traducir un `DirectionsStatus` de Google a error
    pub fn from_status(status: &str, message: &str) -> Self {
        match status {
            "NOT_FOUND" => MapError::NotFound(message.to_string()),
            "ZERO_RESULTS" => MapError::NoRoute,
            "INVALID_REQUEST" | "MAX_WAYPOINTS_EXCEEDED" | "MAX_ROUTE_LENGTH_EXCEEDED" => {
                MapError::InvalidRequest(message.to_string())
            }
            "OVER_QUERY_LIMIT" => MapError::QuotaExceeded,
            "REQUEST_DENIED" => MapError::RequestDenied,
            "UNKNOWN_ERROR" => MapError::Network(message.to_string()),
            other => MapError::Unknown(format!("{}: {}", other, message)),
        }
    }

    /// Clave i18n del mensaje que ve el usuario
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MapError::NotReady => "error_not_ready",
            MapError::SdkLoad(_) | MapError::SdkTimeout(_) => "error_sdk_load",
            MapError::MissingApiKey | MapError::AuthFailure => "error_api_key",
            MapError::InvalidRequest(_) | MapError::NotFound(_) => "error_not_found",
            MapError::NoRoute => "error_no_route",
            MapError::QuotaExceeded | MapError::RequestDenied => "error_denied",
            MapError::Offline => "error_offline",
            MapError::Network(_) | MapError::Unknown(_) => "error_network",
        }
    }

    /// Errores que pueden resolverse reintentando la misma petición.
    /// La clave se fija al compilar: sin clave o con clave rechazada no hay reintento.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MapError::SdkLoad(_)
                | MapError::SdkTimeout(_)
                | MapError::Offline
                | MapError::Network(_)
                | MapError::QuotaExceeded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_de_google_se_traducen() {
        assert_eq!(MapError::from_status("ZERO_RESULTS", ""), MapError::NoRoute);
        assert_eq!(MapError::from_status("OVER_QUERY_LIMIT", "x"), MapError::QuotaExceeded);
        assert_eq!(MapError::from_status("REQUEST_DENIED", "x"), MapError::RequestDenied);
        assert_eq!(
            MapError::from_status("NOT_FOUND", "origin"),
            MapError::NotFound("origin".to_string())
        );
        assert_eq!(
            MapError::from_status("MAX_WAYPOINTS_EXCEEDED", "too many"),
            MapError::InvalidRequest("too many".to_string())
        );
        assert_eq!(
            MapError::from_status("SOMETHING_NEW", "boom"),
            MapError::Unknown("SOMETHING_NEW: boom".to_string())
        );
    }

    #[test]
    fn mensajes_y_reintentos() {
        assert_eq!(MapError::NoRoute.i18n_key(), "error_no_route");
        assert_eq!(MapError::SdkTimeout(15000).i18n_key(), "error_sdk_load");
        assert_eq!(MapError::SdkTimeout(15000).to_string(), "Maps SDK did not load within 15000 ms");
        assert!(MapError::Offline.is_retryable());
        assert!(!MapError::NoRoute.is_retryable());
    }

    #[test]
    fn problemas_de_clave_no_se_reintentan() {
        assert!(MapError::SdkLoad("script failed to load".to_string()).is_retryable());
        assert!(!MapError::MissingApiKey.is_retryable());
        assert!(!MapError::AuthFailure.is_retryable());
        assert_eq!(MapError::MissingApiKey.i18n_key(), "error_api_key");
        assert_eq!(MapError::AuthFailure.i18n_key(), "error_api_key");
    }
}
