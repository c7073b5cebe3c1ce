// ============================================================================
// ROUTE MODELS - Petición y resultado de cálculo de ruta
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::maps::MapError;

/// Modo de transporte. La búsqueda siempre es en coche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Driving,
}

/// Petición enviada al servicio de rutas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub travel_mode: TravelMode,
}

impl RouteRequest {
    /// Petición en coche. `None` si origen o destino están vacíos.
    pub fn driving(origin: &str, destination: &str) -> Option<Self> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return None;
        }
        Some(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            travel_mode: TravelMode::Driving,
        })
    }
}

/// Texto legible + valor numérico (metros o segundos)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    #[serde(default)]
    pub value: f64,
}

impl TextValue {
    pub fn new(text: &str, value: f64) -> Self {
        Self {
            text: text.to_string(),
            value,
        }
    }
}

/// Tramo origen → destino dentro de una alternativa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
}

/// Una alternativa completa devuelta por el servicio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Resultado de ruta.
///
/// `D` es el objeto opaco del proveedor que se dibuja como overlay en el mapa.
/// Solo se construye con al menos una alternativa que tenga al menos un tramo;
/// se muestra siempre `routes[0].legs[0]` (sin waypoints, el resto no se usa).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult<D> {
    routes: Vec<RouteAlternative>,
    directions: D,
}

impl<D> RouteResult<D> {
    pub fn new(routes: Vec<RouteAlternative>, directions: D) -> Result<Self, MapError> {
        let has_primary_leg = routes
            .first()
            .map(|route| !route.legs.is_empty())
            .unwrap_or(false);
        if !has_primary_leg {
            return Err(MapError::NoRoute);
        }
        Ok(Self { routes, directions })
    }

    pub fn routes(&self) -> &[RouteAlternative] {
        &self.routes
    }

    pub fn directions(&self) -> &D {
        &self.directions
    }

    /// Primer tramo de la primera alternativa
    pub fn primary_leg(&self) -> &RouteLeg {
        // `new` garantiza que existe
        &self.routes[0].legs[0]
    }

    pub fn distance_text(&self) -> &str {
        &self.primary_leg().distance.text
    }

    pub fn duration_text(&self) -> &str {
        &self.primary_leg().duration.text
    }
}
