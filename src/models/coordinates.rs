use serde::{Deserialize, Serialize};

/// Coordenadas geográficas (grados decimales)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Forma `{lat, lng}` que espera la Maps JavaScript API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for LatLngLiteral {
    fn from(c: Coordinates) -> Self {
        Self {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}
