use serde::{Deserialize, Serialize};

use crate::maps::MapView;
use crate::models::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub language: String,
    pub map_config: MapConfig,
    pub sdk_config: SdkConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            language: "EN".to_string(),
            map_config: MapConfig::default(),
            sdk_config: SdkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 23.2599, // Bhopal
            default_center_lng: 77.4126,
            default_zoom: 5.0,
        }
    }
}

impl MapConfig {
    /// Coordenada fija usada en el render inicial y en Re-center
    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.default_center_lat, self.default_center_lng)
    }

    /// Vista inicial del mapa: centro, zoom y marcador en el centro
    pub fn map_view(&self) -> MapView {
        let center = self.default_center();
        MapView {
            center,
            zoom: self.default_zoom,
            marker: Some(center),
        }
    }
}

/// Parámetros de carga del SDK de Google Maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    pub api_key: String,
    pub libraries: Vec<String>,
    pub load_timeout_ms: u32,
    /// Nombre de la función global que el script invoca al terminar de cargar
    pub callback_name: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            libraries: vec!["places".to_string()],
            load_timeout_ms: 15_000,
            callback_name: "__routeSearchMapsReady".to_string(),
        }
    }
}

impl SdkConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// URL del script de la Maps JavaScript API
    pub fn script_url(&self) -> String {
        let mut url = format!(
            "https://maps.googleapis.com/maps/api/js?key={}&loading=async&callback={}",
            self.api_key.trim(),
            self.callback_name
        );
        if !self.libraries.is_empty() {
            url.push_str("&libraries=");
            url.push_str(&self.libraries.join(","));
        }
        url
    }
}

/// Lista separada por comas, sin entradas vacías
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "GOOGLE_MAPS_API_KEY" => option_env!("GOOGLE_MAPS_API_KEY"),
            "ENVIRONMENT" => option_env!("ENVIRONMENT"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            "LANGUAGE" => option_env!("LANGUAGE"),
            "DEFAULT_MAP_CENTER_LAT" => option_env!("DEFAULT_MAP_CENTER_LAT"),
            "DEFAULT_MAP_CENTER_LNG" => option_env!("DEFAULT_MAP_CENTER_LNG"),
            "DEFAULT_MAP_ZOOM" => option_env!("DEFAULT_MAP_ZOOM"),
            "MAPS_LIBRARIES" => option_env!("MAPS_LIBRARIES"),
            "SDK_LOAD_TIMEOUT_MS" => option_env!("SDK_LOAD_TIMEOUT_MS"),
            _ => None,
        })
    }

    /// Construye la configuración a partir de una función de búsqueda de variables.
    /// Valores ausentes o no parseables caen al valor por defecto.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'static str>,
    {
        let defaults = Self::default();

        let map_defaults = defaults.map_config;
        let map_config = MapConfig {
            default_center_lat: lookup("DEFAULT_MAP_CENTER_LAT")
                .and_then(|v| v.trim().parse().ok())
                .filter(|lat: &f64| (-90.0..=90.0).contains(lat))
                .unwrap_or(map_defaults.default_center_lat),
            default_center_lng: lookup("DEFAULT_MAP_CENTER_LNG")
                .and_then(|v| v.trim().parse().ok())
                .filter(|lng: &f64| (-180.0..=180.0).contains(lng))
                .unwrap_or(map_defaults.default_center_lng),
            default_zoom: lookup("DEFAULT_MAP_ZOOM")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(map_defaults.default_zoom),
        };

        let sdk_defaults = defaults.sdk_config;
        let libraries = lookup("MAPS_LIBRARIES")
            .map(parse_list)
            .unwrap_or(sdk_defaults.libraries);
        let sdk_config = SdkConfig {
            api_key: lookup("GOOGLE_MAPS_API_KEY")
                .unwrap_or("")
                .trim()
                .to_string(),
            libraries,
            load_timeout_ms: lookup("SDK_LOAD_TIMEOUT_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(sdk_defaults.load_timeout_ms),
            callback_name: sdk_defaults.callback_name,
        };

        Self {
            environment: lookup("ENVIRONMENT")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.environment),
            enable_logging: lookup("ENABLE_LOGGING")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.enable_logging),
            language: lookup("LANGUAGE")
                .map(|v| v.trim().to_uppercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.language),
            map_config,
            sdk_config,
        }
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_vacio_usa_valores_por_defecto() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.language, "EN");
        assert!(config.enable_logging);
        assert_eq!(config.sdk_config.libraries, vec!["places".to_string()]);
        assert!(!config.sdk_config.has_api_key());

        let view = config.map_config.map_view();
        assert_eq!(view.center, Coordinates::new(23.2599, 77.4126));
        assert_eq!(view.zoom, 5.0);
        assert_eq!(view.marker, Some(view.center));
    }

    #[test]
    fn lookup_parsea_valores_y_descarta_invalidos() {
        let config = AppConfig::from_lookup(|key| match key {
            "GOOGLE_MAPS_API_KEY" => Some("  abc123  "),
            "ENABLE_LOGGING" => Some("false"),
            "LANGUAGE" => Some("es"),
            "DEFAULT_MAP_CENTER_LAT" => Some("120.0"),
            "DEFAULT_MAP_CENTER_LNG" => Some("2.35"),
            "DEFAULT_MAP_ZOOM" => Some("no-es-un-numero"),
            "MAPS_LIBRARIES" => Some("places, geometry,,"),
            "SDK_LOAD_TIMEOUT_MS" => Some("5000"),
            _ => None,
        });

        assert_eq!(config.sdk_config.api_key, "abc123");
        assert!(!config.enable_logging);
        assert_eq!(config.log_level(), log::Level::Warn);
        assert_eq!(config.language, "ES");
        // latitud fuera de rango: se conserva el valor por defecto
        assert_eq!(config.map_config.default_center_lat, 23.2599);
        assert_eq!(config.map_config.default_center_lng, 2.35);
        assert_eq!(config.map_config.default_zoom, 5.0);
        assert_eq!(
            config.sdk_config.libraries,
            vec!["places".to_string(), "geometry".to_string()]
        );
        assert_eq!(config.sdk_config.load_timeout_ms, 5000);
    }

    #[test]
    fn script_url_incluye_clave_callback_y_librerias() {
        let sdk = SdkConfig {
            api_key: "KEY".to_string(),
            ..SdkConfig::default()
        };
        let url = sdk.script_url();
        assert!(url.starts_with("https://maps.googleapis.com/maps/api/js?key=KEY"));
        assert!(url.contains("callback=__routeSearchMapsReady"));
        assert!(url.ends_with("&libraries=places"));
    }
}
