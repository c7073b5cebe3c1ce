use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, HtmlInputElement, Node};

use super::{MapError, MapProvider, MapView};
use crate::config::SdkConfig;
use crate::dom::get_element_by_id;
use crate::models::{Coordinates, LatLngLiteral, RouteAlternative, RouteRequest, RouteResult};
use crate::services::sdk_loader::{load_maps_sdk, watch_auth_failure};
use crate::utils::google_maps_ffi::{
    is_places_library_loaded, js_error_message, DirectionsRenderer, DirectionsService, GoogleMap, Marker,
    PlacesAutocomplete,
};

/// Opciones de `google.maps.Map`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: LatLngLiteral,
    zoom: f64,
    map_type_control: bool,
    street_view_control: bool,
    fullscreen_control: bool,
}

/// Solo la parte del DirectionsResult que se lee desde Rust
#[derive(Deserialize)]
struct DirectionsPayload {
    #[serde(default)]
    routes: Vec<RouteAlternative>,
}

/// Proveedor de mapas para web usando la Maps JavaScript API
pub struct GoogleMapsProvider {
    map: RefCell<Option<GoogleMap>>,
    marker: RefCell<Option<Marker>>,
    renderer: RefCell<Option<DirectionsRenderer>>,
    // Mantener vivos los Autocomplete mientras existan sus inputs
    autocompletes: RefCell<Vec<PlacesAutocomplete>>,
}

impl GoogleMapsProvider {
    pub fn new() -> Self {
        Self {
            map: RefCell::new(None),
            marker: RefCell::new(None),
            renderer: RefCell::new(None),
            autocompletes: RefCell::new(Vec::new()),
        }
    }

    fn to_js<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
        serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Unknown(e.to_string()))
    }

    /// Objeto `{ map }` para los constructores que se anclan a un mapa
    fn attached_options(map: &GoogleMap, extra: &[(&str, JsValue)]) -> Result<JsValue, MapError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("map"), map.as_ref())
            .map_err(|e| MapError::Unknown(js_error_message(&e)))?;
        for (key, value) in extra {
            js_sys::Reflect::set(&options, &JsValue::from_str(key), value)
                .map_err(|e| MapError::Unknown(js_error_message(&e)))?;
        }
        Ok(options.into())
    }

    fn is_online() -> bool {
        web_sys::window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(true)
    }

    /// Convertir el rechazo de `DirectionsService.route` en MapError
    fn route_error(error: &JsValue) -> MapError {
        let code = js_sys::Reflect::get(error, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_string());
        let message = js_error_message(error);
        match code {
            Some(code) => MapError::from_status(&code, &message),
            None => MapError::Network(message),
        }
    }
}

impl Default for GoogleMapsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MapProvider for GoogleMapsProvider {
    type Directions = JsValue;

    async fn initialize(&self, sdk: &SdkConfig) -> Result<(), MapError> {
        load_maps_sdk(sdk).await?;
        if sdk.libraries.iter().any(|l| l == "places") && !is_places_library_loaded() {
            log::warn!("⚠️ Librería places no disponible, autocompletado desactivado");
        }
        Ok(())
    }

    fn on_auth_failure(&self, handler: Box<dyn Fn(MapError)>) -> Result<(), MapError> {
        watch_auth_failure(Box::new(move || {
            log::error!("🔑 Google Maps rechazó la API key (gm_authFailure)");
            handler(MapError::AuthFailure);
        }))
    }

    fn render_map(&self, container_id: &str, view: &MapView) -> Result<(), MapError> {
        let container: HtmlElement = get_element_by_id(container_id)
            .ok_or_else(|| MapError::Unknown(format!("No #{} element found", container_id)))?
            .dyn_into()
            .map_err(|_| MapError::Unknown(format!("#{} is not an HtmlElement", container_id)))?;

        let container_node: &Node = container.as_ref();
        if let Some(map) = self.map.borrow().as_ref() {
            if map.get_div().is_same_node(Some(container_node)) {
                log::debug!("🗺️ Mapa ya creado en #{}, se reutiliza", container_id);
                return Ok(());
            }
        }

        // Re-render completo: el contenedor anterior ya no está en el DOM
        if self.map.borrow_mut().take().is_some() {
            log::info!("♻️ Contenedor #{} nuevo, se recrea el mapa", container_id);
            self.marker.borrow_mut().take();
            self.renderer.borrow_mut().take();
            self.autocompletes.borrow_mut().clear();
        }

        log::info!(
            "🗺️ Creando mapa en ({}, {}) con zoom {}",
            view.center.latitude,
            view.center.longitude,
            view.zoom
        );

        let options = Self::to_js(&MapOptions {
            center: view.center.into(),
            zoom: view.zoom,
            map_type_control: false,
            street_view_control: false,
            fullscreen_control: false,
        })?;
        let map = GoogleMap::new(&container, &options).map_err(|e| MapError::Unknown(js_error_message(&e)))?;

        if let Some(position) = view.marker {
            let position = Self::to_js(&LatLngLiteral::from(position))?;
            let marker_options = Self::attached_options(&map, &[("position", position)])?;
            let marker = Marker::new(&marker_options).map_err(|e| MapError::Unknown(js_error_message(&e)))?;
            *self.marker.borrow_mut() = Some(marker);
        }

        // El renderer se crea sin mapa; se ancla al mostrar una ruta
        let renderer = DirectionsRenderer::new(&js_sys::Object::new().into())
            .map_err(|e| MapError::Unknown(js_error_message(&e)))?;
        *self.renderer.borrow_mut() = Some(renderer);
        *self.map.borrow_mut() = Some(map);

        log::info!("✅ Mapa creado");
        Ok(())
    }

    async fn compute_route(&self, request: &RouteRequest) -> Result<RouteResult<JsValue>, MapError> {
        if !Self::is_online() {
            log::warn!("📴 Sin conexión, no se pide la ruta");
            return Err(MapError::Offline);
        }

        let service = DirectionsService::new().map_err(|e| MapError::Unknown(js_error_message(&e)))?;
        let js_request = Self::to_js(request)?;

        log::info!("🚗 Pidiendo ruta: {} → {}", request.origin, request.destination);

        let promise = service.route(&js_request).map_err(|e| Self::route_error(&e))?;
        let directions = JsFuture::from(promise).await.map_err(|e| Self::route_error(&e))?;

        let payload: DirectionsPayload = serde_wasm_bindgen::from_value(directions.clone())
            .map_err(|e| MapError::Unknown(format!("Unexpected directions result: {}", e)))?;

        log::info!("✅ Ruta recibida ({} alternativas)", payload.routes.len());
        RouteResult::new(payload.routes, directions)
    }

    fn show_route(&self, directions: Option<&JsValue>) -> Result<(), MapError> {
        let map = self.map.borrow();
        let renderer = self.renderer.borrow();
        let (Some(map), Some(renderer)) = (map.as_ref(), renderer.as_ref()) else {
            return Err(MapError::NotReady);
        };

        match directions {
            Some(directions) => {
                renderer.set_map(map.as_ref());
                renderer.set_directions(directions);
                log::debug!("🛣️ Overlay de ruta dibujado");
            }
            None => {
                renderer.set_map(&JsValue::NULL);
                log::debug!("🧹 Overlay de ruta eliminado");
            }
        }
        Ok(())
    }

    fn pan_to(&self, center: Coordinates) -> Result<(), MapError> {
        let map = self.map.borrow();
        let map = map.as_ref().ok_or(MapError::NotReady)?;

        log::info!("🎯 Centrando mapa en ({}, {})", center.latitude, center.longitude);
        map.pan_to(&Self::to_js(&LatLngLiteral::from(center))?);
        Ok(())
    }

    fn attach_autocomplete(&self, input_id: &str, on_change: Box<dyn Fn(String)>) -> Result<(), MapError> {
        if !is_places_library_loaded() {
            return Err(MapError::NotReady);
        }

        let input: HtmlInputElement = get_element_by_id(input_id)
            .ok_or_else(|| MapError::Unknown(format!("No #{} element found", input_id)))?
            .dyn_into()
            .map_err(|_| MapError::Unknown(format!("#{} is not an input", input_id)))?;

        let autocomplete = PlacesAutocomplete::new(&input).map_err(|e| MapError::Unknown(js_error_message(&e)))?;

        // El widget escribe el valor en el input sin disparar "input"
        let source = input.clone();
        let on_place_changed = Closure::wrap(Box::new(move || {
            on_change(source.value());
        }) as Box<dyn FnMut()>);
        autocomplete.add_listener("place_changed", on_place_changed.as_ref().unchecked_ref());
        on_place_changed.forget();

        self.autocompletes.borrow_mut().push(autocomplete);
        log::debug!("🔎 Autocompletado activado en #{}", input_id);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.map.borrow().is_some()
    }
}
