// ============================================================================
// GOOGLE MAPS FFI - Bindings de la Maps JavaScript API
// ============================================================================
// Solo wrappers para clases JS - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlInputElement};

#[wasm_bindgen]
extern "C" {
    // google.maps.Map
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type GoogleMap;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &HtmlElement, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, js_name = panTo)]
    pub fn pan_to(this: &GoogleMap, lat_lng: &JsValue);

    #[wasm_bindgen(method, js_name = getDiv)]
    pub fn get_div(this: &GoogleMap) -> HtmlElement;

    // google.maps.Marker
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    pub fn new(options: &JsValue) -> Result<Marker, JsValue>;

    // google.maps.DirectionsService
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = DirectionsService)]
    #[derive(Debug, Clone)]
    pub type DirectionsService;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "DirectionsService")]
    pub fn new() -> Result<DirectionsService, JsValue>;

    /// Sin callback devuelve una Promise<DirectionsResult>
    #[wasm_bindgen(catch, method)]
    pub fn route(this: &DirectionsService, request: &JsValue) -> Result<js_sys::Promise, JsValue>;

    // google.maps.DirectionsRenderer
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = DirectionsRenderer)]
    #[derive(Debug, Clone)]
    pub type DirectionsRenderer;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "DirectionsRenderer")]
    pub fn new(options: &JsValue) -> Result<DirectionsRenderer, JsValue>;

    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &DirectionsRenderer, map: &JsValue);

    #[wasm_bindgen(method, js_name = setDirections)]
    pub fn set_directions(this: &DirectionsRenderer, directions: &JsValue);

    // google.maps.places.Autocomplete
    #[wasm_bindgen(js_namespace = ["google", "maps", "places"], js_name = Autocomplete)]
    #[derive(Debug, Clone)]
    pub type PlacesAutocomplete;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps", "places"], js_class = "Autocomplete")]
    pub fn new(input: &HtmlInputElement) -> Result<PlacesAutocomplete, JsValue>;

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &PlacesAutocomplete, event: &str, handler: &js_sys::Function) -> JsValue;
}

/// ¿Está `window.google.maps` disponible?
pub fn is_maps_sdk_loaded() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("google"))
        .ok()
        .filter(|google| !google.is_undefined() && !google.is_null())
        .and_then(|google| js_sys::Reflect::get(&google, &JsValue::from_str("maps")).ok())
        .map(|maps| !maps.is_undefined() && !maps.is_null())
        .unwrap_or(false)
}

/// ¿Está `google.maps.places` disponible? (requiere la librería "places")
pub fn is_places_library_loaded() -> bool {
    if !is_maps_sdk_loaded() {
        return false;
    }
    let path = ["google", "maps", "places"];
    let mut current: JsValue = match web_sys::window() {
        Some(window) => window.into(),
        None => return false,
    };
    for key in path {
        match js_sys::Reflect::get(&current, &JsValue::from_str(key)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => current = value,
            _ => return false,
        }
    }
    true
}

/// Texto legible de un error JS (string, Error.message o Debug)
pub fn js_error_message(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(error, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", error))
}
