// ============================================================================
// SDK LOADER - Carga del script de la Maps JavaScript API
// ============================================================================
// Inyecta el <script> una sola vez y espera al callback global.
// Error de red (onerror), timeout y clave rechazada se reportan como MapError.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlScriptElement;

use crate::config::SdkConfig;
use crate::dom::{create_element, document, get_element_by_id};
use crate::maps::MapError;
use crate::utils::google_maps_ffi::{is_maps_sdk_loaded, js_error_message};

const SCRIPT_ID: &str = "google-maps-sdk";
const TIMEOUT_MARKER: &str = "__sdk_timeout__";
const AUTH_FAILURE_CALLBACK: &str = "gm_authFailure";

/// Cargar el SDK de Google Maps. Si ya está en `window.google.maps` no hace nada.
pub async fn load_maps_sdk(sdk: &SdkConfig) -> Result<(), MapError> {
    if is_maps_sdk_loaded() {
        log::debug!("🗺️ SDK de Google Maps ya disponible, no se reinyecta");
        return Ok(());
    }

    if !sdk.has_api_key() {
        log::error!("❌ GOOGLE_MAPS_API_KEY no configurada");
        return Err(MapError::MissingApiKey);
    }

    // Un intento anterior fallido deja su <script> en el DOM
    if let Some(previous) = get_element_by_id(SCRIPT_ID) {
        log::info!("🧹 Eliminando script anterior del SDK antes de reintentar");
        previous.remove();
    }

    let promise = inject_script(sdk).map_err(|e| MapError::SdkLoad(js_error_message(&e)))?;

    log::info!("⏳ Cargando SDK de Google Maps (libraries: {:?})...", sdk.libraries);

    match JsFuture::from(promise).await {
        Ok(_) => {
            log::info!("✅ SDK de Google Maps cargado");
            Ok(())
        }
        Err(e) if e.as_string().as_deref() == Some(TIMEOUT_MARKER) => {
            log::error!("❌ Timeout cargando SDK ({} ms)", sdk.load_timeout_ms);
            Err(MapError::SdkTimeout(sdk.load_timeout_ms))
        }
        Err(e) => {
            let detail = js_error_message(&e);
            log::error!("❌ Error cargando SDK: {}", detail);
            Err(MapError::SdkLoad(detail))
        }
    }
}

/// Registrar `window.gm_authFailure`, que la API llama cuando rechaza la clave
/// (inválida, sin facturación o con referer no autorizado)
pub fn watch_auth_failure(on_failure: Box<dyn Fn()>) -> Result<(), MapError> {
    let window = web_sys::window().ok_or_else(|| MapError::Unknown("No window".to_string()))?;
    let handler = Closure::wrap(on_failure).into_js_value();
    js_sys::Reflect::set(&window, &JsValue::from_str(AUTH_FAILURE_CALLBACK), &handler)
        .map_err(|e| MapError::Unknown(js_error_message(&e)))?;
    Ok(())
}

/// Crear el <script> y devolver una Promise que se resuelve con el callback global
fn inject_script(sdk: &SdkConfig) -> Result<js_sys::Promise, JsValue> {
    let script: HtmlScriptElement = create_element("script")?.dyn_into()?;
    let head = document()
        .and_then(|doc| doc.head())
        .ok_or_else(|| JsValue::from_str("No <head> element"))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let callback_name = sdk.callback_name.clone();
    let timeout_ms = sdk.load_timeout_ms;
    let url = sdk.script_url();

    let mut setup_error: Option<JsValue> = None;

    let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        // Callback global que la API invoca al terminar
        let on_ready = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(&callback_name), &on_ready) {
            setup_error = Some(e);
            return;
        }

        let reject_on_error = reject.clone();
        let on_error = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            let _ = reject_on_error.call1(&JsValue::NULL, &JsValue::from_str("script failed to load"));
        }) as Box<dyn FnMut(web_sys::Event)>);
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        // El script vive mientras la página exista, el closure también
        on_error.forget();

        // Rechazar tras el timeout; si ya se resolvió no tiene efecto
        Timeout::new(timeout_ms, move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(TIMEOUT_MARKER));
        })
        .forget();
    });

    if let Some(e) = setup_error {
        return Err(e);
    }

    script.set_id(SCRIPT_ID);
    script.set_src(&url);
    script.set_async(true);
    script.set_defer(true);
    head.append_child(&script)?;

    Ok(promise)
}
