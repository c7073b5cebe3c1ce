// ============================================================================
// APP - Aplicación principal (RouteSearchView)
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::maps::{GoogleMapsProvider, MapProvider, MapView};
use crate::state::{IncrementalUpdate, RouteSearchState, SdkStatus};
use crate::utils::{APP_ROOT_ID, DESTINATION_INPUT_ID, MAP_CONTAINER_ID, ORIGIN_INPUT_ID};
use crate::viewmodels::{CalculateOutcome, RouteViewModel};
use crate::views::{render_app, update_inputs, update_route_summary, update_search_status, RouteActions};

/// Estado concreto de la app web: las direcciones son el objeto JS de Google
pub type AppState = RouteSearchState<JsValue>;

/// Aplicación principal
pub struct App {
    state: AppState,
    provider: Rc<GoogleMapsProvider>,
    view: MapView,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(&CONFIG.language);

        // Suscribirse a cambios de estado para re-renderizar.
        // Timeout(0) sale del borrow actual de APP y agrupa updates.
        state.subscribe_to_changes(|update| {
            Timeout::new(0, move || {
                crate::rerender_app_with_type(update);
            })
            .forget();
        });

        Ok(Self {
            state,
            provider: Rc::new(GoogleMapsProvider::new()),
            view: CONFIG.map_config.map_view(),
            root: Some(root),
        })
    }

    /// Empezar la carga del SDK (Loading → Ready | Failed)
    pub fn start(&self) {
        spawn_initialize(self.state.clone(), self.provider.clone());
    }

    /// Acciones del panel conectadas al ViewModel
    fn actions(&self) -> RouteActions {
        let state = self.state.clone();
        let on_origin = Rc::new(move |value: String| state.set_origin(value));

        let state = self.state.clone();
        let on_destination = Rc::new(move |value: String| state.set_destination(value));

        let state = self.state.clone();
        let provider = self.provider.clone();
        let on_calculate = Rc::new(move || {
            let state = state.clone();
            let provider = provider.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match RouteViewModel::calculate(&state, &*provider).await {
                    CalculateOutcome::Applied => log::info!("✅ [APP] Ruta mostrada"),
                    CalculateOutcome::Skipped => log::debug!("⏭️ [APP] Calculate ignorado (campos vacíos)"),
                    CalculateOutcome::Stale => log::debug!("⏭️ [APP] Respuesta obsoleta descartada"),
                    CalculateOutcome::Failed(e) => log::warn!("⚠️ [APP] Calculate fallido: {}", e),
                }
            });
        });

        let state = self.state.clone();
        let provider = self.provider.clone();
        let on_clear = Rc::new(move || RouteViewModel::clear(&state, &*provider));

        let provider = self.provider.clone();
        let view = self.view;
        let on_recenter = Rc::new(move || {
            if let Err(e) = RouteViewModel::recenter(&*provider, &view) {
                log::warn!("⚠️ [APP] Re-center fallido: {}", e);
            }
        });

        let state = self.state.clone();
        let provider = self.provider.clone();
        let on_retry = Rc::new(move || spawn_initialize(state.clone(), provider.clone()));

        RouteActions {
            on_origin,
            on_destination,
            on_calculate,
            on_clear,
            on_recenter,
            on_retry,
        }
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(root) = &self.root else {
            return Ok(());
        };

        log::debug!("🎬 [APP] Render completo ({:?})", self.state.sdk_status());

        set_inner_html(root, "");
        let app_view = render_app(&self.state, &self.actions())?;
        append_child(root, &app_view)?;

        if self.state.sdk_status() == SdkStatus::Ready {
            self.mount_map();
        }
        Ok(())
    }

    /// Crear el mapa y el autocompletado sobre el DOM recién renderizado
    fn mount_map(&self) {
        if let Err(e) = RouteViewModel::mount_map(&self.state, &*self.provider, MAP_CONTAINER_ID, &self.view) {
            log::error!("❌ [APP] No se pudo crear el mapa: {}", e);
            return;
        }

        let state = self.state.clone();
        let origin = self
            .provider
            .attach_autocomplete(ORIGIN_INPUT_ID, Box::new(move |value| state.set_origin(value)));
        let state = self.state.clone();
        let destination = self
            .provider
            .attach_autocomplete(DESTINATION_INPUT_ID, Box::new(move |value| state.set_destination(value)));

        if let Err(e) = origin.and(destination) {
            log::warn!("⚠️ [APP] Autocompletado no disponible: {}", e);
        }
    }

    /// Actualización incremental del DOM (solo elementos específicos)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        if self.state.sdk_status() != SdkStatus::Ready {
            // El panel no existe todavía
            return Ok(());
        }
        match update_type {
            IncrementalUpdate::RouteSummary => update_route_summary(&self.state),
            IncrementalUpdate::SearchStatus => update_search_status(&self.state),
            IncrementalUpdate::Inputs => update_inputs(&self.state),
        }
    }
}

/// Lanzar la inicialización del SDK en el event loop
fn spawn_initialize(state: AppState, provider: Rc<GoogleMapsProvider>) {
    wasm_bindgen_futures::spawn_local(async move {
        // El error ya queda en SdkStatus::Failed y se muestra en pantalla
        let _ = RouteViewModel::initialize(&state, &*provider, &CONFIG.sdk_config).await;
    });
}
