// ============================================================================
// ROUTE VIEWMODEL - Lógica de la vista de búsqueda de rutas
// ============================================================================
// Sin estado propio: opera sobre RouteSearchState + MapProvider
// ============================================================================

use crate::config::SdkConfig;
use crate::maps::{MapError, MapProvider, MapView};
use crate::state::{FinishOutcome, RouteSearchState, SdkStatus};

/// Resultado de una acción Calculate
#[derive(Clone, Debug, PartialEq)]
pub enum CalculateOutcome {
    /// Origen o destino vacío: no se envió nada
    Skipped,
    /// Ruta guardada y dibujada
    Applied,
    /// Llegó una respuesta más nueva (o un Clear) antes que esta
    Stale,
    /// El servicio rechazó la petición
    Failed(MapError),
}

pub struct RouteViewModel;

impl RouteViewModel {
    /// Cargar el SDK: Loading → Ready | Failed.
    /// Una clave rechazada pasa a Failed aunque el mapa ya esté en pantalla.
    pub async fn initialize<P: MapProvider>(
        state: &RouteSearchState<P::Directions>,
        provider: &P,
        sdk: &SdkConfig,
    ) -> Result<(), MapError> {
        state.set_sdk_status(SdkStatus::Loading);
        log::info!("🗺️ ViewModel: Inicializando SDK de mapas...");

        let watcher = state.clone();
        let registered = provider.on_auth_failure(Box::new(move |error| {
            watcher.set_sdk_status(SdkStatus::Failed(error));
        }));
        if let Err(e) = registered {
            log::warn!("⚠️ ViewModel: No se pudo vigilar la API key: {}", e);
        }

        match provider.initialize(sdk).await {
            // La clave se rechazó mientras el script terminaba de cargar
            Ok(()) => match state.sdk_status() {
                SdkStatus::Failed(error) => Err(error),
                _ => {
                    state.set_sdk_status(SdkStatus::Ready);
                    Ok(())
                }
            },
            Err(error) => {
                log::error!("❌ ViewModel: SDK no disponible: {}", error);
                state.set_sdk_status(SdkStatus::Failed(error.clone()));
                Err(error)
            }
        }
    }

    /// Crear el mapa una vez que el contenedor existe en el DOM.
    /// Si ya había una ruta (re-render), se vuelve a dibujar.
    pub fn mount_map<P: MapProvider>(
        state: &RouteSearchState<P::Directions>,
        provider: &P,
        container_id: &str,
        view: &MapView,
    ) -> Result<(), MapError> {
        if !state.is_sdk_ready() {
            return Err(MapError::NotReady);
        }
        provider.render_map(container_id, view)?;
        if let Some(directions) = state.route_directions() {
            provider.show_route(Some(&directions))?;
        }
        Ok(())
    }

    /// Calculate: pide la ruta con los textos actuales.
    /// No-op con origen o destino vacío. Un fallo nunca sale de aquí:
    /// queda en `SearchStatus::Failed` y la ruta anterior sigue visible.
    pub async fn calculate<P: MapProvider>(
        state: &RouteSearchState<P::Directions>,
        provider: &P,
    ) -> CalculateOutcome {
        let Some(request) = state.route_request() else {
            log::debug!("⏭️ ViewModel: Origen o destino vacío, no se calcula");
            return CalculateOutcome::Skipped;
        };

        let ticket = state.begin_search();

        let result = if provider.is_ready() {
            provider.compute_route(&request).await
        } else {
            Err(MapError::NotReady)
        };

        match state.finish_search(ticket, result) {
            FinishOutcome::Applied => {
                if let Some(directions) = state.route_directions() {
                    if let Err(e) = provider.show_route(Some(&directions)) {
                        log::warn!("⚠️ ViewModel: No se pudo dibujar la ruta: {}", e);
                    }
                }
                CalculateOutcome::Applied
            }
            FinishOutcome::Stale => CalculateOutcome::Stale,
            FinishOutcome::Failed(error) => CalculateOutcome::Failed(error),
        }
    }

    /// Clear: vacía ruta, textos e inputs y quita el overlay. Idempotente.
    pub fn clear<P: MapProvider>(state: &RouteSearchState<P::Directions>, provider: &P) {
        state.clear();
        if provider.is_ready() {
            if let Err(e) = provider.show_route(None) {
                log::warn!("⚠️ ViewModel: No se pudo quitar el overlay: {}", e);
            }
        }
    }

    /// Re-center: siempre al centro fijo de la vista por defecto
    pub fn recenter<P: MapProvider>(provider: &P, view: &MapView) -> Result<(), MapError> {
        provider.pan_to(view.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Coordinates, RouteAlternative, RouteLeg, RouteRequest, RouteResult, TextValue,
    };
    use crate::state::{IncrementalUpdate, SearchStatus, UpdateType};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    type Hook = Box<dyn Fn()>;

    /// Proveedor falso: respuestas programadas + registro de comandos
    #[derive(Default)]
    struct MockMapProvider {
        sdk_result: RefCell<Option<MapError>>,
        rendered: Cell<bool>,
        responses: RefCell<VecDeque<Result<RouteResult<String>, MapError>>>,
        requests: RefCell<Vec<RouteRequest>>,
        overlay: RefCell<Option<String>>,
        overlay_calls: Cell<usize>,
        pans: RefCell<Vec<Coordinates>>,
        // Se ejecuta mientras la petición está "en vuelo"
        during_route: RefCell<Option<Hook>>,
        auth_handler: RefCell<Option<Box<dyn Fn(MapError)>>>,
        auth_fails_on_load: Cell<bool>,
        // Nodo #map actual: cambia con cada render completo
        container_generation: Cell<u32>,
        mounted_in: Cell<Option<u32>>,
        map_builds: Cell<usize>,
        autocompletes: Cell<usize>,
    }

    impl MockMapProvider {
        fn ready() -> Self {
            let provider = Self::default();
            provider.rendered.set(true);
            provider
        }

        fn respond(&self, response: Result<RouteResult<String>, MapError>) {
            self.responses.borrow_mut().push_back(response);
        }

        fn reject_api_key(&self) {
            if let Some(handler) = self.auth_handler.borrow().as_ref() {
                handler(MapError::AuthFailure);
            }
        }

        /// El DOM se reconstruye y #map es otro nodo
        fn replace_container(&self) {
            self.container_generation.set(self.container_generation.get() + 1);
        }
    }

    impl MapProvider for MockMapProvider {
        type Directions = String;

        async fn initialize(&self, _sdk: &SdkConfig) -> Result<(), MapError> {
            if self.auth_fails_on_load.get() {
                self.reject_api_key();
            }
            match self.sdk_result.borrow().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn on_auth_failure(&self, handler: Box<dyn Fn(MapError)>) -> Result<(), MapError> {
            *self.auth_handler.borrow_mut() = Some(handler);
            Ok(())
        }

        fn render_map(&self, _container_id: &str, _view: &MapView) -> Result<(), MapError> {
            let current = self.container_generation.get();
            if self.mounted_in.get() == Some(current) {
                return Ok(());
            }
            // Mapa nuevo: sin overlay ni autocompletados
            self.mounted_in.set(Some(current));
            self.map_builds.set(self.map_builds.get() + 1);
            *self.overlay.borrow_mut() = None;
            self.autocompletes.set(0);
            self.rendered.set(true);
            Ok(())
        }

        async fn compute_route(
            &self,
            request: &RouteRequest,
        ) -> Result<RouteResult<String>, MapError> {
            self.requests.borrow_mut().push(request.clone());
            if let Some(hook) = self.during_route.borrow().as_ref() {
                hook();
            }
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(MapError::Unknown("no scripted response".to_string())))
        }

        fn show_route(&self, directions: Option<&String>) -> Result<(), MapError> {
            self.overlay_calls.set(self.overlay_calls.get() + 1);
            *self.overlay.borrow_mut() = directions.cloned();
            Ok(())
        }

        fn pan_to(&self, center: Coordinates) -> Result<(), MapError> {
            if !self.rendered.get() {
                return Err(MapError::NotReady);
            }
            self.pans.borrow_mut().push(center);
            Ok(())
        }

        fn attach_autocomplete(
            &self,
            _input_id: &str,
            _on_change: Box<dyn Fn(String)>,
        ) -> Result<(), MapError> {
            self.autocompletes.set(self.autocompletes.get() + 1);
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.rendered.get()
        }
    }

    fn route(distance: &str, duration: &str, tag: &str) -> RouteResult<String> {
        let leg = RouteLeg {
            distance: TextValue::new(distance, 0.0),
            duration: TextValue::new(duration, 0.0),
            start_address: String::new(),
            end_address: String::new(),
        };
        RouteResult::new(
            vec![RouteAlternative {
                summary: String::new(),
                legs: vec![leg],
            }],
            tag.to_string(),
        )
        .unwrap()
    }

    fn ready_state() -> RouteSearchState<String> {
        let state = RouteSearchState::new("EN");
        state.set_sdk_status(SdkStatus::Ready);
        state
    }

    fn fill(state: &RouteSearchState<String>, origin: &str, destination: &str) {
        state.set_origin(origin.to_string());
        state.set_destination(destination.to_string());
    }

    #[test]
    fn calculate_con_campos_vacios_no_pide_nada() {
        let provider = MockMapProvider::ready();
        let state = ready_state();

        for (origin, destination) in [("", "Indore"), ("Bhopal", ""), ("", "")] {
            fill(&state, origin, destination);
            let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));
            assert_eq!(outcome, CalculateOutcome::Skipped);
        }

        assert!(provider.requests.borrow().is_empty());
        assert_eq!(state.distance_text(), "");
        assert_eq!(state.duration_text(), "");
        assert_eq!(state.search_status(), SearchStatus::Idle);
    }

    #[test]
    fn calculate_vacio_no_toca_ruta_existente() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "bhopal-indore")));
        fill(&state, "Bhopal", "Indore");
        pollster::block_on(RouteViewModel::calculate(&state, &provider));

        fill(&state, "Bhopal", "");
        let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));
        assert_eq!(outcome, CalculateOutcome::Skipped);
        assert_eq!(state.distance_text(), "190 km");
        assert_eq!(provider.requests.borrow().len(), 1);
    }

    #[test]
    fn calculate_guarda_ruta_y_textos_del_primer_tramo() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "bhopal-indore")));
        fill(&state, "Bhopal", "Indore");

        let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));

        assert_eq!(outcome, CalculateOutcome::Applied);
        assert_eq!(state.distance_text(), "190 km");
        assert_eq!(state.duration_text(), "3 hours 30 mins");
        assert_eq!(*provider.overlay.borrow(), Some("bhopal-indore".to_string()));

        let requests = provider.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], RouteRequest::driving("Bhopal", "Indore").unwrap());
    }

    #[test]
    fn clear_tras_ruta_vacia_textos_inputs_y_overlay() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "bhopal-indore")));
        fill(&state, "Bhopal", "Indore");
        pollster::block_on(RouteViewModel::calculate(&state, &provider));

        RouteViewModel::clear(&state, &provider);

        assert_eq!(state.origin(), "");
        assert_eq!(state.destination(), "");
        assert_eq!(state.distance_text(), "");
        assert_eq!(state.duration_text(), "");
        assert!(!state.has_route());
        assert_eq!(*provider.overlay.borrow(), None);
    }

    #[test]
    fn clear_es_idempotente() {
        let provider = MockMapProvider::ready();
        let fresh = ready_state();
        RouteViewModel::clear(&fresh, &provider);
        RouteViewModel::clear(&fresh, &provider);

        let used = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "x")));
        fill(&used, "Bhopal", "Indore");
        pollster::block_on(RouteViewModel::calculate(&used, &provider));
        RouteViewModel::clear(&used, &provider);

        for state in [&fresh, &used] {
            assert!(!state.has_route());
            assert_eq!(state.origin(), "");
            assert_eq!(state.destination(), "");
            assert_eq!(state.distance_text(), "");
            assert_eq!(state.duration_text(), "");
            assert_eq!(state.search_status(), SearchStatus::Idle);
        }
        assert_eq!(*provider.overlay.borrow(), None);
    }

    #[test]
    fn recenter_siempre_al_centro_por_defecto() {
        let provider = MockMapProvider::ready();
        let view = MapView::default();

        RouteViewModel::recenter(&provider, &view).unwrap();
        RouteViewModel::recenter(&provider, &view).unwrap();

        let pans = provider.pans.borrow();
        assert_eq!(pans.len(), 2);
        assert!(pans.iter().all(|c| *c == Coordinates::new(23.2599, 77.4126)));
    }

    #[test]
    fn recenter_antes_del_mapa_falla_sin_panico() {
        let provider = MockMapProvider::default();
        assert_eq!(
            RouteViewModel::recenter(&provider, &MapView::default()),
            Err(MapError::NotReady)
        );
    }

    #[test]
    fn rechazo_del_servicio_deja_estado_definido() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "first")));
        provider.respond(Err(MapError::NoRoute));

        fill(&state, "Bhopal", "Indore");
        pollster::block_on(RouteViewModel::calculate(&state, &provider));

        fill(&state, "Bhopal", "Atlantis");
        let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));

        assert_eq!(outcome, CalculateOutcome::Failed(MapError::NoRoute));
        assert_eq!(state.search_status(), SearchStatus::Failed(MapError::NoRoute));
        // La ruta anterior sigue, con sus textos y su overlay
        assert_eq!(state.distance_text(), "190 km");
        assert_eq!(*provider.overlay.borrow(), Some("first".to_string()));
    }

    #[test]
    fn nueva_busqueda_limpia_el_error() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Err(MapError::Offline));
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "ok")));
        fill(&state, "Bhopal", "Indore");

        pollster::block_on(RouteViewModel::calculate(&state, &provider));
        assert_eq!(state.search_error(), Some(MapError::Offline));

        pollster::block_on(RouteViewModel::calculate(&state, &provider));
        assert_eq!(state.search_error(), None);
        assert_eq!(state.duration_text(), "3 hours 30 mins");
    }

    #[test]
    fn respuesta_superada_por_otra_busqueda_se_descarta() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "old")));
        fill(&state, "Bhopal", "Indore");

        // Mientras la petición está en vuelo, el usuario lanza otra
        let newer = state.clone();
        *provider.during_route.borrow_mut() = Some(Box::new(move || {
            newer.begin_search();
        }));

        let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));
        assert_eq!(outcome, CalculateOutcome::Stale);
        assert!(!state.has_route());
        assert_eq!(*provider.overlay.borrow(), None);
        assert_eq!(provider.overlay_calls.get(), 0);
    }

    #[test]
    fn clear_durante_la_peticion_gana() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "late")));
        fill(&state, "Bhopal", "Indore");

        let cleared = state.clone();
        *provider.during_route.borrow_mut() = Some(Box::new(move || cleared.clear()));

        let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));
        assert_eq!(outcome, CalculateOutcome::Stale);
        assert!(!state.has_route());
        assert_eq!(state.origin(), "");
        assert_eq!(state.distance_text(), "");
    }

    #[test]
    fn calculate_sin_mapa_reporta_not_ready() {
        let provider = MockMapProvider::default();
        let state = ready_state();
        fill(&state, "Bhopal", "Indore");

        let outcome = pollster::block_on(RouteViewModel::calculate(&state, &provider));
        assert_eq!(outcome, CalculateOutcome::Failed(MapError::NotReady));
        assert!(provider.requests.borrow().is_empty());
    }

    #[test]
    fn initialize_pasa_a_ready_o_failed() {
        let provider = MockMapProvider::default();
        let state = RouteSearchState::new("EN");
        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = updates.clone();
        state.subscribe_to_changes(move |u| sink.borrow_mut().push(u));

        pollster::block_on(RouteViewModel::initialize(&state, &provider, &SdkConfig::default())).unwrap();
        assert_eq!(state.sdk_status(), SdkStatus::Ready);
        assert_eq!(*updates.borrow(), vec![UpdateType::FullRender]);

        let failing = MockMapProvider::default();
        *failing.sdk_result.borrow_mut() = Some(MapError::SdkTimeout(15000));
        let state = RouteSearchState::new("EN");
        let result = pollster::block_on(RouteViewModel::initialize(&state, &failing, &SdkConfig::default()));
        assert_eq!(result, Err(MapError::SdkTimeout(15000)));
        assert_eq!(state.sdk_status(), SdkStatus::Failed(MapError::SdkTimeout(15000)));
    }

    #[test]
    fn mount_map_redibuja_ruta_existente() {
        let provider = MockMapProvider::default();
        let state = RouteSearchState::new("EN");
        assert_eq!(
            RouteViewModel::mount_map(&state, &provider, "map", &MapView::default()),
            Err(MapError::NotReady)
        );

        state.set_sdk_status(SdkStatus::Ready);
        let ticket = state.begin_search();
        state.finish_search(ticket, Ok(route("190 km", "3 hours 30 mins", "kept")));

        RouteViewModel::mount_map(&state, &provider, "map", &MapView::default()).unwrap();
        assert!(provider.is_ready());
        assert_eq!(*provider.overlay.borrow(), Some("kept".to_string()));
    }

    #[test]
    fn mount_map_tras_render_completo_recrea_mapa_y_ruta() {
        let provider = MockMapProvider::default();
        let state = ready_state();
        let view = MapView::default();

        RouteViewModel::mount_map(&state, &provider, "map", &view).unwrap();
        provider.attach_autocomplete("route-origin", Box::new(|_| {})).unwrap();
        provider.respond(Ok(route("190 km", "3 hours 30 mins", "kept")));
        fill(&state, "Bhopal", "Indore");
        pollster::block_on(RouteViewModel::calculate(&state, &provider));

        // Mismo nodo: no se recrea nada
        RouteViewModel::mount_map(&state, &provider, "map", &view).unwrap();
        assert_eq!(provider.map_builds.get(), 1);
        assert_eq!(provider.autocompletes.get(), 1);

        // Nodo nuevo: mapa nuevo, overlay redibujado, autocompletados viejos fuera
        provider.replace_container();
        RouteViewModel::mount_map(&state, &provider, "map", &view).unwrap();
        assert_eq!(provider.map_builds.get(), 2);
        assert_eq!(provider.autocompletes.get(), 0);
        assert_eq!(*provider.overlay.borrow(), Some("kept".to_string()));
        assert_eq!(state.distance_text(), "190 km");

        RouteViewModel::recenter(&provider, &view).unwrap();
        assert_eq!(*provider.pans.borrow(), vec![view.center]);
    }

    #[test]
    fn clave_rechazada_tras_cargar_pasa_a_failed() {
        let provider = MockMapProvider::default();
        let state = RouteSearchState::new("EN");

        pollster::block_on(RouteViewModel::initialize(&state, &provider, &SdkConfig::default())).unwrap();
        assert_eq!(state.sdk_status(), SdkStatus::Ready);

        provider.reject_api_key();
        assert_eq!(state.sdk_status(), SdkStatus::Failed(MapError::AuthFailure));
        assert!(!MapError::AuthFailure.is_retryable());
    }

    #[test]
    fn clave_rechazada_durante_la_carga_no_llega_a_ready() {
        let provider = MockMapProvider::default();
        provider.auth_fails_on_load.set(true);
        let state = RouteSearchState::new("EN");

        let result = pollster::block_on(RouteViewModel::initialize(&state, &provider, &SdkConfig::default()));

        assert_eq!(result, Err(MapError::AuthFailure));
        assert_eq!(state.sdk_status(), SdkStatus::Failed(MapError::AuthFailure));
    }

    #[test]
    fn busqueda_notifica_estado_y_resumen() {
        let provider = MockMapProvider::ready();
        let state = ready_state();
        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = updates.clone();
        state.subscribe_to_changes(move |u| sink.borrow_mut().push(u));

        provider.respond(Ok(route("190 km", "3 hours 30 mins", "x")));
        fill(&state, "Bhopal", "Indore");
        pollster::block_on(RouteViewModel::calculate(&state, &provider));

        assert!(updates
            .borrow()
            .contains(&UpdateType::Incremental(IncrementalUpdate::RouteSummary)));
    }
}
