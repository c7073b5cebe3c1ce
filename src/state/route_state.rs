// ============================================================================
// ROUTE SEARCH STATE - Estado de la vista de búsqueda de rutas
// ============================================================================
// Rc<RefCell> + subscribers. Clonar comparte el mismo estado.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::maps::MapError;
use crate::models::{RouteRequest, RouteResult};
use crate::state::{IncrementalUpdate, UpdateType};

/// Estado de carga del SDK de mapas
#[derive(Clone, Debug, PartialEq)]
pub enum SdkStatus {
    Loading,
    Ready,
    Failed(MapError),
}

/// Estado de la petición de ruta
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStatus {
    Idle,
    Searching,
    Failed(MapError),
}

/// Número de secuencia de una petición de ruta
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Resultado de aplicar la respuesta de una petición
#[derive(Clone, Debug, PartialEq)]
pub enum FinishOutcome {
    /// Ruta guardada
    Applied,
    /// La respuesta no es de la última petición: descartada
    Stale,
    /// El servicio rechazó la petición; la ruta anterior se conserva
    Failed(MapError),
}

type Subscriber = Rc<dyn Fn(UpdateType)>;

/// Estado de la vista. `D` es el objeto de direcciones del proveedor.
pub struct RouteSearchState<D> {
    pub sdk_status: Rc<RefCell<SdkStatus>>,
    pub origin: Rc<RefCell<String>>,
    pub destination: Rc<RefCell<String>>,
    pub search: Rc<RefCell<SearchStatus>>,
    pub language: Rc<RefCell<String>>,
    route: Rc<RefCell<Option<RouteResult<D>>>>,
    latest_ticket: Rc<Cell<u64>>,
    change_subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<D> Clone for RouteSearchState<D> {
    fn clone(&self) -> Self {
        Self {
            sdk_status: self.sdk_status.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            search: self.search.clone(),
            language: self.language.clone(),
            route: self.route.clone(),
            latest_ticket: self.latest_ticket.clone(),
            change_subscribers: self.change_subscribers.clone(),
        }
    }
}

impl<D: Clone> RouteSearchState<D> {
    pub fn new(language: &str) -> Self {
        Self {
            sdk_status: Rc::new(RefCell::new(SdkStatus::Loading)),
            origin: Rc::new(RefCell::new(String::new())),
            destination: Rc::new(RefCell::new(String::new())),
            search: Rc::new(RefCell::new(SearchStatus::Idle)),
            language: Rc::new(RefCell::new(language.to_string())),
            route: Rc::new(RefCell::new(None)),
            latest_ticket: Rc::new(Cell::new(0)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(UpdateType) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self, update: UpdateType) {
        // Copia de la lista: un subscriber puede suscribir a otro
        let subscribers: Vec<Subscriber> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback(update.clone());
        }
    }

    fn notify_incremental(&self, update: IncrementalUpdate) {
        self.notify(UpdateType::Incremental(update));
    }

    // ---------------------------------------------------------------- SDK

    pub fn sdk_status(&self) -> SdkStatus {
        self.sdk_status.borrow().clone()
    }

    pub fn set_sdk_status(&self, status: SdkStatus) {
        if *self.sdk_status.borrow() == status {
            return;
        }
        log::debug!("🔄 [STATE] SDK: {:?}", status);
        *self.sdk_status.borrow_mut() = status;
        self.notify(UpdateType::FullRender);
    }

    pub fn is_sdk_ready(&self) -> bool {
        matches!(*self.sdk_status.borrow(), SdkStatus::Ready)
    }

    // ------------------------------------------------------------- Inputs

    /// Texto del input de origen (el input ya lo muestra, no se re-renderiza)
    pub fn set_origin(&self, text: String) {
        *self.origin.borrow_mut() = text;
    }

    pub fn set_destination(&self, text: String) {
        *self.destination.borrow_mut() = text;
    }

    pub fn origin(&self) -> String {
        self.origin.borrow().clone()
    }

    pub fn destination(&self) -> String {
        self.destination.borrow().clone()
    }

    /// Petición en coche con los textos actuales; `None` si alguno está vacío
    pub fn route_request(&self) -> Option<RouteRequest> {
        RouteRequest::driving(&self.origin.borrow(), &self.destination.borrow())
    }

    // -------------------------------------------------------------- Route

    pub fn has_route(&self) -> bool {
        self.route.borrow().is_some()
    }

    /// Distancia del primer tramo de la primera alternativa; vacío sin ruta
    pub fn distance_text(&self) -> String {
        self.route
            .borrow()
            .as_ref()
            .map(|r| r.distance_text().to_string())
            .unwrap_or_default()
    }

    /// Duración del primer tramo de la primera alternativa; vacío sin ruta
    pub fn duration_text(&self) -> String {
        self.route
            .borrow()
            .as_ref()
            .map(|r| r.duration_text().to_string())
            .unwrap_or_default()
    }

    /// Objeto de direcciones para el overlay
    pub fn route_directions(&self) -> Option<D> {
        self.route.borrow().as_ref().map(|r| r.directions().clone())
    }

    // ------------------------------------------------------------- Search

    pub fn search_status(&self) -> SearchStatus {
        self.search.borrow().clone()
    }

    pub fn is_searching(&self) -> bool {
        matches!(*self.search.borrow(), SearchStatus::Searching)
    }

    /// Error visible de la última búsqueda
    pub fn search_error(&self) -> Option<MapError> {
        match &*self.search.borrow() {
            SearchStatus::Failed(error) => Some(error.clone()),
            _ => None,
        }
    }

    /// Registrar una nueva petición. Cualquier respuesta anterior queda obsoleta.
    pub fn begin_search(&self) -> SearchTicket {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);
        *self.search.borrow_mut() = SearchStatus::Searching;
        log::debug!("🔎 [STATE] Búsqueda #{} iniciada", ticket);
        self.notify_incremental(IncrementalUpdate::SearchStatus);
        SearchTicket(ticket)
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest_ticket.get()
    }

    /// Aplicar la respuesta de una petición si sigue siendo la última
    pub fn finish_search(
        &self,
        ticket: SearchTicket,
        result: Result<RouteResult<D>, MapError>,
    ) -> FinishOutcome {
        if !self.is_latest(ticket) {
            log::warn!(
                "⚠️ [STATE] Respuesta de búsqueda #{} descartada (última: #{})",
                ticket.0,
                self.latest_ticket.get()
            );
            return FinishOutcome::Stale;
        }

        match result {
            Ok(route) => {
                log::info!(
                    "✅ [STATE] Ruta #{}: {} / {}",
                    ticket.0,
                    route.distance_text(),
                    route.duration_text()
                );
                *self.route.borrow_mut() = Some(route);
                *self.search.borrow_mut() = SearchStatus::Idle;
                self.notify_incremental(IncrementalUpdate::RouteSummary);
                self.notify_incremental(IncrementalUpdate::SearchStatus);
                FinishOutcome::Applied
            }
            Err(error) => {
                log::error!("❌ [STATE] Búsqueda #{} fallida: {}", ticket.0, error);
                *self.search.borrow_mut() = SearchStatus::Failed(error.clone());
                self.notify_incremental(IncrementalUpdate::SearchStatus);
                FinishOutcome::Failed(error)
            }
        }
    }

    /// Limpiar ruta, textos, inputs y error. Invalida peticiones en vuelo.
    pub fn clear(&self) {
        self.latest_ticket.set(self.latest_ticket.get() + 1);
        *self.route.borrow_mut() = None;
        self.origin.borrow_mut().clear();
        self.destination.borrow_mut().clear();
        *self.search.borrow_mut() = SearchStatus::Idle;
        log::debug!("🧹 [STATE] Estado de ruta limpiado");
        self.notify_incremental(IncrementalUpdate::Inputs);
        self.notify_incremental(IncrementalUpdate::RouteSummary);
        self.notify_incremental(IncrementalUpdate::SearchStatus);
    }
}
