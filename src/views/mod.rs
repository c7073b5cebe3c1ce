// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica)
// ============================================================================

pub mod actions;
pub mod loading;
pub mod route_panel;

pub use actions::RouteActions;
pub use loading::{render_loading, render_sdk_error};
pub use route_panel::{render_route_panel, update_inputs, update_route_summary, update_search_status};

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::{RouteSearchState, SdkStatus};
use crate::utils::MAP_CONTAINER_ID;

/// Renderizar la vista completa según el estado del SDK:
/// Loading → skeleton, Failed → error visible, Ready → mapa + panel
pub fn render_app<D: Clone>(state: &RouteSearchState<D>, actions: &RouteActions) -> Result<Element, JsValue> {
    let lang = state.language.borrow().clone();

    match state.sdk_status() {
        SdkStatus::Loading => render_loading(&lang),
        SdkStatus::Failed(error) => render_sdk_error(&error, &lang, actions),
        SdkStatus::Ready => {
            // El mapa ocupa todo el viewport; el panel flota encima
            let map_layer = ElementBuilder::new("div")?
                .class("map-layer")
                .child(ElementBuilder::new("div")?.id(MAP_CONTAINER_ID)?.class("map-container").build())?
                .build();

            let panel_layer = ElementBuilder::new("div")?
                .class("panel-layer")
                .child(render_route_panel(state, actions)?)?
                .build();

            Ok(ElementBuilder::new("div")?
                .class("route-app")
                .child(map_layer)?
                .child(panel_layer)?
                .build())
        }
    }
}
