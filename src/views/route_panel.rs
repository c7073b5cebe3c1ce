// ============================================================================
// ROUTE PANEL - Inputs, botones y textos de distancia/duración
// ============================================================================
// Se construye una vez por render completo; después solo se actualiza con
// las funciones update_* para no perder el foco ni el autocompletado.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    get_element_by_id, get_input_by_id, on_click, on_input, set_text_by_id,
    toggle_class, ElementBuilder,
};
use crate::state::RouteSearchState;
use crate::utils::*;
use crate::views::RouteActions;

/// Panel de control completo
pub fn render_route_panel<D: Clone>(
    state: &RouteSearchState<D>,
    actions: &RouteActions,
) -> Result<Element, JsValue> {
    let lang = state.language.borrow().clone();

    // Fila 1: inputs + Calculate / Clear
    let origin = render_input(ORIGIN_INPUT_ID, &t("origin", &lang), &state.origin())?;
    let on_origin = actions.on_origin.clone();
    on_input(&origin, move |value| on_origin(value))?;

    let destination = render_input(DESTINATION_INPUT_ID, &t("destination", &lang), &state.destination())?;
    let on_destination = actions.on_destination.clone();
    on_input(&destination, move |value| on_destination(value))?;

    let calculate = render_button(CALCULATE_BUTTON_ID, "btn btn-blue", &t("calculate", &lang))?;
    let on_calculate = actions.on_calculate.clone();
    on_click(&calculate, move |_| on_calculate())?;

    let clear = render_button(CLEAR_BUTTON_ID, "btn btn-red", &t("clear", &lang))?;
    let on_clear = actions.on_clear.clone();
    on_click(&clear, move |_| on_clear())?;

    let buttons = ElementBuilder::new("div")?
        .class("button-group")
        .child(calculate)?
        .child(clear)?
        .build();

    let inputs_row = ElementBuilder::new("div")?
        .class("panel-row")
        .child(origin.into())?
        .child(destination.into())?
        .child(buttons)?
        .build();

    // Fila 2: Distance / Duration / Re-center
    let distance = ElementBuilder::new("span")?
        .id(DISTANCE_TEXT_ID)?
        .class("route-value")
        .text(&state.distance_text())
        .build();
    let duration = ElementBuilder::new("span")?
        .id(DURATION_TEXT_ID)?
        .class("route-value")
        .text(&state.duration_text())
        .build();

    let recenter = render_button(RECENTER_BUTTON_ID, "btn btn-yellow", &t("recenter", &lang))?;
    let on_recenter = actions.on_recenter.clone();
    on_click(&recenter, move |_| on_recenter())?;

    let summary_row = ElementBuilder::new("div")?
        .class("panel-row panel-row-summary")
        .child(labelled(&t("distance", &lang), distance)?)?
        .child(labelled(&t("duration", &lang), duration)?)?
        .child(recenter)?
        .build();

    let error_line = ElementBuilder::new("p")?
        .id(ERROR_TEXT_ID)?
        .class("route-error hidden")
        .attr("role", "alert")?
        .build();

    let panel = ElementBuilder::new("div")?
        .class("route-panel")
        .child(inputs_row)?
        .child(summary_row)?
        .child(error_line)?
        .build();

    // Estado inicial de los elementos dinámicos
    apply_search_status(state, &panel)?;

    Ok(panel)
}

fn render_input(id: &str, placeholder: &str, value: &str) -> Result<HtmlInputElement, JsValue> {
    let input: HtmlInputElement = ElementBuilder::new("input")?
        .id(id)?
        .class("route-input")
        .attr("type", "text")?
        .attr("placeholder", placeholder)?
        .attr("aria-label", placeholder)?
        .build()
        .dyn_into()?;
    input.set_value(value);
    Ok(input)
}

fn render_button(id: &str, class: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .id(id)?
        .class(class)
        .attr("type", "button")?
        .text(label)
        .build())
}

/// "Distance: <span>"
fn labelled(label: &str, value: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?
        .class("route-label")
        .text(&format!("{}: ", label))
        .child(value)?
        .build())
}

/// Botón ocupado + línea de error, buscando dentro de `root`
/// (el panel todavía no está en el documento durante el render)
fn apply_search_status<D: Clone>(state: &RouteSearchState<D>, root: &Element) -> Result<(), JsValue> {
    let lang = state.language.borrow().clone();

    if let Some(button) = root.query_selector(&format!("#{}", CALCULATE_BUTTON_ID))? {
        let label = if state.is_searching() { "calculating" } else { "calculate" };
        button.set_text_content(Some(&t(label, &lang)));
        button.set_attribute("aria-busy", &state.is_searching().to_string())?;
        toggle_class(&button, "busy", state.is_searching())?;
    }

    if let Some(error_line) = root.query_selector(&format!("#{}", ERROR_TEXT_ID))? {
        match state.search_error() {
            Some(error) => {
                error_line.set_text_content(Some(&t(error.i18n_key(), &lang)));
                toggle_class(&error_line, "hidden", false)?;
            }
            None => {
                error_line.set_text_content(Some(""));
                toggle_class(&error_line, "hidden", true)?;
            }
        }
    }
    Ok(())
}

// ============================================================================
// ACTUALIZACIONES INCREMENTALES
// ============================================================================

/// Textos de distancia y duración
pub fn update_route_summary<D: Clone>(state: &RouteSearchState<D>) -> Result<(), JsValue> {
    set_text_by_id(DISTANCE_TEXT_ID, &state.distance_text());
    set_text_by_id(DURATION_TEXT_ID, &state.duration_text());
    Ok(())
}

/// Botón Calculate ocupado y línea de error
pub fn update_search_status<D: Clone>(state: &RouteSearchState<D>) -> Result<(), JsValue> {
    let panel = get_element_by_id(CALCULATE_BUTTON_ID)
        .and_then(|button| button.closest(".route-panel").ok().flatten())
        .ok_or_else(|| JsValue::from_str("Route panel not found, needs full render"))?;
    apply_search_status(state, &panel)
}

/// Valores mostrados en los inputs (tras Clear)
pub fn update_inputs<D: Clone>(state: &RouteSearchState<D>) -> Result<(), JsValue> {
    if let Some(input) = get_input_by_id(ORIGIN_INPUT_ID) {
        input.set_value(&state.origin());
    }
    if let Some(input) = get_input_by_id(DESTINATION_INPUT_ID) {
        input.set_value(&state.destination());
    }
    Ok(())
}
