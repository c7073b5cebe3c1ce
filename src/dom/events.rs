// ============================================================================
// EVENT HANDLING - Helpers de listeners
// ============================================================================
// Los closures se olvidan (forget): los elementos del panel solo se recrean
// en un render completo, que ocurre pocas veces por sesión.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, MouseEvent};

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para input: el handler recibe el valor actual del input
pub fn on_input<F>(input: &HtmlInputElement, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let source = input.clone();
    let closure = Closure::wrap(Box::new(move |_e: Event| {
        handler(source.value());
    }) as Box<dyn FnMut(Event)>);
    input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
