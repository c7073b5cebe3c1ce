// ============================================================================
// LOADING VIEW - Placeholder mientras carga el SDK y panel de error
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::maps::MapError;
use crate::utils::t;
use crate::views::RouteActions;

/// Skeleton de texto (3 líneas) mientras el SDK no está listo
pub fn render_loading(lang: &str) -> Result<Element, JsValue> {
    let mut skeleton = ElementBuilder::new("div")?
        .class("skeleton-text")
        .attr("aria-busy", "true")?
        .attr("aria-label", &t("loading_map", lang))?;
    for _ in 0..3 {
        skeleton = skeleton.child(ElementBuilder::new("div")?.class("skeleton-line").build())?;
    }
    Ok(skeleton.build())
}

/// Error visible si el SDK no carga, con botón de reintento
pub fn render_sdk_error(error: &MapError, lang: &str, actions: &RouteActions) -> Result<Element, JsValue> {
    let mut panel = ElementBuilder::new("div")?
        .class("sdk-error")
        .attr("role", "alert")?
        .child(ElementBuilder::new("p")?.class("sdk-error-title").text(&t(error.i18n_key(), lang)).build())?
        .child(ElementBuilder::new("p")?.class("sdk-error-detail").text(&error.to_string()).build())?;

    if error.is_retryable() {
        let retry = ElementBuilder::new("button")?
            .class("btn btn-blue")
            .attr("type", "button")?
            .text(&t("retry", lang))
            .build();
        let on_retry = actions.on_retry.clone();
        on_click(&retry, move |_| on_retry())?;
        panel = panel.child(retry)?;
    }

    Ok(panel.build())
}
