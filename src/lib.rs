// ============================================================================
// ROUTE SEARCH PWA - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Lógica UI (calculate / clear / re-center)
// - Services: SOLO carga del SDK externo
// - State: State Management con Rc<RefCell>
// - Maps: Interfaz del proveedor de mapas + implementación Google Maps
// ============================================================================

pub mod config;
pub mod maps;
pub mod models;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod services;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;
    use crate::state::UpdateType;

    // Variable estática global para mantener la instancia de App
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        // Inicializar logging
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        log::info!("🚀 Route Search - Rust + WASM ({})", CONFIG.environment);

        // Crear y renderizar app (placeholder de carga)
        let mut app = App::new()?;
        app.render()?;
        app.start();

        // Guardar app en variable global
        APP.with(|app_cell| {
            *app_cell.borrow_mut() = Some(app);
        });

        Ok(())
    }

    /// Función pública para re-renderizar la app (re-render completo)
    pub fn rerender_app() {
        rerender_app_with_type(UpdateType::FullRender);
    }

    /// Función pública para actualizar la app con tipo específico
    pub fn rerender_app_with_type(update_type: UpdateType) {
        APP.with(|app_cell| match update_type {
            UpdateType::Incremental(inc_type) => {
                // Primero intentamos actualización incremental
                let needs_full_render = match app_cell.borrow().as_ref() {
                    Some(app) => match app.update_incremental(inc_type) {
                        Ok(()) => false,
                        Err(e) => {
                            log::warn!("⚠️ [UPDATE] {:?} falló ({:?}), re-render completo", inc_type, e);
                            true
                        }
                    },
                    None => {
                        log::warn!("⚠️ [UPDATE] App no está inicializada");
                        false
                    }
                };

                if needs_full_render {
                    if let Some(app) = app_cell.borrow_mut().as_mut() {
                        if let Err(e) = app.render() {
                            log::error!("❌ Error re-renderizando: {:?}", e);
                        }
                    }
                }
            }
            UpdateType::FullRender => {
                log::debug!("🔄 [RERENDER] Re-render completo");
                match app_cell.borrow_mut().as_mut() {
                    Some(app) => {
                        if let Err(e) = app.render() {
                            log::error!("❌ Error re-renderizando: {:?}", e);
                        }
                    }
                    None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
                }
            }
        });
    }

    /// Función pública WASM para re-renderizar la app (llamable desde JavaScript)
    #[wasm_bindgen]
    pub fn rerender_app_wasm() {
        rerender_app();
    }
}
