// ============================================================================
// REPORTES APP - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones que construyen DOM y conectan eventos
// - ViewModels: flujos de reportes, sesión y polling
// - Services: comunicación con la API (gateway con token)
// - State: Rc<RefCell> + reducer puro de modales
// - Models: estructuras compartidas con el backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::state::UpdateType;

// Instancia global de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Reportes App - Rust Puro + MVVM (API: {})", CONFIG.api_url);

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Re-render completo
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualiza la app con el tipo de update indicado.
/// Llamar siempre fuera de un borrow de APP (desde eventos, timers o futures).
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| match update_type {
        UpdateType::Incremental(inc_type) => {
            log::debug!("🔄 [UPDATE] Actualización incremental: {:?}", inc_type);
            match app_cell.try_borrow() {
                Ok(app) => {
                    if let Some(app) = app.as_ref() {
                        if let Err(e) = app.update_incremental(inc_type) {
                            log::error!("❌ [UPDATE] Error en actualización incremental: {:?}", e);
                        }
                    }
                }
                Err(_) => log::warn!("⚠️ [UPDATE] App ocupada, se omite {:?}", inc_type),
            }
        }
        UpdateType::FullRender => {
            log::info!("🔄 [RERENDER] Re-render completo");
            match app_cell.try_borrow_mut() {
                Ok(mut app) => match app.as_mut() {
                    Some(app) => {
                        if let Err(e) = app.render() {
                            log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                        }
                    }
                    None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
                },
                Err(_) => log::warn!("⚠️ [RERENDER] App ocupada, re-render omitido"),
            }
        }
    });
}

/// Re-render completo llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
