// ============================================================================
// POLLING - Refresco periódico de la lista de reportes
// ============================================================================
// Dos intervalos: el rápido recarga la lista, el lento verifica el token con
// `GET /me` y solo recarga si sigue siendo válido. Soltar el `Poller` cancela
// ambos (gloo_timers hace clearInterval en Drop).
// ============================================================================

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use crate::config::PollingConfig;
use crate::state::{IncrementalUpdate, UiState, UpdateType};
use crate::viewmodels::DashboardViewModel;

/// Con texto seleccionado no se refresca (el re-render perdería la selección)
pub fn should_poll(ui: &UiState) -> bool {
    ui.auto_update()
}

/// Al terminar la petición se vuelve a mirar: el usuario pudo seleccionar
/// texto mientras estaba en vuelo. El estado ya quedó actualizado y el
/// siguiente tick sin selección repinta.
pub fn repaint_after_poll(ui: &UiState) -> bool {
    should_poll(ui)
}

pub struct Poller {
    _fast: Interval,
    _slow: Interval,
}

impl Poller {
    pub fn start(viewmodel: DashboardViewModel, config: &PollingConfig) -> Self {
        log::info!(
            "⏱️ [POLL] Iniciando refresco cada {} ms / verificación cada {} ms",
            config.fast_interval_ms,
            config.slow_interval_ms
        );

        let fast_vm = viewmodel.clone();
        let fast = Interval::new(config.fast_interval_ms, move || {
            if !should_poll(&fast_vm.state().ui.borrow()) {
                return;
            }
            let vm = fast_vm.clone();
            spawn_local(async move {
                vm.load_reports().await;
                refresh_list(&vm);
            });
        });

        let slow = Interval::new(config.slow_interval_ms, move || {
            if !should_poll(&viewmodel.state().ui.borrow()) {
                return;
            }
            let vm = viewmodel.clone();
            spawn_local(async move {
                if vm.verify_session().await {
                    vm.load_reports().await;
                    refresh_list(&vm);
                }
            });
        });

        Self {
            _fast: fast,
            _slow: slow,
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        log::info!("⏹️ [POLL] Refresco detenido");
    }
}

fn refresh_list(vm: &DashboardViewModel) {
    if !repaint_after_poll(&vm.state().ui.borrow()) {
        log::info!("⏸️ [POLL] Selección activa, repintado pospuesto");
        return;
    }
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::ReportList));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UiAction;

    #[test]
    fn selection_pauses_both_intervals() {
        let mut ui = UiState::new();
        assert!(should_poll(&ui));
        ui.apply(UiAction::SelectionChanged { has_selection: true });
        assert!(!should_poll(&ui));
        ui.apply(UiAction::SelectionChanged { has_selection: false });
        assert!(should_poll(&ui));
    }

    #[test]
    fn selection_made_while_request_is_in_flight_defers_repaint() {
        let mut ui = UiState::new();
        assert!(should_poll(&ui));

        ui.apply(UiAction::SelectionChanged { has_selection: true });
        assert!(!repaint_after_poll(&ui));

        ui.apply(UiAction::SelectionChanged { has_selection: false });
        assert!(repaint_after_poll(&ui));
    }

    #[test]
    fn open_modal_does_not_pause_polling() {
        let mut ui = UiState::new();
        ui.apply(UiAction::OpenCreateReport);
        assert!(should_poll(&ui));
    }
}
