// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Dueña del estado, del ViewModel del dashboard y del Poller. El Poller solo
// existe mientras hay sesión: al volver al login se suelta y los intervalos
// se cancelan.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, on_document_keydown, on_selection_change, set_inner_html};
use crate::services::{LocalTokenStore, TokenStore};
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::viewmodels::{DashboardViewModel, Poller};
use crate::views::{actions, render_app, sync_modals, update_header, update_report_list};

pub struct App {
    state: AppState,
    vm: DashboardViewModel,
    poller: Option<Poller>,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación. Un token guardado salta la pantalla de login.
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();
        if LocalTokenStore::new().load().is_some() {
            log::info!("💾 [APP] Token encontrado en storage, entrando al dashboard");
            state.auth.start_session();
        }

        let vm = DashboardViewModel::new(state.clone());

        // Listeners globales: se registran una sola vez
        {
            let vm = vm.clone();
            on_document_keydown(move |e| {
                if vm.state().auth.get_logged_in() {
                    actions::handle_keydown(&vm, &e);
                }
            })?;
        }
        {
            let vm = vm.clone();
            on_selection_change(move || actions::handle_selection_change(&vm))?;
        }

        Ok(Self {
            state,
            vm,
            poller: None,
            root: Some(root),
        })
    }

    /// Re-render completo (login, logout, cambio de vista de auth)
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::info!("🎬 [APP] App::render() llamado");

        if self.state.auth.get_logged_in() {
            self.enter_dashboard();
        } else if self.poller.take().is_some() {
            log::info!("🚪 [APP] Fuera del dashboard, polling detenido");
        }

        if let Some(root) = &self.root {
            set_inner_html(root, "");
            let app_view = render_app(&self.vm)?;
            append_child(root, &app_view)?;
        }
        sync_modals(&self.state.ui.borrow())
    }

    /// Arranca el polling (si no corre ya) y lanza la carga inicial
    fn enter_dashboard(&mut self) {
        if self.poller.is_none() {
            self.poller = Some(Poller::start(self.vm.clone(), &CONFIG.polling));
        }

        let vm = self.vm.clone();
        spawn_local(async move {
            if vm.load_current_user().await.is_some() {
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
            }
        });

        let vm = self.vm.clone();
        spawn_local(async move {
            vm.load_reports().await;
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::ReportList));
        });
    }

    /// Actualización incremental del DOM (solo elementos específicos)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        if !self.state.auth.get_logged_in() {
            return Ok(());
        }
        match update_type {
            IncrementalUpdate::ReportList => update_report_list(&self.vm),
            IncrementalUpdate::Modals => sync_modals(&self.state.ui.borrow()),
            IncrementalUpdate::Header => update_header(&self.state),
        }
    }
}
