// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{CurrentUser, Report};
use crate::state::auth_state::AuthState;
use crate::state::ui_state::{Transition, UiAction, UiState};

/// Tipo de actualización del DOM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Solo una parte de la pantalla
    Incremental(IncrementalUpdate),
    /// Login/logout o cambio de sección
    FullRender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Contenido de `#reports-list`
    ReportList,
    /// Visibilidad de modales y clase `modal-open` del body
    Modals,
    /// Etiqueta de usuario en el header
    Header,
}

/// Sección visible del dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Contact,
}

/// Último resultado de la carga de reportes
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ReportsState {
    #[default]
    Loading,
    Loaded(Vec<Report>),
    Failed,
}

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub ui: Rc<RefCell<UiState>>,
    pub reports: Rc<RefCell<ReportsState>>,
    pub current_user: Rc<RefCell<Option<CurrentUser>>>,
    pub section: Rc<RefCell<Section>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            auth: AuthState::new(),
            ui: Rc::new(RefCell::new(UiState::new())),
            reports: Rc::new(RefCell::new(ReportsState::Loading)),
            current_user: Rc::new(RefCell::new(None)),
            section: Rc::new(RefCell::new(Section::Home)),
        }
    }

    /// Despacha al reducer de UI (el borrow termina antes de devolver)
    pub fn dispatch(&self, action: UiAction) -> Transition {
        log::info!("🎛️ [UI] {}", action_name(&action));
        self.ui.borrow_mut().apply(action)
    }

    pub fn set_reports(&self, reports: ReportsState) {
        *self.reports.borrow_mut() = reports;
    }

    pub fn set_current_user(&self, user: Option<CurrentUser>) {
        *self.current_user.borrow_mut() = user;
    }

    pub fn user_role(&self) -> Option<String> {
        self.current_user.borrow().as_ref().map(|u| u.rol.clone())
    }

    pub fn set_section(&self, section: Section) {
        *self.section.borrow_mut() = section;
    }

    pub fn section(&self) -> Section {
        *self.section.borrow()
    }

    /// Vuelve al estado de "sin sesión": UI, reportes y usuario
    pub fn reset_session(&self) -> Transition {
        let transition = self.dispatch(UiAction::ResetSession);
        self.set_reports(ReportsState::Loading);
        self.set_current_user(None);
        self.set_section(Section::Home);
        transition
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Nombre de la acción sin el payload (no loguear datos del formulario)
fn action_name(action: &UiAction) -> &'static str {
    match action {
        UiAction::OpenCreateReport => "OpenCreateReport",
        UiAction::OpenEditReport { .. } => "OpenEditReport",
        UiAction::OpenDetailForm { .. } => "OpenDetailForm",
        UiAction::OpenCompletedForm { .. } => "OpenCompletedForm",
        UiAction::ExistingFormLoaded { .. } => "ExistingFormLoaded",
        UiAction::CompletedFormUnavailable { .. } => "CompletedFormUnavailable",
        UiAction::RequestCancel { .. } => "RequestCancel",
        UiAction::ConfirmCancel => "ConfirmCancel",
        UiAction::OpenHelp => "OpenHelp",
        UiAction::Close => "Close",
        UiAction::Finish { .. } => "Finish",
        UiAction::SelectionChanged { .. } => "SelectionChanged",
        UiAction::ResetSession => "ResetSession",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportStatus;
    use crate::state::ui_state::Modal;

    #[test]
    fn reset_session_drops_reports_user_and_modal() {
        let state = AppState::new();
        state.dispatch(UiAction::RequestCancel { report_id: 3 });
        state.set_reports(ReportsState::Loaded(vec![Report {
            id: 3,
            descripcion: "x".to_string(),
            estado: ReportStatus::Pendiente,
            fecha: String::new(),
            hora: None,
            razon: None,
        }]));
        state.set_current_user(Some(CurrentUser::default()));
        state.set_section(Section::Contact);

        state.reset_session();

        assert_eq!(state.ui.borrow().modal(), Modal::Closed);
        assert_eq!(state.ui.borrow().active_report_id(), None);
        assert_eq!(*state.reports.borrow(), ReportsState::Loading);
        assert!(state.current_user.borrow().is_none());
        assert_eq!(state.section(), Section::Home);
    }

    #[test]
    fn clones_share_the_same_state() {
        let state = AppState::new();
        let other = state.clone();
        other.dispatch(UiAction::OpenHelp);
        assert_eq!(state.ui.borrow().modal(), Modal::Help);
    }
}
