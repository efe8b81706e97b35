// ============================================================================
// DASHBOARD VIEWMODEL - Flujos de reportes, formularios y cancelación
// ============================================================================
// Orquesta ReportService + reducer de UI. No toca el DOM: las vistas leen
// el resultado y el estado para repintar.
// ============================================================================

use std::rc::Rc;

use thiserror::Error;

use crate::models::detail_form::normalize_birth_date;
use crate::models::{CurrentUser, DetailForm, DetailFormInput, Report, ReportStatus, ValidationError};
use crate::services::auth_service::{fetch_current_user, verify_session};
use crate::services::{AuthGateway, LocalTokenStore, ReportService, ServiceError};
use crate::state::{AppState, FormMode, Modal, ModalTicket, ReportModalMode, ReportsState, UiAction, UiState};
use crate::viewmodels::session_viewmodel::expire_session;

/// Motivos para no enviar el formulario detallado (antes de tocar la red)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("Este formulario ya ha sido enviado y no puede ser modificado")]
    AlreadySubmitted,

    #[error("No se ha seleccionado un reporte válido")]
    NoActiveReport,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailSubmitError {
    #[error(transparent)]
    Rejected(#[from] SubmitRejection),

    #[error("Error al enviar el formulario detallado: {0}")]
    StatusChange(ServiceError),

    /// El paso 1 (estado Completado) ya se aplicó y no se revierte
    #[error("El reporte se marcó como Completado pero el formulario no se guardó: {0}")]
    FormNotStored(ServiceError),
}

impl DetailSubmitError {
    pub fn is_silent(&self) -> bool {
        match self {
            DetailSubmitError::Rejected(_) => false,
            DetailSubmitError::StatusChange(e) | DetailSubmitError::FormNotStored(e) => e.is_silent(),
        }
    }
}

/// Verifica que el formulario abierto se pueda enviar. Si ya existe un
/// formulario guardado no se arma ninguna petición.
pub fn ensure_submittable(ui: &UiState, input: &DetailFormInput) -> Result<i64, SubmitRejection> {
    if ui.existing_form().is_some() || ui.is_read_only() {
        return Err(SubmitRejection::AlreadySubmitted);
    }
    if !matches!(ui.modal(), Modal::DetailForm { mode: FormMode::Editable }) {
        return Err(SubmitRejection::NoActiveReport);
    }
    let report_id = ui.active_report_id().ok_or(SubmitRejection::NoActiveReport)?;
    input.validate()?;
    normalize_birth_date(&input.fecha_nacimiento)?;
    Ok(report_id)
}

/// Qué hace el submit del modal de reporte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportSave {
    Create,
    Update(i64),
}

impl ReportSave {
    pub fn from_ui(ui: &UiState) -> Option<Self> {
        match (ui.modal(), ui.active_report_id()) {
            (Modal::Report { mode: ReportModalMode::Create }, _) => Some(ReportSave::Create),
            (Modal::Report { mode: ReportModalMode::Edit }, Some(id)) => Some(ReportSave::Update(id)),
            _ => None,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ReportSave::Create => "Reporte enviado con éxito",
            ReportSave::Update(_) => "Reporte actualizado con éxito",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            ReportSave::Create => "Error al enviar el reporte.",
            ReportSave::Update(_) => "Error al actualizar el reporte.",
        }
    }
}

#[derive(Clone)]
pub struct DashboardViewModel {
    state: AppState,
    gateway: Rc<AuthGateway>,
    reports: ReportService,
}

/// Reporte a cancelar y ticket del modal que lo pidió
fn cancel_target(ui: &UiState) -> Result<(i64, Option<ModalTicket>), ServiceError> {
    match ui.active_report_id() {
        Some(report_id) => Ok((report_id, ui.ticket())),
        None => {
            log::warn!("⚠️ [REPORTS] No hay reporte activo para cancelar");
            Err(ServiceError::NoActiveReport)
        }
    }
}

impl DashboardViewModel {
    /// El gateway cierra la sesión de este estado ante 401/403
    pub fn new(state: AppState) -> Self {
        let teardown_state = state.clone();
        let gateway = Rc::new(AuthGateway::new(
            LocalTokenStore::new(),
            state.auth.guard.clone(),
            Rc::new(move || expire_session(&teardown_state)),
        ));
        Self {
            reports: ReportService::new(gateway.clone()),
            gateway,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Recarga la lista. Con sesión cerrada no toca el estado.
    pub async fn load_reports(&self) {
        match self.reports.list().await {
            Ok(reports) => self.state.set_reports(ReportsState::Loaded(reports)),
            Err(e) if e.is_silent() => {}
            Err(e) => {
                log::error!("❌ [REPORTS] Error al cargar los reportes: {}", e);
                self.state.set_reports(ReportsState::Failed);
            }
        }
    }

    pub async fn load_current_user(&self) -> Option<CurrentUser> {
        match fetch_current_user(&self.gateway).await {
            Ok(user) => {
                log::info!("👤 [AUTH] Usuario {} ({})", user.correo, user.rol);
                self.state.set_current_user(Some(user.clone()));
                Some(user)
            }
            Err(e) if e.is_silent() => None,
            Err(e) => {
                log::error!("❌ [AUTH] Error al obtener información del usuario: {}", e);
                None
            }
        }
    }

    pub async fn verify_session(&self) -> bool {
        verify_session(&self.gateway).await
    }

    /// Crea o edita según el modo del modal abierto
    pub async fn save_report(&self, descripcion: &str) -> Result<(ReportSave, Option<ModalTicket>), ServiceError> {
        let (save, ticket) = {
            let ui = self.state.ui.borrow();
            (ReportSave::from_ui(&ui), ui.ticket())
        };
        let save = save.unwrap_or(ReportSave::Create);

        match save {
            ReportSave::Create => self.reports.create(descripcion).await?,
            ReportSave::Update(id) => self.reports.update(id, descripcion).await?,
        };
        self.load_reports().await;
        Ok((save, ticket))
    }

    pub async fn fetch_report(&self, id: i64) -> Result<Report, ServiceError> {
        self.reports.fetch_one(id).await
    }

    /// Busca un formulario previo; si existe el modal pasa a solo lectura
    pub async fn lookup_existing_form(&self, ticket: ModalTicket, id: i64) {
        let form = match self.reports.get_detail_form(id).await {
            Ok(form) => form,
            Err(e) if e.is_silent() => return,
            Err(e) => {
                log::info!("📭 [REPORTS] No existe formulario previo para el reporte {}: {}", id, e);
                None
            }
        };
        self.state.dispatch(UiAction::ExistingFormLoaded { ticket, form });
    }

    /// Formulario de un reporte completado. Si falla, el modal se cierra.
    pub async fn load_completed_form(&self, ticket: ModalTicket, id: i64) -> Result<(), ServiceError> {
        match self.reports.get_completed_form(id).await {
            Ok(form) => {
                self.state.dispatch(UiAction::ExistingFormLoaded {
                    ticket,
                    form: Some(form),
                });
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [REPORTS] Error al cargar el formulario completado {}: {}", id, e);
                self.state.dispatch(UiAction::CompletedFormUnavailable { ticket });
                Err(e)
            }
        }
    }

    /// Envío en dos pasos: estado Completado y luego el formulario.
    /// Si el segundo paso falla no hay rollback.
    pub async fn submit_detail_form(&self, input: DetailFormInput) -> Result<Option<ModalTicket>, DetailSubmitError> {
        let (report_id, ticket) = {
            let ui = self.state.ui.borrow();
            (ensure_submittable(&ui, &input)?, ui.ticket())
        };

        let codigo = fetch_current_user(&self.gateway)
            .await
            .map_err(DetailSubmitError::StatusChange)?
            .codigo;
        let payload: DetailForm = input.into_payload(Some(codigo)).map_err(SubmitRejection::from)?;

        self.reports
            .set_status(report_id, ReportStatus::Completado)
            .await
            .map_err(DetailSubmitError::StatusChange)?;

        if let Err(e) = self.reports.submit_detail_form(report_id, &payload).await {
            log::error!(
                "❌ [REPORTS] Reporte {} quedó Completado sin formulario: {}",
                report_id,
                e
            );
            self.load_reports().await;
            return Err(DetailSubmitError::FormNotStored(e));
        }

        self.load_reports().await;
        Ok(ticket)
    }

    /// Cancela el reporte activo con la razón escrita por el usuario
    pub async fn cancel_report(&self, reason: &str) -> Result<Option<ModalTicket>, ServiceError> {
        let (report_id, ticket) = cancel_target(&self.state.ui.borrow())?;
        if reason.trim().is_empty() {
            return Err(ValidationError::EmptyCancelReason.into());
        }

        let role = match self.state.user_role() {
            Some(role) => role,
            None => fetch_current_user(&self.gateway).await?.rol,
        };

        self.reports.cancel(report_id, &role, reason).await?;
        self.load_reports().await;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_input() -> DetailFormInput {
        DetailFormInput {
            nombres: "Ana".to_string(),
            apellido_paterno: "López".to_string(),
            apellido_materno: "Ruiz".to_string(),
            fecha_nacimiento: "2001-03-09".to_string(),
            descripcion_detallada: "Detalle".to_string(),
        }
    }

    fn open_detail(report_id: i64) -> (UiState, ModalTicket) {
        let mut ui = UiState::new();
        let ticket = ui
            .apply(UiAction::OpenDetailForm { report_id })
            .ticket
            .unwrap();
        (ui, ticket)
    }

    #[test]
    fn editable_form_can_be_submitted() {
        let (ui, _) = open_detail(12);
        assert_eq!(ensure_submittable(&ui, &filled_input()), Ok(12));
    }

    #[test]
    fn stored_form_blocks_submission() {
        let (mut ui, ticket) = open_detail(12);
        ui.apply(UiAction::ExistingFormLoaded {
            ticket,
            form: Some(DetailForm::default()),
        });
        assert_eq!(
            ensure_submittable(&ui, &filled_input()),
            Err(SubmitRejection::AlreadySubmitted)
        );
    }

    #[test]
    fn completed_form_is_never_submittable() {
        let mut ui = UiState::new();
        ui.apply(UiAction::OpenCompletedForm { report_id: 3 });
        assert_eq!(
            ensure_submittable(&ui, &filled_input()),
            Err(SubmitRejection::AlreadySubmitted)
        );
    }

    #[test]
    fn closed_modal_has_no_report_to_submit() {
        let (mut ui, _) = open_detail(12);
        ui.apply(UiAction::Close);
        assert_eq!(
            ensure_submittable(&ui, &filled_input()),
            Err(SubmitRejection::NoActiveReport)
        );
    }

    #[test]
    fn missing_fields_and_bad_dates_are_rejected_locally() {
        let (ui, _) = open_detail(12);
        let mut input = filled_input();
        input.apellido_materno = "  ".to_string();
        assert_eq!(
            ensure_submittable(&ui, &input),
            Err(SubmitRejection::Invalid(ValidationError::MissingDetailFields))
        );

        let mut input = filled_input();
        input.fecha_nacimiento = "ayer".to_string();
        assert!(matches!(
            ensure_submittable(&ui, &input),
            Err(SubmitRejection::Invalid(ValidationError::InvalidBirthDate(_)))
        ));
    }

    #[test]
    fn report_save_follows_modal_mode() {
        let mut ui = UiState::new();
        assert_eq!(ReportSave::from_ui(&ui), None);

        ui.apply(UiAction::OpenCreateReport);
        assert_eq!(ReportSave::from_ui(&ui), Some(ReportSave::Create));

        ui.apply(UiAction::OpenEditReport { report_id: 5 });
        let save = ReportSave::from_ui(&ui).unwrap();
        assert_eq!(save, ReportSave::Update(5));
        assert_eq!(save.success_message(), "Reporte actualizado con éxito");
        assert_eq!(save.failure_message(), "Error al actualizar el reporte.");
    }

    #[test]
    fn cancel_without_active_report_is_an_error() {
        let ui = UiState::new();
        assert_eq!(cancel_target(&ui), Err(ServiceError::NoActiveReport));

        let (mut ui, _) = open_detail(12);
        ui.apply(UiAction::Close);
        assert_eq!(cancel_target(&ui), Err(ServiceError::NoActiveReport));

        let mut ui = UiState::new();
        ui.apply(UiAction::RequestCancel { report_id: 7 });
        assert!(matches!(cancel_target(&ui), Ok((7, Some(_)))));
    }

    #[test]
    fn partial_submission_has_its_own_message() {
        let err = DetailSubmitError::FormNotStored(ServiceError::Decode("x".to_string()));
        assert!(err
            .to_string()
            .starts_with("El reporte se marcó como Completado pero el formulario no se guardó"));
        assert!(!err.is_silent());
        assert!(DetailSubmitError::StatusChange(ServiceError::SessionEnded).is_silent());
    }
}
