// ============================================================================
// ACTIONS - Handlers de eventos del dashboard
// ============================================================================
// Traducen clicks/submits/teclas a acciones del reducer y a llamadas del
// ViewModel, y repintan lo que cambió.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{active_element_tag, alert, focus, get_element_by_id, has_text_selection, input_value, set_input_value, set_text_content};
use crate::models::{DetailFormInput, ValidationError};
use crate::state::ui_state::{resolve_key, FocusTarget, KeyIntent};
use crate::state::{IncrementalUpdate, ModalTicket, ScrollLock, Transition, UiAction, UpdateType};
use crate::viewmodels::dashboard_viewmodel::{DetailSubmitError, ReportSave, SubmitRejection};
use crate::viewmodels::DashboardViewModel;
use crate::views::modals::{reset_modal_forms, show_current_date};

/// Tiempo que se muestra el mensaje de éxito antes de cerrar el modal
const CLOSE_DELAY_MS: u32 = 1_000;

/// Despacha al reducer y sincroniza los modales con el resultado
pub fn dispatch(vm: &DashboardViewModel, action: UiAction) -> Transition {
    let transition = vm.state().dispatch(action);
    if transition.ticket.is_some() || transition.scroll == ScrollLock::Release {
        reset_modal_forms();
    }
    sync();
    transition
}

fn sync() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Modals));
}

fn refresh_list() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::ReportList));
}

fn set_message(id: &str, text: &str) {
    if let Some(element) = get_element_by_id(id) {
        set_text_content(&element, text);
    }
}

/// Cierra el modal del ticket tras un momento (si sigue abierto)
fn finish_later(vm: &DashboardViewModel, ticket: Option<ModalTicket>) {
    let Some(ticket) = ticket else {
        return;
    };
    let vm = vm.clone();
    Timeout::new(CLOSE_DELAY_MS, move || {
        dispatch(&vm, UiAction::Finish { ticket });
    })
    .forget();
}

// ----------------------------------------------------------------------------
// Apertura de modales
// ----------------------------------------------------------------------------

pub fn open_create_report(vm: &DashboardViewModel) {
    dispatch(vm, UiAction::OpenCreateReport);
    focus("descripcion");
}

pub fn open_help(vm: &DashboardViewModel) {
    dispatch(vm, UiAction::OpenHelp);
}

pub fn request_cancel(vm: &DashboardViewModel, report_id: i64) {
    dispatch(vm, UiAction::RequestCancel { report_id });
}

/// Paso 2 de la cancelación: pedir la razón
pub fn confirm_cancel(vm: &DashboardViewModel) {
    dispatch(vm, UiAction::ConfirmCancel);
    focus("cancel-reason-text");
}

pub fn close(vm: &DashboardViewModel) {
    dispatch(vm, UiAction::Close);
}

/// Edición: abre el modal y precarga la descripción actual
pub fn open_edit_report(vm: &DashboardViewModel, report_id: i64) {
    let Some(ticket) = dispatch(vm, UiAction::OpenEditReport { report_id }).ticket else {
        return;
    };
    let vm = vm.clone();
    spawn_local(async move {
        match vm.fetch_report(report_id).await {
            Ok(report) => {
                if vm.state().ui.borrow().is_current(ticket) {
                    set_input_value("descripcion", &report.descripcion);
                }
            }
            Err(e) if e.is_silent() => {}
            Err(e) => {
                log::error!("❌ [REPORTS] Error al obtener el reporte {}: {}", report_id, e);
                dispatch(&vm, UiAction::Finish { ticket });
                alert("Error al cargar el reporte para editar");
            }
        }
    });
}

/// Descripción del reporte en la cabecera del formulario detallado
async fn fill_report_description(vm: &DashboardViewModel, ticket: ModalTicket, report_id: i64) {
    match vm.fetch_report(report_id).await {
        Ok(report) if vm.state().ui.borrow().is_current(ticket) => {
            set_message("form-description-text", &report.descripcion);
        }
        Ok(_) => {}
        Err(e) => log::error!("❌ [REPORTS] Error al obtener datos del reporte {}: {}", report_id, e),
    }
}

/// Reporte pendiente: editable salvo que ya exista un formulario guardado
pub fn open_detail_form(vm: &DashboardViewModel, report_id: i64) {
    let Some(ticket) = dispatch(vm, UiAction::OpenDetailForm { report_id }).ticket else {
        return;
    };
    show_current_date();
    let vm = vm.clone();
    spawn_local(async move {
        fill_report_description(&vm, ticket, report_id).await;
        vm.lookup_existing_form(ticket, report_id).await;
        sync();
    });
}

/// Reporte completado: siempre solo lectura
pub fn open_completed_form(vm: &DashboardViewModel, report_id: i64) {
    let Some(ticket) = dispatch(vm, UiAction::OpenCompletedForm { report_id }).ticket else {
        return;
    };
    show_current_date();
    let vm = vm.clone();
    spawn_local(async move {
        fill_report_description(&vm, ticket, report_id).await;
        let result = vm.load_completed_form(ticket, report_id).await;
        sync();
        if let Err(e) = result {
            if !e.is_silent() {
                alert("Error al cargar el formulario completado.");
            }
        }
    });
}

// ----------------------------------------------------------------------------
// Envíos
// ----------------------------------------------------------------------------

pub fn submit_report(vm: &DashboardViewModel) {
    let descripcion = input_value("descripcion");
    if descripcion.trim().is_empty() {
        set_message("errorDescripcion", &ValidationError::EmptyDescription.to_string());
        return;
    }
    set_message("errorDescripcion", "");

    let vm = vm.clone();
    spawn_local(async move {
        let save = ReportSave::from_ui(&vm.state().ui.borrow());
        match vm.save_report(&descripcion).await {
            Ok((save, ticket)) => {
                set_message("exitoEnvio", save.success_message());
                refresh_list();
                finish_later(&vm, ticket);
            }
            Err(e) if e.is_silent() => {}
            Err(e) => {
                log::error!("❌ [REPORTS] Error guardando reporte: {}", e);
                let message = save
                    .map(|s| s.failure_message())
                    .unwrap_or("Error al enviar el reporte.");
                set_message("exitoEnvio", message);
            }
        }
    });
}

fn read_detail_form() -> DetailFormInput {
    DetailFormInput {
        nombres: input_value("nombres"),
        apellido_paterno: input_value("apellido-paterno"),
        apellido_materno: input_value("apellido-materno"),
        fecha_nacimiento: input_value("fecha-nacimiento"),
        descripcion_detallada: input_value("descripcion-detallada"),
    }
}

pub fn submit_detail_form(vm: &DashboardViewModel) {
    let input = read_detail_form();
    let vm = vm.clone();
    spawn_local(async move {
        match vm.submit_detail_form(input).await {
            Ok(ticket) => {
                refresh_list();
                alert("Formulario enviado con éxito");
                finish_later(&vm, ticket);
            }
            Err(e) if e.is_silent() => {}
            Err(DetailSubmitError::Rejected(SubmitRejection::AlreadySubmitted)) => {
                alert("Este formulario ya ha sido enviado y no puede ser modificado");
            }
            Err(DetailSubmitError::Rejected(rejection)) => alert(&rejection.to_string()),
            Err(e) => {
                log::error!("❌ [REPORTS] {}", e);
                refresh_list();
                alert(&e.to_string());
            }
        }
    });
}

pub fn submit_cancel_reason(vm: &DashboardViewModel) {
    let reason = input_value("cancel-reason-text");
    if reason.trim().is_empty() {
        set_message("cancel-reason-error", &ValidationError::EmptyCancelReason.to_string());
        return;
    }
    set_message("cancel-reason-error", "");

    let vm = vm.clone();
    spawn_local(async move {
        match vm.cancel_report(reason.trim()).await {
            Ok(ticket) => {
                if let Some(ticket) = ticket {
                    dispatch(&vm, UiAction::Finish { ticket });
                }
                refresh_list();
                alert("Reporte cancelado exitosamente");
            }
            Err(e) if e.is_silent() => {}
            Err(e) => {
                log::error!("❌ [REPORTS] Error al cancelar reporte: {}", e);
                alert("Error al cancelar el reporte");
                close(&vm);
            }
        }
    });
}

// ----------------------------------------------------------------------------
// Teclado y selección (listeners globales)
// ----------------------------------------------------------------------------

pub fn handle_keydown(vm: &DashboardViewModel, event: &web_sys::KeyboardEvent) {
    let focus = FocusTarget::from_tag(active_element_tag().as_deref());
    let intent = resolve_key(&event.key(), &vm.state().ui.borrow(), focus);
    if intent == KeyIntent::Ignore {
        return;
    }
    event.prevent_default();

    match intent {
        KeyIntent::Close => close(vm),
        KeyIntent::SubmitReport => submit_report(vm),
        KeyIntent::SubmitDetailForm => submit_detail_form(vm),
        KeyIntent::ConfirmCancel => confirm_cancel(vm),
        KeyIntent::SubmitCancelReason => submit_cancel_reason(vm),
        KeyIntent::Ignore => {}
    }
}

pub fn handle_selection_change(vm: &DashboardViewModel) {
    let has_selection = has_text_selection();
    if vm.state().ui.borrow().auto_update() == has_selection {
        vm.state().dispatch(UiAction::SelectionChanged { has_selection });
    }
}
