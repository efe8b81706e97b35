// ============================================================================
// MODALS - Construcción y sincronización de los modales del dashboard
// ============================================================================
// Los modales se crean una vez con el dashboard y quedan ocultos.
// `sync_modals` es el único que cambia su visibilidad, a partir de UiState.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{
    get_element_by_id, on_click, on_overlay_click, on_submit, set_disabled_by_id, set_input_value,
    set_scroll_locked, set_text_content, set_visible, toggle_class, ElementBuilder,
};
use crate::models::detail_form::display_date;
use crate::models::DetailFormInput;
use crate::state::{FormMode, Modal, ReportModalMode, UiState};
use crate::viewmodels::DashboardViewModel;
use crate::views::actions;

pub const REPORT_MODAL: &str = "report-modal";
pub const DETAIL_MODAL: &str = "detailed-form-modal";
pub const CANCEL_CONFIRM_MODAL: &str = "cancel-confirmation-modal";
pub const CANCEL_REASON_MODAL: &str = "cancel-reason-modal";
pub const HELP_MODAL: &str = "help-modal";

const ALL_MODALS: [&str; 5] = [
    REPORT_MODAL,
    DETAIL_MODAL,
    CANCEL_CONFIRM_MODAL,
    CANCEL_REASON_MODAL,
    HELP_MODAL,
];

/// Campos del formulario detallado, en orden de aparición
const DETAIL_FIELDS: [&str; 5] = [
    "nombres",
    "apellido-paterno",
    "apellido-materno",
    "fecha-nacimiento",
    "descripcion-detallada",
];

pub const READ_ONLY_NOTICE: &str = "Este formulario ya ha sido enviado y no puede ser modificado.";

/// Id del elemento DOM de cada modal
pub fn modal_element_id(modal: Modal) -> Option<&'static str> {
    match modal {
        Modal::Closed => None,
        Modal::Report { .. } => Some(REPORT_MODAL),
        Modal::DetailForm { .. } => Some(DETAIL_MODAL),
        Modal::CancelConfirm => Some(CANCEL_CONFIRM_MODAL),
        Modal::CancelReason => Some(CANCEL_REASON_MODAL),
        Modal::Help => Some(HELP_MODAL),
    }
}

pub fn report_modal_title(mode: ReportModalMode) -> &'static str {
    match mode {
        ReportModalMode::Create => "Nuevo Reporte",
        ReportModalMode::Edit => "Editar Reporte",
    }
}

/// Etiqueta y estado del botón de envío del formulario detallado
pub fn detail_submit_button(mode: FormMode) -> (&'static str, bool) {
    match mode {
        FormMode::Editable => ("Enviar", true),
        FormMode::ReadOnly => ("Formulario ya enviado", false),
    }
}

// ============================================================================
// SINCRONIZACIÓN
// ============================================================================

/// Aplica el estado de UI al DOM: un solo modal visible y scroll del body
pub fn sync_modals(ui: &UiState) -> Result<(), JsValue> {
    let visible = modal_element_id(ui.modal());
    for id in ALL_MODALS {
        if let Some(element) = get_element_by_id(id) {
            set_visible(&element, visible == Some(id))?;
        }
    }
    set_scroll_locked(ui.modal().is_open())?;

    if let Modal::Report { mode } = ui.modal() {
        if let Some(title) = get_element_by_id("report-modal-title") {
            set_text_content(&title, report_modal_title(mode));
        }
    }
    apply_detail_form_mode(ui)
}

/// Editable o solo lectura según el modal; rellena con el formulario guardado
pub fn apply_detail_form_mode(ui: &UiState) -> Result<(), JsValue> {
    let mode = match ui.modal() {
        Modal::DetailForm { mode } => mode,
        _ => FormMode::Editable,
    };
    let read_only = mode == FormMode::ReadOnly;

    if let Some(form) = ui.existing_form() {
        let input = DetailFormInput::from(form);
        set_input_value("nombres", &input.nombres);
        set_input_value("apellido-paterno", &input.apellido_paterno);
        set_input_value("apellido-materno", &input.apellido_materno);
        set_input_value("fecha-nacimiento", &input.fecha_nacimiento);
        set_input_value("descripcion-detallada", &input.descripcion_detallada);
    }

    for id in DETAIL_FIELDS {
        set_disabled_by_id(id, read_only);
        if let Some(field) = get_element_by_id(id) {
            toggle_class(&field, "read-only", read_only)?;
        }
    }

    let (label, enabled) = detail_submit_button(mode);
    if let Some(button) = get_element_by_id("detailed-submit") {
        set_text_content(&button, label);
        toggle_class(&button, "disabled", !enabled)?;
    }
    set_disabled_by_id("detailed-submit", !enabled);

    if let Some(notice) = get_element_by_id("form-info-message") {
        set_visible(&notice, read_only)?;
    }
    Ok(())
}

/// Limpia todos los formularios de modales y sus mensajes
pub fn reset_modal_forms() {
    for id in DETAIL_FIELDS {
        set_input_value(id, "");
    }
    set_input_value("descripcion", "");
    set_input_value("cancel-reason-text", "");
    for id in ["errorDescripcion", "exitoEnvio", "cancel-reason-error", "form-description-text"] {
        if let Some(element) = get_element_by_id(id) {
            set_text_content(&element, "");
        }
    }
}

pub fn show_current_date() {
    if let Some(element) = get_element_by_id("current-date") {
        set_text_content(&element, &display_date(chrono::Local::now().date_naive()));
    }
}

// ============================================================================
// CONSTRUCCIÓN
// ============================================================================

/// Overlay `.modal` + contenido + botón de cierre
fn modal_shell(vm: &DashboardViewModel, id: &str, title: &str, title_id: Option<&str>) -> Result<(Element, Element), JsValue> {
    let overlay = ElementBuilder::new("div")?.id(id)?.class("modal").build();
    set_visible(&overlay, false)?;
    {
        let vm = vm.clone();
        on_overlay_click(&overlay, move || actions::close(&vm))?;
    }

    let close = ElementBuilder::new("span")?.class("close-modal").text("×").build();
    {
        let vm = vm.clone();
        on_click(&close, move |_| actions::close(&vm))?;
    }

    let mut heading = ElementBuilder::new("h2")?.text(title);
    if let Some(title_id) = title_id {
        heading = heading.id(title_id)?;
    }

    let content = ElementBuilder::new("div")?
        .class("modal-content")
        .child(close)?
        .child(heading.build())?
        .build();
    overlay.append_child(&content)?;
    Ok((overlay, content))
}

fn field(label: &str, control: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.text(label).build())?
        .child(control)?
        .build())
}

fn text_input(id: &str, input_type: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .id(id)?
        .attr("type", input_type)?
        .attr("name", id)?
        .build())
}

fn text_area(id: &str, placeholder: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("textarea")?
        .id(id)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .build())
}

fn message(id: &str, class: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?.id(id)?.class(class).build())
}

pub fn render_report_modal(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let (overlay, content) = modal_shell(
        vm,
        REPORT_MODAL,
        report_modal_title(ReportModalMode::Create),
        Some("report-modal-title"),
    )?;

    let form = ElementBuilder::new("form")?
        .id("reportForm")?
        .child(field(
            "Descripción *",
            text_area("descripcion", "Describe brevemente la situación")?,
        )?)?
        .child(message("errorDescripcion", "error-message")?)?
        .child(
            ElementBuilder::new("button")?
                .attr("type", "submit")?
                .class("submit-button")
                .text("Enviar")
                .build(),
        )?
        .child(message("exitoEnvio", "success-message")?)?
        .build();
    {
        let vm = vm.clone();
        on_submit(&form, move || actions::submit_report(&vm))?;
    }

    content.append_child(&form)?;
    Ok(overlay)
}

pub fn render_detail_form_modal(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let (overlay, content) = modal_shell(vm, DETAIL_MODAL, "Formulario Detallado", None)?;

    let summary = ElementBuilder::new("div")?
        .class("form-summary")
        .child(
            ElementBuilder::new("p")?
                .text("Fecha: ")
                .child(ElementBuilder::new("span")?.id("current-date")?.build())?
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .text("Reporte: ")
                .child(ElementBuilder::new("span")?.id("form-description-text")?.build())?
                .build(),
        )?
        .build();

    let notice = ElementBuilder::new("div")?
        .id("form-info-message")?
        .class("form-info-message")
        .text(READ_ONLY_NOTICE)
        .build();
    set_visible(&notice, false)?;

    let actions_row = ElementBuilder::new("div")?
        .class("form-actions")
        .child(
            ElementBuilder::new("button")?
                .id("detailed-submit")?
                .attr("type", "submit")?
                .class("submit-button")
                .text("Enviar")
                .build(),
        )?
        .build();

    let form = ElementBuilder::new("form")?
        .id("detailed-form")?
        .child(summary)?
        .child(field("Nombre(s) *", text_input("nombres", "text")?)?)?
        .child(field("Apellido paterno *", text_input("apellido-paterno", "text")?)?)?
        .child(field("Apellido materno *", text_input("apellido-materno", "text")?)?)?
        .child(field("Fecha de nacimiento *", text_input("fecha-nacimiento", "date")?)?)?
        .child(field(
            "Descripción detallada *",
            text_area("descripcion-detallada", "Describe lo ocurrido con detalle")?,
        )?)?
        .child(notice)?
        .child(actions_row)?
        .build();
    {
        let vm = vm.clone();
        on_submit(&form, move || actions::submit_detail_form(&vm))?;
    }

    content.append_child(&form)?;
    Ok(overlay)
}

pub fn render_cancel_confirm_modal(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let (overlay, content) = modal_shell(vm, CANCEL_CONFIRM_MODAL, "Cancelar reporte", None)?;

    let confirm = ElementBuilder::new("button")?
        .id("confirm-cancel")?
        .attr("type", "button")?
        .class("danger-button")
        .text("Sí, cancelar")
        .build();
    {
        let vm = vm.clone();
        on_click(&confirm, move |_| actions::confirm_cancel(&vm))?;
    }

    let abort = ElementBuilder::new("button")?
        .id("abort-cancel")?
        .attr("type", "button")?
        .class("secondary-button")
        .text("No")
        .build();
    {
        let vm = vm.clone();
        on_click(&abort, move |_| actions::close(&vm))?;
    }

    content.append_child(
        &ElementBuilder::new("p")?
            .text("¿Está seguro de que desea cancelar este reporte?")
            .build(),
    )?;
    content.append_child(
        &ElementBuilder::new("div")?
            .class("modal-buttons")
            .child(confirm)?
            .child(abort)?
            .build(),
    )?;
    Ok(overlay)
}

pub fn render_cancel_reason_modal(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let (overlay, content) = modal_shell(vm, CANCEL_REASON_MODAL, "Razón de cancelación", None)?;

    let abort = ElementBuilder::new("button")?
        .id("abort-reason-cancel")?
        .attr("type", "button")?
        .class("secondary-button")
        .text("Volver")
        .build();
    {
        let vm = vm.clone();
        on_click(&abort, move |_| actions::close(&vm))?;
    }

    let form = ElementBuilder::new("form")?
        .id("cancel-reason-form")?
        .child(field(
            "Indique la razón *",
            text_area("cancel-reason-text", "¿Por qué desea cancelar el reporte?")?,
        )?)?
        .child(message("cancel-reason-error", "error-message")?)?
        .child(
            ElementBuilder::new("div")?
                .class("modal-buttons")
                .child(
                    ElementBuilder::new("button")?
                        .attr("type", "submit")?
                        .class("danger-button")
                        .text("Cancelar Reporte")
                        .build(),
                )?
                .child(abort)?
                .build(),
        )?
        .build();
    {
        let vm = vm.clone();
        on_submit(&form, move || actions::submit_cancel_reason(&vm))?;
    }

    content.append_child(&form)?;
    Ok(overlay)
}

const FAQ: [(&str, &str); 4] = [
    (
        "¿Cuándo debo usar el botón de pánico?",
        "Cuando necesites reportar una situación de riesgo. Describe brevemente lo que ocurre y envía el reporte.",
    ),
    (
        "¿Qué significa cada estado?",
        "Pendiente: recibido. Activo: en atención. Completado: atendido con formulario. Cancelado: cerrado sin atención.",
    ),
    (
        "¿Puedo modificar el formulario detallado?",
        "No. Una vez enviado, el formulario queda en modo de solo lectura.",
    ),
    (
        "¿Cómo cancelo un reporte?",
        "Usa el botón \"Cancelar Reporte\", confirma y escribe la razón de la cancelación.",
    ),
];

pub fn render_help_modal(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let (overlay, content) = modal_shell(vm, HELP_MODAL, "Preguntas frecuentes", None)?;

    let accordion = ElementBuilder::new("div")?.class("accordion").build();
    for (question, answer) in FAQ {
        let header = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("accordion-header")
            .text(question)
            .build();
        let body = ElementBuilder::new("div")?
            .class("accordion-content")
            .child(ElementBuilder::new("p")?.text(answer).build())?
            .build();
        set_visible(&body, false)?;

        let header_node = header.clone();
        let body_node = body.clone();
        on_click(&header, move |_| {
            let open = header_node.class_list().toggle("active").unwrap_or(false);
            let _ = set_visible(&body_node, open);
        })?;

        accordion.append_child(&header)?;
        accordion.append_child(&body)?;
    }

    content.append_child(&accordion)?;
    Ok(overlay)
}

pub fn render_modals(vm: &DashboardViewModel) -> Result<Vec<Element>, JsValue> {
    Ok(vec![
        render_report_modal(vm)?,
        render_detail_form_modal(vm)?,
        render_cancel_confirm_modal(vm)?,
        render_cancel_reason_modal(vm)?,
        render_help_modal(vm)?,
    ])
}
