// ============================================================================
// REPORT LIST VIEW - Tarjetas de reportes en #reports-list
// ============================================================================
// `ReportCardView` decide clases, etiquetas y botones (puro, testeable);
// `render_report_card` solo lo convierte en DOM.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, on_click, set_inner_html, ElementBuilder};
use crate::models::{Report, ReportStatus};
use crate::state::ReportsState;
use crate::viewmodels::DashboardViewModel;
use crate::views::actions;

pub const EMPTY_LIST_MESSAGE: &str = "No hay reportes pendientes";
pub const LIST_ERROR_MESSAGE: &str = "Error al cargar los reportes";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionButton {
    pub label: &'static str,
    pub enabled: bool,
    pub class_name: &'static str,
}

/// Qué abre el botón "Formulario"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    Editable,
    ReadOnly,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportCardView {
    pub id: i64,
    pub class_name: &'static str,
    pub id_label: String,
    pub timestamp: String,
    pub description: String,
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub form_button: ActionButton,
    pub cancel_button: ActionButton,
    pub form_action: FormAction,
    /// Click en la descripción abre la edición (solo pendientes)
    pub editable: bool,
}

impl ReportCardView {
    pub fn from_report(report: &Report) -> Self {
        let (class_name, form_action) = match report.estado {
            ReportStatus::Pendiente => ("report-item pending-report", FormAction::Editable),
            ReportStatus::Activo => ("report-item active-report", FormAction::Unavailable),
            ReportStatus::Completado => ("report-item completed-report", FormAction::ReadOnly),
            ReportStatus::Cancelado => ("report-item canceled-report", FormAction::Unavailable),
        };

        let form_button = match report.estado {
            ReportStatus::Completado => ActionButton {
                label: "Ver Formulario",
                enabled: true,
                class_name: "action-button form-button completed",
            },
            status => ActionButton {
                label: "Formulario",
                enabled: status == ReportStatus::Pendiente,
                class_name: "action-button form-button",
            },
        };

        let cancel_button = ActionButton {
            label: match report.estado {
                ReportStatus::Cancelado => "Cancelado",
                ReportStatus::Completado => "Completado",
                _ => "Cancelar Reporte",
            },
            enabled: matches!(report.estado, ReportStatus::Pendiente | ReportStatus::Activo),
            class_name: "action-button cancel-button",
        };

        Self {
            id: report.id,
            class_name,
            id_label: format!("ID: {}", report.id),
            timestamp: report.timestamp_label(),
            description: format!("Descripcion: {}", report.descripcion),
            status: format!("Estado: {}", report.estado),
            cancellation_reason: report.cancellation_note().map(str::to_string),
            form_button,
            cancel_button,
            form_action,
            editable: report.estado == ReportStatus::Pendiente,
        }
    }
}

/// Contenido de la lista según el último resultado de carga
#[derive(Clone, Debug, PartialEq)]
pub enum ListContent {
    Loading,
    Message(&'static str),
    Cards(Vec<ReportCardView>),
}

impl ListContent {
    pub fn from_state(reports: &ReportsState) -> Self {
        match reports {
            ReportsState::Loading => ListContent::Loading,
            ReportsState::Failed => ListContent::Message(LIST_ERROR_MESSAGE),
            ReportsState::Loaded(list) if list.is_empty() => ListContent::Message(EMPTY_LIST_MESSAGE),
            ReportsState::Loaded(list) => {
                ListContent::Cards(list.iter().map(ReportCardView::from_report).collect())
            }
        }
    }
}

fn render_button(button: &ActionButton, report_id: i64) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(button.class_name)
        .attr("type", "button")?
        .attr("data-id", &report_id.to_string())?
        .flag("disabled", !button.enabled)?
        .text(button.label)
        .build())
}

pub fn render_report_card(card: &ReportCardView, vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("report-header")
        .child(ElementBuilder::new("span")?.class("report-id").text(&card.id_label).build())?
        .child(
            ElementBuilder::new("span")?
                .class("report-date-time")
                .text(&card.timestamp)
                .build(),
        )?
        .build();

    let mut description = ElementBuilder::new("div")?
        .class(if card.editable {
            "report-description editable"
        } else {
            "report-description"
        })
        .text(&card.description);
    if card.editable {
        let vm = vm.clone();
        let id = card.id;
        description = description
            .attr("title", "Editar reporte")?
            .on_click(move |_| actions::open_edit_report(&vm, id))?;
    }

    let mut item = ElementBuilder::new("div")?
        .class(card.class_name)
        .child(header)?
        .child(description.build())?
        .child(ElementBuilder::new("div")?.class("report-status").text(&card.status).build())?;

    if let Some(reason) = &card.cancellation_reason {
        let reason_block = ElementBuilder::new("div")?
            .class("report-reason")
            .child(ElementBuilder::new("strong")?.text("Razón de cancelación:").build())?
            .child(ElementBuilder::new("span")?.text(&format!(" {}", reason)).build())?
            .build();
        item = item.child(reason_block)?;
    }

    let form_button = render_button(&card.form_button, card.id)?;
    if card.form_button.enabled {
        let vm = vm.clone();
        let id = card.id;
        let action = card.form_action;
        on_click(&form_button, move |_| match action {
            FormAction::Editable => actions::open_detail_form(&vm, id),
            FormAction::ReadOnly => actions::open_completed_form(&vm, id),
            FormAction::Unavailable => {}
        })?;
    }

    let cancel_button = render_button(&card.cancel_button, card.id)?;
    if card.cancel_button.enabled {
        let vm = vm.clone();
        let id = card.id;
        on_click(&cancel_button, move |_| actions::request_cancel(&vm, id))?;
    }

    let buttons = ElementBuilder::new("div")?
        .class("report-actions")
        .child(form_button)?
        .child(cancel_button)?
        .build();

    Ok(item.child(buttons)?.build())
}

/// Reemplaza el contenido de `#reports-list` (idempotente)
pub fn fill_report_list(container: &Element, vm: &DashboardViewModel) -> Result<(), JsValue> {
    let content = ListContent::from_state(&vm.state().reports.borrow());
    set_inner_html(container, "");

    match content {
        ListContent::Loading => {}
        ListContent::Message(message) => {
            append_child(container, &ElementBuilder::new("p")?.text(message).build())?;
        }
        ListContent::Cards(cards) => {
            for card in &cards {
                append_child(container, &render_report_card(card, vm)?)?;
            }
        }
    }
    Ok(())
}

pub fn render_report_list(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id("reports-list")?
        .class("reports-list")
        .build();
    fill_report_list(&container, vm)?;
    Ok(container)
}

/// Actualización incremental: solo la lista, sin tocar modales abiertos
pub fn update_report_list(vm: &DashboardViewModel) -> Result<(), JsValue> {
    match get_element_by_id("reports-list") {
        Some(container) => fill_report_list(&container, vm),
        None => Ok(()),
    }
}
