// ============================================================================
// DASHBOARD VIEW - Header, navegación, secciones y modales
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::{
    get_element_by_id, on_submit, set_text_content, toggle_class, ElementBuilder,
};
use crate::state::{AppState, Section};
use crate::viewmodels::{DashboardViewModel, SessionViewModel};
use crate::views::actions;
use crate::views::modals::render_modals;
use crate::views::report_list::render_report_list;

pub const CONTACT_SENT_MESSAGE: &str = "Mensaje enviado con éxito";
const CONTACT_MESSAGE_MS: u32 = 3_000;

const SECTIONS: [Section; 2] = [Section::Home, Section::Contact];

pub fn section_element_id(section: Section) -> &'static str {
    match section {
        Section::Home => "inicio",
        Section::Contact => "contacto",
    }
}

fn nav_link_id(section: Section) -> &'static str {
    match section {
        Section::Home => "nav-inicio",
        Section::Contact => "nav-contacto",
    }
}

/// Texto del header según el usuario cargado
pub fn header_text(state: &AppState) -> String {
    state
        .current_user
        .borrow()
        .as_ref()
        .map(|user| user.header_label())
        .unwrap_or_default()
}

/// Cambio de sección: solo clases, sin re-render (la lista y los modales
/// siguen vivos)
pub fn show_section(state: &AppState, section: Section) -> Result<(), JsValue> {
    state.set_section(section);
    for candidate in SECTIONS {
        let on = candidate == section;
        if let Some(el) = get_element_by_id(section_element_id(candidate)) {
            toggle_class(&el, "active-section", on)?;
        }
        if let Some(link) = get_element_by_id(nav_link_id(candidate)) {
            toggle_class(&link, "active", on)?;
        }
    }
    Ok(())
}

/// Actualización incremental del nombre de usuario
pub fn update_header(state: &AppState) -> Result<(), JsValue> {
    if let Some(label) = get_element_by_id("username") {
        set_text_content(&label, &header_text(state));
    }
    Ok(())
}

fn render_header(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let state = vm.state().clone();
    let logout = ElementBuilder::new("button")?
        .id("logout-button")?
        .class("logout-button")
        .attr("type", "button")?
        .text("Cerrar sesión")
        .on_click(move |_| {
            SessionViewModel::new(state.clone()).logout();
            crate::rerender_app();
        })?
        .build();

    Ok(ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(ElementBuilder::new("h1")?.text("Reportes").build())?
        .child(
            ElementBuilder::new("div")?
                .class("user-info")
                .child(
                    ElementBuilder::new("span")?
                        .id("username")?
                        .text(&header_text(vm.state()))
                        .build(),
                )?
                .child(logout)?
                .build(),
        )?
        .build())
}

fn nav_link(vm: &DashboardViewModel, section: Section, label: &str) -> Result<Element, JsValue> {
    let state = vm.state().clone();
    let class = if vm.state().section() == section {
        "nav-link active"
    } else {
        "nav-link"
    };
    ElementBuilder::new("a")?
        .id(nav_link_id(section))?
        .class(class)
        .attr("href", "#")?
        .text(label)
        .on_click(move |e| {
            e.prevent_default();
            if let Err(err) = show_section(&state, section) {
                log::error!("❌ [DASHBOARD] Error cambiando de sección: {:?}", err);
            }
        })
        .map(|b| b.build())
}

fn render_nav(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let help_vm = vm.clone();
    let help = ElementBuilder::new("a")?
        .id("nav-ayuda")?
        .class("nav-link")
        .attr("href", "#")?
        .text("Ayuda")
        .on_click(move |e| {
            e.prevent_default();
            actions::open_help(&help_vm);
        })?
        .build();

    Ok(ElementBuilder::new("nav")?
        .class("dashboard-nav")
        .child(nav_link(vm, Section::Home, "Inicio")?)?
        .child(nav_link(vm, Section::Contact, "Contacto")?)?
        .child(help)?
        .build())
}

fn section_shell(vm: &DashboardViewModel, section: Section) -> Result<ElementBuilder, JsValue> {
    let class = if vm.state().section() == section {
        "dashboard-section active-section"
    } else {
        "dashboard-section"
    };
    Ok(ElementBuilder::new("section")?
        .id(section_element_id(section))?
        .class(class))
}

fn render_home(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let panic_vm = vm.clone();
    let panic_button = ElementBuilder::new("button")?
        .id("panic-button")?
        .class("panic-button")
        .attr("type", "button")?
        .text("Botón de pánico")
        .on_click(move |_| actions::open_create_report(&panic_vm))?
        .build();

    Ok(section_shell(vm, Section::Home)?
        .child(panic_button)?
        .child(ElementBuilder::new("h2")?.text("Mis reportes").build())?
        .child(render_report_list(vm)?)?
        .build())
}

fn contact_field(id: &str, label: &str, tag: &str) -> Result<Element, JsValue> {
    let mut control = ElementBuilder::new(tag)?.id(id)?.attr("name", id)?;
    if tag == "input" {
        control = control.attr("type", "text")?;
    }
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(control.build())?
        .build())
}

/// Formulario de contacto local: no llama a la API
fn render_contact(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    let status = ElementBuilder::new("p")?
        .id("contact-status")?
        .class("success-message")
        .build();

    let form = ElementBuilder::new("form")?
        .id("contact-form")?
        .class("contact-form")
        .child(contact_field("contact-nombre", "Nombre", "input")?)?
        .child(contact_field("contact-mensaje", "Mensaje", "textarea")?)?
        .child(
            ElementBuilder::new("button")?
                .attr("type", "submit")?
                .class("submit-button")
                .text("Enviar")
                .build(),
        )?
        .child(status.clone())?
        .build();

    let form_for_reset = form.clone();
    on_submit(&form, move || {
        set_text_content(&status, CONTACT_SENT_MESSAGE);
        if let Some(form) = form_for_reset.dyn_ref::<web_sys::HtmlFormElement>() {
            form.reset();
        }
        let status = status.clone();
        Timeout::new(CONTACT_MESSAGE_MS, move || set_text_content(&status, "")).forget();
    })?;

    Ok(section_shell(vm, Section::Contact)?
        .child(ElementBuilder::new("h2")?.text("Contacto").build())?
        .child(form)?
        .build())
}

pub fn render_dashboard(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] Renderizando dashboard");
    let main = ElementBuilder::new("main")?
        .class("dashboard-content")
        .child(render_home(vm)?)?
        .child(render_contact(vm)?)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("dashboard")
        .child(render_header(vm)?)?
        .child(render_nav(vm)?)?
        .child(main)?
        .children(render_modals(vm)?)?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrentUser;

    #[test]
    fn header_shows_mail_and_code_once_user_is_known() {
        let state = AppState::new();
        assert_eq!(header_text(&state), "");

        state.set_current_user(Some(CurrentUser {
            correo: "ana@udg.mx".to_string(),
            codigo: "219000".to_string(),
            rol: "alumno".to_string(),
        }));
        assert_eq!(header_text(&state), "Usuario: ana@udg.mx (219000)");
    }

    #[test]
    fn each_section_has_its_own_container() {
        assert_eq!(section_element_id(Section::Home), "inicio");
        assert_eq!(section_element_id(Section::Contact), "contacto");
        assert_ne!(nav_link_id(Section::Home), nav_link_id(Section::Contact));
    }
}
