// ============================================================================
// ELEMENT HELPERS - Acceso al DOM (document, inputs, clases, alertas)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .create_element(tag)
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Agrega o quita una clase según `on`
pub fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force(class, on).map(|_| ())
}

// ----------------------------------------------------------------------------
// Inputs
// ----------------------------------------------------------------------------

/// Valor de un `<input>` o `<textarea>` por id ("" si no existe)
pub fn input_value(id: &str) -> String {
    let Some(element) = get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_input_value(id: &str, value: &str) {
    let Some(element) = get_element_by_id(id) else {
        return;
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Deshabilita inputs, textareas y botones
pub fn set_disabled(element: &Element, disabled: bool) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_disabled(disabled);
    } else if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    }
}

pub fn set_disabled_by_id(id: &str, disabled: bool) {
    if let Some(element) = get_element_by_id(id) {
        set_disabled(&element, disabled);
    }
}

pub fn focus(id: &str) {
    if let Some(element) = get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        let _ = element.focus();
    }
}

// ----------------------------------------------------------------------------
// Documento
// ----------------------------------------------------------------------------

/// Tag del elemento con foco (`BUTTON`, `TEXTAREA`, ...)
pub fn active_element_tag() -> Option<String> {
    document()?.active_element().map(|e| e.tag_name())
}

/// `true` si el usuario tiene texto seleccionado
pub fn has_text_selection() -> bool {
    document()
        .and_then(|doc| doc.get_selection().ok().flatten())
        .map(|selection| !String::from(selection.to_string()).is_empty())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Muestra u oculta vía `style.display`
pub fn set_visible(element: &Element, visible: bool) -> Result<(), JsValue> {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        el.style()
            .set_property("display", if visible { "block" } else { "none" })?;
    }
    Ok(())
}

/// Clase `modal-open` en `<body>`: bloquea el scroll de la página
pub fn set_scroll_locked(locked: bool) -> Result<(), JsValue> {
    if let Some(body) = body() {
        body.class_list().toggle_with_force("modal-open", locked)?;
    }
    Ok(())
}
