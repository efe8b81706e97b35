// ============================================================================
// EVENT HANDLING - Listeners con Closure + forget()
// ============================================================================
// - Listeners en elementos: se liberan cuando el elemento sale del DOM
//   (set_inner_html("")), así que forget() es seguro.
// - Listeners en document: registrar UNA sola vez al arrancar la app.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent};

use crate::dom::document;

fn listen<F>(target: &web_sys::EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", move |e: Event| handler(e.unchecked_into::<MouseEvent>()))
}

/// Submit de `<form>`, siempre con preventDefault (no recarga la página)
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Click solo sobre el overlay, no sobre el contenido del modal
pub fn on_overlay_click<F>(overlay: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let overlay_node = overlay.clone();
    listen(overlay, "click", move |e: Event| {
        let on_self = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|t| t == overlay_node)
            .unwrap_or(false);
        if on_self {
            handler();
        }
    })
}

/// Listener de teclado global (document)
pub fn on_document_keydown<F>(mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;
    listen(&doc, "keydown", move |e: Event| handler(e.unchecked_into::<KeyboardEvent>()))
}

/// `selectionchange` en document
pub fn on_selection_change<F>(mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;
    listen(&doc, "selectionchange", move |_e: Event| handler())
}
