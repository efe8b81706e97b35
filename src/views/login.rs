// ============================================================================
// LOGIN VIEW - Login, registro, recuperación y confirmación
// ============================================================================
// Una sola vista visible a la vez (AuthView). Cambiar de vista es un
// re-render completo: los campos vuelven a estar vacíos.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    alert, input_value, on_submit, set_disabled, set_text_content, ElementBuilder,
};
use crate::models::{LoginInput, RegisterInput};
use crate::services::auth_service::AuthError;
use crate::state::{AppState, AuthView};
use crate::viewmodels::SessionViewModel;

pub const REGISTER_SUCCESS_MESSAGE: &str = "Usuario registrado exitosamente";

/// Etiqueta del botón de envío según si hay una petición en curso
pub fn submit_label(view: AuthView, busy: bool) -> &'static str {
    match (view, busy) {
        (AuthView::Login, false) => "INGRESAR",
        (AuthView::Login, true) => "CARGANDO...",
        (AuthView::Register, false) => "REGISTRARSE",
        (AuthView::Register, true) => "REGISTRANDO...",
        (AuthView::Forgot, _) => "ENVIAR",
        (AuthView::Confirmation, _) => "VOLVER AL INICIO",
    }
}

/// Mensaje bajo el formulario de login
pub fn login_error_message(error: &AuthError) -> String {
    match error {
        AuthError::Validation(e) => e.to_string(),
        other => format!("Error: {}", other),
    }
}

/// Mensaje del alert de registro fallido
pub fn register_error_message(error: &AuthError) -> String {
    match error {
        AuthError::Validation(e) => e.to_string(),
        other => format!("Error al registrar usuario: {}", other),
    }
}

fn switch_view(state: &AppState, view: AuthView) {
    state.auth.set_view(view);
    crate::rerender_app();
}

fn view_link(state: &AppState, label: &str, view: AuthView) -> Result<Element, JsValue> {
    let state = state.clone();
    Ok(ElementBuilder::new("a")?
        .class("auth-link")
        .attr("href", "#")?
        .text(label)
        .on_click(move |e| {
            e.prevent_default();
            switch_view(&state, view);
        })?
        .build())
}

fn input_group(id: &str, label: &str, input_type: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("input-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(
            ElementBuilder::new("input")?
                .id(id)?
                .attr("type", input_type)?
                .attr("name", id)?
                .build(),
        )?
        .build())
}

fn submit_button(id: &str, view: AuthView) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .id(id)?
        .class("btn-login")
        .attr("type", "submit")?
        .text(submit_label(view, false))
        .build())
}

fn set_busy(button: &Element, view: AuthView, busy: bool) {
    set_disabled(button, busy);
    set_text_content(button, submit_label(view, busy));
}

fn render_login_view(state: &AppState) -> Result<Element, JsValue> {
    let button = submit_button("loginButton", AuthView::Login)?;
    let error = ElementBuilder::new("p")?
        .id("loginError")?
        .class("error-message")
        .text(&state.auth.get_login_error().unwrap_or_default())
        .build();

    let form = ElementBuilder::new("form")?
        .id("loginView")?
        .class("login-form")
        .child(ElementBuilder::new("h2")?.text("Iniciar sesión").build())?
        .child(input_group("codigo", "Código", "text")?)?
        .child(input_group("password", "Contraseña", "password")?)?
        .child(button.clone())?
        .child(error.clone())?
        .child(view_link(state, "¿Olvidaste tu contraseña?", AuthView::Forgot)?)?
        .child(view_link(state, "Crear cuenta", AuthView::Register)?)?
        .build();

    let state = state.clone();
    on_submit(&form, move || {
        let input = LoginInput {
            codigo: input_value("codigo"),
            password: input_value("password"),
        };
        state.auth.set_login_error(None);
        set_text_content(&error, "");
        set_busy(&button, AuthView::Login, true);

        let state = state.clone();
        let button = button.clone();
        let error = error.clone();
        spawn_local(async move {
            let vm = SessionViewModel::new(state.clone());
            match vm.login(input).await {
                Ok(()) => crate::rerender_app(),
                Err(e) => {
                    log::warn!("⚠️ [LOGIN] Login fallido: {}", e);
                    let message = login_error_message(&e);
                    set_text_content(&error, &message);
                    state.auth.set_login_error(Some(message));
                    set_busy(&button, AuthView::Login, false);
                }
            }
        });
    })?;

    Ok(form)
}

fn render_register_view(state: &AppState) -> Result<Element, JsValue> {
    let button = submit_button("registerButton", AuthView::Register)?;

    let form = ElementBuilder::new("form")?
        .id("registerView")?
        .class("login-form")
        .child(ElementBuilder::new("h2")?.text("Registro").build())?
        .child(input_group("newCodigo", "Código", "text")?)?
        .child(input_group("newEmail", "Correo electrónico", "email")?)?
        .child(input_group("newPassword", "Contraseña", "password")?)?
        .child(input_group("confirmPassword", "Confirmar contraseña", "password")?)?
        .child(button.clone())?
        .child(view_link(state, "Ya tengo cuenta", AuthView::Login)?)?
        .build();

    let state = state.clone();
    on_submit(&form, move || {
        let input = RegisterInput {
            codigo: input_value("newCodigo"),
            email: input_value("newEmail"),
            password: input_value("newPassword"),
            confirm_password: input_value("confirmPassword"),
        };
        set_busy(&button, AuthView::Register, true);

        let state = state.clone();
        let button = button.clone();
        spawn_local(async move {
            let vm = SessionViewModel::new(state);
            match vm.register(input).await {
                Ok(()) => {
                    alert(REGISTER_SUCCESS_MESSAGE);
                    crate::rerender_app();
                }
                Err(e) => {
                    log::warn!("⚠️ [LOGIN] Registro fallido: {}", e);
                    alert(&register_error_message(&e));
                    set_busy(&button, AuthView::Register, false);
                }
            }
        });
    })?;

    Ok(form)
}

/// Recuperación de contraseña: solo pide el correo, sin llamada a la API
fn render_forgot_view(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("forgotView")?
        .class("login-form")
        .child(ElementBuilder::new("h2")?.text("Recuperar contraseña").build())?
        .child(input_group("forgotEmail", "Correo electrónico", "email")?)?
        .child(submit_button("forgotButton", AuthView::Forgot)?)?
        .child(view_link(state, "Volver", AuthView::Login)?)?
        .build();

    let state = state.clone();
    on_submit(&form, move || switch_view(&state, AuthView::Confirmation))?;
    Ok(form)
}

fn render_confirmation_view(state: &AppState) -> Result<Element, JsValue> {
    let back_state = state.clone();
    Ok(ElementBuilder::new("div")?
        .id("confirmationView")?
        .class("login-form")
        .child(ElementBuilder::new("h2")?.text("Revisa tu correo").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Si el correo está registrado, recibirás instrucciones para restablecer tu contraseña.")
                .build(),
        )?
        .child(
            ElementBuilder::new("button")?
                .class("btn-login")
                .attr("type", "button")?
                .text(submit_label(AuthView::Confirmation, false))
                .on_click(move |_| switch_view(&back_state, AuthView::Login))?
                .build(),
        )?
        .build())
}

/// Renderizar la pantalla de autenticación
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let view = state.auth.get_view();
    log::info!("🎬 [LOGIN] Renderizando vista {:?}", view);

    let content = match view {
        AuthView::Login => render_login_view(state)?,
        AuthView::Register => render_register_view(state)?,
        AuthView::Forgot => render_forgot_view(state)?,
        AuthView::Confirmation => render_confirmation_view(state)?,
    };

    let screen = ElementBuilder::new("div")?
        .class("login-screen")
        .child(
            ElementBuilder::new("div")?
                .class("login-container")
                .child(
                    ElementBuilder::new("div")?
                        .class("login-header")
                        .child(ElementBuilder::new("h1")?.text("Sistema de Reportes").build())?
                        .build(),
                )?
                .child(content)?
                .build(),
        )?
        .build();

    Ok(screen)
}
