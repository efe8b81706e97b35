// ============================================================================
// AUTH GATEWAY - Único punto de salida HTTP autenticado
// ============================================================================
// Inyecta el bearer token, y ante 401/403 cierra la sesión (una sola vez).
// Devuelve Ok(None) cuando la sesión ya fue cerrada: el caller aborta en
// silencio porque el usuario ya fue notificado.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use serde::Serialize;
use thiserror::Error;

use crate::services::token_store::{LocalTokenStore, TokenStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Error de red: {0}")]
    Network(String),

    #[error("Error construyendo la petición: {0}")]
    Build(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
}

/// Opciones de la petición (equivalente a `fetch(url, options)`)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn put() -> Self {
        Self {
            method: Method::Put,
            ..Self::default()
        }
    }

    pub fn json<T: Serialize>(method: Method, body: &T) -> Result<Self, GatewayError> {
        let body = serde_json::to_string(body).map_err(|e| GatewayError::Build(e.to_string()))?;
        Ok(Self {
            method,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    SessionInvalid,
    Failure,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        401 | 403 => StatusClass::SessionInvalid,
        200..=299 => StatusClass::Success,
        _ => StatusClass::Failure,
    }
}

/// Headers del caller + `Authorization`, y `Content-Type` JSON solo si el
/// caller no trajo uno (así no se pisa un body form-encoded).
pub fn merge_headers(caller: &[(String, String)], token: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = caller
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("authorization"))
        .cloned()
        .collect();

    headers.push(("Authorization".to_string(), format!("Bearer {}", token)));

    if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type")) {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }
    headers
}

/// Garantiza un único cierre de sesión por evento de sesión inválida.
/// Se rearma al guardar un token nuevo (login).
#[derive(Debug, Default)]
pub struct SessionGuard {
    tripped: Cell<bool>,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.get()
    }

    pub fn rearm(&self) {
        self.tripped.set(false);
    }

    /// Marca la sesión como cerrada sin notificar (logout explícito)
    pub fn close(&self) {
        self.tripped.set(true);
    }

    /// Borra el token y ejecuta `on_teardown` solo la primera vez.
    /// Devuelve `true` si esta llamada hizo el cierre.
    pub fn teardown(&self, store: &dyn TokenStore, on_teardown: &dyn Fn()) -> bool {
        store.clear();
        if self.tripped.replace(true) {
            return false;
        }
        log::warn!("🔒 [GATEWAY] Token expirado o inválido, cerrando sesión...");
        on_teardown();
        true
    }
}

pub struct AuthGateway<S: TokenStore = LocalTokenStore> {
    store: S,
    guard: Rc<SessionGuard>,
    on_teardown: Rc<dyn Fn()>,
}

impl<S: TokenStore> AuthGateway<S> {
    pub fn new(store: S, guard: Rc<SessionGuard>, on_teardown: Rc<dyn Fn()>) -> Self {
        Self {
            store,
            guard,
            on_teardown,
        }
    }

    fn teardown(&self) {
        self.guard.teardown(&self.store, self.on_teardown.as_ref());
    }

    /// Headers finales, o `None` (con cierre de sesión) si no hay token
    fn authorize(&self, options: &RequestOptions) -> Option<Vec<(String, String)>> {
        match self.store.load() {
            Some(token) => Some(merge_headers(&options.headers, &token)),
            None => {
                self.teardown();
                None
            }
        }
    }

    /// `Ok(true)` si la respuesta sirve, `Ok(false)` si cerró la sesión
    fn check_status(&self, status: u16, status_text: &str) -> Result<bool, GatewayError> {
        match classify_status(status) {
            StatusClass::Success => Ok(true),
            StatusClass::SessionInvalid => {
                self.teardown();
                Ok(false)
            }
            StatusClass::Failure => Err(GatewayError::Status {
                status,
                status_text: status_text.to_string(),
            }),
        }
    }

    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Option<Response>, GatewayError> {
        let Some(headers) = self.authorize(&options) else {
            return Ok(None);
        };

        let mut builder = match options.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
        };
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        let request = match options.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| GatewayError::Build(e.to_string()))?;

        let response = request.send().await.map_err(|e| {
            log::error!("❌ [GATEWAY] Error en petición autenticada a {}: {}", url, e);
            GatewayError::Network(e.to_string())
        })?;

        if self.check_status(response.status(), &response.status_text())? {
            Ok(Some(response))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::token_store::testing::MemoryTokenStore;

    fn counting_gateway(store: MemoryTokenStore) -> (AuthGateway<MemoryTokenStore>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let gateway = AuthGateway::new(
            store,
            Rc::new(SessionGuard::new()),
            Rc::new(move || count_clone.set(count_clone.get() + 1)),
        );
        (gateway, count)
    }

    fn find<'a>(headers: &'a [(String, String)], name: &str) -> Vec<&'a str> {
        headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn injects_bearer_and_default_content_type() {
        let headers = merge_headers(&[], "abc");
        assert_eq!(find(&headers, "Authorization"), vec!["Bearer abc"]);
        assert_eq!(find(&headers, "Content-Type"), vec!["application/json"]);
    }

    #[test]
    fn keeps_caller_content_type() {
        let caller = vec![(
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        )];
        let headers = merge_headers(&caller, "abc");
        assert_eq!(
            find(&headers, "Content-Type"),
            vec!["application/x-www-form-urlencoded"]
        );
    }

    #[test]
    fn caller_cannot_override_authorization() {
        let caller = vec![("Authorization".to_string(), "Bearer viejo".to_string())];
        let headers = merge_headers(&caller, "nuevo");
        assert_eq!(find(&headers, "Authorization"), vec!["Bearer nuevo"]);
    }

    #[test]
    fn status_classes() {
        assert_eq!(classify_status(200), StatusClass::Success);
        assert_eq!(classify_status(204), StatusClass::Success);
        assert_eq!(classify_status(401), StatusClass::SessionInvalid);
        assert_eq!(classify_status(403), StatusClass::SessionInvalid);
        assert_eq!(classify_status(404), StatusClass::Failure);
        assert_eq!(classify_status(500), StatusClass::Failure);
    }

    #[test]
    fn missing_token_tears_down_and_aborts() {
        let (gateway, count) = counting_gateway(MemoryTokenStore::default());
        assert_eq!(gateway.authorize(&RequestOptions::get()), None);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unauthorized_clears_token_once() {
        let store = MemoryTokenStore::with_token("abc");
        let (gateway, count) = counting_gateway(store.clone());

        assert_eq!(gateway.check_status(401, "Unauthorized"), Ok(false));
        assert_eq!(store.load(), None);
        assert_eq!(gateway.check_status(403, "Forbidden"), Ok(false));
        assert_eq!(gateway.authorize(&RequestOptions::get()), None);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn other_failures_carry_status() {
        let (gateway, count) = counting_gateway(MemoryTokenStore::with_token("abc"));
        let err = gateway.check_status(500, "Internal Server Error").unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn rearmed_guard_notifies_again() {
        let store = MemoryTokenStore::with_token("abc");
        let guard = SessionGuard::new();
        let count = Cell::new(0);
        let bump = || count.set(count.get() + 1);

        assert!(guard.teardown(&store, &bump));
        assert!(!guard.teardown(&store, &bump));
        guard.rearm();
        assert!(guard.teardown(&store, &bump));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn closed_guard_stays_silent() {
        let guard = SessionGuard::new();
        guard.close();
        let store = MemoryTokenStore::with_token("abc");
        let count = Cell::new(0);
        let bump = || count.set(count.get() + 1);
        assert!(!guard.teardown(&store, &bump));
        assert_eq!(store.load(), None);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn json_options_set_body_and_content_type() {
        let options = RequestOptions::json(Method::Post, &serde_json::json!({"descripcion": "x"})).unwrap();
        assert_eq!(options.method, Method::Post);
        assert_eq!(options.body.as_deref(), Some(r#"{"descripcion":"x"}"#));
        assert_eq!(find(&options.headers, "content-type"), vec!["application/json"]);
    }
}
