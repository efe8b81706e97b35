use gloo_net::http::Request;
use thiserror::Error;

use crate::models::{ApiErrorBody, CurrentUser, LoginInput, RegisterRequest, TokenResponse, ValidationError};
use crate::services::error::ServiceError;
use crate::services::gateway::{AuthGateway, RequestOptions};
use crate::services::routes::ApiRoutes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Credenciales incorrectas")]
    InvalidCredentials,

    #[error("Error del servidor: {0}")]
    Server(u16),

    /// Mensaje `detail` devuelto por la API al registrar
    #[error("{0}")]
    Rejected(String),

    #[error("Error de conexión: {0}")]
    Network(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("{0}")]
    Storage(String),
}

/// Error de login según el status HTTP
pub fn login_failure(status: u16) -> AuthError {
    if status == 401 {
        AuthError::InvalidCredentials
    } else {
        AuthError::Server(status)
    }
}

/// Error de registro: el `detail` de la API si es texto, o un genérico
pub fn register_failure(body: Option<ApiErrorBody>) -> AuthError {
    let message = body
        .as_ref()
        .and_then(ApiErrorBody::message)
        .unwrap_or("Error en el registro");
    AuthError::Rejected(message.to_string())
}

/// Login con código y contraseña (`POST /token`, form-encoded)
pub async fn request_token(routes: &ApiRoutes, input: &LoginInput) -> Result<TokenResponse, AuthError> {
    input.validate()?;
    log::info!("🔐 [AUTH] Iniciando sesión para {}", input.codigo);

    let response = Request::post(&routes.token())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(input.form_body())
        .map_err(|e| AuthError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    if !response.ok() {
        log::warn!("⚠️ [AUTH] Login rechazado (HTTP {})", response.status());
        return Err(login_failure(response.status()));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::Decode(e.to_string()))
}

/// Registro de usuario (`POST /usuarios/`, JSON)
pub async fn register_user(routes: &ApiRoutes, request: &RegisterRequest) -> Result<(), AuthError> {
    log::info!("📝 [AUTH] Registrando usuario {}", request.codigo);

    let response = Request::post(&routes.users())
        .json(request)
        .map_err(|e| AuthError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    if !response.ok() {
        let body = response.json::<ApiErrorBody>().await.ok();
        log::error!("❌ [AUTH] Registro fallido (HTTP {})", response.status());
        return Err(register_failure(body));
    }

    log::info!("✅ [AUTH] Usuario {} registrado", request.codigo);
    Ok(())
}

/// Usuario autenticado (`GET /me`)
pub async fn fetch_current_user(gateway: &AuthGateway) -> Result<CurrentUser, ServiceError> {
    let routes = ApiRoutes::new();
    gateway
        .request(&routes.me(), RequestOptions::get())
        .await?
        .ok_or(ServiceError::SessionEnded)?
        .json::<CurrentUser>()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

/// `true` solo si `GET /me` respondió 2xx
pub async fn verify_session(gateway: &AuthGateway) -> bool {
    let routes = ApiRoutes::new();
    match gateway.request(&routes.me(), RequestOptions::get()).await {
        Ok(Some(_)) => true,
        Ok(None) => false,
        Err(e) => {
            log::error!("❌ [AUTH] Error verificando token: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_errors_by_status() {
        assert_eq!(login_failure(401).to_string(), "Credenciales incorrectas");
        assert_eq!(login_failure(500).to_string(), "Error del servidor: 500");
    }

    #[test]
    fn register_error_prefers_api_detail() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail":"El código ya existe"}"#).unwrap();
        assert_eq!(register_failure(Some(body)).to_string(), "El código ya existe");
        assert_eq!(register_failure(None).to_string(), "Error en el registro");

        let list: ApiErrorBody = serde_json::from_str(r#"{"detail":[{"msg":"x"}]}"#).unwrap();
        assert_eq!(register_failure(Some(list)).to_string(), "Error en el registro");
    }

    #[test]
    fn validation_message_passes_through() {
        let err: AuthError = ValidationError::MissingCredentials.into();
        assert_eq!(err.to_string(), "Por favor, complete todos los campos");
    }
}
