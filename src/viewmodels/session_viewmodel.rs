// ============================================================================
// SESSION VIEWMODEL - Login, registro y cierre de sesión
// ============================================================================

use gloo_timers::callback::Timeout;

use crate::dom::alert;
use crate::models::{LoginInput, RegisterInput};
use crate::services::auth_service::{register_user, request_token, AuthError};
use crate::services::{ApiRoutes, LocalTokenStore, TokenStore};
use crate::state::{AppState, AuthView};

pub const SESSION_EXPIRED_MESSAGE: &str = "Tu sesión ha expirado. Serás redirigido al login.";

/// Re-render completo en el próximo tick (fuera de cualquier borrow actual)
fn schedule_rerender() {
    Timeout::new(0, crate::rerender_app).forget();
}

/// Cierre forzado por el gateway (401/403 o token ausente).
/// El token ya fue borrado por el gateway.
pub fn expire_session(state: &AppState) {
    log::warn!("🔒 [SESSION] Sesión expirada, volviendo al login");
    alert(SESSION_EXPIRED_MESSAGE);
    state.reset_session();
    state.auth.end_session();
    schedule_rerender();
}

pub struct SessionViewModel {
    state: AppState,
    routes: ApiRoutes,
    store: LocalTokenStore,
}

impl SessionViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            routes: ApiRoutes::new(),
            store: LocalTokenStore::new(),
        }
    }

    /// Login: borra cualquier token previo, pide uno nuevo y lo guarda
    pub async fn login(&self, input: LoginInput) -> Result<(), AuthError> {
        self.store.clear();
        input.validate()?;

        let token = request_token(&self.routes, &input).await?;
        self.store
            .save(&token.access_token)
            .map_err(AuthError::Storage)?;

        self.state.reset_session();
        self.state.auth.start_session();
        log::info!("✅ [SESSION] Login exitoso para {}", input.codigo);
        Ok(())
    }

    pub async fn register(&self, input: RegisterInput) -> Result<(), AuthError> {
        let request = input.into_request()?;
        register_user(&self.routes, &request).await?;
        self.state.auth.set_view(AuthView::Login);
        Ok(())
    }

    /// Logout explícito: sin alerta y sin disparar el guard
    pub fn logout(&self) {
        log::info!("👋 [SESSION] Cerrando sesión");
        self.state.auth.guard.close();
        self.store.clear();
        self.state.reset_session();
        self.state.auth.end_session();
    }
}
