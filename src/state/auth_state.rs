// ============================================================================
// AUTH STATE - Estado de autenticación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::gateway::SessionGuard;

/// Pantalla visible cuando no hay sesión
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthView {
    #[default]
    Login,
    Register,
    Forgot,
    Confirmation,
}

#[derive(Clone)]
pub struct AuthState {
    pub is_logged_in: Rc<RefCell<bool>>,
    pub view: Rc<RefCell<AuthView>>,
    /// Mensaje de error bajo el formulario de login
    pub login_error: Rc<RefCell<Option<String>>>,
    /// Compartido con el gateway: un cierre de sesión por evento
    pub guard: Rc<SessionGuard>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            is_logged_in: Rc::new(RefCell::new(false)),
            view: Rc::new(RefCell::new(AuthView::Login)),
            login_error: Rc::new(RefCell::new(None)),
            guard: Rc::new(SessionGuard::new()),
        }
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        *self.is_logged_in.borrow_mut() = logged_in;
    }

    pub fn get_logged_in(&self) -> bool {
        *self.is_logged_in.borrow()
    }

    pub fn set_view(&self, view: AuthView) {
        *self.view.borrow_mut() = view;
    }

    pub fn get_view(&self) -> AuthView {
        *self.view.borrow()
    }

    pub fn set_login_error(&self, message: Option<String>) {
        *self.login_error.borrow_mut() = message;
    }

    pub fn get_login_error(&self) -> Option<String> {
        self.login_error.borrow().clone()
    }

    /// Sesión iniciada: rearma el guard para el próximo 401/403
    pub fn start_session(&self) {
        self.guard.rearm();
        self.set_login_error(None);
        self.set_logged_in(true);
    }

    /// Vuelve a la pantalla de login
    pub fn end_session(&self) {
        self.set_logged_in(false);
        self.set_view(AuthView::Login);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::token_store::testing::MemoryTokenStore;

    #[test]
    fn login_rearms_guard_after_teardown() {
        let auth = AuthState::new();
        let store = MemoryTokenStore::with_token("viejo");
        assert!(auth.guard.teardown(&store, &|| {}));
        auth.end_session();
        assert!(auth.guard.is_tripped());

        auth.start_session();
        assert!(!auth.guard.is_tripped());
        assert!(auth.get_logged_in());
    }

    #[test]
    fn end_session_returns_to_login_view() {
        let auth = AuthState::new();
        auth.set_view(AuthView::Register);
        auth.set_logged_in(true);
        auth.end_session();
        assert_eq!(auth.get_view(), AuthView::Login);
        assert!(!auth.get_logged_in());
    }
}
