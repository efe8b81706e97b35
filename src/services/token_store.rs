// ============================================================================
// TOKEN STORE - Token de sesión persistido en localStorage
// ============================================================================

use gloo_storage::{LocalStorage, Storage};

use crate::config::CONFIG;

/// Almacén clave-valor de un único token bearer
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), String>;
    fn clear(&self);
}

/// Token guardado como string crudo (no JSON) bajo una clave fija
#[derive(Clone)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new() -> Self {
        Self {
            key: CONFIG.token_storage_key.clone(),
        }
    }
}

impl Default for LocalTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), String> {
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(|_| "Error guardando el token en localStorage".to_string())
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TokenStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Token store en memoria para tests nativos
    #[derive(Clone, Default)]
    pub struct MemoryTokenStore {
        token: Rc<RefCell<Option<String>>>,
    }

    impl MemoryTokenStore {
        pub fn with_token(token: &str) -> Self {
            let store = Self::default();
            *store.token.borrow_mut() = Some(token.to_string());
            store
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn load(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn save(&self, token: &str) -> Result<(), String> {
            *self.token.borrow_mut() = Some(token.to_string());
            Ok(())
        }

        fn clear(&self) {
            *self.token.borrow_mut() = None;
        }
    }
}
