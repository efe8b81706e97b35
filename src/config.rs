use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub token_storage_key: String,
    pub enable_logging: bool,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Re-render de la lista sin verificar sesión
    pub fast_interval_ms: u32,
    /// Verificación de token (`GET /me`) seguida de re-render
    pub slow_interval_ms: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            fast_interval_ms: 3_000,
            slow_interval_ms: 30_000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            token_storage_key: "access_token".to_string(),
            enable_logging: true,
            polling: PollingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: option_env!("API_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .map(|s| s.to_string())
                .unwrap_or(defaults.token_storage_key),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enable_logging),
            polling: PollingConfig {
                fast_interval_ms: option_env!("FAST_POLL_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.polling.fast_interval_ms),
                slow_interval_ms: option_env!("SLOW_POLL_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.polling.slow_interval_ms),
            },
        }
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_api() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.token_storage_key, "access_token");
        assert_eq!(config.polling.fast_interval_ms, 3_000);
        assert_eq!(config.polling.slow_interval_ms, 30_000);
    }

    #[test]
    fn logging_switch_picks_level() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Info);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
