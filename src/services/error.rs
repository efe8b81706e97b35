use thiserror::Error;

use crate::models::ValidationError;
use crate::services::gateway::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// El gateway ya cerró la sesión y notificó al usuario
    #[error("La sesión fue cerrada")]
    SessionEnded,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No hay reporte activo")]
    NoActiveReport,
}

impl ServiceError {
    /// Errores que no se muestran: ya fueron manejados por el gateway
    pub fn is_silent(&self) -> bool {
        matches!(self, ServiceError::SessionEnded)
    }
}

/// Un status no-2xx se interpreta como "no existe" en vez de error
pub fn absent_on_status<T>(result: Result<T, ServiceError>) -> Result<Option<T>, ServiceError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ServiceError::Gateway(GatewayError::Status { status, .. })) => {
            log::info!("📭 [REPORTS] Recurso no encontrado (HTTP {}), se trata como ausente", status);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_becomes_none() {
        let result: Result<u8, ServiceError> = Err(ServiceError::Gateway(GatewayError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
        }));
        assert_eq!(absent_on_status(result), Ok(None));
    }

    #[test]
    fn session_and_network_errors_pass_through() {
        let ended: Result<u8, ServiceError> = Err(ServiceError::SessionEnded);
        assert_eq!(absent_on_status(ended), Err(ServiceError::SessionEnded));

        let network: Result<u8, ServiceError> =
            Err(GatewayError::Network("offline".to_string()).into());
        assert!(matches!(absent_on_status(network), Err(ServiceError::Gateway(_))));
    }

    #[test]
    fn only_session_end_is_silent() {
        assert!(ServiceError::SessionEnded.is_silent());
        assert!(!ServiceError::Validation(ValidationError::EmptyDescription).is_silent());
    }
}
