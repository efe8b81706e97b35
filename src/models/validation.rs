use thiserror::Error;

/// Errores de validación local. Se detectan antes de cualquier request
/// y el mensaje se muestra tal cual junto al formulario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("La descripción es obligatoria")]
    EmptyDescription,

    #[error("La razón de cancelación es obligatoria")]
    EmptyCancelReason,

    #[error("Por favor, complete todos los campos obligatorios marcados con *")]
    MissingDetailFields,

    #[error("Fecha de nacimiento inválida: {0}")]
    InvalidBirthDate(String),

    #[error("Por favor, complete todos los campos")]
    MissingCredentials,

    #[error("Las contraseñas no coinciden")]
    PasswordMismatch,

    #[error("Por favor, ingrese un correo electrónico válido")]
    InvalidEmail,
}
