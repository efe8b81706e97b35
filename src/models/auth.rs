use serde::{Deserialize, Deserializer, Serialize};

use crate::models::ValidationError;

/// Respuesta de `POST /token`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Usuario autenticado (`GET /me`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct CurrentUser {
    #[serde(default)]
    pub correo: String,
    #[serde(deserialize_with = "string_or_number")]
    pub codigo: String,
    #[serde(default)]
    pub rol: String,
}

impl CurrentUser {
    pub fn header_label(&self) -> String {
        format!("Usuario: {} ({})", self.correo, self.codigo)
    }
}

/// Credenciales del formulario de login
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LoginInput {
    pub codigo: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.codigo.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }

    /// Body `application/x-www-form-urlencoded` que espera `/token`
    pub fn form_body(&self) -> String {
        format!(
            "username={}&password={}",
            urlencoding::encode(&self.codigo),
            urlencoding::encode(&self.password)
        )
    }
}

/// Campos del formulario de registro
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RegisterInput {
    pub codigo: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterInput {
    pub fn into_request(self) -> Result<RegisterRequest, ValidationError> {
        if self.codigo.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingCredentials);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(RegisterRequest {
            codigo: self.codigo,
            correo: self.email,
            contrasena: self.password,
        })
    }
}

/// Body de `POST /usuarios/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub codigo: String,
    pub correo: String,
    pub contrasena: String,
}

/// Cuerpo de error de la API (`{"detail": ...}`)
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Solo un `detail` de texto es presentable; listas de validación no
    pub fn message(&self) -> Option<&str> {
        self.detail.as_ref().and_then(|d| d.as_str())
    }
}

fn value_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// La API a veces envía el código como número
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, confirm: &str) -> RegisterInput {
        RegisterInput {
            codigo: "219".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn current_user_codigo_as_number_or_string() {
        let numeric: CurrentUser =
            serde_json::from_str(r#"{"correo":"a@b.mx","codigo":219,"rol":"alumno"}"#).unwrap();
        let text: CurrentUser =
            serde_json::from_str(r#"{"correo":"a@b.mx","codigo":"219","rol":"alumno"}"#).unwrap();
        assert_eq!(numeric.codigo, "219");
        assert_eq!(numeric, text);
        assert_eq!(numeric.header_label(), "Usuario: a@b.mx (219)");
    }

    #[test]
    fn login_requires_both_fields_and_encodes_form() {
        let empty = LoginInput::default();
        assert_eq!(empty.validate(), Err(ValidationError::MissingCredentials));

        let input = LoginInput {
            codigo: "219 x".to_string(),
            password: "p&ss=1".to_string(),
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.form_body(), "username=219%20x&password=p%26ss%3D1");
    }

    #[test]
    fn register_validation_order() {
        assert_eq!(
            register("", "a", "a").into_request(),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            register("a@b.mx", "a", "b").into_request(),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            register("correo", "a", "a").into_request(),
            Err(ValidationError::InvalidEmail)
        );
        let request = register("a@b.mx", "a", "a").into_request().unwrap();
        assert_eq!(request.correo, "a@b.mx");
        assert_eq!(request.contrasena, "a");
    }

    #[test]
    fn api_error_detail_only_when_text() {
        let text: ApiErrorBody = serde_json::from_str(r#"{"detail":"Código ya registrado"}"#).unwrap();
        assert_eq!(text.message(), Some("Código ya registrado"));
        let list: ApiErrorBody = serde_json::from_str(r#"{"detail":[{"msg":"x"}]}"#).unwrap();
        assert_eq!(list.message(), None);
    }
}
