use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::ValidationError;

/// Formulario detallado ya guardado en el servidor (1:1 con un reporte)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailForm {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nombres: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apellido_paterno: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apellido_materno: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fecha_nacimiento: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub descripcion_detallada: String,
    #[serde(default, deserialize_with = "crate::models::auth::opt_string_or_number")]
    pub codigo_udg: Option<String>,
}

/// Un campo guardado como `null` se muestra vacío
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Valores crudos leídos de los inputs del modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailFormInput {
    pub nombres: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub fecha_nacimiento: String,
    pub descripcion_detallada: String,
}

impl DetailFormInput {
    /// Todos los campos marcados con * son obligatorios
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            &self.nombres,
            &self.apellido_paterno,
            &self.apellido_materno,
            &self.fecha_nacimiento,
            &self.descripcion_detallada,
        ];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(ValidationError::MissingDetailFields);
        }
        Ok(())
    }

    /// Construye el body de `POST /my-tasks/{id}/formulario`
    pub fn into_payload(self, codigo_udg: Option<String>) -> Result<DetailForm, ValidationError> {
        self.validate()?;
        Ok(DetailForm {
            nombres: self.nombres.trim().to_string(),
            apellido_paterno: self.apellido_paterno.trim().to_string(),
            apellido_materno: self.apellido_materno.trim().to_string(),
            fecha_nacimiento: normalize_birth_date(&self.fecha_nacimiento)?,
            descripcion_detallada: self.descripcion_detallada.trim().to_string(),
            codigo_udg,
        })
    }
}

impl From<&DetailForm> for DetailFormInput {
    fn from(form: &DetailForm) -> Self {
        Self {
            nombres: form.nombres.clone(),
            apellido_paterno: form.apellido_paterno.clone(),
            apellido_materno: form.apellido_materno.clone(),
            fecha_nacimiento: form.fecha_nacimiento.clone(),
            descripcion_detallada: form.descripcion_detallada.clone(),
        }
    }
}

/// Normaliza la fecha de nacimiento a `YYYY-MM-DD`.
///
/// Acepta el valor de `<input type="date">`, `DD/MM/YYYY`, `YYYY/MM/DD` y
/// timestamps RFC 3339 (se toma la fecha tal cual, sin conversión de zona).
pub fn normalize_birth_date(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    let parsed = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    parsed
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ValidationError::InvalidBirthDate(raw.to_string()))
}

/// Fecha mostrada en la cabecera del formulario (`DD/MM/YYYY`)
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> DetailFormInput {
        DetailFormInput {
            nombres: " Ana ".to_string(),
            apellido_paterno: "López".to_string(),
            apellido_materno: " Ruiz".to_string(),
            fecha_nacimiento: "2001-03-09".to_string(),
            descripcion_detallada: "  Detalle\n".to_string(),
        }
    }

    #[test]
    fn birth_date_formats_are_normalized() {
        assert_eq!(normalize_birth_date("2001-03-09").unwrap(), "2001-03-09");
        assert_eq!(normalize_birth_date("09/03/2001").unwrap(), "2001-03-09");
        assert_eq!(normalize_birth_date("2001/03/09").unwrap(), "2001-03-09");
        assert_eq!(
            normalize_birth_date("2001-03-09T23:30:00-06:00").unwrap(),
            "2001-03-09"
        );
    }

    #[test]
    fn invalid_birth_date_is_rejected() {
        assert_eq!(
            normalize_birth_date("ayer"),
            Err(ValidationError::InvalidBirthDate("ayer".to_string()))
        );
    }

    #[test]
    fn payload_trims_every_text_field() {
        let payload = input().into_payload(Some("219000000".to_string())).unwrap();
        assert_eq!(payload.nombres, "Ana");
        assert_eq!(payload.apellido_materno, "Ruiz");
        assert_eq!(payload.descripcion_detallada, "Detalle");
        assert_eq!(payload.codigo_udg.as_deref(), Some("219000000"));
    }

    #[test]
    fn blank_required_field_fails_validation() {
        let mut missing = input();
        missing.apellido_paterno = "   ".to_string();
        assert_eq!(missing.validate(), Err(ValidationError::MissingDetailFields));
    }

    #[test]
    fn stored_form_accepts_numeric_codigo() {
        let json = r#"{"nombres":"A","apellido_paterno":"B","apellido_materno":"C",
            "fecha_nacimiento":"2000-01-01","descripcion_detallada":"D","codigo_udg":219}"#;
        let form: DetailForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.codigo_udg.as_deref(), Some("219"));
    }

    #[test]
    fn stored_form_with_null_fields_reads_as_empty() {
        let json = r#"{"nombres":"A","apellido_paterno":null,"apellido_materno":"C",
            "fecha_nacimiento":null,"descripcion_detallada":"D","codigo_udg":null}"#;
        let form: DetailForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.nombres, "A");
        assert_eq!(form.apellido_paterno, "");
        assert_eq!(form.fecha_nacimiento, "");
        assert_eq!(form.codigo_udg, None);
    }

    #[test]
    fn display_date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(display_date(date), "05/02/2024");
    }
}
