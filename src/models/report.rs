use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ValidationError;

/// Estado de un reporte (tal como lo envía la API)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Pendiente,
    Activo,
    Completado,
    Cancelado,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pendiente => "Pendiente",
            ReportStatus::Activo => "Activo",
            ReportStatus::Completado => "Completado",
            ReportStatus::Cancelado => "Cancelado",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporte de incidente. El servidor es dueño del `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub descripcion: String,
    pub estado: ReportStatus,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub hora: Option<String>,
    /// Razón de cancelación, ya con el prefijo de rol
    #[serde(default)]
    pub razon: Option<String>,
}

impl Report {
    /// Razón de cancelación visible: solo para cancelados y si no está vacía
    pub fn cancellation_note(&self) -> Option<&str> {
        if self.estado != ReportStatus::Cancelado {
            return None;
        }
        self.razon
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    pub fn timestamp_label(&self) -> String {
        format!("{} {}", self.fecha, self.hora.as_deref().unwrap_or(""))
            .trim_end()
            .to_string()
    }
}

/// Body de `POST /my-tasks` y `PUT /my-tasks/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDraft {
    pub descripcion: String,
}

impl ReportDraft {
    /// Valida localmente antes de tocar la red
    pub fn new(descripcion: &str) -> Result<Self, ValidationError> {
        let descripcion = descripcion.trim();
        if descripcion.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self {
            descripcion: descripcion.to_string(),
        })
    }
}

/// Body de `PUT /tasks/{id}/estado`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChangeRequest {
    pub estado: ReportStatus,
}

/// Compone la razón de cancelación con el rol del usuario: `(rol) razón`
pub fn format_cancel_reason(role: &str, reason: &str) -> Result<String, ValidationError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::EmptyCancelReason);
    }
    Ok(format!("({}) {}", role, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(estado: ReportStatus, razon: Option<&str>) -> Report {
        Report {
            id: 7,
            descripcion: "Fuga de agua".to_string(),
            estado,
            fecha: "2024-05-01".to_string(),
            hora: Some("10:30".to_string()),
            razon: razon.map(str::to_string),
        }
    }

    #[test]
    fn deserializes_api_payload() {
        let json = r#"[{"id":1,"descripcion":"x","estado":"Pendiente","fecha":"2024-01-02","hora":null}]"#;
        let reports: Vec<Report> = serde_json::from_str(json).unwrap();
        assert_eq!(reports[0].estado, ReportStatus::Pendiente);
        assert_eq!(reports[0].razon, None);
        assert_eq!(reports[0].timestamp_label(), "2024-01-02");
    }

    #[test]
    fn cancellation_note_only_for_canceled_with_text() {
        assert_eq!(
            report(ReportStatus::Cancelado, Some("(alumno) duplicado")).cancellation_note(),
            Some("(alumno) duplicado")
        );
        assert_eq!(report(ReportStatus::Cancelado, Some("   ")).cancellation_note(), None);
        assert_eq!(report(ReportStatus::Completado, Some("algo")).cancellation_note(), None);
    }

    #[test]
    fn draft_trims_and_rejects_blank() {
        assert_eq!(ReportDraft::new("  hola ").unwrap().descripcion, "hola");
        assert_eq!(ReportDraft::new(" \n "), Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn cancel_reason_is_prefixed_with_role() {
        assert_eq!(
            format_cancel_reason("admin", "  ya resuelto "),
            Ok("(admin) ya resuelto".to_string())
        );
        assert_eq!(
            format_cancel_reason("admin", ""),
            Err(ValidationError::EmptyCancelReason)
        );
    }

    #[test]
    fn status_change_serializes_spanish_name() {
        let body = serde_json::to_string(&StatusChangeRequest {
            estado: ReportStatus::Completado,
        })
        .unwrap();
        assert_eq!(body, r#"{"estado":"Completado"}"#);
    }
}
