// ============================================================================
// REPORT SERVICE - SOLO comunicación HTTP de reportes (stateless)
// ============================================================================

use std::rc::Rc;

use gloo_net::http::Response;
use serde::de::DeserializeOwned;

use crate::models::report::format_cancel_reason;
use crate::models::{DetailForm, Report, ReportDraft, ReportStatus, StatusChangeRequest};
use crate::services::error::{absent_on_status, ServiceError};
use crate::services::gateway::{AuthGateway, Method, RequestOptions};
use crate::services::routes::ApiRoutes;

#[derive(Clone)]
pub struct ReportService {
    gateway: Rc<AuthGateway>,
    routes: ApiRoutes,
}

impl ReportService {
    pub fn new(gateway: Rc<AuthGateway>) -> Self {
        Self {
            gateway,
            routes: ApiRoutes::new(),
        }
    }

    async fn send(&self, url: &str, options: RequestOptions) -> Result<Response, ServiceError> {
        self.gateway
            .request(url, options)
            .await?
            .ok_or(ServiceError::SessionEnded)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, ServiceError> {
        self.send(url, options)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    /// Listar reportes del usuario
    pub async fn list(&self) -> Result<Vec<Report>, ServiceError> {
        let reports: Vec<Report> = self
            .send_json(&self.routes.my_tasks_list(), RequestOptions::get())
            .await?;
        log::info!("📋 [REPORTS] {} reportes obtenidos", reports.len());
        Ok(reports)
    }

    /// Crear reporte (botón de pánico)
    pub async fn create(&self, descripcion: &str) -> Result<Report, ServiceError> {
        let draft = ReportDraft::new(descripcion)?;
        let options = RequestOptions::json(Method::Post, &draft)?;
        let report: Report = self.send_json(&self.routes.my_tasks(), options).await?;
        log::info!("✅ [REPORTS] Reporte {} creado", report.id);
        Ok(report)
    }

    /// Editar la descripción de un reporte existente
    pub async fn update(&self, id: i64, descripcion: &str) -> Result<Report, ServiceError> {
        let draft = ReportDraft::new(descripcion)?;
        let options = RequestOptions::json(Method::Put, &draft)?;
        let report: Report = self.send_json(&self.routes.my_task(id), options).await?;
        log::info!("✅ [REPORTS] Reporte {} actualizado", id);
        Ok(report)
    }

    pub async fn fetch_one(&self, id: i64) -> Result<Report, ServiceError> {
        self.send_json(&self.routes.my_task(id), RequestOptions::get())
            .await
    }

    pub async fn set_status(&self, id: i64, estado: ReportStatus) -> Result<(), ServiceError> {
        let options = RequestOptions::json(Method::Put, &StatusChangeRequest { estado })?;
        self.send(&self.routes.task_status(id), options).await?;
        log::info!("🔄 [REPORTS] Reporte {} → {}", id, estado);
        Ok(())
    }

    /// Cancelar con razón `(rol) razón`, que viaja codificada en el path
    pub async fn cancel(&self, id: i64, role: &str, reason: &str) -> Result<(), ServiceError> {
        let formatted = format_cancel_reason(role, reason)?;
        self.send(&self.routes.cancel_task(id, &formatted), RequestOptions::put())
            .await?;
        log::info!("🚫 [REPORTS] Reporte {} cancelado", id);
        Ok(())
    }

    /// Formulario existente de un reporte pendiente; `None` si aún no existe
    pub async fn get_detail_form(&self, id: i64) -> Result<Option<DetailForm>, ServiceError> {
        let result = self
            .send_json::<DetailForm>(&self.routes.my_task_form(id), RequestOptions::get())
            .await;
        absent_on_status(result)
    }

    /// Formulario guardado de un reporte completado
    pub async fn get_completed_form(&self, id: i64) -> Result<DetailForm, ServiceError> {
        self.send_json(&self.routes.task_form(id), RequestOptions::get())
            .await
    }

    pub async fn submit_detail_form(&self, id: i64, payload: &DetailForm) -> Result<(), ServiceError> {
        let options = RequestOptions::json(Method::Post, payload)?;
        self.send(&self.routes.my_task_form(id), options).await?;
        log::info!("📝 [REPORTS] Formulario del reporte {} guardado", id);
        Ok(())
    }
}
