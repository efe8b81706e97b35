use crate::config::CONFIG;

/// Rutas de la API REST. Solo arma URLs, no hace requests.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRoutes {
    base_url: String,
}

impl ApiRoutes {
    pub fn new() -> Self {
        Self::with_base(&CONFIG.api_url)
    }

    pub fn with_base(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn token(&self) -> String {
        format!("{}/token", self.base_url)
    }

    pub fn users(&self) -> String {
        format!("{}/usuarios/", self.base_url)
    }

    pub fn me(&self) -> String {
        format!("{}/me", self.base_url)
    }

    pub fn my_tasks_list(&self) -> String {
        format!("{}/my-tasks/", self.base_url)
    }

    pub fn my_tasks(&self) -> String {
        format!("{}/my-tasks", self.base_url)
    }

    pub fn my_task(&self, id: i64) -> String {
        format!("{}/my-tasks/{}", self.base_url, id)
    }

    /// La razón viaja en el path, no en el body: debe ir percent-encoded
    pub fn cancel_task(&self, id: i64, formatted_reason: &str) -> String {
        format!(
            "{}/my-tasks/{}/{}",
            self.base_url,
            id,
            urlencoding::encode(formatted_reason)
        )
    }

    pub fn task_status(&self, id: i64) -> String {
        format!("{}/tasks/{}/estado", self.base_url, id)
    }

    pub fn my_task_form(&self, id: i64) -> String {
        format!("{}/my-tasks/{}/formulario", self.base_url, id)
    }

    pub fn task_form(&self, id: i64) -> String {
        format!("{}/tasks/{}/formulario", self.base_url, id)
    }
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::format_cancel_reason;

    fn routes() -> ApiRoutes {
        ApiRoutes::with_base("http://api.local/")
    }

    #[test]
    fn report_routes() {
        let r = routes();
        assert_eq!(r.my_tasks_list(), "http://api.local/my-tasks/");
        assert_eq!(r.my_tasks(), "http://api.local/my-tasks");
        assert_eq!(r.my_task(4), "http://api.local/my-tasks/4");
        assert_eq!(r.task_status(4), "http://api.local/tasks/4/estado");
        assert_eq!(r.my_task_form(3), "http://api.local/my-tasks/3/formulario");
        assert_eq!(r.task_form(3), "http://api.local/tasks/3/formulario");
        assert_eq!(r.token(), "http://api.local/token");
        assert_eq!(r.users(), "http://api.local/usuarios/");
        assert_eq!(r.me(), "http://api.local/me");
    }

    #[test]
    fn cancel_reason_is_a_single_encoded_segment() {
        let reason = format_cancel_reason("alumno", "ya no aplica / duplicado? 50%").unwrap();
        let url = routes().cancel_task(12, &reason);

        let prefix = "http://api.local/my-tasks/12/";
        assert!(url.starts_with(prefix));
        let segment = &url[prefix.len()..];
        assert!(!segment.contains('/'));
        assert!(!segment.contains(' '));
        assert!(!segment.contains('?'));

        let decoded = urlencoding::decode(segment).unwrap();
        assert_eq!(decoded, "(alumno) ya no aplica / duplicado? 50%");
    }
}
