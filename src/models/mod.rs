pub mod auth;
pub mod detail_form;
pub mod report;
pub mod validation;

pub use auth::{ApiErrorBody, CurrentUser, LoginInput, RegisterInput, RegisterRequest, TokenResponse};
pub use detail_form::{DetailForm, DetailFormInput};
pub use report::{Report, ReportDraft, ReportStatus, StatusChangeRequest};
pub use validation::ValidationError;
