pub mod auth_service;
pub mod error;
pub mod gateway;
pub mod report_service;
pub mod routes;
pub mod token_store;

pub use error::ServiceError;
pub use gateway::AuthGateway;
pub use report_service::ReportService;
pub use routes::ApiRoutes;
pub use token_store::{LocalTokenStore, TokenStore};
