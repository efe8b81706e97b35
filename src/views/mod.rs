pub mod actions;
pub mod app;
pub mod dashboard;
pub mod login;
pub mod modals;
pub mod report_list;

pub use app::render_app;
pub use dashboard::update_header;
pub use modals::sync_modals;
pub use report_list::update_report_list;
