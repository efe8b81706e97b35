pub mod dashboard_viewmodel;
pub mod polling;
pub mod session_viewmodel;

pub use dashboard_viewmodel::DashboardViewModel;
pub use polling::Poller;
pub use session_viewmodel::SessionViewModel;
