// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod app_state;
pub mod auth_state;
pub mod ui_state;

pub use app_state::*;
pub use auth_state::*;
pub use ui_state::*;
