// ============================================================================
// APP VIEW - Elige entre login y dashboard
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::viewmodels::DashboardViewModel;
use crate::views::dashboard::render_dashboard;
use crate::views::login::render_login;

pub fn render_app(vm: &DashboardViewModel) -> Result<Element, JsValue> {
    if vm.state().auth.get_logged_in() {
        render_dashboard(vm)
    } else {
        render_login(vm.state())
    }
}
