//! GatePass Mobile gestures
//!
//! Yew components that mount the touch gesture core on DOM touch events.
//! Pages wrap scrollable lists in [`PullToRefresh`] and list rows in
//! [`SwipeAction`]; both read defaults from the gesture preferences stored
//! in the browser and emit haptics through the Vibration API.

pub mod components;
pub mod haptics;
pub mod logging;
pub mod settings;

pub use components::{GestureSettingsPanel, PullToRefresh, RefreshAction, SwipeAction};
pub use haptics::VibrationHaptics;

use gatepass_gestures::TouchPoint;
use web_sys::Touch;

/// Viewport coordinates of a DOM touch
pub(crate) fn touch_point(touch: &Touch) -> TouchPoint {
    TouchPoint::new(touch.client_x() as f64, touch.client_y() as f64)
}

/// Entry point for WASM: console logging, then mount the host application
#[cfg(target_arch = "wasm32")]
pub fn run_app<App>()
where
    App: yew::BaseComponent,
    App::Properties: Default,
{
    logging::init_default();
    yew::Renderer::<App>::new().render();
}
