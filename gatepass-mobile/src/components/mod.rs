//! Touch gesture components

pub mod gesture_settings;
pub mod pull_to_refresh;
pub mod swipe_action;

pub use gesture_settings::GestureSettingsPanel;
pub use pull_to_refresh::{PullToRefresh, RefreshAction};
pub use swipe_action::SwipeAction;
