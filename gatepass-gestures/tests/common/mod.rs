//! Common test utilities and helpers

use gatepass_gestures::{PullToRefreshController, RecordingHaptics, TouchPoint};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary (honours RUST_LOG)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Controller with default configuration and a recording haptic emitter
pub fn recording_controller() -> (PullToRefreshController<RecordingHaptics>, RecordingHaptics) {
    let haptics = RecordingHaptics::new();
    (PullToRefreshController::with_defaults(haptics.clone()), haptics)
}

/// Drag from the top edge through each y position in `path`
pub fn drag(controller: &PullToRefreshController<RecordingHaptics>, path: &[f64]) {
    controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);
    for y in path {
        controller.on_touch_move(TouchPoint::new(0.0, *y));
    }
}
