//! Haptic feedback through the browser Vibration API

use gatepass_gestures::{HapticEmitter, HapticPattern};
use tracing::trace;
use wasm_bindgen::JsValue;

/// Emits haptic patterns with `navigator.vibrate`.
///
/// Browsers without vibration support (or that block it before a user
/// gesture) simply refuse the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VibrationHaptics;

impl HapticEmitter for VibrationHaptics {
    fn emit(&self, pattern: HapticPattern) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let navigator = window.navigator();

        let accepted = match pattern.vibration_ms() {
            [duration] => navigator.vibrate_with_duration(*duration),
            durations => {
                let sequence: js_sys::Array = durations.iter().map(|ms| JsValue::from(*ms)).collect();
                navigator.vibrate_with_pattern(&sequence)
            }
        };

        if !accepted {
            trace!("Vibration request for {} haptic refused", pattern);
        }
    }
}
