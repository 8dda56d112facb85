//! Gesture preferences persisted in local storage

use gatepass_gestures::GestureSettings;
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use tracing::warn;

const SETTINGS_KEY: &str = "gatepass_gesture_settings";

/// Load stored settings, falling back to defaults when absent or invalid
pub fn load() -> GestureSettings {
    let stored: Result<GestureSettings, StorageError> = LocalStorage::get(SETTINGS_KEY);

    match stored {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                warn!("Ignoring stored gesture settings: {}", e);
                GestureSettings::default()
            }
        },
        Err(StorageError::KeyNotFound(_)) => GestureSettings::default(),
        Err(e) => {
            warn!("Failed to read gesture settings: {}", e);
            GestureSettings::default()
        }
    }
}

/// Validate and store settings
pub fn save(settings: &GestureSettings) -> Result<(), String> {
    settings.validate().map_err(|e| e.to_string())?;

    LocalStorage::set(SETTINGS_KEY, settings)
        .map_err(|e| format!("Failed to store gesture settings: {}", e))
}

/// Toggle haptic feedback for every recognizer
pub fn set_haptics_enabled(enabled: bool) -> Result<(), String> {
    let mut settings = load();
    settings.swipe.haptics = enabled;
    settings.pull_to_refresh.haptics = enabled;
    save(&settings)
}

/// Forget stored settings
pub fn clear() {
    LocalStorage::delete(SETTINGS_KEY);
}
