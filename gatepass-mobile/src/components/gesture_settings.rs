//! Gesture settings section for the settings page

use gatepass_gestures::GestureSettings;
use yew::prelude::*;

use crate::settings;

#[function_component(GestureSettingsPanel)]
pub fn gesture_settings_panel() -> Html {
    let current = use_state(settings::load);
    let error = use_state(|| None::<String>);

    let toggle_haptics = {
        let current = current.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| {
            let enabled = !haptics_enabled(&current);

            match settings::set_haptics_enabled(enabled) {
                Ok(()) => {
                    error.set(None);
                    current.set(settings::load());
                }
                Err(e) => error.set(Some(e)),
            }
        })
    };

    let reset = {
        let current = current.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| {
            settings::clear();
            error.set(None);
            current.set(GestureSettings::default());
        })
    };

    let haptics_on = haptics_enabled(&current);

    html! {
        <div class="settings-section">
            <h2>{"Gestures"}</h2>
            <button class="mobile-button" onclick={toggle_haptics}>
                {if haptics_on { "Haptic feedback: On" } else { "Haptic feedback: Off" }}
            </button>
            <button class="mobile-button secondary" onclick={reset}>
                {"Reset gesture settings"}
            </button>
            {if let Some(message) = (*error).clone() {
                html! { <p class="settings-error">{message}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}

/// Haptics count as on while any recognizer still emits them
fn haptics_enabled(settings: &GestureSettings) -> bool {
    settings.swipe.haptics || settings.pull_to_refresh.haptics
}
