//! Swipe action component for mobile lists

use gatepass_gestures::{SwipeConfig, SwipeDirection, SwipeRecognizer};
use tracing::warn;
use web_sys::TouchEvent;
use yew::prelude::*;

use crate::haptics::VibrationHaptics;
use crate::{settings, touch_point};

/// Horizontal drag offset at which the action label is revealed
const REVEAL_OFFSET: f64 = 20.0;
const MAX_OFFSET: f64 = 100.0;

#[derive(Properties, PartialEq)]
pub struct SwipeActionProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub on_swipe_left: Option<Callback<()>>,
    #[prop_or_default]
    pub on_swipe_right: Option<Callback<()>>,
    #[prop_or_default]
    pub on_swipe_up: Option<Callback<()>>,
    #[prop_or_default]
    pub on_swipe_down: Option<Callback<()>>,
    #[prop_or_default]
    pub left_action_label: Option<String>,
    #[prop_or_default]
    pub right_action_label: Option<String>,
    /// Overrides the stored gesture settings
    #[prop_or_default]
    pub config: Option<SwipeConfig>,
}

#[function_component(SwipeAction)]
pub fn swipe_action(props: &SwipeActionProps) -> Html {
    let swipe_offset = use_state(|| 0.0);

    let recognizer = use_memo(props.config.clone(), |config| {
        let config = config.clone().unwrap_or_else(|| settings::load().swipe);

        SwipeRecognizer::new(config, VibrationHaptics).unwrap_or_else(|e| {
            warn!("Invalid swipe config, using defaults: {}", e);
            SwipeRecognizer::with_defaults(VibrationHaptics)
        })
    });

    let on_touch_start = {
        let recognizer = recognizer.clone();

        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                recognizer.on_touch_start(touch_point(&touch));
            }
        })
    };

    let on_touch_move = {
        let recognizer = recognizer.clone();
        let swipe_offset = swipe_offset.clone();

        Callback::from(move |e: TouchEvent| {
            if let (Some(origin), Some(touch)) = (recognizer.origin(), e.touches().get(0)) {
                let offset = (touch_point(&touch).x - origin.x).clamp(-MAX_OFFSET, MAX_OFFSET);
                swipe_offset.set(offset);
            }
        })
    };

    let on_touch_end = {
        let recognizer = recognizer.clone();
        let swipe_offset = swipe_offset.clone();
        let on_swipe_left = props.on_swipe_left.clone();
        let on_swipe_right = props.on_swipe_right.clone();
        let on_swipe_up = props.on_swipe_up.clone();
        let on_swipe_down = props.on_swipe_down.clone();

        Callback::from(move |e: TouchEvent| {
            swipe_offset.set(0.0);

            let Some(touch) = e.changed_touches().get(0) else {
                recognizer.on_touch_cancel();
                return;
            };

            let callback = match recognizer.on_touch_end(touch_point(&touch)) {
                Some(SwipeDirection::Left) => &on_swipe_left,
                Some(SwipeDirection::Right) => &on_swipe_right,
                Some(SwipeDirection::Up) => &on_swipe_up,
                Some(SwipeDirection::Down) => &on_swipe_down,
                None => return,
            };

            if let Some(callback) = callback {
                callback.emit(());
            }
        })
    };

    let on_touch_cancel = {
        let recognizer = recognizer.clone();
        let swipe_offset = swipe_offset.clone();

        Callback::from(move |_: TouchEvent| {
            recognizer.on_touch_cancel();
            swipe_offset.set(0.0);
        })
    };

    if recognizer.config().disabled {
        return html! {
            <div class="swipe-action-container">
                {props.children.clone()}
            </div>
        };
    }

    let action_label = |label: &Option<String>| label.clone().unwrap_or_else(|| "Action".to_string());

    let style = format!(
        "transform: translateX({}px); transition: transform 0.2s;",
        *swipe_offset
    );

    html! {
        <div class="swipe-action-container">
            {if *swipe_offset < -REVEAL_OFFSET {
                html! {
                    <div class="swipe-action-left">
                        {action_label(&props.left_action_label)}
                    </div>
                }
            } else {
                html! {}
            }}

            {if *swipe_offset > REVEAL_OFFSET {
                html! {
                    <div class="swipe-action-right">
                        {action_label(&props.right_action_label)}
                    </div>
                }
            } else {
                html! {}
            }}

            <div
                class="swipe-content"
                style={style}
                ontouchstart={on_touch_start}
                ontouchmove={on_touch_move}
                ontouchend={on_touch_end}
                ontouchcancel={on_touch_cancel}
            >
                {props.children.clone()}
            </div>
        </div>
    }
}
