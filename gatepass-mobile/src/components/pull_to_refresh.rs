//! Pull-to-refresh component for mobile

use futures::future::{FutureExt, LocalBoxFuture};
use gatepass_gestures::{Phase, PullFeedback, PullToRefreshConfig, PullToRefreshController, Release};
use std::future::Future;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, TouchEvent};
use yew::prelude::*;

use crate::haptics::VibrationHaptics;
use crate::{settings, touch_point};

/// The container is the scroll surface; native overscroll would fight the pull
const CONTAINER_STYLE: &str = "overflow-y: auto; overscroll-behavior-y: contain;";

/// Asynchronous refresh supplied by the page.
///
/// The action reports its own failures to the user; the component only
/// waits for it to finish.
#[derive(Clone)]
pub struct RefreshAction(Rc<dyn Fn() -> LocalBoxFuture<'static, Result<(), String>>>);

impl RefreshAction {
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), String>> + 'static,
    {
        Self(Rc::new(move || action().boxed_local()))
    }

    fn call(&self) -> LocalBoxFuture<'static, Result<(), String>> {
        (self.0)()
    }
}

impl PartialEq for RefreshAction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct PullToRefreshProps {
    #[prop_or_default]
    pub children: Children,
    pub on_refresh: RefreshAction,
    /// Overrides the stored gesture settings
    #[prop_or_default]
    pub config: Option<PullToRefreshConfig>,
}

#[function_component(PullToRefresh)]
pub fn pull_to_refresh(props: &PullToRefreshProps) -> Html {
    let container = use_node_ref();
    let redraw = use_force_update();

    let controller = use_memo(props.config.clone(), |config| {
        let config = config
            .clone()
            .unwrap_or_else(|| settings::load().pull_to_refresh);

        PullToRefreshController::new(config, VibrationHaptics).unwrap_or_else(|e| {
            warn!("Invalid pull-to-refresh config, using defaults: {}", e);
            PullToRefreshController::with_defaults(VibrationHaptics)
        })
    });

    let on_touch_start = {
        let controller = controller.clone();
        let container = container.clone();
        let redraw = redraw.clone();

        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                let container_offset = container
                    .cast::<HtmlElement>()
                    .map(|el| el.scroll_top() as f64)
                    .unwrap_or(0.0);
                let document_offset = web_sys::window()
                    .and_then(|window| window.scroll_y().ok())
                    .unwrap_or(0.0);

                controller.on_touch_start(
                    touch_point(&touch),
                    scroll_offset(container_offset, document_offset),
                );
                redraw.force_update();
            }
        })
    };

    let on_touch_move = {
        let controller = controller.clone();
        let redraw = redraw.clone();

        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                if let Some(feedback) = controller.on_touch_move(touch_point(&touch)) {
                    if blocks_native_scroll(&feedback) {
                        e.prevent_default();
                    }
                    redraw.force_update();
                }
            }
        })
    };

    let on_touch_end = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        let on_refresh = props.on_refresh.clone();

        Callback::from(move |_: TouchEvent| match controller.release() {
            Release::Ignored => {}
            Release::Cancelled => redraw.force_update(),
            Release::Refresh(guard) => {
                redraw.force_update();

                let on_refresh = on_refresh.clone();
                let redraw = redraw.clone();
                spawn_local(async move {
                    guard.run(move || on_refresh.call()).await;
                    redraw.force_update();
                });
            }
        })
    };

    let on_touch_cancel = {
        let controller = controller.clone();
        let redraw = redraw.clone();

        Callback::from(move |_: TouchEvent| {
            controller.on_touch_cancel();
            redraw.force_update();
        })
    };

    if controller.config().disabled {
        return html! {
            <div ref={container} class="pull-to-refresh-container" style={CONTAINER_STYLE}>
                {props.children.clone()}
            </div>
        };
    }

    let state = controller.state();
    let feedback = controller.feedback();

    let indicator = match state.phase {
        Phase::Pulling if state.pull_distance > 0.0 => html! {
            <div class="pull-indicator" style={format!("opacity: {}", feedback.progress)}>
                <span
                    class="pull-spinner"
                    style={format!("transform: rotate({}deg)", feedback.rotation_deg())}
                />
                {if feedback.armed { "Release to refresh" } else { "Pull to refresh" }}
            </div>
        },
        Phase::Refreshing => html! {
            <div class="pull-indicator refreshing">
                <span class="pull-spinner spinning" />
                {"Refreshing..."}
            </div>
        },
        _ => html! {},
    };

    // Follow the finger while pulling, ease back otherwise
    let transition = if state.phase == Phase::Pulling {
        "none"
    } else {
        "transform 0.2s"
    };
    let style = format!(
        "transform: translateY({}px); transition: {};",
        state.pull_distance, transition
    );

    html! {
        <div
            ref={container}
            class="pull-to-refresh-container"
            style={CONTAINER_STYLE}
            ontouchstart={on_touch_start}
            ontouchmove={on_touch_move}
            ontouchend={on_touch_end}
            ontouchcancel={on_touch_cancel}
        >
            {indicator}

            <div style={style}>
                {props.children.clone()}
            </div>
        </div>
    }
}

/// A pull may only begin when neither the container nor the document is scrolled
fn scroll_offset(container: f64, document: f64) -> f64 {
    container.max(document)
}

/// Once the content visibly follows the finger, the browser must not scroll too
fn blocks_native_scroll(feedback: &PullFeedback) -> bool {
    feedback.pull_distance > 0.0
}
