//! Pull-to-refresh controller
//!
//! State machine driven by touch events on a scrollable surface:
//!
//! ```text
//! Idle --start at top--> Pulling --release past threshold--> Refreshing --action done--> Idle
//!                           \--release below threshold / cancel---------------------> Idle
//! ```
//!
//! Finger travel is damped by the resistance factor and capped at
//! `threshold * max_pull_multiplier`. While refreshing, new pulls are
//! rejected, so the refresh action never overlaps itself. The state always
//! returns to idle once the refresh ends, whether the action succeeded,
//! failed, panicked, or its future was dropped.

use crate::config::PullToRefreshConfig;
use crate::haptics::{HapticEmitter, NoopHaptics};
use crate::{Result, TouchPoint};
use std::cell::Cell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pulling,
    Refreshing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pulling => write!(f, "pulling"),
            Self::Refreshing => write!(f, "refreshing"),
        }
    }
}

/// Snapshot of the controller state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub phase: Phase,
    /// Vertical position where the pull began
    pub start_y: f64,
    /// Damped pull distance, in `[0, threshold * max_pull_multiplier]`
    pub pull_distance: f64,
}

/// Visual feedback for the pull in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullFeedback {
    pub pull_distance: f64,
    /// `pull_distance / threshold`, capped at 1
    pub progress: f64,
    /// A release now would trigger a refresh
    pub armed: bool,
}

impl PullFeedback {
    /// Indicator rotation in degrees
    pub fn rotation_deg(&self) -> f64 {
        self.progress * 360.0
    }
}

/// How a refresh action completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed,
    Failed,
}

/// Result of a touch end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No pull was in progress
    Ignored,
    /// Released below threshold; refresh not invoked
    Cancelled,
    Refreshed,
    /// Refresh action returned an error; the action reports it to the user
    RefreshFailed,
}

impl From<RefreshOutcome> for ReleaseOutcome {
    fn from(outcome: RefreshOutcome) -> Self {
        match outcome {
            RefreshOutcome::Completed => ReleaseOutcome::Refreshed,
            RefreshOutcome::Failed => ReleaseOutcome::RefreshFailed,
        }
    }
}

/// Synchronous half of a touch end
#[derive(Debug)]
#[must_use = "dropping a Release::Refresh guard ends the refresh immediately"]
pub enum Release {
    Ignored,
    Cancelled,
    /// The controller is refreshing until the guard is dropped
    Refresh(RefreshGuard),
}

/// Holds the controller in the refreshing phase.
///
/// Dropping the guard returns the controller to idle with no pull distance.
#[derive(Debug)]
#[must_use = "the controller leaves the refreshing phase when the guard is dropped"]
pub struct RefreshGuard {
    state: Rc<Cell<GestureState>>,
}

impl RefreshGuard {
    /// Invoke the refresh action once and wait for it to finish
    pub async fn run<F, Fut, E>(self, action: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Display,
    {
        let outcome = match action().await {
            Ok(()) => {
                debug!("Refresh action completed");
                RefreshOutcome::Completed
            }
            Err(e) => {
                warn!("Refresh action failed: {}", e);
                RefreshOutcome::Failed
            }
        };

        drop(self);
        outcome
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.state.set(GestureState::default());
        debug!("Pull-to-refresh returned to idle");
    }
}

/// Tracks pull gestures and runs the refresh action past the threshold
pub struct PullToRefreshController<H = NoopHaptics> {
    config: PullToRefreshConfig,
    haptics: H,
    state: Rc<Cell<GestureState>>,
}

impl<H: HapticEmitter> PullToRefreshController<H> {
    pub fn new(config: PullToRefreshConfig, haptics: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            haptics,
            state: Rc::new(Cell::new(GestureState::default())),
        })
    }

    /// Controller with default configuration
    pub fn with_defaults(haptics: H) -> Self {
        Self {
            config: PullToRefreshConfig::default(),
            haptics,
            state: Rc::new(Cell::new(GestureState::default())),
        }
    }

    pub fn config(&self) -> &PullToRefreshConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state.get()
    }

    pub fn phase(&self) -> Phase {
        self.state.get().phase
    }

    pub fn pull_distance(&self) -> f64 {
        self.state.get().pull_distance
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase() == Phase::Refreshing
    }

    pub fn max_pull_distance(&self) -> f64 {
        self.config.max_pull_distance()
    }

    /// Pull progress towards the threshold, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        (self.pull_distance() / self.config.threshold_px).min(1.0)
    }

    /// Indicator rotation in degrees
    pub fn indicator_rotation(&self) -> f64 {
        self.progress() * 360.0
    }

    pub fn feedback(&self) -> PullFeedback {
        let pull_distance = self.pull_distance();
        PullFeedback {
            pull_distance,
            progress: self.progress(),
            armed: pull_distance >= self.config.threshold_px,
        }
    }

    /// Begin a pull if the surface is scrolled to its top edge
    pub fn on_touch_start(&self, point: TouchPoint, scroll_top: f64) {
        let state = self.state.get();

        if self.config.disabled || state.phase == Phase::Refreshing {
            trace!("Ignoring touch start in phase {}", state.phase);
            return;
        }

        if scroll_top > 0.0 || scroll_top.is_nan() || !point.is_finite() {
            trace!("Ignoring touch start at {} with scroll offset {}", point, scroll_top);
            return;
        }

        self.state.set(GestureState {
            phase: Phase::Pulling,
            start_y: point.y,
            pull_distance: 0.0,
        });
        debug!("Pull started at y={:.1}", point.y);
    }

    /// Track the pull; returns feedback while a pull is in progress
    pub fn on_touch_move(&self, point: TouchPoint) -> Option<PullFeedback> {
        let mut state = self.state.get();

        if state.phase != Phase::Pulling || !point.is_finite() {
            return None;
        }

        let travel = point.y - state.start_y;
        if travel <= 0.0 {
            return Some(self.feedback());
        }

        let threshold = self.config.threshold_px;
        let previous = state.pull_distance;
        let distance = (travel * self.config.resistance_factor).min(self.config.max_pull_distance());

        state.pull_distance = distance;
        self.state.set(state);

        // Edge triggered: re-arms if the pull drops back below the threshold
        if previous < threshold && distance >= threshold {
            debug!("Pull crossed refresh threshold ({:.1}px)", threshold);
            if self.config.haptics {
                self.haptics.medium();
            }
        }

        Some(self.feedback())
    }

    /// End the pull without awaiting anything.
    ///
    /// Past the threshold the controller enters the refreshing phase and
    /// returns a guard; the caller runs the refresh action through it.
    pub fn release(&self) -> Release {
        let state = self.state.get();

        if state.phase != Phase::Pulling {
            trace!("Ignoring touch end in phase {}", state.phase);
            return Release::Ignored;
        }

        if state.pull_distance < self.config.threshold_px {
            self.state.set(GestureState::default());
            debug!("Pull cancelled at {:.1}px", state.pull_distance);
            return Release::Cancelled;
        }

        self.state.set(GestureState {
            phase: Phase::Refreshing,
            ..state
        });
        debug!("Pull released at {:.1}px, refreshing", state.pull_distance);

        if self.config.haptics {
            self.haptics.success();
        }

        Release::Refresh(RefreshGuard {
            state: Rc::clone(&self.state),
        })
    }

    /// End the pull, running `refresh` if the threshold was reached
    pub async fn on_touch_end<F, Fut, E>(&self, refresh: F) -> ReleaseOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Display,
    {
        match self.release() {
            Release::Ignored => ReleaseOutcome::Ignored,
            Release::Cancelled => ReleaseOutcome::Cancelled,
            Release::Refresh(guard) => guard.run(refresh).await.into(),
        }
    }

    /// Abandon a pull in progress (touchcancel)
    pub fn on_touch_cancel(&self) {
        if self.phase() == Phase::Pulling {
            self.state.set(GestureState::default());
            debug!("Pull cancelled by host");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::{HapticPattern, RecordingHaptics};
    use std::panic::AssertUnwindSafe;
    use std::time::Duration;

    fn controller() -> (PullToRefreshController<RecordingHaptics>, RecordingHaptics) {
        let haptics = RecordingHaptics::new();
        (PullToRefreshController::with_defaults(haptics.clone()), haptics)
    }

    /// Start at y=0 and move the finger down by `travel`
    fn pull(controller: &PullToRefreshController<RecordingHaptics>, travel: f64) {
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);
        controller.on_touch_move(TouchPoint::new(0.0, travel));
    }

    #[test]
    fn test_initial_state() {
        let (controller, _) = controller();
        assert_eq!(controller.state(), GestureState::default());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.progress(), 0.0);
    }

    #[test]
    fn test_touch_start_at_top_begins_pull() {
        let (controller, _) = controller();
        controller.on_touch_start(TouchPoint::new(10.0, 200.0), 0.0);

        let state = controller.state();
        assert_eq!(state.phase, Phase::Pulling);
        assert_eq!(state.start_y, 200.0);
        assert_eq!(state.pull_distance, 0.0);
    }

    #[test]
    fn test_touch_start_scrolled_is_ignored() {
        let (controller, _) = controller();
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 12.0);
        assert_eq!(controller.phase(), Phase::Idle);

        controller.on_touch_start(TouchPoint::new(0.0, 0.0), f64::NAN);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_disabled_controller_ignores_input() {
        let config = PullToRefreshConfig {
            disabled: true,
            ..Default::default()
        };
        let controller = PullToRefreshController::new(config, NoopHaptics).unwrap();
        assert!(controller.config().disabled);

        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.on_touch_move(TouchPoint::new(0.0, 300.0)).is_none());
        assert!(matches!(controller.release(), Release::Ignored));
    }

    #[test]
    fn test_resistance_applied() {
        let (controller, _) = controller();
        pull(&controller, 100.0);
        assert_eq!(controller.pull_distance(), 50.0);
        assert_eq!(controller.progress(), 50.0 / 80.0);
    }

    #[test]
    fn test_pull_distance_capped() {
        let (controller, _) = controller();
        pull(&controller, 10_000.0);
        assert_eq!(controller.pull_distance(), 120.0);
        assert_eq!(controller.progress(), 1.0);
        assert_eq!(controller.indicator_rotation(), 360.0);
    }

    #[test]
    fn test_upward_motion_registers_nothing() {
        let (controller, _) = controller();
        controller.on_touch_start(TouchPoint::new(0.0, 100.0), 0.0);

        let feedback = controller.on_touch_move(TouchPoint::new(0.0, 40.0)).unwrap();
        assert_eq!(feedback.pull_distance, 0.0);
        assert!(!feedback.armed);

        controller.on_touch_move(TouchPoint::new(0.0, 160.0));
        assert_eq!(controller.pull_distance(), 30.0);

        // Moving back above the start keeps the last registered pull
        controller.on_touch_move(TouchPoint::new(0.0, 90.0));
        assert_eq!(controller.pull_distance(), 30.0);
        assert_eq!(controller.phase(), Phase::Pulling);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let (controller, haptics) = controller();
        assert!(controller.on_touch_move(TouchPoint::new(0.0, 500.0)).is_none());
        assert_eq!(controller.state(), GestureState::default());
        assert!(haptics.emitted().is_empty());
    }

    #[test]
    fn test_feedback_values() {
        let (controller, _) = controller();
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);

        let feedback = controller.on_touch_move(TouchPoint::new(0.0, 80.0)).unwrap();
        assert_eq!(feedback.pull_distance, 40.0);
        assert_eq!(feedback.progress, 0.5);
        assert_eq!(feedback.rotation_deg(), 180.0);
        assert!(!feedback.armed);

        let feedback = controller.on_touch_move(TouchPoint::new(0.0, 160.0)).unwrap();
        assert!(feedback.armed);
        assert_eq!(feedback.progress, 1.0);
    }

    #[test]
    fn test_threshold_haptic_is_edge_triggered() {
        let (controller, haptics) = controller();
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);

        for y in [100.0, 150.0, 170.0, 200.0, 230.0, 300.0] {
            controller.on_touch_move(TouchPoint::new(0.0, y));
        }

        assert_eq!(haptics.count(HapticPattern::Medium), 1);
    }

    #[test]
    fn test_threshold_haptic_single_jump() {
        let (controller, haptics) = controller();
        pull(&controller, 1000.0);
        assert_eq!(haptics.count(HapticPattern::Medium), 1);
    }

    #[test]
    fn test_threshold_haptic_rearms() {
        let (controller, haptics) = controller();
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);

        controller.on_touch_move(TouchPoint::new(0.0, 200.0));
        controller.on_touch_move(TouchPoint::new(0.0, 100.0));
        controller.on_touch_move(TouchPoint::new(0.0, 200.0));

        assert_eq!(haptics.count(HapticPattern::Medium), 2);
    }

    #[test]
    fn test_haptics_disabled() {
        let haptics = RecordingHaptics::new();
        let config = PullToRefreshConfig {
            haptics: false,
            ..Default::default()
        };
        let controller = PullToRefreshController::new(config, haptics.clone()).unwrap();

        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);
        controller.on_touch_move(TouchPoint::new(0.0, 400.0));
        let release = controller.release();
        assert!(matches!(release, Release::Refresh(_)));
        drop(release);

        assert!(haptics.emitted().is_empty());
    }

    #[test]
    fn test_release_below_threshold_cancels() {
        let (controller, haptics) = controller();
        pull(&controller, 100.0);

        assert!(matches!(controller.release(), Release::Cancelled));
        assert_eq!(controller.state(), GestureState::default());
        assert!(haptics.emitted().is_empty());
    }

    #[test]
    fn test_release_without_pull_is_ignored() {
        let (controller, _) = controller();
        assert!(matches!(controller.release(), Release::Ignored));
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_release_past_threshold_holds_refreshing() {
        let (controller, haptics) = controller();
        pull(&controller, 200.0);

        let release = controller.release();
        assert!(matches!(release, Release::Refresh(_)));
        assert_eq!(controller.phase(), Phase::Refreshing);
        assert_eq!(controller.pull_distance(), 100.0);
        assert_eq!(haptics.count(HapticPattern::Success), 1);

        // Re-entrancy guard
        let before = controller.state();
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);
        assert_eq!(controller.state(), before);
        assert!(controller.on_touch_move(TouchPoint::new(0.0, 500.0)).is_none());
        assert!(matches!(controller.release(), Release::Ignored));
        controller.on_touch_cancel();
        assert_eq!(controller.state(), before);

        drop(release);
        assert_eq!(controller.state(), GestureState::default());
    }

    #[test]
    fn test_touch_cancel_resets_pull() {
        let (controller, _) = controller();
        pull(&controller, 300.0);
        controller.on_touch_cancel();
        assert_eq!(controller.state(), GestureState::default());
    }

    #[test]
    fn test_restart_while_pulling_reanchors() {
        let (controller, _) = controller();
        pull(&controller, 100.0);

        controller.on_touch_start(TouchPoint::new(0.0, 50.0), 0.0);
        let state = controller.state();
        assert_eq!(state.phase, Phase::Pulling);
        assert_eq!(state.start_y, 50.0);
        assert_eq!(state.pull_distance, 0.0);
    }

    #[tokio::test]
    async fn test_touch_end_runs_refresh_once() {
        let (controller, _) = controller();
        let calls = Rc::new(Cell::new(0));
        pull(&controller, 200.0);

        let counter = calls.clone();
        let outcome = controller
            .on_touch_end(move || async move {
                counter.set(counter.get() + 1);
                Ok::<(), String>(())
            })
            .await;

        assert_eq!(outcome, ReleaseOutcome::Refreshed);
        assert_eq!(calls.get(), 1);
        assert_eq!(controller.state(), GestureState::default());
    }

    #[tokio::test]
    async fn test_failed_refresh_still_resets() {
        let (controller, _) = controller();
        pull(&controller, 200.0);

        let outcome = controller
            .on_touch_end(|| async { Err::<(), _>("backend unavailable") })
            .await;

        assert_eq!(outcome, ReleaseOutcome::RefreshFailed);
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.pull_distance(), 0.0);
    }

    #[tokio::test]
    async fn test_cancelled_pull_skips_refresh() {
        let (controller, _) = controller();
        let calls = Rc::new(Cell::new(0));
        pull(&controller, 100.0);

        let counter = calls.clone();
        let outcome = controller
            .on_touch_end(move || async move {
                counter.set(counter.get() + 1);
                Ok::<(), String>(())
            })
            .await;

        assert_eq!(outcome, ReleaseOutcome::Cancelled);
        assert_eq!(calls.get(), 0);
        assert_eq!(controller.state(), GestureState::default());
    }

    #[tokio::test]
    async fn test_dropped_refresh_resets() {
        let (controller, _) = controller();
        pull(&controller, 200.0);

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            controller.on_touch_end(|| std::future::pending::<std::result::Result<(), String>>()),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(controller.state(), GestureState::default());
    }

    #[tokio::test]
    async fn test_guard_run_reports_outcome() {
        let (controller, _) = controller();
        pull(&controller, 200.0);

        let guard = match controller.release() {
            Release::Refresh(guard) => guard,
            other => panic!("expected refresh, got {:?}", other),
        };
        assert!(controller.is_refreshing());

        let outcome = guard.run(|| async { Ok::<(), String>(()) }).await;
        assert_eq!(outcome, RefreshOutcome::Completed);
        assert!(!controller.is_refreshing());
    }

    async fn exploding_refresh() -> std::result::Result<(), String> {
        panic!("refresh action panicked")
    }

    #[test]
    fn test_panicking_refresh_resets() {
        let (controller, haptics) = controller();
        pull(&controller, 200.0);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            runtime.block_on(controller.on_touch_end(exploding_refresh))
        }));

        assert!(result.is_err());
        assert_eq!(controller.state(), GestureState::default());
        assert_eq!(haptics.count(HapticPattern::Success), 1);

        // The controller accepts the next pull
        controller.on_touch_start(TouchPoint::new(0.0, 0.0), 0.0);
        assert_eq!(controller.phase(), Phase::Pulling);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PullToRefreshConfig {
            resistance_factor: 0.0,
            ..Default::default()
        };
        assert!(PullToRefreshController::new(config, NoopHaptics).is_err());
    }
}
