//! Directional swipe recognition
//!
//! A swipe is a single touch-start/touch-end pair. The displacement between
//! the two points is classified along its dominant axis; motions shorter
//! than the threshold on both axes are taps and produce nothing.

use crate::config::SwipeConfig;
use crate::haptics::{HapticEmitter, NoopHaptics};
use crate::{Result, TouchPoint};
use std::cell::Cell;
use tracing::{debug, trace};

/// Direction of a swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Classify the motion from `start` to `end`.
    ///
    /// Returns `None` when neither axis travelled `threshold` pixels. Equal
    /// travel on both axes resolves to the horizontal direction.
    pub fn classify(start: TouchPoint, end: TouchPoint, threshold: f64) -> Option<Self> {
        let delta_x = end.x - start.x;
        let delta_y = end.y - start.y;

        if delta_x.abs().max(delta_y.abs()) < threshold {
            return None;
        }

        if delta_x.abs() >= delta_y.abs() {
            if delta_x > 0.0 {
                Some(SwipeDirection::Right)
            } else {
                Some(SwipeDirection::Left)
            }
        } else if delta_y > 0.0 {
            Some(SwipeDirection::Down)
        } else {
            Some(SwipeDirection::Up)
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeDirection::Up => write!(f, "up"),
            SwipeDirection::Down => write!(f, "down"),
            SwipeDirection::Left => write!(f, "left"),
            SwipeDirection::Right => write!(f, "right"),
        }
    }
}

type Handler = Box<dyn Fn()>;

/// Optional per-direction callbacks
#[derive(Default)]
pub struct SwipeHandlers {
    left: Option<Handler>,
    right: Option<Handler>,
    up: Option<Handler>,
    down: Option<Handler>,
}

impl SwipeHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_left(mut self, handler: impl Fn() + 'static) -> Self {
        self.left = Some(Box::new(handler));
        self
    }

    pub fn on_right(mut self, handler: impl Fn() + 'static) -> Self {
        self.right = Some(Box::new(handler));
        self
    }

    pub fn on_up(mut self, handler: impl Fn() + 'static) -> Self {
        self.up = Some(Box::new(handler));
        self
    }

    pub fn on_down(mut self, handler: impl Fn() + 'static) -> Self {
        self.down = Some(Box::new(handler));
        self
    }

    fn get(&self, direction: SwipeDirection) -> Option<&Handler> {
        match direction {
            SwipeDirection::Left => self.left.as_ref(),
            SwipeDirection::Right => self.right.as_ref(),
            SwipeDirection::Up => self.up.as_ref(),
            SwipeDirection::Down => self.down.as_ref(),
        }
    }
}

impl std::fmt::Debug for SwipeHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeHandlers")
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .finish()
    }
}

/// Recognizes one swipe per touch-start/touch-end pair
pub struct SwipeRecognizer<H = NoopHaptics> {
    config: SwipeConfig,
    haptics: H,
    handlers: SwipeHandlers,
    /// Start point held between touch-start and touch-end
    origin: Cell<Option<TouchPoint>>,
}

impl<H: HapticEmitter> SwipeRecognizer<H> {
    pub fn new(config: SwipeConfig, haptics: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            haptics,
            handlers: SwipeHandlers::default(),
            origin: Cell::new(None),
        })
    }

    /// Recognizer with default configuration
    pub fn with_defaults(haptics: H) -> Self {
        Self {
            config: SwipeConfig::default(),
            haptics,
            handlers: SwipeHandlers::default(),
            origin: Cell::new(None),
        }
    }

    pub fn with_handlers(mut self, handlers: SwipeHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Start point of the gesture in progress, if any
    pub fn origin(&self) -> Option<TouchPoint> {
        self.origin.get()
    }

    pub fn on_touch_start(&self, point: TouchPoint) {
        if self.config.disabled || !point.is_finite() {
            trace!("Ignoring swipe touch start at {}", point);
            return;
        }
        self.origin.set(Some(point));
    }

    /// Finish the gesture and dispatch the recognised direction, if any
    pub fn on_touch_end(&self, point: TouchPoint) -> Option<SwipeDirection> {
        let start = self.origin.take()?;

        if self.config.disabled || !point.is_finite() {
            trace!("Ignoring swipe touch end at {}", point);
            return None;
        }

        let direction = SwipeDirection::classify(start, point, self.config.threshold_px)?;
        debug!("Swipe {} recognised from {} to {}", direction, start, point);

        if self.config.haptics {
            self.haptics.light();
        }

        if let Some(handler) = self.handlers.get(direction) {
            handler();
        }

        Some(direction)
    }

    /// Abandon the gesture in progress without classifying it
    pub fn on_touch_cancel(&self) {
        self.origin.set(None);
    }
}
