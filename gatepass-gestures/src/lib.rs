//! Touch gesture recognition shared by the GatePass mobile front-end
//!
//! Two independent recognizers turn raw touch samples into discrete events:
//! - [`SwipeRecognizer`] classifies a start/end pair into a cardinal swipe
//! - [`PullToRefreshController`] tracks a downward drag from the top of a
//!   scrollable surface and runs a refresh action past a threshold
//!
//! Neither owns rendering or networking. They read coordinates, invoke caller
//! callbacks, and signal an injected [`HapticEmitter`].

pub mod config;
pub mod haptics;
pub mod pull_to_refresh;
pub mod swipe;

pub use config::{GestureSettings, PullToRefreshConfig, SwipeConfig};
pub use haptics::{HapticEmitter, HapticPattern, NoopHaptics, RecordingHaptics};
pub use pull_to_refresh::{
    GestureState, Phase, PullFeedback, PullToRefreshController, RefreshGuard, RefreshOutcome,
    Release, ReleaseOutcome,
};
pub use swipe::{SwipeDirection, SwipeHandlers, SwipeRecognizer};

use serde::{Deserialize, Serialize};

/// A single touch contact in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Raw touch input is not validated upstream; NaN and infinities are dropped
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for TouchPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for TouchPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Gesture configuration errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse gesture settings: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
