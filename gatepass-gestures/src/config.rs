//! Gesture configuration
//!
//! Every field is optional when deserializing; missing values fall back to
//! the defaults below. Settings can be parsed from a TOML document:
//!
//! ```toml
//! [swipe]
//! threshold_px = 60.0
//!
//! [pull_to_refresh]
//! threshold_px = 100.0
//! haptics = false
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Swipe recognizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Minimum travel along the dominant axis, in pixels
    pub threshold_px: f64,
    /// Emit a light haptic before each recognised swipe
    pub haptics: bool,
    /// Ignore all input
    pub disabled: bool,
}

/// Pull-to-refresh controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullToRefreshConfig {
    /// Pull distance at which a release triggers a refresh, in pixels
    pub threshold_px: f64,
    /// Damping applied to raw finger travel
    pub resistance_factor: f64,
    /// Visual pull is capped at `threshold_px * max_pull_multiplier`
    pub max_pull_multiplier: f64,
    /// Emit threshold and success haptics
    pub haptics: bool,
    /// Ignore all input
    pub disabled: bool,
}

/// Settings for every recognizer mounted by the front-end
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub swipe: SwipeConfig,
    pub pull_to_refresh: PullToRefreshConfig,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_px: 50.0,
            haptics: true,
            disabled: false,
        }
    }
}

impl Default for PullToRefreshConfig {
    fn default() -> Self {
        Self {
            threshold_px: 80.0,
            resistance_factor: 0.5,
            max_pull_multiplier: 1.5,
            haptics: true,
            disabled: false,
        }
    }
}

impl SwipeConfig {
    pub fn validate(&self) -> Result<()> {
        validate_threshold("swipe.threshold_px", self.threshold_px)
    }
}

impl PullToRefreshConfig {
    pub fn validate(&self) -> Result<()> {
        validate_threshold("pull_to_refresh.threshold_px", self.threshold_px)?;

        if !self.resistance_factor.is_finite()
            || self.resistance_factor <= 0.0
            || self.resistance_factor > 1.0
        {
            return Err(Error::InvalidConfig(format!(
                "pull_to_refresh.resistance_factor must be in (0, 1], got {}",
                self.resistance_factor
            )));
        }

        // Below 1.0 the cap would sit under the threshold and no pull could ever refresh
        if !self.max_pull_multiplier.is_finite() || self.max_pull_multiplier < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "pull_to_refresh.max_pull_multiplier must be at least 1, got {}",
                self.max_pull_multiplier
            )));
        }

        Ok(())
    }

    /// Upper bound of the visible pull distance
    pub fn max_pull_distance(&self) -> f64 {
        self.threshold_px * self.max_pull_multiplier
    }
}

impl GestureSettings {
    /// Parse and validate settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.swipe.validate()?;
        self.pull_to_refresh.validate()
    }
}

fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}
