//! Haptic feedback collaborator
//!
//! Recognizers receive an emitter at construction instead of reaching for a
//! global manager. Emission is fire-and-forget: it returns nothing and must
//! never block or fail the gesture path.

use std::cell::RefCell;
use std::rc::Rc;

/// Discrete haptic signals used by the recognizers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticPattern {
    /// Swipe recognised
    Light,
    /// Pull crossed the refresh threshold
    Medium,
    /// Refresh started
    Success,
}

impl HapticPattern {
    /// Vibration pattern in milliseconds (alternating on/off)
    pub fn vibration_ms(&self) -> &'static [u32] {
        match self {
            Self::Light => &[10],
            Self::Medium => &[20],
            Self::Success => &[10, 50, 10],
        }
    }
}

impl std::fmt::Display for HapticPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Medium => write!(f, "medium"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// Sink for haptic signals
pub trait HapticEmitter {
    fn emit(&self, pattern: HapticPattern);

    fn light(&self) {
        self.emit(HapticPattern::Light);
    }

    fn medium(&self) {
        self.emit(HapticPattern::Medium);
    }

    fn success(&self) {
        self.emit(HapticPattern::Success);
    }
}

impl<H: HapticEmitter + ?Sized> HapticEmitter for &H {
    fn emit(&self, pattern: HapticPattern) {
        (**self).emit(pattern);
    }
}

impl<H: HapticEmitter + ?Sized> HapticEmitter for Rc<H> {
    fn emit(&self, pattern: HapticPattern) {
        (**self).emit(pattern);
    }
}

impl<H: HapticEmitter + ?Sized> HapticEmitter for Box<H> {
    fn emit(&self, pattern: HapticPattern) {
        (**self).emit(pattern);
    }
}

/// Emitter for hosts without haptic hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl HapticEmitter for NoopHaptics {
    fn emit(&self, _pattern: HapticPattern) {}
}

/// Emitter that records every signal; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    log: Rc<RefCell<Vec<HapticPattern>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals emitted so far, oldest first
    pub fn emitted(&self) -> Vec<HapticPattern> {
        self.log.borrow().clone()
    }

    /// Number of times `pattern` was emitted
    pub fn count(&self, pattern: HapticPattern) -> usize {
        self.log.borrow().iter().filter(|p| **p == pattern).count()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl HapticEmitter for RecordingHaptics {
    fn emit(&self, pattern: HapticPattern) {
        self.log.borrow_mut().push(pattern);
    }
}
