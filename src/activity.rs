//! Activity State Detector.
//!
//! Turns a stream of accelerometer magnitudes into a binary Rest/Active
//! state. The movement signal is the mean absolute change in magnitude over
//! the last few samples, so a subject standing still at 1 g reads as zero
//! movement regardless of orientation.
//!
//! Entry and exit use different bars to avoid chattering at the boundary:
//!
//! ```text
//!            avg > 0.10                      avg > 0.06 (stay)
//!   Rest ─────────────────────▶ Active ◀───────────────┐
//!     ▲                           │                    │
//!     └───────────────────────────┘────────────────────┘
//!         avg < 0.06 × 0.4 = 0.024
//! ```
//!
//! Between 0.024 and 0.06 an Active subject reports "at rest" movement but
//! keeps the Active state.

use serde::{Deserialize, Serialize};

use crate::history::BoundedHistory;
use crate::types::{ActivityState, MovementStatus};

/// Configuration for activity detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Magnitude deltas averaged for the movement signal.
    pub history_len: usize,
    /// Movement threshold while at Rest (g).
    pub base_threshold: f32,
    /// Multiplier applied to the threshold while Active.
    pub active_threshold_factor: f32,
    /// Fraction of the current threshold the movement must fall below to exit Active.
    pub exit_factor: f32,
    /// Magnitude assumed before the first sample (g).
    pub initial_magnitude: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            history_len: 5,
            base_threshold: 0.10,
            active_threshold_factor: 0.6, // 0.06 to stay active
            exit_factor: 0.4,             // 0.024 to drop back to rest
            initial_magnitude: 1.0,       // resting gravity
        }
    }
}

/// Result of feeding one magnitude to the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Movement status line for this sample.
    pub status: MovementStatus,
    /// State after this sample.
    pub state: ActivityState,
    /// Mean of the movement history.
    pub avg_movement: f32,
    /// Threshold that was applied.
    pub threshold: f32,
    /// True when this sample changed the state.
    pub transitioned: bool,
}

/// Hysteretic Rest/Active detector.
#[derive(Debug, Clone)]
pub struct ActivityDetector {
    config: DetectorConfig,
    movement_history: BoundedHistory<f32>,
    previous_magnitude: f32,
    state: ActivityState,
    auto_detection: bool,

    // Statistics
    samples_processed: u64,
    transitions: u64,
}

impl ActivityDetector {
    /// Create a new detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            movement_history: BoundedHistory::new(config.history_len),
            previous_magnitude: config.initial_magnitude,
            state: ActivityState::Rest,
            auto_detection: true,
            samples_processed: 0,
            transitions: 0,
            config,
        }
    }

    /// Create a detector with default configuration.
    pub fn default_detector() -> Self {
        Self::new(DetectorConfig::default())
    }

    /// Feed one acceleration magnitude (g).
    ///
    /// A non-finite magnitude is ignored: history, previous magnitude and
    /// state are left as they were.
    pub fn detect(&mut self, magnitude: f32) -> Detection {
        if !magnitude.is_finite() {
            return self.unchanged();
        }

        let delta = (magnitude - self.previous_magnitude).abs();
        self.movement_history.push(delta);
        self.previous_magnitude = magnitude;
        self.samples_processed += 1;

        let Some(avg_movement) = self.movement_history.mean() else {
            // Zero-capacity history: nothing to average.
            return self.unchanged();
        };

        let threshold = self.current_threshold();
        let previous_state = self.state;

        let status = if avg_movement > threshold {
            if self.auto_detection && self.state == ActivityState::Rest {
                self.state = ActivityState::Active;
            }
            MovementStatus::ActiveMovement
        } else {
            if self.auto_detection
                && self.state == ActivityState::Active
                && avg_movement < threshold * self.config.exit_factor
            {
                self.state = ActivityState::Rest;
            }
            MovementStatus::AtRest
        };

        let transitioned = previous_state != self.state;
        if transitioned {
            self.transitions += 1;
        }

        Detection {
            status,
            state: self.state,
            avg_movement,
            threshold,
            transitioned,
        }
    }

    /// Force the state, bypassing hysteresis.
    ///
    /// History and previous magnitude are not touched.
    pub fn force_state(&mut self, state: ActivityState) {
        self.state = state;
    }

    /// Enable or disable automatic Rest/Active transitions.
    ///
    /// While disabled the detector still tracks movement but never changes
    /// state on its own.
    pub fn set_auto_detection(&mut self, enabled: bool) {
        self.auto_detection = enabled;
    }

    pub fn auto_detection(&self) -> bool {
        self.auto_detection
    }

    /// Get the current activity state.
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Movement threshold for the current state.
    pub fn current_threshold(&self) -> f32 {
        match self.state {
            ActivityState::Rest => self.config.base_threshold,
            ActivityState::Active => {
                self.config.base_threshold * self.config.active_threshold_factor
            }
        }
    }

    /// Mean of the movement history, `None` before the first sample.
    pub fn avg_movement(&self) -> Option<f32> {
        self.movement_history.mean()
    }

    pub fn previous_magnitude(&self) -> f32 {
        self.previous_magnitude
    }

    pub fn movement_history(&self) -> Vec<f32> {
        self.movement_history.to_vec()
    }

    /// Clear movement history and the magnitude baseline.
    ///
    /// The activity state and the auto-detection flag are kept.
    pub fn reset(&mut self) {
        self.movement_history.clear();
        self.previous_magnitude = self.config.initial_magnitude;
    }

    /// Get detector statistics (samples_processed, transitions).
    pub fn statistics(&self) -> (u64, u64) {
        (self.samples_processed, self.transitions)
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn unchanged(&self) -> Detection {
        let avg_movement = self.movement_history.mean().unwrap_or(0.0);
        let threshold = self.current_threshold();
        Detection {
            status: if avg_movement > threshold {
                MovementStatus::ActiveMovement
            } else {
                MovementStatus::AtRest
            },
            state: self.state,
            avg_movement,
            threshold,
            transitioned: false,
        }
    }
}

impl Default for ActivityDetector {
    fn default() -> Self {
        Self::default_detector()
    }
}

// ============================================================================
// TESTS
// ============================================================================
