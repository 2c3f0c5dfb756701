//! Synthetic photoplethysmography (PPG) waveform.
//!
//! Produces one raw sample per tick from a phase accumulator driven by the
//! target heart rate. Heart rate is an input here: nothing in this module
//! estimates it from the trace.
//!
//! One cardiac cycle, phase `t ∈ [0, 1)`, on a 500-unit baseline:
//!
//! ```text
//! [0.0, 0.3)  systolic rise    500 + 200·sin(t·π/0.3)
//! [0.3, 0.5)  dicrotic notch   500 +  80·sin((t-0.3)·π/0.2)
//! [0.5, 1.0)  diastolic decay  500 +  30·exp(-(t-0.5)·8)
//! ```

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::noise;
use crate::types::SignalQuality;

/// Waveform baseline in ADC units.
pub const PPG_BASELINE: f64 = 500.0;

/// Configuration for the PPG synthesizer and its trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpgConfig {
    /// Interval between synthesized samples (ms).
    pub tick_ms: u64,
    /// Samples kept for plotting.
    pub history_len: usize,
    /// Total noise span, i.e. ±half of it (ADC units).
    pub noise_span: f64,
    /// Heart rate used in auto mode (BPM).
    pub default_heart_rate_bpm: f64,
}

impl Default for PpgConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,         // 20Hz redraw
            history_len: 100,
            noise_span: 10.0,    // ±5
            default_heart_rate_bpm: 75.0,
        }
    }
}

/// Noise-free waveform value at cycle phase `t`.
pub fn waveform_value(t: f64) -> f64 {
    if t < 0.3 {
        PPG_BASELINE + 200.0 * (t * PI / 0.3).sin()
    } else if t < 0.5 {
        PPG_BASELINE + 80.0 * ((t - 0.3) * PI / 0.2).sin()
    } else {
        PPG_BASELINE + 30.0 * (-(t - 0.5) * 8.0).exp()
    }
}

/// Phase-accumulating PPG generator.
#[derive(Debug, Clone)]
pub struct PpgSynthesizer {
    /// Position within the current cardiac cycle, `[0, 1)`.
    phase: f64,
    heart_rate_bpm: f64,
    tick_seconds: f64,
    noise_span: f64,
    samples_generated: u64,
}

impl PpgSynthesizer {
    pub fn new(config: &PpgConfig) -> Self {
        Self {
            phase: 0.0,
            heart_rate_bpm: config.default_heart_rate_bpm,
            tick_seconds: config.tick_ms as f64 / 1000.0,
            noise_span: config.noise_span,
            samples_generated: 0,
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn heart_rate_bpm(&self) -> f64 {
        self.heart_rate_bpm
    }

    /// Changes the target rate without touching the phase.
    pub fn set_heart_rate(&mut self, bpm: f64) {
        self.heart_rate_bpm = bpm;
    }

    /// Restarts the cycle at phase 0 with a new rate.
    pub fn reset(&mut self, bpm: f64) {
        self.phase = 0.0;
        self.heart_rate_bpm = bpm;
        self.samples_generated = 0;
    }

    /// Advances the phase by one tick and returns the new phase.
    pub fn advance(&mut self) -> f64 {
        let cycles_per_second = self.heart_rate_bpm / 60.0;
        self.phase = (self.phase + cycles_per_second * self.tick_seconds).rem_euclid(1.0);
        self.phase
    }

    /// Advances one tick and returns the rounded, noisy sample.
    pub fn next_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> i32 {
        let t = self.advance();
        let value = waveform_value(t) + noise::centered(rng, self.noise_span);
        self.samples_generated += 1;
        value.round() as i32
    }

    /// Synthetic traces are always reported as good.
    pub fn quality(&self) -> SignalQuality {
        SignalQuality::Good
    }

    pub fn samples_generated(&self) -> u64 {
        self.samples_generated
    }
}
