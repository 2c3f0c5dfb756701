//! Synthetic accelerometer traces and the bounded three-axis trace.
//!
//! In manual mode the whole plotted window is regenerated from a motion
//! profile; it is not an incremental stream. Each axis is a profile-specific
//! sinusoid over the window plus uniform noise (values in g):
//!
//! | Profile | x                 | y                 | z                      | noise |
//! |---------|-------------------|-------------------|------------------------|-------|
//! | Rest    | 0.01              | -0.02             | 0.98                   | 0.02  |
//! | Walking | 0.15·sin(4πt)     | 0.12·cos(4πt)     | 1.0 + 0.1·sin(8πt)     | 0.05  |
//! | Running | 0.35·sin(8πt)     | 0.28·cos(8πt)     | 1.0 + 0.2·sin(16πt)    | 0.1   |
//!
//! with `t = i / window_len`. Noise figures are total spans.

use std::f32::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::history::BoundedHistory;
use crate::noise;
use crate::types::{AccelVector, ActivityProfile};

/// Configuration for the accelerometer trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccelConfig {
    /// Points per axis in the plotted window.
    pub window_len: usize,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self { window_len: 50 }
    }
}

/// Generates the sample at index `index` of a `window_len`-point window.
pub fn profile_sample<R: Rng + ?Sized>(
    profile: ActivityProfile,
    index: usize,
    window_len: usize,
    rng: &mut R,
) -> AccelVector {
    let t = if window_len == 0 {
        0.0
    } else {
        index as f32 / window_len as f32
    };

    let (x, y, z) = match profile {
        ActivityProfile::Rest => {
            let span = 0.02;
            (
                0.01 + noise::centered_f32(rng, span),
                -0.02 + noise::centered_f32(rng, span),
                0.98 + noise::centered_f32(rng, span),
            )
        }
        ActivityProfile::Walking => {
            let span = 0.05;
            (
                0.15 * (t * PI * 4.0).sin() + noise::centered_f32(rng, span),
                0.12 * (t * PI * 4.0).cos() + noise::centered_f32(rng, span),
                1.0 + 0.1 * (t * PI * 8.0).sin() + noise::centered_f32(rng, span),
            )
        }
        ActivityProfile::Running => {
            let span = 0.1;
            (
                0.35 * (t * PI * 8.0).sin() + noise::centered_f32(rng, span),
                0.28 * (t * PI * 8.0).cos() + noise::centered_f32(rng, span),
                1.0 + 0.2 * (t * PI * 16.0).sin() + noise::centered_f32(rng, span),
            )
        }
    };

    AccelVector::new(x, y, z)
}

/// Bounded x/y/z histories plotted by the rendering sink.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelTrace {
    x: BoundedHistory<f32>,
    y: BoundedHistory<f32>,
    z: BoundedHistory<f32>,
}

impl AccelTrace {
    pub fn new(capacity: usize) -> Self {
        Self {
            x: BoundedHistory::new(capacity),
            y: BoundedHistory::new(capacity),
            z: BoundedHistory::new(capacity),
        }
    }

    /// Appends one reading to all three axes, dropping the oldest when full.
    pub fn push(&mut self, v: &AccelVector) {
        self.x.push(v.x);
        self.y.push(v.y);
        self.z.push(v.z);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.x.capacity()
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
    }

    pub fn x(&self) -> Vec<f32> {
        self.x.to_vec()
    }

    pub fn y(&self) -> Vec<f32> {
        self.y.to_vec()
    }

    pub fn z(&self) -> Vec<f32> {
        self.z.to_vec()
    }
}

/// Window generator for manual motion profiles.
#[derive(Debug, Clone)]
pub struct AccelSynthesizer {
    profile: Option<ActivityProfile>,
    /// Index of the next point within the window.
    sample_index: usize,
    window_len: usize,
}

impl AccelSynthesizer {
    pub fn new(config: &AccelConfig) -> Self {
        Self {
            profile: None,
            sample_index: 0,
            window_len: config.window_len,
        }
    }

    /// Profile of the last generated window, if any.
    pub fn profile(&self) -> Option<ActivityProfile> {
        self.profile
    }

    pub fn sample_index(&self) -> usize {
        self.sample_index
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Builds a complete window for `profile`, replacing any previous one.
    pub fn generate_window<R: Rng + ?Sized>(
        &mut self,
        profile: ActivityProfile,
        rng: &mut R,
    ) -> AccelTrace {
        self.profile = Some(profile);
        self.sample_index = 0;

        let mut trace = AccelTrace::new(self.window_len);
        while self.sample_index < self.window_len {
            let v = profile_sample(profile, self.sample_index, self.window_len, rng);
            trace.push(&v);
            self.sample_index += 1;
        }
        trace
    }

    pub fn reset(&mut self) {
        self.profile = None;
        self.sample_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn window(profile: ActivityProfile, seed: u64) -> AccelTrace {
        let mut rng = StdRng::seed_from_u64(seed);
        AccelSynthesizer::new(&AccelConfig::default()).generate_window(profile, &mut rng)
    }

    #[test]
    fn test_window_fills_every_axis() {
        let trace = window(ActivityProfile::Walking, 1);
        assert_eq!(trace.len(), 50);
        assert_eq!(trace.x().len(), 50);
        assert_eq!(trace.y().len(), 50);
        assert_eq!(trace.z().len(), 50);
    }

    #[test]
    fn test_rest_is_gravity_with_small_noise() {
        let trace = window(ActivityProfile::Rest, 2);
        for ((x, y), z) in trace.x().iter().zip(trace.y()).zip(trace.z()) {
            assert!((x - 0.01).abs() <= 0.0101);
            assert!((y + 0.02).abs() <= 0.0101);
            assert!((z - 0.98).abs() <= 0.0101);
        }
    }

    #[test]
    fn test_walking_amplitudes() {
        let trace = window(ActivityProfile::Walking, 3);
        assert!(trace.x().iter().all(|x| x.abs() <= 0.15 + 0.026));
        assert!(trace.y().iter().all(|y| y.abs() <= 0.12 + 0.026));
        assert!(trace.z().iter().all(|z| (z - 1.0).abs() <= 0.1 + 0.026));
        // Two full cycles: the x axis must swing both ways.
        assert!(trace.x().iter().any(|x| *x > 0.1));
        assert!(trace.x().iter().any(|x| *x < -0.1));
    }

    #[test]
    fn test_running_is_larger_than_walking() {
        let walk = window(ActivityProfile::Walking, 4);
        let run = window(ActivityProfile::Running, 4);
        let peak = |v: Vec<f32>| v.iter().fold(0.0f32, |m, x| m.max(x.abs()));
        assert!(peak(run.x()) > peak(walk.x()));
        assert!(run.x().iter().all(|x| x.abs() <= 0.35 + 0.051));
        assert!(run.z().iter().all(|z| (z - 1.0).abs() <= 0.2 + 0.051));
    }

    #[test]
    fn test_regeneration_replaces_window() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut synth = AccelSynthesizer::new(&AccelConfig::default());
        synth.generate_window(ActivityProfile::Running, &mut rng);
        let trace = synth.generate_window(ActivityProfile::Rest, &mut rng);
        assert_eq!(trace.len(), 50);
        assert_eq!(synth.profile(), Some(ActivityProfile::Rest));
        assert_eq!(synth.sample_index(), 50);
        assert!(trace.z().iter().all(|z| (z - 0.98).abs() <= 0.0101));
    }

    #[test]
    fn test_synthetic_magnitude_is_norm() {
        let mut rng = StdRng::seed_from_u64(6);
        let v = profile_sample(ActivityProfile::Running, 7, 50, &mut rng);
        assert!((v.magnitude - v.axes_magnitude()).abs() < 1e-6);
    }

    #[test]
    fn test_trace_drops_oldest() {
        let mut trace = AccelTrace::new(3);
        for i in 0..5 {
            trace.push(&AccelVector::new(i as f32, 0.0, 1.0));
        }
        assert_eq!(trace.x(), vec![2.0, 3.0, 4.0]);
        assert_eq!(trace.capacity(), 3);
        trace.clear();
        assert!(trace.is_empty());
    }
}
