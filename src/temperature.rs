//! Body temperature simulation and the dual-probe readout.
//!
//! In auto mode the average body temperature performs a bounded random walk,
//! updated at most once per update interval even though the caller ticks
//! faster. The vest carries two probes; the readout reports both probes and
//! their difference around the average.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::noise;

/// Configuration for the temperature simulator and readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// Interval at which the caller ticks (ms).
    pub tick_ms: u64,
    /// Minimum time between accepted updates (ms).
    pub update_interval_ms: u64,
    /// Average temperature when auto mode starts (°F).
    pub start_f: f64,
    /// Total span of one random-walk step (°F).
    pub step_span_f: f64,
    /// Lower clamp of the random walk (°F).
    pub min_f: f64,
    /// Upper clamp of the random walk (°F).
    pub max_f: f64,
    /// Total span of the per-probe offset around the average (°F).
    pub probe_spread_f: f64,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            update_interval_ms: 2000,
            start_f: 101.5,
            step_span_f: 0.2,     // ±0.1 per update
            min_f: 100.5,
            max_f: 103.5,
            probe_spread_f: 0.1,  // ±0.05 per probe
        }
    }
}

/// Random-walk generator for the average body temperature.
#[derive(Debug, Clone)]
pub struct TemperatureSimulator {
    config: TemperatureConfig,
    current_f: f64,
    last_update_ms: Option<u64>,
}

impl TemperatureSimulator {
    pub fn new(config: TemperatureConfig) -> Self {
        Self {
            current_f: config.start_f,
            last_update_ms: None,
            config,
        }
    }

    /// Current average temperature (°F).
    pub fn current_f(&self) -> f64 {
        self.current_f
    }

    /// Time of the last accepted update, if any.
    pub fn last_update_ms(&self) -> Option<u64> {
        self.last_update_ms
    }

    /// Advance the walk if the update interval has elapsed.
    ///
    /// Returns the new average when an update happened. The first tick after
    /// construction or [`reset`](Self::reset) always updates.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Option<f64> {
        if let Some(last) = self.last_update_ms {
            if now_ms.saturating_sub(last) < self.config.update_interval_ms {
                return None;
            }
        }

        let step = noise::centered(rng, self.config.step_span_f);
        self.current_f = (self.current_f + step).clamp(self.config.min_f, self.config.max_f);
        self.last_update_ms = Some(now_ms);
        Some(self.current_f)
    }

    /// Restart the walk from the configured start temperature.
    pub fn reset(&mut self) {
        self.current_f = self.config.start_f;
        self.last_update_ms = None;
    }
}

/// What the temperature panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReadout {
    /// Average body temperature (°F).
    pub average_f: f64,
    pub probe_a_f: f64,
    pub probe_b_f: f64,
    /// Absolute difference between the probes (°F).
    pub delta_f: f64,
}

impl TemperatureReadout {
    /// Values rounded to one decimal, as displayed.
    pub fn rounded(&self) -> Self {
        Self {
            average_f: round_tenth(self.average_f),
            probe_a_f: round_tenth(self.probe_a_f),
            probe_b_f: round_tenth(self.probe_b_f),
            delta_f: round_tenth(self.delta_f),
        }
    }
}

/// Derive the two probe values around `average_f`.
pub fn probe_readout<R: Rng + ?Sized>(
    average_f: f64,
    spread_f: f64,
    rng: &mut R,
) -> TemperatureReadout {
    let probe_a_f = average_f + noise::centered(rng, spread_f);
    let probe_b_f = average_f + noise::centered(rng, spread_f);
    TemperatureReadout {
        average_f,
        probe_a_f,
        probe_b_f,
        delta_f: (probe_a_f - probe_b_f).abs(),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_tick_updates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sim = TemperatureSimulator::new(TemperatureConfig::default());
        let value = sim.tick(0, &mut rng);
        assert!(value.is_some());
        assert_eq!(sim.last_update_ms(), Some(0));
    }

    #[test]
    fn test_updates_are_rate_limited() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sim = TemperatureSimulator::new(TemperatureConfig::default());
        assert!(sim.tick(0, &mut rng).is_some());
        assert!(sim.tick(1000, &mut rng).is_none());
        assert!(sim.tick(1999, &mut rng).is_none());
        assert!(sim.tick(2000, &mut rng).is_some());
        assert!(sim.tick(3000, &mut rng).is_none());
        assert!(sim.tick(4000, &mut rng).is_some());
    }

    #[test]
    fn test_walk_steps_and_clamp() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sim = TemperatureSimulator::new(TemperatureConfig::default());
        let mut previous = sim.current_f();
        for i in 0..5_000u64 {
            if let Some(value) = sim.tick(i * 2000, &mut rng) {
                assert!((100.5..=103.5).contains(&value));
                assert!((value - previous).abs() <= 0.1 + 1e-9);
                previous = value;
            }
        }
    }

    #[test]
    fn test_reset_restarts_walk() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut sim = TemperatureSimulator::new(TemperatureConfig::default());
        for i in 0..20u64 {
            sim.tick(i * 2000, &mut rng);
        }
        sim.reset();
        assert_eq!(sim.current_f(), 101.5);
        assert_eq!(sim.last_update_ms(), None);
        assert!(sim.tick(40_001, &mut rng).is_some());
    }

    #[test]
    fn test_clock_going_backwards_does_not_update() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sim = TemperatureSimulator::new(TemperatureConfig::default());
        sim.tick(10_000, &mut rng);
        assert!(sim.tick(500, &mut rng).is_none());
    }

    #[test]
    fn test_probe_readout() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..1_000 {
            let readout = probe_readout(101.5, 0.1, &mut rng);
            assert!((readout.probe_a_f - 101.5).abs() <= 0.05);
            assert!((readout.probe_b_f - 101.5).abs() <= 0.05);
            assert!(readout.delta_f <= 0.1);
            assert!((readout.delta_f - (readout.probe_a_f - readout.probe_b_f).abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rounded_readout() {
        let readout = TemperatureReadout {
            average_f: 101.46,
            probe_a_f: 101.44,
            probe_b_f: 101.51,
            delta_f: 0.07,
        }
        .rounded();
        assert!((readout.average_f - 101.5).abs() < 1e-9);
        assert!((readout.probe_a_f - 101.4).abs() < 1e-9);
        assert!((readout.probe_b_f - 101.5).abs() < 1e-9);
        assert!((readout.delta_f - 0.1).abs() < 1e-9);
    }
}
