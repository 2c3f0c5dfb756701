//! Health status classification.
//!
//! Both signals share the same three-zone structure around the band picked
//! by the current activity state:
//!
//! ```text
//!   Alert  │ Monitor │      Normal       │ Monitor │  Alert
//! ─────────┼─────────┼───────────────────┼─────────┼─────────
//!     min - buffer   min                max   max + buffer
//! ```
//!
//! Band edges are inclusive for Normal, the alert thresholds are exclusive.

use serde::{Deserialize, Serialize};

use crate::types::{ActivityState, Band, HealthRanges, HealthStatus};

/// Buffer around the temperature band before alerting (°F).
pub const TEMPERATURE_BUFFER_F: f64 = 1.0;

/// Buffer around the heart-rate band before alerting (BPM).
pub const HEART_RATE_BUFFER_BPM: f64 = 10.0;

/// Classifier buffers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub temperature_buffer_f: f64,
    pub heart_rate_buffer_bpm: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            temperature_buffer_f: TEMPERATURE_BUFFER_F,
            heart_rate_buffer_bpm: HEART_RATE_BUFFER_BPM,
        }
    }
}

/// Places `value` in one of the three zones around `band`.
///
/// Callers are expected to pass finite values; the ingestor drops
/// non-finite samples before they get here.
pub fn classify_in_band(value: f64, band: Band, buffer: f64) -> HealthStatus {
    if band.contains(value) {
        HealthStatus::Normal
    } else if value < band.min - buffer || value > band.max + buffer {
        HealthStatus::Alert
    } else {
        HealthStatus::Monitor
    }
}

/// Classifies an average body temperature with the reference ±1.0 °F buffer.
pub fn classify_temperature(
    avg_temp_f: f64,
    state: ActivityState,
    ranges: &HealthRanges,
) -> HealthStatus {
    classify_in_band(avg_temp_f, ranges.temperature_band(state), TEMPERATURE_BUFFER_F)
}

/// Classifies a heart rate with the reference ±10 BPM buffer.
pub fn classify_heart_rate(
    heart_rate_bpm: f64,
    state: ActivityState,
    ranges: &HealthRanges,
) -> HealthStatus {
    classify_in_band(heart_rate_bpm, ranges.heart_rate_band(state), HEART_RATE_BUFFER_BPM)
}

/// Classifier with configurable buffers, used by the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthClassifier {
    config: ClassifierConfig,
}

impl HealthClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn temperature(
        &self,
        avg_temp_f: f64,
        state: ActivityState,
        ranges: &HealthRanges,
    ) -> HealthStatus {
        classify_in_band(
            avg_temp_f,
            ranges.temperature_band(state),
            self.config.temperature_buffer_f,
        )
    }

    pub fn heart_rate(
        &self,
        heart_rate_bpm: f64,
        state: ActivityState,
        ranges: &HealthRanges,
    ) -> HealthStatus {
        classify_in_band(
            heart_rate_bpm,
            ranges.heart_rate_band(state),
            self.config.heart_rate_buffer_bpm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{compute_health_ranges, Breed, SubjectCalibration, SubjectSize};

    fn large_adult() -> HealthRanges {
        compute_health_ranges(&SubjectCalibration::new(Breed::Labrador, SubjectSize::Large, 5))
    }

    #[test]
    fn test_heart_rate_boundaries_large_resting() {
        let ranges = large_adult();
        let rest = ActivityState::Rest;
        assert_eq!(classify_heart_rate(60.0, rest, &ranges), HealthStatus::Normal);
        assert_eq!(classify_heart_rate(100.0, rest, &ranges), HealthStatus::Normal);
        assert_eq!(classify_heart_rate(50.0, rest, &ranges), HealthStatus::Monitor);
        assert_eq!(classify_heart_rate(110.0, rest, &ranges), HealthStatus::Monitor);
        assert_eq!(classify_heart_rate(49.0, rest, &ranges), HealthStatus::Alert);
        assert_eq!(classify_heart_rate(111.0, rest, &ranges), HealthStatus::Alert);
    }

    #[test]
    fn test_three_zone_structure_on_a_bare_band() {
        let band = Band::new(60.0, 100.0);
        assert_eq!(classify_in_band(60.0, band, 10.0), HealthStatus::Normal);
        assert_eq!(classify_in_band(100.0, band, 10.0), HealthStatus::Normal);
        assert_eq!(classify_in_band(50.0, band, 10.0), HealthStatus::Monitor);
        assert_eq!(classify_in_band(110.0, band, 10.0), HealthStatus::Monitor);
        assert_eq!(classify_in_band(49.0, band, 10.0), HealthStatus::Alert);
        assert_eq!(classify_in_band(111.0, band, 10.0), HealthStatus::Alert);
    }

    #[test]
    fn test_temperature_zones() {
        let ranges = large_adult();
        let rest = ActivityState::Rest;
        assert_eq!(classify_temperature(101.5, rest, &ranges), HealthStatus::Normal);
        assert_eq!(classify_temperature(102.8, rest, &ranges), HealthStatus::Monitor);
        assert_eq!(classify_temperature(104.2, rest, &ranges), HealthStatus::Alert);
        assert_eq!(classify_temperature(99.9, rest, &ranges), HealthStatus::Alert);
        assert_eq!(classify_temperature(100.0, rest, &ranges), HealthStatus::Monitor);
    }

    #[test]
    fn test_activity_state_selects_band() {
        let ranges = large_adult();
        assert_eq!(
            classify_temperature(103.2, ActivityState::Rest, &ranges),
            HealthStatus::Monitor
        );
        assert_eq!(
            classify_temperature(103.2, ActivityState::Active, &ranges),
            HealthStatus::Normal
        );
        assert_eq!(
            classify_heart_rate(125.0, ActivityState::Rest, &ranges),
            HealthStatus::Alert
        );
        assert_eq!(
            classify_heart_rate(125.0, ActivityState::Active, &ranges),
            HealthStatus::Normal
        );
    }

    #[test]
    fn test_configured_buffers() {
        let ranges = large_adult();
        let classifier = HealthClassifier::new(ClassifierConfig {
            temperature_buffer_f: 0.5,
            heart_rate_buffer_bpm: 5.0,
        });
        assert_eq!(
            classifier.heart_rate(107.0, ActivityState::Rest, &ranges),
            HealthStatus::Alert
        );
        assert_eq!(
            classifier.temperature(102.8, ActivityState::Rest, &ranges),
            HealthStatus::Monitor
        );
        assert_eq!(
            HealthClassifier::default().heart_rate(107.0, ActivityState::Rest, &ranges),
            HealthStatus::Monitor
        );
    }
}
