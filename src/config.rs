//! Session configuration.
//!
//! All tunables of a monitoring session in one serde value. Every section
//! falls back to its defaults, so a settings file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "ppg": { "history_len": 200 },
//!   "subject": { "breed": "husky", "size": "large", "age_years": 3 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::accel::AccelConfig;
use crate::activity::DetectorConfig;
use crate::calibration::SubjectCalibration;
use crate::error::ConfigurationError;
use crate::health::ClassifierConfig;
use crate::ingest::SignalSources;
use crate::ppg::PpgConfig;
use crate::temperature::TemperatureConfig;

/// Top-level configuration of a [`crate::session::MonitoringSession`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ppg: PpgConfig,
    pub accel: AccelConfig,
    pub detector: DetectorConfig,
    pub classifier: ClassifierConfig,
    pub temperature: TemperatureConfig,
    /// Source of each signal while it is in auto mode.
    pub sources: SignalSources,
    /// Seed for the noise generator. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Subject the session starts with.
    pub subject: SubjectCalibration,
}

impl SessionConfig {
    /// Load and validate a JSON settings file.
    pub fn from_json(path: &Path) -> Result<Self, ConfigurationError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::SettingsRead {
                path: path.to_path_buf(),
                source,
            })?;
        let cfg: SessionConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigurationError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pretty-printed JSON form of this configuration.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every field for consistency. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        // PPG
        if self.ppg.tick_ms == 0 {
            return Err(ConfigurationError::invalid_setting("ppg.tick_ms", "must be > 0"));
        }
        if self.ppg.history_len == 0 {
            return Err(ConfigurationError::invalid_setting("ppg.history_len", "must be > 0"));
        }
        ensure_non_negative("ppg.noise_span", self.ppg.noise_span)?;
        let bpm = self.ppg.default_heart_rate_bpm;
        if !(bpm.is_finite() && bpm > 0.0 && bpm <= 300.0) {
            return Err(ConfigurationError::invalid_setting(
                "ppg.default_heart_rate_bpm",
                format!("must be in (0, 300], got {bpm}"),
            ));
        }

        // Accelerometer
        if self.accel.window_len == 0 {
            return Err(ConfigurationError::invalid_setting("accel.window_len", "must be > 0"));
        }

        // Detector
        if self.detector.history_len == 0 {
            return Err(ConfigurationError::invalid_setting(
                "detector.history_len",
                "must be > 0",
            ));
        }
        ensure_positive("detector.base_threshold", self.detector.base_threshold as f64)?;
        ensure_unit_interval(
            "detector.active_threshold_factor",
            self.detector.active_threshold_factor as f64,
        )?;
        ensure_unit_interval("detector.exit_factor", self.detector.exit_factor as f64)?;
        if !self.detector.initial_magnitude.is_finite() {
            return Err(ConfigurationError::invalid_setting(
                "detector.initial_magnitude",
                "must be finite",
            ));
        }

        // Classifier
        ensure_non_negative("classifier.temperature_buffer_f", self.classifier.temperature_buffer_f)?;
        ensure_non_negative(
            "classifier.heart_rate_buffer_bpm",
            self.classifier.heart_rate_buffer_bpm,
        )?;

        // Temperature
        let t = &self.temperature;
        if t.tick_ms == 0 {
            return Err(ConfigurationError::invalid_setting("temperature.tick_ms", "must be > 0"));
        }
        if !(t.min_f.is_finite() && t.max_f.is_finite() && t.min_f <= t.max_f) {
            return Err(ConfigurationError::invalid_setting(
                "temperature.min_f",
                format!("must be finite and <= temperature.max_f ({})", t.max_f),
            ));
        }
        if !(t.start_f >= t.min_f && t.start_f <= t.max_f) {
            return Err(ConfigurationError::invalid_setting(
                "temperature.start_f",
                format!("must lie in [{}, {}]", t.min_f, t.max_f),
            ));
        }
        ensure_non_negative("temperature.step_span_f", t.step_span_f)?;
        ensure_non_negative("temperature.probe_spread_f", t.probe_spread_f)?;

        Ok(())
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::invalid_setting(
            field,
            format!("must be a finite value >= 0, got {value}"),
        ))
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::invalid_setting(
            field,
            format!("must be a finite value > 0, got {value}"),
        ))
    }
}

fn ensure_unit_interval(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigurationError::invalid_setting(
            field,
            format!("must be in (0, 1], got {value}"),
        ))
    }
}
