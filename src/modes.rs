//! Per-sensor operating modes.
//!
//! Each sensor card has an auto mode plus three manual presets. Mode
//! controls are identified by short keys (`"auto"`, `"fever"`, ...) which
//! parse into these enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::types::ActivityProfile;

/// Indicator text shared by the simulated auto modes.
pub const AUTO_SIMULATED_INDICATOR: &str = "Auto Mode (Simulated)";

// ============================================================================
// TEMPERATURE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureMode {
    /// Random walk, see [`crate::temperature::TemperatureSimulator`].
    #[default]
    Auto,
    Normal,
    Elevated,
    Fever,
}

impl TemperatureMode {
    pub const ALL: [TemperatureMode; 4] = [
        TemperatureMode::Auto,
        TemperatureMode::Normal,
        TemperatureMode::Elevated,
        TemperatureMode::Fever,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TemperatureMode::Auto => "auto",
            TemperatureMode::Normal => "normal",
            TemperatureMode::Elevated => "elevated",
            TemperatureMode::Fever => "fever",
        }
    }

    /// Fixed average temperature of a manual preset (°F).
    pub fn preset_f(&self) -> Option<f64> {
        match self {
            TemperatureMode::Auto => None,
            TemperatureMode::Normal => Some(101.5),
            TemperatureMode::Elevated => Some(102.8),
            TemperatureMode::Fever => Some(104.2),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, TemperatureMode::Auto)
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            TemperatureMode::Auto => AUTO_SIMULATED_INDICATOR,
            TemperatureMode::Normal => "Manual: Normal",
            TemperatureMode::Elevated => "Manual: Elevated",
            TemperatureMode::Fever => "Manual: Fever",
        }
    }
}

impl FromStr for TemperatureMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_control(s, "temperature", &Self::ALL, Self::key)
    }
}

// ============================================================================
// PPG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PpgMode {
    /// Waveform synthesizer running at the default rate.
    #[default]
    Auto,
    Resting,
    Elevated,
    Tachycardia,
}

impl PpgMode {
    pub const ALL: [PpgMode; 4] = [
        PpgMode::Auto,
        PpgMode::Resting,
        PpgMode::Elevated,
        PpgMode::Tachycardia,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PpgMode::Auto => "auto",
            PpgMode::Resting => "resting",
            PpgMode::Elevated => "elevated",
            PpgMode::Tachycardia => "tachycardia",
        }
    }

    /// Heart rate of a manual preset (BPM).
    pub fn preset_bpm(&self) -> Option<f64> {
        match self {
            PpgMode::Auto => None,
            PpgMode::Resting => Some(75.0),
            PpgMode::Elevated => Some(125.0),
            PpgMode::Tachycardia => Some(180.0),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, PpgMode::Auto)
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            PpgMode::Auto => AUTO_SIMULATED_INDICATOR,
            PpgMode::Resting => "Manual: Resting",
            PpgMode::Elevated => "Manual: Elevated",
            PpgMode::Tachycardia => "Manual: Tachycardia",
        }
    }
}

impl FromStr for PpgMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_control(s, "ppg", &Self::ALL, Self::key)
    }
}

// ============================================================================
// ACCELEROMETER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelMode {
    /// Live samples from the vest drive the detector.
    #[default]
    Auto,
    Rest,
    Walking,
    Running,
}

impl AccelMode {
    pub const ALL: [AccelMode; 4] = [
        AccelMode::Auto,
        AccelMode::Rest,
        AccelMode::Walking,
        AccelMode::Running,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AccelMode::Auto => "auto",
            AccelMode::Rest => "rest",
            AccelMode::Walking => "walking",
            AccelMode::Running => "running",
        }
    }

    /// Motion profile of a manual preset.
    pub fn profile(&self) -> Option<ActivityProfile> {
        match self {
            AccelMode::Auto => None,
            AccelMode::Rest => Some(ActivityProfile::Rest),
            AccelMode::Walking => Some(ActivityProfile::Walking),
            AccelMode::Running => Some(ActivityProfile::Running),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, AccelMode::Auto)
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            AccelMode::Auto => "Auto Mode (Live Sensor)",
            AccelMode::Rest => "Manual: At Rest",
            AccelMode::Walking => "Manual: Walking",
            AccelMode::Running => "Manual: Running",
        }
    }
}

impl FromStr for AccelMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_control(s, "accelerometer", &Self::ALL, Self::key)
    }
}

macro_rules! display_by_key {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.key())
                }
            }
        )*
    };
}

display_by_key!(TemperatureMode, PpgMode, AccelMode);

fn parse_control<M: Copy>(
    s: &str,
    signal: &'static str,
    all: &[M],
    key: fn(&M) -> &'static str,
) -> Result<M, ConfigurationError> {
    let wanted = s.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|mode| key(mode) == wanted)
        .ok_or_else(|| ConfigurationError::UnknownControl {
            signal,
            control: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_controls() {
        assert_eq!("fever".parse::<TemperatureMode>().ok(), Some(TemperatureMode::Fever));
        assert_eq!(" Tachycardia ".parse::<PpgMode>().ok(), Some(PpgMode::Tachycardia));
        assert_eq!("walking".parse::<AccelMode>().ok(), Some(AccelMode::Walking));
        for mode in AccelMode::ALL {
            assert_eq!(mode.key().parse::<AccelMode>().ok(), Some(mode));
        }
    }

    #[test]
    fn test_control_of_another_sensor_is_rejected() {
        let err = "fever".parse::<PpgMode>().err();
        assert!(matches!(
            err,
            Some(ConfigurationError::UnknownControl { signal: "ppg", ref control }) if control == "fever"
        ));
        assert_eq!(
            "resting".parse::<AccelMode>().map_err(|e| e.field()).err(),
            Some("mode")
        );
    }

    #[test]
    fn test_presets() {
        assert_eq!(TemperatureMode::Auto.preset_f(), None);
        assert_eq!(TemperatureMode::Elevated.preset_f(), Some(102.8));
        assert_eq!(PpgMode::Tachycardia.preset_bpm(), Some(180.0));
        assert_eq!(AccelMode::Running.profile(), Some(ActivityProfile::Running));
        assert_eq!(AccelMode::Auto.profile(), None);
    }

    #[test]
    fn test_indicators() {
        assert_eq!(TemperatureMode::Auto.indicator(), "Auto Mode (Simulated)");
        assert_eq!(PpgMode::Auto.indicator(), "Auto Mode (Simulated)");
        assert_eq!(AccelMode::Auto.indicator(), "Auto Mode (Live Sensor)");
        assert_eq!(AccelMode::Rest.indicator(), "Manual: At Rest");
        assert_eq!(TemperatureMode::Fever.indicator(), "Manual: Fever");
    }

    #[test]
    fn test_display_is_key() {
        assert_eq!(PpgMode::Elevated.to_string(), "elevated");
        assert_eq!(AccelMode::default().to_string(), "auto");
    }
}
