//! Display frame export.
//!
//! A [`DisplayFrame`] is a self-contained snapshot of everything the
//! rendering sink draws after a tick: the activity banner, one panel per
//! sensor card with its series, and the reference ranges. It serializes to
//! JSON for sinks running out of process.

use serde::{Deserialize, Serialize};

use crate::calibration::{RangeLabels, SubjectCalibration};
use crate::modes::{AccelMode, PpgMode, TemperatureMode};
use crate::session::MonitoringSession;
use crate::temperature::TemperatureReadout;
use crate::types::{
    AccelVector, ActivityState, HealthRanges, HealthStatus, MovementStatus, SignalQuality,
};

/// Complete snapshot for the rendering sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// Latest input timestamp (ms).
    pub timestamp_ms: u64,
    pub activity: ActivityPanel,
    pub temperature: TemperaturePanel,
    pub ppg: PpgPanel,
    pub accel: AccelPanel,
    pub subject: SubjectCalibration,
    pub ranges: HealthRanges,
    pub range_labels: RangeLabels,
}

/// Rest/Active banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPanel {
    pub state: ActivityState,
    pub label: String,
    pub description: String,
    pub auto_detection: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePanel {
    pub mode: TemperatureMode,
    pub indicator: String,
    /// Probe values rounded to one decimal; `None` until the first reading.
    pub readout: Option<TemperatureReadout>,
    pub status: Option<HealthStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpgPanel {
    pub mode: PpgMode,
    pub indicator: String,
    pub raw: Option<f64>,
    pub heart_rate_bpm: Option<f64>,
    pub status: Option<HealthStatus>,
    pub quality: SignalQuality,
    /// Plotted samples, oldest first.
    pub series: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccelPanel {
    pub mode: AccelMode,
    pub indicator: String,
    pub reading: Option<AccelVector>,
    pub movement: MovementStatus,
    pub movement_label: String,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl DisplayFrame {
    /// Build a frame from the session's current state.
    pub fn from_session(session: &MonitoringSession) -> Self {
        let state = session.activity_state();
        let trace = session.accel_trace();

        Self {
            timestamp_ms: session.clock_ms(),
            activity: ActivityPanel {
                state,
                label: state.label().to_string(),
                description: state.description().to_string(),
                auto_detection: session.auto_detection(),
            },
            temperature: TemperaturePanel {
                mode: session.temperature_mode(),
                indicator: session.temperature_mode().indicator().to_string(),
                readout: session.temperature().map(|r| r.rounded()),
                status: session.temperature_status(),
            },
            ppg: PpgPanel {
                mode: session.ppg_mode(),
                indicator: session.ppg_mode().indicator().to_string(),
                raw: session.ppg_raw(),
                heart_rate_bpm: session.heart_rate_bpm(),
                status: session.heart_rate_status(),
                quality: session.ppg_quality(),
                series: session.ppg_series(),
            },
            accel: AccelPanel {
                mode: session.accel_mode(),
                indicator: session.accel_mode().indicator().to_string(),
                reading: session.accel_reading(),
                movement: session.movement_status(),
                movement_label: session.movement_status().label().to_string(),
                x: trace.x(),
                y: trace.y(),
                z: trace.z(),
            },
            subject: *session.calibration(),
            ranges: *session.ranges(),
            range_labels: session.range_labels().clone(),
        }
    }

    /// Compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
