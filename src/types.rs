//! Core data types for the vest vitals core.
//!
//! This module defines the values that flow between the synthesizers, the
//! ingestor, the activity detector and the health classifier. Everything the
//! rendering sink shows is built from these types.
//!
//! Design principle: if a concept exists, it gets a type. Raw floats only
//! cross a boundary when they are plainly a measurement (°F, BPM, g).

use serde::{Deserialize, Serialize};

// ============================================================================
// SAMPLES
// ============================================================================

/// A three-axis accelerometer reading in g.
///
/// `magnitude` is either supplied by the live sensor or derived as the
/// Euclidean norm of the axes (synthetic samples).
///
/// Design note: f32 matches the 32-bit floats delivered by the vest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Acceleration magnitude in g.
    pub magnitude: f32,
}

impl AccelVector {
    /// Creates a vector whose magnitude is derived from the axes.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            magnitude: axes_magnitude(x, y, z),
        }
    }

    /// Creates a vector with a magnitude reported by the sensor.
    pub fn with_magnitude(x: f32, y: f32, z: f32, magnitude: f32) -> Self {
        Self { x, y, z, magnitude }
    }

    /// Euclidean norm of the three axes, ignoring the stored magnitude.
    pub fn axes_magnitude(&self) -> f32 {
        axes_magnitude(self.x, self.y, self.z)
    }

    /// True when all three axes are finite numbers.
    pub fn axes_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

fn axes_magnitude(x: f32, y: f32, z: f32) -> f32 {
    (x * x + y * y + z * z).sqrt()
}

/// Where a sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    /// Produced by one of the in-process synthesizers or a manual preset.
    #[default]
    Synthetic,
    /// Delivered by the vest over the external sensor feed.
    Live,
}

/// Which physiological signal a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Temperature,
    Ppg,
    Accel,
}

impl SignalKind {
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Temperature => "temperature",
            SignalKind::Ppg => "ppg",
            SignalKind::Accel => "accelerometer",
        }
    }
}

/// The payload of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    /// Average body temperature in °F.
    Temperature(f64),
    /// Raw PPG value in ADC units.
    Ppg(f64),
    /// Accelerometer vector in g.
    Accel(AccelVector),
}

/// A single timestamped reading. Samples are consumed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
    pub value: SampleValue,
    pub source: SampleSource,
}

impl Sample {
    pub fn temperature(timestamp_ms: u64, fahrenheit: f64, source: SampleSource) -> Self {
        Self {
            timestamp_ms,
            value: SampleValue::Temperature(fahrenheit),
            source,
        }
    }

    pub fn ppg(timestamp_ms: u64, raw: f64, source: SampleSource) -> Self {
        Self {
            timestamp_ms,
            value: SampleValue::Ppg(raw),
            source,
        }
    }

    pub fn accel(timestamp_ms: u64, vector: AccelVector, source: SampleSource) -> Self {
        Self {
            timestamp_ms,
            value: SampleValue::Accel(vector),
            source,
        }
    }

    /// The signal this sample belongs to.
    pub fn kind(&self) -> SignalKind {
        match self.value {
            SampleValue::Temperature(_) => SignalKind::Temperature,
            SampleValue::Ppg(_) => SignalKind::Ppg,
            SampleValue::Accel(_) => SignalKind::Accel,
        }
    }
}

// ============================================================================
// ACTIVITY
// ============================================================================

/// Binary activity state used to pick the health bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    #[default]
    Rest,
    Active,
}

impl ActivityState {
    /// Banner label.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityState::Rest => "AT REST",
            ActivityState::Active => "ACTIVE",
        }
    }

    /// Banner subtitle.
    pub fn description(&self) -> &'static str {
        match self {
            ActivityState::Rest => "Biometric thresholds adjusted for resting state",
            ActivityState::Active => "Biometric thresholds adjusted for exercise state",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ActivityState::Active)
    }
}

/// Movement status line shown under the accelerometer readout.
///
/// The detector only ever emits `AtRest` or `ActiveMovement`; `Walking` is
/// reserved for the manual walking preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    #[default]
    AtRest,
    Walking,
    ActiveMovement,
}

impl MovementStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MovementStatus::AtRest => "Subject at Rest",
            MovementStatus::Walking => "Walking Detected",
            MovementStatus::ActiveMovement => "Active Movement Detected",
        }
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self, MovementStatus::AtRest)
    }
}

/// Synthetic motion profile used by the accelerometer generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityProfile {
    Rest,
    Walking,
    Running,
}

impl ActivityProfile {
    /// Fixed readout shown when the profile is selected manually.
    pub fn preset_reading(&self) -> AccelVector {
        match self {
            ActivityProfile::Rest => AccelVector::with_magnitude(0.01, -0.02, 0.98, 1.0),
            ActivityProfile::Walking => AccelVector::with_magnitude(0.15, 0.12, 1.05, 1.08),
            ActivityProfile::Running => AccelVector::with_magnitude(0.35, 0.28, 1.15, 1.25),
        }
    }

    /// Movement status shown when the profile is selected manually.
    pub fn movement_status(&self) -> MovementStatus {
        match self {
            ActivityProfile::Rest => MovementStatus::AtRest,
            ActivityProfile::Walking => MovementStatus::Walking,
            ActivityProfile::Running => MovementStatus::ActiveMovement,
        }
    }
}

// ============================================================================
// HEALTH
// ============================================================================

/// Three-level verdict for a single signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Inside the band.
    Normal,
    /// In the buffer zone between the band edge and the alert threshold.
    Monitor,
    /// Beyond the buffer zone.
    Alert,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "Normal",
            HealthStatus::Monitor => "Monitor",
            HealthStatus::Alert => "Alert",
        }
    }
}

/// PPG signal quality as shown to the operator.
///
/// No real quality estimation is performed: synthetic and live traces are
/// both reported as `Good` once samples flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalQuality {
    #[default]
    NoSignal,
    Good,
}

impl SignalQuality {
    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::NoSignal => "--",
            SignalQuality::Good => "Good",
        }
    }
}

/// An inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies inside the band, edges included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// The band moved by `delta` on both edges.
    pub fn shifted(&self, delta: f64) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }
}

/// Per-subject bands for both signals in both activity states.
///
/// Under the reference tables `temp_active.min == temp_rest.max - 0.5` and
/// `hr_active.min == hr_rest.max` (the latter only without the age shift).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthRanges {
    pub temp_rest: Band,
    pub temp_active: Band,
    pub hr_rest: Band,
    pub hr_active: Band,
}

impl HealthRanges {
    /// Temperature band for the given activity state.
    pub fn temperature_band(&self, state: ActivityState) -> Band {
        match state {
            ActivityState::Rest => self.temp_rest,
            ActivityState::Active => self.temp_active,
        }
    }

    /// Heart-rate band for the given activity state.
    pub fn heart_rate_band(&self, state: ActivityState) -> Band {
        match state {
            ActivityState::Rest => self.hr_rest,
            ActivityState::Active => self.hr_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accel_magnitude_is_derived() {
        let v = AccelVector::new(3.0, 4.0, 0.0);
        assert_eq!(v.magnitude, 5.0);
        assert_eq!(v.axes_magnitude(), 5.0);
    }

    #[test]
    fn test_supplied_magnitude_is_kept() {
        let v = AccelVector::with_magnitude(0.0, 0.0, 1.0, 1.2);
        assert_eq!(v.magnitude, 1.2);
        assert_eq!(v.axes_magnitude(), 1.0);
    }

    #[test]
    fn test_sample_kind() {
        assert_eq!(
            Sample::temperature(0, 101.5, SampleSource::Synthetic).kind(),
            SignalKind::Temperature
        );
        assert_eq!(Sample::ppg(0, 500.0, SampleSource::Live).kind(), SignalKind::Ppg);
        assert_eq!(
            Sample::accel(0, AccelVector::new(0.0, 0.0, 1.0), SampleSource::Live).kind(),
            SignalKind::Accel
        );
    }

    #[test]
    fn test_band_is_inclusive() {
        let band = Band::new(60.0, 100.0);
        assert!(band.contains(60.0));
        assert!(band.contains(100.0));
        assert!(!band.contains(59.9));
        assert!(!band.contains(100.1));
        assert!(!band.contains(f64::NAN));
    }

    #[test]
    fn test_band_shift() {
        assert_eq!(Band::new(60.0, 100.0).shifted(10.0), Band::new(70.0, 110.0));
    }

    #[test]
    fn test_ranges_pick_band_by_state() {
        let ranges = HealthRanges {
            temp_rest: Band::new(101.0, 102.5),
            temp_active: Band::new(102.0, 103.5),
            hr_rest: Band::new(60.0, 100.0),
            hr_active: Band::new(100.0, 160.0),
        };
        assert_eq!(ranges.temperature_band(ActivityState::Active).max, 103.5);
        assert_eq!(ranges.heart_rate_band(ActivityState::Rest).min, 60.0);
    }

    #[test]
    fn test_preset_movement_status() {
        assert!(!ActivityProfile::Rest.movement_status().is_moving());
        assert_eq!(ActivityProfile::Walking.movement_status().label(), "Walking Detected");
        assert_eq!(ActivityProfile::Running.preset_reading().magnitude, 1.25);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ActivityState::default(), ActivityState::Rest);
        assert_eq!(ActivityState::Active.label(), "ACTIVE");
        assert_eq!(HealthStatus::Monitor.label(), "Monitor");
        assert_eq!(SignalQuality::Good.label(), "Good");
    }
}
