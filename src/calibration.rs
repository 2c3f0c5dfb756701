//! Subject calibration and health-range computation.
//!
//! A subject is described by breed, size class and age. Size picks the base
//! heart-rate bands, age outside the adult window lifts the resting band, and
//! breed shifts the temperature bands by a fixed offset. The computation is a
//! pure function and runs whenever the operator edits the subject.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::types::{Band, HealthRanges};

/// Resting temperature band before the breed offset (°F).
pub const TEMP_REST_BAND_F: Band = Band::new(101.0, 102.5);

/// Active temperature band before the breed offset (°F).
pub const TEMP_ACTIVE_BAND_F: Band = Band::new(102.0, 103.5);

/// Ages (years) that use the unadjusted resting heart-rate band.
pub const ADULT_AGE_YEARS: RangeInclusive<u32> = 2..=10;

/// BPM added to both resting bounds for puppies and seniors.
pub const AGE_HEART_RATE_SHIFT_BPM: f64 = 10.0;

// ============================================================================
// BREED
// ============================================================================

/// Supported breeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breed {
    Labrador,
    GermanShepherd,
    GoldenRetriever,
    Beagle,
    Bulldog,
    Poodle,
    Husky,
    Boxer,
}

/// Static reference data for one breed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreedProfile {
    /// Size class most dogs of the breed fall into.
    pub typical_size: SubjectSize,
    /// Typical resting heart rate (BPM).
    pub base_heart_rate_bpm: f64,
    /// Offset applied to every temperature bound (°F).
    pub temperature_offset_f: f64,
}

impl Breed {
    pub const ALL: [Breed; 8] = [
        Breed::Labrador,
        Breed::GermanShepherd,
        Breed::GoldenRetriever,
        Breed::Beagle,
        Breed::Bulldog,
        Breed::Poodle,
        Breed::Husky,
        Breed::Boxer,
    ];

    /// Selector key, e.g. `german_shepherd`.
    pub fn key(&self) -> &'static str {
        match self {
            Breed::Labrador => "labrador",
            Breed::GermanShepherd => "german_shepherd",
            Breed::GoldenRetriever => "golden_retriever",
            Breed::Beagle => "beagle",
            Breed::Bulldog => "bulldog",
            Breed::Poodle => "poodle",
            Breed::Husky => "husky",
            Breed::Boxer => "boxer",
        }
    }

    pub fn profile(&self) -> BreedProfile {
        let (typical_size, base_heart_rate_bpm, temperature_offset_f) = match self {
            Breed::Labrador => (SubjectSize::Large, 70.0, 0.0),
            Breed::GermanShepherd => (SubjectSize::Large, 65.0, 0.0),
            Breed::GoldenRetriever => (SubjectSize::Large, 70.0, 0.0),
            Breed::Beagle => (SubjectSize::Medium, 80.0, 0.0),
            Breed::Bulldog => (SubjectSize::Medium, 75.0, 0.2),
            Breed::Poodle => (SubjectSize::Medium, 75.0, 0.0),
            Breed::Husky => (SubjectSize::Large, 65.0, -0.3),
            Breed::Boxer => (SubjectSize::Large, 70.0, 0.1),
        };
        BreedProfile {
            typical_size,
            base_heart_rate_bpm,
            temperature_offset_f,
        }
    }

    pub fn temperature_offset_f(&self) -> f64 {
        self.profile().temperature_offset_f
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Breed {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Breed::ALL
            .iter()
            .copied()
            .find(|breed| breed.key() == key)
            .ok_or_else(|| ConfigurationError::UnknownBreed(s.to_string()))
    }
}

// ============================================================================
// SIZE
// ============================================================================

/// Body size class. Drives the heart-rate bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectSize {
    Small,
    Medium,
    Large,
    Giant,
}

impl SubjectSize {
    pub fn key(&self) -> &'static str {
        match self {
            SubjectSize::Small => "small",
            SubjectSize::Medium => "medium",
            SubjectSize::Large => "large",
            SubjectSize::Giant => "giant",
        }
    }

    /// Base `(rest, active)` heart-rate bands in BPM.
    pub fn heart_rate_bands(&self) -> (Band, Band) {
        match self {
            SubjectSize::Small => (Band::new(90.0, 140.0), Band::new(140.0, 220.0)),
            SubjectSize::Medium => (Band::new(70.0, 110.0), Band::new(110.0, 180.0)),
            SubjectSize::Large => (Band::new(60.0, 100.0), Band::new(100.0, 160.0)),
            SubjectSize::Giant => (Band::new(50.0, 90.0), Band::new(90.0, 140.0)),
        }
    }
}

impl fmt::Display for SubjectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SubjectSize {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SubjectSize::Small),
            "medium" => Ok(SubjectSize::Medium),
            "large" => Ok(SubjectSize::Large),
            "giant" => Ok(SubjectSize::Giant),
            _ => Err(ConfigurationError::UnknownSize(s.to_string())),
        }
    }
}

// ============================================================================
// CALIBRATION
// ============================================================================

/// Per-subject parameters. Immutable once built; a new value replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectCalibration {
    pub breed: Breed,
    pub size: SubjectSize,
    pub age_years: u32,
    /// Body weight as entered. Validated but not used by the range tables.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl SubjectCalibration {
    pub fn new(breed: Breed, size: SubjectSize, age_years: u32) -> Self {
        Self {
            breed,
            size,
            age_years,
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Builds a calibration from raw form inputs.
    ///
    /// Fails with the first invalid field, checked in the order breed, size,
    /// age, weight. A blank weight is treated as absent.
    pub fn from_inputs(
        breed: &str,
        size: &str,
        age: &str,
        weight: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let breed: Breed = breed.parse()?;
        let size: SubjectSize = size.parse()?;
        let age_years = parse_age(age)?;
        let weight = match weight.map(str::trim).filter(|w| !w.is_empty()) {
            Some(raw) => Some(parse_weight(raw)?),
            None => None,
        };
        Ok(Self {
            breed,
            size,
            age_years,
            weight,
        })
    }

    /// True when the age falls outside the adult window.
    pub fn is_age_adjusted(&self) -> bool {
        !ADULT_AGE_YEARS.contains(&self.age_years)
    }
}

impl Default for SubjectCalibration {
    fn default() -> Self {
        Self::new(Breed::Labrador, SubjectSize::Large, 5)
    }
}

/// Fractional ages are truncated to whole years, so "1.5" reads as 1.
fn parse_age(raw: &str) -> Result<u32, ConfigurationError> {
    let years = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigurationError::InvalidAge {
            value: raw.to_string(),
            reason: "expected a number of years",
        })?;
    if !years.is_finite() || years < 0.0 || years >= u32::MAX as f64 {
        return Err(ConfigurationError::InvalidAge {
            value: raw.to_string(),
            reason: "must be a non-negative number of years",
        });
    }
    Ok(years.trunc() as u32)
}

fn parse_weight(raw: &str) -> Result<f64, ConfigurationError> {
    let weight = raw
        .parse::<f64>()
        .map_err(|_| ConfigurationError::InvalidWeight {
            value: raw.to_string(),
            reason: "expected a number",
        })?;
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ConfigurationError::InvalidWeight {
            value: raw.to_string(),
            reason: "must be a positive number",
        });
    }
    Ok(weight)
}

/// Derives the four health bands from a calibration.
pub fn compute_health_ranges(calibration: &SubjectCalibration) -> HealthRanges {
    let (mut hr_rest, hr_active) = calibration.size.heart_rate_bands();
    if calibration.is_age_adjusted() {
        hr_rest = hr_rest.shifted(AGE_HEART_RATE_SHIFT_BPM);
    }

    let offset = calibration.breed.temperature_offset_f();
    HealthRanges {
        temp_rest: TEMP_REST_BAND_F.shifted(offset),
        temp_active: TEMP_ACTIVE_BAND_F.shifted(offset),
        hr_rest,
        hr_active,
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

/// Formatted range strings for the reference panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLabels {
    pub temp_rest: String,
    pub temp_active: String,
    pub hr_rest: String,
    pub hr_active: String,
}

impl From<&HealthRanges> for RangeLabels {
    fn from(ranges: &HealthRanges) -> Self {
        Self {
            temp_rest: temperature_label(&ranges.temp_rest),
            temp_active: temperature_label(&ranges.temp_active),
            hr_rest: heart_rate_label(&ranges.hr_rest),
            hr_active: heart_rate_label(&ranges.hr_active),
        }
    }
}

fn temperature_label(band: &Band) -> String {
    format!("{:.1} - {:.1}°F", band.min, band.max)
}

fn heart_rate_label(band: &Band) -> String {
    format!("{:.0} - {:.0} BPM", band.min, band.max)
}

/// Result of a calibration change: the new bands and their labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationUpdate {
    pub calibration: SubjectCalibration,
    pub ranges: HealthRanges,
    pub labels: RangeLabels,
}

impl CalibrationUpdate {
    pub fn from_calibration(calibration: SubjectCalibration) -> Self {
        let ranges = compute_health_ranges(&calibration);
        let labels = RangeLabels::from(&ranges);
        Self {
            calibration,
            ranges,
            labels,
        }
    }
}
