//! Sample Ingestor.
//!
//! Single entry point for readings regardless of origin. Each signal has an
//! expected source (synthetic or live) selected by its current mode; samples
//! from the other source are dropped, as are samples that carry no usable
//! number. Accepted samples are normalized before they reach the detector,
//! the classifier or the rendering sink.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AccelVector, Sample, SampleSource, SampleValue, SignalKind};

/// Expected source per signal.
///
/// As configuration this is the source used while a signal is in auto mode;
/// manual presets are always synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSources {
    pub temperature: SampleSource,
    pub ppg: SampleSource,
    pub accel: SampleSource,
}

impl Default for SignalSources {
    fn default() -> Self {
        Self {
            temperature: SampleSource::Synthetic,
            ppg: SampleSource::Synthetic,
            accel: SampleSource::Live,
        }
    }
}

impl SignalSources {
    pub fn get(&self, kind: SignalKind) -> SampleSource {
        match kind {
            SignalKind::Temperature => self.temperature,
            SignalKind::Ppg => self.ppg,
            SignalKind::Accel => self.accel,
        }
    }

    pub fn set(&mut self, kind: SignalKind, source: SampleSource) {
        match kind {
            SignalKind::Temperature => self.temperature = source,
            SignalKind::Ppg => self.ppg = source,
            SignalKind::Accel => self.accel = source,
        }
    }
}

/// Why a sample was dropped.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Rejected {
    #[error("{} sample from {got:?} source while expecting {expected:?}", .kind.name())]
    SourceMismatch {
        kind: SignalKind,
        expected: SampleSource,
        got: SampleSource,
    },

    #[error("{} sample is not a finite number", .kind.name())]
    NonFinite { kind: SignalKind },
}

/// A sample that passed ingestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSample {
    pub timestamp_ms: u64,
    pub value: SampleValue,
    pub source: SampleSource,
    /// True when the accelerometer magnitude was recomputed from the axes.
    pub magnitude_derived: bool,
}

impl NormalizedSample {
    pub fn kind(&self) -> SignalKind {
        match self.value {
            SampleValue::Temperature(_) => SignalKind::Temperature,
            SampleValue::Ppg(_) => SignalKind::Ppg,
            SampleValue::Accel(_) => SignalKind::Accel,
        }
    }
}

/// Validates and normalizes incoming samples.
#[derive(Debug, Clone, Default)]
pub struct SampleIngestor {
    sources: SignalSources,
    accepted: u64,
    rejected: u64,
}

impl SampleIngestor {
    pub fn new(sources: SignalSources) -> Self {
        Self {
            sources,
            accepted: 0,
            rejected: 0,
        }
    }

    pub fn sources(&self) -> SignalSources {
        self.sources
    }

    /// Select the expected source for one signal.
    pub fn set_source(&mut self, kind: SignalKind, source: SampleSource) {
        self.sources.set(kind, source);
    }

    /// Accept or reject a sample.
    pub fn normalize(&mut self, sample: Sample) -> Result<NormalizedSample, Rejected> {
        let result = self.check(sample);
        match result {
            Ok(_) => self.accepted += 1,
            Err(_) => self.rejected += 1,
        }
        result
    }

    /// Get ingestion statistics (accepted, rejected).
    pub fn statistics(&self) -> (u64, u64) {
        (self.accepted, self.rejected)
    }

    fn check(&self, sample: Sample) -> Result<NormalizedSample, Rejected> {
        let kind = sample.kind();
        let expected = self.sources.get(kind);
        if sample.source != expected {
            return Err(Rejected::SourceMismatch {
                kind,
                expected,
                got: sample.source,
            });
        }

        let (value, magnitude_derived) = match sample.value {
            SampleValue::Temperature(v) | SampleValue::Ppg(v) if !v.is_finite() => {
                return Err(Rejected::NonFinite { kind });
            }
            SampleValue::Accel(v) => {
                let (v, derived) = normalize_accel(v).ok_or(Rejected::NonFinite { kind })?;
                (SampleValue::Accel(v), derived)
            }
            other => (other, false),
        };

        Ok(NormalizedSample {
            timestamp_ms: sample.timestamp_ms,
            value,
            source: sample.source,
            magnitude_derived,
        })
    }
}

/// Recover a usable vector: axes must be finite, a missing or non-finite
/// magnitude is replaced by the axis norm.
fn normalize_accel(v: AccelVector) -> Option<(AccelVector, bool)> {
    if !v.axes_finite() {
        return None;
    }
    if v.magnitude.is_finite() {
        Some((v, false))
    } else {
        Some((AccelVector::new(v.x, v.y, v.z), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_accel() -> SampleIngestor {
        SampleIngestor::default()
    }

    #[test]
    fn test_accepts_expected_source() {
        let mut ingestor = SampleIngestor::default();
        let sample = Sample::temperature(10, 101.5, SampleSource::Synthetic);
        let normalized = ingestor.normalize(sample).unwrap();
        assert_eq!(normalized.value, SampleValue::Temperature(101.5));
        assert_eq!(normalized.timestamp_ms, 10);
        assert_eq!(normalized.kind(), SignalKind::Temperature);
        assert!(!normalized.magnitude_derived);
    }

    #[test]
    fn test_rejects_other_source() {
        let mut ingestor = live_accel();
        let sample = Sample::accel(0, AccelVector::new(0.0, 0.0, 1.0), SampleSource::Synthetic);
        assert_eq!(
            ingestor.normalize(sample),
            Err(Rejected::SourceMismatch {
                kind: SignalKind::Accel,
                expected: SampleSource::Live,
                got: SampleSource::Synthetic,
            })
        );
        assert_eq!(ingestor.statistics(), (0, 1));
    }

    #[test]
    fn test_rejects_non_finite_scalars() {
        let mut ingestor = SampleIngestor::default();
        assert_eq!(
            ingestor.normalize(Sample::ppg(0, f64::NAN, SampleSource::Synthetic)),
            Err(Rejected::NonFinite { kind: SignalKind::Ppg })
        );
        assert!(ingestor
            .normalize(Sample::temperature(0, f64::INFINITY, SampleSource::Synthetic))
            .is_err());
    }

    #[test]
    fn test_recovers_missing_magnitude() {
        let mut ingestor = live_accel();
        let v = AccelVector::with_magnitude(0.0, 0.6, 0.8, f32::NAN);
        let normalized = ingestor.normalize(Sample::accel(5, v, SampleSource::Live)).unwrap();
        assert!(normalized.magnitude_derived);
        match normalized.value {
            SampleValue::Accel(v) => assert!((v.magnitude - 1.0).abs() < 1e-6),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_axes() {
        let mut ingestor = live_accel();
        let v = AccelVector::with_magnitude(f32::NAN, 0.0, 1.0, 1.0);
        assert_eq!(
            ingestor.normalize(Sample::accel(0, v, SampleSource::Live)),
            Err(Rejected::NonFinite { kind: SignalKind::Accel })
        );
    }

    #[test]
    fn test_switching_source() {
        let mut ingestor = SampleIngestor::default();
        assert_eq!(ingestor.sources().accel, SampleSource::Live);
        ingestor.set_source(SignalKind::Accel, SampleSource::Synthetic);
        let sample = Sample::accel(0, AccelVector::new(0.0, 0.0, 1.0), SampleSource::Synthetic);
        assert!(ingestor.normalize(sample).is_ok());
        assert_eq!(ingestor.statistics(), (1, 0));
    }

    #[test]
    fn test_rejection_message() {
        let err = Rejected::SourceMismatch {
            kind: SignalKind::Ppg,
            expected: SampleSource::Synthetic,
            got: SampleSource::Live,
        };
        assert_eq!(
            err.to_string(),
            "ppg sample from Live source while expecting Synthetic"
        );
    }
}
