//! Vest Vitals Library
//!
//! Signal core for a worn canine monitoring vest. It synthesizes PPG and
//! accelerometer traces for demonstration, ingests live accelerometer
//! notifications, tracks a hysteretic Rest/Active activity state, and
//! classifies body temperature and heart rate as Normal, Monitor or Alert
//! against bands calibrated to the subject's breed, size and age.
//!
//! # Design Philosophy
//!
//! - **One owner**: a [`MonitoringSession`] holds all state; every control
//!   is a method call, so there is nothing global and nothing to lock.
//! - **Heart rate is an input**: the PPG waveform is drawn from a target
//!   rate. Nothing here estimates heart rate from the trace.
//! - **Nothing is fatal**: bad input is reported as a typed error or a
//!   rejected sample, and the last good readings stay on display.
//! - **Bounded memory**: every trace has a fixed capacity.
//!
//! # Example
//!
//! ```ignore
//! use vest_vitals::{MonitoringSession, SessionConfig, PpgMode};
//!
//! let mut session = MonitoringSession::new(SessionConfig::default())?;
//! session.set_subject_calibration("husky", "large", "5")?;
//!
//! for i in 0..20 {
//!     session.tick_ppg(i * 50);
//! }
//! session.set_ppg_mode(PpgMode::Tachycardia);
//!
//! let frame = session.frame();
//! println!("{}", frame.to_json()?);
//! ```

pub mod accel;
pub mod activity;
pub mod calibration;
pub mod config;
pub mod error;
pub mod export;
pub mod health;
pub mod history;
pub mod ingest;
pub mod modes;
pub mod noise;
pub mod ppg;
pub mod session;
pub mod temperature;
pub mod types;
pub mod wire;


// Re-export commonly used types
pub use activity::{ActivityDetector, Detection, DetectorConfig};
pub use calibration::{
    compute_health_ranges, Breed, CalibrationUpdate, RangeLabels, SubjectCalibration, SubjectSize,
};
pub use config::SessionConfig;
pub use error::{ConfigurationError, Error, Result, WireError};
pub use export::DisplayFrame;
pub use health::{classify_heart_rate, classify_temperature};
pub use modes::{AccelMode, PpgMode, TemperatureMode};
pub use session::{IngestOutcome, MonitoringSession};
pub use types::{
    AccelVector, ActivityProfile, ActivityState, Band, HealthRanges, HealthStatus, MovementStatus,
    Sample, SampleSource, SignalKind, SignalQuality,
};
