//! Monitoring session.
//!
//! Owns every piece of mutable state: sensor modes, synthesizers, traces,
//! the activity detector, the subject calibration and the last-known
//! readings. The caller drives it with two clocks (a 1 Hz temperature tick
//! and a 20 Hz PPG tick), live accelerometer notifications, and the mode and
//! calibration controls.
//!
//! # Data flow
//!
//! ```text
//! tick_temperature ──▶ TemperatureSimulator ─┐
//! tick_ppg ──────────▶ PpgSynthesizer ───────┤
//! ingest_live_accel ─▶ decode_accel ─────────┼─▶ SampleIngestor ─┬─▶ ActivityDetector
//! ingest ────────────────────────────────────┘                   ├─▶ HealthClassifier
//!                                                                └─▶ traces / readouts
//! ```
//!
//! Whenever the activity state or the calibration changes, the last-known
//! temperature and heart rate are classified again against the new bands.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::accel::{AccelSynthesizer, AccelTrace};
use crate::activity::{ActivityDetector, Detection};
use crate::calibration::{CalibrationUpdate, RangeLabels, SubjectCalibration};
use crate::config::SessionConfig;
use crate::error::{ConfigurationError, Result};
use crate::export::DisplayFrame;
use crate::health::HealthClassifier;
use crate::history::BoundedHistory;
use crate::ingest::{NormalizedSample, Rejected, SampleIngestor};
use crate::modes::{AccelMode, PpgMode, TemperatureMode};
use crate::ppg::PpgSynthesizer;
use crate::temperature::{probe_readout, TemperatureReadout, TemperatureSimulator};
use crate::types::{
    AccelVector, ActivityState, HealthRanges, HealthStatus, MovementStatus, Sample, SampleSource,
    SampleValue, SignalKind, SignalQuality,
};
use crate::wire;

/// What an accepted sample changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IngestOutcome {
    Temperature {
        readout: TemperatureReadout,
        status: HealthStatus,
    },
    Ppg {
        raw: f64,
    },
    Accel(Detection),
}

/// A single monitoring session for one subject.
#[derive(Debug)]
pub struct MonitoringSession {
    config: SessionConfig,
    rng: StdRng,
    /// Latest timestamp seen on any input (ms).
    clock_ms: u64,

    // Modes
    temperature_mode: TemperatureMode,
    ppg_mode: PpgMode,
    accel_mode: AccelMode,

    // Pipeline
    ingestor: SampleIngestor,
    detector: ActivityDetector,
    classifier: HealthClassifier,

    // Synthesizers
    temperature_sim: TemperatureSimulator,
    ppg_synth: PpgSynthesizer,
    accel_synth: AccelSynthesizer,

    // Calibration
    calibration: SubjectCalibration,
    ranges: HealthRanges,
    labels: RangeLabels,

    // Traces
    ppg_trace: BoundedHistory<f64>,
    accel_trace: AccelTrace,

    // Last-known readings
    temperature: Option<TemperatureReadout>,
    temperature_status: Option<HealthStatus>,
    heart_rate_bpm: Option<f64>,
    heart_rate_status: Option<HealthStatus>,
    ppg_raw: Option<f64>,
    ppg_quality: SignalQuality,
    accel_reading: Option<AccelVector>,
    movement_status: MovementStatus,
}

impl MonitoringSession {
    /// Create a session after validating `config`.
    pub fn new(config: SessionConfig) -> std::result::Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create a session with default configuration.
    pub fn default_session() -> Self {
        Self::build(SessionConfig::default())
    }

    fn build(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let update = CalibrationUpdate::from_calibration(config.subject);

        info!(
            breed = %update.calibration.breed,
            size = %update.calibration.size,
            age_years = update.calibration.age_years,
            "Monitoring session created"
        );

        Self {
            rng,
            clock_ms: 0,
            temperature_mode: TemperatureMode::Auto,
            ppg_mode: PpgMode::Auto,
            accel_mode: AccelMode::Auto,
            ingestor: SampleIngestor::new(config.sources),
            detector: ActivityDetector::new(config.detector),
            classifier: HealthClassifier::new(config.classifier),
            temperature_sim: TemperatureSimulator::new(config.temperature),
            ppg_synth: PpgSynthesizer::new(&config.ppg),
            accel_synth: AccelSynthesizer::new(&config.accel),
            calibration: update.calibration,
            ranges: update.ranges,
            labels: update.labels,
            ppg_trace: BoundedHistory::new(config.ppg.history_len),
            accel_trace: AccelTrace::new(config.accel.window_len),
            temperature: None,
            temperature_status: None,
            heart_rate_bpm: None,
            heart_rate_status: None,
            ppg_raw: None,
            ppg_quality: SignalQuality::NoSignal,
            accel_reading: None,
            movement_status: MovementStatus::AtRest,
            config,
        }
    }

    // =========================================================================
    // CLOCKS
    // =========================================================================

    /// Temperature clock (nominally 1 Hz).
    ///
    /// In auto mode with a synthetic source the random walk advances at most
    /// once per update interval. Returns the new readout when one was made.
    pub fn tick_temperature(&mut self, now_ms: u64) -> Option<TemperatureReadout> {
        self.observe_clock(now_ms);
        if !self.temperature_mode.is_auto()
            || self.ingestor.sources().temperature != SampleSource::Synthetic
        {
            return None;
        }

        let avg = self.temperature_sim.tick(now_ms, &mut self.rng)?;
        match self.ingest(Sample::temperature(now_ms, avg, SampleSource::Synthetic)) {
            Ok(IngestOutcome::Temperature { readout, .. }) => Some(readout),
            _ => None,
        }
    }

    /// PPG clock (nominally 20 Hz).
    ///
    /// Produces one synthetic sample per call in auto mode. Manual modes
    /// freeze the waveform. With a live PPG source no sample is produced,
    /// but the target heart rate is still published and classified.
    pub fn tick_ppg(&mut self, now_ms: u64) -> Option<i32> {
        self.observe_clock(now_ms);
        if !self.ppg_mode.is_auto() {
            return None;
        }
        if self.ingestor.sources().ppg != SampleSource::Synthetic {
            self.publish_heart_rate();
            return None;
        }

        let raw = self.ppg_synth.next_sample(&mut self.rng);
        match self.ingest(Sample::ppg(now_ms, raw as f64, SampleSource::Synthetic)) {
            Ok(_) => Some(raw),
            Err(_) => None,
        }
    }

    // =========================================================================
    // INGESTION
    // =========================================================================

    /// Feed one sample from any source.
    ///
    /// Samples that do not match the signal's current source, or carry no
    /// finite value, are dropped and the last-known state stays in place.
    pub fn ingest(&mut self, sample: Sample) -> std::result::Result<IngestOutcome, Rejected> {
        self.observe_clock(sample.timestamp_ms);

        let normalized = match self.ingestor.normalize(sample) {
            Ok(normalized) => normalized,
            Err(rejected) => {
                match rejected {
                    Rejected::NonFinite { .. } => warn!(reason = %rejected, "Sample dropped"),
                    Rejected::SourceMismatch { .. } => debug!(reason = %rejected, "Sample dropped"),
                }
                return Err(rejected);
            }
        };

        debug!(
            kind = normalized.kind().name(),
            timestamp_ms = normalized.timestamp_ms,
            "Sample accepted"
        );

        Ok(self.apply(normalized))
    }

    /// Feed one raw accelerometer notification from the vest.
    ///
    /// Returns `Ok(None)` when the accelerometer is not in live mode.
    /// Malformed payloads are reported and otherwise ignored.
    pub fn ingest_live_accel(&mut self, now_ms: u64, payload: &[u8]) -> Result<Option<Detection>> {
        if self.ingestor.sources().accel != SampleSource::Live {
            debug!(len = payload.len(), "Live accelerometer payload ignored");
            return Ok(None);
        }

        let vector = wire::decode_accel(payload).map_err(|e| {
            warn!(error = %e, len = payload.len(), "Rejected accelerometer payload");
            e
        })?;

        match self.ingest(Sample::accel(now_ms, vector, SampleSource::Live)) {
            Ok(IngestOutcome::Accel(detection)) => Ok(Some(detection)),
            _ => Ok(None),
        }
    }

    fn apply(&mut self, sample: NormalizedSample) -> IngestOutcome {
        match sample.value {
            SampleValue::Temperature(avg) => {
                let readout = probe_readout(avg, self.config.temperature.probe_spread_f, &mut self.rng);
                let status = self.classify_temperature(avg);
                self.temperature = Some(readout);
                IngestOutcome::Temperature { readout, status }
            }
            SampleValue::Ppg(raw) => {
                self.ppg_trace.push(raw);
                self.ppg_raw = Some(raw);
                self.ppg_quality = SignalQuality::Good;
                self.publish_heart_rate();
                IngestOutcome::Ppg { raw }
            }
            SampleValue::Accel(vector) => {
                self.accel_trace.push(&vector);
                self.accel_reading = Some(vector);
                let detection = self.detector.detect(vector.magnitude);
                self.movement_status = detection.status;
                if detection.transitioned {
                    info!(
                        state = detection.state.label(),
                        avg_movement = detection.avg_movement,
                        "Activity state changed"
                    );
                    self.reclassify();
                }
                IngestOutcome::Accel(detection)
            }
        }
    }

    // =========================================================================
    // MODE CONTROLS
    // =========================================================================

    /// Switch the temperature card's mode.
    ///
    /// Auto restarts the random walk; a manual preset is shown and
    /// classified immediately.
    pub fn set_temperature_mode(&mut self, mode: TemperatureMode) -> Option<TemperatureReadout> {
        self.temperature_mode = mode;
        info!(mode = %mode, indicator = mode.indicator(), "Temperature mode set");

        match mode.preset_f() {
            None => {
                self.temperature_sim.reset();
                self.ingestor
                    .set_source(SignalKind::Temperature, self.config.sources.temperature);
                None
            }
            Some(avg) => {
                self.ingestor
                    .set_source(SignalKind::Temperature, SampleSource::Synthetic);
                match self.ingest(Sample::temperature(self.clock_ms, avg, SampleSource::Synthetic)) {
                    Ok(IngestOutcome::Temperature { readout, .. }) => Some(readout),
                    _ => None,
                }
            }
        }
    }

    /// Switch the PPG card's mode.
    ///
    /// Auto restarts the waveform at the default rate; a manual preset
    /// freezes the waveform and shows its heart rate.
    pub fn set_ppg_mode(&mut self, mode: PpgMode) -> Option<HealthStatus> {
        self.ppg_mode = mode;
        info!(mode = %mode, indicator = mode.indicator(), "PPG mode set");

        match mode.preset_bpm() {
            None => {
                self.ppg_synth.reset(self.config.ppg.default_heart_rate_bpm);
                self.ingestor.set_source(SignalKind::Ppg, self.config.sources.ppg);
                None
            }
            Some(bpm) => {
                self.ingestor.set_source(SignalKind::Ppg, SampleSource::Synthetic);
                self.ppg_synth.set_heart_rate(bpm);
                self.heart_rate_bpm = Some(bpm);
                Some(self.classify_heart_rate(bpm))
            }
        }
    }

    /// Switch the accelerometer card's mode.
    ///
    /// Movement history is cleared either way. A manual profile regenerates
    /// the whole plotted window and shows the preset readout without going
    /// through the detector, so the activity state is left alone.
    pub fn set_accel_mode(&mut self, mode: AccelMode) {
        self.accel_mode = mode;
        self.detector.reset();
        self.accel_synth.reset();
        info!(mode = %mode, indicator = mode.indicator(), "Accelerometer mode set");

        match mode.profile() {
            None => {
                self.ingestor.set_source(SignalKind::Accel, self.config.sources.accel);
            }
            Some(profile) => {
                self.ingestor.set_source(SignalKind::Accel, SampleSource::Synthetic);
                self.accel_trace = self.accel_synth.generate_window(profile, &mut self.rng);
                self.accel_reading = Some(profile.preset_reading());
                self.movement_status = profile.movement_status();
            }
        }
    }

    /// Parse a temperature control key and switch to it.
    pub fn select_temperature_control(
        &mut self,
        control: &str,
    ) -> std::result::Result<Option<TemperatureReadout>, ConfigurationError> {
        Ok(self.set_temperature_mode(control.parse()?))
    }

    /// Parse a PPG control key and switch to it.
    pub fn select_ppg_control(
        &mut self,
        control: &str,
    ) -> std::result::Result<Option<HealthStatus>, ConfigurationError> {
        Ok(self.set_ppg_mode(control.parse()?))
    }

    /// Parse an accelerometer control key and switch to it.
    pub fn select_accel_control(&mut self, control: &str) -> std::result::Result<(), ConfigurationError> {
        self.set_accel_mode(control.parse()?);
        Ok(())
    }

    /// Enable or disable automatic Rest/Active switching.
    pub fn set_auto_detection(&mut self, enabled: bool) {
        self.detector.set_auto_detection(enabled);
        info!(enabled, "Automatic activity detection toggled");
    }

    /// Force the activity state, bypassing the detector's hysteresis.
    pub fn force_activity_state(&mut self, state: ActivityState) {
        let previous = self.detector.state();
        self.detector.force_state(state);
        info!(state = state.label(), "Activity state forced");
        if previous != state {
            self.reclassify();
        }
    }

    // =========================================================================
    // CALIBRATION
    // =========================================================================

    /// Recalibrate from raw form inputs.
    pub fn set_subject_calibration(
        &mut self,
        breed: &str,
        size: &str,
        age: &str,
    ) -> std::result::Result<CalibrationUpdate, ConfigurationError> {
        let calibration = SubjectCalibration::from_inputs(breed, size, age, None).map_err(|e| {
            warn!(field = e.field(), error = %e, "Calibration rejected");
            e
        })?;
        Ok(self.apply_calibration(calibration))
    }

    /// Replace the subject calibration and recompute the health bands.
    pub fn apply_calibration(&mut self, calibration: SubjectCalibration) -> CalibrationUpdate {
        let update = CalibrationUpdate::from_calibration(calibration);
        self.calibration = update.calibration;
        self.ranges = update.ranges;
        self.labels = update.labels.clone();

        info!(
            breed = %calibration.breed,
            size = %calibration.size,
            age_years = calibration.age_years,
            temp_rest = %update.labels.temp_rest,
            hr_rest = %update.labels.hr_rest,
            "Health ranges updated"
        );

        self.reclassify();
        update
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Latest timestamp seen on any input (ms).
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn temperature_mode(&self) -> TemperatureMode {
        self.temperature_mode
    }

    pub fn ppg_mode(&self) -> PpgMode {
        self.ppg_mode
    }

    pub fn accel_mode(&self) -> AccelMode {
        self.accel_mode
    }

    pub fn activity_state(&self) -> ActivityState {
        self.detector.state()
    }

    pub fn auto_detection(&self) -> bool {
        self.detector.auto_detection()
    }

    pub fn calibration(&self) -> &SubjectCalibration {
        &self.calibration
    }

    pub fn ranges(&self) -> &HealthRanges {
        &self.ranges
    }

    pub fn range_labels(&self) -> &RangeLabels {
        &self.labels
    }

    pub fn temperature(&self) -> Option<TemperatureReadout> {
        self.temperature
    }

    pub fn temperature_status(&self) -> Option<HealthStatus> {
        self.temperature_status
    }

    pub fn heart_rate_bpm(&self) -> Option<f64> {
        self.heart_rate_bpm
    }

    pub fn heart_rate_status(&self) -> Option<HealthStatus> {
        self.heart_rate_status
    }

    pub fn ppg_raw(&self) -> Option<f64> {
        self.ppg_raw
    }

    pub fn ppg_quality(&self) -> SignalQuality {
        self.ppg_quality
    }

    /// Plotted PPG samples, oldest first.
    pub fn ppg_series(&self) -> Vec<f64> {
        self.ppg_trace.to_vec()
    }

    pub fn accel_trace(&self) -> &AccelTrace {
        &self.accel_trace
    }

    pub fn accel_reading(&self) -> Option<AccelVector> {
        self.accel_reading
    }

    pub fn movement_status(&self) -> MovementStatus {
        self.movement_status
    }

    pub fn detector(&self) -> &ActivityDetector {
        &self.detector
    }

    pub fn ppg_synthesizer(&self) -> &PpgSynthesizer {
        &self.ppg_synth
    }

    /// Get ingestion statistics (accepted, rejected).
    pub fn ingest_statistics(&self) -> (u64, u64) {
        self.ingestor.statistics()
    }

    /// Snapshot of everything the rendering sink draws.
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::from_session(self)
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn observe_clock(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
    }

    fn classify_temperature(&mut self, avg_f: f64) -> HealthStatus {
        let status = self
            .classifier
            .temperature(avg_f, self.detector.state(), &self.ranges);
        if self.temperature_status != Some(status) {
            debug!(avg_f, status = status.label(), "Temperature status");
        }
        self.temperature_status = Some(status);
        status
    }

    fn classify_heart_rate(&mut self, bpm: f64) -> HealthStatus {
        let status = self
            .classifier
            .heart_rate(bpm, self.detector.state(), &self.ranges);
        if self.heart_rate_status != Some(status) {
            debug!(bpm, status = status.label(), "Heart rate status");
        }
        self.heart_rate_status = Some(status);
        status
    }

    /// Heart rate is the synthesizer's target, never an estimate from the
    /// trace, whichever source feeds the waveform.
    fn publish_heart_rate(&mut self) {
        let bpm = self.ppg_synth.heart_rate_bpm();
        self.heart_rate_bpm = Some(bpm);
        self.classify_heart_rate(bpm);
    }

    /// Classify the last-known values against the current state and bands.
    fn reclassify(&mut self) {
        if let Some(readout) = self.temperature {
            self.classify_temperature(readout.average_f);
        }
        if let Some(bpm) = self.heart_rate_bpm {
            self.classify_heart_rate(bpm);
        }
    }
}

impl Default for MonitoringSession {
    fn default() -> Self {
        Self::default_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{Breed, SubjectSize};
    use crate::error::{Error, WireError};
    use crate::types::ActivityProfile;

    fn session() -> MonitoringSession {
        MonitoringSession::new(SessionConfig {
            seed: Some(42),
            ..SessionConfig::default()
        })
        .unwrap()
    }

    fn live(session: &mut MonitoringSession, t: u64, magnitude: f32) -> Option<Detection> {
        let payload = wire::encode_accel(&AccelVector::with_magnitude(0.0, 0.0, magnitude, magnitude));
        session.ingest_live_accel(t, &payload).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.temperature_mode(), TemperatureMode::Auto);
        assert_eq!(s.ppg_mode(), PpgMode::Auto);
        assert_eq!(s.accel_mode(), AccelMode::Auto);
        assert_eq!(s.activity_state(), ActivityState::Rest);
        assert_eq!(s.temperature(), None);
        assert_eq!(s.heart_rate_bpm(), None);
        assert_eq!(s.ppg_quality(), SignalQuality::NoSignal);
        assert_eq!(s.range_labels().hr_rest, "60 - 100 BPM");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SessionConfig::default();
        config.accel.window_len = 0;
        assert!(MonitoringSession::new(config).is_err());
    }

    #[test]
    fn test_ppg_tick_fills_trace() {
        let mut s = session();
        for i in 0..150u64 {
            assert!(s.tick_ppg(i * 50).is_some());
        }
        assert_eq!(s.ppg_series().len(), 100);
        assert_eq!(s.heart_rate_bpm(), Some(75.0));
        assert_eq!(s.heart_rate_status(), Some(HealthStatus::Normal));
        assert_eq!(s.ppg_quality(), SignalQuality::Good);
    }

    #[test]
    fn test_manual_ppg_freezes_waveform() {
        let mut s = session();
        for i in 0..10u64 {
            s.tick_ppg(i * 50);
        }
        let phase = s.ppg_synthesizer().phase();
        assert_eq!(s.set_ppg_mode(PpgMode::Tachycardia), Some(HealthStatus::Alert));
        assert_eq!(s.heart_rate_bpm(), Some(180.0));
        assert_eq!(s.tick_ppg(600), None);
        assert_eq!(s.ppg_synthesizer().phase(), phase);
        assert_eq!(s.ppg_series().len(), 10);

        assert_eq!(s.set_ppg_mode(PpgMode::Auto), None);
        assert_eq!(s.ppg_synthesizer().phase(), 0.0);
        assert_eq!(s.ppg_synthesizer().heart_rate_bpm(), 75.0);
        assert!(s.tick_ppg(650).is_some());
        assert_eq!(s.heart_rate_bpm(), Some(75.0));
    }

    #[test]
    fn test_temperature_tick_rate_limited() {
        let mut s = session();
        assert!(s.tick_temperature(0).is_some());
        assert!(s.tick_temperature(1000).is_none());
        assert!(s.tick_temperature(2000).is_some());
        let readout = s.temperature().unwrap();
        assert!((100.5..=103.5).contains(&readout.average_f));
        assert!(s.temperature_status().is_some());
    }

    #[test]
    fn test_manual_temperature_preset() {
        let mut s = session();
        let readout = s.set_temperature_mode(TemperatureMode::Fever).unwrap();
        assert_eq!(readout.average_f, 104.2);
        assert_eq!(s.temperature_status(), Some(HealthStatus::Alert));
        // The random walk is paused.
        assert!(s.tick_temperature(10_000).is_none());
        assert_eq!(s.temperature().map(|r| r.average_f), Some(104.2));

        s.set_temperature_mode(TemperatureMode::Auto);
        let readout = s.tick_temperature(12_000).unwrap();
        assert!((readout.average_f - 101.5).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn test_live_accel_drives_detector() {
        let mut s = session();
        live(&mut s, 0, 1.0);
        let detection = live(&mut s, 50, 1.3).unwrap();
        assert!(detection.transitioned);
        assert_eq!(s.activity_state(), ActivityState::Active);
        assert_eq!(s.movement_status(), MovementStatus::ActiveMovement);
        assert_eq!(s.accel_trace().len(), 2);
    }

    #[test]
    fn test_transition_reclassifies_last_values() {
        let mut s = session();
        s.set_ppg_mode(PpgMode::Elevated);
        assert_eq!(s.heart_rate_status(), Some(HealthStatus::Alert));
        live(&mut s, 0, 1.0);
        live(&mut s, 50, 1.3);
        assert_eq!(s.heart_rate_status(), Some(HealthStatus::Normal));
    }

    #[test]
    fn test_manual_accel_bypasses_detector() {
        let mut s = session();
        s.set_accel_mode(AccelMode::Running);
        assert_eq!(s.activity_state(), ActivityState::Rest);
        assert_eq!(s.movement_status(), MovementStatus::ActiveMovement);
        assert_eq!(s.accel_reading(), Some(ActivityProfile::Running.preset_reading()));
        assert_eq!(s.accel_trace().len(), 50);

        // Live payloads are ignored outside auto mode.
        let payload = wire::encode_accel(&AccelVector::new(0.0, 0.0, 1.0));
        assert!(s.ingest_live_accel(0, &payload).unwrap().is_none());
        assert_eq!(s.detector().statistics().0, 0);
    }

    #[test]
    fn test_truncated_payload_keeps_state() {
        let mut s = session();
        live(&mut s, 0, 1.0);
        let reading = s.accel_reading();
        let err = s.ingest_live_accel(50, &[0u8; 7]).unwrap_err();
        assert!(matches!(err, Error::Wire(WireError::Truncated { needed: 16, got: 7 })));
        assert_eq!(s.accel_reading(), reading);
    }

    #[test]
    fn test_calibration_update() {
        let mut s = session();
        let update = s.set_subject_calibration("husky", "large", "5").unwrap();
        assert_eq!(update.labels.temp_rest, "100.7 - 102.2°F");
        assert_eq!(s.calibration().breed, Breed::Husky);

        let err = s.set_subject_calibration("husky", "tiny", "5").unwrap_err();
        assert_eq!(err.field(), "size");
        // Rejected input leaves the previous calibration in place.
        assert_eq!(s.calibration().size, SubjectSize::Large);
        assert_eq!(s.calibration().breed, Breed::Husky);
    }

    #[test]
    fn test_calibration_reclassifies() {
        let mut s = session();
        s.set_ppg_mode(PpgMode::Resting);
        assert_eq!(s.heart_rate_status(), Some(HealthStatus::Normal));
        s.apply_calibration(SubjectCalibration::new(Breed::Beagle, SubjectSize::Small, 4));
        // 75 BPM is more than 10 below the 90 - 140 band of a small dog.
        assert_eq!(s.heart_rate_status(), Some(HealthStatus::Alert));
    }

    #[test]
    fn test_force_state_and_controls() {
        let mut s = session();
        s.select_ppg_control("elevated").unwrap();
        s.force_activity_state(ActivityState::Active);
        assert_eq!(s.heart_rate_status(), Some(HealthStatus::Normal));
        assert_eq!(
            s.select_accel_control("sprinting").unwrap_err().field(),
            "mode"
        );
        assert!(s.select_temperature_control("normal").unwrap().is_some());
    }

    #[test]
    fn test_rejected_samples_counted() {
        let mut s = session();
        assert!(s.ingest(Sample::ppg(0, f64::NAN, SampleSource::Synthetic)).is_err());
        assert!(s
            .ingest(Sample::accel(0, AccelVector::new(0.0, 0.0, 1.0), SampleSource::Synthetic))
            .is_err());
        assert_eq!(s.ingest_statistics(), (0, 2));
    }
}
