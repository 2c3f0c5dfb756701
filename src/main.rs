//! Vest Vitals
//!
//! Runs a monitoring session against a simulated vest: the temperature and
//! PPG clocks tick in-process and, with the accelerometer in auto mode, a
//! fake vest sends encoded accelerometer notifications that move from rest
//! to walking to running.
//!
//! ```bash
//! vest-vitals --seconds 30 --breed husky --size large --age 5
//! vest-vitals --config session.json --ppg-mode tachycardia --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use vest_vitals::accel::profile_sample;
use vest_vitals::wire::encode_accel;
use vest_vitals::{ActivityProfile, MonitoringSession, SessionConfig};

/// Interval between simulated vest notifications (ms).
const LIVE_ACCEL_INTERVAL_MS: u64 = 100;

/// Longest simulated session the binary accepts.
const MAX_SESSION_SECONDS: u64 = 86_400;

/// Command-line arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(
    name = "vest-vitals",
    version,
    about = "Canine vital-signs vest monitoring session",
    long_about = None
)]
struct Args {
    /// Path to a JSON session configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulated session length in seconds (at most one day).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=MAX_SESSION_SECONDS))]
    seconds: u64,

    /// Breed key (labrador, german_shepherd, husky, ...).
    #[arg(long)]
    breed: Option<String>,

    /// Size key (small, medium, large, giant).
    #[arg(long)]
    size: Option<String>,

    /// Age in whole years.
    #[arg(long)]
    age: Option<String>,

    /// Temperature control (auto, normal, elevated, fever).
    #[arg(long)]
    temp_mode: Option<String>,

    /// PPG control (auto, resting, elevated, tachycardia).
    #[arg(long)]
    ppg_mode: Option<String>,

    /// Accelerometer control (auto, rest, walking, running).
    #[arg(long)]
    accel_mode: Option<String>,

    /// Disable automatic Rest/Active switching.
    #[arg(long, default_value_t = false)]
    manual_activity: bool,

    /// Seed for all simulated noise (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final display frame as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .init();

    info!("Vest Vitals v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match args.config.as_deref() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            match SessionConfig::from_json(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    error!("Failed to load configuration: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut session = match MonitoringSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if args.breed.is_some() || args.size.is_some() || args.age.is_some() {
        let current = *session.calibration();
        let breed = args.breed.clone().unwrap_or_else(|| current.breed.to_string());
        let size = args.size.clone().unwrap_or_else(|| current.size.to_string());
        let age = args.age.clone().unwrap_or_else(|| current.age_years.to_string());
        if let Err(e) = session.set_subject_calibration(&breed, &size, &age) {
            error!(field = e.field(), "Invalid subject: {e}");
            std::process::exit(1);
        }
    }

    if let Err(e) = apply_controls(&mut session, &args) {
        error!("{e}");
        std::process::exit(1);
    }
    session.set_auto_detection(!args.manual_activity);

    run(&mut session, args.seconds.saturating_mul(1000), args.seed);

    let frame = session.frame();
    if args.json {
        match frame.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize frame: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Activity      : {}", frame.activity.label);
    if let Some(readout) = frame.temperature.readout {
        println!(
            "Temperature   : {:.1}°F (probes {:.1} / {:.1}, Δ {:.1}) {}",
            readout.average_f,
            readout.probe_a_f,
            readout.probe_b_f,
            readout.delta_f,
            frame.temperature.status.map(|s| s.label()).unwrap_or("--"),
        );
    }
    if let Some(bpm) = frame.ppg.heart_rate_bpm {
        println!(
            "Heart rate    : {:.0} BPM {} (quality {})",
            bpm,
            frame.ppg.status.map(|s| s.label()).unwrap_or("--"),
            frame.ppg.quality.label(),
        );
    }
    println!("Movement      : {}", frame.accel.movement_label);
    println!(
        "Ranges (rest) : {} / {}",
        frame.range_labels.temp_rest, frame.range_labels.hr_rest
    );
    println!(
        "Ranges (act.) : {} / {}",
        frame.range_labels.temp_active, frame.range_labels.hr_active
    );
}

fn apply_controls(
    session: &mut MonitoringSession,
    args: &Args,
) -> Result<(), vest_vitals::ConfigurationError> {
    if let Some(control) = args.temp_mode.as_deref() {
        session.select_temperature_control(control)?;
    }
    if let Some(control) = args.ppg_mode.as_deref() {
        session.select_ppg_control(control)?;
    }
    if let Some(control) = args.accel_mode.as_deref() {
        session.select_accel_control(control)?;
    }
    Ok(())
}

/// Drive the session clocks and the simulated vest for `duration_ms`.
fn run(session: &mut MonitoringSession, duration_ms: u64, seed: Option<u64>) {
    let tick_ms = session.config().ppg.tick_ms;
    let temp_tick_ms = session.config().temperature.tick_ms;
    let window_len = session.config().accel.window_len;

    let mut vest_rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    let mut t = 0;
    let mut next_temperature_ms = 0;
    let mut next_accel_ms = 0;
    let mut sample_index = 0;
    while t <= duration_ms {
        session.tick_ppg(t);
        if t >= next_temperature_ms {
            session.tick_temperature(t);
            next_temperature_ms += temp_tick_ms;
        }

        if session.accel_mode().is_auto() && t >= next_accel_ms {
            let profile = vest_profile(t, duration_ms);
            let reading = profile_sample(profile, sample_index % window_len, window_len, &mut vest_rng);
            sample_index += 1;
            if let Err(e) = session.ingest_live_accel(t, &encode_accel(&reading)) {
                error!("Live accelerometer sample dropped: {e}");
            }
            next_accel_ms += LIVE_ACCEL_INTERVAL_MS;
        }

        t += tick_ms;
    }

    let (accepted, rejected) = session.ingest_statistics();
    info!(accepted, rejected, "Session finished");
}

/// Motion the simulated vest goes through: rest, then walking, then running.
fn vest_profile(t: u64, duration_ms: u64) -> ActivityProfile {
    let third = (duration_ms / 3).max(1);
    match t / third {
        0 => ActivityProfile::Rest,
        1 => ActivityProfile::Walking,
        _ => ActivityProfile::Running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_is_bounded() {
        let args = Args::try_parse_from(["vest-vitals", "--seconds", "86400"]).unwrap();
        assert_eq!(args.seconds, MAX_SESSION_SECONDS);

        assert!(Args::try_parse_from(["vest-vitals", "--seconds", "86401"]).is_err());
        assert!(Args::try_parse_from(["vest-vitals", "--seconds", "0"]).is_err());
        assert!(Args::try_parse_from(["vest-vitals", "--seconds", "18446744073709551615"]).is_err());
    }

    #[test]
    fn test_vest_profile_thirds() {
        assert_eq!(vest_profile(0, 9_000), ActivityProfile::Rest);
        assert_eq!(vest_profile(3_000, 9_000), ActivityProfile::Walking);
        assert_eq!(vest_profile(9_000, 9_000), ActivityProfile::Running);
    }
}
