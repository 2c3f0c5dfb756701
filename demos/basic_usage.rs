/// Basic usage example: calibrate a subject, run the clocks, press buttons
use vest_vitals::{MonitoringSession, PpgMode, SessionConfig, TemperatureMode};

fn main() {
    println!("=== Vest Vitals: Basic Example ===\n");

    let config = SessionConfig {
        seed: Some(7),
        ..SessionConfig::default()
    };
    let mut session = match MonitoringSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return;
        }
    };

    // Calibrate for a five-year-old husky.
    match session.set_subject_calibration("husky", "large", "5") {
        Ok(update) => {
            println!("Resting temperature : {}", update.labels.temp_rest);
            println!("Active temperature  : {}", update.labels.temp_active);
            println!("Resting heart rate  : {}", update.labels.hr_rest);
            println!("Active heart rate   : {}\n", update.labels.hr_active);
        }
        Err(e) => {
            eprintln!("Rejected calibration ({}): {e}", e.field());
            return;
        }
    }

    // Ten seconds of auto mode: PPG at 20Hz, temperature at 1Hz.
    for i in 0..200u64 {
        let t = i * 50;
        session.tick_ppg(t);
        if t % 1000 == 0 {
            if let Some(readout) = session.tick_temperature(t) {
                println!(
                    "[{:>5}ms] {:.1}°F (Δ {:.1}) {}",
                    t,
                    readout.average_f,
                    readout.delta_f,
                    session.temperature_status().map(|s| s.label()).unwrap_or("--"),
                );
            }
        }
    }

    println!(
        "\nHeart rate: {:.0} BPM over {} plotted samples",
        session.heart_rate_bpm().unwrap_or(0.0),
        session.ppg_series().len()
    );

    // Demo buttons.
    println!("\n--- Manual presets ---");
    for mode in [TemperatureMode::Elevated, TemperatureMode::Fever] {
        session.set_temperature_mode(mode);
        println!(
            "{:<20} -> {}",
            mode.indicator(),
            session.temperature_status().map(|s| s.label()).unwrap_or("--")
        );
    }
    for mode in [PpgMode::Resting, PpgMode::Tachycardia] {
        let status = session.set_ppg_mode(mode);
        println!(
            "{:<20} -> {}",
            mode.indicator(),
            status.map(|s| s.label()).unwrap_or("--")
        );
    }

    match session.frame().to_json() {
        Ok(json) => println!("\nFrame: {} bytes of JSON", json.len()),
        Err(e) => eprintln!("Failed to serialize frame: {e}"),
    }
}
