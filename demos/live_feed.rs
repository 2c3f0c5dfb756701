/// Live feed example: encode vest notifications and watch the activity state
use rand::rngs::StdRng;
use rand::SeedableRng;

use vest_vitals::accel::profile_sample;
use vest_vitals::wire::{encode_accel, ACCEL_CHARACTERISTIC_UUID, VEST_SERVICE_UUID};
use vest_vitals::{ActivityProfile, MonitoringSession};

fn main() {
    println!("=== Vest Vitals: Live Feed Example ===\n");
    println!("Service        : {VEST_SERVICE_UUID}");
    println!("Accelerometer  : {ACCEL_CHARACTERISTIC_UUID}\n");

    let mut session = MonitoringSession::default_session();
    let mut vest = StdRng::seed_from_u64(42);

    let bouts = [
        (ActivityProfile::Rest, 30),
        (ActivityProfile::Running, 30),
        (ActivityProfile::Walking, 30),
        (ActivityProfile::Rest, 30),
    ];

    let mut t = 0u64;
    for (profile, count) in bouts {
        println!("--- Vest reports {:?} ---", profile);
        for i in 0..count {
            let reading = profile_sample(profile, i % 50, 50, &mut vest);
            let payload = encode_accel(&reading);

            match session.ingest_live_accel(t, &payload) {
                Ok(Some(detection)) if detection.transitioned => println!(
                    "[{:>5}ms] -> {} (avg movement {:.3}g, threshold {:.3}g)",
                    t,
                    detection.state.label(),
                    detection.avg_movement,
                    detection.threshold
                ),
                Ok(_) => {}
                Err(e) => eprintln!("[{:>5}ms] dropped: {e}", t),
            }
            t += 100;
        }
        println!(
            "  {} / {}\n",
            session.activity_state().label(),
            session.movement_status().label()
        );
    }

    // A truncated notification is reported and ignored.
    if let Err(e) = session.ingest_live_accel(t, &[0x00, 0x01, 0x02]) {
        println!("Truncated payload: {e}");
    }

    let (accepted, rejected) = session.ingest_statistics();
    println!("\nAccepted {accepted}, rejected {rejected}");
}
