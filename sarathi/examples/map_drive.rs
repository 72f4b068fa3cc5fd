//! Headless map-drive run.
//!
//! Drives the vehicle across randomly generated terrain and prints the
//! reliability counters at the end.
//!
//! Usage:
//!   cargo run --example map_drive -- --seconds 120
//!   cargo run --example map_drive -- --config configs/sarathi.yaml --svg output/map_drive.svg
//!   RUST_LOG=info cargo run --example map_drive -- --linear --reverse

use clap::Parser;
use std::path::PathBuf;

use sarathi::annotation::{AnnotationRecorder, NullSink, SvgSnapshot};
use sarathi::config::SarathiConfig;
use sarathi::sim::MapDriveScenario;

/// Map-drive simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults to configs/sarathi.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 60.0)]
    seconds: f32,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Straight-line prediction instead of curved
    #[arg(long)]
    linear: bool,

    /// Drive the route backwards
    #[arg(long)]
    reverse: bool,

    /// Drive freely instead of following the route
    #[arg(long)]
    free: bool,

    /// Write an SVG snapshot of the final tick
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => SarathiConfig::load(path),
        None => SarathiConfig::load_default(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}, using defaults", e);
            SarathiConfig::default()
        }
    };
    if let Some(seed) = args.seed {
        config.scenario.seed = seed;
    }
    if args.linear {
        config.navigator.curved_steering = false;
        config.navigator.incremental_steering = false;
    }
    if args.reverse {
        config.navigator.path_follow_direction = -config.navigator.path_follow_direction;
    }
    if args.free {
        config.scenario.follow_route = false;
    }

    let mut scenario = match MapDriveScenario::new(&config) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Cannot build scenario: {}", e);
            std::process::exit(1);
        }
    };

    let ticks = (args.seconds / scenario.time_step()).max(0.0) as usize;
    println!(
        "Driving {:.0}s ({} ticks), seed {}, {} steering",
        args.seconds,
        ticks,
        config.scenario.seed,
        if config.navigator.curved_steering { "curved" } else { "linear" }
    );

    let mut recorder = AnnotationRecorder::new();
    for tick in 0..ticks {
        // Only the last tick is drawn
        if args.svg.is_some() && tick + 1 == ticks {
            scenario.tick(&mut recorder);
        } else {
            scenario.tick(&mut NullSink);
        }
    }

    let t = scenario.telemetry();
    println!("\n=== Telemetry ===");
    println!("Distance: {:.1}m in {:.1}s", t.total_distance(), t.total_time());
    println!("Average speed: {:.2}m/s", t.average_speed());
    println!("Laps: {} started, {} finished", t.laps_started(), t.laps_finished());
    match t.mean_time_between_collisions() {
        Some(mean) => println!("Collisions: {} (mean {:.1}s apart)", t.collision_count(), mean),
        None => println!("Collisions: 0"),
    }
    println!(
        "Stuck: {} (cycles {}, off path {})",
        t.stuck_count(),
        t.stuck_cycle_count(),
        t.stuck_off_path_count()
    );
    if t.path_follow_time() > 0.0 {
        println!(
            "Off path: {:.1}% of {:.1}s",
            100.0 * t.path_follow_off_time() / t.path_follow_time(),
            t.path_follow_time()
        );
    }
    println!("Hints: {} given, {} taken", t.hints_given(), t.hints_taken());

    if let Some(path) = args.svg {
        let body = scenario.navigator().body_corners();
        match SvgSnapshot::default().save(
            &path,
            scenario.grid(),
            scenario.route(),
            Some(body),
            recorder.annotations(),
        ) {
            Ok(()) => println!("\nSaved: {}", path.display()),
            Err(e) => eprintln!("\nFailed to save snapshot: {}", e),
        }
    }
}
