//! pose_confetti: interactive entry point.

use pose_confetti::{run, run_headless, AppConfig};
use hand_gesture::Side;
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Pose Confetti — raise a hand, stop, celebrate         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let flag = |f: &str| args.iter().any(|a| a == f);

    let mut cfg = if flag("--quick") || flag("--headless") {
        println!("  Quick-start: default thresholds, 3 bursts of 100 per hand\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };
    cfg.demo |= flag("--demo");

    if flag("--headless") {
        match run_headless(&cfg, 10.0) {
            Ok(report) => {
                println!();
                println!("  {} ticks, {} bursts, at most {} in flight", report.ticks, report.events.len(), report.max_active);
                for (t, side) in &report.events {
                    println!("    {:>6.2}s  {}", t, side.name());
                }
                println!();
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("  Mode: {}", if cfg.demo { "scripted demo" } else { "mouse simulation" });
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let mut cfg = AppConfig::default();

    println!("  Gesture thresholds:");
    cfg.tracker.vel_threshold = read_line("    Upward speed, shoulder widths/s (default 3.0): ")
        .trim().parse().unwrap_or(3.0_f32).max(0.1);
    cfg.tracker.up_duration = read_line("    Seconds moving up before a stop counts (default 0.1): ")
        .trim().parse().unwrap_or(0.1_f32).max(0.0);
    cfg.tracker.stopped_duration = read_line("    Seconds before re-arming (default 0.5): ")
        .trim().parse().unwrap_or(0.5_f32).max(0.0);

    println!("  Confetti:");
    let particles: usize = read_line("    Particles per burst (default 100): ")
        .trim().parse().unwrap_or(100);
    let bursts: usize = read_line("    Concurrent bursts per hand (default 3): ")
        .trim().parse().unwrap_or(3);
    let lifetime: f32 = read_line("    Visible lifetime, seconds (default 3.0): ")
        .trim().parse().unwrap_or(3.0);
    let gravity: f32 = read_line("    Gravity (default 400): ")
        .trim().parse().unwrap_or(400.0);
    cfg.confetti = cfg.confetti
        .particles_per_burst(particles.min(5000))
        .max_concurrent_bursts(bursts.min(32))
        .max_visible_lifetime(lifetime)
        .gravity(gravity);

    let latency_ms: u64 = read_line("  Simulated inference latency, ms (default 30): ")
        .trim().parse().unwrap_or(30);
    cfg.latency = Duration::from_millis(latency_ms.min(1000));

    if read_line("  Play the scripted demo instead of the mouse? [y/N]: ")
        .trim().eq_ignore_ascii_case("y")
    {
        cfg.demo = true;
        cfg.demo_side = match read_line("    Hand [l/r] (default l): ").trim() {
            "r" | "R" => Side::Right,
            _         => Side::Left,
        };
    }
    cfg
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
