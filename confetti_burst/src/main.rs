//! Interactive lab for confetti bursts.
//! Fires one burst from a chosen seed and prints how the cloud rises, falls
//! and fades.

use confetti_burst::{ConfettiConfig, ConfettiSimulator};
use hand_gesture::{Side, Vec2};
use std::io::{self, Write};

const FPS: f64 = 60.0;
const REPORT_EVERY: usize = 15;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                 Confetti Burst Lab                   ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Seed velocity y is clamped to [300, 1000] px/s on launch.");
    println!();

    loop {
        let choice = read_line("Fire a burst? (Enter to continue, q to quit): ");
        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let vx: f32 = read_line("  Seed velocity x (default 0): ")
            .trim().parse().unwrap_or(0.0);
        let vy: f32 = read_line("  Seed velocity y (default 600): ")
            .trim().parse().unwrap_or(600.0);
        let drag: f32 = read_line("  Drag coefficient (default 0.01): ")
            .trim().parse().unwrap_or(0.01);
        let side = match read_line("  Side [l/r] (default l): ").trim() {
            "r" | "R" => Side::Right,
            _         => Side::Left,
        };

        let cfg = ConfettiConfig::default().drag_coefficient(drag.max(0.0)).seed(42);
        run_burst(cfg, side, Vec2::new(vx, vy));
        println!();
    }
}

fn run_burst(cfg: ConfettiConfig, side: Side, seed_velocity: Vec2) {
    let mut sim = ConfettiSimulator::new(cfg);
    let Some(group) = sim.activate(side, Vec2::ZERO, seed_velocity, 0.0) else {
        println!("  ⚠  Pool full, burst dropped.");
        return;
    };

    println!();
    println!("  {} burst in group {}", side.name(), group);
    println!();
    println!("     t(s)   alpha  visible   centre_x   centre_y      min_y      max_y");
    println!("  ───────  ──────  ───────  ─────────  ─────────  ─────────  ─────────");

    let dt = 1.0 / FPS;
    let mut now = 0.0;
    let mut tick = 0;
    loop {
        tick += 1;
        now += dt;
        sim.tick(dt as f32, now);

        let pool = sim.pool(side);
        let Some(meta) = pool.group(group) else { break };
        if tick % REPORT_EVERY == 0 || !meta.visible {
            let (cx, cy, lo, hi) = spread(pool.arena().group_iter(group).map(|p| (p.position.x, p.position.y)));
            println!(
                "  {:>7.3}  {:>6.3}  {:<7}  {:>9.1}  {:>9.1}  {:>9.1}  {:>9.1}",
                now, meta.alpha, meta.visible, cx, cy, lo, hi,
            );
        }
        if !meta.visible {
            break;
        }
    }
}

/// Centroid plus vertical extent of a point cloud.
fn spread(points: impl Iterator<Item = (f32, f32)>) -> (f32, f32, f32, f32) {
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for (x, y) in points {
        sx += x;
        sy += y;
        n += 1;
        lo = lo.min(y);
        hi = hi.max(y);
    }
    if n == 0 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    (sx / n as f32, sy / n as f32, lo, hi)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
