//! Interactive lab for the hand gesture state machine.
//! Plays canned or custom left-hand motions through a tracker and prints a
//! per-tick trace.

use hand_gesture::{
    HandTracker, ImageToPlane, Keypoint, ManualClock, Pose, Side, TrackerConfig,
    LEFT_HAND_KPTS, LEFT_SHOULDER, RIGHT_HAND_KPTS, RIGHT_SHOULDER,
};
use std::io::{self, Write};

const IMG_W: f32 = 640.0;
const IMG_H: f32 = 480.0;
const REST_Y: f32 = 360.0;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Hand Gesture State Machine Lab            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    loop {
        print_menu();
        let choice = read_line("Select a scenario (1–4, or q to quit): ");

        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let script = match choice.trim() {
            "1" => Script { fps: 30.0, rest: 10, up_frames: 6, px_per_frame: 20.0, vanish_at: None },
            "2" => Script { fps: 30.0, rest: 10, up_frames: 2, px_per_frame: 20.0, vanish_at: None },
            "3" => Script { fps: 30.0, rest: 10, up_frames: 6, px_per_frame: 20.0, vanish_at: Some(14) },
            "4" => custom_script(),
            _   => { println!("  ⚠  Please enter 1–4 or q.\n"); continue; }
        };

        run_script(&script);
        println!();
    }
}

fn print_menu() {
    println!("  ┌─ Scenarios ──────────────────────────────────────┐");
    println!("  │  1. Quick raise then stop      (fires confetti)  │");
    println!("  │  2. Brief flick                (cancelled)       │");
    println!("  │  3. Body leaves frame mid-raise                  │");
    println!("  │  4. Custom motion                                │");
    println!("  └──────────────────────────────────────────────────┘");
}

struct Script {
    fps:          f64,
    rest:         usize,
    up_frames:    usize,
    px_per_frame: f32,
    /// Tick index at which the detector loses the body.
    vanish_at:    Option<usize>,
}

fn custom_script() -> Script {
    let fps: f64 = read_line("  Frames per second (default 30): ")
        .trim().parse().unwrap_or(30.0);
    let up_frames: usize = read_line("  Upward frames (default 6): ")
        .trim().parse().unwrap_or(6);
    let px_per_frame: f32 = read_line("  Pixels per upward frame (default 20): ")
        .trim().parse().unwrap_or(20.0);
    Script {
        fps: fps.clamp(1.0, 240.0),
        rest: 10,
        up_frames: up_frames.min(200),
        px_per_frame,
        vanish_at: None,
    }
}

fn run_script(script: &Script) {
    let mut tracker = HandTracker::new(
        ImageToPlane::new(IMG_W, IMG_H),
        TrackerConfig::default(),
    );
    let mut clock = ManualClock::new();
    let dt = 1.0 / script.fps;
    let total = script.rest + script.up_frames + 25;

    println!();
    println!("  tick     t(s)   hand_y   state     dur(s)   norm_vy   event");
    println!("  ────  ───────  ───────  ────────  ───────  ────────  ───────");

    let mut y = REST_Y;
    for tick in 0..total {
        let rising = tick >= script.rest && tick < script.rest + script.up_frames;
        if rising {
            y = (y - script.px_per_frame).max(0.0);
        }
        let pose = figure(y);
        let visible = script.vanish_at.map_or(true, |v| tick < v);

        clock.advance(dt);
        let events = tracker.update(visible.then_some(&pose), &clock);
        let hand = tracker.hand(Side::Left);

        println!(
            "  {:>4}  {:>7.3}  {:>7.1}  {:<8}  {:>7.3}  {:>8.2}  {}",
            tick,
            tick as f64 * dt,
            hand.position().y,
            hand.state().name(),
            hand.duration_in_state(),
            hand.normalized_velocity().y,
            if events.fired(Side::Left) { "CONFETTI" } else { "" },
        );
    }
}

/// Standing figure with shoulders 100 px apart; only the left hand moves.
fn figure(left_hand_y: f32) -> Pose {
    let mut pose = Pose::filled(Keypoint::new(320.0, 300.0, 0.9))
        .with(LEFT_SHOULDER,  Keypoint::new(270.0, 200.0, 0.9))
        .with(RIGHT_SHOULDER, Keypoint::new(370.0, 200.0, 0.9));
    for &i in &LEFT_HAND_KPTS {
        pose = pose.with(i, Keypoint::new(240.0, left_hand_y, 0.9));
    }
    for &i in &RIGHT_HAND_KPTS {
        pose = pose.with(i, Keypoint::new(400.0, REST_Y, 0.9));
    }
    pose
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
