//! Top-level application state and frame loop.
//!
//! `AppState` owns the `HandTracker` and the `ConfettiSimulator` and steps
//! them once per frame.  [`run`] drives it from a window and a pose worker;
//! [`run_headless`] drives it from a script and a manual clock.

use std::sync::mpsc;
use std::time::Duration;

use confetti_burst::{ConfettiConfig, ConfettiSimulator};
use hand_gesture::{
    Clock, FrameClock, HandEvents, HandTracker, ImageToPlane, ManualClock, Pose, Side,
    TrackerConfig,
};
use tracing::info;

use crate::error::AppError;
use crate::source::{raise_hand_script, InferenceWorker, ScriptedPoseSource, SimInput, SimPoseSource};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub tracker:      TrackerConfig,
    pub confetti:     ConfettiConfig,
    /// Size of the images the pose source reports keypoints in.
    pub image_width:  f32,
    pub image_height: f32,
    /// Simulated inference time per pose.
    pub latency:      Duration,
    /// Keypoint jitter of the simulated figure, image pixels.
    pub noise_px:     f32,
    /// Replay the scripted gesture instead of following the mouse.
    pub demo:         bool,
    /// Hand raised by the scripted gesture.
    pub demo_side:    Side,
    /// Frame rate the scripted gesture is sampled at.
    pub demo_fps:     f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tracker:      TrackerConfig::default(),
            confetti:     ConfettiConfig::default(),
            image_width:  640.0,
            image_height: 480.0,
            latency:      Duration::from_millis(30),
            noise_px:     0.5,
            demo:         false,
            demo_side:    Side::Left,
            demo_fps:     30.0,
        }
    }
}

impl AppConfig {
    pub fn transform(&self) -> ImageToPlane {
        ImageToPlane::new(self.image_width, self.image_height)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    tracker:      HandTracker<ImageToPlane>,
    confetti:     ConfettiSimulator,
    last_pose:    Option<Pose>,
    bursts_fired: usize,
    last_event:   Option<(Side, f64)>,

    // ── status message ────────────────────────────────────────────────────
    pub status:   String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        AppState {
            tracker:      HandTracker::new(cfg.transform(), cfg.tracker),
            confetti:     ConfettiSimulator::new(cfg.confetti),
            last_pose:    None,
            bursts_fired: 0,
            last_event:   None,
            status:       "Ready - raise a hand quickly and stop".to_string(),
        }
    }

    /// One frame: gesture recognition first, then the particle update.
    pub fn step<C: Clock + ?Sized>(&mut self, pose: Option<Pose>, clock: &C) -> HandEvents {
        let events = self.tracker.update(pose.as_ref(), clock);
        self.confetti.update(&events, &self.tracker, clock);

        for side in Side::BOTH {
            if events.fired(side) {
                self.bursts_fired += 1;
                self.last_event = Some((side, clock.elapsed()));
            }
        }
        self.last_pose = pose;
        self.status = self.status_line();
        events
    }

    fn status_line(&self) -> String {
        let last = match self.last_event {
            Some((side, t)) => format!("{} at {:.1}s", side.name(), t),
            None            => "none".to_string(),
        };
        format!(
            "L: {}  R: {}  last burst: {}  fired: {}  in flight: {}",
            self.tracker.left().state().name(),
            self.tracker.right().state().name(),
            last,
            self.bursts_fired,
            self.confetti.active_bursts(),
        )
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn tracker(&self)      -> &HandTracker<ImageToPlane> { &self.tracker }
    pub fn confetti(&self)     -> &ConfettiSimulator         { &self.confetti }
    pub fn last_pose(&self)    -> Option<&Pose>              { self.last_pose.as_ref() }
    pub fn bursts_fired(&self) -> usize                      { self.bursts_fired }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the windowed frame loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer, spawns the pose worker (mouse-driven figure by
/// default, the scripted gesture with `cfg.demo`) and runs one
/// request → wait → step → render cycle per frame until the window closes.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Sim input channel ─────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    let mut worker = if cfg.demo {
        let script = raise_hand_script(cfg.demo_side, cfg.demo_fps);
        InferenceWorker::spawn(ScriptedPoseSource::new(script).latency(cfg.latency))
    } else {
        InferenceWorker::spawn(SimPoseSource::new(sim_rx).latency(cfg.latency).noise(cfg.noise_px))
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx, cfg.transform())?;

    let mut app = AppState::new(&cfg);
    let mut clock = FrameClock::new();
    info!(demo = cfg.demo, "frame loop started");

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → SimInput
        if !vis.poll_input() {
            break;
        }

        // 2. One pose per frame; blocks for the source's latency
        worker.request()?;
        let pose = worker.wait()?;

        // 3. Tracker then simulator
        clock.tick();
        app.step(pose, &clock);

        // 4. Render
        vis.render(&app, clock.elapsed());
    }

    info!(fired = app.bursts_fired(), "frame loop finished");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// run_headless(): scripted demo without a window
// ════════════════════════════════════════════════════════════════════════════

/// Summary of a headless run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessReport {
    pub ticks:      usize,
    /// `(elapsed seconds, side)` of every fired gesture.
    pub events:     Vec<(f64, Side)>,
    pub max_active: usize,
}

/// Play the scripted gesture for `seconds` of simulated time at
/// `cfg.demo_fps`, through the inference worker and a [`ManualClock`].
pub fn run_headless(cfg: &AppConfig, seconds: f64) -> Result<HeadlessReport, AppError> {
    let script = raise_hand_script(cfg.demo_side, cfg.demo_fps);
    let mut worker = InferenceWorker::spawn(ScriptedPoseSource::new(script));
    let mut app = AppState::new(cfg);
    let mut clock = ManualClock::new();
    let dt = 1.0 / cfg.demo_fps.clamp(1.0, 240.0) as f64;

    let mut report = HeadlessReport::default();
    while clock.elapsed() + dt <= seconds + 1e-9 {
        let pose = worker.estimate()?;
        clock.advance(dt);
        let events = app.step(pose, &clock);

        for side in Side::BOTH {
            if events.fired(side) {
                info!(side = side.name(), t = clock.elapsed(), "confetti");
                report.events.push((clock.elapsed(), side));
            }
        }
        report.ticks += 1;
        report.max_active = report.max_active.max(app.confetti().active_bursts());
    }
    Ok(report)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{standing_figure, LEFT_REST, RIGHT_REST};
    use hand_gesture::{HandState, Vec2};

    fn make_app() -> AppState {
        let mut cfg = AppConfig::default();
        cfg.confetti = cfg.confetti.seed(11);
        AppState::new(&cfg)
    }

    fn run_frames(app: &mut AppState, clock: &mut ManualClock, frames: &[Option<Pose>]) -> usize {
        let mut fired = 0;
        for f in frames {
            clock.advance(1.0 / 30.0);
            fired += app.step(f.clone(), clock).fired(Side::Left) as usize;
        }
        fired
    }

    #[test]
    fn no_pose_keeps_hands_idle() {
        let mut app = make_app();
        let mut clock = ManualClock::new();
        run_frames(&mut app, &mut clock, &vec![None; 10]);
        assert_eq!(app.tracker().left().state(), HandState::NoPose);
        assert_eq!(app.confetti().active_bursts(), 0);
        assert!(app.last_pose().is_none());
    }

    #[test]
    fn raise_then_stop_launches_left_burst() {
        let mut app = make_app();
        let mut clock = ManualClock::new();
        let script = raise_hand_script(Side::Left, 30.0);
        let fired = run_frames(&mut app, &mut clock, &script[..40]);
        assert_eq!(fired, 1);
        assert_eq!(app.bursts_fired(), 1);
        assert_eq!(app.confetti().pool(Side::Left).visible_count(), 1);
        assert_eq!(app.confetti().pool(Side::Right).visible_count(), 0);
        assert!(app.status.contains("fired: 1"));
    }

    #[test]
    fn stationary_figure_never_fires() {
        let mut app = make_app();
        let mut clock = ManualClock::new();
        let still = vec![Some(standing_figure(LEFT_REST, RIGHT_REST)); 60];
        assert_eq!(run_frames(&mut app, &mut clock, &still), 0);
        assert_eq!(app.tracker().left().state(), HandState::Default);
    }

    #[test]
    fn slow_raise_never_fires() {
        let mut app = make_app();
        let mut clock = ManualClock::new();
        // 1 px per frame at 30 fps is 0.3 shoulder widths per second.
        let frames: Vec<_> = (0..60)
            .map(|i| Some(standing_figure(Vec2::new(LEFT_REST.x, LEFT_REST.y - i as f32), RIGHT_REST)))
            .collect();
        assert_eq!(run_frames(&mut app, &mut clock, &frames), 0);
    }

    #[test]
    fn headless_demo_fires_each_cycle() {
        let mut cfg = AppConfig::default();
        cfg.confetti = cfg.confetti.seed(3);
        // One script cycle is 1 + 0.2 + 1 + 0.5 = 2.7 s.
        let report = run_headless(&cfg, 5.4).unwrap();
        assert_eq!(report.ticks, 162);
        assert_eq!(report.events.len(), 2);
        assert!(report.events.iter().all(|&(_, side)| side == Side::Left));
        assert!(report.max_active >= 1);
    }

    #[test]
    fn headless_right_side() {
        let mut cfg = AppConfig::default();
        cfg.demo_side = Side::Right;
        let report = run_headless(&cfg, 2.7).unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].1, Side::Right);
    }
}
