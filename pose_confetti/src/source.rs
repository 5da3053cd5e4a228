//! Pose sources and the inference worker that polls them.
//!
//! The frame loop never calls a [`PoseSource`] directly.  Sources run on the
//! [`InferenceWorker`] thread, which answers exactly one pose per request, so
//! a slow source throttles the loop instead of piling up stale frames.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use hand_gesture::{
    Keypoint, Pose, Side, Vec2, LEFT_ELBOW, LEFT_HAND_KPTS, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST,
    NOSE, RIGHT_ELBOW, RIGHT_HAND_KPTS, RIGHT_HIP, RIGHT_SHOULDER, RIGHT_WRIST,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{AppError, SourceError};

// ════════════════════════════════════════════════════════════════════════════
// PoseSource trait: unified interface for sim and scripted input
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can estimate the body pose for the current frame.
///
/// `Ok(None)` means no body is in view.
pub trait PoseSource: Send + 'static {
    fn estimate(&mut self) -> Result<Option<Pose>, SourceError>;
}

// ════════════════════════════════════════════════════════════════════════════
// InferenceWorker: request/response thread around a source
// ════════════════════════════════════════════════════════════════════════════

type Estimate = Result<Option<Pose>, SourceError>;

/// Runs a [`PoseSource`] on its own thread with at most one request in
/// flight.
pub struct InferenceWorker {
    request_tx: Sender<()>,
    result_rx:  Receiver<Estimate>,
    in_flight:  bool,
}

impl InferenceWorker {
    /// Move `source` onto a fresh thread.  The thread exits when the worker
    /// is dropped.
    pub fn spawn<S: PoseSource>(mut source: S) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<()>();
        let (result_tx, result_rx) = mpsc::channel::<Estimate>();

        thread::spawn(move || {
            for () in request_rx {
                if result_tx.send(source.estimate()).is_err() {
                    return;
                }
            }
            debug!("inference worker shutting down");
        });

        InferenceWorker { request_tx, result_rx, in_flight: false }
    }

    pub fn in_flight(&self) -> bool { self.in_flight }

    /// Ask for the next pose.  A no-op while a request is already pending.
    pub fn request(&mut self) -> Result<(), AppError> {
        if self.in_flight {
            return Ok(());
        }
        self.request_tx.send(()).map_err(|_| AppError::WorkerDisconnected)?;
        self.in_flight = true;
        Ok(())
    }

    /// Block until the pending pose is ready, requesting one first if none
    /// is pending.  Source failures are logged and read as "no pose".
    pub fn wait(&mut self) -> Result<Option<Pose>, AppError> {
        self.request()?;
        let result = self.result_rx.recv().map_err(|_| AppError::WorkerDisconnected)?;
        self.in_flight = false;
        match result {
            Ok(pose) => Ok(pose),
            Err(e) => {
                warn!(error = %e, "pose source failed, treating frame as empty");
                Ok(None)
            }
        }
    }

    /// `request` then `wait`.
    pub fn estimate(&mut self) -> Result<Option<Pose>, AppError> {
        self.request()?;
        self.wait()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Standing figure
// ════════════════════════════════════════════════════════════════════════════

/// Hand rest positions of the synthetic figure, in image pixels.
pub const LEFT_REST:  Vec2 = Vec2 { x: 240.0, y: 360.0 };
pub const RIGHT_REST: Vec2 = Vec2 { x: 400.0, y: 360.0 };

const BODY_SCORE: f32 = 0.95;

/// A confident upright figure in a 640×480 image with shoulders 100 px
/// apart and the hands at the given image positions.  Face and leg
/// keypoints are present with zero confidence.
pub fn standing_figure(left_hand: Vec2, right_hand: Vec2) -> Pose {
    let kp = |p: Vec2| Keypoint::new(p.x, p.y, BODY_SCORE);
    let l_shoulder = Vec2::new(270.0, 200.0);
    let r_shoulder = Vec2::new(370.0, 200.0);
    let l_wrist = left_hand.add(&Vec2::new(0.0, 8.0));
    let r_wrist = right_hand.add(&Vec2::new(0.0, 8.0));

    let mut pose = Pose::filled(Keypoint::new(320.0, 300.0, 0.0))
        .with(NOSE,           kp(Vec2::new(320.0, 130.0)))
        .with(LEFT_SHOULDER,  kp(l_shoulder))
        .with(RIGHT_SHOULDER, kp(r_shoulder))
        .with(LEFT_ELBOW,     kp(l_shoulder.add(&l_wrist).scale(0.5)))
        .with(RIGHT_ELBOW,    kp(r_shoulder.add(&r_wrist).scale(0.5)))
        .with(LEFT_WRIST,     kp(l_wrist))
        .with(RIGHT_WRIST,    kp(r_wrist))
        .with(LEFT_HIP,       kp(Vec2::new(285.0, 330.0)))
        .with(RIGHT_HIP,      kp(Vec2::new(355.0, 330.0)));

    // Pinky, index and thumb spread around the hand centre.
    let spread = [Vec2::new(-4.0, 0.0), Vec2::new(4.0, 0.0), Vec2::ZERO];
    for (hand, kpts) in [(left_hand, LEFT_HAND_KPTS), (right_hand, RIGHT_HAND_KPTS)] {
        for (&i, off) in kpts.iter().zip(spread.iter()) {
            pose = pose.with(i, kp(hand.add(off)));
        }
    }
    pose
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource: mouse-driven figure (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position in image pixels, with the button states.
    Pointer { position: Vec2, left: bool, right: bool },
    /// Take the body out of view, or bring it back.
    ToggleBody,
}

/// Synthetic pose source driven by [`SimInput`] events from the window.
///
/// While a mouse button is held the matching hand follows the pointer;
/// on release it drops back to rest.
pub struct SimPoseSource {
    rx:           Receiver<SimInput>,
    left_hand:    Vec2,
    right_hand:   Vec2,
    body_visible: bool,
    latency:      Duration,
    noise_px:     f32,
    rng:          StdRng,
}

impl SimPoseSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimPoseSource {
            rx,
            left_hand:    LEFT_REST,
            right_hand:   RIGHT_REST,
            body_visible: true,
            latency:      Duration::ZERO,
            noise_px:     0.0,
            rng:          StdRng::from_entropy(),
        }
    }

    /// Simulated inference time per estimate.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Uniform keypoint jitter of ± `px` image pixels.
    pub fn noise(mut self, px: f32) -> Self {
        self.noise_px = px.max(0.0);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { position, left, right } => {
                self.left_hand  = if left  { position } else { LEFT_REST  };
                self.right_hand = if right { position } else { RIGHT_REST };
            }
            SimInput::ToggleBody => {
                self.body_visible = !self.body_visible;
                info!(visible = self.body_visible, "simulated body toggled");
            }
        }
    }

    fn jitter(&mut self, pose: Pose) -> Pose {
        if self.noise_px <= 0.0 {
            return pose;
        }
        let n = self.noise_px;
        let mut out = pose.clone();
        for (i, k) in pose.keypoints().iter().enumerate() {
            let dx = self.rng.gen_range(-n..n);
            let dy = self.rng.gen_range(-n..n);
            out = out.with(i, Keypoint::new(k.x + dx, k.y + dy, k.score));
        }
        out
    }
}

impl PoseSource for SimPoseSource {
    fn estimate(&mut self) -> Result<Option<Pose>, SourceError> {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.apply(input),
                // A closed window just freezes the figure.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        if !self.body_visible {
            return Ok(None);
        }
        let pose = standing_figure(self.left_hand, self.right_hand);
        Ok(Some(self.jitter(pose)))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedPoseSource: canned frames, looping
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed list of frames forever.
pub struct ScriptedPoseSource {
    frames:  Vec<Option<Pose>>,
    cursor:  usize,
    latency: Duration,
}

impl ScriptedPoseSource {
    pub fn new(frames: Vec<Option<Pose>>) -> Self {
        ScriptedPoseSource { frames, cursor: 0, latency: Duration::ZERO }
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self)      -> usize { self.frames.len() }
    pub fn is_empty(&self) -> bool  { self.frames.is_empty() }
}

impl PoseSource for ScriptedPoseSource {
    fn estimate(&mut self) -> Result<Option<Pose>, SourceError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        if self.frames.is_empty() {
            return Ok(None);
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(frame)
    }
}

/// Upward hand speed used by [`raise_hand_script`], image pixels per second.
const RAISE_SPEED: f32 = 600.0;

/// One cycle of the canonical gesture at `fps` frames per second:
/// rest for a second, raise one hand 120 px over 0.2 s, hold it still for a
/// second, then drop out of view for half a second.
pub fn raise_hand_script(side: Side, fps: f32) -> Vec<Option<Pose>> {
    let fps = fps.clamp(1.0, 240.0);
    let frames_for = |secs: f32| ((secs * fps).round() as usize).max(1);
    let rise_frames = frames_for(0.2).max(2);
    let step = RAISE_SPEED / fps;

    let figure = |raise: f32| match side {
        Side::Left  => standing_figure(Vec2::new(LEFT_REST.x, LEFT_REST.y - raise), RIGHT_REST),
        Side::Right => standing_figure(LEFT_REST, Vec2::new(RIGHT_REST.x, RIGHT_REST.y - raise)),
    };

    let mut frames = Vec::new();
    frames.extend((0..frames_for(1.0)).map(|_| Some(figure(0.0))));
    frames.extend((1..=rise_frames).map(|i| Some(figure(step * i as f32))));
    let top = step * rise_frames as f32;
    frames.extend((0..frames_for(1.0)).map(|_| Some(figure(top))));
    frames.extend((0..frames_for(0.5)).map(|_| None));
    frames
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
