//! Per-hand gesture state machine.
//!
//! [`HandTracking`] holds everything known about one hand; [`HandTracker`]
//! owns one per [`Side`] plus the coordinate transform, and feeds both from a
//! single pose each tick.

use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::pose::{Pose, Vec2, LEFT_HAND_KPTS, LEFT_SHOULDER, RIGHT_HAND_KPTS, RIGHT_SHOULDER};
use crate::transform::CoordTransform;

/// Weight of the previous smoothed velocity.
const SMOOTH_KEEP: f32 = 0.1;
/// Weight of the new normalized sample.
const SMOOTH_NEW:  f32 = 0.9;

// ════════════════════════════════════════════════════════════════════════════
// Side
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The three landmarks averaged into this hand's position.
    pub fn hand_keypoints(self) -> [usize; 3] {
        match self {
            Side::Left  => LEFT_HAND_KPTS,
            Side::Right => RIGHT_HAND_KPTS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Left  => "left",
            Side::Right => "right",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandState / HandEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandState {
    /// No usable observation of this hand.
    NoPose,
    /// Tracked, not moving up.
    Default,
    /// Moving up faster than the threshold.
    Up,
    /// Just stopped after a long enough upward motion.
    Stopped,
}

impl HandState {
    pub fn name(self) -> &'static str {
        match self {
            HandState::NoPose  => "NoPose",
            HandState::Default => "Default",
            HandState::Up      => "Up",
            HandState::Stopped => "Stopped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandEvent {
    #[default]
    None,
    /// Up→Stopped fired; the hand's stopped snapshot seeds a burst.
    Confetti,
}

/// Events produced by one tracker update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandEvents {
    pub left:  HandEvent,
    pub right: HandEvent,
}

impl HandEvents {
    pub fn get(&self, side: Side) -> HandEvent {
        match side {
            Side::Left  => self.left,
            Side::Right => self.right,
        }
    }

    fn set(&mut self, side: Side, event: HandEvent) {
        match side {
            Side::Left  => self.left  = event,
            Side::Right => self.right = event,
        }
    }

    pub fn fired(&self, side: Side) -> bool {
        self.get(side) == HandEvent::Confetti
    }

    pub fn any(&self) -> bool {
        self.fired(Side::Left) || self.fired(Side::Right)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TrackerConfig
// ════════════════════════════════════════════════════════════════════════════

/// Thresholds shared by both hands.  Fixed for the tracker's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Normalized upward velocity (shoulder widths per second) that counts as
    /// "moving up".
    pub vel_threshold:      f32,
    /// Seconds of continuous upward motion required before a stop fires.
    pub up_duration:        f32,
    /// Seconds spent in `Stopped` before reverting to `Default`.
    pub stopped_duration:   f32,
    /// Per-keypoint confidence floor.
    pub min_kpt_confidence: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            vel_threshold:      3.0,
            up_duration:        0.1,
            stopped_duration:   0.5,
            min_kpt_confidence: 0.4,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandTracking: one hand's state machine
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct HandTracking {
    side:                Side,
    state:               HandState,
    duration_in_state:   f32,
    position:            Vec2,
    velocity:            Vec2,
    normalized_velocity: Vec2,
    stopped_position:    Vec2,
    stopped_velocity:    Vec2,
    /// False until a sample arrives that the next one can be differenced
    /// against; cleared by `reset` and by the post-stop reset.
    has_sample:          bool,
}

impl HandTracking {
    pub fn new(side: Side) -> Self {
        HandTracking {
            side,
            state:               HandState::NoPose,
            duration_in_state:   0.0,
            position:            Vec2::ZERO,
            velocity:            Vec2::ZERO,
            normalized_velocity: Vec2::ZERO,
            stopped_position:    Vec2::ZERO,
            stopped_velocity:    Vec2::ZERO,
            has_sample:          false,
        }
    }

    /// Back to `NoPose` with every estimate zeroed.
    pub fn reset(&mut self) {
        if self.state != HandState::NoPose {
            debug!(side = self.side.name(), from = self.state.name(), "hand lost");
        }
        *self = HandTracking::new(self.side);
    }

    pub fn side(&self)                -> Side      { self.side }
    pub fn state(&self)               -> HandState { self.state }
    /// Seconds since entering the current state; counts in every state.
    pub fn duration_in_state(&self)   -> f32       { self.duration_in_state }
    pub fn position(&self)            -> Vec2      { self.position }
    pub fn velocity(&self)            -> Vec2      { self.velocity }
    pub fn normalized_velocity(&self) -> Vec2      { self.normalized_velocity }
    /// Position of the last upward sample before the stop that fired.
    pub fn stopped_position(&self)    -> Vec2      { self.stopped_position }
    /// Velocity of the last upward sample before the stop that fired.
    pub fn stopped_velocity(&self)    -> Vec2      { self.stopped_velocity }

    fn enter(&mut self, next: HandState) {
        debug!(
            side = self.side.name(),
            from = self.state.name(),
            to = next.name(),
            after = self.duration_in_state,
            "hand state transition"
        );
        self.state = next;
        self.duration_in_state = 0.0;
    }

    /// Feed one valid observation of the hand.
    ///
    /// `position` is already in plane coordinates; `shoulder_dist` is the
    /// scale reference for velocity normalization.
    pub fn observe(
        &mut self,
        position: Vec2,
        shoulder_dist: f32,
        dt: f32,
        cfg: &TrackerConfig,
    ) -> HandEvent {
        let prev_position = self.position;
        let prev_velocity = self.velocity;

        self.position = position;
        if !self.has_sample {
            // No previous sample to difference against.
            self.velocity = Vec2::ZERO;
            self.normalized_velocity = Vec2::ZERO;
            self.has_sample = true;
        } else if dt > 0.0 && dt.is_finite() && shoulder_dist > 0.0 && shoulder_dist.is_finite() {
            self.velocity = position.sub(&prev_position).scale(1.0 / dt);
            self.normalized_velocity = self
                .normalized_velocity
                .scale(SMOOTH_KEEP)
                .add(&self.velocity.scale(SMOOTH_NEW / shoulder_dist));
        } else {
            // Nothing to measure motion with: hold the state for this tick.
            trace!(side = self.side.name(), dt, shoulder_dist, "degenerate sample skipped");
            self.velocity = Vec2::ZERO;
            self.normalized_velocity = Vec2::ZERO;
            return HandEvent::None;
        }

        let moving_up = self.normalized_velocity.y > cfg.vel_threshold;
        let mut event = HandEvent::None;

        match self.state {
            HandState::NoPose => self.enter(HandState::Default),
            HandState::Default => {
                if moving_up {
                    self.enter(HandState::Up);
                } else {
                    self.duration_in_state += dt;
                }
            }
            HandState::Up => {
                if moving_up {
                    self.duration_in_state += dt;
                } else if self.duration_in_state > cfg.up_duration {
                    self.stopped_position = prev_position;
                    self.stopped_velocity = prev_velocity;
                    info!(
                        side = self.side.name(),
                        x = prev_position.x,
                        y = prev_position.y,
                        vy = prev_velocity.y,
                        "confetti gesture fired"
                    );
                    event = HandEvent::Confetti;
                    self.enter(HandState::Stopped);
                } else {
                    self.enter(HandState::Default);
                }
            }
            HandState::Stopped => {
                self.duration_in_state += dt;
                if self.duration_in_state > cfg.stopped_duration {
                    self.enter(HandState::Default);
                    self.position            = Vec2::ZERO;
                    self.velocity            = Vec2::ZERO;
                    self.normalized_velocity = Vec2::ZERO;
                    self.stopped_position    = Vec2::ZERO;
                    self.stopped_velocity    = Vec2::ZERO;
                    self.has_sample          = false;
                }
            }
        }
        event
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandTracker: both hands fed from one pose
// ════════════════════════════════════════════════════════════════════════════

/// Runs the left and right [`HandTracking`] machines off a shared pose.
#[derive(Debug, Clone)]
pub struct HandTracker<T> {
    transform: T,
    config:    TrackerConfig,
    left:      HandTracking,
    right:     HandTracking,
}

impl<T: CoordTransform> HandTracker<T> {
    pub fn new(transform: T, config: TrackerConfig) -> Self {
        HandTracker {
            transform,
            config,
            left:  HandTracking::new(Side::Left),
            right: HandTracking::new(Side::Right),
        }
    }

    pub fn config(&self)    -> &TrackerConfig { &self.config }
    pub fn transform(&self) -> &T             { &self.transform }
    pub fn left(&self)      -> &HandTracking  { &self.left }
    pub fn right(&self)     -> &HandTracking  { &self.right }

    pub fn hand(&self, side: Side) -> &HandTracking {
        match side {
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }

    fn hand_mut(&mut self, side: Side) -> &mut HandTracking {
        match side {
            Side::Left  => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Reset both hands to `NoPose`.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// Advance both hands by one tick.
    ///
    /// `pose` is `None` when the detector saw nobody (or inference failed);
    /// that, like unconfident shoulders, resets both hands and fires nothing.
    pub fn update<C: Clock + ?Sized>(&mut self, pose: Option<&Pose>, clock: &C) -> HandEvents {
        let mut events = HandEvents::default();
        let Some(pose) = pose else {
            self.reset();
            return events;
        };

        let min = self.config.min_kpt_confidence;
        let kps = pose.keypoints();
        let (ls, rs) = (&kps[LEFT_SHOULDER], &kps[RIGHT_SHOULDER]);
        if ls.score < min || rs.score < min {
            self.reset();
            return events;
        }
        let shoulder_dist = ls.position().distance(&rs.position());
        let dt = clock.delta() as f32;

        for side in Side::BOTH {
            let event = match hand_position(pose, side, &self.transform, min) {
                Some(position) => {
                    let cfg = self.config;
                    self.hand_mut(side).observe(position, shoulder_dist, dt, &cfg)
                }
                None => {
                    self.hand_mut(side).reset();
                    HandEvent::None
                }
            };
            events.set(side, event);
        }
        events
    }
}

/// Mean transformed position of the side's hand landmarks, or `None` if any
/// of them is below the confidence floor.
fn hand_position<T: CoordTransform>(
    pose: &Pose,
    side: Side,
    transform: &T,
    min_confidence: f32,
) -> Option<Vec2> {
    let indices = side.hand_keypoints();
    let mut sum = Vec2::ZERO;
    for &i in &indices {
        let kp = &pose.keypoints()[i];
        if kp.score < min_confidence {
            return None;
        }
        sum = sum.add(&transform.apply(kp.position()));
    }
    let n = indices.len() as f32;
    Some(Vec2::new(sum.x / n, sum.y / n))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::pose::Keypoint;
    use crate::transform::ImageToPlane;
    use proptest::prelude::*;

    const W: f32 = 640.0;
    const H: f32 = 480.0;
    const FPS30: f64 = 1.0 / 30.0;

    /// Shoulders 100 px apart at y = 200; hands hang at the given image y.
    fn body(left_y: f32, right_y: f32) -> Pose {
        let mut pose = Pose::filled(Keypoint::new(320.0, 300.0, 0.9))
            .with(LEFT_SHOULDER,  Keypoint::new(270.0, 200.0, 0.9))
            .with(RIGHT_SHOULDER, Keypoint::new(370.0, 200.0, 0.9));
        for &i in &LEFT_HAND_KPTS {
            pose = pose.with(i, Keypoint::new(240.0, left_y, 0.9));
        }
        for &i in &RIGHT_HAND_KPTS {
            pose = pose.with(i, Keypoint::new(400.0, right_y, 0.9));
        }
        pose
    }

    struct Rig {
        tracker: HandTracker<ImageToPlane>,
        clock:   ManualClock,
    }

    impl Rig {
        fn new() -> Self {
            Rig {
                tracker: HandTracker::new(ImageToPlane::new(W, H), TrackerConfig::default()),
                clock:   ManualClock::new(),
            }
        }

        fn step(&mut self, pose: Option<&Pose>, dt: f64) -> HandEvents {
            self.clock.advance(dt);
            self.tracker.update(pose, &self.clock)
        }

        fn left(&self) -> &HandTracking { self.tracker.left() }
    }

    #[test]
    fn starts_in_no_pose() {
        let rig = Rig::new();
        assert_eq!(rig.left().state(), HandState::NoPose);
        assert_eq!(rig.tracker.right().state(), HandState::NoPose);
    }

    #[test]
    fn first_observation_enters_default_with_zero_velocity() {
        let mut rig = Rig::new();
        let ev = rig.step(Some(&body(350.0, 350.0)), FPS30);
        assert!(!ev.any());
        assert_eq!(rig.left().state(), HandState::Default);
        assert_eq!(rig.left().velocity(), Vec2::ZERO);
        assert_eq!(rig.left().position(), Vec2::new(240.0 - 320.0, 240.0 - 350.0));
    }

    #[test]
    fn missing_pose_resets_both_hands() {
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), FPS30);
        let ev = rig.step(None, FPS30);
        assert!(!ev.any());
        assert_eq!(rig.left(), &HandTracking::new(Side::Left));
        assert_eq!(rig.tracker.right(), &HandTracking::new(Side::Right));
    }

    #[test]
    fn weak_shoulder_resets_mid_gesture() {
        let mut rig = Rig::new();
        let mut y = 350.0;
        rig.step(Some(&body(y, 350.0)), FPS30);
        for _ in 0..3 {
            y -= 20.0;
            rig.step(Some(&body(y, 350.0)), FPS30);
        }
        assert_eq!(rig.left().state(), HandState::Up);

        let weak = body(y, 350.0).with(LEFT_SHOULDER, Keypoint::new(270.0, 200.0, 0.1));
        let ev = rig.step(Some(&weak), FPS30);
        assert!(!ev.any());
        assert_eq!(rig.left().state(), HandState::NoPose);
        assert_eq!(rig.tracker.right().state(), HandState::NoPose);
    }

    #[test]
    fn weak_hand_resets_only_that_hand() {
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), FPS30);
        let pose = body(350.0, 350.0).with(RIGHT_HAND_KPTS[1], Keypoint::new(400.0, 350.0, 0.2));
        rig.step(Some(&pose), FPS30);
        assert_eq!(rig.left().state(), HandState::Default);
        assert_eq!(rig.tracker.right().state(), HandState::NoPose);
        assert_eq!(rig.tracker.right().position(), Vec2::ZERO);
    }

    #[test]
    fn velocity_is_smoothed_and_normalized() {
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), 0.5);
        rig.step(Some(&body(300.0, 350.0)), 0.5);
        // 50 px up in 0.5 s = 100 px/s; shoulders 100 px apart → 1.0; × 0.9
        assert!((rig.left().velocity().y - 100.0).abs() < 1e-3);
        assert!((rig.left().normalized_velocity().y - 0.9).abs() < 1e-5);
        rig.step(Some(&body(250.0, 350.0)), 0.5);
        assert!((rig.left().normalized_velocity().y - (0.09 + 0.9)).abs() < 1e-5);
    }

    #[test]
    fn sustained_raise_then_stop_fires_once() {
        let mut rig = Rig::new();
        let mut y = 350.0;
        for _ in 0..30 {
            assert!(!rig.step(Some(&body(y, 350.0)), FPS30).any());
        }
        assert_eq!(rig.left().state(), HandState::Default);

        let mut fired = 0;
        for _ in 0..6 {
            y -= 20.0;
            let ev = rig.step(Some(&body(y, 350.0)), FPS30);
            fired += ev.fired(Side::Left) as usize;
            assert_eq!(rig.left().state(), HandState::Up);
        }
        assert_eq!(fired, 0);
        let before_stop_pos = rig.left().position();
        let before_stop_vel = rig.left().velocity();

        let ev = rig.step(Some(&body(y, 350.0)), FPS30);
        assert!(ev.fired(Side::Left));
        assert!(!ev.fired(Side::Right));
        assert_eq!(rig.left().state(), HandState::Stopped);
        assert_eq!(rig.left().duration_in_state(), 0.0);
        assert_eq!(rig.left().stopped_position(), before_stop_pos);
        assert_eq!(rig.left().stopped_velocity(), before_stop_vel);
        assert!(rig.left().stopped_velocity().y > 0.0);

        for _ in 0..5 {
            assert!(!rig.step(Some(&body(y, 350.0)), FPS30).any());
        }
    }

    #[test]
    fn brief_raise_is_cancelled() {
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), FPS30);
        rig.step(Some(&body(330.0, 350.0)), FPS30);
        rig.step(Some(&body(310.0, 350.0)), FPS30);
        assert_eq!(rig.left().state(), HandState::Up);
        assert!(rig.left().duration_in_state() <= 0.1);

        let ev = rig.step(Some(&body(310.0, 350.0)), FPS30);
        assert!(!ev.any());
        assert_eq!(rig.left().state(), HandState::Default);
        assert_eq!(rig.left().duration_in_state(), 0.0);
    }

    #[test]
    fn stopped_reverts_only_after_stopped_duration() {
        let dt = 0.125;
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), dt);
        rig.step(Some(&body(300.0, 350.0)), dt);
        rig.step(Some(&body(250.0, 350.0)), dt);
        assert_eq!(rig.left().state(), HandState::Up);
        assert!(rig.step(Some(&body(250.0, 350.0)), dt).fired(Side::Left));

        // 4 × 0.125 = 0.5, not yet past stopped_duration.
        for _ in 0..4 {
            rig.step(Some(&body(250.0, 350.0)), dt);
            assert_eq!(rig.left().state(), HandState::Stopped);
        }
        rig.step(Some(&body(250.0, 350.0)), dt);
        let hand = rig.left();
        assert_eq!(hand.state(), HandState::Default);
        assert_eq!(hand.duration_in_state(), 0.0);
        assert_eq!(hand.position(), Vec2::ZERO);
        assert_eq!(hand.velocity(), Vec2::ZERO);
        assert_eq!(hand.normalized_velocity(), Vec2::ZERO);
        assert_eq!(hand.stopped_position(), Vec2::ZERO);
        assert_eq!(hand.stopped_velocity(), Vec2::ZERO);
    }

    #[test]
    fn downward_motion_never_goes_up() {
        let mut rig = Rig::new();
        let mut y = 100.0;
        for _ in 0..20 {
            rig.step(Some(&body(y, 350.0)), FPS30);
            y += 15.0;
            assert_ne!(rig.left().state(), HandState::Up);
        }
    }

    #[test]
    fn held_raise_fires_once_across_rearms() {
        // Shoulders 40 px apart, so a difference against a zeroed position
        // would read as a fast raise.
        let narrow = |y: f32| {
            body(y, 350.0)
                .with(LEFT_SHOULDER,  Keypoint::new(300.0, 200.0, 0.9))
                .with(RIGHT_SHOULDER, Keypoint::new(340.0, 200.0, 0.9))
        };
        let dt = 0.11;
        let mut rig = Rig::new();
        let mut fired = Vec::new();
        let raise = [300.0, 220.0, 140.0, 60.0];
        for (tick, &y) in raise.iter().chain([60.0; 27].iter()).enumerate() {
            if rig.step(Some(&narrow(y)), dt).fired(Side::Left) {
                fired.push(tick);
            }
        }
        // Several stopped_duration periods elapse while the hand stays up.
        assert_eq!(fired, vec![4]);
        let hand = rig.left();
        assert_eq!(hand.state(), HandState::Default);
        assert_eq!(hand.velocity(), Vec2::ZERO);
        assert_eq!(hand.normalized_velocity(), Vec2::ZERO);
        assert_eq!(hand.position(), Vec2::new(240.0 - 320.0, 240.0 - 60.0));
    }

    #[test]
    fn first_sample_after_rearm_has_zero_velocity() {
        let dt = 0.125;
        let mut rig = Rig::new();
        for y in [350.0, 300.0, 250.0, 250.0] {
            rig.step(Some(&body(y, 350.0)), dt);
        }
        assert_eq!(rig.left().state(), HandState::Stopped);
        for _ in 0..5 {
            rig.step(Some(&body(250.0, 350.0)), dt);
        }
        assert_eq!(rig.left().state(), HandState::Default);

        // The hand sits above the image centre; the next sample must not be
        // differenced against the zeroed position.
        let ev = rig.step(Some(&body(250.0, 350.0)), dt);
        assert!(!ev.any());
        assert_eq!(rig.left().state(), HandState::Default);
        assert_eq!(rig.left().velocity(), Vec2::ZERO);
        assert_eq!(rig.left().normalized_velocity(), Vec2::ZERO);
        assert_eq!(rig.left().duration_in_state(), dt as f32);
    }

    #[test]
    fn zero_delta_does_not_poison_velocity() {
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), FPS30);
        rig.step(Some(&body(300.0, 350.0)), FPS30);
        let before = rig.left().clone();

        let ev = rig.step(Some(&body(250.0, 350.0)), 0.0);
        assert!(!ev.any());
        let hand = rig.left();
        assert!(hand.velocity().y.is_finite());
        assert_eq!(hand.velocity(), Vec2::ZERO);
        assert_eq!(hand.normalized_velocity(), Vec2::ZERO);
        assert_eq!(hand.state(), before.state());
        assert_eq!(hand.duration_in_state(), before.duration_in_state());
    }

    #[test]
    fn zero_delta_holds_up_state_without_firing() {
        let mut rig = Rig::new();
        let mut y = 350.0;
        rig.step(Some(&body(y, 350.0)), FPS30);
        for _ in 0..5 {
            y -= 20.0;
            rig.step(Some(&body(y, 350.0)), FPS30);
        }
        assert_eq!(rig.left().state(), HandState::Up);
        let held = rig.left().duration_in_state();
        assert!(held > TrackerConfig::default().up_duration);

        let ev = rig.step(Some(&body(y, 350.0)), 0.0);
        assert!(!ev.any());
        assert_eq!(rig.left().state(), HandState::Up);
        assert_eq!(rig.left().duration_in_state(), held);
    }

    #[test]
    fn coincident_shoulders_hold_state() {
        let mut rig = Rig::new();
        rig.step(Some(&body(350.0, 350.0)), FPS30);
        let collapsed = body(200.0, 350.0).with(RIGHT_SHOULDER, Keypoint::new(270.0, 200.0, 0.9));
        let ev = rig.step(Some(&collapsed), FPS30);
        assert!(!ev.any());
        assert_eq!(rig.left().state(), HandState::Default);
        assert_eq!(rig.left().normalized_velocity(), Vec2::ZERO);
    }

    #[test]
    fn hands_are_independent() {
        let mut rig = Rig::new();
        let mut ry = 350.0;
        for _ in 0..3 { rig.step(Some(&body(350.0, ry)), FPS30); }
        for _ in 0..6 {
            ry -= 20.0;
            rig.step(Some(&body(350.0, ry)), FPS30);
        }
        let ev = rig.step(Some(&body(350.0, ry)), FPS30);
        assert_eq!(ev, HandEvents { left: HandEvent::None, right: HandEvent::Confetti });
        assert_eq!(rig.left().state(), HandState::Default);
    }

    proptest! {
        #[test]
        fn prop_weak_shoulders_always_reset(
            ys in proptest::collection::vec(50.0f32..450.0, 1..40),
            score in 0.0f32..0.39,
        ) {
            let mut rig = Rig::new();
            for y in &ys {
                rig.step(Some(&body(*y, 450.0 - *y)), FPS30);
            }
            let last = ys[ys.len() - 1];
            let weak = body(last, last).with(RIGHT_SHOULDER, Keypoint::new(370.0, 200.0, score));
            let ev = rig.step(Some(&weak), FPS30);
            prop_assert!(!ev.any());
            prop_assert_eq!(rig.left().state(), HandState::NoPose);
            prop_assert_eq!(rig.tracker.right().state(), HandState::NoPose);
        }

        #[test]
        fn prop_event_always_lands_in_stopped(
            ys in proptest::collection::vec(50.0f32..450.0, 1..80),
        ) {
            let mut rig = Rig::new();
            for y in &ys {
                let ev = rig.step(Some(&body(*y, 350.0)), FPS30);
                if ev.fired(Side::Left) {
                    prop_assert_eq!(rig.left().state(), HandState::Stopped);
                    prop_assert_eq!(rig.left().duration_in_state(), 0.0);
                }
                prop_assert!(rig.left().normalized_velocity().y.is_finite());
            }
        }
    }
}
