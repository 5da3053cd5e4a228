//! # hand_gesture
//!
//! Recognises an upward-then-stopping hand motion in a stream of body poses.
//!
//! Each tick the caller hands the [`HandTracker`] the current [`Pose`] (or
//! `None` when no body was detected) together with a [`Clock`].  The tracker
//! runs one [`HandTracking`] state machine per [`Side`] and returns a
//! [`HandEvents`] pair telling which hands fired this tick.
//!
//! ## State machine
//!
//! ```text
//!            first valid sample
//!  NoPose ──────────────────────▶ Default ◀──────────────┐
//!    ▲                              │  moving up          │ too brief
//!    │ low confidence               ▼                     │
//!    └────────────────────────────  Up ───────────────────┘
//!                                   │  stop after > up_duration
//!                                   ▼        (fires Confetti)
//!                                Stopped ── > stopped_duration ──▶ Default
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{HandTracker, ImageToPlane, ManualClock, TrackerConfig};
//!
//! let mut tracker = HandTracker::new(
//!     ImageToPlane::new(640.0, 480.0),
//!     TrackerConfig::default(),
//! );
//! let mut clock = ManualClock::new();
//! clock.advance(1.0 / 30.0);
//!
//! let events = tracker.update(None, &clock);
//! assert!(!events.any());
//! ```

pub mod clock;
pub mod pose;
pub mod tracker;
pub mod transform;

pub use clock::{Clock, FrameClock, ManualClock};
pub use pose::{
    Keypoint, Pose, PoseError, Vec2,
    KEYPOINT_COUNT, LEFT_ELBOW, LEFT_HAND_KPTS, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, NOSE,
    RIGHT_ELBOW, RIGHT_HAND_KPTS, RIGHT_HIP, RIGHT_SHOULDER, RIGHT_WRIST,
};
pub use tracker::{
    HandEvent, HandEvents, HandState, HandTracker, HandTracking, Side, TrackerConfig,
};
pub use transform::{CoordTransform, ImageToPlane};
