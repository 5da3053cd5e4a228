//! Body pose data model: 33 confidence-scored keypoints per detection.
//!
//! Indices follow the BlazePose / MediaPipe Pose landmark layout.  Only the
//! shoulders and the three hand landmarks per side matter to the tracker,
//! the rest ride along for the keypoint overlay.

use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of keypoints in every pose.
pub const KEYPOINT_COUNT: usize = 33;

pub const NOSE:           usize = 0;
pub const LEFT_SHOULDER:  usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW:     usize = 13;
pub const RIGHT_ELBOW:    usize = 14;
pub const LEFT_WRIST:     usize = 15;
pub const RIGHT_WRIST:    usize = 16;
pub const LEFT_HIP:       usize = 23;
pub const RIGHT_HIP:      usize = 24;

/// Pinky, index and thumb landmarks of the left hand.
pub const LEFT_HAND_KPTS:  [usize; 3] = [17, 19, 21];
/// Pinky, index and thumb landmarks of the right hand.
pub const RIGHT_HAND_KPTS: [usize; 3] = [18, 20, 22];

// ════════════════════════════════════════════════════════════════════════════
// Vec2
// ════════════════════════════════════════════════════════════════════════════

/// 2D vector in image or plane coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn distance(&self, other: &Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn scale(&self, s: f32) -> Vec2 {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2 { x: self.x + other.x, y: self.y + other.y }
    }

    pub fn sub(&self, other: &Vec2) -> Vec2 {
        Vec2 { x: self.x - other.x, y: self.y - other.y }
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Vec2 { x: v[0], y: v[1] }
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Keypoint
// ════════════════════════════════════════════════════════════════════════════

/// A single tracked landmark in raw image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Keypoint {
    pub x:     f32,
    pub y:     f32,
    /// Detector confidence in `[0, 1]`.
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Keypoint { x, y, score }
    }

    pub fn position(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.score.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PoseError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    #[error("pose must have {KEYPOINT_COUNT} keypoints, got {0}")]
    WrongKeypointCount(usize),

    #[error("flat pose data must hold {expected} values, got {actual}")]
    WrongValueCount { expected: usize, actual: usize },

    #[error("keypoint {index} has a non-finite coordinate or score")]
    NonFinite { index: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Pose
// ════════════════════════════════════════════════════════════════════════════

/// One detected body: exactly [`KEYPOINT_COUNT`] keypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl Pose {
    /// Build a pose from an ordered keypoint list.
    pub fn new(keypoints: Vec<Keypoint>) -> Result<Self, PoseError> {
        let len = keypoints.len();
        let keypoints: [Keypoint; KEYPOINT_COUNT] = keypoints
            .try_into()
            .map_err(|_| PoseError::WrongKeypointCount(len))?;
        if let Some(index) = keypoints.iter().position(|k| !k.is_finite()) {
            return Err(PoseError::NonFinite { index });
        }
        Ok(Pose { keypoints })
    }

    /// Build a pose from interleaved `x, y, score` triples, as delivered by
    /// detector bindings that hand over one flat float buffer.
    pub fn from_flat(data: &[f32]) -> Result<Self, PoseError> {
        let expected = KEYPOINT_COUNT * 3;
        if data.len() != expected {
            return Err(PoseError::WrongValueCount { expected, actual: data.len() });
        }
        let keypoints = data
            .chunks_exact(3)
            .map(|c| Keypoint::new(c[0], c[1], c[2]))
            .collect();
        Pose::new(keypoints)
    }

    /// A pose with every landmark set to `kp`.  Mostly useful as a starting
    /// point for [`Pose::with`].
    pub fn filled(kp: Keypoint) -> Self {
        Pose { keypoints: [kp; KEYPOINT_COUNT] }
    }

    /// Replace one landmark.  Out-of-range indices are ignored.
    pub fn with(mut self, index: usize, kp: Keypoint) -> Self {
        if let Some(slot) = self.keypoints.get_mut(index) {
            *slot = kp;
        }
        self
    }

    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
