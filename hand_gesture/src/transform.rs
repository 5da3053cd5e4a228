//! Raw keypoint coordinates → simulation plane coordinates.

use crate::pose::Vec2;

/// Opaque pure mapping from a raw 2D keypoint coordinate into the plane the
/// tracker and the particle simulator share.
pub trait CoordTransform {
    fn apply(&self, raw: Vec2) -> Vec2;
}

impl<F> CoordTransform for F
where
    F: Fn([f32; 2]) -> [f32; 2],
{
    fn apply(&self, raw: Vec2) -> Vec2 {
        self(raw.into()).into()
    }
}

/// Image pixels (origin top-left, y down) → a plane centred on the image
/// with y pointing up.  One pixel maps to one plane unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageToPlane {
    pub width:  f32,
    pub height: f32,
}

impl ImageToPlane {
    pub fn new(width: f32, height: f32) -> Self {
        ImageToPlane { width, height }
    }

    /// Inverse mapping, used by presentation code to place plane points
    /// back on screen.
    pub fn to_image(&self, plane: Vec2) -> Vec2 {
        Vec2::new(plane.x + 0.5 * self.width, 0.5 * self.height - plane.y)
    }
}

impl CoordTransform for ImageToPlane {
    fn apply(&self, raw: Vec2) -> Vec2 {
        Vec2::new(raw.x - 0.5 * self.width, 0.5 * self.height - raw.y)
    }
}
