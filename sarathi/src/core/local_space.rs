//! Vehicle-attached coordinate frame.

use super::Vec2;

/// Position plus an orthonormal forward/side basis.
///
/// Local coordinates are `(x, z)` with `x` along `side` (left positive) and
/// `z` along `forward`, which is how footprint scans address the vehicle body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalSpace {
    /// Origin of the frame in world coordinates
    pub position: Vec2,
    /// Unit heading
    pub forward: Vec2,
    /// Unit left vector (forward rotated +90°)
    pub side: Vec2,
}

impl LocalSpace {
    /// Build a frame from a position and a heading (normalized here).
    pub fn new(position: Vec2, forward: Vec2) -> Self {
        let forward = if forward.is_zero() {
            Vec2::UNIT_X
        } else {
            forward.normalize()
        };
        Self {
            position,
            forward,
            side: forward.perpendicular(),
        }
    }

    /// Frame at `position` facing `heading` radians.
    pub fn from_heading(position: Vec2, heading: f32) -> Self {
        Self::new(position, Vec2::from_angle(heading))
    }

    /// Transform a local `(x, z)` offset into world coordinates.
    #[inline]
    pub fn globalize(&self, x: f32, z: f32) -> Vec2 {
        self.position + self.side * x + self.forward * z
    }

    /// Transform a world point into local `(x, z)`.
    #[inline]
    pub fn localize(&self, point: Vec2) -> (f32, f32) {
        let offset = point - self.position;
        (offset.dot(self.side), offset.dot(self.forward))
    }

    /// Heading angle of `forward`.
    #[inline]
    pub fn heading(&self) -> f32 {
        self.forward.y.atan2(self.forward.x)
    }
}
