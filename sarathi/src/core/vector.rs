//! Planar vector type shared by positions, directions and forces.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D vector on the ground plane (meters, or newtons for forces).
///
/// Used both as a position and as a free vector, the same way the grid and
/// route code treat world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector (origin)
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Unit vector along +X
    pub const UNIT_X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    /// Unit vector along +Y
    pub const UNIT_Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    /// Unit vector pointing at `angle` radians (CCW from +X)
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared length (avoids sqrt)
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Normalize to unit length. The zero vector stays zero.
    #[inline]
    pub fn normalize(&self) -> Vec2 {
        let len = self.length();
        if len > 0.0 { *self / len } else { *self }
    }

    /// Clip the length to at most `max_length`, keeping direction.
    #[inline]
    pub fn truncate_length(&self, max_length: f32) -> Vec2 {
        let max_sq = max_length * max_length;
        let len_sq = self.length_squared();
        if len_sq <= max_sq || len_sq == 0.0 {
            *self
        } else {
            *self * (max_length / len_sq.sqrt())
        }
    }

    /// This vector rotated +90° (to the left of a heading)
    #[inline]
    pub fn perpendicular(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Component parallel to a unit basis vector
    #[inline]
    pub fn parallel_component(&self, unit_basis: Vec2) -> Vec2 {
        unit_basis * self.dot(unit_basis)
    }

    /// Component perpendicular to a unit basis vector
    #[inline]
    pub fn perpendicular_component(&self, unit_basis: Vec2) -> Vec2 {
        *self - self.parallel_component(unit_basis)
    }

    /// Rotate about the origin by `angle` radians (CCW positive)
    #[inline]
    pub fn rotate(&self, angle: f32) -> Vec2 {
        let (sin_a, cos_a) = angle.sin_cos();
        Vec2::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1)
    #[inline]
    pub fn lerp(&self, other: Vec2, t: f32) -> Vec2 {
        *self + (other - *self) * t
    }

    /// True when both components are exactly zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// True when both components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Vec2::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vec2::new(-self.x, -self.y)
    }
}
