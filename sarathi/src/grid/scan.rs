//! Footprint, ray and arc queries against the occupancy grid.
//!
//! Every query samples at most every [`OccupancyGrid::min_spacing`], so a
//! blocked cell on the sampled line cannot be stepped over.
//!
//! ```text
//!   ray:   origin ─●──●──●──●──✕      (returns index of ✕, 1-based)
//!
//!   arc:              ✕
//!                  ●
//!               ●          spoke rotated about the turning center,
//!            ●             optionally spiralling toward an end radius
//!         start
//! ```

use super::OccupancyGrid;
use crate::core::math::lerp;
use crate::core::{LocalSpace, Vec2};

/// First blocked sample of an arc scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcHit {
    /// 1-based sample index
    pub index: usize,
    /// Approximate distance travelled along the arc (chord × index)
    pub distance: f32,
    /// World position of the blocked sample
    pub position: Vec2,
}

impl OccupancyGrid {
    /// Test a rectangle in a vehicle frame for any blocked sample.
    ///
    /// `x` runs along the frame's side axis and `z` along its forward axis.
    /// Samples start at the minimum corner and step by half the minimum
    /// spacing while strictly below the maximum.
    pub fn scan_footprint(
        &self,
        local_space: &LocalSpace,
        x_min: f32,
        x_max: f32,
        z_min: f32,
        z_max: f32,
    ) -> bool {
        let spacing = self.min_spacing() / 2.0;
        let mut x = x_min;
        while x < x_max {
            let mut z = z_min;
            while z < z_max {
                if self.value_at(local_space.globalize(x, z)) {
                    return true;
                }
                z += spacing;
            }
            x += spacing;
        }
        false
    }

    /// Step from `origin` by `step` up to `max_samples` times.
    ///
    /// Returns the 1-based index of the first blocked sample, or 0 when the
    /// ray is clear. The origin itself is not sampled.
    pub fn scan_ray(&self, origin: Vec2, step: Vec2, max_samples: usize) -> usize {
        let mut sample = origin;
        for i in 1..=max_samples {
            sample += step;
            if self.value_at(sample) {
                return i;
            }
        }
        0
    }

    /// Sweep the spoke `start - center` around `center` by `arc_angle`
    /// radians in `segments` equal steps.
    ///
    /// A nonzero `end_radius_change` scales the spoke linearly so the last
    /// sample sits at `max(0, r0 + end_radius_change)` from the center.
    pub fn scan_arc(
        &self,
        start: Vec2,
        center: Vec2,
        arc_angle: f32,
        segments: usize,
        end_radius_change: f32,
    ) -> Option<ArcHit> {
        if segments == 0 {
            return None;
        }

        let step = arc_angle / segments as f32;
        let mut spoke = start - center;
        let start_radius = spoke.length();
        let spiral = end_radius_change != 0.0 && start_radius > 0.0;
        let end_ratio = if spiral {
            (start_radius + end_radius_change).max(0.0) / start_radius
        } else {
            1.0
        };

        let mut previous = start;
        for i in 0..segments {
            spoke = spoke.rotate(step);
            let adjust = if spiral {
                lerp((i + 1) as f32 / segments as f32, 1.0, end_ratio)
            } else {
                1.0
            };
            let sample = center + spoke * adjust;
            if self.value_at(sample) {
                let index = i + 1;
                return Some(ArcHit {
                    index,
                    distance: sample.distance(previous) * index as f32,
                    position: sample,
                });
            }
            previous = sample;
        }
        None
    }
}
