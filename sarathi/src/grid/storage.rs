//! Boolean occupancy storage over a bounded world rectangle.

use crate::core::Vec2;
use crate::core::math::remap;
use crate::error::GridError;

/// Square-resolution passability grid.
///
/// The grid covers `width × depth` meters centered at `center`, split into
/// `resolution × resolution` cells. Cell `(i, j)` spans X index `i` and Y
/// index `j`, counted from the rectangle's minimum corner:
///
/// ```text
///   +Y ▲  ┌────┬────┬────┐
///      │  │0,2 │1,2 │2,2 │
///      │  ├────┼────┼────┤
///      │  │0,1 │1,1 │2,1 │      address(i, j) = i + j · resolution
///      │  ├────┼────┼────┤
///      │  │0,0 │1,0 │2,0 │
///      │  └────┴────┴────┘
///      └──────────────────▶ +X
/// ```
///
/// `true` means blocked. Queries beyond the rectangle return the configured
/// outside value.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    /// Row-major cell bits
    cells: Vec<bool>,
    /// World-space center of the rectangle
    center: Vec2,
    /// Extent along X (meters)
    width: f32,
    /// Extent along Y (meters)
    depth: f32,
    /// Cells per side
    resolution: usize,
    /// Value reported for points outside the rectangle
    outside_value: bool,
}

impl OccupancyGrid {
    /// Create an empty grid. Outside points read as passable.
    pub fn new(center: Vec2, width: f32, depth: f32, resolution: usize) -> Result<Self, GridError> {
        if resolution == 0 {
            return Err(GridError::ZeroResolution);
        }
        let valid = |e: f32| e.is_finite() && e > 0.0;
        if !valid(width) || !valid(depth) || !center.is_finite() {
            return Err(GridError::InvalidExtent { width, depth });
        }

        Ok(Self {
            cells: vec![false; resolution * resolution],
            center,
            width,
            depth,
            resolution,
            outside_value: false,
        })
    }

    /// Square grid of `size` meters centered at the origin.
    pub fn square(size: f32, resolution: usize) -> Result<Self, GridError> {
        Self::new(Vec2::ZERO, size, size, resolution)
    }

    /// Set the value reported for points outside the rectangle.
    pub fn with_outside_value(mut self, outside_value: bool) -> Self {
        self.outside_value = outside_value;
        self
    }

    /// World-space center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Extent along X (meters)
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Extent along Y (meters)
    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Cells per side
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Value reported for points outside the rectangle
    #[inline]
    pub fn outside_value(&self) -> bool {
        self.outside_value
    }

    /// Smallest cell edge length. Scans sample at no more than this spacing.
    #[inline]
    pub fn min_spacing(&self) -> f32 {
        self.width.min(self.depth) / self.resolution as f32
    }

    /// Mark every cell passable.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    #[inline]
    fn address(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.resolution && j < self.resolution);
        i + j * self.resolution
    }

    /// Read a cell. Indices must be below `resolution`.
    #[inline]
    pub fn get_cell(&self, i: usize, j: usize) -> bool {
        self.cells[self.address(i, j)]
    }

    /// Write a cell. Indices must be below `resolution`.
    #[inline]
    pub fn set_cell(&mut self, i: usize, j: usize, value: bool) {
        let index = self.address(i, j);
        self.cells[index] = value;
    }

    /// World coordinates of a cell's center
    pub fn cell_center(&self, i: usize, j: usize) -> Vec2 {
        let cell_x = self.width / self.resolution as f32;
        let cell_y = self.depth / self.resolution as f32;
        Vec2::new(
            self.center.x - self.width / 2.0 + cell_x * (i as f32 + 0.5),
            self.center.y - self.depth / 2.0 + cell_y * (j as f32 + 0.5),
        )
    }

    /// Map a world point to cell indices, or `None` outside the rectangle.
    ///
    /// Points on the far edge belong to the last cell.
    pub fn cell_of(&self, point: Vec2) -> Option<(usize, usize)> {
        let local = point - self.center;
        let hx = self.width / 2.0;
        let hy = self.depth / 2.0;

        // Written so NaN lands outside
        if !(local.x >= -hx && local.x <= hx && local.y >= -hy && local.y <= hy) {
            return None;
        }

        let last = self.resolution - 1;
        let r = self.resolution as f32;
        let i = (remap(local.x, -hx, hx, 0.0, r) as usize).min(last);
        let j = (remap(local.y, -hy, hy, 0.0, r) as usize).min(last);
        Some((i, j))
    }

    /// Occupancy at a world point; the outside value beyond the rectangle.
    #[inline]
    pub fn value_at(&self, point: Vec2) -> bool {
        match self.cell_of(point) {
            Some((i, j)) => self.get_cell(i, j),
            None => self.outside_value,
        }
    }

    /// Convenience inverse of [`value_at`](Self::value_at)
    #[inline]
    pub fn is_passable(&self, point: Vec2) -> bool {
        !self.value_at(point)
    }

    /// Number of blocked cells
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
