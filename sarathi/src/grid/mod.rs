//! Occupancy grid: boolean obstacle map with point, footprint, ray and arc queries.
//!
//! ## Sampling
//!
//! All scans step at a fraction of [`OccupancyGrid::min_spacing`] so no
//! blocked cell crossed by the scanned line is skipped:
//!
//! | Query | Sampling | Result |
//! |-------|----------|--------|
//! | [`OccupancyGrid::value_at`] | single point | cell value or outside value |
//! | [`OccupancyGrid::scan_footprint`] | half spacing grid over a local rectangle | any hit |
//! | [`OccupancyGrid::scan_ray`] | caller-supplied step | 1-based index, 0 = clear |
//! | [`OccupancyGrid::scan_arc`] | equal angle steps about a center | [`ArcHit`] |

mod scan;
mod storage;

pub use scan::ArcHit;
pub use storage::OccupancyGrid;
