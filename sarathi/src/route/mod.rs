//! Route corridor: a polyline centerline with a tube radius per segment.
//!
//! "Outsideness" is the signed distance from a point to the tube boundary,
//! negative inside. Projection ranks segments by outsideness rather than by
//! raw distance.

mod corridor;
mod segment;

pub use corridor::{PathProjection, RouteCorridor};
pub use segment::{SegmentProjection, project_onto_segment};
