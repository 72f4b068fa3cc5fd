//! Core geometric types for Sarathi.
//!
//! All types follow the ROS REP-103 ground-plane convention:
//! - **X-axis**: Forward at zero heading
//! - **Y-axis**: Left
//! - **Angles**: Counter-clockwise positive (radians)
//!
//! A vehicle frame is a [`LocalSpace`]: position plus a unit `forward`
//! and a unit `side` that always points to the vehicle's left.
//!
//! ```text
//!            side (+Y local)
//!               ▲
//!               │
//!        ┌──────┼──────┐
//!        │      ●──────┼──▶ forward
//!        └─────────────┘
//! ```

mod local_space;
pub mod math;
mod vector;

pub use local_space::LocalSpace;
pub use vector::Vec2;
