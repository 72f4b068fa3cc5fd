//! Navigation engine.
//!
//! | Module | Role |
//! |--------|------|
//! | `vehicle` | [`Kinematics`] capability, default [`VehicleState`] |
//! | `motion` | Per-tick snapshot, turning circle, prediction |
//! | `scanner` | Lane/wing obstacle scans, imminent collision check |
//! | `avoidance` | Ordered avoidance table, steering hint |
//! | `path_follow` | Linear and curved corridor following |
//! | `speed` | Curvature and heading speed limits |
//! | `steering` | Seek/heading primitives, radius limiter, smoothing |
//! | `progress` | Going-in-circles detection |
//! | `navigator` | [`Navigator`] tying it all together |

mod avoidance;
mod config;
mod motion;
mod navigator;
mod path_follow;
mod progress;
mod scanner;
mod speed;
mod steering;
mod vehicle;

pub use avoidance::{AvoidanceClause, AvoidanceDecision, POLICY, PolicyInputs, decide, steering_hint};
pub use config::{NavigatorConfig, combined_look_ahead_time};
pub use motion::{AVOIDANCE_ARC_FRACTION, MIN_CURVATURE, Motion, PREDICTION_ARC_FRACTION, TurnCircle, non_zero_curvature};
pub use navigator::{NavFlags, Navigator, SteeringOutput, Surroundings};
pub use path_follow::{PathFollowParams, steer_to_follow_path};
pub use progress::ProgressMonitor;
pub use scanner::{NO_HIT, ObstacleScan, ScanContact, ScanParams, detect_imminent_collision, scan_for_obstacles};
pub use speed::{curve_speed_factor, heading_speed_factor, max_speed_for_curvature, steer_for_target_speed};
pub use steering::{SteeringSmoother, limit_turning_radius, linear_to_curved, steer_for_seek, steer_toward_heading};
pub use vehicle::{Kinematics, VehicleState};
