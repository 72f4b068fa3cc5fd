//! Default value functions for serde deserialization.

pub fn world_size() -> f32 {
    200.0
}

pub fn grid_resolution() -> usize {
    201
}

pub fn max_speed() -> f32 {
    20.0
}

pub fn max_force() -> f32 {
    8.0
}

pub fn mass() -> f32 {
    1.0
}

pub fn half_width() -> f32 {
    1.0
}

pub fn half_length() -> f32 {
    1.5
}

pub fn min_turning_radius() -> f32 {
    5.0
}

pub fn base_look_ahead_time() -> f32 {
    3.0
}

pub fn path_follow_direction() -> i32 {
    1
}

pub fn seed() -> u64 {
    42
}

pub fn enabled() -> bool {
    true
}

pub fn route_radius() -> f32 {
    10.0
}

pub fn time_step() -> f32 {
    0.05
}

pub fn clump_range() -> (usize, usize) {
    (50, 150)
}

pub fn max_rocks_per_clump() -> usize {
    10
}

pub fn radius_range() -> (f32, f32) {
    (4.0, 19.0)
}
