//! Passive reliability counters.
//!
//! Updated by the navigator every tick; read-only to everyone else.
//! Counters survive navigation resets and are only zeroed by
//! [`Telemetry::clear`].

use log::info;

/// Minimum collision-free stretch (seconds) counted as a new collision
const COLLISION_DEBOUNCE: f32 = 1.0;

/// Accumulated driving statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Telemetry {
    sum_of_collision_free_times: f32,
    count_of_collision_free_times: u32,
    time_of_last_collision: f32,
    collision_last_tick: bool,

    total_distance: f32,
    total_time: f32,
    path_follow_time: f32,
    path_follow_off_time: f32,

    stuck_count: u32,
    stuck_cycle_count: u32,
    stuck_off_path_count: u32,

    laps_started: u32,
    laps_finished: u32,

    hints_given: u32,
    hints_taken: u32,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record the body-footprint collision state at `time`.
    ///
    /// A collision counts when it begins and at least one second has passed
    /// since the last counted collision.
    pub(crate) fn record_collision(&mut self, detected: bool, time: f32) {
        let since_last = time - self.time_of_last_collision;
        if detected && !self.collision_last_tick && since_last > COLLISION_DEBOUNCE {
            info!("collision after {:.2} seconds", since_last);
            self.sum_of_collision_free_times += since_last;
            self.count_of_collision_free_times += 1;
            self.time_of_last_collision = time;
        }
        self.collision_last_tick = detected;
    }

    pub(crate) fn record_motion(&mut self, speed: f32, dt: f32) {
        self.total_distance += speed * dt;
        self.total_time += dt;
    }

    pub(crate) fn record_path_follow(&mut self, off_path: bool, dt: f32) {
        self.path_follow_time += dt;
        if off_path {
            self.path_follow_off_time += dt;
        }
    }

    pub(crate) fn count_stuck(&mut self) {
        self.stuck_count += 1;
    }

    pub(crate) fn count_stuck_cycle(&mut self) {
        self.stuck_cycle_count += 1;
    }

    pub(crate) fn count_stuck_off_path(&mut self) {
        self.stuck_off_path_count += 1;
    }

    pub(crate) fn count_hint(&mut self, taken: bool) {
        self.hints_given += 1;
        if taken {
            self.hints_taken += 1;
        }
    }

    /// A lap begins (spawn, reset or teleport).
    pub fn start_lap(&mut self) {
        self.laps_started += 1;
    }

    /// A lap ends at the map exit.
    pub fn finish_lap(&mut self) {
        self.laps_finished += 1;
    }

    /// Mean collision-free time, `None` before the first collision.
    pub fn mean_time_between_collisions(&self) -> Option<f32> {
        (self.count_of_collision_free_times > 0)
            .then(|| self.sum_of_collision_free_times / self.count_of_collision_free_times as f32)
    }

    /// Number of counted collisions
    pub fn collision_count(&self) -> u32 {
        self.count_of_collision_free_times
    }

    /// Distance over time, zero before any time has passed.
    pub fn average_speed(&self) -> f32 {
        if self.total_time > 0.0 {
            self.total_distance / self.total_time
        } else {
            0.0
        }
    }

    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Seconds spent following a route
    pub fn path_follow_time(&self) -> f32 {
        self.path_follow_time
    }

    /// Seconds spent with the body partly outside the route
    pub fn path_follow_off_time(&self) -> f32 {
        self.path_follow_off_time
    }

    /// Stuck events that forced a reset
    pub fn stuck_count(&self) -> u32 {
        self.stuck_count
    }

    /// Entries into the going-in-circles state
    pub fn stuck_cycle_count(&self) -> u32 {
        self.stuck_cycle_count
    }

    /// Entries into the off-path state
    pub fn stuck_off_path_count(&self) -> u32 {
        self.stuck_off_path_count
    }

    pub fn laps_started(&self) -> u32 {
        self.laps_started
    }

    pub fn laps_finished(&self) -> u32 {
        self.laps_finished
    }

    /// Ticks on which path following offered an avoidance hint
    pub fn hints_given(&self) -> u32 {
        self.hints_given
    }

    /// Ticks on which the avoidance policy followed the hint
    pub fn hints_taken(&self) -> u32 {
        self.hints_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_collision_is_counted_once_per_contact() {
        let mut t = Telemetry::new();
        t.record_collision(true, 5.0);
        t.record_collision(true, 5.1);
        t.record_collision(true, 5.2);
        assert_eq!(t.collision_count(), 1);
        assert_relative_eq!(t.mean_time_between_collisions().unwrap(), 5.0);

        // New contact too soon after the last one
        t.record_collision(false, 5.3);
        t.record_collision(true, 5.5);
        assert_eq!(t.collision_count(), 1);

        t.record_collision(false, 6.0);
        t.record_collision(true, 12.0);
        assert_eq!(t.collision_count(), 2);
        assert_relative_eq!(t.mean_time_between_collisions().unwrap(), 6.0);
    }

    #[test]
    fn test_average_speed() {
        let mut t = Telemetry::new();
        assert_eq!(t.average_speed(), 0.0);
        t.record_motion(10.0, 1.0);
        t.record_motion(20.0, 1.0);
        assert_relative_eq!(t.average_speed(), 15.0);
    }

    #[test]
    fn test_hints_and_clear() {
        let mut t = Telemetry::new();
        t.count_hint(true);
        t.count_hint(false);
        t.start_lap();
        t.record_path_follow(true, 0.5);
        t.record_path_follow(false, 0.5);
        assert_eq!(t.hints_given(), 2);
        assert_eq!(t.hints_taken(), 1);
        assert_eq!(t.laps_started(), 1);
        assert_relative_eq!(t.path_follow_time(), 1.0);
        assert_relative_eq!(t.path_follow_off_time(), 0.5);

        t.clear();
        assert_eq!(t, Telemetry::default());
        assert_eq!(t.mean_time_between_collisions(), None);
    }
}
