//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::movement::GameLayer;

/// Tunable movement parameters, in world units (pixels) and seconds.
///
/// Loaded from `assets/data/movement.ron`; any field missing from the file
/// keeps its default.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // Layers
    pub ground_layer: GameLayer,
    pub wall_layer: GameLayer,
    pub dash_target_layer: GameLayer,

    // Detection
    /// Vertical offset of the ground probe from the character's center
    pub grounder_offset: f32,
    pub grounder_radius: f32,
    /// Forward offset of the wall probe from the character's center
    pub wall_check_offset: f32,
    pub wall_check_radius: f32,
    /// Reach of the forward ray that samples the wall normal
    pub wall_ray_distance: f32,

    // Walking
    pub walk_speed: f32,
    /// Walking penalty gained (or lost) per second of input (or no input)
    pub acceleration: f32,
    /// Lower bound of the walking penalty multiplier
    pub min_walking_penalty: f32,
    /// Fast default responsiveness, max velocity change per second
    pub movement_lerp_speed: f32,
    /// How fast the continuous axis follows the raw axis, per second
    pub axis_sensitivity: f32,

    // Jumping
    /// Gravity magnitude; applied downward while gravity is enabled
    pub gravity: f32,
    pub enable_double_jump: bool,
    pub jump_force: f32,
    /// Extra gravity multiplier for falling and released jumps
    pub fall_multiplier: f32,
    /// Vertical speed below which extra gravity kicks in
    pub jump_velocity_falloff: f32,
    /// Window after a wall jump during which wall grab is refused
    pub wall_jump_lock: f32,
    /// Responsiveness right after a wall jump, and its recovery rate
    pub wall_jump_movement_lerp: f32,
    pub coyote_time: f32,

    // Wall slide / grab
    pub slide_speed: f32,
    /// Climb speed as a fraction of slide speed
    pub climb_speed_factor: f32,
    /// Distance from the wall contact beyond which sliding nudges inward
    pub wall_snap_threshold: f32,
    pub wall_snap_step: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_length: f32,
    /// Upward speed cap applied when a timed dash ends
    pub dash_exit_vertical_cap: f32,
    pub use_dash_targets: bool,
    pub dash_target_cast_radius: f32,
    pub dash_target_cast_extent: f32,
    pub dash_target_cast_distance: f32,

    // Damage
    pub max_health: i32,
    pub invincible_time: f32,
    pub spawn_invincible_time: f32,
    /// Delay after stun before the recovery sequence completes
    pub recovery_tail: f32,
    /// Heartbeat plays while health is at or below this
    pub low_health_threshold: i32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            ground_layer: GameLayer::Ground,
            wall_layer: GameLayer::Wall,
            dash_target_layer: GameLayer::DashTarget,
            grounder_offset: -26.0,
            grounder_radius: 6.0,
            wall_check_offset: 14.0,
            wall_check_radius: 6.0,
            wall_ray_distance: 32.0,
            walk_speed: 320.0,
            acceleration: 1.43,
            min_walking_penalty: 0.5,
            movement_lerp_speed: 3200.0,
            axis_sensitivity: 3.0,
            gravity: 1800.0,
            enable_double_jump: true,
            jump_force: 620.0,
            fall_multiplier: 2.0,
            jump_velocity_falloff: 64.0,
            wall_jump_lock: 0.125,
            wall_jump_movement_lerp: 640.0,
            coyote_time: 0.3,
            slide_speed: 128.0,
            climb_speed_factor: 0.8,
            wall_snap_threshold: 16.0,
            wall_snap_step: 12.0,
            dash_speed: 960.0,
            dash_length: 0.2,
            dash_exit_vertical_cap: 96.0,
            use_dash_targets: true,
            dash_target_cast_radius: 128.0,
            dash_target_cast_extent: 192.0,
            dash_target_cast_distance: 480.0,
            max_health: 10,
            invincible_time: 0.5,
            spawn_invincible_time: 1.2,
            recovery_tail: 0.5,
            low_health_threshold: 6,
        }
    }
}

impl MovementConfig {
    /// Height of a single grounded jump with the jump button held.
    pub fn single_jump_height(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity)
    }

    /// Speed of an active wall climb (positive) or descent (negative) for a raw axis value.
    pub fn wall_climb_speed(&self, raw_y: i8) -> f32 {
        let factor = if raw_y < 0 { 1.0 } else { self.climb_speed_factor };
        f32::from(raw_y) * self.slide_speed * factor
    }
}

/// Raw per-frame intent as read from the device.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementInput {
    /// Each component is -1, 0 or 1
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub grab_held: bool,
    pub dash_just_pressed: bool,
}
