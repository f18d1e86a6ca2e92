//! Locomotion: gravity integration and horizontal velocity shaping.

use crate::core::{AudioLoops, FeedbackSink, LoopSound};
use crate::movement::controller::FrameInput;
use crate::movement::{CharacterState, MovementConfig};

/// Step `current` toward `target` by at most `max_delta`.
pub(crate) fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

pub(crate) fn apply_gravity(state: &mut CharacterState, config: &MovementConfig, dt: f32) {
    if state.gravity_enabled {
        state.velocity.y -= config.gravity * dt;
    }
}

pub(crate) fn apply_walking(
    state: &mut CharacterState,
    frame: &FrameInput,
    config: &MovementConfig,
    dt: f32,
    loops: &mut AudioLoops,
    sink: &mut dyn FeedbackSink,
) {
    // Responsiveness relaxes back toward the fast default after a wall jump
    state.movement_lerp_speed = move_towards(
        state.movement_lerp_speed,
        config.movement_lerp_speed,
        config.wall_jump_movement_lerp * dt,
    );

    let dir = frame.horizontal_dir().normalize_or_zero();

    if dir.x != 0.0 {
        state.walking_penalty += config.acceleration * dt;
        if state.grounded {
            loops.resume(LoopSound::Step, sink);
        }
    } else {
        state.walking_penalty -= config.acceleration * dt;
        loops.pause(LoopSound::Step, sink);
    }
    state.walking_penalty = state
        .walking_penalty
        .max(config.min_walking_penalty)
        .min(1.0);

    // Vertical velocity is left alone; only x approaches the target
    let target_x = dir.x * state.walking_penalty * config.walk_speed;
    state.velocity.x = move_towards(
        state.velocity.x,
        target_x,
        state.movement_lerp_speed * dt,
    );
}
