//! Wall interaction: passive slide and active grab/climb.

use bevy::prelude::*;

use crate::core::FeedbackSink;
use crate::movement::controller::FrameInput;
use crate::movement::{CharacterState, Facing, MoveMode, MovementConfig, WallHit};

fn wall_jump_locked(state: &CharacterState, config: &MovementConfig, now: f32) -> bool {
    state
        .last_wall_jump_at
        .is_some_and(|at| now <= at + config.wall_jump_lock)
}

/// Turn to face the wall and creep toward it so thin ledges don't leave a gap.
fn settle_against_wall(state: &mut CharacterState, hit: WallHit, config: &MovementConfig) {
    if let Some(facing) = Facing::from_x(-hit.normal.x) {
        state.facing = facing;
    }

    if state.position.distance(hit.point) > config.wall_snap_threshold {
        let target = Vec2::new(hit.point.x, state.position.y);
        let offset = target - state.position;
        let step = offset.clamp_length_max(config.wall_snap_step);
        state.position += step;
    }
}

pub(crate) fn apply_wall(
    state: &mut CharacterState,
    frame: &FrameInput,
    config: &MovementConfig,
    now: f32,
    sink: &mut dyn FeedbackSink,
) {
    if matches!(state.mode, MoveMode::Dashing | MoveMode::Dead) {
        return;
    }

    // Slide
    if state.pushing_wall && state.mode == MoveMode::Normal {
        if let Some(hit) = state.wall_hit {
            settle_against_wall(state, hit, config);
        }
        state.enter_mode(MoveMode::WallSliding, sink);
    } else if !state.pushing_wall && state.mode == MoveMode::WallSliding {
        state.enter_mode(MoveMode::Normal, sink);
    }

    // Grab
    let wants_grab =
        state.against_wall && frame.grab_held && !wall_jump_locked(state, config, now);
    if wants_grab {
        state.enter_mode(MoveMode::WallGrabbing, sink);
    } else if state.mode == MoveMode::WallGrabbing {
        // Grab held the slide open; drop back to it if still pushing
        let next = if state.pushing_wall {
            MoveMode::WallSliding
        } else {
            MoveMode::Normal
        };
        state.enter_mode(next, sink);
    }

    state.gravity_enabled = state.mode != MoveMode::WallGrabbing;

    match state.mode {
        MoveMode::WallSliding if state.velocity.y < 0.0 => {
            // Only once falling, otherwise it would swallow a jump off the wall
            state.velocity = Vec2::new(0.0, -config.slide_speed);
        }
        MoveMode::WallGrabbing => {
            state.velocity = Vec2::new(0.0, config.wall_climb_speed(frame.raw_y));
        }
        _ => {}
    }
}
