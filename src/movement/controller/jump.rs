//! Jump selection (wall, ground/coyote, double) and variable jump height.

use bevy::prelude::*;

use crate::core::{AudioLoops, Cue, FeedbackSink, LoopSound};
use crate::movement::controller::FrameInput;
use crate::movement::{CharacterState, MoveMode, MovementConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Double,
    Wall,
}

fn within_coyote(state: &CharacterState, config: &MovementConfig, now: f32) -> bool {
    state
        .left_ground_at
        .is_some_and(|left_at| now < left_at + config.coyote_time)
}

fn execute(
    state: &mut CharacterState,
    velocity: Vec2,
    kind: JumpKind,
    loops: &mut AudioLoops,
    sink: &mut dyn FeedbackSink,
) {
    state.velocity = velocity;
    state.has_double_jumped = kind == JumpKind::Double;
    state.has_jumped = true;
    loops.pause(LoopSound::Step, sink);
    sink.cue(match kind {
        JumpKind::Ground => Cue::Jump,
        JumpKind::Double => Cue::AirJump,
        JumpKind::Wall => Cue::WallJump,
    });
    debug!("{:?} jump: velocity={:?}", kind, velocity);
}

/// Evaluate the jump edge, then apply extra gravity for short hops and falls.
pub(crate) fn apply_jump(
    state: &mut CharacterState,
    frame: &FrameInput,
    config: &MovementConfig,
    now: f32,
    dt: f32,
    loops: &mut AudioLoops,
    sink: &mut dyn FeedbackSink,
) -> Option<JumpKind> {
    if state.mode == MoveMode::Dashing {
        return None;
    }

    let mut executed = None;

    if frame.jump_pressed {
        if !state.grounded && state.against_wall {
            state.last_wall_jump_at = Some(now);
            state.movement_lerp_speed = config.wall_jump_movement_lerp;

            // Same normal the detection pass sampled; fall back to facing away
            let normal_x = match state.wall_hit {
                Some(hit) if hit.normal.x != 0.0 => hit.normal.x,
                _ => -state.facing.sign(),
            };
            let velocity = Vec2::new(normal_x * config.jump_force, config.jump_force);
            execute(state, velocity, JumpKind::Wall, loops, sink);
            executed = Some(JumpKind::Wall);
        } else if state.grounded
            || within_coyote(state, config, now)
            || (config.enable_double_jump && !state.has_double_jumped)
        {
            let kind = if state.has_jumped {
                JumpKind::Double
            } else {
                JumpKind::Ground
            };
            let allowed = match kind {
                JumpKind::Double => config.enable_double_jump && !state.has_double_jumped,
                _ => true,
            };
            if allowed {
                let velocity = Vec2::new(state.velocity.x, config.jump_force);
                execute(state, velocity, kind, loops, sink);
                executed = Some(kind);
            }
        }
    }

    let falling_off = state.velocity.y < config.jump_velocity_falloff;
    let released_early = state.velocity.y > 0.0 && !frame.jump_held;
    if state.gravity_enabled && (falling_off || released_early) {
        state.velocity.y -= config.fall_multiplier * config.gravity * dt;
    }

    executed
}
