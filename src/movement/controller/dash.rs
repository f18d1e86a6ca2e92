//! Dash: fixed-duration burst or target-homing dash, plus re-arming.

use bevy::prelude::*;

use crate::core::{Cue, FeedbackSink};
use crate::movement::controller::FrameInput;
use crate::movement::controller::contact::{CapsuleSweep, SpatialQueries, SweepHit};
use crate::movement::{CharacterState, DashState, MoveMode, MovementConfig, TargetId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashTransition {
    pub started: bool,
    pub ended: bool,
}

/// Closest hit by straight-line distance; the first of equals wins.
pub fn select_target(hits: &[SweepHit], from: Vec2) -> Option<SweepHit> {
    hits.iter()
        .copied()
        .min_by(|a, b| {
            a.position
                .distance_squared(from)
                .total_cmp(&b.position.distance_squared(from))
        })
}

fn find_target(
    state: &CharacterState,
    config: &MovementConfig,
    queries: &dyn SpatialQueries,
) -> Option<SweepHit> {
    let sweep = CapsuleSweep {
        origin: state.position,
        radius: config.dash_target_cast_radius,
        half_extent: config.dash_target_cast_extent,
        direction: state.facing.as_vec(),
        max_distance: config.dash_target_cast_distance,
    };
    let hits = queries.sweep_capsule(&sweep, config.dash_target_layer);
    select_target(&hits, state.position)
}

fn start_dash(
    state: &mut CharacterState,
    frame: &FrameInput,
    config: &MovementConfig,
    queries: &dyn SpatialQueries,
    now: f32,
    sink: &mut dyn FeedbackSink,
) {
    let mut direction = Vec2::new(f32::from(frame.raw_x), 0.0).normalize_or_zero();
    if direction == Vec2::ZERO {
        direction = state.facing.as_vec();
    }

    let mut homing = None;
    if config.use_dash_targets {
        if let Some(target) = find_target(state, config, queries) {
            let toward = (target.position - state.position).normalize_or_zero();
            if toward != Vec2::ZERO {
                direction = toward;
                homing = Some(target.target);
            }
        }
    }

    state.enter_mode(MoveMode::Dashing, sink);
    state.has_dashed = true;
    state.gravity_enabled = false;
    state.dash = DashState {
        direction,
        started_at: now,
        homing,
    };
    sink.cue(Cue::DashStart);
    debug!("Dash started: direction={:?}, homing={:?}", direction, homing);
}

fn finish_dash(state: &mut CharacterState, config: &MovementConfig, sink: &mut dyn FeedbackSink) {
    state.enter_mode(MoveMode::Normal, sink);
    // A dash while rising must not launch the character
    state.velocity.y = state.velocity.y.min(config.dash_exit_vertical_cap);
    state.gravity_enabled = true;
    if state.grounded {
        state.has_dashed = false;
    }
    sink.cue(Cue::DashEnd);
    debug!("Dash ended: velocity={:?}", state.velocity);
}

pub(crate) fn apply_dash(
    state: &mut CharacterState,
    frame: &FrameInput,
    config: &MovementConfig,
    queries: &dyn SpatialQueries,
    now: f32,
    sink: &mut dyn FeedbackSink,
) -> DashTransition {
    let mut transition = DashTransition::default();
    if state.is_dead() {
        return transition;
    }

    if frame.dash_pressed && !state.has_dashed {
        start_dash(state, frame, config, queries, now, sink);
        transition.started = true;
    }

    if state.mode == MoveMode::Dashing {
        state.velocity = state.dash.direction * config.dash_speed;

        let elapsed = now >= state.dash.started_at + config.dash_length;
        if elapsed && state.dash.homing.is_none() {
            finish_dash(state, config, sink);
            transition.ended = true;
        }
    }

    transition
}

/// Reaching the homed target's trigger ends homing; the dash stays spent.
pub(crate) fn end_homing(state: &mut CharacterState, target: TargetId) -> bool {
    if state.dash.homing == Some(target) {
        state.dash.homing = None;
        debug!("Homing dash reached {:?}", target);
        true
    } else {
        false
    }
}

pub(crate) fn rearm(state: &mut CharacterState) {
    if state.has_dashed {
        debug!("Dash re-armed by trigger");
    }
    state.has_dashed = false;
}
