//! Contact detection: ground and wall classification from spatial queries.

use bevy::prelude::*;

use crate::core::{Cue, FeedbackSink};
use crate::movement::controller::{FrameInput, TickReport};
use crate::movement::{CharacterState, Facing, GameLayer, MovementConfig, TargetId, WallHit};

/// A dash-target candidate returned by a capsule sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub target: TargetId,
    pub position: Vec2,
}

/// Vertical capsule swept along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleSweep {
    pub origin: Vec2,
    pub radius: f32,
    pub half_extent: f32,
    pub direction: Vec2,
    pub max_distance: f32,
}

/// Spatial queries the controller consumes. Implementations never fail:
/// no contact is reported as `false`, `None`, or an empty list.
pub trait SpatialQueries {
    fn overlap_circle(&self, center: Vec2, radius: f32, layer: GameLayer) -> bool;

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: GameLayer,
    ) -> Option<WallHit>;

    /// Hits in backend order.
    fn sweep_capsule(&self, sweep: &CapsuleSweep, layer: GameLayer) -> Vec<SweepHit>;
}

/// One tick's detection output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactQueryResult {
    pub grounded: bool,
    pub against_wall: bool,
    pub wall_hit: Option<WallHit>,
}

pub fn ground_probe(position: Vec2, config: &MovementConfig) -> Vec2 {
    position + Vec2::new(0.0, config.grounder_offset)
}

pub fn wall_probe(position: Vec2, facing: Facing, config: &MovementConfig) -> Vec2 {
    position + facing.as_vec() * config.wall_check_offset
}

pub fn query_contacts(
    queries: &dyn SpatialQueries,
    config: &MovementConfig,
    position: Vec2,
    facing: Facing,
) -> ContactQueryResult {
    let grounded = queries.overlap_circle(
        ground_probe(position, config),
        config.grounder_radius,
        config.ground_layer,
    );
    let against_wall = queries.overlap_circle(
        wall_probe(position, facing, config),
        config.wall_check_radius,
        config.wall_layer,
    );
    let wall_hit = if against_wall {
        queries.cast_ray(
            position,
            facing.as_vec(),
            config.wall_ray_distance,
            config.wall_layer,
        )
    } else {
        None
    };

    ContactQueryResult {
        grounded,
        against_wall,
        wall_hit,
    }
}

/// Horizontal intent points into the wall the character is touching.
fn is_pushing_wall(state: &CharacterState, frame: &FrameInput) -> bool {
    if !state.against_wall || frame.x == 0.0 {
        return false;
    }
    match state.wall_hit {
        Some(hit) if hit.normal.x != 0.0 => frame.x * hit.normal.x < 0.0,
        _ => frame.x * state.facing.sign() > 0.0,
    }
}

/// Fold a detection result into the state, handling grounding edges.
pub(crate) fn apply_contacts(
    state: &mut CharacterState,
    contacts: ContactQueryResult,
    frame: &FrameInput,
    config: &MovementConfig,
    now: f32,
    sink: &mut dyn FeedbackSink,
    report: &mut TickReport,
) {
    if contacts.grounded && !state.grounded {
        state.grounded = true;
        state.has_jumped = false;
        state.has_double_jumped = false;
        state.has_dashed = false;
        state.movement_lerp_speed = config.movement_lerp_speed;
        report.landed = true;
        sink.cue(Cue::Land);
        debug!("Landed at {:?}", state.position);
    } else if !contacts.grounded && state.grounded {
        state.grounded = false;
        state.left_ground_at = Some(now);
        report.left_ground = true;
        debug!("Left ground: has_jumped={}", state.has_jumped);
    }

    state.against_wall = contacts.against_wall;
    state.wall_hit = contacts.wall_hit;
    state.pushing_wall = is_pushing_wall(state, frame);
}
