//! Movement domain: components, physics layers, and the character state record.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{Cue, FeedbackSink};
use crate::movement::MovementConfig;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Bodies a dash can home in on
    DashTarget,
    /// Sensors (triggers, hazards) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for dash-homing candidates
#[derive(Component, Debug)]
pub struct DashTarget;

/// Stable identifier of a dash target, independent of the physics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

impl From<Entity> for TargetId {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

/// Tag carried by trigger volumes and hazard colliders.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTag {
    /// Touching it kills the character outright
    Death,
    /// Ends a homing dash aimed at this target
    Target(TargetId),
    /// Any other trigger; re-arms the dash
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn as_vec(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// Facing for a horizontal component, `None` when it is zero.
    pub fn from_x(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Facing::Right)
        } else if x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Exactly one sub-mode is active at a time. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    Normal,
    WallSliding,
    WallGrabbing,
    Dashing,
    Dead,
}

impl MoveMode {
    pub fn on_wall(self) -> bool {
        matches!(self, MoveMode::WallSliding | MoveMode::WallGrabbing)
    }
}

/// Contact point and surface normal returned by the wall probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub point: Vec2,
    pub normal: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashState {
    pub direction: Vec2,
    pub started_at: f32,
    /// Target being homed in on; a homing dash never expires by time
    pub homing: Option<TargetId>,
}

/// Everything the tick pipeline reads and writes for one character.
#[derive(Debug, Clone)]
pub struct CharacterState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub mode: MoveMode,
    pub grounded: bool,
    pub against_wall: bool,
    /// Against a wall with horizontal intent pointing into it
    pub pushing_wall: bool,
    /// Wall probe result from this tick's detection pass
    pub wall_hit: Option<WallHit>,
    pub gravity_enabled: bool,
    pub has_jumped: bool,
    pub has_double_jumped: bool,
    pub has_dashed: bool,
    pub dash: DashState,
    pub damageable: bool,
    pub input_enabled: bool,
    /// Responsiveness; dips after a wall jump and relaxes back to the fast default
    pub movement_lerp_speed: f32,
    pub walking_penalty: f32,
    pub left_ground_at: Option<f32>,
    pub last_wall_jump_at: Option<f32>,
}

impl CharacterState {
    pub fn new(position: Vec2, config: &MovementConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            mode: MoveMode::Normal,
            grounded: false,
            against_wall: false,
            pushing_wall: false,
            wall_hit: None,
            gravity_enabled: true,
            has_jumped: false,
            has_double_jumped: false,
            has_dashed: false,
            dash: DashState::default(),
            damageable: true,
            input_enabled: true,
            movement_lerp_speed: config.movement_lerp_speed,
            walking_penalty: config.min_walking_penalty,
            left_ground_at: None,
            last_wall_jump_at: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.mode == MoveMode::Dead
    }

    /// Switch sub-mode. Every wall start cue is matched by its end cue,
    /// whichever transition leaves the wall mode.
    pub fn enter_mode(&mut self, next: MoveMode, sink: &mut dyn FeedbackSink) {
        if self.mode == next {
            return;
        }
        match self.mode {
            MoveMode::WallSliding => sink.cue(Cue::WallSlideEnd),
            MoveMode::WallGrabbing => sink.cue(Cue::WallGrabEnd),
            _ => {}
        }
        self.mode = next;
        match next {
            MoveMode::WallSliding => sink.cue(Cue::WallSlideStart),
            MoveMode::WallGrabbing => sink.cue(Cue::WallGrabStart),
            _ => {}
        }
    }
}

/// Parameters published for an external animator each tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationParams {
    pub grounded: bool,
    pub walking: bool,
    pub climbing: bool,
    pub raw_y: i8,
}
