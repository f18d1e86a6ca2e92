//! Combat domain: tests for damage, invincibility, stun recovery, and death.

use bevy::prelude::*;

use super::{DamageError, DamageOutcome, Health, HealthView, RecoveryTimer};
use crate::core::{Cue, LoopSound};
use crate::movement::{
    CapsuleSweep, CharacterController, GameLayer, MoveMode, MovementConfig, MovementInput,
    SpatialQueries, SweepHit, TickClock, TickReport, WallHit,
};

const DT: f32 = 1.0 / 60.0;

/// Nothing to touch anywhere.
struct OpenAir;

impl SpatialQueries for OpenAir {
    fn overlap_circle(&self, _center: Vec2, _radius: f32, _layer: GameLayer) -> bool {
        false
    }

    fn cast_ray(
        &self,
        _origin: Vec2,
        _direction: Vec2,
        _max_distance: f32,
        _layer: GameLayer,
    ) -> Option<WallHit> {
        None
    }

    fn sweep_capsule(&self, _sweep: &CapsuleSweep, _layer: GameLayer) -> Vec<SweepHit> {
        Vec::new()
    }
}

fn tick_at(
    controller: &mut CharacterController,
    config: &MovementConfig,
    input: &MovementInput,
    cues: &mut Vec<Cue>,
    now: f32,
) -> TickReport {
    controller.tick(input, config, &OpenAir, cues, TickClock { now, dt: DT })
}

fn idle_at(
    controller: &mut CharacterController,
    config: &MovementConfig,
    cues: &mut Vec<Cue>,
    now: f32,
) -> TickReport {
    tick_at(controller, config, &MovementInput::default(), cues, now)
}

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_clamps_at_zero() {
    let mut health = Health::new(5);
    assert_eq!(health.take_damage(20), 5);
    assert_eq!(health.current, 0);
    assert!(health.is_dead());
    assert_eq!(health.percent(), 0.0);
}

#[test]
fn test_health_percent_tracks_current() {
    let mut health = Health::new(10);
    health.apply_damage(3);
    assert_eq!(health.current(), 7);
    assert!((health.percent() - 0.7).abs() < 1e-6);
}

// -----------------------------------------------------------------------------
// Damage and recovery tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_stuns_then_recovers() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::new(Vec2::ZERO, &config);
    controller.state.velocity = Vec2::new(200.0, 300.0);
    let mut health = Health { current: 5, max: 10 };
    let mut cues: Vec<Cue> = Vec::new();

    let outcome = controller.take_damage(3, 1.0, &mut health, &config, 0.0, &mut cues);

    assert_eq!(outcome, DamageOutcome::Hurt { remaining: 2 });
    assert_eq!(health.current, 2);
    assert_eq!(controller.state.velocity, Vec2::ZERO);
    assert!(!controller.state.input_enabled);
    assert!(!controller.state.damageable);
    assert_eq!(cues.first(), Some(&Cue::Hit));

    idle_at(&mut controller, &config, &mut cues, config.invincible_time);
    assert!(controller.state.damageable);
    assert!(!controller.state.input_enabled);
    assert!(cues.contains(&Cue::Vulnerable));

    idle_at(&mut controller, &config, &mut cues, 0.99);
    assert!(!controller.state.input_enabled);

    idle_at(&mut controller, &config, &mut cues, 1.0);
    assert!(controller.state.input_enabled);
    assert!(!cues.contains(&Cue::Recovered));

    idle_at(&mut controller, &config, &mut cues, 1.0 + config.recovery_tail);
    assert!(cues.contains(&Cue::Recovered));
    assert!(controller.timers.is_empty());
}

#[test]
fn test_hit_rejected_while_invincible() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::new(Vec2::ZERO, &config);
    let mut health = Health::new(10);
    let mut cues: Vec<Cue> = Vec::new();

    controller.take_damage(3, 1.0, &mut health, &config, 0.0, &mut cues);
    controller.state.velocity = Vec2::new(120.0, -80.0);
    let timers = [
        RecoveryTimer::Invincibility,
        RecoveryTimer::InputRestore,
        RecoveryTimer::RecoveryComplete,
    ];
    let expiries: Vec<Option<f32>> = timers.iter().map(|t| controller.timers.expiry(*t)).collect();
    let cue_count = cues.len();

    let second = controller.take_damage(3, 1.0, &mut health, &config, 0.2, &mut cues);

    assert_eq!(second, DamageOutcome::Ignored);
    assert_eq!(health.current, 7);
    assert_eq!(controller.state.velocity, Vec2::new(120.0, -80.0));
    assert!(!controller.state.input_enabled);
    let after: Vec<Option<f32>> = timers.iter().map(|t| controller.timers.expiry(*t)).collect();
    assert_eq!(after, expiries);
    assert!(expiries.iter().all(Option::is_some));
    assert_eq!(cues.len(), cue_count);
}

#[test]
fn test_second_hit_restarts_stun() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::new(Vec2::ZERO, &config);
    let mut health = Health::new(10);
    let mut cues: Vec<Cue> = Vec::new();

    controller.take_damage(3, 1.0, &mut health, &config, 0.0, &mut cues);
    idle_at(&mut controller, &config, &mut cues, 0.6);
    assert!(controller.state.damageable);

    controller.take_damage(3, 1.0, &mut health, &config, 0.6, &mut cues);
    let restore = controller
        .timers
        .expiry(RecoveryTimer::InputRestore)
        .unwrap_or_default();
    assert!((restore - 1.6).abs() < 1e-4);

    idle_at(&mut controller, &config, &mut cues, 1.2);
    assert!(!controller.state.input_enabled);

    idle_at(&mut controller, &config, &mut cues, 1.61);
    assert!(controller.state.input_enabled);
}

#[test]
fn test_stunned_character_ignores_jump() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::new(Vec2::ZERO, &config);
    let mut health = Health::new(10);
    let mut cues: Vec<Cue> = Vec::new();

    controller.take_damage(1, 1.0, &mut health, &config, 0.0, &mut cues);
    let jump = MovementInput {
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    };
    let report = tick_at(&mut controller, &config, &jump, &mut cues, 0.1);

    assert_eq!(report.jump, None);
}

#[test]
fn test_heartbeat_starts_at_low_health() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::new(Vec2::ZERO, &config);
    let mut health = Health::new(10);
    let mut cues: Vec<Cue> = Vec::new();

    controller.take_damage(3, 0.1, &mut health, &config, 0.0, &mut cues);
    assert!(cues.contains(&Cue::HeartbeatLevel(0.7)));
    assert!(!controller.loops.is_playing(LoopSound::Heartbeat));

    idle_at(&mut controller, &config, &mut cues, 1.0);
    controller.take_damage(3, 0.1, &mut health, &config, 1.0, &mut cues);
    assert_eq!(health.current, 4);
    assert!(controller.loops.is_playing(LoopSound::Heartbeat));
}

#[test]
fn test_spawn_window_blocks_damage() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::spawn(Vec2::ZERO, &config, 0.0);
    let mut health = Health::new(10);
    let mut cues: Vec<Cue> = Vec::new();

    let early = controller.take_damage(3, 1.0, &mut health, &config, 0.5, &mut cues);
    assert_eq!(early, DamageOutcome::Ignored);

    idle_at(
        &mut controller,
        &config,
        &mut cues,
        config.spawn_invincible_time,
    );
    assert!(controller.state.damageable);

    let late = controller.take_damage(3, 1.0, &mut health, &config, 1.3, &mut cues);
    assert_eq!(late, DamageOutcome::Hurt { remaining: 7 });
}

// -----------------------------------------------------------------------------
// Death tests
// -----------------------------------------------------------------------------

#[test]
fn test_lethal_hit_is_terminal() {
    let config = MovementConfig::default();
    let mut controller = CharacterController::new(Vec2::ZERO, &config);
    let mut health = Health { current: 5, max: 10 };
    let mut cues: Vec<Cue> = Vec::new();
    controller.state.velocity = Vec2::new(150.0, 40.0);

    let outcome = controller.take_damage(5, 1.0, &mut health, &config, 0.0, &mut cues);
    assert_eq!(outcome, DamageOutcome::Killed);
    assert_eq!(controller.state.mode, MoveMode::Dead);
    assert_eq!(controller.state.velocity, Vec2::new(0.0, 40.0));
    assert!(!controller.state.input_enabled);
    assert!(!controller.state.damageable);
    assert!(controller.timers.is_empty());
    assert!(cues.contains(&Cue::Death));

    let after = controller.take_damage(1, 1.0, &mut health, &config, 5.0, &mut cues);
    assert_eq!(after, DamageOutcome::Ignored);

    let press = MovementInput {
        jump_just_pressed: true,
        dash_just_pressed: true,
        ..default()
    };
    let report = tick_at(&mut controller, &config, &press, &mut cues, 5.0);
    assert_eq!(report, TickReport::default());
    assert_eq!(controller.state.mode, MoveMode::Dead);
    assert_eq!(controller.state.velocity.x, 0.0);
    assert!(controller.state.velocity.y < 40.0);
    assert_eq!(cues.iter().filter(|c| **c == Cue::Death).count(), 1);
}

#[test]
fn test_hurt_refuses_loudly() {
    let config = MovementConfig::default();
    let controller = CharacterController::new(Vec2::ZERO, &config);

    let result = controller.hurt(3, 1.0);
    assert_eq!(
        result,
        Err(DamageError::UnsupportedEntryPoint {
            amount: 3,
            stun: 1.0
        })
    );
    assert!(result.unwrap_err().to_string().contains("take_damage"));
    assert!(controller.state.damageable);
}
