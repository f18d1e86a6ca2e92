//! Movement domain: player bootstrap from the loaded movement config.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Health;
use crate::movement::{AnimationParams, CharacterController, GameLayer, MovementConfig, Player};

pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
pub(crate) const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 100.0);

pub(crate) fn spawn_player(mut commands: Commands, config: Res<MovementConfig>, time: Res<Time>) {
    let entity = spawn_player_entity(&mut commands, &config, PLAYER_SPAWN, time.elapsed_secs());
    info!(
        "Spawned player {:?}: health={}, jump_force={}, dash_speed={}",
        entity, config.max_health, config.jump_force, config.dash_speed
    );
}

/// Spawn a fresh character; starts with the spawn invincibility window running.
pub(crate) fn spawn_player_entity(
    commands: &mut Commands,
    config: &MovementConfig,
    position: Vec2,
    now: f32,
) -> Entity {
    commands
        .spawn((
            // Identity & Movement
            (
                Player,
                CharacterController::spawn(position, config, now),
                AnimationParams::default(),
            ),
            // Combat
            Health::new(config.max_health),
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Gravity is integrated by the controller
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Wall,
                        GameLayer::DashTarget,
                        GameLayer::Sensor,
                    ],
                ),
            ),
        ))
        .id()
}
