//! Movement domain: debug-only test room, probe gizmos and respawn.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::Hazard;
use crate::core::{Cue, CueEvent};
use crate::movement::bootstrap::{PLAYER_SPAWN, spawn_player_entity};
use crate::movement::{
    CharacterController, DashTarget, GameLayer, Ground, MovementConfig, Player, TargetId,
    TriggerTag, Wall,
};

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let sensor_layers = CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]);

    // Ground
    spawn_block(
        &mut commands,
        Ground,
        ground_color,
        Vec2::new(800.0, 40.0),
        Vec2::new(0.0, -200.0),
        ground_layers,
    );

    // Side walls, tall enough to climb and wall jump between
    for x in [-420.0, 420.0] {
        spawn_block(
            &mut commands,
            Wall,
            wall_color,
            Vec2::new(40.0, 500.0),
            Vec2::new(x, 50.0),
            wall_layers,
        );
    }

    // Platforms
    for (size, position) in [
        (Vec2::new(150.0, 20.0), Vec2::new(-250.0, -50.0)),
        (Vec2::new(150.0, 20.0), Vec2::new(250.0, 50.0)),
        (Vec2::new(120.0, 20.0), Vec2::new(0.0, 150.0)),
    ] {
        spawn_block(
            &mut commands,
            Ground,
            platform_color,
            size,
            position,
            ground_layers,
        );
    }

    // Pillar for wall slide practice
    spawn_block(
        &mut commands,
        Wall,
        wall_color,
        Vec2::new(30.0, 200.0),
        Vec2::new(-100.0, -80.0),
        wall_layers,
    );

    // Dash targets: homing ends when the character reaches the target's trigger
    for position in [Vec2::new(150.0, 220.0), Vec2::new(-300.0, 200.0)] {
        let target = commands
            .spawn((
                DashTarget,
                Sprite {
                    color: Color::srgb(0.9, 0.7, 0.2),
                    custom_size: Some(Vec2::splat(20.0)),
                    ..default()
                },
                Transform::from_translation(position.extend(0.0)),
                RigidBody::Static,
                Collider::circle(10.0),
                Sensor,
                CollisionLayers::new(GameLayer::DashTarget, [GameLayer::Player]),
            ))
            .id();
        commands
            .entity(target)
            .insert(TriggerTag::Target(TargetId::from(target)));
    }

    // Dash refresher
    commands.spawn((
        TriggerTag::Generic,
        Sprite {
            color: Color::srgb(0.3, 0.8, 0.9),
            custom_size: Some(Vec2::splat(16.0)),
            ..default()
        },
        Transform::from_xyz(250.0, 120.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(16.0, 16.0),
        Sensor,
        sensor_layers,
    ));

    // Spikes
    commands.spawn((
        Hazard {
            damage: 3,
            stun: 1.0,
        },
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.2),
            custom_size: Some(Vec2::new(60.0, 10.0)),
            ..default()
        },
        Transform::from_xyz(200.0, -175.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(60.0, 10.0),
        Sensor,
        sensor_layers,
    ));

    // Kill plane below the room
    commands.spawn((
        TriggerTag::Death,
        Transform::from_xyz(0.0, -600.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(4000.0, 40.0),
        Sensor,
        sensor_layers,
    ));
}

fn spawn_block(
    commands: &mut Commands,
    marker: impl Component,
    color: Color,
    size: Vec2,
    position: Vec2,
    layers: CollisionLayers,
) {
    commands.spawn((
        marker,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        layers,
    ));
}

/// Draw the ground, wall and dash-target probes for each character.
pub(crate) fn draw_detection_probes(
    mut gizmos: Gizmos,
    config: Res<MovementConfig>,
    query: Query<&CharacterController, With<Player>>,
) {
    for controller in &query {
        let state = &controller.state;
        let facing = state.facing.as_vec();

        let ground_color = if state.grounded {
            Color::srgb(0.2, 0.9, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };
        gizmos.circle_2d(
            state.position + Vec2::new(0.0, config.grounder_offset),
            config.grounder_radius,
            ground_color,
        );

        let wall_color = if state.against_wall {
            Color::srgb(0.2, 0.9, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };
        gizmos.circle_2d(
            state.position + facing * config.wall_check_offset,
            config.wall_check_radius,
            wall_color,
        );
        gizmos.line_2d(
            state.position,
            state.position + facing * config.wall_ray_distance,
            wall_color,
        );

        if config.use_dash_targets && !state.has_dashed {
            let end = state.position + facing * config.dash_target_cast_distance;
            gizmos.line_2d(state.position, end, Color::srgba(0.9, 0.7, 0.2, 0.4));
            gizmos.circle_2d(
                end,
                config.dash_target_cast_radius,
                Color::srgba(0.9, 0.7, 0.2, 0.4),
            );
        }
    }
}

/// Tear down and respawn the character on R.
pub(crate) fn respawn_on_hotkey(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<MovementConfig>,
    mut players: Query<(Entity, &mut CharacterController), With<Player>>,
    mut cue_events: MessageWriter<CueEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }

    for (entity, mut controller) in &mut players {
        let mut cues: Vec<Cue> = Vec::new();
        controller.teardown(&mut cues);
        for cue in cues {
            cue_events.write(CueEvent { entity, cue });
        }
        commands.entity(entity).despawn();
    }

    let entity = spawn_player_entity(&mut commands, &config, PLAYER_SPAWN, time.elapsed_secs());
    info!("Respawned player {:?}", entity);
}
