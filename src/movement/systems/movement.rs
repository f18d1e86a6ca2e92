//! Movement domain: per-frame controller tick and visual state sync.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{Cue, CueEvent};
use crate::movement::systems::collisions::AvianQueries;
use crate::movement::{
    AnimationParams, CharacterController, DashTarget, MoveMode, MovementConfig, MovementInput,
    Player, TickClock,
};

pub(crate) fn run_character_controllers(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<MovementInput>,
    config: Res<MovementConfig>,
    spatial_query: SpatialQuery,
    targets: Query<&Transform, (With<DashTarget>, Without<Player>)>,
    mut players: Query<
        (
            Entity,
            &mut CharacterController,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
    mut cue_events: MessageWriter<CueEvent>,
) {
    let clock = TickClock {
        now: time.elapsed_secs(),
        dt: time.delta_secs(),
    };
    if clock.dt <= 0.0 {
        return;
    }

    let queries = AvianQueries::new(&spatial_query, |entity| {
        targets
            .get(entity)
            .ok()
            .map(|transform| transform.translation.truncate())
    });

    for (entity, mut controller, mut transform, mut velocity) in &mut players {
        // Physics owns position and may have changed velocity (landing, walls)
        let position = transform.translation.truncate();
        controller.state.position = position;
        controller.state.velocity = velocity.0;

        let mut cues: Vec<Cue> = Vec::new();
        let report = controller.tick(&input, &config, &queries, &mut cues, clock);

        if controller.state.position != position {
            transform.translation = controller.state.position.extend(transform.translation.z);
        }
        velocity.0 = controller.state.velocity;

        if report.left_ground {
            commands.entity(entity).remove::<ChildOf>();
        }

        for cue in cues {
            cue_events.write(CueEvent { entity, cue });
        }
    }
}

fn mode_color(controller: &CharacterController) -> Color {
    let state = &controller.state;
    let alpha = if state.damageable { 1.0 } else { 0.5 };
    match state.mode {
        MoveMode::Normal => Color::srgba(0.9, 0.9, 0.9, alpha),
        MoveMode::WallSliding => Color::srgba(0.6, 0.8, 0.95, alpha),
        MoveMode::WallGrabbing => Color::srgba(0.4, 0.6, 0.95, alpha),
        MoveMode::Dashing => Color::srgba(0.95, 0.85, 0.4, alpha),
        MoveMode::Dead => Color::srgba(0.4, 0.1, 0.1, 1.0),
    }
}

pub(crate) fn update_character_visuals(
    mut query: Query<(&CharacterController, &mut AnimationParams, &mut Sprite), With<Player>>,
) {
    for (controller, mut params, mut sprite) in &mut query {
        let next = controller.animation_params();
        if *params != next {
            *params = next;
        }
        sprite.color = mode_color(controller);
    }
}
