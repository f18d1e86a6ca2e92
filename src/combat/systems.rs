//! Combat domain: hazard contacts, damage application, and death reporting.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Hazard, Health};
use crate::combat::damage::DamageOutcome;
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::core::{Cue, CueEvent};
use crate::movement::{CharacterController, MovementConfig, Player};

pub(crate) fn detect_hazard_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    hazards: Query<&Hazard>,
    players: Query<(), With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hazard_entity, target) in pairs {
            let Ok(hazard) = hazards.get(hazard_entity) else {
                continue;
            };
            if players.get(target).is_err() {
                continue;
            }
            damage_events.write(DamageEvent {
                source: hazard_entity,
                target,
                amount: hazard.damage,
                stun: hazard.stun,
            });
        }
    }
}

pub(crate) fn apply_damage(
    time: Res<Time>,
    config: Res<MovementConfig>,
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut cue_events: MessageWriter<CueEvent>,
    mut query: Query<(&mut CharacterController, &mut Health, &mut LinearVelocity)>,
) {
    let now = time.elapsed_secs();

    for event in damage_events.read() {
        let Ok((mut controller, mut health, mut velocity)) = query.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }
        debug!(
            "{:?} takes {} damage from {:?}",
            event.target, event.amount, event.source
        );

        let mut cues: Vec<Cue> = Vec::new();
        let outcome = controller.take_damage(
            event.amount,
            event.stun,
            &mut *health,
            &config,
            now,
            &mut cues,
        );

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { .. } => {
                velocity.0 = controller.state.velocity;
            }
            DamageOutcome::Killed => {
                death_events.write(DeathEvent {
                    entity: event.target,
                });
            }
        }

        for cue in cues {
            cue_events.write(CueEvent {
                entity: event.target,
                cue,
            });
        }
    }
}

pub(crate) fn report_deaths(mut death_events: MessageReader<DeathEvent>) {
    for event in death_events.read() {
        info!("You have died ({:?})", event.entity);
    }
}
