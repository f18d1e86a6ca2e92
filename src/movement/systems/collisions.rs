//! Movement domain: avian2d spatial-query adapter and trigger routing.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::DeathEvent;
use crate::core::{Cue, CueEvent};
use crate::movement::{
    CapsuleSweep, CharacterController, GameLayer, Player, SpatialQueries, SweepHit, TriggerResponse,
    TriggerTag, WallHit,
};

/// Upper bound on dash-target candidates per sweep
const MAX_TARGET_HITS: u32 = 16;

/// Backs the controller's queries with avian's spatial query pipeline.
pub(crate) struct AvianQueries<'a, 'w, 's, F> {
    spatial: &'a SpatialQuery<'w, 's>,
    /// Resolves a swept entity to its world position
    target_position: F,
}

impl<'a, 'w, 's, F> AvianQueries<'a, 'w, 's, F>
where
    F: Fn(Entity) -> Option<Vec2>,
{
    pub(crate) fn new(spatial: &'a SpatialQuery<'w, 's>, target_position: F) -> Self {
        Self {
            spatial,
            target_position,
        }
    }
}

impl<F> SpatialQueries for AvianQueries<'_, '_, '_, F>
where
    F: Fn(Entity) -> Option<Vec2>,
{
    fn overlap_circle(&self, center: Vec2, radius: f32, layer: GameLayer) -> bool {
        let filter = SpatialQueryFilter::from_mask(layer);
        !self
            .spatial
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
            .is_empty()
    }

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: GameLayer,
    ) -> Option<WallHit> {
        let direction = Dir2::new(direction).ok()?;
        let filter = SpatialQueryFilter::from_mask(layer);

        self.spatial
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| WallHit {
                point: origin + *direction * hit.distance,
                normal: hit.normal,
            })
    }

    fn sweep_capsule(&self, sweep: &CapsuleSweep, layer: GameLayer) -> Vec<SweepHit> {
        let Ok(direction) = Dir2::new(sweep.direction) else {
            return Vec::new();
        };
        let shape = Collider::capsule(sweep.radius, sweep.half_extent * 2.0);
        let config = ShapeCastConfig::from_max_distance(sweep.max_distance);
        let filter = SpatialQueryFilter::from_mask(layer);

        self.spatial
            .shape_hits(
                &shape,
                sweep.origin,
                0.0,
                direction,
                MAX_TARGET_HITS,
                &config,
                &filter,
            )
            .into_iter()
            .filter_map(|hit| {
                (self.target_position)(hit.entity).map(|position| SweepHit {
                    target: hit.entity.into(),
                    position,
                })
            })
            .collect()
    }
}

/// Feed tagged trigger/collision enters to the player's controller.
pub(crate) fn route_trigger_events(
    mut collision_events: MessageReader<CollisionStart>,
    mut death_events: MessageWriter<DeathEvent>,
    mut cue_events: MessageWriter<CueEvent>,
    tags: Query<&TriggerTag>,
    mut players: Query<&mut CharacterController, With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (tagged, player) in pairs {
            let Ok(tag) = tags.get(tagged) else {
                continue;
            };
            let Ok(mut controller) = players.get_mut(player) else {
                continue;
            };

            let mut cues: Vec<Cue> = Vec::new();
            let response = controller.on_trigger_enter(*tag, &mut cues);
            if response == TriggerResponse::Died {
                death_events.write(DeathEvent { entity: player });
            }
            for cue in cues {
                cue_events.write(CueEvent {
                    entity: player,
                    cue,
                });
            }
        }
    }
}
