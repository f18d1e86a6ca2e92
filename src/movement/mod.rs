//! Movement domain: character controller plugin wiring and public exports.

mod bootstrap;
mod components;
mod controller;
#[cfg(feature = "dev-tools")]
mod dev;
mod resources;
mod systems;


pub use components::{
    AnimationParams, CharacterState, DashState, DashTarget, Facing, GameLayer, Ground, MoveMode,
    Player, TargetId, TriggerTag, Wall, WallHit,
};
pub use controller::{
    CapsuleSweep, CharacterController, ContactQueryResult, FrameInput, JumpKind, SpatialQueries,
    SweepHit, TickClock, TickReport, TriggerResponse, ground_probe, query_contacts, select_target,
    wall_probe,
};
pub use resources::{MovementConfig, MovementInput};

use bevy::prelude::*;

use crate::movement::bootstrap::spawn_player;
#[cfg(feature = "dev-tools")]
use crate::movement::dev::{draw_detection_probes, respawn_on_hotkey, spawn_test_room};
use crate::movement::systems::{
    read_input, route_trigger_events, run_character_controllers, update_character_visuals,
};

/// Ordering for the per-frame character pipeline.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSet {
    Input,
    Tick,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .configure_sets(Update, (MovementSet::Input, MovementSet::Tick).chain())
            .add_systems(Startup, spawn_player)
            .add_systems(Update, read_input.in_set(MovementSet::Input))
            .add_systems(
                Update,
                (
                    route_trigger_events,
                    run_character_controllers,
                    update_character_visuals,
                )
                    .chain()
                    .in_set(MovementSet::Tick),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, spawn_test_room).add_systems(
            Update,
            (
                respawn_on_hotkey.before(MovementSet::Input),
                draw_detection_probes.after(MovementSet::Tick),
            ),
        );
    }
}
