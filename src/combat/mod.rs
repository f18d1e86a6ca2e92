//! Combat domain: health, damage and recovery sequencing, death.

mod components;
mod damage;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{Hazard, Health, HealthView};
pub use damage::{DamageError, DamageOutcome, RecoveryTimer};
pub use events::{DamageEvent, DeathEvent};

use bevy::prelude::*;

use crate::combat::systems::{apply_damage, detect_hazard_contacts, report_deaths};
use crate::movement::MovementSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                Update,
                (detect_hazard_contacts, apply_damage, report_deaths)
                    .chain()
                    .after(MovementSet::Tick),
            );
    }
}
