//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::route_trigger_events;
pub(crate) use input::read_input;
pub(crate) use movement::{run_character_controllers, update_character_visuals};
