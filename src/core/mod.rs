//! Core domain: camera bootstrap, feedback cues, and timer scheduling.

mod feedback;
mod timers;


pub use feedback::{AudioLoops, Cue, CueEvent, FeedbackSink, LoopAction, LoopSound};
pub use timers::TimerQueue;

use bevy::prelude::*;

use crate::core::feedback::log_cues;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CueEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(PostUpdate, log_cues);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
