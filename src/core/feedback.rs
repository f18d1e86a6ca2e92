//! Core domain: fire-and-forget feedback cues for audio, animation, and UI.
//!
//! The controller never waits on these. Anything listening (an audio
//! backend, an animator, a HUD) reads [`CueEvent`] messages; failures on
//! that side are not the controller's concern.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

/// Looping sounds owned by a character for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopSound {
    Step,
    Heartbeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Resume,
    Pause,
    Release,
}

/// Named one-shot triggers emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Jump,
    AirJump,
    WallJump,
    Land,
    DashStart,
    DashEnd,
    WallSlideStart,
    WallSlideEnd,
    WallGrabStart,
    WallGrabEnd,
    Hit,
    Death,
    Vulnerable,
    Recovered,
    /// Heartbeat intensity parameter, health fraction in [0, 1]
    HeartbeatLevel(f32),
    Loop {
        sound: LoopSound,
        action: LoopAction,
    },
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::AirJump => "air-jump",
            Cue::WallJump => "wall-jump",
            Cue::Land => "land",
            Cue::DashStart => "dash-start",
            Cue::DashEnd => "dash-end",
            Cue::WallSlideStart => "wall-slide-start",
            Cue::WallSlideEnd => "wall-slide-end",
            Cue::WallGrabStart => "wall-grab-start",
            Cue::WallGrabEnd => "wall-grab-end",
            Cue::Hit => "hit",
            Cue::Death => "death",
            Cue::Vulnerable => "vulnerable",
            Cue::Recovered => "recovered",
            Cue::HeartbeatLevel(_) => "heartbeat-level",
            Cue::Loop {
                sound: LoopSound::Step,
                ..
            } => "step-loop",
            Cue::Loop {
                sound: LoopSound::Heartbeat,
                ..
            } => "heartbeat-loop",
        }
    }
}

/// Destination for cues. Implementations must not fail back into the caller.
pub trait FeedbackSink {
    fn cue(&mut self, cue: Cue);
}

impl FeedbackSink for Vec<Cue> {
    fn cue(&mut self, cue: Cue) {
        self.push(cue);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LoopState {
    #[default]
    Paused,
    Playing,
    Released,
}

/// Play state of the character's looping sounds.
///
/// Only state changes reach the sink, so callers can request `resume`
/// every tick without flooding the audio backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioLoops {
    step: LoopState,
    heartbeat: LoopState,
}

impl AudioLoops {
    fn slot(&mut self, sound: LoopSound) -> &mut LoopState {
        match sound {
            LoopSound::Step => &mut self.step,
            LoopSound::Heartbeat => &mut self.heartbeat,
        }
    }

    #[allow(dead_code)]
    pub fn is_playing(&self, sound: LoopSound) -> bool {
        let state = match sound {
            LoopSound::Step => self.step,
            LoopSound::Heartbeat => self.heartbeat,
        };
        state == LoopState::Playing
    }

    pub fn resume(&mut self, sound: LoopSound, sink: &mut dyn FeedbackSink) {
        self.transition(sound, LoopState::Playing, LoopAction::Resume, sink);
    }

    pub fn pause(&mut self, sound: LoopSound, sink: &mut dyn FeedbackSink) {
        self.transition(sound, LoopState::Paused, LoopAction::Pause, sink);
    }

    /// Release both loops. Released loops ignore every later request.
    pub fn release_all(&mut self, sink: &mut dyn FeedbackSink) {
        for sound in [LoopSound::Step, LoopSound::Heartbeat] {
            let slot = self.slot(sound);
            if *slot != LoopState::Released {
                *slot = LoopState::Released;
                sink.cue(Cue::Loop {
                    sound,
                    action: LoopAction::Release,
                });
            }
        }
    }

    fn transition(
        &mut self,
        sound: LoopSound,
        next: LoopState,
        action: LoopAction,
        sink: &mut dyn FeedbackSink,
    ) {
        let slot = self.slot(sound);
        if *slot == LoopState::Released || *slot == next {
            return;
        }
        *slot = next;
        sink.cue(Cue::Loop { sound, action });
    }
}

/// A cue tagged with the entity that produced it.
#[derive(Debug)]
pub struct CueEvent {
    pub entity: Entity,
    pub cue: Cue,
}

impl Message for CueEvent {}

/// Stand-in consumer until an audio backend is wired: surfaces cues in the log.
pub(crate) fn log_cues(mut cues: MessageReader<CueEvent>) {
    for event in cues.read() {
        match event.cue {
            Cue::HeartbeatLevel(level) => {
                trace!("{:?}: {} {:.2}", event.entity, event.cue.name(), level)
            }
            Cue::Loop { action, .. } => {
                trace!("{:?}: {} {:?}", event.entity, event.cue.name(), action)
            }
            _ => debug!("{:?}: {}", event.entity, event.cue.name()),
        }
    }
}
