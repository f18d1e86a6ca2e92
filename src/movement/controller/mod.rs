//! Engine-independent character controller.
//!
//! One [`CharacterController::tick`] runs the whole pipeline in a fixed
//! order: due timers, input sampling, contact detection, locomotion, jump,
//! wall interaction, dash. Later stages read flags the earlier ones set,
//! and a dash overwrites whatever velocity wall interaction produced.
//! Collaborators (spatial queries, feedback sinks, health) are passed in
//! per call so the controller owns no engine handles.

mod contact;
mod dash;
mod input;
mod jump;
mod locomotion;
mod wall;

pub use contact::{
    CapsuleSweep, ContactQueryResult, SpatialQueries, SweepHit, ground_probe, query_contacts,
    wall_probe,
};
pub use dash::select_target;
pub use input::FrameInput;
pub use jump::JumpKind;

use bevy::prelude::*;

use crate::combat::RecoveryTimer;
use crate::core::{AudioLoops, FeedbackSink, TimerQueue};
use crate::movement::{
    AnimationParams, CharacterState, MovementConfig, MovementInput, TargetId, TriggerTag,
};

/// Simulation time for one tick, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    pub now: f32,
    pub dt: f32,
}

/// Notable transitions that happened during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub landed: bool,
    pub left_ground: bool,
    pub jump: Option<JumpKind>,
    pub dash_started: bool,
    pub dash_ended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerResponse {
    Died,
    HomingEnded,
    DashRearmed,
    Ignored,
}

#[derive(Component, Debug)]
pub struct CharacterController {
    pub state: CharacterState,
    pub timers: TimerQueue<RecoveryTimer>,
    pub(crate) loops: AudioLoops,
    pub(crate) frame: FrameInput,
}

impl CharacterController {
    /// A controller with no spawn protection.
    pub fn new(position: Vec2, config: &MovementConfig) -> Self {
        Self {
            state: CharacterState::new(position, config),
            timers: TimerQueue::new(),
            loops: AudioLoops::default(),
            frame: FrameInput::default(),
        }
    }

    /// A freshly spawned character, invincible for the configured spawn window.
    pub fn spawn(position: Vec2, config: &MovementConfig, now: f32) -> Self {
        let mut controller = Self::new(position, config);
        controller.start_invincibility(config.spawn_invincible_time, now);
        controller
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    pub fn tick(
        &mut self,
        raw: &MovementInput,
        config: &MovementConfig,
        queries: &dyn SpatialQueries,
        sink: &mut dyn FeedbackSink,
        clock: TickClock,
    ) -> TickReport {
        let mut report = TickReport::default();

        self.run_due_timers(clock.now, sink);

        if self.state.is_dead() {
            locomotion::apply_gravity(&mut self.state, config, clock.dt);
            return report;
        }

        self.frame = if self.state.input_enabled {
            input::sample(raw, &self.frame, config.axis_sensitivity, clock.dt)
        } else {
            self.frame.frozen()
        };
        input::update_facing(&mut self.state, &self.frame);

        let contacts = query_contacts(queries, config, self.state.position, self.state.facing);
        contact::apply_contacts(
            &mut self.state,
            contacts,
            &self.frame,
            config,
            clock.now,
            sink,
            &mut report,
        );

        locomotion::apply_gravity(&mut self.state, config, clock.dt);
        locomotion::apply_walking(
            &mut self.state,
            &self.frame,
            config,
            clock.dt,
            &mut self.loops,
            sink,
        );

        report.jump = jump::apply_jump(
            &mut self.state,
            &self.frame,
            config,
            clock.now,
            clock.dt,
            &mut self.loops,
            sink,
        );

        wall::apply_wall(&mut self.state, &self.frame, config, clock.now, sink);

        let dash = dash::apply_dash(
            &mut self.state,
            &self.frame,
            config,
            queries,
            clock.now,
            sink,
        );
        report.dash_started = dash.started;
        report.dash_ended = dash.ended;

        report
    }

    /// Route a tagged trigger/collision enter notification.
    pub fn on_trigger_enter(
        &mut self,
        tag: TriggerTag,
        sink: &mut dyn FeedbackSink,
    ) -> TriggerResponse {
        if self.is_dead() {
            return TriggerResponse::Ignored;
        }
        match tag {
            TriggerTag::Death => {
                self.die(sink);
                TriggerResponse::Died
            }
            TriggerTag::Target(target) => self.reach_target(target),
            TriggerTag::Generic => {
                dash::rearm(&mut self.state);
                TriggerResponse::DashRearmed
            }
        }
    }

    fn reach_target(&mut self, target: TargetId) -> TriggerResponse {
        if dash::end_homing(&mut self.state, target) {
            TriggerResponse::HomingEnded
        } else {
            TriggerResponse::Ignored
        }
    }

    pub fn animation_params(&self) -> AnimationParams {
        AnimationParams {
            grounded: self.state.grounded,
            walking: self.frame.x != 0.0 && self.state.grounded,
            climbing: self.state.mode.on_wall(),
            raw_y: self.frame.raw_y,
        }
    }

    /// Release held audio and drop pending timers before the character goes away.
    pub fn teardown(&mut self, sink: &mut dyn FeedbackSink) {
        self.loops.release_all(sink);
        self.timers.clear();
    }
}
