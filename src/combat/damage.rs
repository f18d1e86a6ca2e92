//! Combat domain: damage application, invincibility, stun recovery, and death.

use bevy::prelude::*;

use crate::combat::HealthView;
use crate::core::{Cue, FeedbackSink, LoopSound};
use crate::movement::{CharacterController, MoveMode, MovementConfig};

/// Timers owned by a character. Each key has at most one pending expiry;
/// re-arming a key replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryTimer {
    /// Restores the damageable flag
    Invincibility,
    /// Re-enables input once the stun wears off
    InputRestore,
    /// Closes the hurt sequence shortly after input returns
    RecoveryComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Not damageable (or already dead); nothing changed
    Ignored,
    Hurt { remaining: i32 },
    Killed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DamageError {
    UnsupportedEntryPoint { amount: i32, stun: f32 },
}

impl std::fmt::Display for DamageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageError::UnsupportedEntryPoint { amount, stun } => write!(
                f,
                "no damage done (amount={}, stun={}): hurt() is unsupported, use take_damage()",
                amount, stun
            ),
        }
    }
}

impl std::error::Error for DamageError {}

impl CharacterController {
    /// Apply a hit. Ignored entirely while not damageable.
    pub fn take_damage(
        &mut self,
        amount: i32,
        stun: f32,
        health: &mut dyn HealthView,
        config: &MovementConfig,
        now: f32,
        sink: &mut dyn FeedbackSink,
    ) -> DamageOutcome {
        if self.is_dead() || !self.state.damageable {
            return DamageOutcome::Ignored;
        }

        sink.cue(Cue::Hit);
        health.apply_damage(amount);
        let remaining = health.current();

        if remaining <= 0 {
            self.die(sink);
            return DamageOutcome::Killed;
        }

        sink.cue(Cue::HeartbeatLevel(health.percent()));
        if remaining <= config.low_health_threshold {
            self.loops.resume(LoopSound::Heartbeat, sink);
        } else {
            self.loops.pause(LoopSound::Heartbeat, sink);
        }

        self.state.velocity = Vec2::ZERO;
        self.state.input_enabled = false;
        self.start_invincibility(config.invincible_time, now);
        self.start_recovery(stun, config.recovery_tail, now);

        info!(
            "Hit for {}: health={}, stunned for {:.2}s",
            amount, remaining, stun
        );
        DamageOutcome::Hurt { remaining }
    }

    /// Legacy damage entry point. Always refuses and says so.
    pub fn hurt(&self, amount: i32, stun: f32) -> Result<(), DamageError> {
        let err = DamageError::UnsupportedEntryPoint { amount, stun };
        error!("{}", err);
        Err(err)
    }

    /// Terminal transition. Later damage, jump, and dash requests are no-ops.
    pub fn die(&mut self, sink: &mut dyn FeedbackSink) {
        if self.is_dead() {
            return;
        }
        self.state.enter_mode(MoveMode::Dead, sink);
        self.state.input_enabled = false;
        // A dead body only falls
        self.state.velocity.x = 0.0;
        self.state.damageable = false;
        self.state.gravity_enabled = true;
        self.state.dash.homing = None;
        self.timers.clear();
        self.loops.release_all(sink);
        sink.cue(Cue::Death);
        info!("Character died at {:?}", self.state.position);
    }

    pub(crate) fn start_invincibility(&mut self, duration: f32, now: f32) {
        if !self.state.damageable {
            return;
        }
        self.state.damageable = false;
        self.timers
            .schedule(RecoveryTimer::Invincibility, now + duration);
        debug!("Invincible for {:.2}s", duration);
    }

    /// Restart the stun sequence; a second hit replaces the first one's timers.
    fn start_recovery(&mut self, stun: f32, tail: f32, now: f32) {
        let stun = stun.max(0.0);
        self.timers.schedule(RecoveryTimer::InputRestore, now + stun);
        self.timers
            .schedule(RecoveryTimer::RecoveryComplete, now + stun + tail);
    }

    pub(crate) fn run_due_timers(&mut self, now: f32, sink: &mut dyn FeedbackSink) {
        while let Some(timer) = self.timers.pop_due(now) {
            match timer {
                RecoveryTimer::Invincibility => {
                    self.state.damageable = true;
                    sink.cue(Cue::Vulnerable);
                    debug!("Damageable again");
                }
                RecoveryTimer::InputRestore => {
                    self.state.input_enabled = true;
                    debug!("Input restored after stun");
                }
                RecoveryTimer::RecoveryComplete => {
                    sink.cue(Cue::Recovered);
                    debug!("Recovery complete");
                }
            }
        }
    }
}
