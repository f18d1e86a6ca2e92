//! Combat domain: health and damage-source components.

use bevy::prelude::*;

/// The health entity the controller reads from and damages.
/// The controller never owns its lifecycle.
pub trait HealthView {
    fn apply_damage(&mut self, amount: i32);
    fn current(&self) -> i32;
    /// Fraction of max health in [0, 1]
    fn percent(&self) -> f32;
}

/// Health component for damageable entities
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current.max(0));
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

impl HealthView for Health {
    fn apply_damage(&mut self, amount: i32) {
        self.take_damage(amount);
    }

    fn current(&self) -> i32 {
        self.current
    }

    fn percent(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }
}

/// Collider that damages the player on contact
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub damage: i32,
    pub stun: f32,
}
