//! Input sampling: turns raw device intent into one tick's `FrameInput`.

use bevy::prelude::*;

use crate::movement::controller::locomotion::move_towards;
use crate::movement::{CharacterState, Facing, MovementInput};

/// One tick of sampled intent. Consumed by the pipeline and replaced next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Smoothed axes in [-1, 1]
    pub x: f32,
    pub y: f32,
    /// Discretized axes, -1/0/1
    pub raw_x: i8,
    pub raw_y: i8,
    pub jump_pressed: bool,
    /// Held jump doubles as the jump-assist ("hold to jump higher") input
    pub jump_held: bool,
    pub grab_held: bool,
    pub dash_pressed: bool,
}

impl FrameInput {
    /// Horizontal intent as a direction vector.
    pub fn horizontal_dir(&self) -> Vec2 {
        Vec2::new(self.x, 0.0)
    }

    /// Intent carried into a tick where no new input may be read.
    /// Axes and held buttons persist; rising edges never repeat.
    pub fn frozen(self) -> Self {
        Self {
            jump_pressed: false,
            dash_pressed: false,
            ..self
        }
    }
}

fn discretize(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Smoothed axis: follows the raw value at `sensitivity` per second,
/// snapping through zero on reversal.
fn smooth_axis(previous: f32, raw: f32, sensitivity: f32, dt: f32) -> f32 {
    let start = if raw != 0.0 && previous * raw < 0.0 {
        0.0
    } else {
        previous
    };
    move_towards(start, raw, sensitivity * dt).clamp(-1.0, 1.0)
}

pub(crate) fn sample(
    raw: &MovementInput,
    previous: &FrameInput,
    sensitivity: f32,
    dt: f32,
) -> FrameInput {
    let raw_x = raw.axis.x.clamp(-1.0, 1.0);
    let raw_y = raw.axis.y.clamp(-1.0, 1.0);

    FrameInput {
        x: smooth_axis(previous.x, raw_x, sensitivity, dt),
        y: smooth_axis(previous.y, raw_y, sensitivity, dt),
        raw_x: discretize(raw_x),
        raw_y: discretize(raw_y),
        jump_pressed: raw.jump_just_pressed,
        jump_held: raw.jump_held,
        grab_held: raw.grab_held,
        dash_pressed: raw.dash_just_pressed,
    }
}

/// Facing follows horizontal intent, except while pinned to a wall.
pub(crate) fn update_facing(state: &mut CharacterState, frame: &FrameInput) {
    if state.mode.on_wall() {
        return;
    }
    if let Some(facing) = Facing::from_x(frame.x) {
        state.facing = facing;
    }
}
