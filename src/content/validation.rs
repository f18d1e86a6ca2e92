//! Validation for loaded movement tuning values.

use crate::movement::MovementConfig;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub rule: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "movement config field '{}' = {} {}",
            self.field, self.value, self.rule
        )
    }
}

fn positive(value: f32) -> bool {
    value > 0.0
}

fn non_negative(value: f32) -> bool {
    value >= 0.0
}

fn unit_interval(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Helper macro for checking a single field against a predicate
macro_rules! check_field {
    ($errors:expr, $config:expr, $field:ident, $valid:ident, $rule:expr) => {
        if !$valid($config.$field) {
            $errors.push(ValidationError {
                field: stringify!($field),
                value: format!("{:?}", $config.$field),
                rule: $rule,
            });
        }
    };
}

/// Validate all movement tuning values.
/// Returns a list of validation errors, empty if the config is usable.
pub fn validate_movement_config(config: &MovementConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Detection
    check_field!(errors, config, grounder_radius, positive, "must be positive");
    check_field!(errors, config, wall_check_radius, positive, "must be positive");
    check_field!(errors, config, wall_ray_distance, positive, "must be positive");

    // Walking
    check_field!(errors, config, walk_speed, positive, "must be positive");
    check_field!(errors, config, acceleration, non_negative, "must not be negative");
    check_field!(errors, config, min_walking_penalty, unit_interval, "must be within [0, 1]");
    check_field!(errors, config, movement_lerp_speed, positive, "must be positive");
    check_field!(errors, config, axis_sensitivity, positive, "must be positive");

    // Jumping
    check_field!(errors, config, gravity, positive, "must be positive");
    check_field!(errors, config, jump_force, positive, "must be positive");
    check_field!(errors, config, fall_multiplier, non_negative, "must not be negative");
    check_field!(errors, config, wall_jump_lock, non_negative, "must not be negative");
    check_field!(errors, config, wall_jump_movement_lerp, positive, "must be positive");
    check_field!(errors, config, coyote_time, non_negative, "must not be negative");

    // Wall slide / grab
    check_field!(errors, config, slide_speed, positive, "must be positive");
    check_field!(errors, config, climb_speed_factor, unit_interval, "must be within [0, 1]");
    check_field!(errors, config, wall_snap_threshold, non_negative, "must not be negative");
    check_field!(errors, config, wall_snap_step, non_negative, "must not be negative");

    // Dash
    check_field!(errors, config, dash_speed, positive, "must be positive");
    check_field!(errors, config, dash_length, positive, "must be positive");
    check_field!(errors, config, dash_exit_vertical_cap, non_negative, "must not be negative");
    check_field!(errors, config, dash_target_cast_radius, positive, "must be positive");
    check_field!(errors, config, dash_target_cast_extent, non_negative, "must not be negative");
    check_field!(errors, config, dash_target_cast_distance, positive, "must be positive");

    // Damage
    check_field!(errors, config, invincible_time, non_negative, "must not be negative");
    check_field!(errors, config, spawn_invincible_time, non_negative, "must not be negative");
    check_field!(errors, config, recovery_tail, non_negative, "must not be negative");

    if config.max_health <= 0 {
        errors.push(ValidationError {
            field: "max_health",
            value: config.max_health.to_string(),
            rule: "must be positive",
        });
    }
    if !(0..=config.max_health).contains(&config.low_health_threshold) {
        errors.push(ValidationError {
            field: "low_health_threshold",
            value: config.low_health_threshold.to_string(),
            rule: "must be within [0, max_health]",
        });
    }

    // Probes must tell ground from wall
    if config.ground_layer == config.wall_layer {
        errors.push(ValidationError {
            field: "wall_layer",
            value: format!("{:?}", config.wall_layer),
            rule: "must differ from ground_layer",
        });
    }

    errors
}
