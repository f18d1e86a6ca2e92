//! Content domain: data-driven tuning loaded from `assets/data` at startup.

mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use loader::{ContentLoadError, MOVEMENT_CONFIG_FILE, load_movement_config, parse_single};
pub use validation::{ValidationError, validate_movement_config};

use bevy::prelude::*;
use std::path::Path;

use crate::movement::MovementConfig;

/// Directory holding the RON data files, relative to the working directory.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_config_or_default(Path::new(DATA_DIR)));
    }
}

/// Load and validate the movement tuning, falling back to defaults on any failure.
pub fn load_config_or_default(base_path: &Path) -> MovementConfig {
    let config = match load_movement_config(base_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using default movement config", e);
            return MovementConfig::default();
        }
    };

    let errors = validate_movement_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            error!("{}", e);
        }
        warn!(
            "Movement config has {} invalid fields; using defaults",
            errors.len()
        );
        return MovementConfig::default();
    }

    info!(
        "Loaded movement config: walk_speed={}, jump_force={}, single_jump_height={:.1}, dash_speed={}",
        config.walk_speed,
        config.jump_force,
        config.single_jump_height(),
        config.dash_speed
    );
    config
}
