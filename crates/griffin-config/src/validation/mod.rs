//! Full configuration validation.
//!
//! Checks numeric ranges and color formats, collecting every problem
//! into a single `ConfigError`.

mod helpers;


use crate::schema::GriffinConfig;
use griffin_common::{ConfigError, TabColor};

use helpers::check_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GriffinConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_window(&mut errors, config);
    validate_surfaces(&mut errors, config);
    validate_bounds(&mut errors, config);
    validate_grid(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_window(errors: &mut Vec<String>, config: &GriffinConfig) {
    check_range(errors, "window.width", config.window.width, 200..=16384);
    check_range(errors, "window.height", config.window.height, 200..=16384);
    if TabColor::parse(&config.window.background).is_none() {
        errors.push(format!(
            "window.background = {:?} is not a #RRGGBB color",
            config.window.background
        ));
    }
}

fn validate_surfaces(errors: &mut Vec<String>, config: &GriffinConfig) {
    let surfaces = &config.surfaces;
    check_range(
        errors,
        "surfaces.inactivity_timeout_minutes",
        surfaces.inactivity_timeout_minutes,
        0..=1440,
    );
    check_range(errors, "surfaces.sweep_interval_secs", surfaces.sweep_interval_secs, 5..=3600);
    if surfaces.user_agent.as_deref().is_some_and(|ua| ua.trim().is_empty()) {
        errors.push("surfaces.user_agent must not be blank".into());
    }
}

fn validate_bounds(errors: &mut Vec<String>, config: &GriffinConfig) {
    check_range(errors, "bounds.debounce_ms", config.bounds.debounce_ms, 0..=2000);
    check_range(errors, "bounds.min_visible_px", config.bounds.min_visible_px, 1..=100);
}

fn validate_grid(errors: &mut Vec<String>, config: &GriffinConfig) {
    check_range(errors, "grid.gap", config.grid.gap, 0..=32);
    check_range(errors, "grid.primary_ratio", config.grid.primary_ratio, 0.1..=0.9);
}
