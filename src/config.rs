//! Runtime configuration loaded from `assets/sim.toml`.
//!
//! Every key is optional: [`SimConfig`] and its sections carry
//! `#[serde(default)]`, so a file only needs the values it overrides.
//!
//! ```toml
//! fixed_step_s = 0.02
//!
//! [pendulum]
//! angle_deg = 35.0
//!
//! [projectile]
//! gravity = "moon"
//!
//! [projectile.rest]
//! mode = "one_shot"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::launcher::LauncherSettings;
use crate::core::pendulum::{
    DEFAULT_ANGLE_DEG, DEFAULT_DAMPING, DEFAULT_GRAVITY_MPS2, DEFAULT_LENGTH_M,
};
use crate::error::{SimError, SimResult};

pub const DEFAULT_CONFIG_PATH: &str = "assets/sim.toml";
pub const DEFAULT_FIXED_STEP_S: f32 = 1.0 / 60.0;
const MAX_FIXED_STEP_S: f32 = 0.1;
/// One hour of swing; longer headless runs are refused.
pub const MAX_RUN_SECONDS: f32 = 3_600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub fixed_step_s: f32,
    pub pendulum: PendulumSettings,
    pub projectile: LauncherSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_step_s: DEFAULT_FIXED_STEP_S,
            pendulum: PendulumSettings::default(),
            projectile: LauncherSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumSettings {
    pub gravity: f32,
    pub damping: f32,
    pub angle_deg: f32,
    pub length_m: f32,
    /// How long a headless run lasts.
    pub run_seconds: f32,
}

impl Default for PendulumSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY_MPS2,
            damping: DEFAULT_DAMPING,
            angle_deg: DEFAULT_ANGLE_DEG,
            length_m: DEFAULT_LENGTH_M,
            run_seconds: 20.0,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> SimResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| SimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file. A missing file is an error here;
    /// see [`load_or_default`] for the lenient variant.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        info!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    /// Values the simulation clamps silently are fine here; these checks
    /// catch settings that would stall or blow up a headless run.
    pub fn validate(&self) -> SimResult<()> {
        check(
            "fixed_step_s",
            self.fixed_step_s,
            self.fixed_step_s > 0.0 && self.fixed_step_s <= MAX_FIXED_STEP_S,
            "must be in (0, 0.1]",
        )?;
        check(
            "pendulum.run_seconds",
            self.pendulum.run_seconds,
            (0.0..=MAX_RUN_SECONDS).contains(&self.pendulum.run_seconds),
            "must be in [0, 3600]",
        )?;
        check(
            "pendulum.damping",
            self.pendulum.damping,
            self.pendulum.damping > 0.0 && self.pendulum.damping <= 1.0,
            "must be in (0, 1]",
        )?;
        let projectile = &self.projectile;
        check(
            "projectile.auto_despawn_s",
            projectile.auto_despawn_s,
            projectile.auto_despawn_s.is_finite() && projectile.auto_despawn_s > 0.0,
            "must be positive",
        )?;
        check(
            "projectile.rest.check_delay_s",
            projectile.rest.check_delay_s,
            projectile.rest.check_delay_s > 0.0,
            "must be positive",
        )?;
        check(
            "projectile.rest.velocity_threshold",
            projectile.rest.velocity_threshold,
            projectile.rest.velocity_threshold >= 0.0,
            "must not be negative",
        )?;
        check(
            "projectile.floor.restitution",
            projectile.floor.restitution,
            (0.0..=1.0).contains(&projectile.floor.restitution),
            "must be in [0, 1]",
        )?;
        check(
            "projectile.floor.friction",
            projectile.floor.friction,
            projectile.floor.friction >= 0.0,
            "must not be negative",
        )
    }
}

fn check(name: &'static str, value: f32, ok: bool, reason: &'static str) -> SimResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidSetting {
            name,
            value,
            reason,
        })
    }
}

/// Loads `path` if it exists, falling back to defaults when it is absent or
/// unusable.
pub fn load_or_default(path: impl AsRef<Path>) -> SimConfig {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "no config file found; using compiled defaults");
        return SimConfig::default();
    }
    match SimConfig::load(path) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "using compiled defaults");
            SimConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{MAX_RUN_SECONDS, SimConfig};
    use crate::core::flight::RestCheck;
    use crate::core::gravity::GravityPreset;
    use crate::error::SimError;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = SimConfig::from_toml_str("", Path::new("sim.toml")).expect("valid");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn nested_sections_override_single_keys() {
        let config = SimConfig::from_toml_str(
            r#"
            [pendulum]
            angle_deg = 35.0

            [projectile]
            gravity = "moon"

            [projectile.rest]
            mode = "one_shot"
            "#,
            Path::new("sim.toml"),
        )
        .expect("valid");

        assert_eq!(config.pendulum.angle_deg, 35.0);
        assert_eq!(config.pendulum.length_m, 2.0);
        assert_eq!(config.projectile.gravity, GravityPreset::Moon);
        assert_eq!(config.projectile.rest.mode, RestCheck::OneShot);
        assert_eq!(config.projectile.rest.check_delay_s, 0.25);
    }

    #[test]
    fn rejects_zero_step() {
        let err = SimConfig::from_toml_str("fixed_step_s = 0.0", Path::new("sim.toml"))
            .expect_err("zero step is invalid");
        assert!(matches!(
            err,
            SimError::InvalidSetting {
                name: "fixed_step_s",
                ..
            }
        ));
    }

    #[test]
    fn rejects_oversized_run() {
        let err = SimConfig::from_toml_str(
            "[pendulum]\nrun_seconds = 1e30",
            Path::new("sim.toml"),
        )
        .expect_err("run too long");
        assert!(matches!(
            err,
            SimError::InvalidSetting {
                name: "pendulum.run_seconds",
                ..
            }
        ));

        let mut config = SimConfig::default();
        config.pendulum.run_seconds = f32::INFINITY;
        assert!(config.validate().is_err());
        config.pendulum.run_seconds = MAX_RUN_SECONDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = SimConfig::from_toml_str("fixed_step_s = [", Path::new("conf/bad.toml"))
            .expect_err("malformed");
        assert!(err.to_string().contains("conf/bad.toml"));
    }
}
