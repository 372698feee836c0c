/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timing configuration loading and validation.
//!
//! A run is parameterised by two clock rates and a fixed set of timing
//! constraints.  All values have defaults matching the 8 MHz CPU / 128 MHz
//! fabric bus reference design, so a configuration file only needs to name
//! the values it changes.
//!
//! The expected YAML structure is:
//! ```yaml
//! rates:
//!   cpu_rate_mhz: 8
//!   bus_rate_mhz: 128
//! constraints:
//!   t_address_setup: 40
//!   t_data_hold_pre: 10
//!   t_data_hold_post: 10
//!   t_min_data_setup: 30
//!   t_data_strobe: 10
//!   t_chip_select: 10
//! collision_policy: merge
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

// ── Validation errors ─────────────────────────────────────────────────────────

/// A configuration value that cannot be used to derive a schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A clock rate is zero, negative or not a finite number.
    #[error("clock rate '{name}' must be a positive finite frequency, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// A timing constraint is negative or not a finite number.
    #[error("timing constraint '{name}' must be a non-negative finite duration, got {value}ns")]
    InvalidDuration { name: &'static str, value: f64 },
}

// ── RateSpec ──────────────────────────────────────────────────────────────────

/// Processor and bus clock rates, both in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateSpec {
    pub cpu_rate_mhz: f64,
    pub bus_rate_mhz: f64,
}

impl Default for RateSpec {
    fn default() -> Self {
        Self {
            cpu_rate_mhz: 8.0,
            bus_rate_mhz: 128.0,
        }
    }
}

// ── ConstraintSet ─────────────────────────────────────────────────────────────

/// Setup / hold constraints in nanoseconds.  Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstraintSet {
    /// Address setup, measured from the start of the cycle.
    pub t_address_setup: f64,
    /// Data hold after the first-phase edge.
    pub t_data_hold_pre: f64,
    /// Data hold after the second-phase (phi2) edge.
    pub t_data_hold_post: f64,
    /// Minimum data setup after the phi2 edge.
    pub t_min_data_setup: f64,
    /// Data strobe duration before the end of the cycle.
    pub t_data_strobe: f64,
    /// Chip select duration before the end of the cycle.
    pub t_chip_select: f64,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            t_address_setup: 40.0,
            t_data_hold_pre: 10.0,
            t_data_hold_post: 10.0,
            t_min_data_setup: 30.0,
            t_data_strobe: 10.0,
            t_chip_select: 10.0,
        }
    }
}

impl ConstraintSet {
    /// `(option name, value)` pairs in declaration order.
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("t_address_setup", self.t_address_setup),
            ("t_data_hold_pre", self.t_data_hold_pre),
            ("t_data_hold_post", self.t_data_hold_post),
            ("t_min_data_setup", self.t_min_data_setup),
            ("t_data_strobe", self.t_data_strobe),
            ("t_chip_select", self.t_chip_select),
        ]
    }
}

// ── CollisionPolicy ───────────────────────────────────────────────────────────

/// What a label slot shows when several constraints land on the same tick.
///
/// Both policies keep every constraint in the slot; the policy only affects
/// the rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Join all names with `/`, in insertion order.
    #[default]
    Merge,
    /// Show only the constraint inserted last.
    LastWins,
}

// ── TimingConfig ──────────────────────────────────────────────────────────────

/// Complete input for one schedule derivation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub rates: RateSpec,
    pub constraints: ConstraintSet,
    pub collision_policy: CollisionPolicy,
}

impl TimingConfig {
    /// Parses a YAML document.  Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Returns an error if the YAML is structurally invalid or carries an
    /// unknown key.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: TimingConfig =
            serde_yaml::from_str(content).context("Failed to parse timing configuration")?;
        Ok(config)
    }

    /// Reads and parses `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading timing configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        debug!(?config, "Loaded timing configuration");
        Ok(config)
    }

    /// Checks that every rate is positive and every duration non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cpu_rate", self.rates.cpu_rate_mhz),
            ("bus_rate", self.rates.bus_rate_mhz),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }

        for (name, value) in self.constraints.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn default_config_matches_reference_design() {
        let cfg = TimingConfig::default();
        assert_eq!(cfg.rates.cpu_rate_mhz, 8.0);
        assert_eq!(cfg.rates.bus_rate_mhz, 128.0);
        assert_eq!(cfg.constraints.t_address_setup, 40.0);
        assert_eq!(cfg.constraints.t_min_data_setup, 30.0);
        assert_eq!(cfg.collision_policy, CollisionPolicy::Merge);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
rates:
  cpu_rate_mhz: 4
  bus_rate_mhz: 96
constraints:
  t_address_setup: 50
  t_data_hold_pre: 5
  t_data_hold_post: 15
  t_min_data_setup: 25
  t_data_strobe: 20
  t_chip_select: 30
collision_policy: last-wins
"#;
        let f = yaml_tempfile(yaml);
        let cfg = TimingConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.rates.cpu_rate_mhz, 4.0);
        assert_eq!(cfg.rates.bus_rate_mhz, 96.0);
        assert_eq!(cfg.constraints.t_address_setup, 50.0);
        assert_eq!(cfg.constraints.t_data_hold_pre, 5.0);
        assert_eq!(cfg.constraints.t_data_hold_post, 15.0);
        assert_eq!(cfg.constraints.t_chip_select, 30.0);
        assert_eq!(cfg.collision_policy, CollisionPolicy::LastWins);
    }

    #[test]
    fn bundled_sample_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/cpu8_fb128.yaml");
        let cfg = TimingConfig::load_from_file(&path).unwrap();
        assert_eq!(cfg, TimingConfig::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = TimingConfig::from_yaml_str("rates:\n  bus_rate_mhz: 64\n").unwrap();
        assert_eq!(cfg.rates.cpu_rate_mhz, 8.0);
        assert_eq!(cfg.rates.bus_rate_mhz, 64.0);
        assert_eq!(cfg.constraints, ConstraintSet::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = TimingConfig::from_yaml_str("constraints:\n  t_bogus: 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = TimingConfig::load_from_file(Path::new("/nonexistent/path/timing.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(TimingConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn zero_rate_fails_validation() {
        let mut cfg = TimingConfig::default();
        cfg.rates.bus_rate_mhz = 0.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidRate {
                name: "bus_rate",
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_duration_fails_validation() {
        let mut cfg = TimingConfig::default();
        cfg.constraints.t_chip_select = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDuration {
                name: "t_chip_select",
                ..
            })
        ));
    }

    #[test]
    fn nan_duration_fails_validation() {
        let mut cfg = TimingConfig::default();
        cfg.constraints.t_address_setup = f64::NAN;
        assert!(cfg.validate().is_err());
    }
}
