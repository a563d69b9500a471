//! CLI configuration.
//!
//! Settings are layered: built-in defaults, then the TOML file named by
//! `--config` (optional), then `PRICER_` environment variables with `__`
//! between nested keys (`PRICER_GRID__ABSOLUTE_TOLERANCE=1e-3`).

use std::path::Path;

use config::{Config, Environment, File, FileFormat, Source};
use pricer_core::math::solvers::SolverConfig;
use pricer_optimiser::bootstrapping::BootstrapConfig;
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Root-find settings for hazard rate calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-15,
            max_iterations: 100,
        }
    }
}

/// Acceptance bar for a test-grid row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTolerances {
    pub absolute_tolerance: f64,
    pub relative_tolerance: f64,
}

impl Default for GridTolerances {
    fn default() -> Self {
        Self {
            absolute_tolerance: 2e-3,
            relative_tolerance: 2e-10,
        }
    }
}

impl GridTolerances {
    /// A row passes when both errors are inside the bar.
    pub fn accepts(&self, absolute_error: f64, relative_error: f64) -> bool {
        absolute_error <= self.absolute_tolerance && relative_error < self.relative_tolerance
    }
}

/// Settings for every `pricer` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub solver: SolverSettings,
    pub grid: GridTolerances,
    pub default_notional: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            grid: GridTolerances::default(),
            default_notional: 1.0e9,
        }
    }
}

impl CliConfig {
    /// Load from `path` (skipped when absent) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::layered(File::from(path).required(false))
    }

    /// Load from an in-memory TOML document and the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::layered(File::from_str(toml, FileFormat::Toml))
    }

    fn layered<S>(file: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config: Self = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("PRICER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.solver.tolerance > 0.0) || self.solver.max_iterations == 0 {
            return Err(CliError::InvalidArgument(format!(
                "solver tolerance {} and max_iterations {} must be positive",
                self.solver.tolerance, self.solver.max_iterations
            )));
        }
        if !(self.default_notional > 0.0) {
            return Err(CliError::InvalidArgument(format!(
                "default_notional {} must be positive",
                self.default_notional
            )));
        }
        Ok(())
    }

    /// Brent settings for the CDS method.
    pub fn solver_config(&self) -> SolverConfig<f64> {
        SolverConfig::new(self.solver.tolerance, self.solver.max_iterations)
    }

    /// Settings for the curve bootstrappers.
    pub fn bootstrap_config(&self) -> BootstrapConfig {
        BootstrapConfig::builder()
            .tolerance(self.solver.tolerance)
            .max_iterations(self.solver.max_iterations)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.solver.tolerance, 1e-15);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.grid.absolute_tolerance, 2e-3);
        assert_eq!(config.grid.relative_tolerance, 2e-10);
        assert_eq!(config.default_notional, 1.0e9);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            [grid]
            absolute_tolerance = 1e-2
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.absolute_tolerance, 1e-2);
        assert_eq!(config.grid.relative_tolerance, 2e-10);
        assert_eq!(config.solver, SolverSettings::default());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = CliConfig::load(Path::new("does/not/exist/pricer.toml")).unwrap();
        assert_eq!(config.default_notional, 1.0e9);
    }

    #[test]
    fn test_invalid_solver_rejected() {
        let err = CliConfig::from_toml_str(
            r#"
            [solver]
            max_iterations = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_grid_acceptance() {
        let tol = GridTolerances::default();
        assert!(tol.accepts(1e-3, 1e-10));
        assert!(!tol.accepts(3e-3, 1e-10));
        assert!(!tol.accepts(1e-3, 2e-10));
    }
}
