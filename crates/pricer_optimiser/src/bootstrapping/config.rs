//! Bootstrap configuration.

use pricer_core::math::solvers::SolverConfig;

/// Settings shared by the yield and hazard curve bootstrappers.
///
/// # Examples
///
/// ```
/// use pricer_optimiser::bootstrapping::BootstrapConfig;
///
/// let config = BootstrapConfig::default();
/// assert!(config.tolerance < 1e-10);
///
/// let config = BootstrapConfig::builder()
///     .tolerance(1e-14)
///     .max_iterations(200)
///     .allow_negative_rates(false)
///     .build();
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    /// Root-find tolerance on the pillar rate.
    ///
    /// Default: 1e-12
    pub tolerance: f64,

    /// Maximum root-find iterations per pillar.
    ///
    /// Default: 100
    pub max_iterations: usize,

    /// Bracket searched for a zero rate. Hazard rates are bracketed from
    /// zero upwards instead.
    ///
    /// Default: (-0.5, 1.0)
    pub rate_bracket: (f64, f64),

    /// Accept negative solved rates. When false a negative pillar fails
    /// with `NegativeRate`.
    ///
    /// Default: true
    pub allow_negative_rates: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 100,
            rate_bracket: (-0.5, 1.0),
            allow_negative_rates: true,
        }
    }
}

impl BootstrapConfig {
    /// Create a configuration builder for fluent construction.
    pub fn builder() -> BootstrapConfigBuilder {
        BootstrapConfigBuilder::default()
    }

    /// Brent settings derived from this configuration.
    pub fn solver_config(&self) -> SolverConfig<f64> {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

/// Builder for [`BootstrapConfig`].
#[derive(Debug, Clone, Default)]
pub struct BootstrapConfigBuilder {
    config: BootstrapConfig,
}

impl BootstrapConfigBuilder {
    /// Set the root-find tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the per-pillar iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the zero-rate search bracket.
    pub fn rate_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.config.rate_bracket = (lower, upper);
        self
    }

    /// Set whether negative rates are accepted.
    pub fn allow_negative_rates(mut self, allow: bool) -> Self {
        self.config.allow_negative_rates = allow;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> BootstrapConfig {
        self.config
    }
}
