//! Annealing configuration and temperature schedule.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Configuration for an annealing run.
///
/// The temperature at iteration `i` is
/// `(initial_temperature * (max_iterations - i) / max_iterations) ^ temperature_exponent`,
/// so with the defaults it falls from `0.1^5` towards 0 and acceptance of
/// worse tours is concentrated in the first part of the run.
///
/// # Examples
///
/// ```
/// use tour_anneal::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_max_iterations(20_000)
///     .with_drift_factor(5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.drift_bound(12), 60);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Fixed iteration budget per run.
    pub max_iterations: usize,

    /// Base of the schedule before the exponent is applied.
    pub initial_temperature: f64,

    /// Shape exponent of the schedule.
    pub temperature_exponent: i32,

    /// Non-improving iterations tolerated per point before the search is
    /// reset to the best-known tour.
    pub drift_factor: usize,

    /// Random seed for reproducibility. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            initial_temperature: 0.1,
            temperature_exponent: 5,
            drift_factor: 10,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_temperature_exponent(mut self, exponent: i32) -> Self {
        self.temperature_exponent = exponent;
        self
    }

    pub fn with_drift_factor(mut self, factor: usize) -> Self {
        self.drift_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Temperature at iteration `i` (0-based).
    pub fn temperature(&self, i: usize) -> f64 {
        let remaining = self.max_iterations.saturating_sub(i) as f64;
        (self.initial_temperature * remaining / self.max_iterations as f64)
            .powi(self.temperature_exponent)
    }

    /// Random source for a run: seeded from `seed`, or from OS entropy when
    /// no seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        }
    }

    /// Drift budget for a tour of `n` points.
    pub fn drift_bound(&self, n: usize) -> usize {
        self.drift_factor * n
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::invalid_config("max_iterations must be positive"));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(Error::invalid_config(format!(
                "initial_temperature must be finite and non-negative, got {}",
                self.initial_temperature
            )));
        }
        if self.temperature_exponent < 1 {
            return Err(Error::invalid_config(format!(
                "temperature_exponent must be at least 1, got {}",
                self.temperature_exponent
            )));
        }
        if self.drift_factor == 0 {
            return Err(Error::invalid_config("drift_factor must be positive"));
        }
        Ok(())
    }
}
