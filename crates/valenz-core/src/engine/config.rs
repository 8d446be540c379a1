use thiserror::Error;

pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000;
pub const DEFAULT_P_LOCAL: f64 = 0.5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("p_local must lie in [0, 1], got {0}")]
    InvalidPLocal(f64),

    #[error("max_iterations must be positive")]
    ZeroIterations,
}

/// Parameters of a single search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Iteration budget; the search stops after this many mutation steps.
    pub max_iterations: u64,
    /// Probability of choosing local drift over the global drift each step.
    pub p_local: f64,
    /// Seed for the search's random generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Whether to record the best-valence trace.
    pub record_trace: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            p_local: DEFAULT_P_LOCAL,
            seed: None,
            record_trace: true,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.p_local) {
            return Err(ConfigError::InvalidPLocal(self.p_local));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    /// Returns a copy with a different seed, leaving every other field as is.
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    max_iterations: Option<u64>,
    p_local: Option<f64>,
    seed: Option<u64>,
    record_trace: Option<bool>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn p_local(mut self, probability: f64) -> Self {
        self.p_local = Some(probability);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
    pub fn record_trace(mut self, record: bool) -> Self {
        self.record_trace = Some(record);
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        let defaults = SearchConfig::default();
        let config = SearchConfig {
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            p_local: self.p_local.unwrap_or(defaults.p_local),
            seed: self.seed,
            record_trace: self.record_trace.unwrap_or(defaults.record_trace),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = SearchConfigBuilder::new().build().unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_iterations, 100_000);
        assert_eq!(config.p_local, 0.5);
    }

    #[test]
    fn builder_rejects_out_of_range_probability() {
        let err = SearchConfigBuilder::new().p_local(1.5).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidPLocal(1.5));
        assert!(SearchConfigBuilder::new().p_local(f64::NAN).build().is_err());
    }

    #[test]
    fn builder_rejects_zero_budget() {
        let err = SearchConfigBuilder::new().max_iterations(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroIterations);
    }

    #[test]
    fn with_seed_only_replaces_the_seed() {
        let config = SearchConfigBuilder::new()
            .max_iterations(10)
            .p_local(1.0)
            .build()
            .unwrap();
        let seeded = config.with_seed(Some(4));
        assert_eq!(seeded.seed, Some(4));
        assert_eq!(seeded.max_iterations, 10);
        assert_eq!(seeded.p_local, 1.0);
    }
}
