use crate::error::{Error, Result};

/// Configuration options for a collapsed Gibbs sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct GibbsConfig {
    /// Number of topics, `T`.
    pub n_topics: usize,
    /// Total number of sweeps.
    pub n_samples: usize,
    /// Sweep index after which averaging may start.
    pub burnin: usize,
    /// Averaging stride.
    pub interval: usize,
    /// Starting document-topic concentration. Drawn from the randomness
    /// source when `None`.
    pub initial_alpha: Option<f64>,
    /// Starting topic-word concentration. Drawn from the randomness source
    /// when `None`.
    pub initial_beta: Option<f64>,
}

impl GibbsConfig {
    /// Create a new config with default values for n_samples (1000),
    /// burnin (100) and interval (10).
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            n_samples: 1000,
            burnin: 100,
            interval: 10,
            initial_alpha: None,
            initial_beta: None,
        }
    }

    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn with_burnin(mut self, burnin: usize) -> Self {
        self.burnin = burnin;
        self
    }

    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }

    /// Start from fixed concentrations instead of random draws.
    pub fn with_initial_hyperparameters(mut self, alpha: f64, beta: f64) -> Self {
        self.initial_alpha = Some(alpha);
        self.initial_beta = Some(beta);
        self
    }

    /// Whether sweep `s` contributes to the posterior mean.
    pub fn is_sampling_sweep(&self, s: usize) -> bool {
        s > self.burnin && s % self.interval == 0
    }

    /// Reject configurations that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.n_topics == 0 {
            return Err(Error::InvalidConfig(
                "number of topics must be positive".to_string(),
            ));
        }
        if self.n_samples <= self.burnin {
            return Err(Error::InvalidConfig(format!(
                "burn-in point ({}) must be smaller than the number of samples ({})",
                self.burnin, self.n_samples
            )));
        }
        if self.interval == 0 {
            return Err(Error::InvalidConfig(
                "sampling interval must be positive".to_string(),
            ));
        }
        for (name, value) in [("alpha", self.initial_alpha), ("beta", self.initial_beta)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "initial {} must be positive and finite, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GibbsConfig::new(5);
        assert!(config.validate().is_ok());
        assert_eq!(config.n_samples, 1000);
        assert_eq!(config.burnin, 100);
        assert_eq!(config.interval, 10);
    }

    #[test]
    fn test_burnin_not_below_samples_rejected() {
        let config = GibbsConfig::new(2).with_samples(5).with_burnin(10);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        let config = GibbsConfig::new(2).with_samples(10).with_burnin(10);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_topics_and_interval_rejected() {
        assert!(GibbsConfig::new(0).validate().is_err());
        assert!(GibbsConfig::new(2).with_interval(0).validate().is_err());
    }

    #[test]
    fn test_bad_initial_hyperparameters_rejected() {
        let config = GibbsConfig::new(2).with_initial_hyperparameters(0.0, 1.0);
        assert!(config.validate().is_err());
        let config = GibbsConfig::new(2).with_initial_hyperparameters(1.0, f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sampling_sweeps() {
        let config = GibbsConfig::new(2).with_samples(50).with_burnin(10).with_interval(5);
        let sweeps: Vec<usize> = (0..50).filter(|&s| config.is_sampling_sweep(s)).collect();
        assert_eq!(sweeps, vec![15, 20, 25, 30, 35, 40, 45]);
    }
}
