use serde::{Deserialize, Serialize};

use super::defaults;

/// Hyperparameters for the helpfulness matrix factorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorizationConfig {
    /// Dimensionality of the user and note factor vectors.
    pub num_factors: usize,
    /// Full-batch gradient steps per learning rate.
    pub epochs: usize,
    /// Learning rate schedule; a fresh optimizer runs for each entry.
    pub learning_rates: Vec<f64>,
    /// Intercept regularization (applies to user, note and global intercepts).
    pub lambda_i: f64,
    /// Factor regularization.
    pub lambda_f: f64,
    /// RNG seed for parameter initialization. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Log the loss every this many steps. 0 disables loss logging.
    pub log_every: usize,
}

impl Default for FactorizationConfig {
    fn default() -> Self {
        Self {
            num_factors: defaults::DEFAULT_NUM_FACTORS,
            epochs: defaults::DEFAULT_EPOCHS,
            learning_rates: defaults::DEFAULT_LEARNING_RATES.to_vec(),
            lambda_i: defaults::DEFAULT_LAMBDA_I,
            lambda_f: defaults::DEFAULT_LAMBDA_F,
            seed: None,
            log_every: defaults::DEFAULT_LOG_EVERY,
        }
    }
}
