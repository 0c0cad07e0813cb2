//! Default values for every configurable threshold and hyperparameter.

// Selection
pub const DEFAULT_MIN_COMMON_GROUND_PROB: f64 = 0.6;
pub const DEFAULT_MAJORITY_MIN_COMMON_GROUND_PROB: f64 = 0.7;
pub const DEFAULT_MIN_AGREE_PROB_DIFFERENCE: f64 = 0.3;
pub const DEFAULT_MIN_UNCERTAINTY_PROB: f64 = 0.2;
pub const DEFAULT_MIN_VOTE_COUNT: u64 = 20;
pub const DEFAULT_MAX_SAMPLE_SIZE: usize = 12;
pub const DEFAULT_MIN_DIFFERENCE_PROB: f64 = 0.4;
pub const DEFAULT_MAX_DIFFERENCE_PROB: f64 = 0.6;

// Factorization
pub const DEFAULT_NUM_FACTORS: usize = 1;
pub const DEFAULT_EPOCHS: usize = 400;
pub const DEFAULT_LEARNING_RATES: [f64; 4] = [0.05, 0.01, 0.002, 0.0004];
pub const DEFAULT_LAMBDA_I: f64 = 0.15;
pub const DEFAULT_LAMBDA_F: f64 = 0.03;
pub const DEFAULT_LOG_EVERY: usize = 10;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
