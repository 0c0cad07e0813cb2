//! Adam optimizer over a flat parameter vector.

/// Exponential decay of the first moment.
pub const BETA1: f64 = 0.9;
/// Exponential decay of the second moment.
pub const BETA2: f64 = 0.999;
pub const EPSILON: f64 = 1e-7;

/// Bias-corrected Adam state for one learning rate.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    first_moment: Vec<f64>,
    second_moment: Vec<f64>,
    beta1_power: f64,
    beta2_power: f64,
}

impl Adam {
    pub fn new(learning_rate: f64, len: usize) -> Self {
        Self {
            learning_rate,
            first_moment: vec![0.0; len],
            second_moment: vec![0.0; len],
            beta1_power: 1.0,
            beta2_power: 1.0,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Apply one update to `params` from `grads` (same length).
    pub fn step(&mut self, params: &mut [f64], grads: &[f64]) {
        debug_assert_eq!(params.len(), grads.len());
        debug_assert_eq!(params.len(), self.first_moment.len());

        self.beta1_power *= BETA1;
        self.beta2_power *= BETA2;
        let m_correction = 1.0 - self.beta1_power;
        let v_correction = 1.0 - self.beta2_power;

        for (((p, &g), m), v) in params
            .iter_mut()
            .zip(grads)
            .zip(self.first_moment.iter_mut())
            .zip(self.second_moment.iter_mut())
        {
            *m = BETA1 * *m + (1.0 - BETA1) * g;
            *v = BETA2 * *v + (1.0 - BETA2) * g * g;
            let m_hat = *m / m_correction;
            let v_hat = *v / v_correction;
            *p -= self.learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
        }
    }
}
