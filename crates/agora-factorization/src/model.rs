//! Parameter storage and the regularized least-squares objective.
//!
//! All five tensors live in one flat vector, laid out as
//! `[μ | user intercepts | note intercepts | user factors | note factors]`,
//! so a single optimizer can update them jointly.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// A validated rating with dense row indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub user: usize,
    pub note: usize,
    pub rating: f64,
}

/// Row counts and factor width of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelShape {
    pub num_users: usize,
    pub num_notes: usize,
    pub num_factors: usize,
}

impl ModelShape {
    /// Total number of scalar parameters.
    pub fn param_count(&self) -> usize {
        1 + self.num_users + self.num_notes + (self.num_users + self.num_notes) * self.num_factors
    }

    fn user_intercept(&self, u: usize) -> usize {
        1 + u
    }

    fn note_intercept(&self, n: usize) -> usize {
        1 + self.num_users + n
    }

    fn user_factors(&self, u: usize) -> usize {
        1 + self.num_users + self.num_notes + u * self.num_factors
    }

    fn note_factors(&self, n: usize) -> usize {
        1 + self.num_users
            + self.num_notes
            + self.num_users * self.num_factors
            + n * self.num_factors
    }
}

/// Global intercept, per-row intercepts and per-row factor vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorModel {
    shape: ModelShape,
    params: Vec<f64>,
}

impl FactorModel {
    /// μ = 0; every other parameter drawn from N(0, 1).
    pub fn random<R: Rng + ?Sized>(shape: ModelShape, rng: &mut R) -> Self {
        let mut params: Vec<f64> = (0..shape.param_count())
            .map(|_| rng.sample(StandardNormal))
            .collect();
        params[0] = 0.0;
        Self { shape, params }
    }

    pub fn shape(&self) -> ModelShape {
        self.shape
    }

    pub fn mu(&self) -> f64 {
        self.params[0]
    }

    pub fn user_intercepts(&self) -> &[f64] {
        let start = self.shape.user_intercept(0);
        &self.params[start..start + self.shape.num_users]
    }

    /// Helpfulness scores, indexed by note row.
    pub fn note_intercepts(&self) -> &[f64] {
        let start = self.shape.note_intercept(0);
        &self.params[start..start + self.shape.num_notes]
    }

    pub fn user_factor(&self, u: usize) -> &[f64] {
        let start = self.shape.user_factors(u);
        &self.params[start..start + self.shape.num_factors]
    }

    pub fn note_factor(&self, n: usize) -> &[f64] {
        let start = self.shape.note_factors(n);
        &self.params[start..start + self.shape.num_factors]
    }

    pub fn predict(&self, user: usize, note: usize) -> f64 {
        let dot: f64 = self
            .user_factor(user)
            .iter()
            .zip(self.note_factor(note))
            .map(|(a, b)| a * b)
            .sum();
        self.mu()
            + self.params[self.shape.user_intercept(user)]
            + self.params[self.shape.note_intercept(note)]
            + dot
    }

    /// Squared error plus per-rating regularization, summed over `observations`.
    ///
    /// Each observation contributes `λ_i(i_u² + i_n² + μ²) + λ_f(‖f_u‖² + ‖f_n‖²)`,
    /// so heavily rated rows are regularized proportionally harder.
    pub fn loss(&self, observations: &[Observation], lambda_i: f64, lambda_f: f64) -> f64 {
        let mu_sq = self.mu() * self.mu();
        observations
            .iter()
            .map(|o| {
                let err = o.rating - self.predict(o.user, o.note);
                let iu = self.params[self.shape.user_intercept(o.user)];
                let inote = self.params[self.shape.note_intercept(o.note)];
                let fu_sq: f64 = self.user_factor(o.user).iter().map(|x| x * x).sum();
                let fn_sq: f64 = self.note_factor(o.note).iter().map(|x| x * x).sum();
                err * err
                    + lambda_i * (iu * iu + inote * inote + mu_sq)
                    + lambda_f * (fu_sq + fn_sq)
            })
            .sum()
    }

    /// Write ∂loss/∂params into `grads` (overwritten, same length as the parameters).
    ///
    /// Rows never referenced by an observation get a zero gradient.
    pub fn gradient(
        &self,
        observations: &[Observation],
        lambda_i: f64,
        lambda_f: f64,
        grads: &mut [f64],
    ) {
        grads.iter_mut().for_each(|g| *g = 0.0);
        let k = self.shape.num_factors;
        let mu = self.mu();
        for o in observations {
            let err = o.rating - self.predict(o.user, o.note);
            let iu_idx = self.shape.user_intercept(o.user);
            let in_idx = self.shape.note_intercept(o.note);
            let fu_idx = self.shape.user_factors(o.user);
            let fn_idx = self.shape.note_factors(o.note);

            grads[0] += -2.0 * err + 2.0 * lambda_i * mu;
            grads[iu_idx] += -2.0 * err + 2.0 * lambda_i * self.params[iu_idx];
            grads[in_idx] += -2.0 * err + 2.0 * lambda_i * self.params[in_idx];
            for j in 0..k {
                let fu = self.params[fu_idx + j];
                let fnote = self.params[fn_idx + j];
                grads[fu_idx + j] += -2.0 * err * fnote + 2.0 * lambda_f * fu;
                grads[fn_idx + j] += -2.0 * err * fu + 2.0 * lambda_f * fnote;
            }
        }
    }

    pub(crate) fn params_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    #[cfg(test)]
    pub(crate) fn from_params(shape: ModelShape, params: Vec<f64>) -> Self {
        assert_eq!(params.len(), shape.param_count());
        Self { shape, params }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn shape() -> ModelShape {
        ModelShape {
            num_users: 2,
            num_notes: 3,
            num_factors: 2,
        }
    }

    fn observations() -> Vec<Observation> {
        vec![
            Observation { user: 0, note: 0, rating: 1.0 },
            Observation { user: 0, note: 2, rating: -1.0 },
            Observation { user: 1, note: 1, rating: 0.0 },
        ]
    }

    #[test]
    fn layout_covers_every_parameter() {
        assert_eq!(shape().param_count(), 1 + 2 + 3 + (2 + 3) * 2);
        let params = (0..shape().param_count()).map(|i| i as f64).collect();
        let model = FactorModel::from_params(shape(), params);
        assert_eq!(model.mu(), 0.0);
        assert_eq!(model.user_intercepts(), &[1.0, 2.0]);
        assert_eq!(model.note_intercepts(), &[3.0, 4.0, 5.0]);
        assert_eq!(model.user_factor(1), &[8.0, 9.0]);
        assert_eq!(model.note_factor(2), &[14.0, 15.0]);
    }

    #[test]
    fn mu_starts_at_zero() {
        let model = FactorModel::random(shape(), &mut StdRng::seed_from_u64(7));
        assert_eq!(model.mu(), 0.0);
        assert!(model.note_intercepts().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let model = FactorModel::random(shape(), &mut StdRng::seed_from_u64(11));
        let obs = observations();
        let (li, lf) = (0.15, 0.03);
        let mut grads = vec![0.0; shape().param_count()];
        model.gradient(&obs, li, lf, &mut grads);

        let h = 1e-6;
        for i in 0..shape().param_count() {
            let mut plus = model.clone();
            plus.params_mut()[i] += h;
            let mut minus = model.clone();
            minus.params_mut()[i] -= h;
            let numeric = (plus.loss(&obs, li, lf) - minus.loss(&obs, li, lf)) / (2.0 * h);
            assert!(
                (numeric - grads[i]).abs() < 1e-4,
                "param {i}: analytic {} vs numeric {numeric}",
                grads[i]
            );
        }
    }

    #[test]
    fn unreferenced_rows_have_zero_gradient() {
        let shape = ModelShape {
            num_users: 3,
            ..shape()
        };
        let model = FactorModel::random(shape, &mut StdRng::seed_from_u64(3));
        let mut grads = vec![0.0; shape.param_count()];
        model.gradient(&observations(), 0.15, 0.03, &mut grads);
        assert_eq!(grads[shape.user_intercept(2)], 0.0);
        assert!(grads[shape.user_factors(2)..shape.user_factors(2) + 2]
            .iter()
            .all(|g| *g == 0.0));
    }
}
