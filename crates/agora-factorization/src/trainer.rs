//! Full-batch training loop.

use std::collections::BTreeSet;

use agora_core::config::FactorizationConfig;
use agora_core::errors::FactorizationError;
use agora_core::models::Rating;
use agora_observability::factorization_span;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adam::Adam;
use crate::cancellation::CancellationToken;
use crate::model::{FactorModel, ModelShape, Observation};
use crate::FactorizationResult;

/// Everything learned by one training run, copied out of the trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub shape: ModelShape,
    pub mu: f64,
    pub user_intercepts: Vec<f64>,
    /// Helpfulness scores, indexed by note id.
    pub note_intercepts: Vec<f64>,
    pub user_factors: Vec<Vec<f64>>,
    pub note_factors: Vec<Vec<f64>>,
    pub final_loss: f64,
    pub steps: usize,
}

impl TrainingReport {
    fn from_model(model: &FactorModel, final_loss: f64, steps: usize) -> Self {
        let shape = model.shape();
        Self {
            shape,
            mu: model.mu(),
            user_intercepts: model.user_intercepts().to_vec(),
            note_intercepts: model.note_intercepts().to_vec(),
            user_factors: (0..shape.num_users)
                .map(|u| model.user_factor(u).to_vec())
                .collect(),
            note_factors: (0..shape.num_notes)
                .map(|n| model.note_factor(n).to_vec())
                .collect(),
            final_loss,
            steps,
        }
    }
}

/// Fits the helpfulness model. Owns its parameters only for the duration of [`train`](Self::train).
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: FactorizationConfig,
    cancellation: CancellationToken,
}

impl Trainer {
    pub fn new(config: FactorizationConfig) -> Self {
        Self {
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Check `token` between optimizer steps.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &FactorizationConfig {
        &self.config
    }

    /// Train on `ratings` and return every learned parameter.
    ///
    /// Row counts are inferred as `max id + 1`. Ids that never occur still
    /// get a randomly initialized row; those rows receive no gradient and
    /// keep their initial values.
    pub fn train(&self, ratings: &[Rating]) -> FactorizationResult<TrainingReport> {
        self.validate_config()?;
        let observations = validate_ratings(ratings)?;
        let shape = infer_shape(&observations, self.config.num_factors);
        let _span = factorization_span!(observations.len(), shape.num_factors).entered();

        warn_untouched_rows(&observations, shape);
        info!(
            ratings = observations.len(),
            num_users = shape.num_users,
            num_notes = shape.num_notes,
            num_factors = shape.num_factors,
            "training helpfulness model"
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut model = FactorModel::random(shape, &mut rng);
        let mut grads = vec![0.0; shape.param_count()];
        let (lambda_i, lambda_f) = (self.config.lambda_i, self.config.lambda_f);

        let mut steps = 0;
        for &rate in &self.config.learning_rates {
            debug!(learning_rate = rate, "starting learning rate stage");
            let mut optimizer = Adam::new(rate, shape.param_count());
            for epoch in 0..self.config.epochs {
                if self.cancellation.is_cancelled() {
                    warn!(steps, "training cancelled");
                    return Err(FactorizationError::Cancelled { steps });
                }
                model.gradient(&observations, lambda_i, lambda_f, &mut grads);
                optimizer.step(model.params_mut(), &grads);
                steps += 1;

                let log_every = self.config.log_every;
                if log_every > 0 && (epoch + 1) % log_every == 0 {
                    debug!(
                        learning_rate = optimizer.learning_rate(),
                        epoch = epoch + 1,
                        loss = model.loss(&observations, lambda_i, lambda_f),
                        "training progress"
                    );
                }
            }
        }

        let final_loss = model.loss(&observations, lambda_i, lambda_f);
        info!(steps, final_loss, "helpfulness model trained");
        Ok(TrainingReport::from_model(&model, final_loss, steps))
    }

    fn validate_config(&self) -> FactorizationResult<()> {
        if self.config.num_factors == 0 {
            return Err(FactorizationError::InvalidFactorCount);
        }
        if self.config.learning_rates.is_empty() {
            return Err(FactorizationError::EmptySchedule);
        }
        if let Some(&rate) = self
            .config
            .learning_rates
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            return Err(FactorizationError::InvalidLearningRate { rate });
        }
        Ok(())
    }
}

/// Train with `config` and return the note intercepts, indexed by note id.
pub fn helpfulness_scores(
    ratings: &[Rating],
    config: &FactorizationConfig,
) -> FactorizationResult<Vec<f64>> {
    Ok(Trainer::new(config.clone()).train(ratings)?.note_intercepts)
}

fn validate_ratings(ratings: &[Rating]) -> FactorizationResult<Vec<Observation>> {
    if ratings.is_empty() {
        return Err(FactorizationError::EmptyRatings);
    }
    ratings
        .iter()
        .enumerate()
        .map(|(index, r)| {
            let user = row_index(r.user_id, "user id", index)?;
            let note = row_index(r.note_id, "note id", index)?;
            if !r.rating.is_finite() {
                return Err(FactorizationError::NonFiniteRating {
                    index,
                    value: r.rating,
                });
            }
            Ok(Observation {
                user,
                note,
                rating: r.rating,
            })
        })
        .collect()
}

fn row_index(id: i64, field: &'static str, index: usize) -> FactorizationResult<usize> {
    usize::try_from(id).map_err(|_| FactorizationError::NegativeId {
        field,
        value: id,
        index,
    })
}

fn infer_shape(observations: &[Observation], num_factors: usize) -> ModelShape {
    let max_user = observations.iter().map(|o| o.user).max().unwrap_or(0);
    let max_note = observations.iter().map(|o| o.note).max().unwrap_or(0);
    ModelShape {
        num_users: max_user + 1,
        num_notes: max_note + 1,
        num_factors,
    }
}

fn warn_untouched_rows(observations: &[Observation], shape: ModelShape) {
    let users: BTreeSet<usize> = observations.iter().map(|o| o.user).collect();
    let notes: BTreeSet<usize> = observations.iter().map(|o| o.note).collect();
    let untouched_users = shape.num_users - users.len();
    let untouched_notes = shape.num_notes - notes.len();
    if untouched_users > 0 || untouched_notes > 0 {
        warn!(
            untouched_users,
            untouched_notes,
            "ids never rated keep their random initialization; remap ids to avoid noise scores"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_is_max_id_plus_one() {
        let obs = validate_ratings(&[Rating::new(0, 4, 1.0), Rating::new(2, 1, 0.0)]).unwrap();
        let shape = infer_shape(&obs, 3);
        assert_eq!(shape.num_users, 3);
        assert_eq!(shape.num_notes, 5);
        assert_eq!(shape.num_factors, 3);
    }

    #[test]
    fn negative_ids_are_rejected() {
        let err = validate_ratings(&[Rating::new(0, 0, 1.0), Rating::new(-1, 0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            FactorizationError::NegativeId {
                field: "user id",
                value: -1,
                index: 1
            }
        ));
    }

    #[test]
    fn non_finite_ratings_are_rejected() {
        let err = validate_ratings(&[Rating::new(0, 0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, FactorizationError::NonFiniteRating { index: 0, .. }));
    }
}
