use serde::{Deserialize, Deserializer, Serialize};

use super::defaults;

/// Numeric thresholds that drive comment selection.
///
/// Each scoring strategy has its own named default set:
/// [`SelectionThresholds::majority_vote`] and [`SelectionThresholds::group_informed`].
/// `Default` is the group-informed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionThresholds {
    /// Minimum agree (or disagree) probability for common ground.
    pub min_common_ground_prob: f64,
    /// Minimum gap between one group's agree rate and the rest of the conversation.
    pub min_agree_prob_difference: f64,
    /// Static floor for the uncertainty filter, before the dynamic percentile raise.
    pub min_uncertainty_prob: f64,
    /// Comments with fewer total votes (passes included) are never scored.
    pub min_vote_count: u64,
    /// Default `k` for selections.
    pub max_sample_size: usize,
    /// Lower bound of the agree/disagree band for majority-vote differences of opinion.
    pub min_difference_prob: f64,
    /// Upper bound of the agree/disagree band for majority-vote differences of opinion.
    pub max_difference_prob: f64,
    /// Apply the +1/+2 pseudo-count prior to rates.
    pub as_probability_estimate: bool,
    /// Count passes in the denominator of pooled agree/disagree rates.
    pub include_passes: bool,
}

impl SelectionThresholds {
    /// Defaults for the majority-vote (ungrouped) strategy.
    pub fn majority_vote() -> Self {
        Self {
            min_common_ground_prob: defaults::DEFAULT_MAJORITY_MIN_COMMON_GROUND_PROB,
            include_passes: false,
            ..Self::group_informed()
        }
    }

    /// Defaults for the group-informed strategy.
    pub fn group_informed() -> Self {
        Self {
            min_common_ground_prob: defaults::DEFAULT_MIN_COMMON_GROUND_PROB,
            min_agree_prob_difference: defaults::DEFAULT_MIN_AGREE_PROB_DIFFERENCE,
            min_uncertainty_prob: defaults::DEFAULT_MIN_UNCERTAINTY_PROB,
            min_vote_count: defaults::DEFAULT_MIN_VOTE_COUNT,
            max_sample_size: defaults::DEFAULT_MAX_SAMPLE_SIZE,
            min_difference_prob: defaults::DEFAULT_MIN_DIFFERENCE_PROB,
            max_difference_prob: defaults::DEFAULT_MAX_DIFFERENCE_PROB,
            as_probability_estimate: true,
            include_passes: true,
        }
    }
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self::group_informed()
    }
}

/// Per-strategy threshold sets.
///
/// Keys missing from a section fall back to that strategy's own named set,
/// not to [`SelectionThresholds::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    #[serde(deserialize_with = "majority_vote_overrides")]
    pub majority_vote: SelectionThresholds,
    #[serde(deserialize_with = "group_informed_overrides")]
    pub group_informed: SelectionThresholds,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            majority_vote: SelectionThresholds::majority_vote(),
            group_informed: SelectionThresholds::group_informed(),
        }
    }
}

/// A threshold section as written, before defaults are filled in.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThresholdOverrides {
    min_common_ground_prob: Option<f64>,
    min_agree_prob_difference: Option<f64>,
    min_uncertainty_prob: Option<f64>,
    min_vote_count: Option<u64>,
    max_sample_size: Option<usize>,
    min_difference_prob: Option<f64>,
    max_difference_prob: Option<f64>,
    as_probability_estimate: Option<bool>,
    include_passes: Option<bool>,
}

impl ThresholdOverrides {
    fn apply(self, base: SelectionThresholds) -> SelectionThresholds {
        SelectionThresholds {
            min_common_ground_prob: self
                .min_common_ground_prob
                .unwrap_or(base.min_common_ground_prob),
            min_agree_prob_difference: self
                .min_agree_prob_difference
                .unwrap_or(base.min_agree_prob_difference),
            min_uncertainty_prob: self.min_uncertainty_prob.unwrap_or(base.min_uncertainty_prob),
            min_vote_count: self.min_vote_count.unwrap_or(base.min_vote_count),
            max_sample_size: self.max_sample_size.unwrap_or(base.max_sample_size),
            min_difference_prob: self.min_difference_prob.unwrap_or(base.min_difference_prob),
            max_difference_prob: self.max_difference_prob.unwrap_or(base.max_difference_prob),
            as_probability_estimate: self
                .as_probability_estimate
                .unwrap_or(base.as_probability_estimate),
            include_passes: self.include_passes.unwrap_or(base.include_passes),
        }
    }
}

fn majority_vote_overrides<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SelectionThresholds, D::Error> {
    Ok(ThresholdOverrides::deserialize(deserializer)?.apply(SelectionThresholds::majority_vote()))
}

fn group_informed_overrides<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SelectionThresholds, D::Error> {
    Ok(ThresholdOverrides::deserialize(deserializer)?.apply(SelectionThresholds::group_informed()))
}
