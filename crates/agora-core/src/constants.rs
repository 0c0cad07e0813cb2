/// Topic and subtopic name that always sorts after every other sibling.
pub const OTHER_TOPIC_NAME: &str = "Other";

/// Pseudo-count added to the numerator of a MAP rate estimate.
pub const PRIOR_NUMERATOR: f64 = 1.0;

/// Pseudo-count added to the denominator of a MAP rate estimate.
pub const PRIOR_DENOMINATOR: f64 = 2.0;

/// Percentile of the pass-rate distribution used to raise the uncertainty floor.
pub const UNCERTAINTY_PERCENTILE: f64 = 0.75;
