/// Errors raised while turning vote counts into rates.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("raw {rate} rate requested for a tally with no votes")]
    ZeroVoteTotal { rate: &'static str },

    #[error("percentile {percentile} outside [0, 1]")]
    InvalidPercentile { percentile: f64 },
}
