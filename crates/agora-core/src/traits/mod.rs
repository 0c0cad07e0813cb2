mod scoring;

pub use scoring::IScoringStrategy;
