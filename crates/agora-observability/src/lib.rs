//! # agora-observability
//!
//! Subscriber installation driven by [`ObservabilityConfig`] and the span
//! macros every engine opens around its top-level operations.
//!
//! [`ObservabilityConfig`]: agora_core::config::ObservabilityConfig

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, spans::names};
