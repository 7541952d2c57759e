//! Observability setup for Vanguard binaries.

pub mod tracing_setup;
