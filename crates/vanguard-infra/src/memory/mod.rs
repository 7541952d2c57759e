//! In-memory repository implementations backed by `dashmap`.
//!
//! Suitable for tests, the CLI and single-process deployments. Row-level
//! atomicity comes from dashmap's per-shard locks.

pub mod catalog;
pub mod pilot_skill;
