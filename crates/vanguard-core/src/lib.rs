//! Progression engine and repository trait definitions for Vanguard.
//!
//! The `progression` module holds the pure engine: XP curve arithmetic, the
//! prerequisite graph validator and the progression index aggregator. The
//! `repository` module defines the ports the infrastructure layer implements,
//! and `service` orchestrates both. This crate depends only on
//! `vanguard-types` -- never on `vanguard-infra` or any storage crate.

pub mod progression;
pub mod repository;
pub mod service;
