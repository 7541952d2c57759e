//! Shared domain types for Vanguard.
//!
//! This crate contains the value types exchanged between the progression
//! engine and its callers: skills, prerequisite edges, pilot skill states,
//! progression statistics and results, plus the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod pilot;
pub mod progression;
pub mod skill;
