//! Skill progression engine.
//!
//! Three stateless components over caller-supplied snapshots: the XP curve
//! calculator, the prerequisite graph validator and the progression index
//! aggregator, plus the statistics builder feeding the latter. Nothing here
//! performs I/O or holds shared state; the domain types live in
//! `vanguard-types`.

pub mod curve;
pub mod index;
pub mod prerequisite;
pub mod stats;
