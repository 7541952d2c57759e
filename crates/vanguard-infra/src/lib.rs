//! Infrastructure implementations for Vanguard.
//!
//! Adapters behind the `vanguard-core` repository ports: concurrent in-memory
//! stores, the TOML catalog and roster file formats, and the engine config
//! loader.

pub mod config;
pub mod file;
pub mod memory;
