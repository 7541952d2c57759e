//! TOML file formats for skill catalogs and pilot rosters.

pub mod catalog;
pub mod roster;
