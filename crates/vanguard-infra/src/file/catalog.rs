//! Skill catalog file loader.
//!
//! A catalog file is TOML with a `[[skills]]` array and an optional
//! `[[prerequisites]]` array:
//!
//! ```toml
//! [[skills]]
//! id = "navigation"
//! name = "Navigation"
//! category = "piloting"
//! multiplier = 1
//!
//! [[prerequisites]]
//! skill_id = "warp-navigation"
//! prerequisite_id = "navigation"
//! required_level = 3
//! ```

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use vanguard_core::progression::prerequisite::SkillGraph;
use vanguard_types::error::CatalogError;
use vanguard_types::skill::{PrerequisiteEdge, Skill};

use crate::memory::catalog::InMemorySkillCatalog;

/// Parsed contents of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteEdge>,
}

impl CatalogFile {
    /// Build the prerequisite graph, validating it as a DAG when `strict`.
    pub fn graph(&self, strict: bool) -> Result<SkillGraph, CatalogError> {
        if strict {
            SkillGraph::validated(&self.skills, &self.prerequisites)
        } else {
            Ok(SkillGraph::from_edges(self.prerequisites.iter().cloned()))
        }
    }

    pub fn into_repository(self) -> InMemorySkillCatalog {
        InMemorySkillCatalog::new(self.skills, self.prerequisites)
    }
}

/// Read and parse a catalog file. Does not validate the graph.
pub async fn load_catalog(path: &Path) -> anyhow::Result<CatalogFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: CatalogFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

    tracing::debug!(
        skills = catalog.skills.len(),
        prerequisites = catalog.prerequisites.len(),
        "loaded catalog from {}",
        path.display()
    );
    Ok(catalog)
}
