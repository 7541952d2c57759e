//! In-memory skill catalog implementation.
//!
//! Implements `SkillCatalogRepository` from `vanguard-core`. The catalog is
//! reference data: it is filled once and then only read.

use dashmap::DashMap;

use vanguard_core::repository::catalog::SkillCatalogRepository;
use vanguard_types::error::RepositoryError;
use vanguard_types::skill::{PrerequisiteEdge, Skill, SkillId};

/// `DashMap`-backed implementation of `SkillCatalogRepository`.
#[derive(Debug, Default)]
pub struct InMemorySkillCatalog {
    skills: DashMap<SkillId, Skill>,
    edges: Vec<PrerequisiteEdge>,
}

impl InMemorySkillCatalog {
    /// Build a catalog from its skills and prerequisite edges.
    ///
    /// A later skill with a repeated id replaces the earlier one; run
    /// `SkillGraph::validated` first when that should be an error.
    pub fn new(skills: Vec<Skill>, edges: Vec<PrerequisiteEdge>) -> Self {
        let map = DashMap::with_capacity(skills.len());
        for skill in skills {
            map.insert(skill.id.clone(), skill);
        }
        Self { skills: map, edges }
    }
}

impl SkillCatalogRepository for InMemorySkillCatalog {
    async fn get_skill(&self, id: &SkillId) -> Result<Option<Skill>, RepositoryError> {
        Ok(self.skills.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let mut skills: Vec<Skill> = self.skills.iter().map(|e| e.value().clone()).collect();
        skills.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(skills)
    }

    async fn list_edges(&self) -> Result<Vec<PrerequisiteEdge>, RepositoryError> {
        Ok(self.edges.clone())
    }
}
