//! Skill catalog repository trait definition.

use vanguard_types::error::RepositoryError;
use vanguard_types::skill::{PrerequisiteEdge, Skill, SkillId};

/// Read-only access to the skill catalog and its prerequisite edges.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SkillCatalogRepository: Send + Sync {
    /// Get a skill by id.
    fn get_skill(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// List every skill in the catalog.
    fn list_skills(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    /// List every prerequisite edge in the catalog.
    fn list_edges(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<PrerequisiteEdge>, RepositoryError>> + Send;
}
