use thiserror::Error;

use crate::progression::MissingPrerequisite;
use crate::skill::SkillId;

/// Errors raised while validating a skill catalog at definition time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid skill id: '{0}'")]
    InvalidSkillId(String),

    #[error("invalid multiplier {0}: must be within 1..=5")]
    InvalidMultiplier(i64),

    #[error("duplicate skill '{0}'")]
    DuplicateSkill(SkillId),

    #[error("prerequisite edge references unknown skill '{0}'")]
    UnknownSkill(SkillId),

    #[error("skill '{0}' cannot require itself")]
    SelfReference(SkillId),

    #[error("duplicate prerequisite edge '{skill}' -> '{prerequisite}'")]
    DuplicateEdge { skill: SkillId, prerequisite: SkillId },

    #[error("skill '{skill}' requires '{prerequisite}' at level {level}: required level must be within 1..=5")]
    InvalidRequiredLevel {
        skill: SkillId,
        prerequisite: SkillId,
        level: u8,
    },

    #[error("circular prerequisite detected involving skill '{0}'")]
    Cycle(SkillId),
}

/// Errors from progression use cases (grant XP, toggle activation, summaries).
#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("skill '{0}' not found in catalog")]
    SkillNotFound(SkillId),

    #[error("pilot has not learned skill '{0}'")]
    NotLearned(SkillId),

    #[error("missing prerequisites: {}", format_missing(.0))]
    MissingPrerequisites(Vec<MissingPrerequisite>),

    #[error("active dependent skills: {}", format_ids(.0))]
    ActiveDependents(Vec<SkillId>),

    #[error("concurrent modification of skill '{0}', gave up after retries")]
    Conflict(SkillId),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in vanguard-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

fn format_missing(missing: &[MissingPrerequisite]) -> String {
    missing
        .iter()
        .map(|m| format!("{} (level {}/{})", m.skill_id, m.current_level, m.required_level))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_ids(ids: &[SkillId]) -> String {
    ids.iter().map(SkillId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Cycle(SkillId::new("gunnery"));
        assert_eq!(
            err.to_string(),
            "circular prerequisite detected involving skill 'gunnery'"
        );
    }

    #[test]
    fn test_missing_prerequisites_display_lists_levels() {
        let err = ProgressionError::MissingPrerequisites(vec![MissingPrerequisite {
            skill_id: SkillId::new("navigation"),
            required_level: 3,
            current_level: 2,
        }]);
        assert_eq!(err.to_string(), "missing prerequisites: navigation (level 2/3)");
    }

    #[test]
    fn test_active_dependents_display() {
        let err = ProgressionError::ActiveDependents(vec![
            SkillId::new("warp-drive"),
            SkillId::new("jump-calc"),
        ]);
        assert_eq!(err.to_string(), "active dependent skills: warp-drive, jump-calc");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
