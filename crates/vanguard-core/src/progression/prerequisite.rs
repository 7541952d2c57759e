//! Prerequisite graph and activation validator.
//!
//! [`SkillGraph`] keeps the catalog's prerequisite edges as two adjacency
//! maps, skill -> prerequisites and prerequisite -> dependents, built once per
//! request. The activation checks walk a single hop in either direction, so
//! they terminate even on a cyclic edge set; [`SkillGraph::validated`] is the
//! definition-time guard that rejects such catalogs up front using a
//! petgraph topological sort.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

use vanguard_types::error::CatalogError;
use vanguard_types::pilot::PilotSkillState;
use vanguard_types::progression::{ActivationCheck, DeactivationCheck, MissingPrerequisite};
use vanguard_types::skill::{MAX_LEVEL, PrerequisiteEdge, Skill, SkillId};

/// In-memory adjacency view over a catalog's prerequisite edges.
#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    prerequisites: HashMap<SkillId, Vec<PrerequisiteEdge>>,
    dependents: HashMap<SkillId, Vec<SkillId>>,
}

impl SkillGraph {
    /// Build the adjacency maps without validating the edge set.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = PrerequisiteEdge>,
    {
        let mut graph = Self::default();
        for edge in edges {
            let dependents = graph
                .dependents
                .entry(edge.prerequisite_id.clone())
                .or_default();
            if !dependents.contains(&edge.skill_id) {
                dependents.push(edge.skill_id.clone());
            }
            graph
                .prerequisites
                .entry(edge.skill_id.clone())
                .or_default()
                .push(edge);
        }
        graph
    }

    /// Build the adjacency maps after checking the catalog is a well-formed DAG.
    ///
    /// Rejects duplicate skills, edges naming unknown skills, self-references,
    /// duplicate edges, required levels outside `1..=5` and cycles.
    pub fn validated(skills: &[Skill], edges: &[PrerequisiteEdge]) -> Result<Self, CatalogError> {
        let mut known = HashSet::new();
        for skill in skills {
            if !known.insert(&skill.id) {
                return Err(CatalogError::DuplicateSkill(skill.id.clone()));
            }
        }

        let mut seen_edges = HashSet::new();
        for edge in edges {
            for id in [&edge.skill_id, &edge.prerequisite_id] {
                if !known.contains(id) {
                    return Err(CatalogError::UnknownSkill(id.clone()));
                }
            }
            if edge.skill_id == edge.prerequisite_id {
                return Err(CatalogError::SelfReference(edge.skill_id.clone()));
            }
            if !(1..=MAX_LEVEL).contains(&edge.required_level) {
                return Err(CatalogError::InvalidRequiredLevel {
                    skill: edge.skill_id.clone(),
                    prerequisite: edge.prerequisite_id.clone(),
                    level: edge.required_level,
                });
            }
            if !seen_edges.insert((&edge.skill_id, &edge.prerequisite_id)) {
                return Err(CatalogError::DuplicateEdge {
                    skill: edge.skill_id.clone(),
                    prerequisite: edge.prerequisite_id.clone(),
                });
            }
        }

        let graph = Self::from_edges(edges.iter().cloned());
        graph.activation_order(skills)?;
        Ok(graph)
    }

    /// Order `skills` so every prerequisite precedes the skills depending on it.
    ///
    /// Fails with [`CatalogError::Cycle`] when no such order exists.
    pub fn activation_order(&self, skills: &[Skill]) -> Result<Vec<SkillId>, CatalogError> {
        let mut graph = DiGraph::<SkillId, u8>::new();
        let mut node_indices = HashMap::new();

        for skill in skills {
            node_indices
                .entry(skill.id.clone())
                .or_insert_with(|| graph.add_node(skill.id.clone()));
        }

        for edges in self.prerequisites.values() {
            for edge in edges {
                let from = *node_indices
                    .entry(edge.prerequisite_id.clone())
                    .or_insert_with(|| graph.add_node(edge.prerequisite_id.clone()));
                let to = *node_indices
                    .entry(edge.skill_id.clone())
                    .or_insert_with(|| graph.add_node(edge.skill_id.clone()));
                // Edge from prerequisite -> skill (prerequisite comes first)
                graph.add_edge(from, to, edge.required_level);
            }
        }

        match toposort(&graph, None) {
            Ok(sorted) => Ok(sorted.into_iter().map(|idx| graph[idx].clone()).collect()),
            Err(cycle) => {
                let skill = graph[cycle.node_id()].clone();
                tracing::warn!(%skill, "circular prerequisite in catalog");
                Err(CatalogError::Cycle(skill))
            }
        }
    }

    /// Edges whose dependent side is `skill`.
    pub fn prerequisites_of(&self, skill: &SkillId) -> &[PrerequisiteEdge] {
        self.prerequisites
            .get(skill)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Skills that list `skill` as a prerequisite.
    pub fn dependents_of(&self, skill: &SkillId) -> &[SkillId] {
        self.dependents
            .get(skill)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// One pilot's skill states keyed by skill id.
#[derive(Debug, Clone, Default)]
pub struct PilotSkills {
    states: HashMap<SkillId, PilotSkillState>,
}

impl PilotSkills {
    pub fn from_states<I>(states: I) -> Self
    where
        I: IntoIterator<Item = PilotSkillState>,
    {
        Self {
            states: states
                .into_iter()
                .map(|state| (state.skill_id.clone(), state))
                .collect(),
        }
    }

    pub fn get(&self, skill: &SkillId) -> Option<&PilotSkillState> {
        self.states.get(skill)
    }

    /// Current level of `skill`, 0 when the pilot never acquired it.
    pub fn level_of(&self, skill: &SkillId) -> u8 {
        self.states.get(skill).map_or(0, |s| s.current_level)
    }

    pub fn is_active(&self, skill: &SkillId) -> bool {
        self.states.get(skill).is_some_and(|s| s.active)
    }
}

/// Whether `skill` may be switched on given the pilot's other skill levels.
///
/// Every prerequisite edge must be met; unmet ones are listed with the
/// pilot's current level. A skill without prerequisites is always allowed.
pub fn can_activate_skill(graph: &SkillGraph, pilot: &PilotSkills, skill: &SkillId) -> ActivationCheck {
    let missing: Vec<MissingPrerequisite> = graph
        .prerequisites_of(skill)
        .iter()
        .filter_map(|edge| {
            let current_level = pilot.level_of(&edge.prerequisite_id);
            (current_level < edge.required_level).then(|| MissingPrerequisite {
                skill_id: edge.prerequisite_id.clone(),
                required_level: edge.required_level,
                current_level,
            })
        })
        .collect();

    tracing::debug!(%skill, missing = missing.len(), "activation check");

    ActivationCheck {
        can_activate: missing.is_empty(),
        missing_prerequisites: missing,
    }
}

/// Whether `skill` may be switched off without stranding an active dependent.
pub fn can_deactivate_skill(
    graph: &SkillGraph,
    pilot: &PilotSkills,
    skill: &SkillId,
) -> DeactivationCheck {
    let dependents: Vec<SkillId> = graph
        .dependents_of(skill)
        .iter()
        .filter(|dependent| pilot.is_active(dependent))
        .cloned()
        .collect();

    tracing::debug!(%skill, active_dependents = dependents.len(), "deactivation check");

    DeactivationCheck {
        can_deactivate: dependents.is_empty(),
        dependent_skills: dependents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard_types::pilot::PilotId;
    use vanguard_types::skill::Multiplier;

    fn skill(id: &str) -> Skill {
        Skill {
            id: SkillId::new(id),
            name: id.to_uppercase(),
            category: "test".to_string(),
            multiplier: Multiplier::ONE,
            description: String::new(),
        }
    }

    fn state(pilot: &PilotId, id: &str, level: u8, active: bool) -> PilotSkillState {
        let mut state = PilotSkillState::acquired(pilot.clone(), SkillId::new(id));
        state.current_level = level;
        state.active = active;
        state
    }

    #[test]
    fn test_missing_prerequisite_reported_with_levels() {
        let graph = SkillGraph::from_edges([PrerequisiteEdge::new("a", "b", 3)]);
        let pilot_id = PilotId::new();
        let pilot = PilotSkills::from_states([state(&pilot_id, "b", 2, true)]);

        let check = can_activate_skill(&graph, &pilot, &SkillId::new("a"));
        assert!(!check.can_activate);
        assert_eq!(
            check.missing_prerequisites,
            vec![MissingPrerequisite {
                skill_id: SkillId::new("b"),
                required_level: 3,
                current_level: 2,
            }]
        );

        let pilot = PilotSkills::from_states([state(&pilot_id, "b", 4, true)]);
        let check = can_activate_skill(&graph, &pilot, &SkillId::new("a"));
        assert!(check.can_activate);
        assert!(check.missing_prerequisites.is_empty());
    }

    #[test]
    fn test_absent_prerequisite_counts_as_level_zero() {
        let graph = SkillGraph::from_edges([PrerequisiteEdge::new("a", "b", 1)]);
        let check = can_activate_skill(&graph, &PilotSkills::default(), &SkillId::new("a"));
        assert!(!check.can_activate);
        assert_eq!(check.missing_prerequisites[0].current_level, 0);
    }

    #[test]
    fn test_all_prerequisites_must_hold() {
        let graph = SkillGraph::from_edges([
            PrerequisiteEdge::new("a", "b", 2),
            PrerequisiteEdge::new("a", "c", 1),
        ]);
        let pilot_id = PilotId::new();
        let pilot = PilotSkills::from_states([state(&pilot_id, "b", 5, false)]);

        let check = can_activate_skill(&graph, &pilot, &SkillId::new("a"));
        assert!(!check.can_activate);
        assert_eq!(check.missing_prerequisites.len(), 1);
        assert_eq!(check.missing_prerequisites[0].skill_id, SkillId::new("c"));
    }

    #[test]
    fn test_skill_without_prerequisites_is_activatable() {
        let graph = SkillGraph::from_edges([PrerequisiteEdge::new("a", "b", 2)]);
        let check = can_activate_skill(&graph, &PilotSkills::default(), &SkillId::new("b"));
        assert!(check.can_activate);
    }

    #[test]
    fn test_active_dependent_blocks_deactivation() {
        let graph = SkillGraph::from_edges([PrerequisiteEdge::new("a", "b", 1)]);
        let pilot_id = PilotId::new();
        let pilot = PilotSkills::from_states([
            state(&pilot_id, "a", 1, true),
            state(&pilot_id, "b", 3, true),
        ]);

        let check = can_deactivate_skill(&graph, &pilot, &SkillId::new("b"));
        assert!(!check.can_deactivate);
        assert_eq!(check.dependent_skills, vec![SkillId::new("a")]);
    }

    #[test]
    fn test_inactive_or_missing_dependents_allow_deactivation() {
        let graph = SkillGraph::from_edges([
            PrerequisiteEdge::new("a", "b", 1),
            PrerequisiteEdge::new("c", "b", 1),
        ]);
        let pilot_id = PilotId::new();
        let pilot = PilotSkills::from_states([
            state(&pilot_id, "a", 1, false),
            state(&pilot_id, "b", 3, true),
        ]);

        let check = can_deactivate_skill(&graph, &pilot, &SkillId::new("b"));
        assert!(check.can_deactivate);
        assert!(check.dependent_skills.is_empty());
    }

    #[test]
    fn test_one_hop_checks_terminate_on_cycle() {
        let graph = SkillGraph::from_edges([
            PrerequisiteEdge::new("a", "b", 1),
            PrerequisiteEdge::new("b", "a", 1),
        ]);
        let check = can_activate_skill(&graph, &PilotSkills::default(), &SkillId::new("a"));
        assert!(!check.can_activate);
    }

    #[test]
    fn test_from_edges_dedupes_dependents() {
        let graph = SkillGraph::from_edges([
            PrerequisiteEdge::new("a", "b", 1),
            PrerequisiteEdge::new("a", "b", 2),
        ]);
        assert_eq!(graph.dependents_of(&SkillId::new("b")).len(), 1);
        assert_eq!(graph.prerequisites_of(&SkillId::new("a")).len(), 2);
    }

    #[test]
    fn test_validated_accepts_diamond() {
        // a -> b, a -> c, b -> d, c -> d
        let skills = [skill("a"), skill("b"), skill("c"), skill("d")];
        let edges = [
            PrerequisiteEdge::new("a", "b", 1),
            PrerequisiteEdge::new("a", "c", 1),
            PrerequisiteEdge::new("b", "d", 2),
            PrerequisiteEdge::new("c", "d", 3),
        ];
        let graph = SkillGraph::validated(&skills, &edges).unwrap();
        let order = graph.activation_order(&skills).unwrap();
        let pos = |id: &str| order.iter().position(|s| s.as_str() == id).unwrap();
        assert!(pos("d") < pos("b"));
        assert!(pos("d") < pos("c"));
        assert!(pos("b") < pos("a"));
        assert!(pos("c") < pos("a"));
    }

    #[test]
    fn test_validated_rejects_cycle() {
        let skills = [skill("a"), skill("b"), skill("c")];
        let edges = [
            PrerequisiteEdge::new("a", "b", 1),
            PrerequisiteEdge::new("b", "c", 1),
            PrerequisiteEdge::new("c", "a", 1),
        ];
        let err = SkillGraph::validated(&skills, &edges).unwrap_err();
        assert!(matches!(err, CatalogError::Cycle(_)), "got {err:?}");
    }

    #[test]
    fn test_validated_rejects_malformed_edges() {
        let skills = [skill("a"), skill("b")];

        let err = SkillGraph::validated(&skills, &[PrerequisiteEdge::new("a", "z", 1)]).unwrap_err();
        assert_eq!(err, CatalogError::UnknownSkill(SkillId::new("z")));

        let err = SkillGraph::validated(&skills, &[PrerequisiteEdge::new("a", "a", 1)]).unwrap_err();
        assert_eq!(err, CatalogError::SelfReference(SkillId::new("a")));

        let err = SkillGraph::validated(&skills, &[PrerequisiteEdge::new("a", "b", 6)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequiredLevel { level: 6, .. }));

        let err = SkillGraph::validated(
            &skills,
            &[PrerequisiteEdge::new("a", "b", 1), PrerequisiteEdge::new("a", "b", 2)],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateEdge { .. }));
    }

    #[test]
    fn test_validated_rejects_duplicate_skill() {
        let err = SkillGraph::validated(&[skill("a"), skill("a")], &[]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSkill(SkillId::new("a")));
    }
}
