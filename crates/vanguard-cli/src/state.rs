//! Application state wiring configuration and services together.
//!
//! `AppState` holds the engine config loaded from the data directory. Commands
//! that work on a pilot open a [`Session`]: the catalog and roster files are
//! loaded into the in-memory repositories and wrapped in a
//! `ProgressionService`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use vanguard_core::service::progression::ProgressionService;
use vanguard_infra::config::{load_engine_config, resolve_data_dir};
use vanguard_infra::file::catalog::load_catalog;
use vanguard_infra::file::roster::load_roster;
use vanguard_infra::memory::catalog::InMemorySkillCatalog;
use vanguard_infra::memory::pilot_skill::InMemoryPilotSkillRepository;
use vanguard_types::config::EngineConfig;
use vanguard_types::pilot::PilotId;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteProgressionService =
    ProgressionService<InMemorySkillCatalog, InMemoryPilotSkillRepository>;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: EngineConfig,
}

/// A loaded catalog plus one pilot's roster, ready for progression calls.
pub struct Session {
    pub service: ConcreteProgressionService,
    pub pilot_id: PilotId,
}

impl AppState {
    /// Resolve the data directory and load `config.toml` from it.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(data_dir);
        let config = load_engine_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), ?config, "engine config loaded");
        Ok(Self { config })
    }

    /// Load a catalog and roster into a progression service.
    pub async fn open_session(&self, catalog_path: &Path, roster_path: &Path) -> anyhow::Result<Session> {
        let catalog = load_catalog(catalog_path).await?;
        if self.config.reject_cyclic_catalogs {
            catalog
                .graph(true)
                .with_context(|| format!("Invalid catalog {}", catalog_path.display()))?;
        }

        let roster = load_roster(roster_path, &catalog.skills).await?;
        let pilot_id = roster.pilot_id.clone();

        let service = ProgressionService::new(
            catalog.into_repository(),
            InMemoryPilotSkillRepository::with_states(roster.states),
            self.config.clone(),
        );

        Ok(Session { service, pilot_id })
    }
}
