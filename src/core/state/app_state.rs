use reqwest::Client;
use tracing::{info, warn};

use crate::core::config::ConfigStore;
use crate::core::error::LauncherResult;
use crate::core::http::build_http_client;
use crate::core::mods;
use crate::core::paths::GamePaths;
use crate::core::repository::RemoteEndpoints;
use crate::core::sync::{SyncContext, SyncState};

/// Owner of everything the engine borrows: one per running companion.
pub struct AppState {
    pub paths: GamePaths,
    pub endpoints: RemoteEndpoints,
    pub http_client: Client,
    pub config: ConfigStore,
    pub sync_state: SyncState,
}

impl AppState {
    pub fn new(paths: GamePaths, endpoints: RemoteEndpoints) -> LauncherResult<Self> {
        let http_client = build_http_client()?;
        let config = ConfigStore::new(paths.config_path(), paths.default_mods_dir());

        Ok(Self {
            paths,
            endpoints,
            http_client,
            config,
            sync_state: SyncState::new(),
        })
    }

    pub fn ctx(&self) -> SyncContext<'_> {
        SyncContext {
            paths: &self.paths,
            http_client: &self.http_client,
            endpoints: &self.endpoints,
            config: &self.config,
            state: &self.sync_state,
        }
    }

    /// First-run setup: data directory, default mods directory and a
    /// self-healed config file.
    pub async fn initialize(&self) -> LauncherResult<()> {
        mods::ensure_dir(self.paths.data_dir()).await?;
        if let Err(e) = mods::ensure_dir(&self.paths.default_mods_dir()).await {
            warn!("Cannot create default mods directory: {}", e);
        }

        let config = self.config.read().await;
        info!(
            "Config at {:?}: mods in {:?}, repository {}",
            self.config.path(),
            config.mods_path,
            config.repository_url
        );
        Ok(())
    }
}
