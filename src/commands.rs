// Request/response surface consumed by the presentation layer. Every
// fallible command returns `LauncherError`, which serializes to its message.

use std::path::PathBuf;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::compat::{self, VersionCheckResult};
use crate::core::eol::{self, EolInfo};
use crate::core::error::LauncherError;
use crate::core::mods;
use crate::core::repository::RepositoryReference;
use crate::core::state::AppState;
use crate::core::sync::{self, DownloadProgress, ModpackInfo};
use crate::core::version::VersionDescriptor;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallSummary {
    pub version: String,
    pub name: String,
    pub minecraft_version: String,
}

impl From<VersionDescriptor> for InstallSummary {
    fn from(d: VersionDescriptor) -> Self {
        Self {
            version: d.version,
            name: d.name,
            minecraft_version: d.minecraft_version,
        }
    }
}

pub async fn get_modpack_info(state: &AppState) -> Result<ModpackInfo, LauncherError> {
    sync::get_modpack_info(&state.ctx()).await
}

pub async fn check_for_updates(state: &AppState) -> bool {
    sync::check_for_updates(&state.ctx()).await
}

pub async fn download_and_install<F>(
    state: &AppState,
    on_progress: F,
    bypass_version_check: bool,
    cancel: &CancellationToken,
) -> Result<InstallSummary, LauncherError>
where
    F: FnMut(DownloadProgress) + Send,
{
    sync::download_and_install(&state.ctx(), on_progress, bypass_version_check, cancel)
        .await
        .map(InstallSummary::from)
}

pub async fn uninstall_modpack(state: &AppState) -> Result<(), LauncherError> {
    sync::uninstall_modpack(&state.ctx()).await
}

pub async fn get_mods_directory_path(state: &AppState) -> PathBuf {
    state.config.read().await.mods_path
}

/// Point the engine at another mods directory, creating it if needed.
pub async fn set_mods_directory_path(
    state: &AppState,
    new_path: String,
) -> Result<PathBuf, LauncherError> {
    let phase = state.sync_state.phase();
    if phase.is_busy() {
        return Err(LauncherError::Busy(phase.to_string()));
    }

    let new_path = PathBuf::from(new_path.trim());
    if new_path.as_os_str().is_empty() {
        return Err(LauncherError::Other("Mods directory path cannot be empty".into()));
    }

    mods::ensure_dir(&new_path).await?;
    let config = state
        .config
        .update(|c| c.mods_path = new_path.clone())
        .await?;

    info!("Mods directory set to {:?}", config.mods_path);
    Ok(config.mods_path)
}

pub async fn get_repository_url(state: &AppState) -> String {
    state.config.read().await.repository_url
}

/// Store a new repository URL after validating its shape.
pub async fn set_repository_url(
    state: &AppState,
    repository_url: String,
) -> Result<RepositoryReference, LauncherError> {
    let repository_url = repository_url.trim().to_string();
    let repo = RepositoryReference::parse(&repository_url)?;

    state
        .config
        .update(|c| c.repository_url = repository_url.clone())
        .await?;

    info!("Repository set to {}", repo);
    Ok(repo)
}

pub async fn check_version_compatibility(
    state: &AppState,
) -> Result<VersionCheckResult, LauncherError> {
    let ctx = state.ctx();
    let config = state.config.read().await;
    let repo = RepositoryReference::parse(&config.repository_url)?;
    compat::check_version_compatibility(&ctx, &repo).await
}

pub async fn check_eol(state: &AppState) -> EolInfo {
    let config = state.config.read().await;
    match RepositoryReference::parse(&config.repository_url) {
        Ok(repo) => eol::check_eol(&state.http_client, &state.endpoints, &repo).await,
        Err(e) => {
            warn!("Skipping EOL check: {}", e);
            EolInfo::default()
        }
    }
}
