// ─── Sync Engine ───
// Update check, install and uninstall of the modpack, built on the
// smaller pieces in `core`.
//
// Install order matters: the compatibility decision and every remote
// lookup happen before the first file is deleted.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::{DownloadProgress, PhaseGuard, SyncContext, SyncPhase};
use crate::core::compat;
use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::mods;
use crate::core::repository::RepositoryReference;
use crate::core::version::{is_newer, VersionDescriptor, NOT_INSTALLED};

/// Read-only view combining config, remote descriptor and local marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackInfo {
    pub name: String,
    pub description: String,
    pub current_version: String,
    pub latest_version: String,
    pub minecraft_version: String,
    pub is_installed: bool,
    pub is_update_available: bool,
    pub local_mods_path: PathBuf,
    pub repository_url: String,
    pub last_update_check: DateTime<Utc>,
}

pub async fn get_modpack_info(ctx: &SyncContext<'_>) -> LauncherResult<ModpackInfo> {
    let config = ctx.config.read().await;
    let repo = RepositoryReference::parse(&config.repository_url)?;
    let latest = VersionDescriptor::fetch(ctx.http_client, ctx.endpoints, &repo).await?;
    let local = VersionDescriptor::read_marker(&ctx.paths.version_marker_path()).await;

    let current_version = local
        .as_ref()
        .map(|d| d.version.clone())
        .unwrap_or_else(|| NOT_INSTALLED.to_string());
    let preferred = local.as_ref().unwrap_or(&latest);

    Ok(ModpackInfo {
        name: preferred.name.clone(),
        description: preferred.description.clone(),
        is_installed: current_version != NOT_INSTALLED,
        is_update_available: is_newer(&latest.version, &current_version),
        current_version,
        latest_version: latest.version.clone(),
        minecraft_version: preferred.minecraft_version.clone(),
        local_mods_path: config.mods_path,
        repository_url: config.repository_url,
        last_update_check: config.last_update_check,
    })
}

/// Is a newer modpack published than the one installed?
///
/// Records the check time even when the remote lookup fails. Never
/// errors: any failure, including a busy engine, reads as `false`.
pub async fn check_for_updates(ctx: &SyncContext<'_>) -> bool {
    let guard = match ctx.state.begin(SyncPhase::CheckingUpdate) {
        Ok(guard) => guard,
        Err(e) => {
            warn!("Skipping update check: {}", e);
            return false;
        }
    };

    match compare_with_remote(ctx).await {
        Ok(available) => {
            info!("Update available: {}", available);
            guard.settle(if available {
                SyncPhase::UpdateAvailable
            } else {
                SyncPhase::UpToDate
            });
            available
        }
        Err(e) => {
            error!("Failed to check for updates: {}", e);
            guard.fail(&e);
            false
        }
    }
}

async fn compare_with_remote(ctx: &SyncContext<'_>) -> LauncherResult<bool> {
    let config = ctx.config.read().await;
    let fetched = match RepositoryReference::parse(&config.repository_url) {
        Ok(repo) => VersionDescriptor::fetch(ctx.http_client, ctx.endpoints, &repo).await,
        Err(e) => Err(e),
    };

    if let Err(e) = ctx
        .config
        .update(|c| c.last_update_check = Utc::now())
        .await
    {
        warn!("Failed to record update check time: {}", e);
    }

    let latest = fetched?;
    let current = installed_version(ctx).await;
    Ok(is_newer(&latest.version, &current))
}

async fn installed_version(ctx: &SyncContext<'_>) -> String {
    VersionDescriptor::read_marker(&ctx.paths.version_marker_path())
        .await
        .map(|d| d.version)
        .unwrap_or_else(|| NOT_INSTALLED.to_string())
}

/// Replace the local mods with the published modpack.
///
/// `on_progress` fires once before each file and once at the end. The
/// `cancel` token is honored between files; the file in flight finishes.
/// Files written before a failure stay on disk.
pub async fn download_and_install<F>(
    ctx: &SyncContext<'_>,
    on_progress: F,
    bypass_version_check: bool,
    cancel: &CancellationToken,
) -> LauncherResult<VersionDescriptor>
where
    F: FnMut(DownloadProgress) + Send,
{
    let guard = ctx
        .state
        .begin(SyncPhase::Installing {
            current: 0,
            total: 0,
        })?;

    match install(ctx, &guard, on_progress, bypass_version_check, cancel).await {
        Ok(descriptor) => {
            guard.settle(SyncPhase::Idle);
            Ok(descriptor)
        }
        Err(e @ LauncherError::IncompatibleVersion { .. }) => {
            warn!("Install refused: {}", e);
            guard.settle(SyncPhase::Idle);
            Err(e)
        }
        Err(e) => {
            error!("Failed to download and install modpack: {}", e);
            guard.fail(&e);
            Err(e)
        }
    }
}

async fn install<F>(
    ctx: &SyncContext<'_>,
    guard: &PhaseGuard<'_>,
    mut on_progress: F,
    bypass_version_check: bool,
    cancel: &CancellationToken,
) -> LauncherResult<VersionDescriptor>
where
    F: FnMut(DownloadProgress) + Send,
{
    let config = ctx.config.read().await;
    let repo = RepositoryReference::parse(&config.repository_url)?;

    if bypass_version_check {
        warn!("Version compatibility check bypassed");
    } else {
        let check = compat::check_version_compatibility(ctx, &repo).await?;
        if !check.is_compatible {
            return Err(check.into_error());
        }
    }

    let mods_dir = config.mods_path;
    let descriptor = VersionDescriptor::fetch(ctx.http_client, ctx.endpoints, &repo).await?;
    let files = mods::list_mod_files(ctx, &repo).await?;
    let total = files.len();

    if cancel.is_cancelled() {
        return Err(LauncherError::Cancelled);
    }

    info!(
        "Installing {} {} ({} files) into {:?}",
        descriptor.name, descriptor.version, total, mods_dir
    );
    mods::ensure_dir(&mods_dir).await?;
    mods::clear_jar_files(&mods_dir).await?;

    let downloader = Downloader::new(ctx.http_client);
    for (index, entry) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!("Install cancelled after {} of {} files", index, total);
            return Err(LauncherError::Cancelled);
        }
        guard.advance(SyncPhase::Installing {
            current: index,
            total,
        });
        on_progress(DownloadProgress::before_file(&entry.name, index, total));
        downloader.download_file(entry, &mods_dir).await?;
    }
    on_progress(DownloadProgress::complete(total));

    guard.advance(SyncPhase::Finalizing);
    descriptor
        .write_marker(&ctx.paths.version_marker_path())
        .await?;
    ctx.config
        .update(|c| c.last_update_check = Utc::now())
        .await?;

    info!("Modpack {} installed", descriptor.version);
    Ok(descriptor)
}

/// Remove the modpack's `.jar` files and the installed-version marker.
pub async fn uninstall_modpack(ctx: &SyncContext<'_>) -> LauncherResult<()> {
    let guard = ctx.state.begin(SyncPhase::Uninstalling)?;

    let result = async {
        let config = ctx.config.read().await;
        mods::clear_jar_files(&config.mods_path).await?;
        VersionDescriptor::remove_marker(&ctx.paths.version_marker_path()).await
    }
    .await;

    match result {
        Ok(()) => {
            info!("Modpack uninstalled");
            guard.settle(SyncPhase::Idle);
            Ok(())
        }
        Err(e) => {
            error!("Failed to uninstall modpack: {}", e);
            guard.fail(&e);
            Err(e)
        }
    }
}
