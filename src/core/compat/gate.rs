// ─── Compatibility Gate ───
// Installing mods for a game version the player doesn't have produces a
// broken profile, so installs are blocked until that version exists.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::patcher::PatcherDescriptor;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::fallback::{resolve_first, Attempt, FallbackStrategy};
use crate::core::mods::entry::is_plain_file_name;
use crate::core::repository::RepositoryReference;
use crate::core::sync::SyncContext;
use crate::core::version::VersionDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionCheckResult {
    pub is_compatible: bool,
    pub required_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patcher_info: Option<PatcherDescriptor>,
}

impl VersionCheckResult {
    /// Error to surface when an install is refused.
    pub fn into_error(self) -> LauncherError {
        let message = self
            .patcher_info
            .as_ref()
            .map(|p| p.message.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "Required version {} is not installed. Please install it first.",
                    self.required_version
                )
            });

        LauncherError::IncompatibleVersion {
            required: self.required_version,
            message,
            patcher: self.patcher_info.map(Box::new),
        }
    }
}

/// Game version the modpack needs, plus the descriptor it came from.
#[derive(Debug, Clone)]
pub struct RequiredVersion {
    pub version: String,
    pub patcher: Option<PatcherDescriptor>,
}

/// `target` of the repository's patcher descriptor.
pub struct PatcherTarget;

/// `minecraftVersion` of the remote version descriptor.
pub struct DescriptorMinecraftVersion;

#[async_trait]
impl FallbackStrategy for PatcherTarget {
    type Output = RequiredVersion;

    fn label(&self) -> &'static str {
        "patcher"
    }

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<RequiredVersion>> {
        match PatcherDescriptor::fetch(ctx.http_client, ctx.endpoints, repo).await {
            Some(patcher) if patcher.has_target() => Ok(Attempt::Resolved(RequiredVersion {
                version: patcher.target.trim().to_string(),
                patcher: Some(patcher),
            })),
            Some(_) => Ok(Attempt::Skipped("patcher descriptor has no target".into())),
            None => Ok(Attempt::Skipped("no patcher descriptor".into())),
        }
    }
}

#[async_trait]
impl FallbackStrategy for DescriptorMinecraftVersion {
    type Output = RequiredVersion;

    fn label(&self) -> &'static str {
        "version-descriptor"
    }

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<RequiredVersion>> {
        let descriptor = VersionDescriptor::fetch(ctx.http_client, ctx.endpoints, repo).await?;
        Ok(Attempt::Resolved(RequiredVersion {
            version: descriptor.minecraft_version,
            patcher: None,
        }))
    }
}

pub enum RequiredVersionSource {
    Patcher(PatcherTarget),
    Descriptor(DescriptorMinecraftVersion),
}

impl RequiredVersionSource {
    pub fn default_chain() -> [RequiredVersionSource; 2] {
        [
            RequiredVersionSource::Patcher(PatcherTarget),
            RequiredVersionSource::Descriptor(DescriptorMinecraftVersion),
        ]
    }
}

#[async_trait]
impl FallbackStrategy for RequiredVersionSource {
    type Output = RequiredVersion;

    fn label(&self) -> &'static str {
        match self {
            RequiredVersionSource::Patcher(s) => s.label(),
            RequiredVersionSource::Descriptor(s) => s.label(),
        }
    }

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<RequiredVersion>> {
        match self {
            RequiredVersionSource::Patcher(s) => s.attempt(ctx, repo).await,
            RequiredVersionSource::Descriptor(s) => s.attempt(ctx, repo).await,
        }
    }
}

/// Is `versions/<version>` present? Only existence is checked; a version
/// string that isn't a single plain path component never matches.
pub async fn is_version_installed(versions_dir: &Path, version: &str) -> bool {
    if !is_plain_file_name(version) {
        return false;
    }
    tokio::fs::metadata(versions_dir.join(version))
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Decide whether the modpack can be installed on this machine.
pub async fn check_version_compatibility(
    ctx: &SyncContext<'_>,
    repo: &RepositoryReference,
) -> LauncherResult<VersionCheckResult> {
    let (source, required) =
        resolve_first(ctx, repo, &RequiredVersionSource::default_chain())
            .await?
            .ok_or_else(|| LauncherError::Other("No required game version could be determined".into()))?;

    let versions_dir = ctx.paths.versions_dir();
    let is_compatible = is_version_installed(&versions_dir, &required.version).await;
    info!(
        "Version check: required {} (from {}), installed: {}",
        required.version, source, is_compatible
    );

    Ok(VersionCheckResult {
        is_compatible,
        required_version: required.version,
        patcher_info: if is_compatible { None } else { required.patcher },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn version_presence_is_a_directory_check() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("1.20.1")).unwrap();
        std::fs::write(dir.path().join("1.19.2"), b"").unwrap();

        assert!(is_version_installed(dir.path(), "1.20.1").await);
        assert!(!is_version_installed(dir.path(), "1.19.2").await);
        assert!(!is_version_installed(dir.path(), "1.21").await);
        assert!(!is_version_installed(dir.path(), "..").await);
        assert!(!is_version_installed(&dir.path().join("missing"), "1.20.1").await);
    }

    #[test]
    fn refusal_prefers_patcher_message() {
        let result = VersionCheckResult {
            is_compatible: false,
            required_version: "1.20.1-forge-47.2.0".into(),
            patcher_info: Some(PatcherDescriptor {
                version: "47.2.0".into(),
                patcher_type: "forge".into(),
                target: "1.20.1-forge-47.2.0".into(),
                installer_url: "https://example.com/forge.jar".into(),
                message: "Install Forge first".into(),
            }),
        };
        match result.into_error() {
            LauncherError::IncompatibleVersion {
                message, patcher, ..
            } => {
                assert_eq!(message, "Install Forge first");
                assert!(patcher.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn refusal_without_patcher_names_the_version() {
        let result = VersionCheckResult {
            is_compatible: false,
            required_version: "1.20.1".into(),
            patcher_info: None,
        };
        assert_eq!(
            result.into_error().to_string(),
            "Required version 1.20.1 is not installed. Please install it first."
        );
    }
}
