// ─── Mod List Resolution ───
// Which files make up the modpack: the repository's manifest when it has
// one, otherwise whatever `.jar` files the contents API lists.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::entry::{is_jar_name, is_plain_file_name, ModFileEntry};
use crate::core::error::{LauncherError, LauncherResult, RemoteResource};
use crate::core::fallback::{resolve_first, Attempt, FallbackStrategy};
use crate::core::http;
use crate::core::repository::RepositoryReference;
use crate::core::sync::SyncContext;

#[derive(Debug, Deserialize)]
struct ModsManifest {
    #[serde(default)]
    mods: Vec<ManifestMod>,
}

#[derive(Debug, Deserialize)]
struct ManifestMod {
    name: Option<String>,
    filename: Option<String>,
}

/// One entry of a GitHub contents-API directory listing.
#[derive(Debug, Deserialize)]
pub struct ContentsEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub download_url: Option<String>,
}

/// `mods/manifest.json` on the raw-content host.
pub struct ManifestListing;

/// `contents/mods` on the REST API, filtered to `.jar` files.
pub struct ContentsApiListing;

#[async_trait]
impl FallbackStrategy for ManifestListing {
    type Output = Vec<ModFileEntry>;

    fn label(&self) -> &'static str {
        "manifest"
    }

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<Self::Output>> {
        let url = ctx.endpoints.manifest_url(repo)?;
        info!("Trying to fetch mods manifest from: {}", url);

        let response = match http::get_metadata(ctx.http_client, &url).await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => return Ok(Attempt::Skipped(format!("manifest returned {}", r.status()))),
            Err(e) => return Ok(Attempt::Skipped(e.to_string())),
        };

        let manifest = match response.json::<ModsManifest>().await {
            Ok(m) => m,
            Err(e) => return Ok(Attempt::Skipped(format!("unreadable manifest: {e}"))),
        };

        let mut entries = Vec::with_capacity(manifest.mods.len());
        for m in manifest.mods {
            let Some(name) = m.name.or(m.filename).filter(|n| !n.is_empty()) else {
                warn!("Skipping manifest entry without a name");
                continue;
            };
            if !is_plain_file_name(&name) {
                warn!("Skipping manifest entry with unsafe name {:?}", name);
                continue;
            }
            let download_url = ctx.endpoints.raw_mods_url(repo, &name)?;
            entries.push(ModFileEntry { name, download_url });
        }

        if entries.is_empty() {
            return Ok(Attempt::Skipped("manifest lists no mods".into()));
        }

        info!("Found mods manifest with {} mods", entries.len());
        Ok(Attempt::Resolved(entries))
    }
}

#[async_trait]
impl FallbackStrategy for ContentsApiListing {
    type Output = Vec<ModFileEntry>;

    fn label(&self) -> &'static str {
        "contents-api"
    }

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<Self::Output>> {
        let url = ctx.endpoints.mods_listing_url(repo)?;
        info!("Fetching mod files list from: {}", url);

        let response = http::get_metadata(ctx.http_client, &url).await?;
        let response = http::ensure_success(response, RemoteResource::ModsDirectory)?;
        let listing: Vec<ContentsEntry> = response.json().await?;

        let entries = jar_entries(listing);
        info!("Found {} mod files", entries.len());
        Ok(Attempt::Resolved(entries))
    }
}

fn jar_entries(listing: Vec<ContentsEntry>) -> Vec<ModFileEntry> {
    listing
        .into_iter()
        .filter(|e| e.entry_type == "file" && is_jar_name(&e.name))
        .filter_map(|e| {
            if !is_plain_file_name(&e.name) {
                warn!("Skipping listed file with unsafe name {:?}", e.name);
                return None;
            }
            match e.download_url {
                Some(download_url) => Some(ModFileEntry {
                    name: e.name,
                    download_url,
                }),
                None => {
                    warn!("Skipping {} without a download URL", e.name);
                    None
                }
            }
        })
        .collect()
}

/// Dispatcher over the known sources, tried in declaration order.
pub enum ModListSource {
    Manifest(ManifestListing),
    ContentsApi(ContentsApiListing),
}

impl ModListSource {
    pub fn default_chain() -> [ModListSource; 2] {
        [
            ModListSource::Manifest(ManifestListing),
            ModListSource::ContentsApi(ContentsApiListing),
        ]
    }
}

#[async_trait]
impl FallbackStrategy for ModListSource {
    type Output = Vec<ModFileEntry>;

    fn label(&self) -> &'static str {
        match self {
            ModListSource::Manifest(s) => s.label(),
            ModListSource::ContentsApi(s) => s.label(),
        }
    }

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<Self::Output>> {
        match self {
            ModListSource::Manifest(s) => s.attempt(ctx, repo).await,
            ModListSource::ContentsApi(s) => s.attempt(ctx, repo).await,
        }
    }
}

/// Resolve the modpack's file list for `repo`.
pub async fn list_mod_files(
    ctx: &SyncContext<'_>,
    repo: &RepositoryReference,
) -> LauncherResult<Vec<ModFileEntry>> {
    match resolve_first(ctx, repo, &ModListSource::default_chain()).await? {
        Some((_, entries)) => Ok(entries),
        None => Err(LauncherError::ModListUnavailable(repo.to_string())),
    }
}
