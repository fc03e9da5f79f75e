// ─── Version Descriptor ───
// Remote `mods/version.json` and its local copy, the installed-version marker.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult, RemoteResource};
use crate::core::http;
use crate::core::repository::{RemoteEndpoints, RepositoryReference};

const UNKNOWN_NAME: &str = "Unknown Modpack";
const UNKNOWN_DESCRIPTION: &str = "Modpack for the server";
const UNKNOWN_MINECRAFT: &str = "Unknown";

/// Published description of a modpack release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    pub version: String,
    pub name: String,
    pub description: String,
    pub minecraft_version: String,
}

/// Wire shape: every field is loose JSON so a missing or mistyped
/// `version` is reported as such instead of as a generic decode error.
/// Numbers are accepted and read as their decimal text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVersionDescriptor {
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    minecraft_version: Option<Value>,
}

impl RawVersionDescriptor {
    fn validate(self) -> LauncherResult<VersionDescriptor> {
        let version = match self.version {
            None | Some(Value::Null) => {
                return Err(LauncherError::InvalidVersionData("missing version field".into()))
            }
            Some(value) => non_empty(as_text(&value)).ok_or_else(|| {
                LauncherError::InvalidVersionData(format!("unusable version field: {value}"))
            })?,
        };

        Ok(VersionDescriptor {
            version,
            name: text_or(self.name, UNKNOWN_NAME),
            description: text_or(self.description, UNKNOWN_DESCRIPTION),
            minecraft_version: text_or(self.minecraft_version, UNKNOWN_MINECRAFT),
        })
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or(value: Option<Value>, fallback: &str) -> String {
    non_empty(value.as_ref().and_then(as_text)).unwrap_or_else(|| fallback.into())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl VersionDescriptor {
    pub fn from_json(raw: &str) -> LauncherResult<Self> {
        serde_json::from_str::<RawVersionDescriptor>(raw)?.validate()
    }

    /// Fetch `mods/version.json` from the repository.
    pub async fn fetch(
        client: &reqwest::Client,
        endpoints: &RemoteEndpoints,
        repo: &RepositoryReference,
    ) -> LauncherResult<Self> {
        let url = endpoints.version_file_url(repo)?;
        debug!("Fetching version data from: {}", url);

        let response = http::get_metadata(client, &url).await?;
        let response = http::ensure_success(response, RemoteResource::VersionFile)?;
        let raw: RawVersionDescriptor = response.json().await?;
        let descriptor = raw.validate()?;

        info!(
            "Remote modpack {} is at version {} (Minecraft {})",
            descriptor.name, descriptor.version, descriptor.minecraft_version
        );
        Ok(descriptor)
    }

    // ── Local marker ────────────────────────────────────

    /// Read the installed-version marker.
    ///
    /// A missing file means nothing is installed. A file that cannot be
    /// parsed is deleted and reported the same way.
    pub async fn read_marker(path: &Path) -> Option<Self> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read version marker {:?}: {}", path, e);
                return None;
            }
        };

        match Self::from_json(&raw) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!("Corrupt version marker at {:?}, removing: {}", path, e);
                if let Err(e) = tokio::fs::remove_file(path).await {
                    warn!("Failed to remove corrupt marker {:?}: {}", path, e);
                }
                None
            }
        }
    }

    pub async fn write_marker(&self, path: &Path) -> LauncherResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| LauncherError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| LauncherError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Local version data written to {:?}", path);
        Ok(())
    }

    /// Remove the marker; a marker that is already gone is not an error.
    pub async fn remove_marker(path: &Path) -> LauncherResult<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                info!("Removed local version marker {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LauncherError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
