use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::http;
use crate::core::mods::ContentsEntry;
use crate::core::repository::{RemoteEndpoints, RepositoryReference};

/// Describes the loader/installer a modpack needs, published as
/// `patcher/patchinfo.json` in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatcherDescriptor {
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "type")]
    pub patcher_type: String,
    /// Game version directory that must exist under `versions/`.
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub installer_url: String,
    #[serde(default)]
    pub message: String,
}

impl PatcherDescriptor {
    pub fn has_target(&self) -> bool {
        !self.target.trim().is_empty()
    }

    /// Fetch the descriptor through the contents API, following the
    /// record's `download_url`. Every failure reads as "no descriptor".
    pub async fn fetch(
        client: &reqwest::Client,
        endpoints: &RemoteEndpoints,
        repo: &RepositoryReference,
    ) -> Option<Self> {
        let url = endpoints
            .contents_url(repo, &["patcher", "patchinfo.json"])
            .ok()?;
        info!("Fetching patcher info from: {}", url);

        let record: ContentsEntry = match fetch_json(client, &url).await {
            Ok(record) => record,
            Err(reason) => {
                debug!("No patcher record at {}: {}", url, reason);
                return None;
            }
        };

        let download_url = record.download_url?;
        match fetch_json::<PatcherDescriptor>(client, &download_url).await {
            Ok(descriptor) => {
                debug!("Patcher info: {:?}", descriptor);
                Some(descriptor)
            }
            Err(reason) => {
                debug!("Unreadable patcher info at {}: {}", download_url, reason);
                None
            }
        }
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, String> {
    let response = http::get_metadata(client, url)
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}
