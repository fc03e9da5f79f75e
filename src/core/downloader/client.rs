use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::{self, DOWNLOAD_TIMEOUT};
use crate::core::mods::ModFileEntry;

/// Fetches mod files one at a time into a target directory.
pub struct Downloader<'a> {
    client: &'a Client,
    timeout: Duration,
}

impl<'a> Downloader<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            timeout: DOWNLOAD_TIMEOUT,
        }
    }

    /// Download `entry` into `dest_dir/<entry.name>`, overwriting any file
    /// of that name.
    ///
    /// The body is buffered whole before anything is written, so a failed
    /// request never truncates an existing file. Drops the file handle
    /// immediately after writing to avoid Windows OS Error 5.
    pub async fn download_file(
        &self,
        entry: &ModFileEntry,
        dest_dir: &Path,
    ) -> LauncherResult<PathBuf> {
        let dest = dest_dir.join(&entry.name);

        let response = self
            .client
            .get(&entry.download_url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(http::classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                file: entry.name.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;

        {
            let mut file =
                tokio::fs::File::create(&dest)
                    .await
                    .map_err(|e| LauncherError::Io {
                        path: dest.clone(),
                        source: e,
                    })?;
            file.write_all(&bytes).await.map_err(|e| LauncherError::Io {
                path: dest.clone(),
                source: e,
            })?;
            file.flush().await.map_err(|e| LauncherError::Io {
                path: dest.clone(),
                source: e,
            })?;
        }

        debug!(
            "Downloaded: {} -> {:?} ({} bytes)",
            entry.download_url,
            dest,
            bytes.len()
        );
        Ok(dest)
    }
}
