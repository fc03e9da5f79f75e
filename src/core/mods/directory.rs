use std::path::Path;

use tracing::{debug, info};

use super::entry::is_jar_name;
use crate::core::error::{LauncherError, LauncherResult};

/// Delete every `*.jar` file directly inside `mods_dir`.
///
/// Other files and subdirectories are left alone. A missing directory is
/// treated as already empty. Returns the number of files removed.
pub async fn clear_jar_files(mods_dir: &Path) -> LauncherResult<usize> {
    let mut entries = match tokio::fs::read_dir(mods_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(LauncherError::Io {
                path: mods_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut removed = 0;
    while let Some(entry) = entries.next_entry().await.map_err(|e| LauncherError::Io {
        path: mods_dir.to_path_buf(),
        source: e,
    })? {
        let name = entry.file_name();
        let is_jar = name.to_str().map(is_jar_name).unwrap_or(false);
        if !is_jar {
            continue;
        }

        let file_type = entry.file_type().await.map_err(|e| LauncherError::Io {
            path: entry.path(),
            source: e,
        })?;
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| LauncherError::Io {
                path: path.clone(),
                source: e,
            })?;
        debug!("Removed {:?}", path);
        removed += 1;
    }

    info!("Cleared {} mod file(s) from {:?}", removed, mods_dir);
    Ok(removed)
}

pub async fn ensure_dir(path: &Path) -> LauncherResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })
}
