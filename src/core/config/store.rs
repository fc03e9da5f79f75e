// ─── Local Config Store ───
// One JSON document per installation. Reads self-heal the file; writes go
// through a temporary sibling so a crash never leaves a half-written config.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::core::error::{LauncherError, LauncherResult};

pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/Huckleboard/CrashCraftModpack";

/// Persisted companion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalConfig {
    pub mods_path: PathBuf,
    pub repository_url: String,
    pub last_update_check: DateTime<Utc>,
    /// Keys this version does not know about, kept so rewrites don't drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocalConfig {
    pub fn defaults(mods_path: PathBuf) -> Self {
        Self {
            mods_path,
            repository_url: DEFAULT_REPOSITORY_URL.into(),
            last_update_check: Utc::now(),
            extra: Map::new(),
        }
    }

    /// Lay stored values over `self`, key by key.
    ///
    /// A key holding the wrong type, or an empty path/URL, keeps the default.
    fn merge_stored(mut self, stored: Map<String, Value>) -> Self {
        for (key, value) in stored {
            match key.as_str() {
                "modsPath" => match value.as_str().map(str::trim) {
                    Some(path) if !path.is_empty() => self.mods_path = PathBuf::from(path),
                    _ => warn!("Ignoring invalid modsPath in config: {}", value),
                },
                "repositoryUrl" => match value.as_str().map(str::trim) {
                    Some(url) if !url.is_empty() => self.repository_url = url.to_string(),
                    _ => warn!("Ignoring invalid repositoryUrl in config: {}", value),
                },
                "lastUpdateCheck" => {
                    match serde_json::from_value::<DateTime<Utc>>(value.clone()) {
                        Ok(ts) => self.last_update_check = ts,
                        Err(_) => warn!("Ignoring invalid lastUpdateCheck in config: {}", value),
                    }
                }
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
        self
    }
}

/// Owner of the config file.
///
/// Every read rewrites the file, so reads and writes are serialized through
/// `lock`; a read must never observe the gap between remove and rename.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    default_mods_path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl ConfigStore {
    pub fn new(path: PathBuf, default_mods_path: PathBuf) -> Self {
        Self {
            path,
            default_mods_path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, merging stored values over fresh defaults, and
    /// persist the merged result. Never fails: unreadable or corrupt files
    /// fall back to defaults and persistence errors are only logged.
    pub async fn read(&self) -> LocalConfig {
        let _held = self.lock.lock().await;
        self.read_locked().await
    }

    /// Atomically replace the config file.
    pub async fn write(&self, config: &LocalConfig) -> LauncherResult<()> {
        let _held = self.lock.lock().await;
        self.write_locked(config).await
    }

    /// Read-modify-write helper for settings changes. The lock is held
    /// across the whole cycle.
    pub async fn update<F>(&self, apply: F) -> LauncherResult<LocalConfig>
    where
        F: FnOnce(&mut LocalConfig),
    {
        let _held = self.lock.lock().await;
        let mut config = self.read_locked().await;
        apply(&mut config);
        self.write_locked(&config).await?;
        Ok(config)
    }

    async fn read_locked(&self) -> LocalConfig {
        let stored = self.load_stored().await;
        let config = LocalConfig::defaults(self.default_mods_path.clone()).merge_stored(stored);

        if let Err(e) = self.write_locked(&config).await {
            error!("Failed to persist config to {:?}: {}", self.path, e);
        }

        config
    }

    async fn write_locked(&self, config: &LocalConfig) -> LauncherResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp_path = self.tmp_path();

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| LauncherError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let result = self.replace_with(&tmp_path, json).await;
        if result.is_err() && tokio::fs::try_exists(&tmp_path).await.unwrap_or(false) {
            if let Err(e) = tokio::fs::remove_file(&tmp_path).await {
                warn!("Failed to clean up {:?}: {}", tmp_path, e);
            }
        }
        result
    }

    async fn replace_with(&self, tmp_path: &Path, json: String) -> LauncherResult<()> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| LauncherError::Io { path, source }
        };

        tokio::fs::write(tmp_path, json)
            .await
            .map_err(io_err(tmp_path))?;

        // Some platforms refuse to rename over an existing file.
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(&self.path)(e)),
        }

        tokio::fs::rename(tmp_path, &self.path)
            .await
            .map_err(io_err(&self.path))?;

        debug!("Config written to {:?}", self.path);
        Ok(())
    }

    async fn load_stored(&self) -> Map<String, Value> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                warn!("Cannot read config {:?}: {}", self.path, e);
                return Map::new();
            }
        };

        if raw.trim().is_empty() {
            return Map::new();
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            _ => {
                warn!("Failed to parse config file {:?}, recreating", self.path);
                if let Err(e) = tokio::fs::remove_file(&self.path).await {
                    warn!("Failed to remove corrupt config {:?}: {}", self.path, e);
                }
                Map::new()
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
