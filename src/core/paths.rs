use std::path::{Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

const APP_DIR_NAME: &str = "Netrix";
const CONFIG_FILE: &str = "netrix-config.json";
const VERSION_MARKER_FILE: &str = "version.json";

/// Filesystem locations the engine works against.
///
/// `game_dir` is the Minecraft root (`.minecraft` or the platform
/// equivalent); `data_dir` holds the companion's own config.
#[derive(Debug, Clone)]
pub struct GamePaths {
    game_dir: PathBuf,
    data_dir: PathBuf,
}

impl GamePaths {
    pub fn new(game_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            game_dir: game_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Platform-canonical locations derived from the user's home and data dirs.
    pub fn detect() -> LauncherResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| LauncherError::Other("Cannot determine home directory".into()))?;
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| home.clone())
            .join(APP_DIR_NAME);

        Ok(Self::new(minecraft_dir_for(&home), data_dir))
    }

    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn default_mods_dir(&self) -> PathBuf {
        self.game_dir.join("mods")
    }

    /// `versions/` holds one directory per installed game/loader version.
    pub fn versions_dir(&self) -> PathBuf {
        self.game_dir.join("versions")
    }

    pub fn version_marker_path(&self) -> PathBuf {
        self.game_dir.join(VERSION_MARKER_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

fn minecraft_dir_for(home: &Path) -> PathBuf {
    if cfg!(target_os = "windows") {
        home.join("AppData").join("Roaming").join(".minecraft")
    } else if cfg!(target_os = "macos") {
        home.join("Library")
            .join("Application Support")
            .join("minecraft")
    } else {
        home.join(".minecraft")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_hang_off_the_roots() {
        let paths = GamePaths::new("/games/.minecraft", "/data/Netrix");
        assert_eq!(paths.default_mods_dir(), Path::new("/games/.minecraft/mods"));
        assert_eq!(paths.versions_dir(), Path::new("/games/.minecraft/versions"));
        assert_eq!(
            paths.version_marker_path(),
            Path::new("/games/.minecraft/version.json")
        );
        assert_eq!(paths.config_path(), Path::new("/data/Netrix/netrix-config.json"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_game_dir_is_dot_minecraft() {
        assert_eq!(
            minecraft_dir_for(Path::new("/home/steve")),
            Path::new("/home/steve/.minecraft")
        );
    }
}
