//! Shared fixtures: a wiremock server standing in for both GitHub hosts and
//! an `AppState` rooted in a temporary directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use netrix_lib::core::paths::GamePaths;
use netrix_lib::core::repository::RemoteEndpoints;
use netrix_lib::core::state::AppState;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REPO_PATH: &str = "/Huckleboard/CrashCraftModpack";
pub const API_REPO_PATH: &str = "/repos/Huckleboard/CrashCraftModpack";

pub struct Harness {
    pub server: MockServer,
    pub state: AppState,
    pub dir: TempDir,
}

impl Harness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = GamePaths::new(dir.path().join(".minecraft"), dir.path().join("data"));
        let state = AppState::new(paths, RemoteEndpoints::with_base_url(server.uri()))
            .expect("app state");
        state.initialize().await.expect("initialize");

        Self { server, state, dir }
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.state.paths.default_mods_dir()
    }

    pub fn install_game_version(&self, version: &str) {
        std::fs::create_dir_all(self.state.paths.versions_dir().join(version)).unwrap();
    }

    pub fn seed_mod(&self, name: &str, body: &str) {
        std::fs::write(self.mods_dir().join(name), body).unwrap();
    }

    pub async fn mount_version(&self, version: &str, minecraft_version: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{REPO_PATH}/main/mods/version.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "version": version,
                "name": "CrashCraft",
                "description": "Server modpack",
                "minecraftVersion": minecraft_version
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_manifest(&self, names: &[&str]) {
        let mods: Vec<_> = names
            .iter()
            .map(|n| serde_json::json!({ "name": n }))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("{REPO_PATH}/main/mods/manifest.json")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "mods": mods })),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve `body` at the raw-content URL the manifest strategy derives.
    pub async fn mount_raw_mod(&self, name: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{REPO_PATH}/main/mods/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.as_bytes().to_vec()))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_listing(&self, listing: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("{API_REPO_PATH}/contents/mods")))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_patcher(&self, target: &str, message: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{API_REPO_PATH}/contents/patcher/patchinfo.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "patchinfo.json",
                "type": "file",
                "download_url": format!("{}/files/patchinfo.json", self.server.uri())
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/files/patchinfo.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "version": "47.2.0",
                "type": "forge",
                "target": target,
                "installerUrl": "https://maven.example.com/forge-installer.jar",
                "message": message
            })))
            .mount(&self.server)
            .await;
    }
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
