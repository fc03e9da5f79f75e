//! Remote lookups: mod listing fallbacks, HTTP error mapping and the EOL notice.

mod common;

use base64::Engine as _;
use netrix_lib::commands;
use netrix_lib::core::error::{LauncherError, RemoteResource};
use netrix_lib::core::paths::GamePaths;
use netrix_lib::core::repository::RemoteEndpoints;
use netrix_lib::core::state::AppState;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{list_dir, Harness, API_REPO_PATH, REPO_PATH};

async fn install(h: &Harness) -> Result<commands::InstallSummary, LauncherError> {
    commands::download_and_install(&h.state, |_| {}, false, &CancellationToken::new()).await
}

async fn mount_listing_status(h: &Harness, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("{API_REPO_PATH}/contents/mods")))
        .respond_with(ResponseTemplate::new(status))
        .mount(&h.server)
        .await;
}

#[tokio::test]
async fn missing_mods_directory_is_reported_and_mods_survive() {
    let h = Harness::start().await;
    h.install_game_version("1.20.1");
    h.mount_version("1.0.0", "1.20.1").await;
    mount_listing_status(&h, 404).await;
    h.seed_mod("old-mod.jar", "stale");

    let err = install(&h).await.unwrap_err();
    match &err {
        LauncherError::RemoteNotFound { resource, .. } => {
            assert_eq!(*resource, RemoteResource::ModsDirectory)
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(err
        .to_string()
        .starts_with("Mods directory not found in repository"));
    assert_eq!(list_dir(&h.mods_dir()), ["old-mod.jar"]);
}

#[tokio::test]
async fn forbidden_listing_is_distinct_from_not_found() {
    let h = Harness::start().await;
    h.install_game_version("1.20.1");
    h.mount_version("1.0.0", "1.20.1").await;
    mount_listing_status(&h, 403).await;

    let err = install(&h).await.unwrap_err();
    assert!(matches!(err, LauncherError::RemoteForbidden { .. }));
}

#[tokio::test]
async fn empty_manifest_falls_through_to_listing() {
    let h = Harness::start().await;
    h.install_game_version("1.20.1");
    h.mount_version("1.0.0", "1.20.1").await;
    h.mount_manifest(&[]).await;
    h.mount_listing(serde_json::json!([
        { "name": "b.jar", "type": "file", "download_url": format!("{}/dl/b.jar", h.server.uri()) }
    ]))
    .await;
    Mock::given(method("GET"))
        .and(path("/dl/b.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"b".to_vec()))
        .mount(&h.server)
        .await;

    install(&h).await.unwrap();
    assert_eq!(list_dir(&h.mods_dir()), ["b.jar"]);
}

#[tokio::test]
async fn listing_without_jars_installs_nothing_but_records_version() {
    let h = Harness::start().await;
    h.install_game_version("1.20.1");
    h.mount_version("2.0.0", "1.20.1").await;
    h.mount_listing(serde_json::json!([
        { "name": "version.json", "type": "file", "download_url": format!("{}/x", h.server.uri()) }
    ]))
    .await;
    h.seed_mod("old-mod.jar", "stale");

    let mut events = Vec::new();
    commands::download_and_install(
        &h.state,
        |p| events.push(p),
        false,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(list_dir(&h.mods_dir()).is_empty());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].percentage, 100);
    let info = commands::get_modpack_info(&h.state).await.unwrap();
    assert_eq!(info.current_version, "2.0.0");
}

#[tokio::test]
async fn eol_notice_from_contents_api() {
    let h = Harness::start().await;
    let payload = base64::engine::general_purpose::STANDARD
        .encode(r#"{"isEOL": true, "contentIfTrue": "Moved to a new launcher."}"#);
    // The contents API wraps base64 at 60 columns.
    let wrapped = payload
        .as_bytes()
        .chunks(60)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join("\n");
    Mock::given(method("GET"))
        .and(path(format!("{API_REPO_PATH}/contents/eol/eol.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "content": wrapped, "encoding": "base64" })),
        )
        .mount(&h.server)
        .await;

    let eol = commands::check_eol(&h.state).await;
    assert!(eol.is_eol);
    assert_eq!(eol.content_if_true, "Moved to a new launcher.");
}

#[tokio::test]
async fn eol_notice_falls_back_to_raw_file() {
    let h = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/main/eol/eol.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isEOL": false,
            "contentIfTrue": "unused"
        })))
        .mount(&h.server)
        .await;

    let eol = commands::check_eol(&h.state).await;
    assert!(!eol.is_eol);
    assert_eq!(eol.content_if_true, "unused");
}

#[tokio::test]
async fn eol_defaults_to_supported_when_unreachable() {
    let h = Harness::start().await;
    let eol = commands::check_eol(&h.state).await;
    assert!(!eol.is_eol);
    assert!(!eol.content_if_true.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let paths = GamePaths::new(dir.path().join(".minecraft"), dir.path().join("data"));
    let state = AppState::new(
        paths,
        RemoteEndpoints::with_base_url(format!("http://127.0.0.1:{port}")),
    )
    .unwrap();
    state.initialize().await.unwrap();

    let err = commands::get_modpack_info(&state).await.unwrap_err();
    assert!(matches!(err, LauncherError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn numeric_remote_version_is_accepted() {
    let h = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/main/mods/version.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "version": 2, "minecraftVersion": "1.20.1" })),
        )
        .mount(&h.server)
        .await;

    let info = commands::get_modpack_info(&h.state).await.unwrap();
    assert_eq!(info.latest_version, "2");
    assert!(info.is_update_available);
}
