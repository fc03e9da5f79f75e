use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::{Client, Response, StatusCode};

use crate::core::error::{LauncherError, LauncherResult, RemoteResource};

const APP_USER_AGENT: &str = "Netrix/0.1.0";

/// Bound applied to every metadata request (version file, listings, descriptors).
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound applied to each individual mod file download.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
}

/// GET a metadata document with the metadata timeout applied.
///
/// Transport failures are mapped to [`LauncherError::Network`] when the
/// remote host could not be reached at all.
pub async fn get_metadata(client: &Client, url: &str) -> LauncherResult<Response> {
    client
        .get(url)
        .timeout(METADATA_TIMEOUT)
        .send()
        .await
        .map_err(classify_transport_error)
}

/// Turn a 404/403 on a well-known resource into the matching guided error.
/// Other non-success statuses become a plain HTTP error.
pub fn ensure_success(
    response: Response,
    resource: RemoteResource,
) -> LauncherResult<Response> {
    let status = response.status();
    let url = response.url().to_string();
    match status {
        s if s.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(LauncherError::RemoteNotFound { resource, url }),
        StatusCode::FORBIDDEN => Err(LauncherError::RemoteForbidden { resource, url }),
        _ => response.error_for_status().map_err(LauncherError::from),
    }
}

pub fn classify_transport_error(error: reqwest::Error) -> LauncherError {
    if error.is_connect() || error.is_timeout() {
        LauncherError::Network(error.to_string())
    } else {
        LauncherError::Http(error)
    }
}
