// ─── End-of-life Notice ───
// Advisory only: any failure degrades to "still supported".

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::http;
use crate::core::repository::{RemoteEndpoints, RepositoryReference};

const DEFAULT_EOL_MESSAGE: &str =
    "This version of Netrix is no longer supported. Please update to the latest version.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EolInfo {
    #[serde(rename = "isEOL", default)]
    pub is_eol: bool,
    #[serde(rename = "contentIfTrue", default)]
    pub content_if_true: String,
}

impl Default for EolInfo {
    fn default() -> Self {
        Self {
            is_eol: false,
            content_if_true: DEFAULT_EOL_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EncodedContent {
    content: Option<String>,
}

/// Check `eol/eol.json`, first through the contents API (base64 payload),
/// then on the raw-content host.
pub async fn check_eol(
    client: &reqwest::Client,
    endpoints: &RemoteEndpoints,
    repo: &RepositoryReference,
) -> EolInfo {
    if let Some(info) = from_contents_api(client, endpoints, repo).await {
        debug!("EOL check result: {:?}", info);
        return info;
    }
    if let Some(info) = from_raw_file(client, endpoints, repo).await {
        debug!("EOL check result (raw): {:?}", info);
        return info;
    }
    warn!("Failed to check EOL status for {}, assuming supported", repo);
    EolInfo::default()
}

async fn from_contents_api(
    client: &reqwest::Client,
    endpoints: &RemoteEndpoints,
    repo: &RepositoryReference,
) -> Option<EolInfo> {
    let url = endpoints.contents_url(repo, &["eol", "eol.json"]).ok()?;
    let response = http::get_metadata(client, &url).await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let encoded = response.json::<EncodedContent>().await.ok()?.content?;
    decode_content(&encoded)
}

async fn from_raw_file(
    client: &reqwest::Client,
    endpoints: &RemoteEndpoints,
    repo: &RepositoryReference,
) -> Option<EolInfo> {
    let url = endpoints.raw_url(repo, &["eol", "eol.json"]).ok()?;
    let response = http::get_metadata(client, &url).await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.json::<EolInfo>().await.ok()
}

/// The contents API wraps base64 at 60 columns.
fn decode_content(encoded: &str) -> Option<EolInfo> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wrapped_base64() {
        let json = r#"{"isEOL": true, "contentIfTrue": "Please move to Netrix 2"}"#;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json);
        let wrapped = format!("{}\n{}\n", &encoded[..20], &encoded[20..]);

        let info = decode_content(&wrapped).unwrap();
        assert!(info.is_eol);
        assert_eq!(info.content_if_true, "Please move to Netrix 2");
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(decode_content("!!!").is_none());
    }

    #[test]
    fn default_is_supported() {
        let info = EolInfo::default();
        assert!(!info.is_eol);
        assert!(info.content_if_true.contains("no longer supported"));
    }
}
