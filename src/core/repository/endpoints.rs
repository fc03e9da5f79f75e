use reqwest::Url;

use super::RepositoryReference;
use crate::core::error::{LauncherError, LauncherResult};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";
const DEFAULT_BRANCH: &str = "main";
const MODS_DIRECTORY: &str = "mods";

/// Where the remote modpack lives: raw-content host, REST API host and the
/// fixed branch/directory layout inside the repository.
#[derive(Debug, Clone)]
pub struct RemoteEndpoints {
    pub raw_base: String,
    pub api_base: String,
    pub branch: String,
    pub mods_dir: String,
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self {
            raw_base: GITHUB_RAW_BASE.into(),
            api_base: GITHUB_API_BASE.into(),
            branch: DEFAULT_BRANCH.into(),
            mods_dir: MODS_DIRECTORY.into(),
        }
    }
}

impl RemoteEndpoints {
    /// Point both hosts at the same base, e.g. a local mock server.
    pub fn with_base_url(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            raw_base: base.clone(),
            api_base: base,
            ..Self::default()
        }
    }

    /// `{raw}/{owner}/{repo}/{branch}/{path...}`
    pub fn raw_url(&self, repo: &RepositoryReference, path: &[&str]) -> LauncherResult<String> {
        let mut segments = vec![repo.owner.as_str(), repo.repo.as_str(), self.branch.as_str()];
        segments.extend_from_slice(path);
        join_segments(&self.raw_base, &segments)
    }

    /// `{raw}/{owner}/{repo}/{branch}/mods/{file}`
    pub fn raw_mods_url(&self, repo: &RepositoryReference, file: &str) -> LauncherResult<String> {
        self.raw_url(repo, &[self.mods_dir.as_str(), file])
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path...}`
    pub fn contents_url(&self, repo: &RepositoryReference, path: &[&str]) -> LauncherResult<String> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"];
        segments.extend_from_slice(path);
        join_segments(&self.api_base, &segments)
    }

    pub fn version_file_url(&self, repo: &RepositoryReference) -> LauncherResult<String> {
        self.raw_mods_url(repo, "version.json")
    }

    pub fn manifest_url(&self, repo: &RepositoryReference) -> LauncherResult<String> {
        self.raw_mods_url(repo, "manifest.json")
    }

    pub fn mods_listing_url(&self, repo: &RepositoryReference) -> LauncherResult<String> {
        self.contents_url(repo, &[self.mods_dir.as_str()])
    }
}

/// Append percent-encoded path segments to a base URL.
fn join_segments(base: &str, segments: &[&str]) -> LauncherResult<String> {
    let mut url =
        Url::parse(base).map_err(|e| LauncherError::InvalidEndpoint(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| LauncherError::InvalidEndpoint(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}
