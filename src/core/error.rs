use std::path::PathBuf;
use thiserror::Error;

/// Remote resources the engine knows how to explain to the user when they
/// come back 404 or 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteResource {
    VersionFile,
    ModsDirectory,
}

impl RemoteResource {
    pub fn not_found_hint(self) -> &'static str {
        match self {
            RemoteResource::VersionFile => {
                "Repository or version file not found. Please check the repository URL and ensure version.json exists in the mods folder."
            }
            RemoteResource::ModsDirectory => {
                "Mods directory not found in repository. Please check the repository structure."
            }
        }
    }

    pub fn forbidden_hint(self) -> &'static str {
        match self {
            RemoteResource::VersionFile => {
                "Access denied to repository. Please check if the repository is public."
            }
            RemoteResource::ModsDirectory => {
                "GitHub API rate limited - please wait a little bit and try again."
            }
        }
    }
}

/// Central error type for the sync engine.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Validation ──────────────────────────────────────
    #[error("Invalid repository URL format '{0}'. Expected: https://github.com/owner/repo")]
    InvalidRepositoryUrl(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{} ({})", .resource.not_found_hint(), .url)]
    RemoteNotFound { resource: RemoteResource, url: String },

    #[error("{} ({})", .resource.forbidden_hint(), .url)]
    RemoteForbidden { resource: RemoteResource, url: String },

    #[error("Network error: Unable to connect to GitHub. Please check your internet connection. ({0})")]
    Network(String),

    #[error("Failed to download {file}: HTTP {status}")]
    DownloadFailed { file: String, status: u16 },

    // ── Remote data ─────────────────────────────────────
    #[error("Invalid version data: {0}")]
    InvalidVersionData(String),

    #[error("No mod list could be resolved for {0}")]
    ModListUnavailable(String),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Install flow ────────────────────────────────────
    #[error("{message}")]
    IncompatibleVersion {
        required: String,
        message: String,
        patcher: Option<Box<crate::core::compat::PatcherDescriptor>>,
    },

    #[error("Another modpack operation is already running ({0})")]
    Busy(String),

    #[error("Operation cancelled")]
    Cancelled,

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

// ── Serialization for the collaborator contract ────────
// The UI side only ever presents the message string.
impl serde::Serialize for LauncherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_carries_guidance() {
        let err = LauncherError::RemoteNotFound {
            resource: RemoteResource::ModsDirectory,
            url: "https://api.github.com/repos/o/r/contents/mods".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Mods directory not found in repository"));
        assert!(msg.contains("contents/mods"));
    }

    #[test]
    fn serializes_as_display_string() {
        let err = LauncherError::DownloadFailed {
            file: "sodium.jar".into(),
            status: 500,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Failed to download sodium.jar: HTTP 500\"");
    }
}
