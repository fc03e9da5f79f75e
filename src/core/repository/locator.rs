// ─── Repository Locator ───
// Turns a user-supplied repository URL into the owner/repo pair every
// remote lookup is built from.

use reqwest::Url;
use serde::Serialize;

use crate::core::error::{LauncherError, LauncherResult};

/// Owner/repository pair extracted from a hosting-service URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReference {
    pub owner: String,
    pub repo: String,
}

impl RepositoryReference {
    /// Parse `https://<host>/<owner>/<repo>[.git][/...]`.
    ///
    /// A trailing `.git` and anything after the repository segment are
    /// dropped. Every other shape is rejected with
    /// [`LauncherError::InvalidRepositoryUrl`].
    pub fn parse(repository_url: &str) -> LauncherResult<Self> {
        let invalid = || LauncherError::InvalidRepositoryUrl(repository_url.to_string());

        let url = Url::parse(repository_url.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid());
        }

        let mut segments = url.path_segments().ok_or_else(invalid)?;
        let owner = segments.next().unwrap_or_default();
        let raw_repo = segments.next().unwrap_or_default();
        let repo = raw_repo.strip_suffix(".git").unwrap_or(raw_repo);

        if owner.is_empty() || repo.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner_repo(url: &str) -> (String, String) {
        let r = RepositoryReference::parse(url).unwrap();
        (r.owner, r.repo)
    }

    #[test]
    fn parses_plain_git_suffix_and_tree_urls() {
        let expected = ("O".to_string(), "R".to_string());
        assert_eq!(owner_repo("https://github.com/O/R"), expected);
        assert_eq!(owner_repo("https://github.com/O/R.git"), expected);
        assert_eq!(owner_repo("https://github.com/O/R/tree/main"), expected);
        assert_eq!(owner_repo("https://github.com/O/R/"), expected);
    }

    #[test]
    fn accepts_other_hosts() {
        let r = RepositoryReference::parse("https://git.example.org/team/pack").unwrap();
        assert_eq!(r.to_string(), "team/pack");
    }

    #[test]
    fn rejects_malformed_urls() {
        for url in [
            "",
            "github.com/O/R",
            "not a url",
            "https://github.com",
            "https://github.com/O",
            "https://github.com//R",
            "https://github.com/O/.git",
            "ftp://github.com/O/R",
        ] {
            let err = RepositoryReference::parse(url).unwrap_err();
            assert!(
                matches!(err, LauncherError::InvalidRepositoryUrl(_)),
                "{url} should be rejected"
            );
        }
    }
}
