// src/upstream/mod.rs

//! Upstream release sources
//!
//! A recipe's upstream is a GitHub repository, identified either through an
//! explicit override or by recognizing a GitHub URL in the recipe itself.
//! The [`ReleaseSource`] trait is the seam the resolver talks to; the real
//! implementation is [`GithubReleases`].

mod github;

pub use github::{GithubReleases, DEFAULT_GITHUB_API_URL};

use crate::error::Result;
use std::fmt;
use url::Url;

/// A GitHub repository, `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    pub owner: String,
    pub repo: String,
}

impl SourceRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Recognize a GitHub repository inside a URL
    ///
    /// Accepts any `http`/`https` URL on `github.com` (or `www.github.com`)
    /// with at least two path segments, so release download links such as
    /// `https://github.com/helm/helm/releases/download/v3.2.1/helm.tar.gz`
    /// resolve to `helm/helm`. A trailing `.git` on the repository is dropped.
    pub fn from_github_url(raw: &str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        if !matches!(url.host_str(), Some("github.com" | "www.github.com")) {
            return None;
        }

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return None;
        }

        Some(Self::new(owner, repo))
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The most recent published release of an upstream source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Tag name as published; not necessarily a semantic version
    pub tag: String,
}

/// Looks up the latest release of an upstream source
pub trait ReleaseSource {
    fn latest_release(&self, source: &SourceRef) -> Result<ReleaseInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_repository_url() {
        assert_eq!(
            SourceRef::from_github_url("https://github.com/helm/helm"),
            Some(SourceRef::new("helm", "helm"))
        );
        assert_eq!(
            SourceRef::from_github_url("https://github.com/cli/cli.git"),
            Some(SourceRef::new("cli", "cli"))
        );
        assert_eq!(
            SourceRef::from_github_url("http://www.github.com/socketio/socket.io/"),
            Some(SourceRef::new("socketio", "socket.io"))
        );
    }

    #[test]
    fn test_from_release_download_url() {
        let url = "https://github.com/junegunn/fzf/releases/download/0.24.0/fzf-0.24.0-linux_amd64.tar.gz";
        assert_eq!(
            SourceRef::from_github_url(url),
            Some(SourceRef::new("junegunn", "fzf"))
        );
    }

    #[test]
    fn test_rejects_non_github_urls() {
        assert_eq!(SourceRef::from_github_url("https://get.helm.sh/helm.tar.gz"), None);
        assert_eq!(SourceRef::from_github_url("https://gitlab.com/a/b"), None);
        assert_eq!(SourceRef::from_github_url("https://github.com/onlyowner"), None);
        assert_eq!(SourceRef::from_github_url("ftp://github.com/a/b"), None);
        assert_eq!(SourceRef::from_github_url("not a url"), None);
    }

    #[test]
    fn test_display() {
        let source = SourceRef::new("hashicorp", "vault");
        assert_eq!(source.to_string(), "hashicorp/vault");
    }
}
