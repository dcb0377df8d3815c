// src/upstream/github.rs

//! GitHub latest-release lookups over the REST API

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{ReleaseInfo, ReleaseSource, SourceRef};

/// Public GitHub REST API endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("recipe-bump/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Blocking GitHub API client
///
/// Built once per run and shared read-only by every recipe.
pub struct GithubReleases {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubReleases {
    /// Create a client against `api_url` (the public API or a GitHub
    /// Enterprise `/api/v3` endpoint)
    pub fn new(api_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create GitHub client: {e}")))?;

        Ok(Self::with_client(client, api_url, token))
    }

    /// Use a preconfigured client; it should already carry a `User-Agent`
    pub fn with_client(client: Client, api_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn latest_release_url(&self, source: &SourceRef) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, source.owner, source.repo
        )
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_release(&self, source: &SourceRef) -> Result<ReleaseInfo> {
        let url = self.latest_release_url(source);
        debug!("Fetching latest release from {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let release_error = |reason: String| Error::ReleaseError {
            upstream: source.clone(),
            reason,
        };

        let response = request
            .send()
            .map_err(|e| release_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(release_error(format!("HTTP {status}: {}", body.trim())));
        }

        let release: LatestRelease = response
            .json()
            .map_err(|e| release_error(format!("invalid release JSON: {e}")))?;

        debug!("{} latest release is {}", source, release.tag_name);
        Ok(ReleaseInfo {
            tag: release.tag_name,
        })
    }
}
