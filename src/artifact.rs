// src/artifact.rs

//! Downloading new artifacts and computing their checksums
//!
//! The new download URL is derived from the old one by swapping the version
//! string. That only works when the old version does not also appear in the
//! URL for some unrelated reason; recipes that use `%(version)s` avoid the
//! problem entirely.

use crate::error::{Error, Result};
use crate::hash::{hash_reader, Checksum};
use crate::plan::{PackageUpdate, UpdatePlan, VersionBump};
use crate::recipe::{Package, Recipe, VERSION_TEMPLATE};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Source of artifact bytes
pub trait ArtifactFetcher {
    /// Open a stream over the artifact at `url`
    fn fetch(&self, url: &str) -> Result<Box<dyn Read + '_>>;
}

/// Fetches artifacts over HTTP with a shared blocking client
pub struct HttpArtifactFetcher {
    client: Client,
}

impl HttpArtifactFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Use a preconfigured client (proxies, TLS roots, custom timeouts)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ArtifactFetcher for HttpArtifactFetcher {
    fn fetch(&self, url: &str) -> Result<Box<dyn Read + '_>> {
        debug!("Downloading {}", url);

        let response = self.client.get(url).send().map_err(|e| Error::DownloadError {
            url: url.to_string(),
            status: None,
            body: None,
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status.is_server_error() {
            let body = response.text().unwrap_or_default();
            return Err(Error::DownloadError {
                url: url.to_string(),
                status: Some(status.as_u16()),
                body: Some(body),
                reason: "server error".to_string(),
            });
        }
        if status.is_client_error() {
            return Err(Error::DownloadError {
                url: url.to_string(),
                status: Some(status.as_u16()),
                body: None,
                reason: "client error".to_string(),
            });
        }

        Ok(Box::new(response))
    }
}

/// Derive the recipe URL for a new version
///
/// Templated URLs are version-independent and stay as written.
pub fn derive_new_url(pkg: &Package, old_version: &str, new_version: &str) -> String {
    if pkg.is_templated() {
        pkg.url.clone()
    } else {
        pkg.url.replace(old_version, new_version)
    }
}

/// Computes new checksums for the packages of an outdated recipe
pub struct ArtifactHasher<'a> {
    fetcher: &'a dyn ArtifactFetcher,
}

impl<'a> ArtifactHasher<'a> {
    pub fn new(fetcher: &'a dyn ArtifactFetcher) -> Self {
        Self { fetcher }
    }

    /// Download `url` and hash the body as it streams in
    pub fn checksum(&self, url: &str) -> Result<Checksum> {
        let mut body = self.fetcher.fetch(url)?;
        hash_reader(&mut body).map_err(|e| Error::DownloadError {
            url: url.to_string(),
            status: None,
            body: None,
            reason: format!("reading response body: {e}"),
        })
    }

    /// Build the full update plan for `recipe`, hashing every package
    ///
    /// Stops at the first package that cannot be downloaded.
    pub fn plan(&self, recipe: &Recipe, bump: &VersionBump) -> Result<UpdatePlan> {
        let mut packages = Vec::with_capacity(recipe.packages.len());

        for pkg in &recipe.packages {
            let new_url = derive_new_url(pkg, &bump.old_version, &bump.new_version);
            if !pkg.is_templated() && new_url == pkg.url {
                warn!(
                    "{}: url {} does not mention version {}, re-hashing the same artifact",
                    recipe.name, pkg.url, bump.old_version
                );
            }

            let fetch_url = new_url.replace(VERSION_TEMPLATE, &bump.new_version);
            let checksum = self.checksum(&fetch_url)?;
            info!("{}: {} sha256 {}", recipe.name, fetch_url, checksum);

            packages.push(PackageUpdate {
                old_url: pkg.url.clone(),
                new_url,
                fetch_url,
                old_checksum: pkg.checksum.clone(),
                new_checksum: checksum.into_string(),
            });
        }

        Ok(UpdatePlan {
            old_version: bump.old_version.clone(),
            new_version: bump.new_version.clone(),
            packages,
        })
    }
}
