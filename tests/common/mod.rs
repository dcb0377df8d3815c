// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use recipe_bump::{ArtifactFetcher, Error, ReleaseInfo, ReleaseSource, Result, SourceRef};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

/// Checksum that recipes start out with
pub const OLD_CHECKSUM: &str = "1111111111111111111111111111111111111111111111111111111111111111";

/// Write `<name>.toml` with one package per URL
pub fn write_recipe(dir: &Path, name: &str, version: &str, homepage: &str, urls: &[&str]) -> PathBuf {
    let mut content = format!(
        "# {name} recipe\nname = \"{name}\"\ndescription = \"{name} test recipe\"\nversion = \"{version}\"\n"
    );
    if !homepage.is_empty() {
        content.push_str(&format!("homepage = \"{homepage}\"\n"));
    }
    for url in urls {
        content.push_str(&format!(
            "\n[[packages]]\nos = \"linux\"\narch = \"amd64\"\nurl = \"{url}\"\nchecksum = \"{OLD_CHECKSUM}\"\n"
        ));
    }

    let path = dir.join(format!("{name}.toml"));
    std::fs::write(&path, content).unwrap();
    path
}

/// Release source backed by a map of `owner/repo` -> tag, recording lookups
#[derive(Default)]
pub struct FakeReleases {
    tags: HashMap<String, String>,
    pub lookups: RefCell<Vec<String>>,
}

impl FakeReleases {
    pub fn with(mut self, source: &str, tag: &str) -> Self {
        self.tags.insert(source.to_string(), tag.to_string());
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.borrow().len()
    }
}

impl ReleaseSource for FakeReleases {
    fn latest_release(&self, source: &SourceRef) -> Result<ReleaseInfo> {
        let key = source.to_string();
        self.lookups.borrow_mut().push(key.clone());
        match self.tags.get(&key) {
            Some(tag) => Ok(ReleaseInfo { tag: tag.clone() }),
            None => Err(Error::ReleaseError {
                upstream: source.clone(),
                reason: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

/// Artifact fetcher serving bytes from memory, recording downloads
#[derive(Default)]
pub struct FakeArtifacts {
    artifacts: HashMap<String, Vec<u8>>,
    pub downloads: RefCell<Vec<String>>,
}

impl FakeArtifacts {
    pub fn with(mut self, url: &str, bytes: &[u8]) -> Self {
        self.artifacts.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn download_count(&self) -> usize {
        self.downloads.borrow().len()
    }
}

impl ArtifactFetcher for FakeArtifacts {
    fn fetch(&self, url: &str) -> Result<Box<dyn Read + '_>> {
        self.downloads.borrow_mut().push(url.to_string());
        match self.artifacts.get(url) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(Error::DownloadError {
                url: url.to_string(),
                status: Some(404),
                body: None,
                reason: "client error".to_string(),
            }),
        }
    }
}

/// One canned HTTP response
#[derive(Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl CannedResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A throwaway HTTP/1.1 server on 127.0.0.1 answering by request path
///
/// Unknown paths get a 404. Each request's head (request line and headers)
/// is recorded for assertions.
pub struct TestServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start(routes: Vec<(&str, CannedResponse)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, CannedResponse> = routes
            .into_iter()
            .map(|(path, resp)| (path.to_string(), resp))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };

                let head = {
                    let mut head = String::new();
                    let mut reader = BufReader::new(&mut stream);
                    loop {
                        let mut line = String::new();
                        if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                            break;
                        }
                        head.push_str(&line);
                    }
                    head
                };

                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                recorded.lock().unwrap().push(head);

                let resp = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or_else(|| CannedResponse::new(404, "not found"));
                let header = format!(
                    "HTTP/1.1 {} Status\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
                    resp.status,
                    resp.body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(&resp.body);
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_heads(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Blocking client that never goes through an environment proxy
pub fn direct_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .no_proxy()
        .user_agent("recipe-bump-tests")
        .build()
        .unwrap()
}
