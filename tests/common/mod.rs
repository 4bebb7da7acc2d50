//! Common test utilities for mock-server integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use ffbinaries::{Config, Fetcher, PlatformKey};
use wiremock::MockServer;

/// Catalog base URL served by `server`.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/api/v1/version", server.uri())
}

/// Quiet fetcher pinned to linux-64 and pointed at `server`.
pub fn linux_fetcher(server: &MockServer) -> Fetcher {
    ffbinaries::output::set_quiet(true);
    Fetcher::new(Config::default().with_api_url(api_url(server)))
        .with_platform(PlatformKey::Linux64)
}

/// Sorted names of everything directly inside `dir`.
pub fn dir_listing(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
