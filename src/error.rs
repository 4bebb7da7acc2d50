//! Fetch error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while resolving, downloading or extracting a binary.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid product '{0}', must be ffmpeg or ffprobe")]
    InvalidProduct(String),

    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),

    #[error("request to {url} failed")]
    Connect {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("failed to read response from {url}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad status: {code} {text} ({url})")]
    BadStatus { url: String, code: u16, text: String },

    #[error("malformed catalog response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("platform {platform} not offered by release {version}")]
    PlatformNotOffered { platform: String, version: String },

    #[error("binary not found for product {product} on platform {platform}")]
    BinaryNotFound { product: String, platform: String },

    #[error("cannot resolve current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("filesystem error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read archive {}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive {} contains no files", .0.display())]
    EmptyArchive(PathBuf),

    #[error(
        "archive {} contains several files and none matches the product: {}",
        .archive.display(),
        .entries.join(", ")
    )]
    AmbiguousArchive {
        archive: PathBuf,
        entries: Vec<String>,
    },
}

impl FetchError {
    /// Split a `ureq` error into a service error (status) or a connectivity error.
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => FetchError::BadStatus {
                url: url.to_string(),
                code,
                text: response.status_text().to_string(),
            },
            ureq::Error::Transport(transport) => FetchError::Connect {
                url: url.to_string(),
                source: Box::new(transport),
            },
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
