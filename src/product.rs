//! Products published by the catalog

use crate::error::FetchError;
use std::fmt;

/// A named executable in a catalog binary set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    FFmpeg,
    FFprobe,
    /// Resolvable from the catalog but not accepted as a request.
    FFplay,
}

impl Product {
    /// Products a caller may ask to download.
    pub const REQUESTABLE: [Product; 2] = [Product::FFmpeg, Product::FFprobe];

    /// Parse a requested product name.
    ///
    /// Only `ffmpeg` and `ffprobe` are accepted. This runs before any
    /// network traffic so a bad name never costs a catalog request.
    pub fn parse_requested(name: &str) -> Result<Self, FetchError> {
        Self::REQUESTABLE
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| FetchError::InvalidProduct(name.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Product::FFmpeg => "ffmpeg",
            Product::FFprobe => "ffprobe",
            Product::FFplay => "ffplay",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
