//! Fetch ffmpeg-family binaries from the ffbinaries catalog
//!
//! Resolves a platform-specific build of `ffmpeg` or `ffprobe`, downloads
//! the zipped release and extracts the executable onto local disk with
//! owner execute permission.
//!
//! # Example
//!
//! ```no_run
//! // latest ffprobe into ./bin
//! let path = ffbinaries::download("ffprobe", "", "bin")?;
//! println!("ffprobe at {}", path.display());
//! # Ok::<(), ffbinaries::FetchError>(())
//! ```
//!
//! # Pipeline
//!
//! 1. The product name is checked (`ffmpeg` or `ffprobe`) before any request.
//! 2. The host OS is mapped to a catalog key (`windows-64`, `linux-64`, `osx-64`).
//! 3. `GET <api-url>/<version>` returns the release catalog (`latest` if empty).
//! 4. The artifact is written to `<dest>/<product>.zip`.
//! 5. Its entries are extracted into `<dest>` and the zip is removed.
//!
//! Use [`Fetcher`] with an explicit [`Config`] to point at another catalog
//! or tune timeouts.

mod catalog;
mod config;
mod core;
mod error;
mod extract;
mod fetch;
mod fetcher;
mod platform;
mod product;

pub use crate::core::output;
pub use config::{Config, DEFAULT_API_URL};
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use platform::PlatformKey;
pub use product::Product;

use std::path::PathBuf;

/// Download `product` at `version` into `dest` using [`Config::from_env`].
///
/// An empty `version` means latest; an empty `dest` means the current
/// directory. Returns the path of the extracted executable.
pub fn download(product: &str, version: &str, dest: &str) -> Result<PathBuf, FetchError> {
    Fetcher::new(Config::from_env()).download(product, version, dest)
}
