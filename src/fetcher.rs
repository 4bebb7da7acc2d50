//! End-to-end fetch pipeline
//!
//! product check -> platform -> catalog -> URL -> download -> extract -> cleanup

use crate::catalog;
use crate::config::Config;
use crate::core::output;
use crate::error::FetchError;
use crate::extract;
use crate::fetch::{self, DownloadTarget};
use crate::platform::PlatformKey;
use crate::product::Product;
use std::path::{Path, PathBuf};

/// Fetches ffmpeg-family binaries for one configuration.
///
/// The HTTP agent is built once in [`Fetcher::new`] and shared by the
/// catalog and artifact requests.
pub struct Fetcher {
    agent: ureq::Agent,
    api_url: String,
    platform: Option<PlatformKey>,
}

impl Fetcher {
    pub fn new(config: Config) -> Self {
        Self {
            agent: config.build_agent(),
            api_url: config.api_url,
            platform: None,
        }
    }

    /// Use `platform` instead of detecting the host.
    pub fn with_platform(mut self, platform: PlatformKey) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Download `product` at `version` into `dest` and return the path of the
    /// extracted executable.
    ///
    /// An empty `version` means latest; an empty `dest` means the current
    /// directory. Once the download has started, the intermediate
    /// `<dest>/<product>.zip` is removed before this returns, whether
    /// extraction succeeded or not. A zip already sitting in `dest` is left
    /// alone when the artifact request itself fails.
    pub fn download(
        &self,
        product: &str,
        version: &str,
        dest: &str,
    ) -> Result<PathBuf, FetchError> {
        let product = Product::parse_requested(product)?;
        let platform = match self.platform {
            Some(platform) => platform,
            None => PlatformKey::current()?,
        };

        output::action(&format!("Fetching {} for {}", product, platform));

        let catalog = catalog::fetch_catalog(&self.agent, &self.api_url, version)?;
        if !catalog.permalink.is_empty() {
            output::detail(&format!(
                "release {} ({})",
                catalog.version, catalog.permalink
            ));
        }

        let target = DownloadTarget {
            url: catalog.download_url(platform, product)?.to_string(),
            product,
            dest_dir: fetch::resolve_dest_dir(dest)?,
        };
        drop(catalog);

        let artifact = fetch::fetch_artifact(&self.agent, &target)?;
        let written = extract::extract_archive(artifact.path(), &target.dest_dir)?;
        let executable = select_executable(product, artifact.path(), written)?;

        output::success(&format!("{} ready at {}", product, executable.display()));
        Ok(executable)
    }
}

/// Pick the file to hand back from everything the archive produced.
///
/// The entry named after the product wins (`ffmpeg`, `ffmpeg.exe`); a lone
/// file is accepted under any name. Anything else is ambiguous.
fn select_executable(
    product: Product,
    archive: &Path,
    mut written: Vec<PathBuf>,
) -> Result<PathBuf, FetchError> {
    if let Some(pos) = written
        .iter()
        .position(|p| p.file_stem().is_some_and(|stem| stem == product.as_str()))
    {
        return Ok(written.swap_remove(pos));
    }

    match written.len() {
        0 => Err(FetchError::EmptyArchive(archive.to_path_buf())),
        1 => Ok(written.remove(0)),
        _ => Err(FetchError::AmbiguousArchive {
            archive: archive.to_path_buf(),
            entries: written
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }),
    }
}
