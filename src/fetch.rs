//! Artifact download
//!
//! Streams the compressed build to `<dest>/<product>.zip`. The request is
//! made before the file is created, so a refused download touches nothing on
//! disk. From creation on the file is owned by an [`ArtifactGuard`].

use crate::core::output;
use crate::core::progress::{self, ProgressGuard};
use crate::error::FetchError;
use crate::product::Product;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Everything needed for one fetch-and-extract run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DownloadTarget {
    pub url: String,
    pub product: Product,
    pub dest_dir: PathBuf,
}

impl DownloadTarget {
    /// `<dest>/<product>.zip`
    pub fn artifact_path(&self) -> PathBuf {
        self.dest_dir.join(format!("{}.zip", self.product))
    }
}

/// Resolve the destination directory; empty means the current directory.
pub(crate) fn resolve_dest_dir(dest: &str) -> Result<PathBuf, FetchError> {
    if dest.is_empty() {
        std::env::current_dir().map_err(FetchError::CurrentDir)
    } else {
        Ok(PathBuf::from(dest))
    }
}

/// Removes the intermediate artifact when dropped.
///
/// A missing file is fine (the download may never have created it). Any
/// other removal failure is reported as a warning and not returned.
#[derive(Debug)]
pub(crate) struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => output::warning(&format!(
                "cannot remove {}: {}",
                self.path.display(),
                e
            )),
        }
    }
}

/// Download `target.url` into the artifact path.
///
/// The returned guard owns `<dest>/<product>.zip`. It is created right
/// before the file, so a pre-existing zip survives a refused request, and a
/// download that breaks off part-way removes what it wrote.
pub(crate) fn fetch_artifact(
    agent: &ureq::Agent,
    target: &DownloadTarget,
) -> Result<ArtifactGuard, FetchError> {
    let dest = target.artifact_path();
    let filename = format!("{}.zip", target.product);

    let response = agent
        .get(&target.url)
        .call()
        .map_err(|e| FetchError::from_ureq(&target.url, e))?;

    std::fs::create_dir_all(&target.dest_dir)
        .map_err(|e| FetchError::io(&target.dest_dir, e))?;

    let pb = ProgressGuard::new(progress::create_spinner(&format!(
        "downloading {}",
        filename
    )));

    // Get content length if available and upgrade progress bar
    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        progress::upgrade_to_bytes(pb.bar(), len);
    }

    let artifact = ArtifactGuard::new(dest.clone());
    let mut file = File::create(&dest).map_err(|e| FetchError::io(&dest, e))?;
    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| FetchError::Body {
            url: target.url.clone(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(|e| FetchError::io(&dest, e))?;

        total_bytes += bytes_read as u64;
        pb.bar().set_position(total_bytes);
    }

    file.flush().map_err(|e| FetchError::io(&dest, e))?;
    drop(file);
    drop(pb);

    output::detail(&format!("downloaded {} ({} bytes)", filename, total_bytes));
    Ok(artifact)
}
