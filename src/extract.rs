//! ZIP extraction
//!
//! Writes every file entry of the artifact under the destination directory
//! and marks it owner read/write/execute. Entries whose names would escape
//! the destination are skipped.

use crate::core::output;
use crate::core::progress::{self, ProgressGuard};
use crate::error::FetchError;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Permission bits for extracted executables (owner rwx)
const EXECUTABLE_MODE: u32 = 0o700;

/// Set owner read/write/execute on `path`.
#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), FetchError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
        .map_err(|e| FetchError::io(path, e))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), FetchError> {
    Ok(()) // Executability comes from the extension on Windows
}

/// Extract `archive_path` into `dest` and return the written files in
/// archive order.
///
/// Files written before a failing entry are left in place.
pub(crate) fn extract_archive(
    archive_path: &Path,
    dest: &Path,
) -> Result<Vec<PathBuf>, FetchError> {
    let file = File::open(archive_path).map_err(|e| FetchError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| FetchError::Archive {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    let filename = archive_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());
    let _pb = ProgressGuard::new(progress::create_spinner(&format!("extracting {}", filename)));

    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| FetchError::Archive {
            path: archive_path.to_path_buf(),
            source: e,
        })?;

        let Some(name) = entry.enclosed_name() else {
            output::warning(&format!("skipping unsafe archive entry: {}", entry.name()));
            continue;
        };
        let outpath = dest.join(name);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath).map_err(|e| FetchError::io(&outpath, e))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
        }

        {
            let mut outfile = File::create(&outpath).map_err(|e| FetchError::io(&outpath, e))?;
            std::io::copy(&mut entry, &mut outfile).map_err(|e| FetchError::io(&outpath, e))?;
        }

        set_executable(&outpath)?;
        written.push(outpath);
    }

    output::detail(&format!(
        "extracted {} file(s) from {} to {}",
        written.len(),
        filename,
        dest.display()
    ));
    Ok(written)
}
