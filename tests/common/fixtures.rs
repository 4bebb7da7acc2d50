//! Test fixtures - synthetic catalogs and release archives.

#![allow(dead_code)]

use std::io::{Cursor, Write};

/// Build an in-memory zip with the given `(name, content)` entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Catalog body offering `ffmpeg` and `ffprobe` for every platform key,
/// all pointing at `<base>/<product>.zip`.
pub fn catalog_json(version: &str, base: &str) -> serde_json::Value {
    let set = serde_json::json!({
        "ffmpeg": format!("{base}/ffmpeg.zip"),
        "ffprobe": format!("{base}/ffprobe.zip"),
    });
    serde_json::json!({
        "version": version,
        "permalink": format!("{base}/api/v1/version/{version}"),
        "bin": {
            "windows-64": set,
            "linux-64": set,
            "osx-64": set,
        }
    })
}
