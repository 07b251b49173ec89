use crate::error::{AppError, Result};

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::debug;

/// The extensions tricolor can read: every JPEG and PNG spelling.
pub fn default_extensions() -> Vec<String> {
    [ImageFormat::Jpeg, ImageFormat::Png]
        .iter()
        .flat_map(|format| format.extensions_str())
        .map(|ext| ext.to_string())
        .collect()
}

/// Lists the regular files directly inside `dir` whose extension matches one
/// of `extensions`, ignoring case. Subdirectories are not entered. The result
/// is sorted by path.
pub fn find_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let io_error = |source: std::io::Error| AppError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && has_extension(&path, extensions) {
            images.push(path);
        }
    }
    images.sort();

    debug!("found {} images in {}", images.len(), dir.display());
    Ok(images)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}
