// src/pipeline/scan.rs

//! Movie folder discovery.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Names of the movie folders directly under `root`, sorted.
///
/// Plain files and entries ending in `.srt` are skipped.
pub fn list_movies(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root)?.collect::<std::io::Result<Vec<_>>>()?;
    log::info!("Total entries in {}: {}", root.display(), entries.len());

    let mut movies: Vec<String> = entries
        .iter()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| !name.ends_with(".srt"))
        .collect();
    movies.sort();

    log::info!("Found {} movie folders in {}", movies.len(), root.display());
    Ok(movies)
}
