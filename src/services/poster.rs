// src/services/poster.rs

//! Poster image download.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::http::PageFetcher;

/// Saves a movie's poster as `<movie dir>/<folder name>.jpg`.
pub struct PosterDownloader<'a> {
    fetcher: &'a dyn PageFetcher,
    image_base: String,
}

impl<'a> PosterDownloader<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, image_base: &str) -> Self {
        Self {
            fetcher,
            image_base: image_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_base, poster_path.trim_start_matches('/'))
    }

    /// Download the poster for the movie folder `parent_dir/folder_name`.
    pub fn download(
        &self,
        poster_path: &str,
        parent_dir: &Path,
        folder_name: &str,
    ) -> Result<PathBuf> {
        let url = self.poster_url(poster_path);
        log::info!("Get movie poster from: {}", url);

        let bytes = self.fetcher.fetch_bytes(&url)?;
        let target = poster_file(parent_dir, folder_name);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&target, bytes)?;

        log::info!("Movie poster was saved in: {}", target.display());
        Ok(target)
    }
}

/// `parent_dir/folder_name/folder_name.jpg`, ignoring trailing slashes.
pub fn poster_file(parent_dir: &Path, folder_name: &str) -> PathBuf {
    let folder_name = folder_name.trim_end_matches(['/', '\\']);
    parent_dir
        .join(folder_name)
        .join(format!("{folder_name}.jpg"))
}
