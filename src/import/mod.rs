//! Archive import pipeline
//!
//! Takes a model-archive URL, resolves the asset id baked into it, downloads
//! and extracts the archive into the asset's cache directory, and hands the
//! single scene file inside to the host's native importer.
//!
//! Nothing is rolled back on failure: a partially downloaded or extracted
//! asset stays on disk and the next attempt simply overwrites it.

use std::fmt;
use std::path::PathBuf;

use crate::cache::{AssetCache, CacheError};
use crate::host::SceneImporter;
use crate::remote::{self, FetchError};

/// URL path segment that marks a processed model archive
///
/// Asset URLs look like `.../<asset-id>/processed/<file>`; the id is the
/// segment immediately before the marker. Brittle, but it is the only id
/// the archive service exposes without a real metadata API.
pub const PROCESSED_MARKER: &str = "processed";

/// Extension of the importable scene description inside an archive
pub const SCENE_EXTENSION: &str = ".dae";

/// Error type for imports
#[derive(Debug)]
pub enum ImportError {
    /// The URL does not follow the `<id>/processed/...` convention
    UrlShape(String),
    /// Cache directory failure
    Cache(CacheError),
    /// Archive download failure
    Fetch(FetchError),
    /// The downloaded file is not a readable zip archive
    Archive(String),
    /// The archive holds zero or more than one scene file
    SceneCount { found: usize },
    /// The host's native importer failed
    Host(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UrlShape(msg) => write!(f, "unrecognized URL shape: {}", msg),
            ImportError::Cache(e) => write!(f, "cache error: {}", e),
            ImportError::Fetch(e) => write!(f, "fetch error: {}", e),
            ImportError::Archive(msg) => write!(f, "archive error: {}", msg),
            ImportError::SceneCount { found } => write!(
                f,
                "expected exactly one {} file in archive, found {}",
                SCENE_EXTENSION, found
            ),
            ImportError::Host(msg) => write!(f, "host importer failed: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<CacheError> for ImportError {
    fn from(e: CacheError) -> Self {
        ImportError::Cache(e)
    }
}

impl From<FetchError> for ImportError {
    fn from(e: FetchError) -> Self {
        ImportError::Fetch(e)
    }
}

/// Extract the asset id from an archive URL
///
/// The id is the path segment immediately preceding the
/// [`PROCESSED_MARKER`] segment. Fails before any network traffic when the
/// marker is absent or has nothing before it.
pub fn asset_id_from_url(url: &str) -> Result<String, ImportError> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segments: Vec<&str> = path.split('/').collect();

    let marker = segments
        .iter()
        .position(|segment| *segment == PROCESSED_MARKER)
        .ok_or_else(|| {
            ImportError::UrlShape(format!("no '{}' segment in '{}'", PROCESSED_MARKER, url))
        })?;

    match marker.checked_sub(1).map(|i| segments[i]) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ImportError::UrlShape(format!(
            "nothing precedes the '{}' segment in '{}'",
            PROCESSED_MARKER, url
        ))),
    }
}

/// Downloads, unpacks, and hands archives to the host importer
#[derive(Debug, Clone)]
pub struct Importer {
    cache: AssetCache,
}

impl Importer {
    /// Create an importer over the given cache
    pub fn new(cache: AssetCache) -> Self {
        Self { cache }
    }

    /// Import the model archive at `url` into the host scene
    ///
    /// Resolves the asset id from the URL, downloads the archive into the
    /// asset's cache directory, extracts everything in place, locates the
    /// single scene file, and delegates to the host importer. Returns the
    /// extracted scene path on success.
    pub fn import(&self, url: &str, host: &mut dyn SceneImporter) -> Result<PathBuf, ImportError> {
        let asset_id = asset_id_from_url(url)?;
        let dir = self.cache.ensure_dir(&asset_id)?;

        println!("Importing {} into {}", url, dir.display());
        let archive_path = self.cache.archive_path(&asset_id);
        remote::fetch(url, &archive_path)?;

        let file =
            std::fs::File::open(&archive_path).map_err(|e| ImportError::Archive(e.to_string()))?;
        let mut archive =
            zip::ZipArchive::new(file).map_err(|e| ImportError::Archive(e.to_string()))?;

        // Textures and the scene file need to live next to each other on
        // disk, so the whole archive is extracted before anything is scanned.
        archive
            .extract(&dir)
            .map_err(|e| ImportError::Archive(e.to_string()))?;

        let scenes: Vec<String> = archive
            .file_names()
            .filter(|name| name.ends_with(SCENE_EXTENSION))
            .map(|name| name.to_string())
            .collect();
        if scenes.len() != 1 {
            return Err(ImportError::SceneCount {
                found: scenes.len(),
            });
        }

        let scene_path = dir.join(&scenes[0]);
        host.import_scene(&scene_path).map_err(ImportError::Host)?;
        Ok(scene_path)
    }
}
