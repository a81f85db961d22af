//! Asset cache directories
//!
//! Filesystem convention mapping an asset id to a local directory that holds
//! everything downloaded for that asset: thumbnail, archive, and extracted
//! archive contents. Files inside are prefixed with the asset id so nothing
//! collides with extracted entries.
//!
//! There is no eviction and no size bound. Callers with the same id are not
//! coordinated; the host's single-threaded UI dispatch is what keeps this
//! safe.

use std::fmt;
use std::path::{Path, PathBuf};

/// Directory name under the platform cache dir
pub const CACHE_DIR_NAME: &str = "ourbricks";

/// Suffix for the cached thumbnail, appended to the asset id
pub const THUMBNAIL_SUFFIX: &str = "-thumbnail.jpg";

/// Suffix for the downloaded archive, appended to the asset id
pub const ARCHIVE_SUFFIX: &str = "-archive.zip";

/// Error type for cache operations
#[derive(Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Directory creation failed
    Io(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e.to_string())
    }
}

/// Per-asset download cache rooted at a single directory
///
/// Thumbnails persist here so the host can keep referencing them between
/// sessions; archives and their extracted contents stay because textures
/// referenced by an imported scene need to remain on disk.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    /// Create a cache rooted at the platform cache directory
    ///
    /// Falls back to a relative `ourbricks` directory when the platform
    /// reports no cache dir.
    pub fn new() -> Self {
        let root = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CACHE_DIR_NAME);
        Self { root }
    }

    /// Create a cache with a custom root directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic directory for one asset (not created)
    pub fn asset_dir(&self, asset_id: &str) -> PathBuf {
        self.root.join(asset_id)
    }

    /// Return the asset's directory, creating it if absent
    ///
    /// Idempotent: repeated calls return the same path and succeed once the
    /// directory exists.
    pub fn ensure_dir(&self, asset_id: &str) -> Result<PathBuf, CacheError> {
        let dir = self.asset_dir(asset_id);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Path of the asset's cached thumbnail
    pub fn thumbnail_path(&self, asset_id: &str) -> PathBuf {
        self.asset_dir(asset_id)
            .join(format!("{}{}", asset_id, THUMBNAIL_SUFFIX))
    }

    /// Path of the asset's downloaded archive
    pub fn archive_path(&self, asset_id: &str) -> PathBuf {
        self.asset_dir(asset_id)
            .join(format!("{}{}", asset_id, ARCHIVE_SUFFIX))
    }

    /// Check whether the asset's thumbnail is already on disk
    ///
    /// Existence only - a stale or corrupt cached file still counts.
    pub fn has_thumbnail(&self, asset_id: &str) -> bool {
        self.thumbnail_path(asset_id).exists()
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}
