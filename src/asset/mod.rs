//! Asset value object
//!
//! One entry of the remote catalog: an id plus the remote thumbnail/archive
//! URLs. Constructing an [`Asset`] pulls its thumbnail into the local cache
//! (only when absent) and registers the decoded image with the host so the
//! browser panel can display it.

use std::fmt;
use std::path::PathBuf;

use crate::cache::{AssetCache, CacheError};
use crate::host::ImageRegistry;
use crate::remote::{self, FetchError};

/// Error type for asset construction
#[derive(Debug)]
pub enum AssetError {
    /// Cache directory failure
    Cache(CacheError),
    /// Thumbnail download failure
    Fetch(FetchError),
    /// Cached thumbnail could not be read or decoded
    Image(String),
    /// Host image registration failure
    Host(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Cache(e) => write!(f, "cache error: {}", e),
            AssetError::Fetch(e) => write!(f, "fetch error: {}", e),
            AssetError::Image(msg) => write!(f, "image error: {}", msg),
            AssetError::Host(msg) => write!(f, "host error: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<CacheError> for AssetError {
    fn from(e: CacheError) -> Self {
        AssetError::Cache(e)
    }
}

impl From<FetchError> for AssetError {
    fn from(e: FetchError) -> Self {
        AssetError::Fetch(e)
    }
}

/// A remotely hosted model package: thumbnail image plus zipped scene archive
///
/// Identity is the id. Immutable after construction apart from the lazily
/// populated `cached_image` path.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Unique catalog identifier
    pub id: String,
    /// Remote thumbnail URL
    pub image_url: String,
    /// Remote archive URL
    ///
    /// Empty for assets built from the listing feed - the feed does not
    /// carry archive locations today.
    pub archive_url: String,
    /// Local path of the cached thumbnail, once ensured
    pub cached_image: Option<PathBuf>,
}

impl Asset {
    /// Build an asset and ensure its thumbnail is cached and registered
    ///
    /// The thumbnail is downloaded only when `<id>-thumbnail.jpg` is absent
    /// from the cache; presence is an existence check, never a content
    /// check, so a stale or corrupt cached file is not refreshed. The cached
    /// image is then decoded and handed to the host's image registry under
    /// the asset id.
    pub fn new(
        id: impl Into<String>,
        image_url: impl Into<String>,
        archive_url: impl Into<String>,
        cache: &AssetCache,
        images: &mut dyn ImageRegistry,
    ) -> Result<Self, AssetError> {
        let id = id.into();
        let image_url = image_url.into();
        let archive_url = archive_url.into();

        cache.ensure_dir(&id)?;
        let thumbnail = cache.thumbnail_path(&id);
        if !thumbnail.exists() {
            remote::fetch(&image_url, &thumbnail)?;
        }

        let bytes = std::fs::read(&thumbnail).map_err(|e| AssetError::Image(e.to_string()))?;
        let decoded =
            image::load_from_memory(&bytes).map_err(|e| AssetError::Image(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        images
            .register_thumbnail(&id, rgba.width(), rgba.height(), rgba.as_raw())
            .map_err(AssetError::Host)?;

        Ok(Self {
            id,
            image_url,
            archive_url,
            cached_image: Some(thumbnail),
        })
    }

    /// An asset known only by id, with no remote URLs and no thumbnail
    ///
    /// Used when an import resolves an id straight from an archive URL.
    pub fn resolved(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_url: String::new(),
            archive_url: String::new(),
            cached_image: None,
        }
    }
}
