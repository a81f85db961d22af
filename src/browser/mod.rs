//! Browser panel context
//!
//! Explicit application-context object behind the host's catalog panel: it
//! owns the cache, the listing client, and the importer, and holds the
//! panel's state - the last-fetched listing, the editable model-URL field,
//! and a status line. The host's UI shell renders from this state and calls
//! the two handlers from its event dispatch.
//!
//! Both handlers are fire-and-forget from the host's point of view: they
//! block until the work completes, report no progress, and cannot be
//! cancelled.

use std::path::PathBuf;

use crate::asset::Asset;
use crate::cache::AssetCache;
use crate::config::BrowserConfig;
use crate::host::{ImageRegistry, SceneImporter};
use crate::import::{ImportError, Importer};
use crate::listing::{ListingClient, ListingError};

/// Panel title shown by the host shell
pub const PANEL_LABEL: &str = "OurBricks Browser";

/// Label of the panel's single editable field
pub const URL_FIELD_LABEL: &str = "URL";

/// State and actions behind the catalog browser panel
pub struct BrowserContext {
    cache: AssetCache,
    client: ListingClient,
    importer: Importer,
    /// Last fetched listing, replaced wholesale on refresh
    listing: Vec<Asset>,
    /// Contents of the panel's model-URL field, edited by the user
    pub model_url: String,
    /// Outcome line from the most recent action
    status: Option<String>,
}

impl BrowserContext {
    /// Wire up a context from configuration
    pub fn new(config: BrowserConfig) -> Self {
        let cache = AssetCache::with_root(config.cache_root);
        Self {
            client: ListingClient::with_feed_url(config.feed_url),
            importer: Importer::new(cache.clone()),
            cache,
            listing: Vec::new(),
            model_url: String::new(),
            status: None,
        }
    }

    /// The last-fetched listing, in feed order
    pub fn listing(&self) -> &[Asset] {
        &self.listing
    }

    /// Status line from the most recent action, for the panel footer
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Refresh the listing from the feed
    ///
    /// On success the previous listing is replaced wholesale; on failure it
    /// is left untouched and the error lands in the status line.
    pub fn refresh(&mut self, images: &mut dyn ImageRegistry) -> Result<usize, ListingError> {
        match self.client.get_listing(&self.cache, images) {
            Ok(assets) => {
                let count = assets.len();
                self.listing = assets;
                self.status = Some(format!("{} assets listed", count));
                Ok(count)
            }
            Err(e) => {
                eprintln!("Listing refresh failed: {}", e);
                self.status = Some(format!("Refresh failed: {}", e));
                Err(e)
            }
        }
    }

    /// Import the archive named in the panel's URL field
    ///
    /// Runs the whole download-extract-import pipeline against the current
    /// `model_url`. Returns the extracted scene path on success.
    pub fn import_model_url(
        &mut self,
        host: &mut dyn SceneImporter,
    ) -> Result<PathBuf, ImportError> {
        let url = self.model_url.trim().to_string();
        match self.importer.import(&url, host) {
            Ok(scene_path) => {
                self.status = Some(format!("Imported {}", scene_path.display()));
                Ok(scene_path)
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                self.status = Some(format!("Import failed: {}", e));
                Err(e)
            }
        }
    }
}
