//! Listing service client
//!
//! Fetches the catalog's recent-uploads feed and turns it into an ordered
//! list of [`Asset`]s. The feed is a syndication document; each item yields
//! an id (last path segment of its unique-resource field) and a thumbnail
//! URL (first image source inside its description HTML). The feed carries
//! no archive URLs, so every listed asset has an empty `archive_url`.
//!
//! Parsing failures are fatal for the whole call - there is no
//! partial-listing recovery.

pub mod feed;

use std::fmt;

use crate::asset::{Asset, AssetError};
use crate::cache::AssetCache;
use crate::host::ImageRegistry;
use crate::remote::{self, FetchError};

/// The catalog's recent-uploads feed
pub const DEFAULT_FEED_URL: &str = "http://ourbricks.com/feeds/recent-uploads";

/// Error type for listing refreshes
#[derive(Debug)]
pub enum ListingError {
    /// Feed download failure
    Fetch(FetchError),
    /// Malformed feed document or a missing required field
    Parse(String),
    /// An item parsed fine but its asset could not be built
    Asset(AssetError),
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingError::Fetch(e) => write!(f, "fetch error: {}", e),
            ListingError::Parse(msg) => write!(f, "feed parse error: {}", msg),
            ListingError::Asset(e) => write!(f, "asset error: {}", e),
        }
    }
}

impl std::error::Error for ListingError {}

impl From<FetchError> for ListingError {
    fn from(e: FetchError) -> Self {
        ListingError::Fetch(e)
    }
}

impl From<AssetError> for ListingError {
    fn from(e: AssetError) -> Self {
        ListingError::Asset(e)
    }
}

/// Client for the catalog listing feed
#[derive(Debug, Clone)]
pub struct ListingClient {
    feed_url: String,
}

impl ListingClient {
    /// Create a client against the default feed
    pub fn new() -> Self {
        Self::with_feed_url(DEFAULT_FEED_URL)
    }

    /// Create a client against a custom feed URL
    pub fn with_feed_url(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }

    /// Get the feed URL this client polls
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch and parse the feed into assets, in document order
    ///
    /// Each item's thumbnail is cached and registered as a side effect of
    /// asset construction.
    pub fn get_listing(
        &self,
        cache: &AssetCache,
        images: &mut dyn ImageRegistry,
    ) -> Result<Vec<Asset>, ListingError> {
        let document = remote::fetch_string(&self.feed_url)?;
        let items = feed::parse_feed(&document)?;

        let mut assets = Vec::with_capacity(items.len());
        for item in items {
            let id = feed::id_from_resource(&item.resource_url).ok_or_else(|| {
                ListingError::Parse(format!(
                    "item resource '{}' has no usable path segment",
                    item.resource_url
                ))
            })?;
            // The feed does not expose archive locations
            let asset = Asset::new(id, item.image_url, String::new(), cache, images)?;
            assets.push(asset);
        }

        println!("Listed {} assets from {}", assets.len(), self.feed_url);
        Ok(assets)
    }
}

impl Default for ListingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRegistry {
        registered: Vec<String>,
    }

    impl ImageRegistry for RecordingRegistry {
        fn register_thumbnail(
            &mut self,
            asset_id: &str,
            _width: u32,
            _height: u32,
            _rgba: &[u8],
        ) -> Result<(), String> {
            self.registered.push(asset_id.to_string());
            Ok(())
        }
    }

    fn feed_document(base_url: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Recent uploads</title>
    <item>
      <guid>http://example.com/assets/chair42/</guid>
      <description><![CDATA[<p>A chair</p><img src="{base}/thumbs/chair.jpg" />]]></description>
    </item>
    <item>
      <guid>http://example.com/assets/lamp7</guid>
      <description>&lt;img class="thumb" src="{base}/thumbs/lamp.jpg"&gt;</description>
    </item>
  </channel>
</rss>"#,
            base = base_url
        )
    }

    #[test]
    fn test_get_listing_returns_assets_in_document_order() {
        let thumb = testutil::png_bytes(2, 2);
        let server = testutil::serve(vec![
            ("/thumbs/chair.jpg".to_string(), thumb.clone()),
            ("/thumbs/lamp.jpg".to_string(), thumb),
        ]);
        // The feed references the same fixture server for thumbnails
        let document = feed_document(&server.url);
        let feed_server = testutil::serve(vec![("/feed".to_string(), document.into_bytes())]);

        let dir = TempDir::new().unwrap();
        let cache = AssetCache::with_root(dir.path());
        let mut registry = RecordingRegistry::default();
        let client = ListingClient::with_feed_url(format!("{}/feed", feed_server.url));

        let listing = client.get_listing(&cache, &mut registry).unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, "chair42");
        assert_eq!(listing[1].id, "lamp7");
        for asset in &listing {
            assert!(!asset.image_url.is_empty());
            assert!(asset.archive_url.is_empty());
            assert!(asset.cached_image.as_ref().unwrap().exists());
        }
        assert_eq!(registry.registered, vec!["chair42", "lamp7"]);
    }

    #[test]
    fn test_malformed_feed_is_fatal() {
        let feed_server = testutil::serve(vec![(
            "/feed".to_string(),
            b"<html>not a feed</html>".to_vec(),
        )]);

        let dir = TempDir::new().unwrap();
        let cache = AssetCache::with_root(dir.path());
        let mut registry = RecordingRegistry::default();
        let client = ListingClient::with_feed_url(format!("{}/feed", feed_server.url));

        let err = client.get_listing(&cache, &mut registry).unwrap_err();

        assert!(matches!(err, ListingError::Parse(_)));
        assert!(registry.registered.is_empty());
    }

    #[test]
    fn test_unreachable_feed_is_a_fetch_error() {
        let dir = TempDir::new().unwrap();
        let cache = AssetCache::with_root(dir.path());
        let mut registry = RecordingRegistry::default();
        let client = ListingClient::with_feed_url("http://127.0.0.1:1/feed");

        let err = client.get_listing(&cache, &mut registry).unwrap_err();

        assert!(matches!(err, ListingError::Fetch(_)));
    }
}
