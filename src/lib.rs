//! OurBricks integration for 3D content-creation hosts
//!
//! A thin synchronous layer between the OurBricks catalog service, a local
//! per-asset download cache, and a host application's native scene importer.
//! The host plugs in through two seams ([`host::SceneImporter`] and
//! [`host::ImageRegistry`]) and drives everything else from its UI events
//! via [`browser::BrowserContext`].
//!
//! Every operation blocks its caller until the network/file work finishes.
//! That is deliberate: the host dispatches UI events on a single thread and
//! nothing here is cancellable.

pub mod asset;
pub mod browser;
pub mod cache;
pub mod config;
pub mod host;
pub mod import;
pub mod listing;
pub mod remote;

#[cfg(test)]
pub(crate) mod testutil;

pub use asset::{Asset, AssetError};
pub use browser::BrowserContext;
pub use cache::{AssetCache, CacheError};
pub use config::BrowserConfig;
pub use host::{ImageRegistry, SceneImporter};
pub use import::{ImportError, Importer};
pub use listing::{ListingClient, ListingError};
pub use remote::FetchError;
