//! Host application seams
//!
//! The host's scene graph, importer, and image system are external
//! collaborators; these traits are the whole surface this crate needs from
//! them. Host-side failures cross the seam as plain strings.

use std::path::Path;

/// Native scene import, e.g. a COLLADA import operation
pub trait SceneImporter {
    /// Import the scene file at `path` into the host's current scene
    fn import_scene(&mut self, path: &Path) -> Result<(), String>;
}

/// Host image/texture registration for thumbnail display
pub trait ImageRegistry {
    /// Register a decoded RGBA thumbnail under an asset id
    ///
    /// `rgba` is tightly packed, `width * height * 4` bytes.
    fn register_thumbnail(
        &mut self,
        asset_id: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<(), String>;
}
