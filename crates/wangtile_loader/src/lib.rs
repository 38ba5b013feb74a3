//! Tiled tileset and resolver settings loading
//!
//! Reads the subset of Tiled's tileset formats that auto-tiling needs: tile
//! slicing, the source image and Wang sets. Both the XML (`.tsx`) and JSON
//! (`.tsj`) encodings are supported.
//!
//! # Example
//!
//! ```rust,ignore
//! use wangtile_loader::{load_settings, load_tileset};
//!
//! let tileset = load_tileset("assets/watertiles-auto.tsx")?;
//! let config = load_settings("assets/autotile.toml")?;
//! ```

mod error;
mod settings;
mod tsj;
mod tsx;

pub use error::LoadError;
pub use settings::{load_settings, parse_settings};
pub use tsj::parse_tsj;
pub use tsx::parse_tsx;

use std::path::Path;
use tracing::info;
use wangtile_core::{TileId, Tileset};

/// Load a tileset, choosing the reader from the file extension
///
/// `.tsx` and `.xml` are read as XML, `.tsj` and `.json` as JSON.
pub fn load_tileset(path: impl AsRef<Path>) -> Result<Tileset, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let tileset = match extension.as_str() {
        "tsx" | "xml" => parse_tsx(&read_file(path)?)?,
        "tsj" | "json" => parse_tsj(&read_file(path)?)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    info!(
        "Loaded tileset '{}' from {}: {} tiles, {} Wang sets",
        tileset.name,
        path.display(),
        tileset.tile_count,
        tileset.wang_sets.len()
    );

    Ok(tileset)
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Tiled writes -1 where a tile reference is unset
pub(crate) fn tile_ref(raw: i64) -> Option<TileId> {
    TileId::try_from(raw).ok()
}
