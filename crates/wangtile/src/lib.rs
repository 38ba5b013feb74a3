//! Wang tile auto-tiling for Tiled tilesets
//!
//! This crate re-exports the `wangtile_*` crates and adds [`Autotiler`], which
//! owns a tileset together with one lookup table per Wang set.
//!
//! # Features
//! - `loader` (default): read `.tsx` / `.tsj` tilesets and TOML settings
//!
//! # Example
//!
//! ```rust,ignore
//! use wangtile::prelude::*;
//!
//! let autotiler = Autotiler::open("assets/tiles/watertiles-auto.tsx")?;
//! let resolver = autotiler.resolver("water").unwrap();
//!
//! let wang_id = WangId::filled(1);
//! let tile = resolver.resolve_with_index(&wang_id, 0)?;
//! let rect = autotiler.tileset().tile_rect(tile);
//! ```

mod autotiler;

pub use autotiler::Autotiler;

// Re-export member crates
pub use wangtile_autotile;
pub use wangtile_core;
#[cfg(feature = "loader")]
pub use wangtile_loader;

pub mod prelude {
    pub use crate::Autotiler;
    pub use wangtile_autotile::{
        autotile_region, neighbors_at, AutoTileResolver, AutotileError, EdgeHandling,
        FallbackPolicy, MatchKind, Neighbors, Resolution, ResolverConfig, Variation, WangId,
        WangTable,
    };
    pub use wangtile_core::{
        Color, TileId, TileRect, Tileset, TilesetImage, WangColor, WangSet, WangSetType,
        WangTile,
    };
    #[cfg(feature = "loader")]
    pub use wangtile_loader::{load_settings, load_tileset, LoadError};
}
