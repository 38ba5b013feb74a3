//! Core data structures for wangtile
//!
//! This crate provides the plain data types describing a Tiled tileset and
//! its Wang sets:
//! - `Tileset` - Grid-sliced source image plus tile metadata
//! - `WangSet` - Terrain colors and the Wang tiles that use them
//! - `WangColor` - A named terrain class
//! - `WangTile` - The 8-slot terrain signature declared for one tile
//! - `Color` - Display color parsed from Tiled's `#RRGGBB` notation
//!
//! Nothing here validates signatures; that happens when a lookup table is
//! built from a `WangSet` in `wangtile_autotile`.

mod color;
mod tileset;
mod wang;

pub use color::{Color, ParseColorError};
pub use tileset::{TileRect, Tileset, TilesetImage};
pub use wang::{ParseWangSetTypeError, WangColor, WangSet, WangSetType, WangTile};

/// Local tile identifier within a tileset (row-major, starting at 0)
pub type TileId = u32;
