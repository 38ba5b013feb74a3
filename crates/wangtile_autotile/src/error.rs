//! Errors raised while building Wang tables or resolving tiles

use crate::WangId;
use thiserror::Error;
use wangtile_core::TileId;

/// Error type for table construction and tile resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutotileError {
    /// A signature does not have exactly 8 slots, or does not fit the set type
    #[error("malformed wang id for tile {tile_id}: {reason}")]
    MalformedSignature { tile_id: TileId, reason: String },
    /// A signature slot names a color the set never declared
    #[error("tile {tile_id} references undeclared wang color {color}")]
    UnknownColorReference { tile_id: TileId, color: u32 },
    /// The same tile was given two signatures
    #[error("tile {0} is declared more than once")]
    DuplicateTile(TileId),
    /// Neither an exact match nor the fallback policy produced a tile
    #[error("no tile matches wang id {0}")]
    NoTileForSignature(WangId),
    /// A terrain mask does not cover `width * height` cells
    #[error("terrain mask has {actual} cells, expected {expected}")]
    RegionSizeMismatch { expected: usize, actual: usize },
}
