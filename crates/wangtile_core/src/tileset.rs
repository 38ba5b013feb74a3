//! Tileset configuration: source image slicing and Wang sets

use crate::{TileId, WangSet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The source image a tileset is sliced from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetImage {
    /// Path to the image file, relative to the tileset file
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl TilesetImage {
    pub fn new(source: String, width: u32, height: u32) -> Self {
        Self {
            source,
            width,
            height,
        }
    }
}

/// Pixel sub-rectangle of the source image covered by one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A grid-sliced tileset with its Wang sets
///
/// Tile identifiers are assigned row-major from the image grid:
/// `id = row * columns + col`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tileset {
    pub id: Uuid,
    pub name: String,
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Total number of tiles in the image grid
    pub tile_count: u32,
    /// Number of tile columns in the image grid
    pub columns: u32,
    /// Gap between neighbouring tiles, in pixels
    #[serde(default)]
    pub spacing: u32,
    /// Border around the whole grid, in pixels
    #[serde(default)]
    pub margin: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TilesetImage>,
    #[serde(default)]
    pub wang_sets: Vec<WangSet>,
}

impl Tileset {
    /// Create a new tileset without an image or Wang sets
    pub fn new(
        name: String,
        tile_width: u32,
        tile_height: u32,
        tile_count: u32,
        columns: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tile_width,
            tile_height,
            tile_count,
            columns,
            spacing: 0,
            margin: 0,
            image: None,
            wang_sets: Vec::new(),
        }
    }

    /// Set the source image for this tileset
    pub fn with_image(mut self, image: TilesetImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Number of tile rows (the last row may be partial)
    pub fn rows(&self) -> u32 {
        if self.columns == 0 {
            0
        } else {
            self.tile_count.div_ceil(self.columns)
        }
    }

    /// Check if a tile id exists in this tileset
    pub fn contains_tile(&self, tile_id: TileId) -> bool {
        tile_id < self.tile_count
    }

    /// Tile id at a grid position, if it exists
    pub fn tile_id_at(&self, col: u32, row: u32) -> Option<TileId> {
        if col >= self.columns {
            return None;
        }
        let id = row.checked_mul(self.columns)?.checked_add(col)?;
        self.contains_tile(id).then_some(id)
    }

    /// Grid position `(col, row)` of a tile id
    pub fn tile_coords(&self, tile_id: TileId) -> Option<(u32, u32)> {
        if !self.contains_tile(tile_id) || self.columns == 0 {
            return None;
        }
        Some((tile_id % self.columns, tile_id / self.columns))
    }

    /// Pixel rectangle of a tile within the source image
    ///
    /// `None` for unknown tiles and for offsets that do not fit in `u32`.
    pub fn tile_rect(&self, tile_id: TileId) -> Option<TileRect> {
        let (col, row) = self.tile_coords(tile_id)?;
        let offset = |index: u32, size: u32| {
            let stride = u64::from(size) + u64::from(self.spacing);
            let pos = stride
                .checked_mul(u64::from(index))?
                .checked_add(u64::from(self.margin))?;
            u32::try_from(pos).ok()
        };
        Some(TileRect {
            x: offset(col, self.tile_width)?,
            y: offset(row, self.tile_height)?,
            width: self.tile_width,
            height: self.tile_height,
        })
    }

    /// Get a Wang set by name
    pub fn wang_set(&self, name: &str) -> Option<&WangSet> {
        self.wang_sets.iter().find(|ws| ws.name == name)
    }

    /// Add a Wang set, pointing it at this tileset
    pub fn add_wang_set(&mut self, mut wang_set: WangSet) {
        wang_set.tileset_id = self.id;
        self.wang_sets.push(wang_set);
    }
}
