//! Wang set data: terrain colors and per-tile terrain signatures
//!
//! Signature slots use Tiled's position indexing:
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! Slot value 0 means "no terrain", anything else is a `WangColor::id`.

use crate::{Color, TileId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Returned when a Wang set type tag is not one of Tiled's three
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wang set type '{0}': expected corner, edge or mixed")]
pub struct ParseWangSetTypeError(pub String);

/// Type of Wang set - determines which slots participate in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WangSetType {
    /// Only the 4 corner slots (1, 3, 5, 7) carry terrain
    Corner,
    /// Only the 4 edge slots (0, 2, 4, 6) carry terrain
    Edge,
    /// Corners and edges are constrained jointly
    #[default]
    Mixed,
}

impl WangSetType {
    /// The tag Tiled writes for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            WangSetType::Corner => "corner",
            WangSetType::Edge => "edge",
            WangSetType::Mixed => "mixed",
        }
    }

    /// Whether slot `index` can carry terrain for this type
    pub fn uses_slot(&self, index: usize) -> bool {
        let corner = index % 2 == 1;
        match self {
            WangSetType::Corner => corner,
            WangSetType::Edge => !corner,
            WangSetType::Mixed => true,
        }
    }
}

impl FromStr for WangSetType {
    type Err = ParseWangSetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner" => Ok(WangSetType::Corner),
            "edge" => Ok(WangSetType::Edge),
            "mixed" => Ok(WangSetType::Mixed),
            other => Err(ParseWangSetTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for WangSetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terrain class within a Wang set (e.g. "water")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColor {
    /// 1-based identifier used in signature slots
    pub id: u32,
    /// May be empty
    pub name: String,
    /// Display color for UI visualization
    pub color: Color,
    /// Representative tile for this terrain
    pub tile: Option<TileId>,
    /// Relative weight when several colors could be chosen
    pub probability: f32,
}

/// The signature declared for one tile, as written in the source data
///
/// `wang_id` is kept as a plain list; its length and color references are
/// checked when the set is turned into a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WangTile {
    pub tile_id: TileId,
    pub wang_id: Vec<u32>,
}

impl WangTile {
    pub fn new(tile_id: TileId, wang_id: Vec<u32>) -> Self {
        Self { tile_id, wang_id }
    }
}

/// A Wang set attached to a tileset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangSet {
    pub id: Uuid,
    pub name: String,
    /// Which tileset this Wang set belongs to
    #[serde(default = "Uuid::nil")]
    pub tileset_id: Uuid,
    pub set_type: WangSetType,
    /// Tile used whenever no tile matches a signature exactly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_tile: Option<TileId>,
    /// Declared colors keyed by their id
    #[serde(default)]
    pub colors: BTreeMap<u32, WangColor>,
    /// Declared Wang tiles, in source order
    #[serde(default)]
    pub tiles: Vec<WangTile>,
}

impl WangSet {
    pub fn new(name: String, set_type: WangSetType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tileset_id: Uuid::nil(),
            set_type,
            fallback_tile: None,
            colors: BTreeMap::new(),
            tiles: Vec::new(),
        }
    }

    /// Add a color, assigning it the next free id. Returns the id.
    pub fn add_color(
        &mut self,
        name: String,
        color: Color,
        tile: Option<TileId>,
        probability: f32,
    ) -> u32 {
        let id = self.colors.keys().next_back().map_or(1, |last| last + 1);
        self.colors.insert(
            id,
            WangColor {
                id,
                name,
                color,
                tile,
                probability,
            },
        );
        id
    }

    /// Declare the signature of a tile
    pub fn add_tile(&mut self, tile_id: TileId, wang_id: Vec<u32>) {
        self.tiles.push(WangTile::new(tile_id, wang_id));
    }

    /// Get a color by id
    pub fn color(&self, id: u32) -> Option<&WangColor> {
        self.colors.get(&id)
    }

    /// Get a color id by name
    pub fn color_id(&self, name: &str) -> Option<u32> {
        self.colors.values().find(|c| c.name == name).map(|c| c.id)
    }

    /// All declared color ids, ascending
    pub fn color_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.colors.keys().copied()
    }
}
