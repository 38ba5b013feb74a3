//! Immutable Wang tile lookup table
//!
//! Built once from a `WangSet`, validated, then shared read-only. Exact
//! lookups are O(1) through a hash keyed on the full 8-slot signature.

use crate::{AutotileError, WangId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;
use wangtile_core::{TileId, WangSet, WangSetType};

/// Validated signatures of every Wang tile in one set
#[derive(Debug, Clone)]
pub struct WangTable {
    set_type: WangSetType,
    colors: BTreeSet<u32>,
    fallback_tile: Option<TileId>,
    /// tile id -> signature, ascending tile id
    entries: BTreeMap<TileId, WangId>,
    /// signature -> tile ids, each list ascending
    index: HashMap<WangId, Vec<TileId>>,
}

impl WangTable {
    /// Build a table from a Wang set's declared colors and tiles
    pub fn build(wang_set: &WangSet) -> Result<Self, AutotileError> {
        let table = Self::from_entries(
            wang_set.set_type,
            wang_set.color_ids(),
            wang_set.fallback_tile,
            wang_set
                .tiles
                .iter()
                .map(|t| (t.tile_id, t.wang_id.as_slice())),
        )?;
        debug!(
            "Built wang table '{}': {} tiles, {} distinct signatures",
            wang_set.name,
            table.len(),
            table.index.len()
        );
        Ok(table)
    }

    /// Build a table from raw `(tile id, slots)` entries
    ///
    /// Fails if an entry does not have exactly 8 slots, references a color
    /// outside `colors`, does not fit `set_type`, or repeats a tile id.
    pub fn from_entries<'a>(
        set_type: WangSetType,
        colors: impl IntoIterator<Item = u32>,
        fallback_tile: Option<TileId>,
        entries: impl IntoIterator<Item = (TileId, &'a [u32])>,
    ) -> Result<Self, AutotileError> {
        let colors: BTreeSet<u32> = colors.into_iter().collect();
        let mut table = Self {
            set_type,
            colors,
            fallback_tile,
            entries: BTreeMap::new(),
            index: HashMap::new(),
        };

        for (tile_id, slots) in entries {
            let wang_id = table.validate(tile_id, slots)?;
            if table.entries.insert(tile_id, wang_id).is_some() {
                return Err(AutotileError::DuplicateTile(tile_id));
            }
        }

        // Entries iterate in tile order, so every index list ends up sorted
        for (&tile_id, wang_id) in &table.entries {
            table.index.entry(*wang_id).or_default().push(tile_id);
        }

        Ok(table)
    }

    fn validate(&self, tile_id: TileId, slots: &[u32]) -> Result<WangId, AutotileError> {
        let wang_id =
            WangId::from_slots(slots).ok_or_else(|| AutotileError::MalformedSignature {
                tile_id,
                reason: format!("expected 8 slots, found {}", slots.len()),
            })?;

        if let Some(&color) = wang_id
            .slots()
            .iter()
            .find(|&&c| c != 0 && !self.colors.contains(&c))
        {
            return Err(AutotileError::UnknownColorReference { tile_id, color });
        }

        if let Some(reason) = wang_id.inconsistency(self.set_type) {
            return Err(AutotileError::MalformedSignature { tile_id, reason });
        }

        Ok(wang_id)
    }

    /// Tiles whose signature equals `wang_id` exactly, ascending
    pub fn lookup(&self, wang_id: &WangId) -> &[TileId] {
        self.index.get(wang_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every `(tile id, signature)` pair, ascending tile id
    pub fn all(&self) -> impl Iterator<Item = (TileId, &WangId)> + '_ {
        self.entries.iter().map(|(&tile_id, wang_id)| (tile_id, wang_id))
    }

    /// Signature of a tile, if it is part of the set
    pub fn get(&self, tile_id: TileId) -> Option<&WangId> {
        self.entries.get(&tile_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_type(&self) -> WangSetType {
        self.set_type
    }

    /// Declared color ids
    pub fn colors(&self) -> &BTreeSet<u32> {
        &self.colors
    }

    /// Tile declared by the set for signatures with no exact match
    pub fn fallback_tile(&self) -> Option<TileId> {
        self.fallback_tile
    }
}
