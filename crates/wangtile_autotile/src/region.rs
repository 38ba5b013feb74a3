//! Auto-tiling a whole terrain mask
//!
//! Masks are row-major with y growing downward, matching tile map layers.

use crate::config::EdgeHandling;
use crate::{AutoTileResolver, AutotileError, Neighbors};
use wangtile_core::TileId;

/// Neighbour membership of cell `(x, y)` in a row-major terrain mask
pub fn neighbors_at(
    mask: &[bool],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    edge: EdgeHandling,
) -> Neighbors {
    let outside = edge == EdgeHandling::TreatAsTerrain;
    let positions = Neighbors::positions(x, y);
    Neighbors(std::array::from_fn(|i| {
        let Some((nx, ny)) = positions[i] else {
            return outside;
        };
        match (u32::try_from(nx), u32::try_from(ny)) {
            (Ok(nx), Ok(ny)) if nx < width && ny < height => {
                let nidx = ny as usize * width as usize + nx as usize;
                mask.get(nidx).copied().unwrap_or(false)
            }
            _ => outside,
        }
    }))
}

/// Resolve a tile for every terrain cell of `mask`
///
/// Cells that are `true` receive a tile of terrain `color`; all others stay
/// `None`. Edges and variants follow the resolver's config.
pub fn autotile_region(
    resolver: &AutoTileResolver<'_>,
    mask: &[bool],
    width: u32,
    height: u32,
    color: u32,
) -> Result<Vec<Option<TileId>>, AutotileError> {
    let expected = width as usize * height as usize;
    if mask.len() != expected {
        return Err(AutotileError::RegionSizeMismatch {
            expected,
            actual: mask.len(),
        });
    }

    let edge = resolver.config().edge_handling;
    let mut tiles = vec![None; expected];

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            if !mask[idx] {
                continue;
            }
            let neighbors = neighbors_at(mask, width, height, x as i32, y as i32, edge);
            let wang_id = resolver.signature(neighbors, color);
            tiles[idx] = Some(resolver.resolve_cell(&wang_id, x as i32, y as i32)?);
        }
    }

    Ok(tiles)
}
