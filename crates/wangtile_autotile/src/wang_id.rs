//! Wang ID signatures
//!
//! A signature holds the terrain color at all 8 positions around a tile,
//! using Tiled's position indexing:
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! - Even indices (0,2,4,6) = Edges (Top, Right, Bottom, Left)
//! - Odd indices (1,3,5,7) = Corners (TopRight, BottomRight, BottomLeft, TopLeft)

use serde::{Deserialize, Serialize};
use std::fmt;
use wangtile_core::WangSetType;

/// Terrain colors at all 8 positions. 0 = no terrain.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WangId(pub [u32; 8]);

impl WangId {
    pub const TOP: usize = 0;
    pub const TOP_RIGHT: usize = 1;
    pub const RIGHT: usize = 2;
    pub const BOTTOM_RIGHT: usize = 3;
    pub const BOTTOM: usize = 4;
    pub const BOTTOM_LEFT: usize = 5;
    pub const LEFT: usize = 6;
    pub const TOP_LEFT: usize = 7;

    pub const EMPTY: Self = WangId([0; 8]);

    /// Create a WangId with all positions set to one color
    pub fn filled(color: u32) -> Self {
        WangId([color; 8])
    }

    /// Build from a declared slot list; `None` unless there are exactly 8 slots
    pub fn from_slots(slots: &[u32]) -> Option<Self> {
        <[u32; 8]>::try_from(slots).ok().map(WangId)
    }

    /// Color at a position
    pub fn get(&self, index: usize) -> u32 {
        self.0[index % 8]
    }

    pub fn slots(&self) -> &[u32; 8] {
        &self.0
    }

    /// Get opposite index (position on neighbor that faces us)
    pub fn opposite_index(i: usize) -> usize {
        (i + 4) % 8
    }

    /// Check if index is a corner (odd indices: 1,3,5,7)
    pub fn is_corner(i: usize) -> bool {
        i % 2 == 1
    }

    /// Get next index clockwise
    pub fn next_index(i: usize) -> usize {
        (i + 1) % 8
    }

    /// Get previous index counter-clockwise
    pub fn prev_index(i: usize) -> usize {
        (i + 7) % 8
    }

    /// Number of positions on which two signatures agree
    pub fn similarity(&self, other: &WangId) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|(a, b)| a == b).count()
    }

    /// Clear every corner whose two adjacent edges do not both carry the
    /// corner's color. A lone diagonal neighbour cannot show up in a mixed
    /// tile, so this maps raw neighbourhoods onto drawable signatures.
    pub fn with_normalized_corners(mut self) -> Self {
        for i in [1, 3, 5, 7] {
            let color = self.0[i];
            if color != 0
                && (self.0[Self::prev_index(i)] != color || self.0[Self::next_index(i)] != color)
            {
                self.0[i] = 0;
            }
        }
        self
    }

    /// Explain why this signature cannot belong to a set of `set_type`, if it can't
    pub fn inconsistency(&self, set_type: WangSetType) -> Option<String> {
        for (i, &color) in self.0.iter().enumerate() {
            if color == 0 {
                continue;
            }
            if !set_type.uses_slot(i) {
                return Some(format!(
                    "slot {} carries color {} but {} sets leave it empty",
                    i, color, set_type
                ));
            }
            if set_type == WangSetType::Mixed && Self::is_corner(i) {
                let before = self.0[Self::prev_index(i)];
                let after = self.0[Self::next_index(i)];
                if before != color || after != color {
                    return Some(format!(
                        "corner {} carries color {} but its edges carry {} and {}",
                        i, color, before, after
                    ));
                }
            }
        }
        None
    }

    /// Whether this signature fits a set of `set_type`
    pub fn is_consistent(&self, set_type: WangSetType) -> bool {
        self.inconsistency(set_type).is_none()
    }
}

impl From<[u32; 8]> for WangId {
    fn from(slots: [u32; 8]) -> Self {
        WangId(slots)
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g, h, i] = self.0;
        write!(f, "[{a},{b},{c},{d},{e},{g},{h},{i}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_helpers() {
        assert_eq!(WangId::opposite_index(WangId::TOP), WangId::BOTTOM);
        assert_eq!(WangId::opposite_index(WangId::TOP_LEFT), WangId::BOTTOM_RIGHT);
        assert_eq!(WangId::next_index(WangId::TOP_LEFT), WangId::TOP);
        assert_eq!(WangId::prev_index(WangId::TOP), WangId::TOP_LEFT);
        assert!(WangId::is_corner(WangId::BOTTOM_LEFT));
        assert!(!WangId::is_corner(WangId::LEFT));
    }

    #[test]
    fn test_from_slots_requires_eight() {
        assert_eq!(
            WangId::from_slots(&[1, 0, 1, 0, 1, 0, 1, 1]),
            Some(WangId([1, 0, 1, 0, 1, 0, 1, 1]))
        );
        assert!(WangId::from_slots(&[1, 0, 1, 0, 1, 0, 1]).is_none());
        assert!(WangId::from_slots(&[1, 0, 1, 0, 1, 0, 1, 1, 0]).is_none());
    }

    #[test]
    fn test_similarity() {
        let a = WangId([1, 1, 1, 1, 1, 1, 1, 1]);
        let b = WangId([0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(a.similarity(&b), 4);
        assert_eq!(a.similarity(&a), 8);
        assert_eq!(WangId::EMPTY.similarity(&a), 0);
    }

    #[test]
    fn test_normalize_corners() {
        // Diagonal-only neighbours collapse to nothing
        let raw = WangId([0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(raw.with_normalized_corners(), WangId::EMPTY);

        // A corner between two filled edges is kept
        let raw = WangId([1, 1, 1, 0, 0, 1, 0, 0]);
        assert_eq!(
            raw.with_normalized_corners(),
            WangId([1, 1, 1, 0, 0, 0, 0, 0])
        );
    }

    #[test]
    fn test_mixed_consistency() {
        assert!(WangId([1, 0, 1, 0, 1, 0, 1, 1]).is_consistent(WangSetType::Mixed));
        assert!(!WangId([0, 1, 0, 0, 0, 0, 0, 0]).is_consistent(WangSetType::Mixed));
        assert!(!WangId([1, 1, 0, 0, 0, 0, 0, 0]).is_consistent(WangSetType::Mixed));
    }

    #[test]
    fn test_corner_and_edge_consistency() {
        assert!(WangId([0, 1, 0, 1, 0, 0, 0, 0]).is_consistent(WangSetType::Corner));
        assert!(!WangId([1, 0, 0, 0, 0, 0, 0, 0]).is_consistent(WangSetType::Corner));
        assert!(WangId([1, 0, 1, 0, 0, 0, 0, 0]).is_consistent(WangSetType::Edge));
        assert!(!WangId([0, 1, 0, 0, 0, 0, 0, 0]).is_consistent(WangSetType::Edge));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            WangId([1, 0, 1, 0, 1, 0, 1, 1]).to_string(),
            "[1,0,1,0,1,0,1,1]"
        );
    }
}
