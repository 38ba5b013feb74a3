//! Neighbour terrain membership around a cell
//!
//! Neighbours are stored in signature slot order, so bit `i` of the mask
//! and slot `i` of a `WangId` describe the same position.

use crate::WangId;

/// Neighbor direction flags, one bit per signature slot
pub mod dirs {
    pub const N: u8 = 0b0000_0001;  // North
    pub const NE: u8 = 0b0000_0010; // Northeast (corner)
    pub const E: u8 = 0b0000_0100;  // East
    pub const SE: u8 = 0b0000_1000; // Southeast (corner)
    pub const S: u8 = 0b0001_0000;  // South
    pub const SW: u8 = 0b0010_0000; // Southwest (corner)
    pub const W: u8 = 0b0100_0000;  // West
    pub const NW: u8 = 0b1000_0000; // Northwest (corner)
    pub const ALL: u8 = 0xff;
}

/// Grid offsets for each slot with y growing downward (row-major maps)
pub const OFFSETS: [(i32, i32); 8] = [
    (0, -1),  // 0 = Top
    (1, -1),  // 1 = TopRight
    (1, 0),   // 2 = Right
    (1, 1),   // 3 = BottomRight
    (0, 1),   // 4 = Bottom
    (-1, 1),  // 5 = BottomLeft
    (-1, 0),  // 6 = Left
    (-1, -1), // 7 = TopLeft
];

/// Whether each of the 8 neighbours shares the cell's terrain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Neighbors(pub [bool; 8]);

impl Neighbors {
    pub const NONE: Self = Neighbors([false; 8]);
    pub const ALL: Self = Neighbors([true; 8]);

    /// Build from a `dirs` bitmask
    pub fn from_bits(bits: u8) -> Self {
        Neighbors(std::array::from_fn(|i| bits & (1 << i) != 0))
    }

    pub fn to_bits(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0u8, |bits, (i, &same)| if same { bits | (1 << i) } else { bits })
    }

    /// Coordinates of the 8 neighbours of `(x, y)` in slot order, `None`
    /// where they fall outside the `i32` range
    pub fn positions(x: i32, y: i32) -> [Option<(i32, i32)>; 8] {
        std::array::from_fn(|i| {
            let (dx, dy) = OFFSETS[i];
            Some((x.checked_add(dx)?, y.checked_add(dy)?))
        })
    }

    /// Sample neighbours of `(x, y)` through a terrain predicate
    ///
    /// Neighbours beyond the `i32` range are never terrain.
    pub fn from_fn<F>(x: i32, y: i32, is_same_terrain: F) -> Self
    where
        F: Fn(i32, i32) -> bool,
    {
        let positions = Self::positions(x, y);
        Neighbors(std::array::from_fn(|i| {
            positions[i].is_some_and(|(nx, ny)| is_same_terrain(nx, ny))
        }))
    }

    /// Encode as a signature: matching neighbours carry `color`, others 0
    pub fn encode(&self, color: u32) -> WangId {
        WangId(std::array::from_fn(|i| if self.0[i] { color } else { 0 }))
    }
}
