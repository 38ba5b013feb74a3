//! Resolver policy configuration

use serde::{Deserialize, Serialize};

/// What to do when no tile matches a signature exactly
///
/// A fallback tile declared by the Wang set always takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Pick the tile agreeing on the most slots, lowest tile id on ties
    #[default]
    Similarity,
    /// Report `NoTileForSignature`
    Strict,
}

/// How one tile is chosen when several share a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    /// Always the lowest tile id
    #[default]
    Lowest,
    /// Deterministic per cell, derived from the seed and the cell position
    Seeded { seed: u64 },
    /// Uniformly random on every call
    Random,
}

/// How out-of-bounds neighbours are treated when tiling a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeHandling {
    /// Cells outside the region are not terrain
    #[default]
    TreatAsEmpty,
    /// Cells outside the region continue the terrain
    TreatAsTerrain,
}

/// Policy settings for an `AutoTileResolver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    pub fallback: FallbackPolicy,
    pub variation: Variation,
    /// Drop diagonal neighbours not backed by both adjacent edges before lookup
    pub normalize_corners: bool,
    pub edge_handling: EdgeHandling,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    pub fn with_normalized_corners(mut self, normalize: bool) -> Self {
        self.normalize_corners = normalize;
        self
    }

    pub fn with_edge_handling(mut self, edge_handling: EdgeHandling) -> Self {
        self.edge_handling = edge_handling;
        self
    }
}
