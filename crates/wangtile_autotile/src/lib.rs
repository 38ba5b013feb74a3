//! Tiled-compatible Wang tile resolution
//!
//! This crate turns a `WangSet` into an immutable lookup table and selects
//! tiles for grid cells from their neighbours' terrain.
//!
//! # Features
//! - Corner, Edge, and Mixed Wang set validation
//! - O(1) exact signature lookup
//! - Random, indexed or seeded choice between variant tiles
//! - Declared-fallback and closest-signature degradation
//! - Whole-region auto-tiling from a terrain mask
//!
//! # Example
//!
//! ```rust,ignore
//! use wangtile_autotile::{AutoTileResolver, Neighbors, WangTable};
//!
//! let table = WangTable::build(&wang_set)?;
//! let resolver = AutoTileResolver::new(&table);
//!
//! // Water above, below and to both sides, plus the top-left corner
//! let neighbors = Neighbors([true, false, true, false, true, false, true, true]);
//! let tile = resolver.resolve_with_index(&resolver.signature(neighbors, 1), 0)?;
//! ```

pub mod config;
mod error;
pub mod neighbors;
pub mod region;
pub mod resolver;
pub mod table;
mod wang_id;

// Re-export main types at crate root
pub use config::{EdgeHandling, FallbackPolicy, ResolverConfig, Variation};
pub use error::AutotileError;
pub use neighbors::Neighbors;
pub use region::{autotile_region, neighbors_at};
pub use resolver::{AutoTileResolver, MatchKind, Resolution};
pub use table::WangTable;
pub use wang_id::WangId;

// Re-export wangtile_core
pub use wangtile_core;
