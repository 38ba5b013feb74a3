//! Tile selection for a single cell
//!
//! Given the terrain signature a cell needs, the resolver finds the Wang
//! tiles declaring it. When several tiles share a signature they are visual
//! variants and the caller's policy picks one. When none do, the set's
//! declared fallback tile is used, and failing that the tile agreeing on
//! the most slots.

use crate::config::{FallbackPolicy, ResolverConfig, Variation};
use crate::{AutotileError, Neighbors, WangId, WangTable};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;
use wangtile_core::TileId;

/// How a set of candidate tiles was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The signature is declared by every candidate
    Exact,
    /// The Wang set's declared fallback tile
    DeclaredFallback,
    /// Closest signatures, agreeing on `score` of the 8 slots
    Similar { score: usize },
}

/// Candidate tiles for a signature, ascending tile id
///
/// Only the resolver builds these, and never with an empty tile list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    kind: MatchKind,
    tiles: Vec<TileId>,
}

impl Resolution {
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Candidate tiles, ascending. Never empty.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// Choose a tile. Only exact matches are variants; anything else
    /// resolves to its lowest tile id.
    pub fn pick(&self, index: usize) -> TileId {
        match self.kind {
            MatchKind::Exact => self.tiles[index % self.tiles.len()],
            _ => self.tiles[0],
        }
    }

    pub fn is_exact(&self) -> bool {
        self.kind == MatchKind::Exact
    }
}

/// Selects tiles from a shared `WangTable`
///
/// Holds no mutable state: every call is a pure function of the signature,
/// the table and the config, so one resolver may serve many threads.
#[derive(Debug, Clone, Copy)]
pub struct AutoTileResolver<'a> {
    table: &'a WangTable,
    config: ResolverConfig,
}

impl<'a> AutoTileResolver<'a> {
    pub fn new(table: &'a WangTable) -> Self {
        Self::with_config(table, ResolverConfig::default())
    }

    pub fn with_config(table: &'a WangTable, config: ResolverConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &'a WangTable {
        self.table
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The signature a cell of terrain `color` needs given its neighbours
    ///
    /// Slots the table's set type never uses are left empty, so edge sets
    /// only look at the 4 orthogonal neighbours and corner sets at the 4
    /// diagonal ones.
    pub fn signature(&self, neighbors: Neighbors, color: u32) -> WangId {
        let set_type = self.table.set_type();
        let mut wang_id = neighbors.encode(color);
        for (i, slot) in wang_id.0.iter_mut().enumerate() {
            if !set_type.uses_slot(i) {
                *slot = 0;
            }
        }
        if self.config.normalize_corners {
            wang_id.with_normalized_corners()
        } else {
            wang_id
        }
    }

    /// All tiles that could be placed for `wang_id`
    pub fn candidates(&self, wang_id: &WangId) -> Result<Resolution, AutotileError> {
        let exact = self.table.lookup(wang_id);
        if !exact.is_empty() {
            return Ok(Resolution {
                kind: MatchKind::Exact,
                tiles: exact.to_vec(),
            });
        }

        if let Some(tile) = self.table.fallback_tile() {
            trace!("No exact match for {}, using declared fallback {}", wang_id, tile);
            return Ok(Resolution {
                kind: MatchKind::DeclaredFallback,
                tiles: vec![tile],
            });
        }

        match self.config.fallback {
            FallbackPolicy::Similarity => self
                .most_similar(wang_id)
                .ok_or(AutotileError::NoTileForSignature(*wang_id)),
            FallbackPolicy::Strict => Err(AutotileError::NoTileForSignature(*wang_id)),
        }
    }

    /// Tiles whose signature agrees with `wang_id` on the most slots
    fn most_similar(&self, wang_id: &WangId) -> Option<Resolution> {
        let mut best_score = 0;
        let mut best_tiles = Vec::new();

        // all() is ordered by tile id, so best_tiles stays ascending
        for (tile_id, candidate) in self.table.all() {
            let score = wang_id.similarity(candidate);
            if best_tiles.is_empty() || score > best_score {
                best_score = score;
                best_tiles.clear();
                best_tiles.push(tile_id);
            } else if score == best_score {
                best_tiles.push(tile_id);
            }
        }

        if best_tiles.is_empty() {
            return None;
        }

        trace!(
            "No exact match for {}, closest tiles {:?} agree on {} slots",
            wang_id,
            best_tiles,
            best_score
        );
        Some(Resolution {
            kind: MatchKind::Similar { score: best_score },
            tiles: best_tiles,
        })
    }

    /// Resolve `wang_id`, picking among variants uniformly at random
    pub fn resolve(&self, wang_id: &WangId, rng: &mut impl Rng) -> Result<TileId, AutotileError> {
        let resolution = self.candidates(wang_id)?;
        let index = rng.gen_range(0..resolution.tiles.len());
        Ok(resolution.pick(index))
    }

    /// Resolve `wang_id`, picking variant `index` (wrapping) for reproducible output
    pub fn resolve_with_index(
        &self,
        wang_id: &WangId,
        index: usize,
    ) -> Result<TileId, AutotileError> {
        Ok(self.candidates(wang_id)?.pick(index))
    }

    /// Resolve the tile for a cell at `(x, y)` using the configured `Variation`
    pub fn resolve_cell(&self, wang_id: &WangId, x: i32, y: i32) -> Result<TileId, AutotileError> {
        let resolution = self.candidates(wang_id)?;
        let count = resolution.tiles.len();
        let index = match self.config.variation {
            Variation::Lowest => 0,
            Variation::Seeded { seed } => cell_rng(seed, x, y).gen_range(0..count),
            Variation::Random => rand::thread_rng().gen_range(0..count),
        };
        Ok(resolution.pick(index))
    }

    /// Encode `neighbors` and resolve, picking among variants at random
    pub fn resolve_neighbors(
        &self,
        neighbors: Neighbors,
        color: u32,
        rng: &mut impl Rng,
    ) -> Result<TileId, AutotileError> {
        self.resolve(&self.signature(neighbors, color), rng)
    }
}

/// Deterministic generator for one cell of a seeded map
fn cell_rng(seed: u64, x: i32, y: i32) -> SmallRng {
    let mixed = seed
        ^ (x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    SmallRng::seed_from_u64(mixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::dirs;
    use crate::table::tests::water_set;
    use std::collections::HashSet;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    fn water_table() -> WangTable {
        WangTable::build(&water_set()).unwrap()
    }

    #[test]
    fn exact_match_returns_single_tile() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let mut rng = seeded_rng();

        let wang_id = WangId([1, 0, 1, 0, 1, 0, 1, 1]);
        assert_eq!(resolver.resolve(&wang_id, &mut rng), Ok(4));
        assert_eq!(resolver.resolve(&WangId::filled(1), &mut rng), Ok(51));
    }

    #[test]
    fn unique_match_is_stable() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let mut rng = seeded_rng();

        let wang_id = WangId([1, 1, 1, 1, 1, 1, 1, 0]);
        for i in 0..20 {
            assert_eq!(resolver.resolve(&wang_id, &mut rng), Ok(26));
            assert_eq!(resolver.resolve_with_index(&wang_id, i), Ok(26));
        }
    }

    #[test]
    fn variants_by_index_wrap() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let wang_id = WangId([1, 0, 0, 0, 1, 0, 0, 0]);

        let resolution = resolver.candidates(&wang_id).unwrap();
        assert!(resolution.is_exact());
        assert_eq!(resolution.tiles(), vec![21, 42]);

        assert_eq!(resolver.resolve_with_index(&wang_id, 0), Ok(21));
        assert_eq!(resolver.resolve_with_index(&wang_id, 1), Ok(42));
        assert_eq!(resolver.resolve_with_index(&wang_id, 2), Ok(21));
    }

    #[test]
    fn random_variants_stay_within_candidates() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let mut rng = seeded_rng();
        let wang_id = WangId([1, 0, 0, 0, 1, 0, 0, 0]);

        let picked: HashSet<TileId> = (0..64)
            .map(|_| resolver.resolve(&wang_id, &mut rng).unwrap())
            .collect();
        assert!(picked.is_subset(&HashSet::from([21, 42])));
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn seeded_variation_is_reproducible_per_cell() {
        let table = water_table();
        let config = ResolverConfig::new().with_variation(Variation::Seeded { seed: 7 });
        let resolver = AutoTileResolver::with_config(&table, config);
        let wang_id = WangId([1, 0, 0, 0, 1, 0, 0, 0]);

        for y in 0..4 {
            for x in 0..4 {
                let first = resolver.resolve_cell(&wang_id, x, y).unwrap();
                let second = resolver.resolve_cell(&wang_id, x, y).unwrap();
                assert_eq!(first, second);
                assert!(first == 21 || first == 42);
            }
        }
    }

    #[test]
    fn lowest_variation_picks_first() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let wang_id = WangId([1, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(resolver.resolve_cell(&wang_id, 3, 9), Ok(21));
    }

    #[test]
    fn missing_signature_falls_back_to_most_similar() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let wang_id = WangId([0, 1, 0, 1, 0, 1, 0, 1]);

        let resolution = resolver.candidates(&wang_id).unwrap();
        assert_eq!(resolution.kind(), MatchKind::Similar { score: 4 });
        assert_eq!(resolution.tiles(), vec![51]);
        assert_eq!(resolver.resolve_with_index(&wang_id, 5), Ok(51));
    }

    #[test]
    fn similarity_ties_pick_lowest_tile() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        // Tiles 0 and 63 both agree on 7 slots
        let wang_id = WangId([0, 0, 0, 0, 0, 0, 0, 0]);

        let resolution = resolver.candidates(&wang_id).unwrap();
        assert_eq!(resolution.kind(), MatchKind::Similar { score: 7 });
        assert_eq!(resolution.tiles(), vec![0, 63]);
        let mut rng = seeded_rng();
        for _ in 0..10 {
            assert_eq!(resolver.resolve(&wang_id, &mut rng), Ok(0));
        }
    }

    #[test]
    fn declared_fallback_wins_over_similarity() {
        let mut set = water_set();
        set.fallback_tile = Some(100);
        let table = WangTable::build(&set).unwrap();
        let resolver = AutoTileResolver::new(&table);

        let missing = WangId([0, 1, 0, 1, 0, 1, 0, 1]);
        let resolution = resolver.candidates(&missing).unwrap();
        assert_eq!(resolution.kind(), MatchKind::DeclaredFallback);
        assert_eq!(resolver.resolve_with_index(&missing, 0), Ok(100));

        // Exact matches are unaffected
        assert_eq!(resolver.resolve_with_index(&WangId::filled(1), 0), Ok(51));
    }

    #[test]
    fn strict_policy_reports_missing_signature() {
        let table = water_table();
        let config = ResolverConfig::new().with_fallback(FallbackPolicy::Strict);
        let resolver = AutoTileResolver::with_config(&table, config);

        let missing = WangId([0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(
            resolver.resolve_with_index(&missing, 0),
            Err(AutotileError::NoTileForSignature(missing))
        );
        assert_eq!(resolver.resolve_with_index(&WangId::filled(1), 0), Ok(51));
    }

    #[test]
    fn empty_table_has_no_tile() {
        let set = wangtile_core::WangSet::new("empty".to_string(), wangtile_core::WangSetType::Mixed);
        let table = WangTable::build(&set).unwrap();
        let resolver = AutoTileResolver::new(&table);

        assert_eq!(
            resolver.resolve_with_index(&WangId::filled(1), 0),
            Err(AutotileError::NoTileForSignature(WangId::filled(1)))
        );
    }

    #[test]
    fn resolve_from_neighbors() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);
        let mut rng = seeded_rng();

        let surrounded = Neighbors::from_bits(dirs::ALL);
        assert_eq!(resolver.resolve_neighbors(surrounded, 1, &mut rng), Ok(51));

        let neighbors = Neighbors::from_bits(dirs::N | dirs::E | dirs::S | dirs::W | dirs::NW);
        assert_eq!(resolver.resolve_neighbors(neighbors, 1, &mut rng), Ok(4));
    }

    #[test]
    fn normalized_corners_reach_exact_tiles() {
        let table = water_table();
        let neighbors = Neighbors::from_bits(dirs::N | dirs::S | dirs::NE);

        let raw = AutoTileResolver::new(&table);
        assert_eq!(
            raw.signature(neighbors, 1),
            WangId([1, 1, 0, 0, 1, 0, 0, 0])
        );
        assert!(!raw.candidates(&raw.signature(neighbors, 1)).unwrap().is_exact());

        let normalized =
            AutoTileResolver::with_config(&table, ResolverConfig::new().with_normalized_corners(true));
        let wang_id = normalized.signature(neighbors, 1);
        assert_eq!(wang_id, WangId([1, 0, 0, 0, 1, 0, 0, 0]));
        assert_eq!(normalized.resolve_with_index(&wang_id, 0), Ok(21));
    }

    #[test]
    fn edge_sets_ignore_diagonal_neighbours() {
        let table = WangTable::from_entries(
            wangtile_core::WangSetType::Edge,
            [1],
            None,
            [(7, &[1, 0, 1, 0, 0, 0, 0, 0][..])],
        )
        .unwrap();
        let resolver = AutoTileResolver::new(&table);
        let neighbors = Neighbors::from_bits(dirs::N | dirs::NE | dirs::E | dirs::SW);

        let wang_id = resolver.signature(neighbors, 1);
        assert_eq!(wang_id, WangId([1, 0, 1, 0, 0, 0, 0, 0]));
        assert_eq!(resolver.resolve_with_index(&wang_id, 0), Ok(7));
    }

    #[test]
    fn random_variation_per_cell_stays_within_candidates() {
        let table = water_table();
        let resolver = AutoTileResolver::with_config(
            &table,
            ResolverConfig::new().with_variation(Variation::Random),
        );
        let channel = WangId([1, 0, 0, 0, 1, 0, 0, 0]);
        let full = WangId::filled(1);

        for x in 0..32 {
            let tile = resolver.resolve_cell(&channel, x, 0).unwrap();
            assert!(tile == 21 || tile == 42);
            assert_eq!(resolver.resolve_cell(&full, x, 0), Ok(51));
        }
    }

    #[test]
    fn every_neighbourhood_has_a_candidate() {
        let table = water_table();
        let resolver = AutoTileResolver::new(&table);

        for bits in 0..=u8::MAX {
            let wang_id = resolver.signature(Neighbors::from_bits(bits), 1);
            let resolution = resolver.candidates(&wang_id).unwrap();
            assert!(!resolution.tiles().is_empty());
            for index in 0..3 {
                assert!(resolution.tiles().contains(&resolution.pick(index)));
            }
        }
    }
}
