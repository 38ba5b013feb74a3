//! A tileset paired with the lookup tables of all its Wang sets

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use wangtile_autotile::{AutoTileResolver, AutotileError, ResolverConfig, WangTable};
use wangtile_core::Tileset;

/// Owns a loaded tileset and one shared `WangTable` per Wang set
///
/// Tables are built once and never change, so they can be cloned out as
/// `Arc`s and used from any thread. Tables are kept in the tileset's set
/// order; Tiled allows repeated set names, and lookup by name returns the
/// first set with that name, as `Tileset::wang_set` does.
#[derive(Debug, Clone)]
pub struct Autotiler {
    tileset: Arc<Tileset>,
    tables: Vec<Arc<WangTable>>,
    config: ResolverConfig,
}

impl Autotiler {
    /// Build tables for every Wang set. Fails on the first invalid set.
    pub fn from_tileset(tileset: Tileset) -> Result<Self, AutotileError> {
        let mut tables = Vec::with_capacity(tileset.wang_sets.len());
        let mut seen = HashSet::new();
        for wang_set in &tileset.wang_sets {
            if !seen.insert(wang_set.name.as_str()) {
                warn!(
                    "Tileset '{}' has more than one Wang set named '{}'; lookup by name uses the first",
                    tileset.name, wang_set.name
                );
            }
            tables.push(Arc::new(WangTable::build(wang_set)?));
        }
        debug!(
            "Built {} Wang tables for tileset '{}'",
            tables.len(),
            tileset.name
        );

        Ok(Self {
            tileset: Arc::new(tileset),
            tables,
            config: ResolverConfig::default(),
        })
    }

    /// Load a `.tsx` / `.tsj` tileset and build its tables
    #[cfg(feature = "loader")]
    pub fn open(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, wangtile_loader::LoadError> {
        let tileset = wangtile_loader::load_tileset(path)?;
        Ok(Self::from_tileset(tileset)?)
    }

    /// Policy used by resolvers handed out from now on
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    pub fn shared_tileset(&self) -> Arc<Tileset> {
        Arc::clone(&self.tileset)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tileset.wang_sets.iter().position(|ws| ws.name == name)
    }

    /// Table for the first Wang set called `name`
    pub fn table(&self, name: &str) -> Option<Arc<WangTable>> {
        self.table_at(self.position(name)?)
    }

    /// Table for the Wang set at `index` in the tileset's set list
    pub fn table_at(&self, index: usize) -> Option<Arc<WangTable>> {
        self.tables.get(index).cloned()
    }

    /// Names of all Wang sets, in tileset order
    pub fn wang_set_names(&self) -> Vec<&str> {
        self.tileset
            .wang_sets
            .iter()
            .map(|ws| ws.name.as_str())
            .collect()
    }

    /// Resolver over the first Wang set called `name`, using this autotiler's config
    pub fn resolver(&self, name: &str) -> Option<AutoTileResolver<'_>> {
        self.resolver_at(self.position(name)?)
    }

    /// Resolver over the Wang set at `index`
    pub fn resolver_at(&self, index: usize) -> Option<AutoTileResolver<'_>> {
        self.tables
            .get(index)
            .map(|table| AutoTileResolver::with_config(table, self.config))
    }
}
