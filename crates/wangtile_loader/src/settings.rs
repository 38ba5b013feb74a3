//! Resolver settings stored as TOML
//!
//! ```toml
//! fallback = "strict"
//! variation = { seeded = { seed = 7 } }
//! normalize_corners = true
//! edge_handling = "treat_as_terrain"
//! ```

use crate::{read_file, LoadError};
use std::path::Path;
use tracing::debug;
use wangtile_autotile::ResolverConfig;

/// Parse resolver settings. Omitted keys keep their defaults.
pub fn parse_settings(toml_str: &str) -> Result<ResolverConfig, LoadError> {
    Ok(toml::from_str(toml_str)?)
}

/// Load resolver settings from a TOML file
pub fn load_settings(path: impl AsRef<Path>) -> Result<ResolverConfig, LoadError> {
    let path = path.as_ref();
    let config = parse_settings(&read_file(path)?)?;
    debug!("Loaded resolver settings from {}: {:?}", path.display(), config);
    Ok(config)
}
