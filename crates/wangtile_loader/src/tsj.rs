//! Tiled JSON tileset (`.tsj`) reader

use crate::{tile_ref, LoadError};
use serde::Deserialize;
use tracing::warn;
use wangtile_core::{Color, Tileset, TilesetImage, WangSet, WangSetType};

#[derive(Debug, Deserialize)]
struct RawTileset {
    #[serde(default)]
    name: String,
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
    image: Option<String>,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    wangsets: Vec<RawWangSet>,
}

#[derive(Debug, Deserialize)]
struct RawWangSet {
    name: String,
    #[serde(rename = "type")]
    set_type: WangSetType,
    #[serde(default = "no_tile")]
    tile: i64,
    #[serde(default)]
    colors: Vec<RawWangColor>,
    #[serde(default)]
    wangtiles: Vec<RawWangTile>,
}

#[derive(Debug, Deserialize)]
struct RawWangColor {
    #[serde(default)]
    name: String,
    color: String,
    #[serde(default = "no_tile")]
    tile: i64,
    #[serde(default = "default_probability")]
    probability: f32,
}

#[derive(Debug, Deserialize)]
struct RawWangTile {
    tileid: u32,
    wangid: Vec<u32>,
}

fn no_tile() -> i64 {
    -1
}

fn default_probability() -> f32 {
    1.0
}

/// Parse the contents of a `.tsj` file
pub fn parse_tsj(json: &str) -> Result<Tileset, LoadError> {
    let raw: RawTileset = serde_json::from_str(json)?;

    let mut tileset = Tileset::new(
        raw.name,
        raw.tilewidth,
        raw.tileheight,
        raw.tilecount,
        raw.columns,
    );
    tileset.spacing = raw.spacing;
    tileset.margin = raw.margin;
    if let Some(source) = raw.image {
        tileset.image = Some(TilesetImage::new(source, raw.imagewidth, raw.imageheight));
    }

    for raw_set in raw.wangsets {
        let mut set = WangSet::new(raw_set.name, raw_set.set_type);
        set.fallback_tile = tile_ref(raw_set.tile);

        for raw_color in raw_set.colors {
            let color: Color = raw_color
                .color
                .parse()
                .map_err(|e| LoadError::invalid("wangcolor", "color", &raw_color.color, e))?;
            set.add_color(
                raw_color.name,
                color,
                tile_ref(raw_color.tile),
                raw_color.probability,
            );
        }

        for raw_tile in raw_set.wangtiles {
            if !tileset.contains_tile(raw_tile.tileid) {
                warn!(
                    "Wang set '{}' references tile {} outside tileset '{}'",
                    set.name, raw_tile.tileid, tileset.name
                );
            }
            set.add_tile(raw_tile.tileid, raw_tile.wangid);
        }

        tileset.add_wang_set(set);
    }

    Ok(tileset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_TSJ: &str = r##"{
 "columns": 21,
 "image": "32rogues-watertiles.png",
 "imageheight": 1024,
 "imagewidth": 672,
 "margin": 0,
 "name": "watertiles-auto",
 "spacing": 0,
 "tilecount": 672,
 "tileheight": 32,
 "tilewidth": 32,
 "type": "tileset",
 "wangsets": [
  {
   "colors": [
    { "color": "#0000ff", "name": "", "probability": 1, "tile": -1 }
   ],
   "name": "water",
   "tile": -1,
   "type": "mixed",
   "wangtiles": [
    { "tileid": 21, "wangid": [1, 0, 0, 0, 1, 0, 0, 0] },
    { "tileid": 42, "wangid": [1, 0, 0, 0, 1, 0, 0, 0] }
   ]
  }
 ]
}"##;

    #[test]
    fn test_parse_water_tileset() {
        let tileset = parse_tsj(WATER_TSJ).unwrap();

        assert_eq!(tileset.name, "watertiles-auto");
        assert_eq!(tileset.tile_count, 672);
        assert_eq!(tileset.columns, 21);
        assert_eq!(tileset.image.as_ref().unwrap().width, 672);

        let set = tileset.wang_set("water").unwrap();
        assert_eq!(set.set_type, WangSetType::Mixed);
        assert_eq!(set.fallback_tile, None);
        assert_eq!(set.color(1).unwrap().color, Color::BLUE);
        assert_eq!(set.color(1).unwrap().tile, None);
        assert_eq!(set.tiles.len(), 2);
        assert_eq!(set.tiles[0].wang_id, set.tiles[1].wang_id);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "tilewidth": 8, "tileheight": 8, "tilecount": 4, "columns": 2,
            "wangsets": [{ "name": "w", "type": "edge" }]
        }"#;

        let tileset = parse_tsj(json).unwrap();
        assert!(tileset.image.is_none());
        assert_eq!(tileset.spacing, 0);

        let set = &tileset.wang_sets[0];
        assert_eq!(set.set_type, WangSetType::Edge);
        assert_eq!(set.fallback_tile, None);
        assert!(set.colors.is_empty());
    }

    #[test]
    fn test_bad_color() {
        let json = r#"{
            "tilewidth": 8, "tileheight": 8, "tilecount": 4, "columns": 2,
            "wangsets": [{ "name": "w", "type": "corner",
                "colors": [{ "color": "blue" }] }]
        }"#;

        let err = parse_tsj(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidAttribute { ref element, .. } if element == "wangcolor"
        ));
    }

    #[test]
    fn test_unknown_set_type_is_json_error() {
        let json = r#"{
            "tilewidth": 8, "tileheight": 8, "tilecount": 4, "columns": 2,
            "wangsets": [{ "name": "w", "type": "blob" }]
        }"#;

        assert!(matches!(parse_tsj(json), Err(LoadError::Json(_))));
    }
}
