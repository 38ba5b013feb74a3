//! Tiled XML tileset (`.tsx`) reader
//!
//! Reads the slicing attributes, the source image and every Wang set.
//! Elements outside that subset (tile properties, animations, object
//! groups, ...) are skipped.

use crate::{tile_ref, LoadError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};
use wangtile_core::{Color, Tileset, TilesetImage, WangSet, WangSetType};

/// Attributes of one element, keyed by name
struct Attributes {
    element: String,
    values: HashMap<String, String>,
}

impl Attributes {
    fn parse(elem: &BytesStart) -> Result<Self, LoadError> {
        let element = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
        let mut values = HashMap::new();
        for attr in elem.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            values.insert(key, value);
        }
        Ok(Self { element, values })
    }

    fn raw(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn optional<T>(&self, name: &str) -> Result<Option<T>, LoadError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| LoadError::invalid(&self.element, name, value, e)),
        }
    }

    fn required<T>(&self, name: &str) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.optional(name)?
            .ok_or_else(|| LoadError::MissingAttribute {
                element: self.element.clone(),
                attribute: name.to_string(),
            })
    }

    /// Tile reference where Tiled writes -1 for "none"
    fn tile(&self, name: &str) -> Result<Option<u32>, LoadError> {
        Ok(self.optional::<i64>(name)?.and_then(tile_ref))
    }
}

/// Parse the contents of a `.tsx` file
pub fn parse_tsx(xml: &str) -> Result<Tileset, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tileset: Option<Tileset> = None;
    let mut current_set: Option<WangSet> = None;
    let mut tile_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = e.name();
                if name.as_ref() == b"tile" {
                    tile_depth += 1;
                }
                handle_element(e, &mut tileset, &mut current_set, tile_depth)?;
            }
            Event::Empty(ref e) => {
                handle_element(e, &mut tileset, &mut current_set, tile_depth)?;
                if e.name().as_ref() == b"wangset" {
                    finish_wang_set(&mut tileset, &mut current_set);
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"tile" => tile_depth = tile_depth.saturating_sub(1),
                b"wangset" => finish_wang_set(&mut tileset, &mut current_set),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    tileset.ok_or_else(|| LoadError::MissingElement("tileset".to_string()))
}

fn handle_element(
    e: &BytesStart,
    tileset: &mut Option<Tileset>,
    current_set: &mut Option<WangSet>,
    tile_depth: usize,
) -> Result<(), LoadError> {
    let attrs = Attributes::parse(e)?;

    match attrs.element.as_str() {
        "tileset" => {
            let mut parsed = Tileset::new(
                attrs.optional("name")?.unwrap_or_default(),
                attrs.required("tilewidth")?,
                attrs.required("tileheight")?,
                attrs.required("tilecount")?,
                attrs.required("columns")?,
            );
            parsed.spacing = attrs.optional("spacing")?.unwrap_or(0);
            parsed.margin = attrs.optional("margin")?.unwrap_or(0);
            *tileset = Some(parsed);
        }
        // Per-tile images belong to image-collection tilesets
        "image" if tile_depth == 0 => {
            let tileset = tileset
                .as_mut()
                .ok_or_else(|| LoadError::MissingElement("tileset".to_string()))?;
            tileset.image = Some(TilesetImage::new(
                attrs.required("source")?,
                attrs.optional("width")?.unwrap_or(0),
                attrs.optional("height")?.unwrap_or(0),
            ));
        }
        "wangset" => {
            let type_tag: String = attrs.required("type")?;
            let set_type = type_tag
                .parse::<WangSetType>()
                .map_err(|err| LoadError::invalid("wangset", "type", &type_tag, err))?;
            let mut set = WangSet::new(attrs.required("name")?, set_type);
            set.fallback_tile = attrs.tile("tile")?;
            *current_set = Some(set);
        }
        "wangcolor" => {
            let set = current_set
                .as_mut()
                .ok_or_else(|| LoadError::MissingElement("wangset".to_string()))?;
            let color: Color = attrs.required("color")?;
            set.add_color(
                attrs.optional("name")?.unwrap_or_default(),
                color,
                attrs.tile("tile")?,
                attrs.optional("probability")?.unwrap_or(1.0),
            );
        }
        "wangtile" => {
            let set = current_set
                .as_mut()
                .ok_or_else(|| LoadError::MissingElement("wangset".to_string()))?;
            let tile_id = attrs.required("tileid")?;
            let raw: String = attrs.required("wangid")?;
            let wang_id = parse_wang_id(&raw)
                .map_err(|err| LoadError::invalid("wangtile", "wangid", &raw, err))?;
            set.add_tile(tile_id, wang_id);
        }
        "wangsets" | "tile" => {}
        other => debug!("Skipping <{}> element", other),
    }

    Ok(())
}

fn finish_wang_set(tileset: &mut Option<Tileset>, current_set: &mut Option<WangSet>) {
    let (Some(tileset), Some(set)) = (tileset.as_mut(), current_set.take()) else {
        return;
    };
    for tile in set.tiles.iter().filter(|t| !tileset.contains_tile(t.tile_id)) {
        warn!(
            "Wang set '{}' references tile {} but tileset '{}' has only {} tiles",
            set.name, tile.tile_id, tileset.name, tileset.tile_count
        );
    }
    tileset.add_wang_set(set);
}

/// Split a comma-separated Wang ID. The slot count is checked later, when
/// the set is turned into a table.
pub(crate) fn parse_wang_id(raw: &str) -> Result<Vec<u32>, std::num::ParseIntError> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|slot| slot.trim().parse::<u32>())
        .collect()
}
