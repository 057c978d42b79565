//! Globe rule store: polygons, polylines and texture rules.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{de, Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::GlobeError;
use crate::file_map::ResolveFile;
use crate::globe_config::GlobeConfig;
use crate::types::{block_offset, Polygon, Polyline, Texture, TexturePatch, PALETTE_BLOCKS};
use crate::world_map::load_world_map;

const LOG_TARGET: &str = "geoscape::rules";

/// One `textures` entry: an upsert keyed by `id`, or a `delete`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextureRule {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub delete: Option<i32>,
    #[serde(flatten)]
    pub patch: TexturePatch,
}

/// A globe rule document. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobeRuleNode {
    /// Logical name of a legacy world map file.
    pub data: Option<String>,
    pub polygons: Option<Vec<Polygon>>,
    pub polylines: Option<Vec<Polyline>>,
    #[serde(default)]
    pub textures: Vec<TextureRule>,
    pub country_color: Option<u8>,
    pub city_color: Option<u8>,
    pub base_color: Option<u8>,
    pub line_color: Option<u8>,
    /// Palette block of the ocean color, `0..16`. Larger blocks are rejected.
    #[serde(default, deserialize_with = "palette_block")]
    pub ocean_palette: Option<u8>,
    pub ocean_shading: Option<bool>,
}

fn palette_block<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    match Option::<u8>::deserialize(deserializer)? {
        Some(block) if block >= PALETTE_BLOCKS => Err(de::Error::custom(format!(
            "palette block {} out of range, expected 0..{}",
            block, PALETTE_BLOCKS
        ))),
        block => Ok(block),
    }
}

/// Everything the globe is made of, merged from successive rule documents.
#[derive(Debug, Default)]
pub struct GlobeRules {
    polygons: Vec<Polygon>,
    polylines: Vec<Polyline>,
    textures: BTreeMap<i32, Texture>,
    config: GlobeConfig,
}

impl GlobeRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a rule document into the store.
    ///
    /// Geometry keys replace the whole collection; textures are upserted.
    /// If the world map named by `data` fails to load, the store is left
    /// with no polygons and the rest of the document is not applied.
    pub fn load(
        &mut self,
        node: GlobeRuleNode,
        files: &impl ResolveFile,
    ) -> Result<(), GlobeError> {
        let GlobeRuleNode {
            data,
            polygons,
            polylines,
            textures,
            country_color,
            city_color,
            base_color,
            line_color,
            ocean_palette,
            ocean_shading,
        } = node;

        if data.is_some() && polygons.is_some() {
            warn!(
                target: LOG_TARGET,
                "rule document sets both data and polygons; polygons win"
            );
        }

        if let Some(name) = data {
            self.polygons.clear();
            let path = files.resolve(&name);
            self.polygons = load_world_map(&path)?;
        }
        if let Some(polygons) = polygons {
            self.polygons = polygons;
        }
        if let Some(polylines) = polylines {
            self.polylines = polylines;
        }

        for rule in textures {
            self.apply_texture_rule(rule);
        }

        let config = &mut self.config;
        if let Some(c) = country_color {
            config.country_label_color = c;
        }
        if let Some(c) = city_color {
            config.city_label_color = c;
        }
        if let Some(c) = base_color {
            config.base_label_color = c;
        }
        if let Some(c) = line_color {
            config.line_color = c;
        }
        if let Some(block) = ocean_palette {
            config.ocean_color = block_offset(block);
        }
        if let Some(shading) = ocean_shading {
            config.ocean_shading = shading;
        }

        debug!(
            target: LOG_TARGET,
            polygons = self.polygons.len(),
            polylines = self.polylines.len(),
            textures = self.textures.len(),
            "globe rules merged"
        );
        Ok(())
    }

    /// Parses a JSON rule document and merges it.
    ///
    /// A parse error leaves the store untouched.
    pub fn load_json(&mut self, json: &str, files: &impl ResolveFile) -> Result<(), GlobeError> {
        let node: GlobeRuleNode = serde_json::from_str(json)?;
        self.load(node, files)
    }

    pub fn load_value(
        &mut self,
        value: serde_json::Value,
        files: &impl ResolveFile,
    ) -> Result<(), GlobeError> {
        let node: GlobeRuleNode = serde_json::from_value(value)?;
        self.load(node, files)
    }

    /// Reads a JSON rule document from disk and merges it.
    pub fn load_file(&mut self, path: &Path, files: &impl ResolveFile) -> Result<(), GlobeError> {
        let text = fs::read_to_string(path).map_err(|source| GlobeError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_json(&text, files)
    }

    fn apply_texture_rule(&mut self, rule: TextureRule) {
        if let Some(id) = rule.id {
            self.textures
                .entry(id)
                .or_insert_with(|| Texture::new(id))
                .load(rule.patch);
        } else if let Some(id) = rule.delete {
            if self.textures.remove(&id).is_none() {
                debug!(target: LOG_TARGET, id, "texture delete ignored, no such texture");
            }
        } else {
            warn!(target: LOG_TARGET, "texture entry without id or delete ignored");
        }
    }

    /// Live polygons. Replaced wholesale by later loads.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Live country borders. Replaced wholesale by later loads.
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn texture(&self, id: i32) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Texture ids in ascending order.
    pub fn texture_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.textures.keys().copied()
    }

    /// Terrain names usable for `deployment`, by texture id then criteria order.
    ///
    /// An empty deployment collects terrains from unrestricted textures.
    /// Names repeat if several textures list them.
    pub fn terrains(&self, deployment: &str) -> Vec<&str> {
        self.textures
            .values()
            .filter(|t| t.serves(deployment))
            .flat_map(|t| t.terrain().iter().map(|c| c.name.as_str()))
            .collect()
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }
}
