//! Globe textures and the terrain criteria attached to them.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Default selection weight of a terrain criterion.
pub const DEFAULT_TERRAIN_WEIGHT: i32 = 10;

/// One terrain a texture can produce, restricted to a lon/lat window.
///
/// Bounds are stored in radians; rule documents give them in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTerrainCriteria")]
pub struct TerrainCriteria {
    pub name: String,
    pub weight: i32,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl TerrainCriteria {
    /// A criterion covering the whole globe with the default weight.
    pub fn new(name: impl Into<String>) -> Self {
        RawTerrainCriteria {
            name: name.into(),
            ..RawTerrainCriteria::default()
        }
        .into()
    }
}

#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTerrainCriteria {
    name: String,
    weight: i32,
    lon_min: f64,
    lon_max: f64,
    lat_min: f64,
    lat_max: f64,
}

impl Default for RawTerrainCriteria {
    fn default() -> Self {
        Self {
            name: String::new(),
            weight: DEFAULT_TERRAIN_WEIGHT,
            lon_min: 0.0,
            lon_max: 360.0,
            lat_min: -90.0,
            lat_max: 90.0,
        }
    }
}

impl From<RawTerrainCriteria> for TerrainCriteria {
    fn from(raw: RawTerrainCriteria) -> Self {
        Self {
            name: raw.name,
            weight: raw.weight,
            lon_min: raw.lon_min.to_radians(),
            lon_max: raw.lon_max.to_radians(),
            lat_min: raw.lat_min.to_radians(),
            lat_max: raw.lat_max.to_radians(),
        }
    }
}

/// Fields of a texture rule entry. Absent fields leave the texture untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TexturePatch {
    pub terrain: Option<Vec<TerrainCriteria>>,
    pub deployments: Option<BTreeSet<String>>,
}

/// Globe texture rules, keyed by id in the rule store.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    id: i32,
    terrain: Vec<TerrainCriteria>,
    deployments: BTreeSet<String>,
}

impl Texture {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            terrain: Vec::new(),
            deployments: BTreeSet::new(),
        }
    }

    /// Merges a rule entry into this texture.
    pub fn load(&mut self, patch: TexturePatch) {
        if let Some(terrain) = patch.terrain {
            self.terrain = terrain;
        }
        if let Some(deployments) = patch.deployments {
            self.deployments = deployments;
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn terrain(&self) -> &[TerrainCriteria] {
        &self.terrain
    }

    /// Deployments this texture is valid for. Empty means the default deployment.
    pub fn deployments(&self) -> &BTreeSet<String> {
        &self.deployments
    }

    /// True when this texture serves `deployment`.
    ///
    /// The empty name matches only textures without deployment restrictions.
    pub fn serves(&self, deployment: &str) -> bool {
        if deployment.is_empty() {
            self.deployments.is_empty()
        } else {
            self.deployments.contains(deployment)
        }
    }
}
