//! Globe world data - legacy map decoding and incremental rule merging
//!
//! This crate owns everything the geoscape needs to know about the planet:
//! the textured polygons that make up the land, country border polylines,
//! and the texture rules that decide which battlescape terrains a patch of
//! globe can produce. It does file I/O only at load time; queries are pure.
//!
//! # Module Structure
//!
//! - [`world_map`]: decoder for the legacy fixed-record `WORLD.DAT` format
//! - [`rule_globe`]: the rule store, merging rule documents into live state
//! - [`globe_config`]: label/line/ocean colors handed to the view layer
//! - [`file_map`]: logical file name to on-disk path resolution
//! - [`error`]: load errors
//!
//! # Load Semantics
//!
//! A rule document may be applied many times (base game, then each mod):
//!
//! - **`data` / `polygons` / `polylines`**: full replace when present
//! - **`textures`**: upsert by `id`, remove by `delete`
//! - **colors, shading**: overwrite when present, otherwise keep
//!
//! # Example
//!
//! ```
//! use geoscape_core::{FileMap, GlobeRules};
//!
//! let mut rules = GlobeRules::new();
//! let doc = r#"{
//!     "polygons": [[2, 0, 0, 10, 0, 10, 10]],
//!     "textures": [{ "id": 2, "terrain": [{ "name": "JUNGLE" }] }]
//! }"#;
//! rules.load_json(doc, &FileMap::new()).unwrap();
//!
//! assert_eq!(rules.polygons().len(), 1);
//! assert_eq!(rules.terrains(""), vec!["JUNGLE"]);
//! ```

pub mod error;
pub mod file_map;
pub mod globe_config;
pub mod rule_globe;
pub mod world_map;

pub use geoscape_types as types;

pub use error::GlobeError;
pub use file_map::{FileMap, ResolveFile};
pub use globe_config::GlobeConfig;
pub use rule_globe::{GlobeRuleNode, GlobeRules, TextureRule};
pub use world_map::{decode_world_map, load_world_map, DecodeError, RECORD_SIZE};
