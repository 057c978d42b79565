//! Shared globe data types - vertices, polygons, polylines and textures
//!
//! Everything here is plain data with no I/O, so it can be used by the rule
//! loader, the view layer and gameplay lookups alike.
//!
//! # Coordinates
//!
//! All stored angles are radians. Two source encodings are converted on the
//! way in:
//!
//! | Source | Unit | Conversion |
//! |--------|------|------------|
//! | Legacy world map (`WORLD.DAT`) | 1/8 degree, `i16` | [`xcom_to_rad`] |
//! | Rule documents | degrees, `f64` | [`f64::to_radians`] |
//!
//! # Palette
//!
//! Colors are 8-bit indices into a 256-entry palette split into 16 blocks
//! of 16 shades. [`block_offset`] maps a block number to its first index.
//!
//! # Examples
//!
//! ```
//! use geoscape_types::{xcom_to_rad, Polygon, PolygonShape, NO_TEXTURE};
//!
//! let mut poly = Polygon::new(PolygonShape::Triangle);
//! assert_eq!(poly.points(), 3);
//! assert_eq!(poly.texture(), NO_TEXTURE);
//!
//! // 720 units = 90 degrees
//! assert!(poly.set_latitude(0, xcom_to_rad(720)));
//! assert!((poly.latitude(0).unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! ```

pub mod geo;
pub mod texture;

pub use geo::{
    rad_to_xcom, xcom_to_rad, Polygon, PolygonShape, Polyline, ShapeError, Vertex,
    MAX_POLYGON_POINTS, NO_TEXTURE,
};
pub use texture::{TerrainCriteria, Texture, TexturePatch};

/// Number of shades in one palette block.
pub const PALETTE_BLOCK_SIZE: u8 = 16;

/// Number of blocks in a 256-entry palette.
pub const PALETTE_BLOCKS: u8 = 16;

/// Returns the first palette index of color block `block`.
///
/// Blocks past the end of a 256-entry palette wrap around.
pub const fn block_offset(block: u8) -> u8 {
    block.wrapping_mul(PALETTE_BLOCK_SIZE)
}
