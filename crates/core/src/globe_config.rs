//! Globe rendering parameters.

use crate::types::block_offset;

pub const DEFAULT_COUNTRY_LABEL_COLOR: u8 = 239;
pub const DEFAULT_CITY_LABEL_COLOR: u8 = 138;
pub const DEFAULT_BASE_LABEL_COLOR: u8 = 133;
pub const DEFAULT_LINE_COLOR: u8 = 162;
pub const DEFAULT_OCEAN_PALETTE: u8 = 12;

/// Palette indices and flags the globe view draws with.
///
/// Owned by [`GlobeRules`](crate::GlobeRules) and changed only while a rule
/// document is merged; views borrow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobeConfig {
    pub country_label_color: u8,
    pub city_label_color: u8,
    pub base_label_color: u8,
    /// Country borders and radar/flight lines.
    pub line_color: u8,
    /// Absolute palette index, already offset from the configured block.
    pub ocean_color: u8,
    pub ocean_shading: bool,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            country_label_color: DEFAULT_COUNTRY_LABEL_COLOR,
            city_label_color: DEFAULT_CITY_LABEL_COLOR,
            base_label_color: DEFAULT_BASE_LABEL_COLOR,
            line_color: DEFAULT_LINE_COLOR,
            ocean_color: block_offset(DEFAULT_OCEAN_PALETTE),
            ocean_shading: true,
        }
    }
}
