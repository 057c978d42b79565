//! MapView: flat (equirectangular) preview of the globe rules on a surface.
//!
//! This module is pure (no I/O). The full 3D globe lives elsewhere; this is
//! the quick look used for window backgrounds and debugging rule files.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{GlobeConfig, GlobeRules};
use crate::surface::Surface;
use crate::types::{block_offset, Vertex, PALETTE_BLOCK_SIZE};

/// Palette block used for land textures.
pub const DEFAULT_LAND_BLOCK: u8 = 3;

/// Shades the ocean darkens by from equator to pole when shading is on.
const OCEAN_SHADES: f64 = 3.0;

pub struct MapView {
    land_block: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            land_block: DEFAULT_LAND_BLOCK,
        }
    }
}

impl MapView {
    pub fn new(land_block: u8) -> Self {
        Self { land_block }
    }

    /// Palette index a polygon with `texture` is drawn in, `None` for ocean.
    pub fn land_color(&self, texture: i32) -> Option<u8> {
        if texture < 0 {
            return None;
        }
        let shade = texture.rem_euclid(i32::from(PALETTE_BLOCK_SIZE)) as u8;
        Some(block_offset(self.land_block) + shade)
    }

    /// Draws ocean, land polygons and border lines over the whole surface.
    pub fn render_into(&self, rules: &GlobeRules, surface: &mut Surface) {
        let config = rules.config();
        self.draw_ocean(config, surface);

        for poly in rules.polygons() {
            if let Some(color) = self.land_color(poly.texture()) {
                let pts = unwrap_seam(poly.vertices(), surface);
                let w = f64::from(surface.width());
                for shift in [0.0, -w, w] {
                    fill_convex(surface, &pts, shift, color);
                }
            }
        }

        for line in rules.polylines() {
            for pair in line.vertices().windows(2) {
                let (x0, y0) = project(pair[0], surface);
                let (x1, y1) = project(pair[1], surface);
                if (x1 - x0).abs() > f64::from(surface.width()) / 2.0 {
                    continue;
                }
                draw_line(surface, (x0, y0), (x1, y1), config.line_color);
            }
        }
    }

    /// Convenience helper that allocates a new surface.
    pub fn render(&self, rules: &GlobeRules, width: u16, height: u16) -> Surface {
        let mut surface = Surface::new(width, height, 0, 0);
        self.render_into(rules, &mut surface);
        surface
    }

    fn draw_ocean(&self, config: &GlobeConfig, surface: &mut Surface) {
        if !config.ocean_shading {
            surface.fill(config.ocean_color);
            return;
        }
        let h = f64::from(surface.height());
        for y in 0..surface.height() as i32 {
            let lat = FRAC_PI_2 - (f64::from(y) + 0.5) / h * PI;
            let shade = (lat.abs() / FRAC_PI_2 * OCEAN_SHADES).round() as u8;
            let color = config.ocean_color.wrapping_add(shade);
            for x in 0..surface.width() as i32 {
                surface.set_pixel(x, y, color);
            }
        }
    }
}

fn project(v: Vertex, surface: &Surface) -> (f64, f64) {
    let x = v.lon.rem_euclid(TAU) / TAU * f64::from(surface.width());
    let y = (FRAC_PI_2 - v.lat) / PI * f64::from(surface.height());
    (x, y)
}

/// Projects vertices so a polygon crossing the date line stays contiguous.
fn unwrap_seam(vertices: &[Vertex], surface: &Surface) -> Vec<(f64, f64)> {
    let w = f64::from(surface.width());
    let mut pts: Vec<(f64, f64)> = vertices.iter().map(|&v| project(v, surface)).collect();
    if let Some(&(x0, _)) = pts.first() {
        for p in pts.iter_mut().skip(1) {
            if p.0 - x0 > w / 2.0 {
                p.0 -= w;
            } else if x0 - p.0 > w / 2.0 {
                p.0 += w;
            }
        }
    }
    pts
}

/// Scanline fill of a convex polygon, sampling pixel centers.
fn fill_convex(surface: &mut Surface, pts: &[(f64, f64)], shift: f64, color: u8) {
    if pts.len() < 3 {
        return;
    }
    let min_y = pts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = pts.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let y_start = (min_y - 0.5).ceil().max(0.0) as i32;
    let y_end = ((max_y - 0.5).ceil() as i32).min(surface.height() as i32);

    for y in y_start..y_end {
        let yc = f64::from(y) + 0.5;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (i, a) in pts.iter().enumerate() {
            let b = pts[(i + 1) % pts.len()];
            if (a.1 <= yc && yc < b.1) || (b.1 <= yc && yc < a.1) {
                let x = a.0 + (yc - a.1) * (b.0 - a.0) / (b.1 - a.1);
                lo = lo.min(x);
                hi = hi.max(x);
            }
        }
        if lo > hi {
            continue;
        }
        let x_start = (lo + shift - 0.5).ceil() as i32;
        let x_end = (hi + shift - 0.5).ceil() as i32;
        for x in x_start..x_end {
            surface.set_pixel(x, y, color);
        }
    }
}

fn draw_line(surface: &mut Surface, from: (f64, f64), to: (f64, f64), color: u8) {
    let (mut x0, mut y0) = (from.0 as i32, from.1 as i32);
    let (x1, y1) = (to.0 as i32, to.1 as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        surface.set_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileMap;

    fn rules(doc: &str) -> GlobeRules {
        let mut rules = GlobeRules::new();
        rules.load_json(doc, &FileMap::new()).unwrap();
        rules
    }

    #[test]
    fn land_polygon_is_filled_with_texture_shade() {
        let rules = rules(
            r#"{ "oceanShading": false,
                 "polygons": [[2, 10, 0, 20, 0, 20, 10, 10, 10]] }"#,
        );
        let view = MapView::default();
        let s = view.render(&rules, 360, 180);

        let land = block_offset(DEFAULT_LAND_BLOCK) + 2;
        assert_eq!(s.pixel(15, 85), Some(land));
        assert_eq!(s.pixel(100, 85), Some(rules.config().ocean_color));
    }

    #[test]
    fn polygon_across_date_line_wraps() {
        let rules = rules(
            r#"{ "oceanShading": false,
                 "polygons": [[0, 350, 0, 10, 0, 10, 10, 350, 10]] }"#,
        );
        let s = MapView::default().render(&rules, 360, 180);
        let land = block_offset(DEFAULT_LAND_BLOCK);
        assert_eq!(s.pixel(355, 85), Some(land));
        assert_eq!(s.pixel(5, 85), Some(land));
        assert_eq!(s.pixel(180, 85), Some(rules.config().ocean_color));
    }

    #[test]
    fn ocean_polygons_are_not_drawn() {
        let view = MapView::default();
        assert_eq!(view.land_color(-1), None);
        assert_eq!(view.land_color(17), Some(block_offset(DEFAULT_LAND_BLOCK) + 1));
    }

    #[test]
    fn polylines_use_line_color() {
        let rules = rules(
            r#"{ "oceanShading": false, "lineColor": 7,
                 "polylines": [[0, 0, 90, 0]] }"#,
        );
        let s = MapView::default().render(&rules, 360, 180);
        assert_eq!(s.pixel(45, 90), Some(7));
    }

    #[test]
    fn ocean_shading_darkens_toward_poles() {
        let rules = rules("{}");
        let s = MapView::default().render(&rules, 8, 90);
        let ocean = rules.config().ocean_color;
        assert_eq!(s.pixel(0, 45), Some(ocean));
        assert_eq!(s.pixel(0, 0), Some(ocean + 3));
    }
}
