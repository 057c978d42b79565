//! 256-color palettes for 8-bit surfaces.

use crate::types::PALETTE_BLOCK_SIZE;

/// Number of entries in an 8-bit palette.
pub const PALETTE_SIZE: usize = 256;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn scaled(self, num: u16, den: u16) -> Self {
        let s = |c: u8| ((c as u16 * num) / den) as u8;
        Self::new(s(self.r), s(self.g), s(self.b))
    }
}

/// Color table mapping 8-bit surface indices to RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl Palette {
    pub fn grayscale() -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = Rgb::new(i as u8, i as u8, i as u8);
        }
        Self { colors }
    }

    /// Builds a palette from 6-bit VGA triplets (`r g b r g b ...`).
    ///
    /// Entries past the end of `bytes` stay black.
    pub fn from_vga(bytes: &[u8]) -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];
        for (c, rgb) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
            *c = Rgb::new(rgb[0] << 2, rgb[1] << 2, rgb[2] << 2);
        }
        Self { colors }
    }

    /// One block per base color, each shading from the base down toward black.
    pub fn from_block_bases(bases: &[Rgb]) -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];
        let block = PALETTE_BLOCK_SIZE as usize;
        for (b, base) in bases.iter().take(PALETTE_SIZE / block).enumerate() {
            for shade in 0..block {
                colors[b * block + shade] = base.scaled((block - shade) as u16, block as u16);
            }
        }
        Self { colors }
    }

    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    pub fn set_color(&mut self, index: u8, rgb: Rgb) {
        self.colors[index as usize] = rgb;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vga_values_are_scaled_to_eight_bits() {
        let pal = Palette::from_vga(&[63, 0, 32, 1, 2, 3]);
        assert_eq!(pal.color(0), Rgb::new(252, 0, 128));
        assert_eq!(pal.color(1), Rgb::new(4, 8, 12));
        assert_eq!(pal.color(2), Rgb::default());
    }

    #[test]
    fn block_bases_shade_toward_black() {
        let pal = Palette::from_block_bases(&[Rgb::new(0, 0, 0), Rgb::new(160, 80, 16)]);
        assert_eq!(pal.color(16), Rgb::new(160, 80, 16));
        assert_eq!(pal.color(24), Rgb::new(80, 40, 8));
        assert_eq!(pal.color(31), Rgb::new(10, 5, 1));
        assert_eq!(pal.color(32), Rgb::default());
    }
}
