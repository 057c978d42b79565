//! Palette-indexed pixel surfaces and cropped blitting.

use std::rc::Rc;

use crate::palette::Palette;

/// Pixel index that blits leave untouched on the destination.
pub const TRANSPARENT: u8 = 0;

/// Rectangle in pixels. Non-positive width or height means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Shrinks by `n` pixels on every side.
    pub fn inset(self, n: i32) -> Self {
        Self::new(self.x + n, self.y + n, self.w - 2 * n, self.h - 2 * n)
    }

    pub fn intersect(self, other: Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.w).min(other.x + other.w);
        let y1 = (self.y + self.h).min(other.y + other.h);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Anything that can be composited onto a destination surface.
pub trait Compositor {
    fn surface(&self) -> &Surface;

    /// Draws onto `dest` at this compositor's position.
    fn composite(&mut self, dest: &mut Surface);
}

/// Fixed-size 8-bit pixel buffer with a screen position and optional crop.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u16,
    height: u16,
    x: i32,
    y: i32,
    crop: Option<Rect>,
    visible: bool,
    palette: Option<Rc<Palette>>,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u16, height: u16, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
            crop: None,
            visible: true,
            palette: None,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    /// Part of the buffer that [`blit`](Self::blit) copies. `None` copies everything.
    pub fn crop(&self) -> Option<Rect> {
        self.crop
    }

    pub fn set_crop(&mut self, crop: Option<Rect>) {
        self.crop = crop;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_deref()
    }

    pub fn set_palette(&mut self, palette: Option<Rc<Palette>>) {
        self.palette = palette;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Resets every pixel to [`TRANSPARENT`].
    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    pub fn fill(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Overwrites every pixel with `other`'s when both are the same size.
    pub fn copy_pixels_from(&mut self, other: &Surface) {
        if self.pixels.len() == other.pixels.len() {
            self.pixels.copy_from_slice(&other.pixels);
        }
    }

    /// Fills `rect`, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: u8) {
        let r = rect.intersect(self.bounds());
        if r.is_empty() {
            return;
        }
        let stride = self.width as usize;
        for y in r.y..r.y + r.h {
            let row = y as usize * stride;
            self.pixels[row + r.x as usize..row + (r.x + r.w) as usize].fill(color);
        }
    }

    /// Copies the cropped buffer onto `dest` at this surface's position.
    ///
    /// Hidden surfaces draw nothing.
    pub fn blit(&self, dest: &mut Surface) {
        if !self.visible {
            return;
        }
        let src = self.crop.unwrap_or_else(|| self.bounds());
        self.blit_rect(src, self.x, self.y, dest);
    }

    /// Copies the `src` region of this buffer onto `dest` with its top-left
    /// corner at (`dx`, `dy`).
    ///
    /// Parts of `src` outside this surface shift the destination the same
    /// way, and the result is clipped to `dest`. [`TRANSPARENT`] pixels are
    /// skipped.
    pub fn blit_rect(&self, src: Rect, dx: i32, dy: i32, dest: &mut Surface) {
        let (mut sx, mut sy, mut w, mut h) = (src.x, src.y, src.w, src.h);
        let (mut dx, mut dy) = (dx, dy);

        if sx < 0 {
            w += sx;
            dx -= sx;
            sx = 0;
        }
        if sy < 0 {
            h += sy;
            dy -= sy;
            sy = 0;
        }
        w = w.min(self.width as i32 - sx);
        h = h.min(self.height as i32 - sy);

        if dx < 0 {
            w += dx;
            sx -= dx;
            dx = 0;
        }
        if dy < 0 {
            h += dy;
            sy -= dy;
            dy = 0;
        }
        w = w.min(dest.width as i32 - dx);
        h = h.min(dest.height as i32 - dy);

        if w <= 0 || h <= 0 {
            return;
        }

        let src_stride = self.width as usize;
        let dst_stride = dest.width as usize;
        for row in 0..h as usize {
            let s = (sy as usize + row) * src_stride + sx as usize;
            let d = (dy as usize + row) * dst_stride + dx as usize;
            let src_row = &self.pixels[s..s + w as usize];
            let dst_row = &mut dest.pixels[d..d + w as usize];
            for (out, &p) in dst_row.iter_mut().zip(src_row) {
                if p != TRANSPARENT {
                    *out = p;
                }
            }
        }
    }
}

impl Compositor for Surface {
    fn surface(&self) -> &Surface {
        self
    }

    fn composite(&mut self, dest: &mut Surface) {
        self.blit(dest);
    }
}
