//! Bordered popup window with an optional screen-aligned background.
//!
//! A window grows from its center over ten composited frames (unless created
//! with [`WindowPopup::None`]) and draws:
//!
//! - five nested border rectangles shaded around the window color
//! - the background surface, cropped to the area left inside the border
//!
//! The background is aligned with the screen origin, not with the window,
//! so moving the window reveals a different part of it.

use crate::surface::{Compositor, Rect, Surface};

/// Number of composited frames a popup takes to open.
pub const POPUP_STEPS: u8 = 10;

/// Nested rectangles making up the border.
const BORDER_RINGS: u8 = 5;

/// Outer rings shaded darker than the window color; inner ones lighter.
const DARK_RINGS: u8 = 2;

/// Axis a window grows along while opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPopup {
    /// Appears fully open.
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl WindowPopup {
    fn grows_horizontally(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    fn grows_vertically(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Opening,
    Open,
}

/// Popup window. The background must outlive the window (`'bg`).
#[derive(Debug, Clone)]
pub struct Window<'bg> {
    surface: Surface,
    bg: Option<&'bg Surface>,
    color: u8,
    popup: WindowPopup,
    /// Progress in tenths, `0..=POPUP_STEPS`.
    step: u8,
}

impl<'bg> Window<'bg> {
    pub fn new(width: u16, height: u16, x: i32, y: i32, popup: WindowPopup) -> Self {
        let step = if popup == WindowPopup::None {
            POPUP_STEPS
        } else {
            0
        };
        Self {
            surface: Surface::new(width, height, x, y),
            bg: None,
            color: 0,
            popup,
            step,
        }
    }

    /// Changes the background and redraws.
    pub fn set_bg(&mut self, bg: Option<&'bg Surface>) {
        self.bg = bg;
        self.draw();
    }

    /// Changes the border color and redraws.
    pub fn set_color(&mut self, color: u8) {
        self.color = color;
        self.draw();
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn popup(&self) -> WindowPopup {
        self.popup
    }

    /// Opening progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        f64::from(self.step) / f64::from(POPUP_STEPS)
    }

    pub fn state(&self) -> PopupState {
        match self.step {
            0 => PopupState::Closed,
            POPUP_STEPS => PopupState::Open,
            _ => PopupState::Opening,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.surface.set_x(x);
        self.surface.set_y(y);
        self.draw();
    }

    /// Area covered at the current progress, before the border is drawn.
    ///
    /// The growing axes scale with progress and stay centered; the other
    /// axes span the whole window. `None` while closed.
    pub fn revealed_rect(&self) -> Option<Rect> {
        if self.step == 0 {
            return None;
        }
        let (x, w) = grow(self.surface.width(), self.step, self.popup.grows_horizontally());
        let (y, h) = grow(self.surface.height(), self.step, self.popup.grows_vertically());
        Some(Rect::new(x, y, w, h))
    }

    /// Redraws border and background for the current progress.
    ///
    /// A hidden background leaves the interior in the border color.
    pub fn draw(&mut self) {
        self.surface.clear();

        let Some(mut square) = self.revealed_rect() else {
            return;
        };

        let mut color = self.color;
        for ring in 0..BORDER_RINGS {
            self.surface.fill_rect(square, color);
            color = if ring < DARK_RINGS {
                color.wrapping_sub(1)
            } else {
                color.wrapping_add(1)
            };
            square = square.inset(1);
        }

        if let Some(bg) = self.bg.filter(|bg| bg.visible()) {
            let crop = Rect::new(
                self.surface.x() + square.x,
                self.surface.y() + square.y,
                square.w,
                square.h,
            );
            bg.blit_rect(crop, square.x, square.y, &mut self.surface);
        }
    }

    /// Advances the popup one step if still opening, then draws onto `dest`.
    pub fn blit(&mut self, dest: &mut Surface) {
        if self.step < POPUP_STEPS {
            self.step += 1;
            self.draw();
        }
        self.surface.blit(dest);
    }
}

impl Compositor for Window<'_> {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn composite(&mut self, dest: &mut Surface) {
        self.blit(dest);
    }
}

/// Offset and length of one axis at `step` tenths of `full`.
fn grow(full: u16, step: u8, animated: bool) -> (i32, i32) {
    let full = i32::from(full);
    if !animated {
        return (0, full);
    }
    let steps = i32::from(POPUP_STEPS);
    let step = i32::from(step);
    let len = full * step / steps;
    let offset = (full * steps - full * step) / (2 * steps);
    (offset, len)
}
