//! Software compositing for the geoscape screens.
//!
//! Everything draws into 8-bit palette-indexed [`Surface`]s; only the final
//! screen surface is converted to RGB, by [`TerminalRenderer`].
//!
//! - [`surface`]: pixel buffers, crop rectangles and transparent blits
//! - [`window`]: bordered popup windows that open over several frames
//! - [`map_view`]: flat projection of the globe rules, used as a backdrop
//! - [`palette`]: 256-color tables
//! - [`renderer`]: terminal output (half-block cells, changed-run diffs)

pub mod map_view;
pub mod palette;
pub mod renderer;
pub mod surface;
pub mod window;

pub use geoscape_core as core;
pub use geoscape_types as types;

pub use map_view::MapView;
pub use palette::{Palette, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{Compositor, Rect, Surface, TRANSPARENT};
pub use window::{PopupState, Window, WindowPopup, POPUP_STEPS};
