//! Geoscape preview runner (default binary).
//!
//! Loads globe rule files, projects them onto a backdrop and opens a popup
//! window over it, animated one step per frame.
//!
//! ```text
//! geoscape [--rules FILE]... [--data-dir DIR]... [--popup none|horizontal|vertical|both]
//! ```
//!
//! `GEOSCAPE_DATA_DIR` adds a data directory below any given with
//! `--data-dir`. Set `RUST_LOG` to get logs on stderr.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::info;

use geoscape::core::{FileMap, GlobeRules};
use geoscape::term::{MapView, Palette, Rgb, Surface, TerminalRenderer, Window, WindowPopup};
use geoscape::types::block_offset;

const FRAME_MS: u64 = 33;
const DATA_DIR_ENV: &str = "GEOSCAPE_DATA_DIR";

/// Palette block of the window border.
const BORDER_BLOCK: u8 = 8;
/// Palette index the screen is cleared to behind the window.
const SCREEN_COLOR: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PreviewConfig {
    rules: Vec<PathBuf>,
    data_dirs: Vec<PathBuf>,
    popup: WindowPopup,
}

fn parse_args(args: &[String]) -> Result<PreviewConfig> {
    let mut config = PreviewConfig {
        rules: Vec::new(),
        data_dirs: Vec::new(),
        popup: WindowPopup::Both,
    };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--rules" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --rules"))?;
                config.rules.push(PathBuf::from(v));
            }
            "--data-dir" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --data-dir"))?;
                config.data_dirs.push(PathBuf::from(v));
            }
            "--popup" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --popup"))?;
                config.popup = parse_popup(v)?;
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

fn parse_popup(v: &str) -> Result<WindowPopup> {
    match v {
        "none" => Ok(WindowPopup::None),
        "horizontal" => Ok(WindowPopup::Horizontal),
        "vertical" => Ok(WindowPopup::Vertical),
        "both" => Ok(WindowPopup::Both),
        other => Err(anyhow!("invalid --popup value: {}", other)),
    }
}

fn preview_palette() -> Palette {
    let mut bases = [Rgb::new(24, 24, 32); 16];
    bases[0] = Rgb::new(0, 0, 0);
    bases[3] = Rgb::new(96, 200, 72);
    bases[8] = Rgb::new(232, 200, 96);
    bases[10] = Rgb::new(255, 255, 255);
    bases[12] = Rgb::new(48, 96, 220);
    Palette::from_block_bases(&bases)
}

fn main() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut files = FileMap::new();
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        files.push_root(dir);
    }
    for dir in &config.data_dirs {
        files.push_root(dir);
    }

    let mut rules = GlobeRules::new();
    for path in &config.rules {
        rules
            .load_file(path, &files)
            .with_context(|| format!("loading globe rules from {}", path.display()))?;
        info!(path = %path.display(), "globe rules loaded");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &rules, config.popup);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, rules: &GlobeRules, popup: WindowPopup) -> Result<()> {
    let palette = Rc::new(preview_palette());
    let view = MapView::default();
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        let (sw, sh) = (cols, rows.saturating_mul(2));

        let backdrop = view.render(rules, sw, sh);
        let mut screen = Surface::new(sw, sh, 0, 0);
        screen.set_palette(Some(Rc::clone(&palette)));

        let mut window = open_window(sw, sh, popup, &backdrop);
        term.invalidate();

        loop {
            screen.fill(SCREEN_COLOR);
            window.blit(&mut screen);
            term.draw(&screen)?;

            if !event::poll(frame)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => window = open_window(sw, sh, popup, &backdrop),
                    KeyCode::Left => nudge(&mut window, -2, 0),
                    KeyCode::Right => nudge(&mut window, 2, 0),
                    KeyCode::Up => nudge(&mut window, 0, -2),
                    KeyCode::Down => nudge(&mut window, 0, 2),
                    _ => {}
                },
                Event::Resize(_, _) => break,
                _ => {}
            }
        }
    }
}

fn open_window<'bg>(sw: u16, sh: u16, popup: WindowPopup, backdrop: &'bg Surface) -> Window<'bg> {
    let (w, h) = (sw / 5 * 3, sh / 5 * 3);
    let x = i32::from((sw - w) / 2);
    let y = i32::from((sh - h) / 2);
    let mut window = Window::new(w, h, x, y, popup);
    window.set_color(block_offset(BORDER_BLOCK) + 4);
    window.set_bg(Some(backdrop));
    window
}

fn nudge(window: &mut Window<'_>, dx: i32, dy: i32) {
    let s = window.surface();
    let (x, y) = (s.x() + dx, s.y() + dy);
    window.set_position(x, y);
}
