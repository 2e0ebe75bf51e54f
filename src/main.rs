// What you SEE:
// • A window filled with a pixel-art landscape: mountains scroll left at
//   different speeds, clouds drift, stars twinkle at night.
// • T toggles light/dark. H toggles the FPS overlay. ESC quits.
// • Resize the window and the scene is rebuilt for the new size.
// • With --snapshot, no window opens; a PNG is written instead.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ridgeline::config::Config;
use ridgeline::draw::{draw_text_5x7, Drawer};
use ridgeline::error::Error;
use ridgeline::snapshot;
use ridgeline::surface::{Background, Surface};
use ridgeline::types::{FrameBuffer, Theme, Viewport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated pixel-art landscape background")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    theme: Option<Theme>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Side of one pixel-art block
    #[arg(long)]
    pixel_size: Option<u32>,

    #[arg(long)]
    fps: Option<f64>,

    /// Fixed RNG seed for a repeatable landscape
    #[arg(long)]
    seed: Option<u64>,

    /// Show measured FPS in the corner
    #[arg(long)]
    hud: bool,

    /// Render off-screen and write a PNG here instead of opening a window
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Accepted frames to run before taking the snapshot (at least 1)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,
}

impl Args {
    fn into_config(self) -> Result<(Config, Options), Error> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(t) = self.theme { cfg.theme = t; }
        if let Some(w) = self.width { cfg.window.width = w; }
        if let Some(h) = self.height { cfg.window.height = h; }
        if let Some(p) = self.pixel_size { cfg.animation.pixel_size = p; }
        if let Some(f) = self.fps { cfg.animation.fps = f; }
        if self.seed.is_some() { cfg.seed = self.seed; }
        cfg.validate()?;
        Ok((cfg, Options { hud: self.hud, snapshot: self.snapshot, frames: self.frames }))
    }
}

struct Options {
    hud: bool,
    snapshot: Option<PathBuf>,
    frames: u32,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ridgeline=info")))
        .init();

    let (cfg, opts) = Args::parse().into_config()?;
    info!(?cfg, "starting");

    let rng = match cfg.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let viewport = Viewport::new(cfg.window.width, cfg.window.height);

    if let Some(path) = &opts.snapshot {
        let fb = snapshot::render_frames(viewport, cfg.theme, &cfg.animation, rng, opts.frames);
        return snapshot::save_png(&fb, path);
    }

    run_window(&cfg, &opts, viewport, rng)
}

fn run_window(cfg: &Config, opts: &Options, viewport: Viewport, rng: ChaCha8Rng) -> Result<(), Error> {
    /* --- Window + screen buffer ---
       Visual: a window opens at the configured size; `screen` is what you see each frame. */
    let mut drawer = Drawer::new(&cfg.window.title, viewport.width as usize, viewport.height as usize)?;
    let screen = FrameBuffer::new(viewport.width as usize, viewport.height as usize);

    /* --- Background bound to the screen ---
       Visual: nothing yet; mountains/clouds/stars are generated for this size. */
    let Some(mut bg) = Background::init(Some(screen), cfg.theme, &cfg.animation, rng) else {
        return Ok(());
    };

    /* --- HUD / FPS ---
       Visual: small white text in the top-left corner when enabled. */
    let mut show_hud = opts.hud;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    let start = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Host notifications.
           Visual: a resized window gets a freshly generated landscape; T swaps day/night colours. */
        let (w, h) = drawer.size();
        let current = Viewport::new(w as u32, h as u32);
        if w > 0 && h > 0 && current != bg.surface().viewport() {
            bg.on_resize(current);
        }
        if drawer.t_pressed_once() {
            let theme = bg.animator().theme().toggled();
            info!(?theme, dark = theme.is_dark(), "theme toggled");
            bg.on_theme_changed(theme);
        }
        if drawer.h_pressed_once() {
            show_hud = !show_hud; // visual: FPS text appears/disappears
        }

        /* 2) Frame callback. Rejected frames still pump window events.
           Visual: the screen only changes ~24 times a second; in between the old frame stays up. */
        let now = Instant::now();
        let ts = now.duration_since(start).as_secs_f64() * 1000.0;
        if !bg.on_frame(ts) {
            drawer.pump();
            continue;
        }

        if show_hud {
            draw_text_5x7(bg.surface_mut(), 8, 8, &hud_fps_text, 0x00_FF_FF_FF); // visual: white HUD on top
        }

        /* 3) Present to the window (this is when the on-screen image updates). */
        drawer.present(bg.surface())?;

        /* 4) FPS counter, once per second.
           Visual: HUD number refreshes; RUST_LOG=ridgeline=debug prints it too. */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!(fps, "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let args = Args::try_parse_from(["ridgeline", "--theme", "dark", "--pixel-size", "4", "--seed", "9"]).unwrap();
        let (cfg, opts) = args.into_config().unwrap();
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.animation.pixel_size, 4);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(opts.frames, 1);
        assert!(!opts.hud);
    }

    #[test]
    fn zero_snapshot_frames_rejected() {
        assert!(Args::try_parse_from(["ridgeline", "--snapshot", "out.png", "--frames", "0"]).is_err());
        assert!(Args::try_parse_from(["ridgeline", "--frames", "3"]).is_ok());
    }

    #[test]
    fn oversized_pixel_size_rejected() {
        let args = Args::try_parse_from(["ridgeline", "--pixel-size", "1073741824"]).unwrap();
        assert!(matches!(args.into_config(), Err(Error::ConfigParse(_))));
    }
}
