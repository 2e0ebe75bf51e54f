// Headless rendering: run the animator against an off-screen buffer and
// save the last frame as a PNG. No window involved.

use std::path::Path;

use image::{ImageBuffer, Rgb};
use rand::Rng;
use tracing::info;

use crate::config::AnimationSettings;
use crate::error::Error;
use crate::palette::unpack;
use crate::animator::Animator;
use crate::surface::Surface;
use crate::types::{FrameBuffer, Theme, Viewport};

/// Render `frames` accepted frames (timestamps one frame interval apart) and return the buffer.
/// At least one frame is always rendered, so `frames = 0` behaves like 1.
pub fn render_frames<R: Rng>(
    viewport: Viewport,
    theme: Theme,
    settings: &AnimationSettings,
    rng: R,
    frames: u32,
) -> FrameBuffer {
    let mut fb = FrameBuffer::new(viewport.width as usize, viewport.height as usize);
    let mut animator = Animator::new(viewport, theme, settings, rng);
    // whole milliseconds, so every step clears the gate exactly
    let step = animator.frame_interval_ms().ceil();
    for i in 1..=frames.max(1) {
        if let Some(frame) = animator.tick(i as f64 * step) {
            fb.draw(&frame);
        }
    }
    fb
}

pub fn to_image(fb: &FrameBuffer) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let (r, g, b) = unpack(fb.pixels[y as usize * fb.width + x as usize]);
        Rgb([r, g, b])
    })
}

pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_image(fb)
        .save(path)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), width = fb.width, height = fb.height, "snapshot written");
    Ok(())
}
