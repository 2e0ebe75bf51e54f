// The seam between the animator and whatever actually shows pixels.
// `Background` is the thin driver: it forwards host notifications
// (frame ready, resized, theme toggled) to the animator and paints
// accepted frames onto its surface.

use rand::Rng;
use tracing::debug;

use crate::animator::Animator;
use crate::config::AnimationSettings;
use crate::draw::rasterize;
use crate::render::Frame;
use crate::types::{FrameBuffer, Theme, Viewport};

pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, viewport: Viewport);
    fn draw(&mut self, frame: &Frame);
}

impl Surface for FrameBuffer {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as u32, self.height as u32)
    }

    fn resize(&mut self, viewport: Viewport) {
        self.reshape(viewport.width as usize, viewport.height as usize);
    }

    fn draw(&mut self, frame: &Frame) {
        rasterize(self, frame);
    }
}

pub struct Background<S: Surface, R: Rng> {
    surface: S,
    animator: Animator<R>,
}

impl<S: Surface, R: Rng> Background<S, R> {
    /// Bind to `surface`. With no surface there is nothing to animate: returns `None`.
    pub fn init(surface: Option<S>, theme: Theme, settings: &AnimationSettings, rng: R) -> Option<Self> {
        let Some(surface) = surface else {
            debug!("no drawing surface, background disabled");
            return None;
        };
        let animator = Animator::new(surface.viewport(), theme, settings, rng);
        Some(Self { surface, animator })
    }

    /// Host frame callback. Returns true when a frame was painted.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> bool {
        match self.animator.tick(timestamp_ms) {
            Some(frame) => {
                self.surface.draw(&frame);
                true
            }
            None => false,
        }
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.animator.resize(viewport);
    }

    pub fn on_theme_changed(&mut self, theme: Theme) {
        self.animator.set_theme(theme);
    }

    pub fn animator(&self) -> &Animator<R> {
        &self.animator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
