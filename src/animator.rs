// The procedural background animator: owns the scene, the theme and the
// frame gate. `tick` is the whole per-frame step; hosts just feed it
// timestamps and paint whatever Frame comes back.

use rand::Rng;
use tracing::{debug, info};

use crate::config::AnimationSettings;
use crate::palette::Palette;
use crate::render::{build_frame, Frame};
use crate::scene::{Counts, Scene};
use crate::types::{Theme, Viewport};

/// Accepts at most one frame per `1000 / fps` ms.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: f64,
    last_ms: f64,
}

impl FramePacer {
    pub fn new(fps: f64) -> Self {
        Self { interval_ms: 1000.0 / fps, last_ms: 0.0 }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// True if `now_ms` is far enough past the last accepted frame; remembers it if so.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_ms < self.interval_ms {
            return false;
        }
        self.last_ms = now_ms;
        true
    }
}

pub struct Animator<R: Rng> {
    scene: Scene,
    theme: Theme,
    pacer: FramePacer,
    rng: R,
}

impl<R: Rng> Animator<R> {
    pub fn new(viewport: Viewport, theme: Theme, settings: &AnimationSettings, mut rng: R) -> Self {
        let scene = Scene::generate(viewport, settings.pixel_size, &mut rng);
        let counts = scene.counts();
        info!(
            width = viewport.width,
            height = viewport.height,
            ?theme,
            segments = counts.segments,
            clouds = counts.clouds,
            stars = counts.stars,
            "background initialised"
        );
        Self { scene, theme, pacer: FramePacer::new(settings.fps), rng }
    }

    /// Per-frame callback. `None` means the gate rejected this timestamp and
    /// nothing changed; the host should simply try again next refresh.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<Frame> {
        if !self.pacer.accept(timestamp_ms) {
            return None;
        }
        let frame = build_frame(&self.scene, self.palette(), timestamp_ms);
        self.scene.advance(&mut self.rng);
        Some(frame)
    }

    /// New surface size. Elements are rebuilt from scratch, not rescaled.
    pub fn resize(&mut self, viewport: Viewport) {
        self.scene.viewport = viewport;
        if self.scene.is_populated() {
            self.scene.regenerate(&mut self.rng);
        }
        let counts = self.scene.counts();
        info!(
            width = viewport.width,
            height = viewport.height,
            segments = counts.segments,
            clouds = counts.clouds,
            stars = counts.stars,
            "background resized"
        );
    }

    /// Only the palette changes; geometry is kept as is.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            debug!(?theme, "theme changed");
        }
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &'static Palette {
        Palette::for_theme(self.theme)
    }

    pub fn viewport(&self) -> Viewport {
        self.scene.viewport
    }

    pub fn counts(&self) -> Counts {
        self.scene.counts()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.pacer.interval_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DARK, LIGHT};
    use crate::render::Layer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn animator(theme: Theme) -> Animator<ChaCha8Rng> {
        Animator::new(Viewport::new(800, 600), theme, &AnimationSettings::default(), ChaCha8Rng::seed_from_u64(3))
    }

    #[test]
    fn gate_caps_at_24_fps() {
        let mut a = animator(Theme::Light);
        let accepted = (0..=100).filter(|i| a.tick(*i as f64 * 10.0).is_some()).count();
        assert!(accepted <= 25, "accepted {accepted}");
        assert!(accepted > 0);
    }

    #[test]
    fn rejected_tick_leaves_state_alone() {
        let mut a = animator(Theme::Light);
        assert!(a.tick(50.0).is_some());
        let offset = a.scene().mountains[0].offset;
        let cloud_x = a.scene().clouds[0].x;
        assert!(a.tick(60.0).is_none());
        assert_eq!(a.scene().mountains[0].offset, offset);
        assert_eq!(a.scene().clouds[0].x, cloud_x);
    }

    #[test]
    fn accepted_tick_advances_after_drawing() {
        let mut a = animator(Theme::Light);
        let before = a.scene().mountains[0].offset;
        let frame = a.tick(100.0).unwrap();
        assert_eq!(frame.timestamp, 100.0);
        assert!(a.scene().mountains[0].offset < before);
    }

    #[test]
    fn light_800x600_scenario() {
        let mut a = animator(Theme::Light);
        assert_eq!(a.counts(), Counts { segments: 26, clouds: 4, stars: 48 });
        let frame = a.tick(1000.0).unwrap();
        assert_eq!(frame.count(Layer::Stars), 0);
        assert_eq!(frame.commands[0].color, LIGHT.sky);
    }

    #[test]
    fn dark_800x600_scenario() {
        let mut a = animator(Theme::Dark);
        let frame = a.tick(1000.0).unwrap();
        assert_eq!(frame.count(Layer::Stars), 48);
        assert_eq!(a.palette(), &DARK);
        assert_eq!(frame.commands[0].color, DARK.sky);
    }

    #[test]
    fn theme_change_keeps_geometry() {
        let mut a = animator(Theme::Light);
        let heights = a.scene().mountains[2].heights.clone();
        a.set_theme(Theme::Dark);
        assert_eq!(a.theme(), Theme::Dark);
        assert!(a.theme().is_dark());
        assert_eq!(a.scene().mountains[2].heights, heights);
        let frame = a.tick(500.0).unwrap();
        assert_eq!(frame.count(Layer::Stars), 48);
    }

    #[test]
    fn resize_twice_gives_same_counts() {
        let mut a = animator(Theme::Light);
        a.resize(Viewport::new(1024, 768));
        let first = a.counts();
        a.resize(Viewport::new(1024, 768));
        assert_eq!(a.counts(), first);
        assert_eq!(first, Counts { segments: 33, clouds: 4, stars: 78 });
    }

    #[test]
    fn resize_rebuilds_elements() {
        let mut a = animator(Theme::Light);
        a.scene_mut().mountains[0].offset = -12.0;
        a.resize(Viewport::new(400, 300));
        assert_eq!(a.viewport(), Viewport::new(400, 300));
        assert_eq!(a.scene().mountains[0].offset, 0.0);
        assert!((a.scene().mountains[0].base - 255.0).abs() < 1e-9);
    }
}
