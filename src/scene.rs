// Landscape state: mountain layers, clouds and stars, plus how they are
// generated from a viewport size and how they move each frame.
//
// Counts are pure functions of the viewport; everything else (heights,
// positions, speeds) comes from the injected RNG.

use std::f64::consts::TAU;

use rand::Rng;

use crate::palette::MOUNTAIN_BANDS;
use crate::types::Viewport;

/// Mountain segment width, in pixel blocks.
pub const SEGMENT_BLOCKS: u32 = 4;
/// One extra cloud per this many horizontal pixels (plus two).
pub const CLOUD_SPAN: u32 = 400;
/// One star per this many square pixels.
pub const STAR_AREA: u64 = 10_000;
pub const SMOOTHING_PASSES: usize = 3;
pub const TWINKLE_STEP: f64 = 0.03;
/// How far past the left edge a cloud travels before it is recycled.
pub const CLOUD_MARGIN: f64 = 100.0;

/// Element counts for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub segments: usize,
    pub clouds: usize,
    pub stars: usize,
}

impl Counts {
    pub fn for_viewport(viewport: Viewport, pixel_size: u32) -> Self {
        let spacing = pixel_size.max(1) as u64 * SEGMENT_BLOCKS as u64;
        let area = viewport.width as u64 * viewport.height as u64;
        Self {
            segments: (viewport.width as u64 / spacing) as usize + 1,
            clouds: (viewport.width / CLOUD_SPAN) as usize + 2,
            stars: (area / STAR_AREA) as usize,
        }
    }
}

/// One silhouette band. `heights[j]` is the y of the ridge at segment j.
#[derive(Debug, Clone)]
pub struct MountainLayer {
    pub heights: Vec<f64>,
    pub base: f64,    // y the ridge starts and ends at
    pub offset: f64,  // scroll, always in (-spacing, 0]
    pub speed: f64,   // px per frame; nearer bands move faster
    pub band: usize,  // palette index, 0 = nearest
}

/// Ellipse centred at (x, y) with radii (width, height).
#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: u32,   // 1 or 2 px
    pub phase: f64,  // twinkle phase, grows without bound
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub viewport: Viewport,
    pub pixel_size: u32,
    pub mountains: Vec<MountainLayer>,
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
}

impl Scene {
    /// Sized but with no elements yet.
    pub fn empty(viewport: Viewport, pixel_size: u32) -> Self {
        Self {
            viewport,
            pixel_size: pixel_size.max(1),
            mountains: Vec::new(),
            clouds: Vec::new(),
            stars: Vec::new(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(viewport: Viewport, pixel_size: u32, rng: &mut R) -> Self {
        let mut scene = Self::empty(viewport, pixel_size);
        scene.regenerate(rng);
        scene
    }

    /// Throw away every element and build a fresh set for the current viewport.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let counts = self.counts_for_viewport();
        let (w, h) = (self.viewport.w(), self.viewport.h());

        self.mountains = (0..MOUNTAIN_BANDS)
            .map(|band| gen_mountain(band, counts.segments, h, rng))
            .collect();

        self.clouds = (0..counts.clouds)
            .map(|_| Cloud {
                x: uniform(rng, w),
                y: uniform(rng, h * 0.4),
                width: rng.gen_range(100.0..250.0),
                height: rng.gen_range(30.0..60.0),
                speed: rng.gen_range(0.2..0.5),
            })
            .collect();

        self.stars = (0..counts.stars)
            .map(|_| Star {
                x: uniform(rng, w),
                y: uniform(rng, h * 0.6),
                size: rng.gen_range(1..=2),
                phase: rng.gen_range(0.0..TAU),
            })
            .collect();
    }

    pub fn is_populated(&self) -> bool {
        !self.mountains.is_empty()
    }

    pub fn segment_spacing(&self) -> f64 {
        (self.pixel_size as u64 * SEGMENT_BLOCKS as u64) as f64
    }

    /// Counts the current viewport calls for.
    pub fn counts_for_viewport(&self) -> Counts {
        Counts::for_viewport(self.viewport, self.pixel_size)
    }

    /// Counts actually held right now.
    pub fn counts(&self) -> Counts {
        Counts {
            segments: self.mountains.first().map_or(0, |m| m.heights.len()),
            clouds: self.clouds.len(),
            stars: self.stars.len(),
        }
    }

    /// Move everything by one accepted frame.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let spacing = self.segment_spacing();
        for layer in &mut self.mountains {
            layer.offset -= layer.speed;
            // seamless loop: one full segment scrolled == back to the start
            if layer.offset <= -spacing {
                layer.offset = 0.0;
            }
        }

        let (w, h) = (self.viewport.w(), self.viewport.h());
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.x + cloud.width < -CLOUD_MARGIN {
                cloud.x = w + CLOUD_MARGIN;
                cloud.y = uniform(rng, h * 0.4);
            }
        }

        for star in &mut self.stars {
            star.phase += TWINKLE_STEP;
        }
    }
}

fn gen_mountain<R: Rng + ?Sized>(band: usize, segments: usize, h: f64, rng: &mut R) -> MountainLayer {
    let i = band as f64;
    let base = h - h * 0.15 - i * h * 0.07;           // farther bands sit higher
    let amplitude = h * 0.15 * (1.0 - i * 0.2);       // and are flatter

    let last = segments.saturating_sub(1);
    let raw: Vec<f64> = (0..segments)
        .map(|j| {
            if j == 0 || j == last {
                base
            } else {
                base - rng.gen_range(0.0..1.0) * amplitude
            }
        })
        .collect();

    MountainLayer {
        heights: smooth(&raw, SMOOTHING_PASSES),
        base,
        offset: 0.0,
        speed: 0.1 * (MOUNTAIN_BANDS as f64 - i),
        band,
    }
}

/// 3-tap moving average, repeated `passes` times. Endpoints are left untouched.
pub fn smooth(values: &[f64], passes: usize) -> Vec<f64> {
    let mut current = values.to_vec();
    if values.len() < 3 {
        return current;
    }
    for _ in 0..passes {
        let mut next = current.clone();
        for i in 1..current.len() - 1 {
            next[i] = (current[i - 1] + current[i] + current[i + 1]) / 3.0;
        }
        current = next;
    }
    current
}

/// U[0, max), or 0 for an empty range (zero-sized viewport).
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if max > 0.0 { rng.gen_range(0.0..max) } else { 0.0 }
}
