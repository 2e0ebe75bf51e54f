// Turns a Scene into a flat list of draw commands for one frame.
// No pixels are touched here; a Surface executes the commands.

use crate::palette::Palette;
use crate::scene::{Cloud, MountainLayer, Scene, Star};

/// Pixel offset of a cloud's shadow from its body.
pub const SHADOW_OFFSET: f64 = 5.0;

/// Which part of the landscape a command belongs to. Declared in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Sky,
    Stars,
    Clouds,
    Mountains,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Fill the whole surface.
    Clear,
    Rect { x: i32, y: i32, w: u32, h: u32 },
    /// Closed polygon, filled.
    Polygon(Vec<(i32, i32)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub layer: Layer,
    pub shape: Shape,
    pub color: u32,
    pub alpha: f32, // 1.0 = opaque; applies to this command only
}

/// Everything needed to paint one accepted frame, back to front.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub timestamp: f64,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn count(&self, layer: Layer) -> usize {
        self.commands.iter().filter(|c| c.layer == layer).count()
    }
}

/// Snap a coordinate down onto the pixel-block grid.
#[inline]
pub fn snap(v: f64, pixel_size: u32) -> i32 {
    let p = pixel_size as f64;
    ((v / p).floor() * p) as i32
}

/// Star brightness at time `t` ms, in [0.5, 1.0].
#[inline]
pub fn twinkle_alpha(phase: f64, t: f64) -> f32 {
    (((phase + t * 0.001).sin() + 1.0) / 2.0 * 0.5 + 0.5) as f32
}

pub fn build_frame(scene: &Scene, palette: &Palette, timestamp: f64) -> Frame {
    let mut out = Vec::new();
    out.push(DrawCommand { layer: Layer::Sky, shape: Shape::Clear, color: palette.sky, alpha: 1.0 });

    if let Some(star_color) = palette.star {
        for star in &scene.stars {
            push_star(&mut out, star, star_color, scene.pixel_size, timestamp);
        }
    }

    for cloud in &scene.clouds {
        push_ellipse(&mut out, cloud.x + SHADOW_OFFSET, cloud.y + SHADOW_OFFSET, cloud, palette.cloud_shadow, scene.pixel_size);
        push_ellipse(&mut out, cloud.x, cloud.y, cloud, palette.cloud, scene.pixel_size);
    }

    // farthest band first so the nearest ends up on top
    for layer in scene.mountains.iter().rev() {
        out.push(DrawCommand {
            layer: Layer::Mountains,
            shape: Shape::Polygon(ridge_polygon(scene, layer)),
            color: palette.mountains[layer.band],
            alpha: 1.0,
        });
    }

    Frame { timestamp, commands: out }
}

fn push_star(out: &mut Vec<DrawCommand>, star: &Star, color: u32, pixel_size: u32, t: f64) {
    out.push(DrawCommand {
        layer: Layer::Stars,
        shape: Shape::Rect { x: snap(star.x, pixel_size), y: snap(star.y, pixel_size), w: star.size, h: star.size },
        color,
        alpha: twinkle_alpha(star.phase, t),
    });
}

/// Pixel-block ellipse: one block per grid cell whose sample point falls inside.
fn push_ellipse(out: &mut Vec<DrawCommand>, cx: f64, cy: f64, cloud: &Cloud, color: u32, pixel_size: u32) {
    let (rw, rh) = (cloud.width, cloud.height);
    if rw <= 0.0 || rh <= 0.0 {
        return;
    }
    let step = pixel_size as f64;
    let mut py = cy - rh;
    while py < cy + rh {
        let mut px = cx - rw;
        while px < cx + rw {
            let dx = (px - cx) / rw;
            let dy = (py - cy) / rh;
            if dx * dx + dy * dy <= 1.0 {
                out.push(DrawCommand {
                    layer: Layer::Clouds,
                    shape: Shape::Rect { x: snap(px, pixel_size), y: snap(py, pixel_size), w: pixel_size, h: pixel_size },
                    color,
                    alpha: 1.0,
                });
            }
            px += step;
        }
        py += step;
    }
}

/// Silhouette outline from the bottom-left corner, along the ridge, to the bottom-right corner.
pub fn ridge_polygon(scene: &Scene, layer: &MountainLayer) -> Vec<(i32, i32)> {
    let (w, h) = (scene.viewport.w(), scene.viewport.h());
    let spacing = scene.segment_spacing();
    let p = scene.pixel_size;

    let mut pts = Vec::with_capacity(layer.heights.len() + 2);
    pts.push((0, h as i32));
    for (j, &y) in layer.heights.iter().enumerate() {
        // `%` keeps the sign of the dividend, so the first sample may sit left of 0
        let x = (j as f64 * spacing + layer.offset) % (w + spacing) - spacing;
        pts.push((snap(x, p), snap(y, p)));
    }
    pts.push((w as i32, h as i32));
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DARK, LIGHT};
    use crate::types::Viewport;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scene() -> Scene {
        Scene::generate(Viewport::new(800, 600), 8, &mut ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn snapping_floors_to_grid() {
        assert_eq!(snap(17.9, 8), 16);
        assert_eq!(snap(16.0, 8), 16);
        assert_eq!(snap(-0.5, 8), -8);
    }

    #[test]
    fn twinkle_stays_in_half_to_full() {
        for i in 0..200 {
            let a = twinkle_alpha(i as f64 * 0.37, i as f64 * 41.7);
            assert!((0.5..=1.0).contains(&a), "{a}");
        }
    }

    #[test]
    fn light_frame_has_no_stars() {
        let f = build_frame(&scene(), &LIGHT, 1000.0);
        assert_eq!(f.count(Layer::Stars), 0);
        assert_eq!(f.count(Layer::Mountains), 4);
        assert!(f.count(Layer::Clouds) > 0);
    }

    #[test]
    fn dark_frame_draws_every_star_in_dark_colours() {
        let s = scene();
        let f = build_frame(&s, &DARK, 1000.0);
        assert_eq!(f.count(Layer::Stars), 48);
        assert_eq!(f.commands[0].color, DARK.sky);
        let mountain_colours: Vec<u32> =
            f.commands.iter().filter(|c| c.layer == Layer::Mountains).map(|c| c.color).collect();
        assert_eq!(mountain_colours, vec![DARK.mountains[3], DARK.mountains[2], DARK.mountains[1], DARK.mountains[0]]);
    }

    #[test]
    fn commands_come_in_painters_order() {
        let f = build_frame(&scene(), &DARK, 0.0);
        assert!(f.commands.windows(2).all(|w| w[0].layer <= w[1].layer));
        assert_eq!(f.commands[0].shape, Shape::Clear);
    }

    #[test]
    fn shadow_drawn_before_body() {
        let mut s = scene();
        s.clouds.truncate(1);
        let f = build_frame(&s, &LIGHT, 0.0);
        let clouds: Vec<&DrawCommand> = f.commands.iter().filter(|c| c.layer == Layer::Clouds).collect();
        let first_body = clouds.iter().position(|c| c.color == LIGHT.cloud).unwrap();
        assert!(clouds[..first_body].iter().all(|c| c.color == LIGHT.cloud_shadow));
        assert!(clouds[first_body..].iter().all(|c| c.color == LIGHT.cloud));
    }

    #[test]
    fn all_geometry_is_grid_aligned() {
        let f = build_frame(&scene(), &DARK, 0.0);
        for c in &f.commands {
            match &c.shape {
                Shape::Rect { x, y, .. } => assert!(x % 8 == 0 && y % 8 == 0),
                Shape::Polygon(pts) => {
                    for &(x, y) in &pts[1..pts.len() - 1] {
                        assert!(x % 8 == 0 && y % 8 == 0);
                    }
                }
                Shape::Clear => {}
            }
        }
    }

    fn single_cloud_scene(pixel_size: u32, cloud: Cloud) -> Scene {
        let mut s = Scene::empty(Viewport::new(400, 300), pixel_size);
        s.clouds.push(cloud);
        s
    }

    fn blocks(frame: &Frame, color: u32) -> Vec<(i32, i32)> {
        frame
            .commands
            .iter()
            .filter(|c| c.layer == Layer::Clouds && c.color == color)
            .map(|c| match c.shape {
                Shape::Rect { x, y, .. } => (x, y),
                _ => panic!("cloud blocks are rects"),
            })
            .collect()
    }

    fn inside(px: f64, py: f64, cx: f64, cy: f64, rw: f64, rh: f64) -> bool {
        let dx = (px - cx) / rw;
        let dy = (py - cy) / rh;
        dx * dx + dy * dy <= 1.0
    }

    #[test]
    fn cloud_blocks_are_exactly_the_grid_samples_inside_the_ellipse() {
        // grid-aligned centre and radii: each block origin is its own sample point
        let cloud = Cloud { x: 96.0, y: 80.0, width: 40.0, height: 24.0, speed: 0.3 };
        let s = single_cloud_scene(8, cloud.clone());
        let body = blocks(&build_frame(&s, &LIGHT, 0.0), LIGHT.cloud);
        assert!(!body.is_empty());
        for &(x, y) in &body {
            assert!(inside(x as f64, y as f64, cloud.x, cloud.y, cloud.width, cloud.height), "({x},{y})");
        }

        let mut expected = Vec::new();
        let mut py = cloud.y - cloud.height;
        while py < cloud.y + cloud.height {
            let mut px = cloud.x - cloud.width;
            while px < cloud.x + cloud.width {
                if inside(px, py, cloud.x, cloud.y, cloud.width, cloud.height) {
                    expected.push((px as i32, py as i32));
                }
                px += 8.0;
            }
            py += 8.0;
        }
        assert_eq!(body, expected);
        // corners of the bounding box fall outside
        assert!(!body.contains(&(56, 56)));
        assert!(body.contains(&(96, 80)));
    }

    #[test]
    fn shadow_is_body_shifted_by_offset() {
        // 1px blocks make snapping the identity, so the +5 shift survives exactly
        let cloud = Cloud { x: 120.0, y: 70.0, width: 30.0, height: 12.0, speed: 0.3 };
        let s = single_cloud_scene(1, cloud.clone());
        let frame = build_frame(&s, &LIGHT, 0.0);
        let body = blocks(&frame, LIGHT.cloud);
        let shadow = blocks(&frame, LIGHT.cloud_shadow);
        assert!(!body.is_empty());
        let shifted: Vec<(i32, i32)> = body.iter().map(|&(x, y)| (x + 5, y + 5)).collect();
        assert_eq!(shadow, shifted);
        for &(x, y) in &shadow {
            assert!(inside(x as f64, y as f64, cloud.x + SHADOW_OFFSET, cloud.y + SHADOW_OFFSET, cloud.width, cloud.height));
        }
    }

    #[test]
    fn ridge_polygon_spans_the_bottom_edge() {
        let s = scene();
        let pts = ridge_polygon(&s, &s.mountains[0]);
        assert_eq!(pts.len(), 26 + 2);
        assert_eq!(pts[0], (0, 600));
        assert_eq!(*pts.last().unwrap(), (800, 600));
        // unscrolled: first sample sits one spacing left of the edge
        assert_eq!(pts[1].0, -32);
    }
}
