// Window + software drawing utilities.
// 1) A resizable window that shows the landscape buffer.
// 2) A rasterizer for the animator's draw commands (blocks, ridges, alpha).
// 3) A tiny 5x7 bitmap font for the FPS HUD.

use crate::error::Error;
use crate::palette::{pack, unpack};
use crate::render::{DrawCommand, Frame, Shape};
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

/// How often the window asks for a new frame. The animator gates this down to its own rate.
pub const HOST_REFRESH_HZ: usize = 60;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window of the requested size.
    /// Visual: a new empty window appears; you can drag its edges to resize it.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(HOST_REFRESH_HZ);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately shows the new landscape frame.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process input/resize events without drawing (frame was skipped).
    /// Visual: nothing changes on screen, but key presses and resizes still register.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Current client area size.
    /// Visual: when this differs from the buffer size, the scene is rebuilt to fit.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// T flips light/dark.
    /// Visual: the sky darkens and stars appear (or the reverse) on the next frame.
    pub fn t_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    /// H shows/hides the FPS overlay.
    /// Visual: the small "FPS: 24.0" text toggles in the top-left corner.
    pub fn h_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::H, KeyRepeat::No)
    }
}

/* ---------- Rasterizer ---------- */

/// Execute every command of `frame`, in order.
/// Visual: sky first, then stars, clouds, and mountains painted over them.
pub fn rasterize(fb: &mut FrameBuffer, frame: &Frame) {
    for cmd in &frame.commands {
        draw_command(fb, cmd);
    }
}

pub fn draw_command(fb: &mut FrameBuffer, cmd: &DrawCommand) {
    match &cmd.shape {
        Shape::Clear => fb.pixels.fill(cmd.color),
        Shape::Rect { x, y, w, h } => fill_rect(fb, *x, *y, *w, *h, cmd.color, cmd.alpha),
        Shape::Polygon(points) => fill_polygon(fb, points, cmd.color),
    }
}

/// Source-over blend of `src` onto `dst` with coverage `alpha`.
/// Visual: a half-transparent star lets the sky show through.
#[inline]
fn blend(dst: u32, src: u32, alpha: f32) -> u32 {
    if alpha >= 1.0 {
        return src;
    }
    let a = alpha.clamp(0.0, 1.0);
    let (sr, sg, sb) = unpack(src);
    let (dr, dg, db) = unpack(dst);
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    pack(mix(sr, dr), mix(sg, dg), mix(sb, db))
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Filled axis-aligned rectangle, clipped to the buffer.
/// Visual: one chunky pixel-art block (cloud cell) or a tiny star square.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: u32, h: u32, color: u32, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let x0 = x.max(0) as usize;
    let y0 = y.max(0) as usize;
    let x1 = (x as i64 + w as i64).clamp(0, fb.width as i64) as usize;
    let y1 = (y as i64 + h as i64).clamp(0, fb.height as i64) as usize;
    for row in y0..y1 {
        let line = &mut fb.pixels[row * fb.width..(row + 1) * fb.width];
        for px in &mut line[x0.min(x1)..x1] {
            *px = blend(*px, color, alpha);
        }
    }
}

/// Even-odd scanline fill, sampling at pixel centres. The polygon is closed implicitly.
/// Visual: a solid mountain silhouette from the ridge line down to the bottom edge.
pub fn fill_polygon(fb: &mut FrameBuffer, points: &[(i32, i32)], color: u32) {
    if points.len() < 3 || fb.width == 0 || fb.height == 0 {
        return;
    }
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let max_y = points.iter().map(|p| p.1).max().unwrap_or(0).min(fb.height as i32 - 1);

    let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        let yc = y as f64 + 0.5;
        crossings.clear();
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            let (fy0, fy1) = (y0 as f64, y1 as f64);
            if (fy0 <= yc && yc < fy1) || (fy1 <= yc && yc < fy0) {
                let t = (yc - fy0) / (fy1 - fy0);
                crossings.push(x0 as f64 + t * (x1 - x0) as f64);
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            // pixel x is covered when its centre x+0.5 lies in [a, b)
            let start = (span[0] - 0.5).ceil() as i32;
            let end = (span[1] - 0.5).ceil() as i32;
            for x in start.max(0)..end.min(fb.width as i32) {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/* ---------- 5x7 bitmap font (just enough for "FPS: 00.0") ---------- */

// Each row uses the low 5 bits, bit 4 = leftmost column.
const GLYPHS: &[(char, [u8; 7])] = &[
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1E, 0x01, 0x01, 0x0E, 0x01, 0x01, 0x1E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    (':', [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00]),
];

fn glyph(ch: char) -> Option<&'static [u8; 7]> {
    GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
}

fn blit_glyph(fb: &mut FrameBuffer, x: i32, y: i32, rows: &[u8; 7], color: u32) {
    for (ry, bits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if bits & (1 << (4 - rx)) != 0 {
                put_pixel(fb, x + rx, y + ry as i32, color);
            }
        }
    }
}

/// Draw `text` with a 1px black drop shadow. Unknown characters (and space) advance the pen only.
/// Visual: compact HUD text; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(rows) = glyph(ch) {
            let gx = x + i as i32 * 6;
            blit_glyph(fb, gx + 1, y + 1, rows, 0x0000_0000);
            blit_glyph(fb, gx, y, rows, color);
        }
    }
}
