/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wirecube_core::{Color, Vector3};

use crate::camera::Camera;

/// Character grid with a depth buffer, drawn to the terminal each frame
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::WHITE; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::WHITE);
    }

    /// Character and colour at a cell, if it is on the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Color)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        Some((self.char_buffer[idx], self.color_buffer[idx]))
    }

    /// Draw a world-space segment. Segments with an endpoint outside the
    /// view volume are skipped.
    pub fn draw_line_3d(&mut self, start: Vector3, end: Vector3, color: Color, camera: &Camera) {
        let (w, h) = (self.width as u32, self.height as u32);
        let (Some(a), Some(b)) = (
            camera.project_to_screen(start, w, h),
            camera.project_to_screen(end, w, h),
        ) else {
            return;
        };
        self.rasterize_line(a, b, color);
    }

    /// Mark a single world-space point with `glyph`.
    pub fn draw_point_3d(&mut self, point: Vector3, glyph: char, color: Color, camera: &Camera) {
        if let Some((x, y, depth)) =
            camera.project_to_screen(point, self.width as u32, self.height as u32)
        {
            // Markers sit on top of the lines that end at them
            self.plot(x, y, depth - 1e-4, glyph, color);
        }
    }

    /// Overlay text, ignoring depth. Text past the right edge is cut off.
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str, color: Color) {
        if y >= self.height {
            return;
        }
        for (offset, c) in text.chars().enumerate() {
            let col = x + offset;
            if col >= self.width {
                break;
            }
            let idx = y * self.width + col;
            self.depth_buffer[idx] = f32::NEG_INFINITY;
            self.char_buffer[idx] = c;
            self.color_buffer[idx] = color;
        }
    }

    fn rasterize_line(&mut self, a: (f32, f32, f32), b: (f32, f32, f32), color: Color) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let glyph = line_glyph(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + dx * t;
            let y = a.1 + dy * t;
            let depth = a.2 + (b.2 - a.2) * t;
            self.plot(x, y, depth, glyph, color);
        }
    }

    fn plot(&mut self, x: f32, y: f32, depth: f32, glyph: char, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = (x as usize, y as usize);
        if col >= self.width || row >= self.height {
            return;
        }

        let idx = row * self.width + col;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = glyph;
            self.color_buffer[idx] = color;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(to_term_color(color)))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a glyph that follows the segment's on-screen slope, allowing for
/// cells being twice as tall as wide.
fn line_glyph(dx: f32, dy: f32) -> char {
    let visual_dy = dy * 2.0;
    if visual_dy.abs() * 2.0 < dx.abs() {
        '-'
    } else if visual_dy.abs() > dx.abs() * 2.0 {
        '|'
    } else if (dx > 0.0) != (dy > 0.0) {
        '/'
    } else {
        '\\'
    }
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> Camera {
        Camera::new(80, 24).with_position(Vector3::new(0.0, 0.0, 5.0))
    }

    fn drawn_cells(renderer: &AsciiRenderer) -> Vec<(usize, usize, char)> {
        let mut cells = Vec::new();
        for y in 0..renderer.height() {
            for x in 0..renderer.width() {
                let (c, _) = renderer.cell(x, y).unwrap();
                if c != ' ' {
                    cells.push((x, y, c));
                }
            }
        }
        cells
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_glyph(10.0, 0.0), '-');
        assert_eq!(line_glyph(0.0, 10.0), '|');
        assert_eq!(line_glyph(4.0, -2.0), '/');
        assert_eq!(line_glyph(4.0, 2.0), '\\');
        assert_eq!(line_glyph(-4.0, -2.0), '\\');
    }

    #[test]
    fn test_horizontal_line() {
        let camera = front_camera();
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.draw_line_3d(
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Color::RED,
            &camera,
        );

        let cells = drawn_cells(&renderer);
        assert!(cells.len() > 5);
        assert!(cells.iter().all(|&(_, y, c)| y == 12 && c == '-'));
        assert_eq!(renderer.cell(40, 12), Some(('-', Color::RED)));
    }

    #[test]
    fn test_clipped_line_is_skipped() {
        let camera = front_camera();
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.draw_line_3d(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 10.0),
            Color::RED,
            &camera,
        );
        assert!(drawn_cells(&renderer).is_empty());
    }

    #[test]
    fn test_nearer_line_wins() {
        let camera = front_camera();
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.draw_line_3d(
            Vector3::new(-1.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Color::GREEN,
            &camera,
        );
        renderer.draw_line_3d(
            Vector3::new(-1.0, 0.0, -1.0),
            Vector3::new(1.0, 0.0, -1.0),
            Color::BLUE,
            &camera,
        );
        assert_eq!(renderer.cell(40, 12), Some(('-', Color::GREEN)));
    }

    #[test]
    fn test_point_marker_covers_line_end() {
        let camera = front_camera();
        let mut renderer = AsciiRenderer::new(80, 24);
        let end = Vector3::new(0.0, 0.0, 0.0);
        renderer.draw_line_3d(Vector3::new(-1.0, 0.0, 0.0), end, Color::RED, &camera);
        renderer.draw_point_3d(end, 'o', Color::BLUE, &camera);
        assert_eq!(renderer.cell(40, 12), Some(('o', Color::BLUE)));
    }

    #[test]
    fn test_text_overlay_and_clear() {
        let mut renderer = AsciiRenderer::new(10, 2);
        renderer.draw_text(7, 1, "hello", Color::YELLOW);
        assert_eq!(renderer.cell(7, 1), Some(('h', Color::YELLOW)));
        assert_eq!(renderer.cell(9, 1), Some(('l', Color::YELLOW)));

        renderer.clear();
        assert_eq!(renderer.cell(7, 1), Some((' ', Color::WHITE)));
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(4, 2);
        renderer.draw_text(0, 0, "ab", Color::RED);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ab"));
        assert_eq!(text.matches("\r\n").count(), 1);
    }

    #[test]
    fn test_resize() {
        let mut renderer = AsciiRenderer::new(4, 2);
        renderer.resize(8, 3);
        assert_eq!((renderer.width(), renderer.height()), (8, 3));
        assert_eq!(renderer.cell(7, 2), Some((' ', Color::WHITE)));
    }
}
