//! Character-grid renderer for terminals.
//!
//! Segments are scaled from viewport pixels onto a fixed grid of cells and
//! rasterized with Bresenham's line walk. The radar panel is stamped into
//! the top-right corner.

use std::fmt::Write as _;

use arena_shared::radar::{RadarConfig, RadarFrame};
use arena_shared::render::{Color, RenderBackend, Segment};

const BLANK: char = ' ';

pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    sx: f64,
    sy: f64,
    radar_cells: usize,
    radar_scale: f64,
    cells: Vec<char>,
}

impl AsciiRenderer {
    /// A `cols` x `rows` grid showing a `viewport_w` x `viewport_h` surface.
    pub fn new(cols: usize, rows: usize, viewport_w: f64, viewport_h: f64, radar: &RadarConfig) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let radar_cells = (rows / 4).max(3);
        Self {
            cols,
            rows,
            sx: cols as f64 / viewport_w,
            sy: rows as f64 / viewport_h,
            radar_cells,
            radar_scale: radar_cells as f64 / radar.size,
            cells: vec![BLANK; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The cell at `(col, row)`, if inside the grid.
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// The grid as newline-separated rows, trailing blanks trimmed.
    pub fn render_to_string(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().collect();
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out
    }

    fn plot(&mut self, col: i64, row: i64, ch: char) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), ch: char) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.plot(x, y, ch);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Liang-Barsky clip of a cell-space line against the grid.
    fn clip(&self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> Option<((i64, i64), (i64, i64))> {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let max_x = (self.cols - 1) as f64;
        let max_y = (self.rows - 1) as f64;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        let at = |t: f64| ((x0 + t * dx).floor() as i64, (y0 + t * dy).floor() as i64);
        Some((at(t0), at(t1)))
    }
}

/// Glyph for a color: the dominant channel picks the mark.
fn glyph(c: Color) -> char {
    if c == Color::DARK_GOLDENROD {
        '-'
    } else if c.g > c.r && c.g > c.b {
        '^'
    } else if c.b > c.r {
        '*'
    } else {
        '#'
    }
}

impl RenderBackend for AsciiRenderer {
    fn begin_frame(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw_segment(&mut self, segment: &Segment) {
        let from = (f64::from(segment.from.x) * self.sx, f64::from(segment.from.y) * self.sy);
        let to = (f64::from(segment.to.x) * self.sx, f64::from(segment.to.y) * self.sy);
        if let Some((a, b)) = self.clip(from, to) {
            self.line(a, b, glyph(segment.color));
        }
    }

    fn draw_radar(&mut self, radar: &RadarFrame) {
        let n = self.radar_cells as i64;
        let left = self.cols as i64 - n;
        let mid = n / 2;
        for i in 0..n {
            self.plot(left + mid, i, '|');
            self.plot(left + i, mid, '-');
        }
        self.plot(left + mid, mid, '+');
        for p in &radar.plots {
            let col = (p.x * self.radar_scale).floor() as i64;
            let row = (p.y * self.radar_scale).floor() as i64;
            if (0..n).contains(&col) && (0..n).contains(&row) {
                self.plot(left + col, row, 'o');
            }
        }
    }

    fn end_frame(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_shared::radar::RadarPlot;
    use arena_shared::render::ScreenPoint;

    fn grid() -> AsciiRenderer {
        AsciiRenderer::new(32, 16, 320.0, 160.0, &RadarConfig::default())
    }

    #[test]
    fn horizontal_line_fills_cells() {
        let mut r = grid();
        r.begin_frame();
        r.draw_segment(&Segment::new(ScreenPoint::new(0, 50), ScreenPoint::new(100, 50), Color::RED));
        for col in 0..=10 {
            assert_eq!(r.cell(col, 5), Some('#'));
        }
        assert_eq!(r.cell(11, 5), Some(' '));
    }

    #[test]
    fn offscreen_endpoints_are_clipped() {
        let mut r = grid();
        r.begin_frame();
        r.draw_segment(&Segment::new(
            ScreenPoint::new(-5000, 80),
            ScreenPoint::new(5000, 80),
            Color::DARK_GOLDENROD,
        ));
        assert!(r.render_to_string().contains('-'));
    }

    #[test]
    fn begin_frame_clears() {
        let mut r = grid();
        r.draw_segment(&Segment::new(ScreenPoint::new(0, 0), ScreenPoint::new(30, 30), Color::BLUE));
        r.begin_frame();
        assert!(r.render_to_string().trim().is_empty());
    }

    #[test]
    fn radar_blip_lands_in_corner() {
        let mut r = grid();
        r.begin_frame();
        let frame = arena_shared::radar::Radar::default().frame().clone();
        let frame = RadarFrame {
            plots: vec![RadarPlot { x: 0.0, y: 0.0 }],
            ..frame
        };
        r.draw_radar(&frame);
        let left = r.cols() - 4;
        assert_eq!(r.cell(left, 0), Some('o'));
        assert_eq!(r.cell(left + 2, 2), Some('+'));
    }
}
