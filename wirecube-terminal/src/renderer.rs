/// Pixel canvas that presents itself on a terminal grid
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wirecube_core::{Color, ProjectedPoint, Surface};

/// Character coverage ramp (emptiest to fullest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lines are thin next to a terminal cell, so partial coverage is boosted
const COVERAGE_GAIN: f64 = 4.0;

/// An RGB framebuffer of fixed size.
///
/// This is the surface the frame loop draws on. Presenting it downsamples
/// blocks of pixels into terminal cells.
pub struct PixelCanvas {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width * height],
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Colour at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Number of pixels differing from the background
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != self.background).count()
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.pixels[idx] = color;
        }
    }

    /// Write the canvas to a `cols` x `rows` character grid starting at
    /// terminal row `top`.
    ///
    /// Each cell covers a block of pixels; its glyph comes from the share of
    /// lit pixels in the block and its colour from the most common lit colour.
    pub fn draw<W: Write>(
        &self,
        writer: &mut W,
        top: u16,
        cols: u16,
        rows: u16,
    ) -> std::io::Result<()> {
        let (cols, rows) = (cols as usize, rows as usize);
        if cols == 0 || rows == 0 {
            return Ok(());
        }

        let mut area = vec![0u32; cols * rows];
        let mut lit = vec![0u32; cols * rows];
        let mut tally: Vec<Vec<(Color, u32)>> = vec![Vec::new(); cols * rows];

        for y in 0..self.height {
            let cy = y * rows / self.height;
            for x in 0..self.width {
                let cell = cy * cols + x * cols / self.width;
                area[cell] += 1;
                let pixel = self.pixels[y * self.width + x];
                if pixel != self.background {
                    lit[cell] += 1;
                    let counts = &mut tally[cell];
                    match counts.iter_mut().find(|(color, _)| *color == pixel) {
                        Some((_, n)) => *n += 1,
                        None => counts.push((pixel, 1)),
                    }
                }
            }
        }

        writer.queue(SetBackgroundColor(to_term_color(self.background)))?;
        let mut current: Option<Color> = None;
        for row in 0..rows {
            writer.queue(cursor::MoveTo(0, top + row as u16))?;
            for col in 0..cols {
                let cell = row * cols + col;
                let glyph = coverage_glyph(lit[cell], area[cell]);
                if let Some(color) = dominant_color(&tally[cell]) {
                    if current != Some(color) {
                        writer.queue(SetForegroundColor(to_term_color(color)))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width as u32
    }

    fn height(&self) -> u32 {
        self.height as u32
    }

    fn clear(&mut self, color: Color) {
        self.background = color;
        self.pixels.fill(color);
    }

    /// Bresenham along the major axis, `width` pixels across the minor one.
    /// A zero width draws nothing.
    fn draw_line(&mut self, color: Color, a: ProjectedPoint, b: ProjectedPoint, width: u32) {
        if width == 0 {
            return;
        }

        let margin = f64::from(width);
        let bounds = (
            -margin,
            -margin,
            self.width as f64 + margin,
            self.height as f64 + margin,
        );
        let Some((a, b)) = clip_segment(a, b, bounds) else {
            return;
        };

        let (mut x0, mut y0) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let x_major = dx >= -dy;

        // Spread the stroke around the centre line, extra pixel going positive
        let low = -((width as i64 - 1) / 2);
        let high = width as i64 / 2;

        let mut err = dx + dy;
        loop {
            for offset in low..=high {
                if x_major {
                    self.plot(x0, y0 + offset, color);
                } else {
                    self.plot(x0 + offset, y0, color);
                }
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Liang-Barsky clip of segment `a-b` to `(min_x, min_y, max_x, max_y)`
fn clip_segment(
    a: ProjectedPoint,
    b: ProjectedPoint,
    bounds: (f64, f64, f64, f64),
) -> Option<(ProjectedPoint, ProjectedPoint)> {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
        return None;
    }

    let (min_x, min_y, max_x, max_y) = bounds;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, a.x - min_x),
        (dx, max_x - a.x),
        (-dy, a.y - min_y),
        (dy, max_y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
    }

    Some((
        ProjectedPoint::new(a.x + t0 * dx, a.y + t0 * dy),
        ProjectedPoint::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

/// Glyph for `lit` of `area` pixels being drawn
fn coverage_glyph(lit: u32, area: u32) -> char {
    if lit == 0 || area == 0 {
        return LUMINOSITY_RAMP[0];
    }
    let coverage = (f64::from(lit) / f64::from(area) * COVERAGE_GAIN).min(1.0);
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = ((coverage * last as f64).ceil() as usize).clamp(1, last);
    LUMINOSITY_RAMP[index]
}

/// Most frequent colour in a cell; ties go to the colour seen first
fn dominant_color(counts: &[(Color, u32)]) -> Option<Color> {
    counts
        .iter()
        .fold(None, |best: Option<(Color, u32)>, &(color, n)| match best {
            Some((_, most)) if most >= n => best,
            _ => Some((color, n)),
        })
        .map(|(color, _)| color)
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
