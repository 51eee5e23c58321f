//! Pixel buffer surface shown on a true-color terminal

use std::io::Write;

use anyhow::Context;

use crate::config::Color;
use crate::render::Surface;

/// In-memory raster that is written to a terminal on [Surface::present]
///
/// Two pixel rows share one line of text: the upper pixel is the
/// foreground of a `▀` glyph, the lower one its background.
pub struct TerminalCanvas<W: Write> {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    fill: Color,
    stroke: Color,
    out: W,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(width: usize, height: usize, out: W) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
            fill: Color::BLACK,
            stroke: Color::BLACK,
            out,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at pixel (x, y), `None` outside the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Render the buffer as ANSI text, starting with a screen clear
    pub fn frame(&self) -> String {
        let mut frame = String::from("\x1B[2J\x1B[1;1H");
        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixels[y * self.width + x];
                let bottom = self.pixel(x, y + 1).unwrap_or(Color::BLACK);
                frame.push_str(&format!(
                    "\x1B[38;2;{};{};{}m\x1B[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                ));
            }
            frame.push_str("\x1B[0m\n");
        }
        frame
    }
}

/// Pixel index for a coordinate, if it lies on `[0, limit]`
///
/// The far edge maps onto the last pixel so that borders drawn exactly at
/// the canvas edge stay visible.
fn to_pixel(v: f64, limit: usize) -> Option<usize> {
    if v < 0.0 || v > limit as f64 || limit == 0 {
        return None;
    }
    Some((v.floor() as usize).min(limit - 1))
}

impl<W: Write> Surface for TerminalCanvas<W> {
    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let clip = |a: f64, limit: usize| a.round().clamp(0.0, limit as f64) as usize;
        let x0 = clip(x, self.width);
        let x1 = clip(x + w, self.width).max(x0);
        let (y0, y1) = (clip(y, self.height), clip(y + h, self.height));
        for py in y0..y1 {
            self.pixels[py * self.width + x0..py * self.width + x1].fill(self.fill);
        }
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
            let px = to_pixel(x0 + dx * t, self.width);
            let py = to_pixel(y0 + dy * t, self.height);
            if let (Some(px), Some(py)) = (px, py) {
                self.set(px, py, self.stroke);
            }
        }
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let frame = self.frame();
        self.out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush())
            .context("Could not write frame to terminal")
    }
}
