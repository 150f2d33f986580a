//! Depth-buffered triangle rasterization.

use image::{Rgb, RgbImage};

use crate::camera::ScreenPoint;

/// Colour image plus depth buffer, both `width * height`.
pub(crate) struct Framebuffer {
    pub image: RgbImage,
    depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let len = width as usize * height as usize;
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background)),
            depth: vec![f64::NEG_INFINITY; len],
        }
    }

    /// Fill pixels whose centres fall inside the triangle, interpolating
    /// depth and intensity. Both windings are drawn.
    pub fn draw_triangle(&mut self, pts: [ScreenPoint; 3], intensity: [f64; 3], surface: [u8; 3]) {
        let [a, b, c] = pts;
        let area = edge(&a, &b, c.x, c.y);
        if area.abs() < f64::EPSILON {
            return;
        }

        let (width, height) = self.image.dimensions();
        let Some((x0, x1)) = span(a.x.min(b.x).min(c.x), a.x.max(b.x).max(c.x), width) else {
            return;
        };
        let Some((y0, y1)) = span(a.y.min(b.y).min(c.y), a.y.max(b.y).max(c.y), height) else {
            return;
        };

        for py in y0..=y1 {
            let sy = f64::from(py) + 0.5;
            for px in x0..=x1 {
                let sx = f64::from(px) + 0.5;
                let w0 = edge(&b, &c, sx, sy) / area;
                let w1 = edge(&c, &a, sx, sy) / area;
                let w2 = edge(&a, &b, sx, sy) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * a.depth + w1 * b.depth + w2 * c.depth;
                let slot = py as usize * width as usize + px as usize;
                if z <= self.depth[slot] {
                    continue;
                }
                self.depth[slot] = z;

                let shade = (w0 * intensity[0] + w1 * intensity[1] + w2 * intensity[2]).clamp(0.0, 1.0);
                self.image.put_pixel(px, py, Rgb(surface.map(|ch| scale_channel(ch, shade))));
            }
        }
    }

    /// Number of pixels covered by any triangle.
    #[cfg(test)]
    pub fn covered(&self) -> usize {
        self.depth.iter().filter(|d| d.is_finite()).count()
    }
}

/// Twice the signed area of `(a, b, p)`.
fn edge(a: &ScreenPoint, b: &ScreenPoint, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Pixel index range covering `[lo, hi]`, clipped to `0..limit`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation: values are clamped to the image extent first
fn span(lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
    let max = f64::from(limit) - 1.0;
    if hi < 0.0 || lo > max + 1.0 || limit == 0 {
        return None;
    }
    let first = lo.floor().clamp(0.0, max) as u32;
    let last = hi.floor().clamp(0.0, max) as u32;
    Some((first, last))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation: shade is clamped to [0, 1]
fn scale_channel(channel: u8, shade: f64) -> u8 {
    (f64::from(channel) * shade).round() as u8
}
