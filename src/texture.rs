use std::path::Path;

use image::{ImageFormat, Pixel, Rgba, RgbaImage};

use crate::{
    error::AtlasResult,
    text::{coverage::Coverage, DrawStyle},
};

/// The atlas image while it is being drawn.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Transparent canvas. Zero sized layouts still get one pixel so the image can be encoded.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Source-over blends `color`, scaled by `coverage`, with its top-left corner at `(x, y)`.
    /// Pixels outside the canvas are dropped.
    pub fn blend_coverage(&mut self, coverage: &Coverage, x: i32, y: i32, color: Rgba<u8>) {
        for cy in 0..coverage.height {
            let py = y as i64 + cy as i64;
            if py < 0 || py >= self.height() as i64 {
                continue;
            }
            for cx in 0..coverage.width {
                let px = x as i64 + cx as i64;
                if px < 0 || px >= self.width() as i64 {
                    continue;
                }
                let value = coverage.get(cx, cy);
                if value == 0 {
                    continue;
                }
                let mut src = color;
                src.0[3] = ((color.0[3] as u32 * value as u32 + 127) / 255) as u8;
                self.image
                    .get_pixel_mut(px as u32, py as u32)
                    .blend(&src);
            }
        }
    }

    /// Composites one rasterized glyph whose ink box starts at `(x, y)`: the stroke outline first,
    /// then the fill. Without smoothing both are cut to hard masks.
    pub fn draw_glyph_coverage(&mut self, mut fill: Coverage, x: i32, y: i32, style: &DrawStyle) {
        if let Some(stroke) = style.stroke.filter(|stroke| stroke.width > 0) {
            let mut outline = fill.dilate(stroke.width);
            if !style.smoothing {
                outline.threshold();
            }
            let s = i32::try_from(stroke.width).unwrap_or(i32::MAX);
            self.blend_coverage(
                &outline,
                x.saturating_sub(s),
                y.saturating_sub(s),
                stroke.color,
            );
        }

        if !style.smoothing {
            fill.threshold();
        }
        self.blend_coverage(&fill, x, y, style.fill);
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> AtlasResult<()> {
        self.image
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}
