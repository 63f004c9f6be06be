use std::collections::BTreeSet;

use fontdue::{Font, FontSettings, Metrics};
use glyphpack_asset::Asset;

use crate::{
    error::{AtlasError, AtlasResult},
    texture::Canvas,
};

use super::{
    coverage::Coverage,
    source::{DrawStyle, GlyphSource, InkBox},
};

/// [`GlyphSource`] backed by a TrueType/OpenType font parsed with fontdue.
pub struct FontdueSource {
    name: String,
    font: Font,
}

impl FontdueSource {
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> AtlasResult<Self> {
        let name = name.into();
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|err| AtlasError::Font(format!("{name}: {err}")))?;
        Ok(Self { name, font })
    }

    pub fn from_asset(asset: &Asset) -> AtlasResult<Self> {
        Self::from_bytes(asset.path.display().to_string(), &asset.bytes)
    }
}

fn ink_box(metrics: &Metrics) -> InkBox {
    flip(
        metrics.xmin,
        metrics.ymin,
        metrics.width,
        metrics.height,
        metrics.advance_width,
    )
}

// fontdue measures upward from the baseline, the atlas measures downward
fn flip(xmin: i32, ymin: i32, width: usize, height: usize, advance: f32) -> InkBox {
    if width == 0 || height == 0 {
        return InkBox {
            advance,
            ..Default::default()
        };
    }
    InkBox {
        left: xmin,
        top: -(ymin + height as i32),
        right: xmin + width as i32,
        bottom: -ymin,
        advance,
    }
}

impl GlyphSource for FontdueSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_codepoints(&self) -> BTreeSet<char> {
        self.font.chars().keys().copied().collect()
    }

    fn measure_glyph(&self, ch: char, px: f32, stroke_width: u32) -> AtlasResult<InkBox> {
        ink_box(&self.font.metrics(ch, px)).grow(stroke_width)
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        ch: char,
        px: f32,
        origin: (i32, i32),
        style: &DrawStyle,
    ) -> AtlasResult<()> {
        let (metrics, bitmap) = self.font.rasterize(ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            return Ok(());
        }
        let ink = ink_box(&metrics);
        let fill = Coverage::new(metrics.width, metrics.height, bitmap);
        canvas.draw_glyph_coverage(fill, origin.0 + ink.left, origin.1 + ink.top, style);
        Ok(())
    }
}
