use crate::{
    atlas::{AtlasLayout, GlyphPlacement},
    error::AtlasResult,
    params::{AtlasSettings, Stroke},
    text::{DrawStyle, GlyphSource},
    texture::Canvas,
};

/// Draws every placed glyph onto one canvas.
pub struct AtlasRenderer<'a, S> {
    sources: &'a [S],
    settings: &'a AtlasSettings,
}

impl<'a, S: GlyphSource> AtlasRenderer<'a, S> {
    pub fn new(sources: &'a [S], settings: &'a AtlasSettings) -> Self {
        Self { sources, settings }
    }

    pub fn render(&self, layout: &AtlasLayout) -> AtlasResult<Canvas> {
        let mut canvas = Canvas::new(layout.width, layout.height);
        for placement in layout.placements.iter() {
            self.draw_placement(&mut canvas, layout, placement)?;
        }
        Ok(canvas)
    }

    fn stroke(&self, color: image::Rgba<u8>) -> Option<Stroke> {
        (self.settings.stroke.width > 0).then_some(Stroke {
            width: self.settings.stroke.width,
            color,
        })
    }

    /// Shadow, then fill with stroke, then the fill again without stroke to keep edges crisp.
    pub fn draw_placement(
        &self,
        canvas: &mut Canvas,
        layout: &AtlasLayout,
        placement: &GlyphPlacement,
    ) -> AtlasResult<()> {
        let source = &self.sources[placement.source];
        let px = self.settings.pixel_size;
        let smoothing = self.settings.smoothing;
        let origin = (
            placement.x as i32 - placement.left,
            placement.y as i32 - layout.min_top,
        );

        let shadow = self.settings.shadow;
        if shadow.offset > 0 {
            let offset = shadow.offset as i32;
            let style = DrawStyle {
                fill: shadow.color,
                stroke: self.stroke(shadow.color),
                smoothing,
            };
            source.draw_glyph(
                canvas,
                placement.ch,
                px,
                (origin.0 + offset, origin.1 + offset),
                &style,
            )?;
        }

        let style = DrawStyle {
            fill: self.settings.fill,
            stroke: self.stroke(self.settings.stroke.color),
            smoothing,
        };
        source.draw_glyph(canvas, placement.ch, px, origin, &style)?;

        let style = DrawStyle {
            stroke: None,
            ..style
        };
        source.draw_glyph(canvas, placement.ch, px, origin, &style)
    }
}
