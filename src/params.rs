use std::collections::BTreeSet;

use image::Rgba;

use crate::{
    assign::is_printable,
    error::{AtlasError, AtlasResult},
};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Everything a caller can ask of one atlas build, before validation.
#[derive(Clone, Debug)]
pub struct AtlasParams {
    pub pixel_size: f32,
    /// Characters to include. `None` packs everything the sources support.
    pub charset: Option<String>,
    /// Packs glyphs without the one pixel gap between neighbours.
    pub dense: bool,
    /// Anti-aliasing.
    pub smoothing: bool,
    pub fill: Rgba<u8>,
    pub stroke_width: i32,
    pub stroke_color: Rgba<u8>,
    pub shadow_offset: i32,
    pub shadow_color: Rgba<u8>,
}

impl Default for AtlasParams {
    fn default() -> Self {
        Self {
            pixel_size: 16.0,
            charset: None,
            dense: false,
            smoothing: true,
            fill: WHITE,
            stroke_width: 0,
            stroke_color: BLACK,
            shadow_offset: 0,
            shadow_color: BLACK,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    pub width: u32,
    pub color: Rgba<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shadow {
    pub offset: u32,
    pub color: Rgba<u8>,
}

/// Validated form of [`AtlasParams`].
#[derive(Clone, Debug)]
pub struct AtlasSettings {
    pub pixel_size: f32,
    pub charset: Option<BTreeSet<char>>,
    pub spacing: u32,
    pub smoothing: bool,
    pub fill: Rgba<u8>,
    pub stroke: Stroke,
    pub shadow: Shadow,
}

impl AtlasParams {
    pub fn validate(&self) -> AtlasResult<AtlasSettings> {
        if !(self.pixel_size.is_finite() && self.pixel_size > 0.0) {
            return Err(AtlasError::InvalidParameter(format!(
                "pixel size must be positive, got {}",
                self.pixel_size
            )));
        }
        let stroke_width = u32::try_from(self.stroke_width).map_err(|_| {
            AtlasError::InvalidParameter(format!(
                "stroke width must be non-negative, got {}",
                self.stroke_width
            ))
        })?;
        let shadow_offset = u32::try_from(self.shadow_offset).map_err(|_| {
            AtlasError::InvalidParameter(format!(
                "shadow offset must be non-negative, got {}",
                self.shadow_offset
            ))
        })?;

        let charset = match &self.charset {
            None => None,
            Some(chars) => {
                let set: BTreeSet<char> = chars.chars().filter(|c| is_printable(*c)).collect();
                if set.is_empty() {
                    return Err(AtlasError::InvalidParameter(
                        "character set contains no printable characters".into(),
                    ));
                }
                Some(set)
            }
        };

        Ok(AtlasSettings {
            pixel_size: self.pixel_size,
            charset,
            spacing: if self.dense { 0 } else { 1 },
            smoothing: self.smoothing,
            fill: self.fill,
            stroke: Stroke {
                width: stroke_width,
                color: self.stroke_color,
            },
            shadow: Shadow {
                offset: shadow_offset,
                color: self.shadow_color,
            },
        })
    }
}
