//! The `.gly` glyph directory that accompanies every atlas image.
//!
//! All integers are little-endian.
//!
//! | field          | type      |
//! |----------------|-----------|
//! | tag            | `b"GLY\0"`|
//! | format version | `u16`     |
//! | line height    | `u16`     |
//! | min top        | `i16`     |
//! | glyph count    | `u32`     |
//!
//! followed by `glyph count` records, in atlas placement order:
//!
//! | field     | type  |
//! |-----------|-------|
//! | codepoint | `u32` |
//! | x         | `u16` |
//! | y         | `u16` |
//! | width     | `u16` |
//! | advance   | `i16` |
//! | ink left  | `i16` |

use std::io::Write;

use crate::{
    atlas::AtlasLayout,
    error::{fit, AtlasError, AtlasResult},
};

pub const TAG: [u8; 4] = *b"GLY\0";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_LEN: usize = 14;
pub const RECORD_LEN: usize = 14;
pub const EXTENSION: &str = "gly";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRecord {
    pub codepoint: u32,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub advance: i16,
    pub left: i16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphDirectory {
    pub version: u16,
    pub line_height: u16,
    pub min_top: i16,
    pub records: Vec<GlyphRecord>,
}

impl GlyphDirectory {
    /// Narrows a layout into directory fields, failing on the first value that doesn't fit.
    pub fn from_layout(layout: &AtlasLayout) -> AtlasResult<Self> {
        let records = layout
            .placements
            .iter()
            .map(|placement| {
                Ok(GlyphRecord {
                    codepoint: placement.ch as u32,
                    x: fit("atlas x", placement.x)?,
                    y: fit("atlas y", placement.y)?,
                    width: fit("glyph width", placement.width)?,
                    advance: fit("advance width", placement.advance)?,
                    left: fit("ink left", placement.left)?,
                })
            })
            .collect::<AtlasResult<Vec<_>>>()?;

        Ok(Self {
            version: FORMAT_VERSION,
            line_height: fit("line height", layout.line_height)?,
            min_top: fit("min top", layout.min_top)?,
            records,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> AtlasResult<()> {
        let count: u32 = fit("glyph count", self.records.len() as i64)?;
        writer.write_all(&TAG)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.line_height.to_le_bytes())?;
        writer.write_all(&self.min_top.to_le_bytes())?;
        writer.write_all(&count.to_le_bytes())?;
        for record in self.records.iter() {
            writer.write_all(&record.codepoint.to_le_bytes())?;
            writer.write_all(&record.x.to_le_bytes())?;
            writer.write_all(&record.y.to_le_bytes())?;
            writer.write_all(&record.width.to_le_bytes())?;
            writer.write_all(&record.advance.to_le_bytes())?;
            writer.write_all(&record.left.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn encode(&self) -> AtlasResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + RECORD_LEN * self.records.len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn decode(bytes: &[u8]) -> AtlasResult<Self> {
        let mut reader = Reader { bytes, pos: 0 };
        if reader.take::<4>()? != TAG {
            return Err(AtlasError::Malformed("missing GLY tag".into()));
        }
        let version = u16::from_le_bytes(reader.take()?);
        if version != FORMAT_VERSION {
            return Err(AtlasError::Malformed(format!(
                "unsupported format version {version}"
            )));
        }
        let line_height = u16::from_le_bytes(reader.take()?);
        let min_top = i16::from_le_bytes(reader.take()?);
        let count = u32::from_le_bytes(reader.take()?) as usize;

        let expected = count
            .checked_mul(RECORD_LEN)
            .and_then(|len| len.checked_add(HEADER_LEN));
        if expected != Some(bytes.len()) {
            return Err(AtlasError::Malformed(format!(
                "{count} glyphs need {} bytes, found {}",
                expected.map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string()),
                bytes.len()
            )));
        }

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(GlyphRecord {
                codepoint: u32::from_le_bytes(reader.take()?),
                x: u16::from_le_bytes(reader.take()?),
                y: u16::from_le_bytes(reader.take()?),
                width: u16::from_le_bytes(reader.take()?),
                advance: i16::from_le_bytes(reader.take()?),
                left: i16::from_le_bytes(reader.take()?),
            });
        }

        Ok(Self {
            version,
            line_height,
            min_top,
            records,
        })
    }

    pub fn get(&self, ch: char) -> Option<&GlyphRecord> {
        self.records
            .iter()
            .find(|record| record.codepoint == ch as u32)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> AtlasResult<[u8; N]> {
        let end = self.pos + N;
        let chunk = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| AtlasError::Malformed(format!("truncated at byte {}", self.pos)))?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }
}
