//! Error types for atlas generation.

use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unable to find a font for the following characters: {}", describe_chars(.0))]
    UnresolvedCharacters(Vec<char>),

    #[error("font sources provide no printable glyphs")]
    NoGlyphs,

    #[error("{field} value {value} is out of range")]
    FieldOverflow { field: &'static str, value: i64 },

    #[error("font error: {0}")]
    Font(String),

    #[error("malformed glyph directory: {0}")]
    Malformed(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Asset(#[from] anyhow::Error),
}

pub type AtlasResult<T> = Result<T, AtlasError>;

fn describe_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("U+{:04X} {:?}", *c as u32, c))
        .join(", ")
}

/// Narrows `value` into the integer type of a directory field or atlas dimension.
pub(crate) fn fit<T, V>(field: &'static str, value: V) -> AtlasResult<T>
where
    V: Copy + Into<i64>,
    T: TryFrom<V>,
{
    T::try_from(value).map_err(|_| AtlasError::FieldOverflow {
        field,
        value: value.into(),
    })
}
