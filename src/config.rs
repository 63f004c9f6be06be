//! TOML job description for the `glyphpack` binary.
//!
//! ```toml
//! fonts = ["fonts/NotoSans-Regular.ttf", "fonts/simsun.ttf"]
//! output = "build/fonts/default.png"
//! size = 18
//! charset_file = "charset.txt"
//!
//! [stroke]
//! width = 1
//! color = "#000000"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use image::Rgba;
use serde::Deserialize;

use crate::{
    error::{AtlasError, AtlasResult},
    params::AtlasParams,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font files, highest priority first.
    pub fonts: Vec<PathBuf>,
    pub output: PathBuf,
    pub size: f32,
    pub charset: Option<String>,
    pub charset_file: Option<PathBuf>,
    pub dense: bool,
    pub smoothing: bool,
    pub fill: String,
    pub stroke: StrokeConfig,
    pub shadow: ShadowConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub width: i32,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub offset: i32,
    pub color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            output: PathBuf::from("font.png"),
            size: 16.0,
            charset: None,
            charset_file: None,
            dense: false,
            smoothing: true,
            fill: "#ffffff".into(),
            stroke: StrokeConfig::default(),
            shadow: ShadowConfig::default(),
        }
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: 0,
            color: "#000000".into(),
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            color: "#000000".into(),
        }
    }
}

impl Config {
    /// Reads a config file and resolves its paths.
    pub fn load<P: AsRef<Path>>(path: P) -> AtlasResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Config = contents.parse()?;
        Ok(config.relative_to(path.parent().unwrap_or_else(|| Path::new(""))))
    }

    pub fn relative_to(mut self, base: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.to_path_buf()
            }
        };
        self.fonts = self.fonts.iter().map(|font| resolve(font)).collect();
        self.output = resolve(&self.output);
        self.charset_file = self.charset_file.as_deref().map(resolve);
        self
    }

    /// `charset` and the contents of `charset_file` are combined.
    pub fn to_params(&self) -> AtlasResult<AtlasParams> {
        let charset = match (&self.charset, &self.charset_file) {
            (None, None) => None,
            (inline, file) => {
                let mut chars = inline.clone().unwrap_or_default();
                if let Some(file) = file {
                    chars.push_str(&fs::read_to_string(file)?);
                }
                Some(chars)
            }
        };

        Ok(AtlasParams {
            pixel_size: self.size,
            charset,
            dense: self.dense,
            smoothing: self.smoothing,
            fill: parse_color(&self.fill)?,
            stroke_width: self.stroke.width,
            stroke_color: parse_color(&self.stroke.color)?,
            shadow_offset: self.shadow.offset,
            shadow_color: parse_color(&self.shadow.color)?,
        })
    }
}

impl FromStr for Config {
    type Err = AtlasError;

    /// Parse config from TOML string. Paths are left as written.
    fn from_str(s: &str) -> AtlasResult<Self> {
        toml::from_str(s).map_err(|err| AtlasError::InvalidParameter(format!("config: {err}")))
    }
}

/// `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(s: &str) -> AtlasResult<Rgba<u8>> {
    let invalid = || AtlasError::InvalidParameter(format!("invalid color {s:?}"));
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(invalid());
    }
    let mut rgba = [u8::MAX; 4];
    for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(Rgba(rgba))
}
