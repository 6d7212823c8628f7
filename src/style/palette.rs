use crate::constants::{DEPTH_BOUNDS, DEPTH_COLORS};
use crate::{MapError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque sRGB color, written and parsed as CSS hex (`#rrggbb`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const ORANGE: Color = Color::rgb(0xff, 0xa5, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lower-case `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "orange" => Some(Self::ORANGE),
            "red" => Some(Self::rgb(0xff, 0x00, 0x00)),
            "green" => Some(Self::rgb(0x00, 0x80, 0x00)),
            "blue" => Some(Self::rgb(0x00, 0x00, 0xff)),
            "yellow" => Some(Self::rgb(0xff, 0xff, 0x00)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = MapError;

    /// Accepts `#rgb`, `#rrggbb` and a handful of CSS color names
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MapError::ParseError(format!("invalid color: {:?}", s));
        let trimmed = s.trim();

        let Some(hex) = trimmed.strip_prefix('#') else {
            return Self::named(trimmed).ok_or_else(invalid);
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the depth threshold table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthBand {
    /// Lower bound of the band
    pub lower: f64,
    pub color: Color,
}

impl DepthBand {
    pub fn new(lower: f64, color: Color) -> Self {
        Self { lower, color }
    }
}

/// Ordered depth bands shared by the classifier and the legend.
///
/// Bounds are finite and strictly increasing. The top band is closed at its
/// lower bound (`90+` holds 90); every other band is closed at its upper edge
/// (`0–10` holds 10), and anything below the first bound lands in the first
/// band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DepthBand>", into = "Vec<DepthBand>")]
pub struct DepthThresholdTable {
    bands: Vec<DepthBand>,
}

impl DepthThresholdTable {
    pub fn new(bands: Vec<DepthBand>) -> Result<Self> {
        if bands.is_empty() {
            return Err(MapError::Config(
                "depth threshold table needs at least one band".to_string(),
            ));
        }
        if let Some(band) = bands.iter().find(|b| !b.lower.is_finite()) {
            return Err(MapError::Config(format!(
                "depth bound {} is not finite",
                band.lower
            )));
        }
        if let Some(pair) = bands.windows(2).find(|w| w[0].lower >= w[1].lower) {
            return Err(MapError::Config(format!(
                "depth bounds must strictly increase, found {} then {}",
                pair[0].lower, pair[1].lower
            )));
        }
        Ok(Self { bands })
    }

    /// Pairs bounds with colors; both slices must have the same length
    pub fn from_parts(bounds: &[f64], colors: &[Color]) -> Result<Self> {
        if bounds.len() != colors.len() {
            return Err(MapError::Config(format!(
                "{} depth bounds but {} colors",
                bounds.len(),
                colors.len()
            )));
        }
        Self::new(
            bounds
                .iter()
                .zip(colors)
                .map(|(&lower, &color)| DepthBand::new(lower, color))
                .collect(),
        )
    }

    /// Bands in ascending order of depth
    pub fn bands(&self) -> &[DepthBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Lower bound of the next band up, `None` for the top band
    pub fn upper_bound(&self, index: usize) -> Option<f64> {
        self.bands.get(index + 1).map(|b| b.lower)
    }

    /// Index of the band holding `depth`, tested from the deepest band down
    pub fn band_index(&self, depth: f64) -> usize {
        let top = self.bands.len() - 1;
        if depth >= self.bands[top].lower {
            return top;
        }
        (1..top)
            .rev()
            .find(|&i| depth > self.bands[i].lower)
            .unwrap_or(0)
    }
}

impl Default for DepthThresholdTable {
    fn default() -> Self {
        Self {
            bands: DEPTH_BOUNDS
                .iter()
                .zip(DEPTH_COLORS)
                .map(|(&lower, color)| DepthBand::new(lower, color))
                .collect(),
        }
    }
}

impl TryFrom<Vec<DepthBand>> for DepthThresholdTable {
    type Error = MapError;

    fn try_from(bands: Vec<DepthBand>) -> Result<Self> {
        Self::new(bands)
    }
}

impl From<DepthThresholdTable> for Vec<DepthBand> {
    fn from(table: DepthThresholdTable) -> Self {
        table.bands
    }
}
