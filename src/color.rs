use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PaintError, PaintResult};

/// Background every canvas is painted with, and what the eraser leaves behind
pub const BACKGROUND: Color32 = Color32::WHITE;

const NAMED_COLORS: &[(&str, Color32)] = &[
    ("black", Color32::BLACK),
    ("white", Color32::WHITE),
    ("red", Color32::from_rgb(255, 0, 0)),
    ("green", Color32::from_rgb(0, 128, 0)),
    ("lime", Color32::from_rgb(0, 255, 0)),
    ("blue", Color32::from_rgb(0, 0, 255)),
    ("yellow", Color32::from_rgb(255, 255, 0)),
    ("orange", Color32::from_rgb(255, 165, 0)),
    ("purple", Color32::from_rgb(128, 0, 128)),
    ("gray", Color32::from_rgb(128, 128, 128)),
    ("grey", Color32::from_rgb(128, 128, 128)),
];

/// Parse a CSS color: `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// or one of a handful of named colors.
pub fn parse_color(input: &str) -> PaintResult<Color32> {
    let text = input.trim();
    let invalid = || PaintError::InvalidColor(input.to_owned());

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let lower = text.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args).ok_or_else(invalid);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
        .ok_or_else(invalid)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(Color32::from_rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color32> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<u8>().ok();
    match parts.as_slice() {
        [r, g, b] => Some(Color32::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?;
            Some(Color32::from_rgba_unmultiplied(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

/// `#rrggbb` for an opaque color
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// A color that (de)serializes as a CSS string, used by the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Color32);

impl From<Color32> for HexColor {
    fn from(color: Color32) -> Self {
        Self(color)
    }
}

impl From<HexColor> for Color32 {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(self.0))
    }
}

impl FromStr for HexColor {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).map(Self)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(self.0))
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
