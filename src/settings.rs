use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::{PaintError, PaintResult};
use crate::export::ExportFormat;
use crate::palette::{self, Palette};
use crate::tool::Tool;

pub const DEFAULT_BRUSH_WIDTH: u32 = 5;
pub const MIN_BRUSH_WIDTH: u32 = 1;
pub const MAX_BRUSH_WIDTH: u32 = 30;

/// User-facing configuration, persisted by eframe between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintSettings {
    pub tool: Tool,
    pub brush_width: u32,
    /// Inclusive bounds of the width slider
    pub brush_width_range: (u32, u32),
    pub fill_shapes: bool,
    pub palette: Vec<HexColor>,
    pub custom_color: HexColor,
    /// Index into `palette`, the custom slot being `palette.len()`
    pub selected_swatch: usize,
    pub export_format: ExportFormat,
    /// Where native builds write exported images
    pub export_dir: String,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            brush_width_range: (MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH),
            fill_shapes: false,
            palette: palette::DEFAULT_PRESETS.into_iter().map(HexColor).collect(),
            custom_color: HexColor(palette::DEFAULT_CUSTOM),
            selected_swatch: palette::DEFAULT_SELECTED,
            export_format: ExportFormat::default(),
            export_dir: ".".to_owned(),
        }
    }
}

impl PaintSettings {
    pub fn from_json(text: &str) -> PaintResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> PaintResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> PaintResult<()> {
        let (min, max) = self.brush_width_range;
        if min == 0 || min > max {
            return Err(PaintError::InvalidSettings(format!(
                "brush width range {min}..={max} is empty or starts at zero"
            )));
        }
        if !(min..=max).contains(&self.brush_width) {
            return Err(PaintError::InvalidSettings(format!(
                "brush width {} outside {min}..={max}",
                self.brush_width
            )));
        }
        if self.palette.is_empty() {
            return Err(PaintError::InvalidSettings("palette has no colors".to_owned()));
        }
        if self.selected_swatch > self.palette.len() {
            return Err(PaintError::InvalidSettings(format!(
                "selected swatch {} outside palette of {}",
                self.selected_swatch,
                self.palette.len() + 1
            )));
        }
        Ok(())
    }

    pub fn build_palette(&self) -> PaintResult<Palette> {
        Palette::new(
            self.palette.iter().copied().map(Color32::from),
            self.custom_color.into(),
            self.selected_swatch,
        )
    }

    pub fn brush_width_bounds(&self) -> std::ops::RangeInclusive<u32> {
        self.brush_width_range.0..=self.brush_width_range.1
    }
}
