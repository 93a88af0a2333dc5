use egui::Color32;

use crate::error::{PaintError, PaintResult};

pub const DEFAULT_PRESETS: [Color32; 4] = [
    Color32::WHITE,
    Color32::BLACK,
    Color32::from_rgb(0xE0, 0x20, 0x20),
    Color32::from_rgb(0x6D, 0xD4, 0x00),
];

pub const DEFAULT_CUSTOM: Color32 = Color32::from_rgb(0x4A, 0x98, 0xF7);

/// Index of black in `DEFAULT_PRESETS`
pub const DEFAULT_SELECTED: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Color32,
    /// The slot driven by the color picker
    pub custom: bool,
}

/// Color swatches with exactly one selected at any time.
///
/// The last swatch always belongs to the custom color picker. Changing the
/// picker recolors that slot and selects it, as if it had been clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
    selected: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            swatches: Self::build(DEFAULT_PRESETS, DEFAULT_CUSTOM),
            selected: DEFAULT_SELECTED,
        }
    }
}

impl Palette {
    pub fn new(
        presets: impl IntoIterator<Item = Color32>,
        custom: Color32,
        selected: usize,
    ) -> PaintResult<Self> {
        let swatches = Self::build(presets, custom);
        if selected >= swatches.len() {
            return Err(PaintError::UnknownSwatch {
                index: selected,
                len: swatches.len(),
            });
        }
        Ok(Self { swatches, selected })
    }

    fn build(presets: impl IntoIterator<Item = Color32>, custom: Color32) -> Vec<Swatch> {
        presets
            .into_iter()
            .map(|color| Swatch { color, custom: false })
            .chain(std::iter::once(Swatch { color: custom, custom: true }))
            .collect()
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == index
    }

    pub fn selected_color(&self) -> Color32 {
        self.swatches[self.selected].color
    }

    pub fn custom_index(&self) -> usize {
        self.swatches.len() - 1
    }

    pub fn custom_color(&self) -> Color32 {
        self.swatches[self.custom_index()].color
    }

    /// Select a swatch, deselecting the previous one
    pub fn select(&mut self, index: usize) -> PaintResult<Color32> {
        if index >= self.swatches.len() {
            return Err(PaintError::UnknownSwatch {
                index,
                len: self.swatches.len(),
            });
        }
        self.selected = index;
        Ok(self.selected_color())
    }

    /// Adopt a color from the picker into the custom slot and select it
    pub fn pick_custom(&mut self, color: Color32) -> Color32 {
        let index = self.custom_index();
        self.swatches[index].color = color;
        self.selected = index;
        color
    }
}
