use eframe::egui;

/// Round color option; the selected one gets a ring around it
pub struct ColorSwatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorSwatch {
    const SIZE: f32 = 22.0;

    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(Self::SIZE, Self::SIZE), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = Self::SIZE / 2.0 - 3.0;
            let painter = ui.painter();

            painter.circle_filled(center, radius, self.color);
            // Keep white visible on a light panel
            let outline = egui::Stroke::new(1.0, egui::Color32::from_gray(190));
            painter.circle_stroke(center, radius, outline);

            if self.selected {
                painter.circle_stroke(
                    center,
                    radius + 2.5,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            } else if response.hovered() {
                let hover = egui::Stroke::new(1.0, egui::Color32::GRAY);
                painter.circle_stroke(center, radius + 2.0, hover);
            }
        }

        response
    }
}
