use egui::{Color32, Rect, pos2};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();
        let Some(canvas_rect) = app.ensure_canvas(available) else {
            return;
        };

        // Claim the area so drags on the canvas don't move anything else
        let response = ui.allocate_rect(canvas_rect, egui::Sense::drag());

        app.handle_input(ctx, &response);

        if let Some(texture) = app.canvas_texture(ctx) {
            ui.painter().image(
                texture.id(),
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    });
}
