use crate::PaintApp;
use crate::components::{ColorSwatch, ToolButton};
use crate::export::ExportFormat;
use crate::tool::Tool;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            let active_tool = app.selected_tool();

            ui.heading("Shapes");
            ui.horizontal(|ui| {
                for tool in Tool::SHAPES {
                    tool_button(app, ui, tool, active_tool);
                }
            });
            let mut fill = app.fill_shapes();
            if ui.checkbox(&mut fill, "Fill color").changed() {
                app.set_fill_shapes(fill);
            }
            ui.separator();

            ui.heading("Options");
            ui.horizontal(|ui| {
                for tool in Tool::FREEHAND {
                    tool_button(app, ui, tool, active_tool);
                }
            });
            let mut width = app.brush_width();
            let bounds = app.settings().brush_width_bounds();
            if ui.add(egui::Slider::new(&mut width, bounds).text("Size")).changed() {
                app.set_brush_width(width);
            }
            ui.separator();

            ui.heading("Colors");
            ui.horizontal(|ui| {
                let custom_index = app.palette().custom_index();
                for index in 0..custom_index {
                    let swatch = app.palette().swatches()[index];
                    if ColorSwatch::new(swatch.color, app.palette().is_selected(index))
                        .show(ui)
                        .clicked()
                    {
                        app.select_swatch(index);
                    }
                }

                let mut custom = app.palette().custom_color();
                let selected = app.palette().is_selected(custom_index);
                if ColorSwatch::new(custom, selected).show(ui).clicked() {
                    app.select_swatch(custom_index);
                }
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut custom,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.pick_custom_color(custom);
                }
            });
            ui.separator();

            let mut format = app.export_format();
            egui::ComboBox::from_label("Format")
                .selected_text(format.label())
                .show_ui(ui, |ui| {
                    for option in ExportFormat::ALL {
                        ui.selectable_value(&mut format, option, option.label());
                    }
                });
            if format != app.export_format() {
                app.set_export_format(format);
            }

            ui.horizontal(|ui| {
                if ui.button("Clear Canvas").clicked() {
                    app.clear_canvas();
                }
                if ui.button("Save As Image").clicked() {
                    app.save_image();
                }
            });

            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}

fn tool_button(app: &mut PaintApp, ui: &mut egui::Ui, tool: Tool, active_tool: Tool) {
    if ToolButton::new(tool, tool == active_tool).show(ui).clicked() {
        log::info!("Tool selected from UI: {}", tool);
        app.select_tool(tool);
    }
}
