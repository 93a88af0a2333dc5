use egui::{Color32, Rect, TextureHandle, TextureOptions, vec2};

use crate::controller::{DrawingController, InteractionState};
use crate::error::PaintResult;
use crate::export::ExportFormat;
use crate::input::{InputEvent, InputHandler};
use crate::palette::Palette;
use crate::panels::{central_panel, tools_panel};
use crate::raster::RasterCanvas;
use crate::settings::PaintSettings;
use crate::tool::Tool;

pub struct PaintApp {
    settings: PaintSettings,
    controller: DrawingController<RasterCanvas>,
    palette: Palette,
    input: InputHandler,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::from_settings(PaintSettings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintSettings>(storage, eframe::APP_KEY))
            .filter(|settings| match settings.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Ignoring stored settings: {}", err);
                    false
                }
            })
            .unwrap_or_default();

        Self::from_settings(settings)
    }

    pub fn from_settings(settings: PaintSettings) -> Self {
        let palette = settings.build_palette().unwrap_or_else(|err| {
            log::warn!("Falling back to the default palette: {}", err);
            Palette::default()
        });
        let interaction = InteractionState::from_settings(&settings, palette.selected_color());

        Self {
            settings,
            controller: DrawingController::new(interaction),
            palette,
            input: InputHandler::new(Rect::NOTHING),
            texture: None,
            uploaded_revision: None,
            status: None,
        }
    }

    pub fn controller(&self) -> &DrawingController<RasterCanvas> {
        &self.controller
    }

    pub fn settings(&self) -> &PaintSettings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn selected_tool(&self) -> Tool {
        self.controller.interaction().selected_tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.controller.select_tool(tool);
    }

    pub fn fill_shapes(&self) -> bool {
        self.controller.interaction().fill_shapes
    }

    pub fn set_fill_shapes(&mut self, fill: bool) {
        self.controller.set_fill_shapes(fill);
    }

    pub fn brush_width(&self) -> u32 {
        self.controller.interaction().brush_width
    }

    pub fn set_brush_width(&mut self, width: u32) {
        if let Err(err) = self.controller.set_brush_width(width) {
            log::warn!("{}", err);
        }
    }

    pub fn select_swatch(&mut self, index: usize) {
        match self.palette.select(index) {
            Ok(color) => self.controller.select_color(color),
            Err(err) => log::warn!("{}", err),
        }
    }

    pub fn pick_custom_color(&mut self, color: Color32) {
        let color = self.palette.pick_custom(color);
        self.controller.select_color(color);
    }

    pub fn export_format(&self) -> ExportFormat {
        self.settings.export_format
    }

    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.settings.export_format = format;
    }

    pub fn clear_canvas(&mut self) {
        if let Err(err) = self.controller.clear() {
            log::warn!("Clear ignored: {}", err);
        }
    }

    pub fn save_image(&mut self) {
        self.status = Some(match self.export() {
            Ok(message) => message,
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {err}")
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export(&self) -> PaintResult<String> {
        let image = self.controller.export_image(self.settings.export_format)?;
        let path = image.save_in(std::path::Path::new(&self.settings.export_dir))?;
        Ok(format!("Saved {}", path.display()))
    }

    #[cfg(target_arch = "wasm32")]
    fn export(&self) -> PaintResult<String> {
        let image = self.controller.export_image(self.settings.export_format)?;
        match image.trigger_download() {
            Ok(()) => Ok(format!("Downloaded {}", image.file_name)),
            Err(err) => {
                log::error!("Download failed: {}", err);
                Ok(format!("Download failed: {err}"))
            }
        }
    }

    /// Size the canvas to `available` the first time there is room for it.
    /// Returns the on-screen rect of the canvas.
    pub fn ensure_canvas(&mut self, available: Rect) -> Option<Rect> {
        if !self.controller.is_initialized() {
            let width = available.width().floor().max(0.0) as u32;
            let height = available.height().floor().max(0.0) as u32;
            if width == 0 || height == 0 {
                return None;
            }
            let initialized = RasterCanvas::new(width, height)
                .and_then(|canvas| self.controller.initialize(canvas));
            if let Err(err) = initialized {
                log::error!("Could not create canvas: {}", err);
                return None;
            }
        }

        let (width, height) = self.controller.size()?;
        let rect = Rect::from_min_size(available.min, vec2(width as f32, height as f32));
        self.input.set_canvas_rect(rect);
        Some(rect)
    }

    /// Route this frame's pointer input to the controller.
    ///
    /// `canvas` is the canvas widget's response; presses only start a stroke
    /// while it is hovered, so popups drawn over the canvas keep their clicks.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas: &egui::Response) {
        let events = self.input.process_input(ctx);
        self.route_events(events, canvas.hovered());
    }

    fn route_events(&mut self, events: Vec<InputEvent>, canvas_hovered: bool) {
        for event in events {
            let result = match event {
                InputEvent::PointerDown { location } if location.is_in_canvas && canvas_hovered => {
                    self.controller.on_pointer_down(location.position)
                }
                // The release was lost (e.g. outside the window)
                InputEvent::PointerMove {
                    primary_down: false,
                    ..
                } if self.controller.is_drawing() => {
                    log::debug!("Button up without a release, ending stroke");
                    self.controller.on_pointer_up();
                    Ok(())
                }
                InputEvent::PointerMove {
                    location,
                    primary_down: true,
                } if location.is_in_canvas => self.controller.on_pointer_move(location.position),
                // Releasing anywhere ends the stroke
                InputEvent::PointerUp { .. } => {
                    self.controller.on_pointer_up();
                    Ok(())
                }
                _ => Ok(()),
            };
            if let Err(err) = result {
                log::warn!("Pointer event {:?} rejected: {}", event, err);
            }
        }
    }

    /// Upload the pixels if they changed since the last frame
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let revision = self.controller.revision();
        if self.uploaded_revision != Some(revision) || self.texture.is_none() {
            let image = self.controller.canvas()?.to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    let texture =
                        ctx.load_texture("drawing_surface", image, TextureOptions::NEAREST);
                    self.texture = Some(texture);
                }
            }
            self.uploaded_revision = Some(revision);
        }
        self.texture.as_ref()
    }

    fn sync_settings(&mut self) {
        let interaction = *self.controller.interaction();
        self.settings.tool = interaction.selected_tool;
        self.settings.brush_width = interaction.brush_width;
        self.settings.fill_shapes = interaction.fill_shapes;
        self.settings.custom_color = self.palette.custom_color().into();
        self.settings.selected_swatch = self.palette.selected_index();
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sync_settings();
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
