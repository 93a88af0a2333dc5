use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::error::PaintResult;

/// Encodings the canvas can be exported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    #[default]
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Jpeg, ExportFormat::Png];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        }
    }

    pub fn supports_alpha(self) -> bool {
        matches!(self, ExportFormat::Png)
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }

    pub fn data_url(self, bytes: &[u8]) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{};base64,{}", self.mime_type(), encoded)
    }
}

/// An encoded image ready to hand to the host's download/save primitive
#[derive(Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ExportedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedImage")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ExportedImage {
    /// `<timestamp_ms>.<ext>`
    pub fn file_name_for(timestamp_ms: u64, format: ExportFormat) -> String {
        format!("{}.{}", timestamp_ms, format.extension())
    }

    pub fn data_url(&self) -> String {
        self.format.data_url(&self.bytes)
    }

    /// Write the image into `dir`, returning the full path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_in(&self, dir: &std::path::Path) -> PaintResult<std::path::PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        log::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }

    /// Start a browser download through a temporary anchor element
    #[cfg(target_arch = "wasm32")]
    pub fn trigger_download(&self) -> Result<(), String> {
        use eframe::wasm_bindgen::JsCast as _;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| "No document available".to_owned())?;
        let link = document
            .create_element("a")
            .map_err(|err| format!("{err:?}"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Created element is not an anchor".to_owned())?;
        link.set_download(&self.file_name);
        link.set_href(&self.data_url());
        link.click();
        log::info!("Download started for {}", self.file_name);
        Ok(())
    }
}
