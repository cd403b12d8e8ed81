use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;

/// Handle into a [`TextureStore`]. Placed objects reference textures by id;
/// the store owns the pixel data and wrap/scale metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Repeat,
}

impl WrapMode {
    pub fn from_repeat(repeat: bool) -> Self {
        if repeat {
            WrapMode::Repeat
        } else {
            WrapMode::Clamp
        }
    }

    pub fn is_repeat(self) -> bool {
        matches!(self, WrapMode::Repeat)
    }
}

/// Backing-image state. `Pending` renders as a 1x1 opaque white placeholder;
/// dimensions and aspect ratio are only meaningful once `Ready`.
pub enum ImageState {
    Pending,
    Ready(RgbaImage),
    Failed,
}

pub struct TextureEntry {
    pub wrap: WrapMode,
    pub scale_s: f32,
    pub scale_t: f32,
    pub state: ImageState,
    /// Bumped whenever `state` changes, so the renderer knows to re-upload.
    pub version: u32,
}

struct LoadResult {
    id: TextureId,
    result: Result<RgbaImage, String>,
}

/// Owns all texture entries and the loader back-channel. File and remote
/// loads run on short-lived worker threads and post their decoded pixels
/// back over `mpsc`; [`TextureStore::poll`] applies completions on the
/// render thread at the start of each frame. Loads are fire-and-forget:
/// no cancellation, no timeout.
pub struct TextureStore {
    entries: Vec<TextureEntry>,
    completed_tx: Sender<LoadResult>,
    completed_rx: Receiver<LoadResult>,
}

impl TextureStore {
    pub fn new() -> Self {
        let (completed_tx, completed_rx) = channel();
        Self {
            entries: Vec::new(),
            completed_tx,
            completed_rx,
        }
    }

    fn push(&mut self, wrap: WrapMode, scale_s: f32, scale_t: f32, state: ImageState) -> TextureId {
        let id = TextureId(self.entries.len());
        self.entries.push(TextureEntry {
            wrap,
            scale_s,
            scale_t,
            state,
            version: 0,
        });
        id
    }

    /// A texture that stays an opaque white placeholder forever. Used for
    /// the bare room walls.
    pub fn white(&mut self) -> TextureId {
        self.push(
            WrapMode::Clamp,
            1.0,
            1.0,
            ImageState::Ready(RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]))),
        )
    }

    /// An immediately-ready texture from decoded pixels.
    pub fn from_image(
        &mut self,
        image: RgbaImage,
        wrap: WrapMode,
        scale_s: f32,
        scale_t: f32,
    ) -> TextureId {
        self.push(wrap, scale_s, scale_t, ImageState::Ready(image))
    }

    /// Start loading an image file. Returns immediately with a pending
    /// entry; the decoded pixels arrive through [`TextureStore::poll`].
    pub fn load_file(
        &mut self,
        path: PathBuf,
        wrap: WrapMode,
        scale_s: f32,
        scale_t: f32,
    ) -> TextureId {
        let id = self.push(wrap, scale_s, scale_t, ImageState::Pending);
        let tx = self.completed_tx.clone();
        std::thread::spawn(move || {
            let result = std::fs::read(&path)
                .map_err(|e| format!("read {}: {e}", path.display()))
                .and_then(|bytes| decode_bytes(&bytes));
            let _ = tx.send(LoadResult { id, result });
        });
        id
    }

    /// Start loading from a URL. `data:` URLs carry their pixels inline and
    /// resolve synchronously; `http(s)` URLs are fetched on a worker thread.
    pub fn load_url(&mut self, url: &str, wrap: WrapMode, scale_s: f32, scale_t: f32) -> TextureId {
        if url.starts_with("data:") {
            return match decode_data_url(url) {
                Ok(image) => self.push(wrap, scale_s, scale_t, ImageState::Ready(image)),
                Err(e) => {
                    log::warn!("failed to decode inline image: {e}");
                    self.push(wrap, scale_s, scale_t, ImageState::Failed)
                }
            };
        }

        let id = self.push(wrap, scale_s, scale_t, ImageState::Pending);
        let tx = self.completed_tx.clone();
        let url = url.to_string();
        std::thread::spawn(move || {
            let result = fetch_url(&url);
            let _ = tx.send(LoadResult { id, result });
        });
        id
    }

    /// Apply finished loads. Returns the ids whose state changed this call.
    pub fn poll(&mut self) -> Vec<TextureId> {
        let mut changed = Vec::new();
        while let Ok(LoadResult { id, result }) = self.completed_rx.try_recv() {
            let entry = &mut self.entries[id.0];
            entry.state = match result {
                Ok(image) => ImageState::Ready(image),
                Err(e) => {
                    log::warn!("texture {} failed to load: {e}", id.0);
                    ImageState::Failed
                }
            };
            entry.version += 1;
            changed.push(id);
        }
        changed
    }

    pub fn entry(&self, id: TextureId) -> &TextureEntry {
        &self.entries[id.0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Width/height of the backing image, once loaded.
    pub fn dimensions(&self, id: TextureId) -> Option<(u32, u32)> {
        match &self.entries[id.0].state {
            ImageState::Ready(image) => Some(image.dimensions()),
            _ => None,
        }
    }

    pub fn aspect_ratio(&self, id: TextureId) -> Option<f32> {
        self.dimensions(id)
            .map(|(w, h)| w as f32 / h.max(1) as f32)
    }

    pub fn is_ready(&self, id: TextureId) -> bool {
        matches!(self.entries[id.0].state, ImageState::Ready(_))
    }

    pub fn is_pending(&self, id: TextureId) -> bool {
        matches!(self.entries[id.0].state, ImageState::Pending)
    }
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage, String> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| format!("decode image: {e}"))
}

fn fetch_url(url: &str) -> Result<RgbaImage, String> {
    let response = reqwest::blocking::get(url).map_err(|e| format!("fetch {url}: {e}"))?;
    let bytes = response.bytes().map_err(|e| format!("fetch {url}: {e}"))?;
    decode_bytes(&bytes)
}

/// Decode a `data:<mime>;base64,<payload>` URL into pixels.
pub fn decode_data_url(url: &str) -> Result<RgbaImage, String> {
    let payload = url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| "not a base64 data URL".to_string())?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| format!("base64 decode: {e}"))?;
    decode_bytes(&bytes)
}

/// Encode pixels as a PNG `data:` URL for scene export.
pub fn encode_png_data_url(image: &RgbaImage) -> Result<String, String> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| format!("encode png: {e}"))?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(&bytes)))
}
