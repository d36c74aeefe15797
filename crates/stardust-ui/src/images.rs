//! Lazy texture cache for project images.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

pub struct ImageCache {
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Loads the image once; a missing or unreadable file is remembered as
    /// absent so the card falls back to a placeholder without retrying.
    pub fn get(&mut self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        if let Some(entry) = self.textures.get(path) {
            return entry.clone();
        }
        let loaded = load_texture(ctx, path);
        if loaded.is_none() {
            warn!("missing project image: {path}");
        }
        self.textures.insert(path.to_owned(), loaded.clone());
        loaded
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

fn load_texture(ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
    let image = image::open(Path::new(path)).ok()?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Some(ctx.load_texture(path, pixels, egui::TextureOptions::LINEAR))
}
