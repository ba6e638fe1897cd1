// Project cover images, decoded once and cached as egui textures.
// Missing or unreadable files fall back to the placeholder path without complaint.

use std::collections::HashMap;

use crate::config::AssetConfig;

/// Pick the path to show: the requested one if the file exists, else the placeholder.
pub fn resolve_image_path<'a>(assets: &'a AssetConfig, site_path: &'a str) -> &'a str {
    if !site_path.is_empty() && assets.resolve(site_path).is_file() {
        site_path
    } else {
        &assets.placeholder
    }
}

pub struct ImageCache {
    assets: AssetConfig,
    /// Keyed by the requested path; resolution and decoding happen once per path.
    /// `None` marks a cover that falls back to the placeholder tile.
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl ImageCache {
    pub fn new(assets: AssetConfig) -> Self {
        Self {
            assets,
            textures: HashMap::new(),
        }
    }

    /// Texture for a cover, or `None` when the placeholder should be drawn.
    pub fn cover(&mut self, ctx: &egui::Context, site_path: &str) -> Option<egui::TextureId> {
        if let Some(cached) = self.textures.get(site_path) {
            return cached.as_ref().map(egui::TextureHandle::id);
        }
        let resolved = resolve_image_path(&self.assets, site_path);
        let texture = load_texture(ctx, &self.assets, resolved);
        let id = texture.as_ref().map(egui::TextureHandle::id);
        self.textures.insert(site_path.to_owned(), texture);
        id
    }
}

fn load_texture(ctx: &egui::Context, assets: &AssetConfig, site_path: &str) -> Option<egui::TextureHandle> {
    let file = assets.resolve(site_path);
    // Sniff the format from content; covers may use extensions like `.jfif`.
    let decoded = match image::ImageReader::open(&file)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
    {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            log::debug!("cover {} unavailable ({e}), using placeholder", file.display());
            return None;
        }
    };
    let size = [decoded.width() as usize, decoded.height() as usize];
    let color = egui::ColorImage::from_rgba_unmultiplied(size, decoded.as_raw());
    Some(ctx.load_texture(site_path, color, egui::TextureOptions::LINEAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_assets(name: &str) -> AssetConfig {
        let root = std::env::temp_dir().join(format!("space_portfolio_{name}"));
        std::fs::create_dir_all(root.join("images")).unwrap();
        AssetConfig { root, ..AssetConfig::default() }
    }

    #[test]
    fn missing_image_resolves_to_placeholder() {
        let assets = AssetConfig { root: PathBuf::from("/nonexistent"), ..AssetConfig::default() };
        assert_eq!(resolve_image_path(&assets, "/images/skyforge.jpg"), "/placeholder.svg");
        assert_eq!(resolve_image_path(&assets, ""), "/placeholder.svg");
    }

    #[test]
    fn present_image_resolves_to_itself() {
        let assets = scratch_assets("present");
        std::fs::write(assets.resolve("/images/cover.png"), b"not really a png").unwrap();
        assert_eq!(resolve_image_path(&assets, "/images/cover.png"), "/images/cover.png");
    }

    #[test]
    fn undecodable_image_draws_placeholder() {
        let assets = scratch_assets("broken");
        std::fs::write(assets.resolve("/images/broken.png"), b"garbage").unwrap();
        let mut cache = ImageCache::new(assets);
        let ctx = egui::Context::default();
        assert!(cache.cover(&ctx, "/images/broken.png").is_none());
        assert!(cache.cover(&ctx, "/images/missing.jpg").is_none());
    }

    #[test]
    fn decoded_image_becomes_a_texture() {
        let assets = scratch_assets("decoded");
        let path = assets.resolve("/images/dot.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255])).save(&path).unwrap();

        let mut cache = ImageCache::new(assets);
        let ctx = egui::Context::default();
        let first = cache.cover(&ctx, "/images/dot.png");
        assert!(first.is_some());
        assert_eq!(cache.cover(&ctx, "/images/dot.png"), first);
    }

    #[test]
    fn cover_lookup_is_resolved_once_per_path() {
        let assets = scratch_assets("resolved_once");
        let path = assets.resolve("/images/late.png");
        let _ = std::fs::remove_file(&path);

        let mut cache = ImageCache::new(assets);
        let ctx = egui::Context::default();
        assert!(cache.cover(&ctx, "/images/late.png").is_none());

        // A file appearing later is not picked up: later frames never touch the disk.
        image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255])).save(&path).unwrap();
        assert!(cache.cover(&ctx, "/images/late.png").is_none());
    }
}
