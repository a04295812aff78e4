//! Partner logos with an initials fallback.
//!
//! Each logo reference is decoded at most once. A reference that is missing,
//! unreadable or not an image is remembered as failed and the card shows a
//! colored initials badge instead; the failure never leaves this module.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, Color32};

use crate::data::Insurer;
use crate::theme::Theme;

enum LogoEntry {
    Decoded(egui::ColorImage),
    Uploaded(egui::TextureHandle),
    Failed,
}

/// What an insurer card shows in its logo slot.
#[derive(Clone)]
pub enum CardFace<'a> {
    Logo(egui::TextureHandle),
    Initials { text: &'a str, color: Color32 },
}

#[cfg(test)]
impl CardFace<'_> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Initials { .. })
    }
}

pub struct LogoCache {
    dir: PathBuf,
    entries: RefCell<HashMap<String, LogoEntry>>,
}

impl LogoCache {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Decode `reference` if not yet attempted. Returns whether a logo is
    /// available for it.
    pub fn is_available(&self, reference: &str) -> bool {
        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .entry(reference.to_string())
            .or_insert_with(|| match decode(&self.dir.join(reference)) {
                Ok(image) => LogoEntry::Decoded(image),
                Err(e) => {
                    log::debug!("Logo '{reference}' unavailable, using initials: {e:#}");
                    LogoEntry::Failed
                }
            });
        !matches!(entry, LogoEntry::Failed)
    }

    /// Resolve the face of the card at `index` in the insurer grid.
    pub fn face<'a>(&self, ctx: &egui::Context, insurer: &'a Insurer, index: usize) -> CardFace<'a> {
        let fallback = CardFace::Initials {
            text: &insurer.initials,
            color: fallback_color(index),
        };
        let Some(reference) = insurer.logo.as_deref() else {
            return fallback;
        };
        if !self.is_available(reference) {
            return fallback;
        }

        let mut entries = self.entries.borrow_mut();
        let Some(entry) = entries.get_mut(reference) else {
            return fallback;
        };
        if let LogoEntry::Decoded(image) = entry {
            let texture = ctx.load_texture(
                format!("logo:{reference}"),
                std::mem::take(image),
                egui::TextureOptions::LINEAR,
            );
            *entry = LogoEntry::Uploaded(texture);
        }
        match entry {
            LogoEntry::Uploaded(texture) => CardFace::Logo(texture.clone()),
            _ => fallback,
        }
    }
}

pub fn fallback_color(index: usize) -> Color32 {
    let palette = Theme::fallback_palette();
    palette[index % palette.len()]
}

fn decode(path: &Path) -> Result<egui::ColorImage> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?
        .into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insurer(logo: Option<&str>) -> Insurer {
        Insurer {
            name: "CASSI".to_string(),
            errors: 47,
            pct: "2.9%".to_string(),
            initials: "CAS".to_string(),
            logo: logo.map(str::to_string),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("auditdeck-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_logo_falls_back_to_initials() {
        let cache = LogoCache::new(PathBuf::from("/nonexistent/logos"));
        let ctx = egui::Context::default();
        let card = insurer(Some("cassi.png"));
        match cache.face(&ctx, &card, 3) {
            CardFace::Initials { text, color } => {
                assert_eq!(text, "CAS");
                assert_eq!(color, Theme::fallback_palette()[3]);
            }
            CardFace::Logo(_) => panic!("expected initials fallback"),
        }
    }

    #[test]
    fn test_no_reference_falls_back() {
        let cache = LogoCache::new(PathBuf::from("."));
        let ctx = egui::Context::default();
        let card = insurer(None);
        assert!(cache.face(&ctx, &card, 0).is_fallback());
    }

    #[test]
    fn test_corrupt_file_falls_back_and_is_remembered() {
        let dir = scratch_dir("corrupt");
        std::fs::write(dir.join("broken.png"), b"not a png").unwrap();
        let cache = LogoCache::new(dir.clone());
        assert!(!cache.is_available("broken.png"));

        // A later fix on disk is not picked up; failures are sticky.
        image::RgbaImage::new(2, 2).save(dir.join("broken.png")).unwrap();
        assert!(!cache.is_available("broken.png"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_valid_logo_is_shown() {
        let dir = scratch_dir("valid");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]))
            .save(dir.join("cassi.png"))
            .unwrap();
        let cache = LogoCache::new(dir.clone());
        let ctx = egui::Context::default();
        let card = insurer(Some("cassi.png"));

        let face = cache.face(&ctx, &card, 0);
        match &face {
            CardFace::Logo(texture) => assert_eq!(texture.size(), [4, 3]),
            CardFace::Initials { .. } => panic!("expected logo"),
        }
        // Second lookup reuses the uploaded texture.
        assert!(!cache.face(&ctx, &card, 0).is_fallback());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_fallback_colors_cycle() {
        assert_eq!(fallback_color(0), fallback_color(10));
        assert_ne!(fallback_color(0), fallback_color(1));
    }
}
