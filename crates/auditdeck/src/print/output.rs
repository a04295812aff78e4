//! Where a captured print sheet goes: one PNG per page on disk, then an
//! optional system print command. Nothing here reports back to the print
//! sequence.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use eframe::egui::{self, Rect};

use crate::config::PrintConfig;

pub struct PrintOutput {
    dir: PathBuf,
    command: Option<String>,
}

impl PrintOutput {
    pub fn new(dir: PathBuf, command: Option<String>) -> Self {
        Self { dir, command }
    }

    pub fn from_config(config: &PrintConfig) -> Self {
        Self::new(
            config.output_dir_or_default(),
            config.command.clone().filter(|c| !c.trim().is_empty()),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Crop each page out of a full-window capture and write it as
    /// `page-NN.png`, then hand the files to the print command if one is set.
    pub fn deliver(
        &self,
        image: &egui::ColorImage,
        pages: &[Rect],
        pixels_per_point: f32,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let mut written = Vec::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            let path = self.dir.join(page_file_name(i));
            let cropped = image.region(page, Some(pixels_per_point));
            save_color_image(&cropped, &path)?;
            written.push(path);
        }
        log::info!("Wrote {} print pages to {}", written.len(), self.dir.display());

        if let Some(command) = &self.command {
            spawn_print_command(command, &written)?;
        }
        Ok(written)
    }
}

pub fn page_file_name(index: usize) -> String {
    format!("page-{:02}.png", index + 1)
}

pub fn save_color_image(image: &egui::ColorImage, path: &Path) -> Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", path.display()))
}

/// Start `command` with the page files appended and return immediately. The
/// exit status is only logged.
fn spawn_print_command(command: &str, files: &[PathBuf]) -> Result<()> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        anyhow::bail!("Print command is empty");
    };
    let mut child = Command::new(program)
        .args(parts)
        .args(files)
        .spawn()
        .with_context(|| format!("Failed to start print command '{program}'"))?;

    log::info!("Sent {} pages to '{command}'", files.len());
    let program = program.to_string();
    std::thread::spawn(move || match child.wait() {
        Ok(status) if status.success() => log::debug!("'{program}' finished"),
        Ok(status) => log::warn!("'{program}' exited with {status}"),
        Err(e) => log::warn!("Failed to wait for '{program}': {e}"),
    });
    Ok(())
}

pub fn sheet_columns(count: usize) -> usize {
    if count <= 4 {
        2
    } else if count <= 9 {
        3
    } else {
        4
    }
}

/// Lay `count` 16:9 pages out in a grid that fits entirely inside `rect`,
/// centered horizontally. Pages are in slide order, row by row.
pub fn sheet_layout(count: usize, rect: Rect, scale: f32) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let cols = sheet_columns(count);
    let rows = count.div_ceil(cols);

    let padding = 24.0 * scale;
    let gap = 12.0 * scale;

    let grid_width = rect.width() - padding * 2.0;
    let grid_height = rect.height() - padding * 2.0;

    let mut cell_width = (grid_width - gap * (cols as f32 - 1.0)) / cols as f32;
    let mut cell_height = cell_width * 9.0 / 16.0;
    let total_height = rows as f32 * cell_height + (rows as f32 - 1.0) * gap;
    if total_height > grid_height {
        cell_height = (grid_height - gap * (rows as f32 - 1.0)) / rows as f32;
        cell_width = cell_height * 16.0 / 9.0;
    }

    let used_width = cols as f32 * cell_width + (cols as f32 - 1.0) * gap;
    let left = rect.left() + (rect.width() - used_width) / 2.0;
    let top = rect.top() + padding;

    (0..count)
        .map(|index| {
            let col = index % cols;
            let row = index / cols;
            let x = left + col as f32 * (cell_width + gap);
            let y = top + row as f32 * (cell_height + gap);
            Rect::from_min_size(egui::pos2(x, y), egui::vec2(cell_width, cell_height))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1920.0, 1080.0))
    }

    #[test]
    fn test_sheet_layout_fits_window() {
        for count in [1, 3, 5, 9, 13, 20] {
            let pages = sheet_layout(count, window(), 1.0);
            assert_eq!(pages.len(), count);
            for page in &pages {
                assert!(window().contains_rect(*page), "{count}: {page:?}");
                let ratio = page.width() / page.height();
                assert!((ratio - 16.0 / 9.0).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_sheet_layout_pages_do_not_overlap() {
        let pages = sheet_layout(13, window(), 1.0);
        for (i, a) in pages.iter().enumerate() {
            for b in &pages[i + 1..] {
                assert!(!a.shrink(0.5).intersects(b.shrink(0.5)));
            }
        }
    }

    #[test]
    fn test_sheet_layout_row_order() {
        let pages = sheet_layout(13, window(), 1.0);
        assert_eq!(sheet_columns(13), 4);
        assert!(pages[1].left() > pages[0].left());
        assert_eq!(pages[4].left(), pages[0].left());
        assert!(pages[4].top() > pages[0].top());
    }

    #[test]
    fn test_sheet_layout_empty() {
        assert!(sheet_layout(0, window(), 1.0).is_empty());
    }

    #[test]
    fn test_page_file_names() {
        assert_eq!(page_file_name(0), "page-01.png");
        assert_eq!(page_file_name(12), "page-13.png");
    }

    #[test]
    fn test_deliver_writes_one_png_per_page() {
        let dir = std::env::temp_dir().join(format!("auditdeck-print-{}", std::process::id()));
        let output = PrintOutput::new(dir.clone(), None);
        let image = egui::ColorImage::from_rgba_unmultiplied([40, 20], &[255; 40 * 20 * 4]);
        let pages = [
            Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(16.0, 9.0)),
            Rect::from_min_size(egui::pos2(20.0, 0.0), egui::vec2(16.0, 9.0)),
        ];

        let written = output.deliver(&image, &pages, 1.0).unwrap();
        assert_eq!(written.len(), 2);
        for path in &written {
            let page = image::open(path).unwrap();
            assert_eq!((page.width(), page.height()), (16, 9));
        }
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_blank_command_is_ignored() {
        let config = PrintConfig {
            command: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(PrintOutput::from_config(&config).command.is_none());
    }

    #[test]
    fn test_missing_print_command_is_an_error() {
        let err = spawn_print_command("auditdeck-no-such-printer", &[]).unwrap_err();
        assert!(err.to_string().contains("auditdeck-no-such-printer"));
    }
}
