use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use eframe::egui;

use crate::data::Report;
use crate::deck::Deck;
use crate::print::output::save_color_image;
use crate::render::chart::ChartPalette;
use crate::render::frame::{Chrome, Entrance, SlideFrame};
use crate::render::logo::LogoCache;
use crate::render::{self, SlideContext};
use crate::theme::Theme;

struct ExportApp {
    report: Report,
    deck: Deck,
    theme: Theme,
    logos: LogoCache,
    output_dir: PathBuf,
    current_slide: usize,
    screenshot_requested: bool,
    saved: Arc<AtomicUsize>,
    done: bool,
}

impl ExportApp {
    fn new(report: Report, screen: bool, output_dir: PathBuf, saved: Arc<AtomicUsize>) -> Self {
        let logos = LogoCache::new(report.logo_dir());
        Self {
            report,
            deck: Deck::audit_report(),
            theme: Theme::for_print(!screen),
            logos,
            output_dir,
            current_slide: 0,
            screenshot_requested: false,
            saved,
            done: false,
        }
    }

    fn frame(&self) -> SlideFrame {
        SlideFrame {
            visible: true,
            chrome: if self.theme.is_paper() {
                Chrome::Paper
            } else {
                Chrome::Card
            },
            animate_entrance: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Check for screenshot result from previous frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    match save_slide(&self.output_dir, self.current_slide, image) {
                        Ok(line) => {
                            self.saved.fetch_add(1, Ordering::Relaxed);
                            eprintln!("  {line}");
                        }
                        Err(line) => eprintln!("  {line}"),
                    }
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            self.current_slide += 1;
            if self.current_slide >= self.deck.len().get() {
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let Some(kind) = self.deck.get(self.current_slide) else {
                    return;
                };
                let scale = render::compute_scale(rect);
                let frame = self.frame();
                let print = frame.is_paper();
                let card = frame.card_rect(rect, Entrance::SETTLED, scale);
                let content = frame.draw(ui, card, &self.theme, 1.0, scale);
                let cx = SlideContext {
                    report: &self.report,
                    theme: &self.theme,
                    palette: ChartPalette::resolve(print),
                    logos: &self.logos,
                    print,
                    opacity: 1.0,
                    scale,
                    // no animation in export
                    chart_progress: 1.0,
                };
                render::render_slide(ui, kind, content, &cx);
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

/// Write one captured slide and describe the outcome for the progress report.
fn save_slide(output_dir: &Path, index: usize, image: &egui::ColorImage) -> Result<String, String> {
    let filename = format!("slide-{:02}.png", index + 1);
    match save_color_image(image, &output_dir.join(&filename)) {
        Ok(()) => Ok(format!("Saved {filename}")),
        Err(e) => Err(format!("Failed to save {filename}: {e:#}")),
    }
}

pub fn run(
    report: Report,
    output_dir: PathBuf,
    width: u32,
    height: u32,
    screen: bool,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(&output_dir)?;

    let slide_count = Deck::audit_report().len().get();
    eprintln!(
        "Exporting {} slides to {} ({}x{}, {} style)",
        slide_count,
        output_dir.display(),
        width,
        height,
        if screen { "screen" } else { "print" },
    );

    let title = format!("{} export", report.meta.title);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let saved = Arc::new(AtomicUsize::new(0));
    let app_saved = Arc::clone(&saved);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(report, screen, output_dir, app_saved)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let saved = saved.load(Ordering::Relaxed);
    if saved < slide_count {
        anyhow::bail!("Exported {saved} of {slide_count} slides");
    }
    eprintln!("Export complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("auditdeck-export-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn white_image() -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied([4, 4], &[255; 64])
    }

    #[test]
    fn test_save_slide_reports_saved_file() {
        let dir = scratch_dir("saved");
        std::fs::create_dir_all(&dir).unwrap();
        let line = save_slide(&dir, 0, &white_image()).unwrap();
        assert_eq!(line, "Saved slide-01.png");
        assert!(dir.join("slide-01.png").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_slide_reports_failure_on_same_channel() {
        let dir = scratch_dir("missing");
        let line = save_slide(&dir, 11, &white_image()).unwrap_err();
        assert!(line.starts_with("Failed to save slide-12.png"), "{line}");
        assert!(!dir.join("slide-12.png").exists());
    }

    #[test]
    fn test_export_frame_follows_theme() {
        let report = Report::builtin().unwrap();
        let saved = Arc::new(AtomicUsize::new(0));
        let paper = ExportApp::new(report.clone(), false, PathBuf::new(), Arc::clone(&saved));
        assert!(paper.frame().is_paper());
        let screen = ExportApp::new(report, true, PathBuf::new(), saved);
        assert!(!screen.frame().is_paper());
    }
}
