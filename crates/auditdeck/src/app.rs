use std::time::Instant;

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Stroke};

use crate::config::Config;
use crate::controller::Controller;
use crate::data::Report;
use crate::deck::Deck;
use crate::input::Intent;
use crate::print::output::{self, PrintOutput};
use crate::print::{PrintEvent, PrintTiming};
use crate::render::chart::{self, ChartPalette};
use crate::render::frame::{Entrance, SlideFrame};
use crate::render::logo::LogoCache;
use crate::render::{self, SlideContext, text};
use crate::theme::Theme;

/// Seconds within which a second Esc closes the window.
const ESC_WINDOW: f32 = 1.0;

struct AuditApp {
    report: Report,
    deck: Deck,
    controller: Controller,
    logos: LogoCache,
    screen: Theme,
    paper: Theme,
    output: PrintOutput,
    /// When each slide last gained focus; drives the entrance and chart animations.
    shown_at: Vec<Option<Instant>>,
    last_focus: usize,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    /// Set by the `Invoke` transition; the capture is requested once the sheet is drawn.
    capture_requested: bool,
    /// Page rects of the captured sheet, waiting for the screenshot to arrive.
    pending_pages: Option<Vec<Rect>>,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Clicks collected while drawing, applied once the frame is painted.
#[derive(Debug, Clone, Copy)]
enum UiAction {
    Print,
    Previous,
    Next,
    GoTo(usize),
}

#[derive(Default)]
struct FrameOutput {
    actions: Vec<UiAction>,
    /// Print sheet page rects, only while a print is in progress.
    pages: Vec<Rect>,
    animating: bool,
}

impl AuditApp {
    fn new(report: Report, start_slide: usize, timing: PrintTiming, output: PrintOutput) -> Self {
        let deck = Deck::audit_report();
        let mut controller = Controller::new(deck.len(), timing);
        controller.go_to_slide(isize::try_from(start_slide).unwrap_or(isize::MAX));

        let mut shown_at = vec![None; deck.len().get()];
        let current = controller.current();
        shown_at[current] = Some(Instant::now());

        let logos = LogoCache::new(report.logo_dir());
        Self {
            report,
            deck,
            controller,
            logos,
            screen: Theme::screen(),
            paper: Theme::paper(),
            output,
            shown_at,
            last_focus: current,
            toast: None,
            last_esc: None,
            capture_requested: false,
            pending_pages: None,
        }
    }

    fn window_intent(&mut self, ctx: &egui::Context, intent: Intent, cmds: &mut Vec<egui::ViewportCommand>) {
        match intent {
            Intent::Quit => cmds.push(egui::ViewportCommand::Close),
            Intent::ToggleFullscreen => {
                let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
                cmds.push(egui::ViewportCommand::Fullscreen(!fullscreen));
            }
            Intent::Escape => {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < ESC_WINDOW {
                        cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Pressione Esc novamente para sair".to_string()));
            }
            _ => {}
        }
    }

    fn apply(&mut self, action: UiAction, now: Instant) {
        match action {
            UiAction::Print => {
                self.controller.request_print(now);
            }
            UiAction::Previous => self.controller.go_to_previous(),
            UiAction::Next => self.controller.go_to_next(),
            UiAction::GoTo(index) => self.controller.go_to_slide(index as isize),
        }
    }

    fn deliver_capture(&mut self, image: &egui::ColorImage, pixels_per_point: f32) {
        let Some(pages) = self.pending_pages.take() else {
            return;
        };
        if let Err(e) = self.output.deliver(image, &pages, pixels_per_point) {
            log::warn!("Print output failed: {e:#}");
        }
    }

    fn draw(&self, ui: &egui::Ui, now: Instant) -> FrameOutput {
        let rect = ui.max_rect();
        let mut out = FrameOutput::default();
        if self.controller.phase().is_idle() {
            self.draw_presentation(ui, rect, now, &mut out);
        } else {
            self.draw_print_sheet(ui, rect, &mut out);
            if self.controller.shows_overlay() {
                self.draw_overlay(ui, rect);
            }
        }
        out
    }

    fn draw_presentation(&self, ui: &egui::Ui, rect: Rect, now: Instant, out: &mut FrameOutput) {
        let theme = &self.screen;
        let scale = render::compute_scale(rect).max(0.4);
        ui.painter().rect_filled(rect, 0.0, theme.background);

        let header_h = 76.0 * scale;
        let footer_h = 76.0 * scale;
        let header = Rect::from_min_size(rect.min, egui::vec2(rect.width(), header_h));
        let footer = Rect::from_min_max(Pos2::new(rect.left(), rect.bottom() - footer_h), rect.max);
        let stage = Rect::from_min_max(
            Pos2::new(rect.left(), header.bottom()),
            Pos2::new(rect.right(), footer.top()),
        );

        let current = self.controller.current();
        if let Some(kind) = self.deck.get(current) {
            let area = fit_widescreen(stage);
            let slide_scale = render::compute_scale(area);
            let frame = SlideFrame::resolve(&self.controller, current);
            let print = frame.is_paper();
            let shown_at = self.shown_at.get(current).copied().flatten();
            let entrance = Entrance::at(shown_at, now);
            let card = frame.card_rect(area, entrance, slide_scale);
            let content = frame.draw(ui, card, theme, entrance.opacity, slide_scale);
            let chart_progress = if kind.has_chart() {
                chart::entry_progress(shown_at, now, print)
            } else {
                1.0
            };
            out.animating |= entrance.is_running() || chart_progress < 1.0;

            let cx = SlideContext {
                report: &self.report,
                theme,
                palette: ChartPalette::resolve(print),
                logos: &self.logos,
                print,
                opacity: entrance.opacity,
                scale: slide_scale,
                chart_progress,
            };
            render::render_slide(ui, kind, content, &cx);
        }

        if self.draw_header(ui, header, scale) {
            out.actions.push(UiAction::Print);
        }
        self.draw_counter(ui, Pos2::new(rect.right() - 24.0 * scale, header.bottom() + 16.0 * scale), scale);
        self.draw_footer(ui, footer, scale, out);

        if let Some(toast) = &self.toast {
            draw_toast(ui, theme, toast, rect, footer_h, scale);
            out.animating = true;
        }
    }

    /// Returns true when the print button was clicked.
    fn draw_header(&self, ui: &egui::Ui, header: Rect, scale: f32) -> bool {
        let theme = &self.screen;
        let meta = &self.report.meta;
        let painter = ui.painter();
        painter.rect_filled(header, 0.0, Theme::with_opacity(theme.background, 0.8));
        painter.line_segment(
            [header.left_bottom(), header.right_bottom()],
            Stroke::new(1.0, theme.border),
        );

        let pad = 24.0 * scale;
        let badge = Rect::from_min_size(
            Pos2::new(header.left() + pad, header.center().y - 20.0 * scale),
            egui::vec2(40.0 * scale, 40.0 * scale),
        );
        painter.rect_filled(badge, 8.0 * scale, theme.accent);
        painter.text(
            badge.center(),
            Align2::CENTER_CENTER,
            badge_letter(&meta.organisation),
            FontId::proportional(22.0 * scale),
            egui::Color32::WHITE,
        );

        let x = badge.right() + 16.0 * scale;
        painter.text(
            Pos2::new(x, badge.top()),
            Align2::LEFT_TOP,
            &meta.organisation,
            FontId::proportional(18.0 * scale),
            theme.heading_color,
        );
        painter.text(
            Pos2::new(x, badge.bottom()),
            Align2::LEFT_BOTTOM,
            &meta.tagline,
            FontId::proportional(12.0 * scale),
            theme.muted,
        );

        let label = "Imprimir / PDF";
        let size = 14.0 * scale;
        let width = painter
            .layout_no_wrap(label.to_string(), FontId::proportional(size), theme.foreground)
            .rect
            .width()
            + size * 2.0;
        let height = size * 2.4;
        let button = Rect::from_min_size(
            Pos2::new(header.right() - pad - width, header.center().y - height / 2.0),
            egui::vec2(width, height),
        );
        let response = ui
            .interact(button, ui.id().with("print"), egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        let fill = if response.hovered() {
            theme.surface_alt
        } else {
            theme.surface
        };
        painter.rect_filled(button, height / 2.0, fill);
        painter.rect_stroke(
            button,
            height / 2.0,
            Stroke::new(1.0, theme.border),
            egui::StrokeKind::Inside,
        );
        painter.text(
            button.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(size),
            theme.foreground,
        );
        response.clicked()
    }

    fn draw_counter(&self, ui: &egui::Ui, top_right: Pos2, scale: f32) {
        let theme = &self.screen;
        let label = format!(
            "Slide {} / {}",
            self.controller.current() + 1,
            self.controller.len()
        );
        let size = 14.0 * scale;
        let width = ui
            .painter()
            .layout_no_wrap(label.clone(), FontId::proportional(size), theme.muted)
            .rect
            .width();
        text::draw_pill(
            ui,
            &label,
            Pos2::new(top_right.x - width - size * 1.4, top_right.y),
            size,
            theme.muted,
            Theme::with_opacity(theme.surface, 0.8),
            theme.border,
        );
    }

    fn draw_footer(&self, ui: &egui::Ui, footer: Rect, scale: f32, out: &mut FrameOutput) {
        let theme = &self.screen;
        let meta = &self.report.meta;
        let painter = ui.painter();
        painter.rect_filled(footer, 0.0, Theme::with_opacity(theme.background, 0.8));
        painter.line_segment(
            [footer.left_top(), footer.right_top()],
            Stroke::new(1.0, theme.border),
        );

        let pad = 24.0 * scale;
        painter.text(
            Pos2::new(footer.left() + pad, footer.center().y),
            Align2::LEFT_CENTER,
            format!(
                "Relatório desenvolvido por {} \u{2022} {}",
                meta.credit, meta.registration
            ),
            FontId::proportional(12.0 * scale),
            theme.muted,
        );

        let count = self.controller.len();
        let current = self.controller.current();
        let dot_gap = 18.0 * scale;
        let button = 40.0 * scale;
        let dots_w = dot_gap * (count as f32 - 1.0);
        let cy = footer.center().y;
        let next_center = Pos2::new(footer.right() - pad - button / 2.0, cy);
        let dots_right = next_center.x - button / 2.0 - 24.0 * scale;
        let dots_left = dots_right - dots_w;
        let prev_center = Pos2::new(dots_left - 24.0 * scale - button / 2.0, cy);

        if self.nav_button(ui, "prev", prev_center, button, "\u{2039}", false, self.controller.can_go_previous()) {
            out.actions.push(UiAction::Previous);
        }
        if self.nav_button(ui, "next", next_center, button, "\u{203A}", true, self.controller.can_go_next()) {
            out.actions.push(UiAction::Next);
        }

        for index in 0..count {
            let center = Pos2::new(dots_left + index as f32 * dot_gap, cy);
            let hit = Rect::from_center_size(center, egui::vec2(dot_gap, dot_gap));
            let response = ui
                .interact(hit, ui.id().with(("dot", index)), egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            let (radius, color) = if index == current {
                (6.0 * scale, theme.accent)
            } else if response.hovered() {
                (5.0 * scale, theme.muted)
            } else {
                (5.0 * scale, theme.border)
            };
            painter.circle_filled(center, radius, color);
            if response.clicked() {
                out.actions.push(UiAction::GoTo(index));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn nav_button(
        &self,
        ui: &egui::Ui,
        id: &str,
        center: Pos2,
        size: f32,
        glyph: &str,
        primary: bool,
        enabled: bool,
    ) -> bool {
        let theme = &self.screen;
        let rect = Rect::from_center_size(center, egui::vec2(size, size));
        let sense = if enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let response = ui.interact(rect, ui.id().with(id), sense);
        let base = if primary { theme.accent } else { theme.surface };
        let fill = if response.hovered() && enabled {
            Theme::with_opacity(base, 0.8)
        } else {
            base
        };
        let opacity = if enabled { 1.0 } else { 0.3 };
        ui.painter()
            .circle_filled(center, size / 2.0, Theme::with_opacity(fill, opacity));
        ui.painter().text(
            center,
            Align2::CENTER_CENTER,
            glyph,
            FontId::proportional(size * 0.7),
            Theme::with_opacity(egui::Color32::WHITE, opacity),
        );
        enabled && response.clicked()
    }

    /// Every slide laid out as a page on one white sheet, in paper style.
    fn draw_print_sheet(&self, ui: &egui::Ui, rect: Rect, out: &mut FrameOutput) {
        let theme = &self.paper;
        ui.painter().rect_filled(rect, 0.0, theme.background);
        let pages = output::sheet_layout(self.deck.len().get(), rect, render::compute_scale(rect));

        for ((index, kind), page) in self.deck.iter().zip(&pages) {
            let frame = SlideFrame::resolve(&self.controller, index);
            if !frame.visible {
                continue;
            }
            let scale = render::compute_scale(*page);
            let card = frame.card_rect(*page, Entrance::SETTLED, scale);
            let content = frame.draw(ui, card, theme, 1.0, scale);
            let cx = SlideContext {
                report: &self.report,
                theme,
                palette: ChartPalette::resolve(frame.is_paper()),
                logos: &self.logos,
                print: frame.is_paper(),
                opacity: 1.0,
                scale,
                chart_progress: 1.0,
            };
            render::render_slide(ui, kind, content, &cx);
            ui.painter().rect_stroke(
                *page,
                0.0,
                Stroke::new(1.0, theme.border),
                egui::StrokeKind::Outside,
            );
        }
        out.pages = pages;
    }

    fn draw_overlay(&self, ui: &egui::Ui, rect: Rect) {
        let theme = &self.screen;
        let scale = render::compute_scale(rect).max(0.4);
        ui.painter()
            .rect_filled(rect, 0.0, Theme::with_opacity(theme.background, 0.92));
        let center = rect.center();
        ui.painter().text(
            center - egui::vec2(0.0, 12.0 * scale),
            Align2::CENTER_BOTTOM,
            "Preparando relatório para impressão\u{2026}",
            FontId::proportional(theme.h3_size * scale),
            theme.heading_color,
        );
        ui.painter().text(
            center + egui::vec2(0.0, 12.0 * scale),
            Align2::CENTER_TOP,
            format!("{} páginas", self.controller.len()),
            FontId::proportional(theme.small_size * scale),
            theme.muted,
        );
    }
}

impl eframe::App for AuditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Viewport commands are sent after input is read; sending them inside
        // ctx.input() deadlocks.
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let egui::Event::Screenshot { image, .. } = event {
                self.deliver_capture(image, ctx.pixels_per_point());
            }
        }

        for intent in self.controller.handle_events(&events, now) {
            self.window_intent(ctx, intent, &mut viewport_cmds);
        }

        // One transition per frame so every phase reaches the screen.
        match self.controller.tick(now) {
            Some(PrintEvent::Invoke) => self.capture_requested = true,
            Some(PrintEvent::Finished) => {
                log::debug!("Print cycle {} finished", self.controller.completed_prints());
            }
            Some(event) => log::trace!("Print event {event:?}"),
            None => {}
        }

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        let current = self.controller.current();
        if current != self.last_focus {
            if let Some(slot) = self.shown_at.get_mut(current) {
                *slot = Some(now);
            }
            self.last_focus = current;
        }

        let bg = if self.controller.phase().is_idle() {
            self.screen.background
        } else {
            self.paper.background
        };
        let out = egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| self.draw(ui, now))
            .inner;

        for action in out.actions {
            self.apply(action, now);
        }

        if self.capture_requested && !out.pages.is_empty() {
            self.capture_requested = false;
            self.pending_pages = Some(out.pages);
            viewport_cmds.push(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        }

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        if out.animating || self.pending_pages.is_some() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.teardown();
    }
}

fn draw_toast(ui: &egui::Ui, theme: &Theme, toast: &Toast, rect: Rect, bottom: f32, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let bg = Theme::with_opacity(theme.surface_alt, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        FontId::proportional(20.0 * scale),
        color,
    );
    let padding = 16.0 * scale;
    let toast_rect = Rect::from_min_size(
        Pos2::new(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - bottom - 80.0 * scale,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, bg);
    ui.painter().galley(
        Pos2::new(toast_rect.left() + padding, toast_rect.top() + padding),
        galley,
        color,
    );
}

/// Largest 16:9 rect centered in `area`.
fn fit_widescreen(area: Rect) -> Rect {
    let width = area.width().min(area.height() * 16.0 / 9.0);
    Rect::from_center_size(area.center(), egui::vec2(width, width * 9.0 / 16.0))
}

/// First letter of the organisation's distinguishing (last) word.
fn badge_letter(organisation: &str) -> String {
    organisation
        .split_whitespace()
        .last()
        .and_then(|word| word.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

pub fn run(report: Report, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    // CLI flags override config
    let config = Config::load_or_default();
    let defaults = config.defaults.clone().unwrap_or_default();
    let windowed = windowed || defaults.windowed.unwrap_or(false);
    let start_slide = start_slide
        .or(defaults.start_slide)
        .unwrap_or(1)
        .saturating_sub(1);

    let print = config.print_or_default();
    let timing = PrintTiming::from_config(Some(&print));
    let output = PrintOutput::from_config(&print);
    log::debug!("Print pages go to {}", output.dir().display());

    let title = format!("{} \u{2022} {}", report.meta.organisation, report.meta.title);
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(AuditApp::new(report, start_slide, timing, output)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_letter_uses_last_word() {
        assert_eq!(badge_letter("Hospital UNIQUE"), "U");
        assert_eq!(badge_letter("clínica"), "C");
        assert_eq!(badge_letter("   "), "");
    }

    #[test]
    fn test_fit_widescreen_letterboxes() {
        let tall = Rect::from_min_size(Pos2::ZERO, egui::vec2(1600.0, 1200.0));
        let fitted = fit_widescreen(tall);
        assert_eq!(fitted.width(), 1600.0);
        assert_eq!(fitted.height(), 900.0);
        assert_eq!(fitted.center(), tall.center());

        let wide = Rect::from_min_size(Pos2::ZERO, egui::vec2(2000.0, 900.0));
        let fitted = fit_widescreen(wide);
        assert_eq!(fitted.height(), 900.0);
        assert_eq!(fitted.width(), 1600.0);
    }

    #[test]
    fn test_app_starts_on_clamped_slide() {
        let report = Report::builtin().unwrap();
        let output = PrintOutput::new(std::env::temp_dir(), None);
        let app = AuditApp::new(report, 99, PrintTiming::default(), output);
        assert_eq!(app.controller.current(), app.controller.len() - 1);
        assert!(app.shown_at[app.controller.current()].is_some());
        assert_eq!(app.last_focus, app.controller.current());
    }

    #[test]
    fn test_app_start_beyond_isize_lands_on_last_slide() {
        let report = Report::builtin().unwrap();
        let output = PrintOutput::new(std::env::temp_dir(), None);
        let app = AuditApp::new(report, usize::MAX, PrintTiming::default(), output);
        assert_eq!(app.controller.current(), app.controller.len() - 1);
    }
}
