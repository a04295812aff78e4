//! Outer chrome around one slide.
//!
//! On screen a slide sits in a rounded, bordered card with a drop shadow and
//! fades/zooms in when it gains focus. While a print is in progress the same
//! slide is drawn flat on white with no entrance animation, so captured pages
//! are plain and complete.

use std::time::Instant;

use eframe::egui::{self, CornerRadius, Rect, Stroke};

use crate::controller::Controller;
use crate::theme::Theme;

/// Seconds the entrance fade/zoom takes.
pub const ENTRANCE_DURATION: f32 = 0.5;
/// Size the entrance zoom starts from.
const ENTRANCE_ZOOM: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    Card,
    Paper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideFrame {
    pub visible: bool,
    pub chrome: Chrome,
    pub animate_entrance: bool,
}

impl SlideFrame {
    /// Frame for slide `index`. Visibility is whatever the controller says;
    /// the chrome follows the print phase.
    pub fn resolve(controller: &Controller, index: usize) -> Self {
        let printing = !controller.phase().is_idle();
        Self {
            visible: controller.is_visible(index),
            chrome: if printing { Chrome::Paper } else { Chrome::Card },
            animate_entrance: !printing,
        }
    }

    pub fn is_paper(&self) -> bool {
        self.chrome == Chrome::Paper
    }

    /// Card rect for a slide drawn into `area`, after the entrance zoom.
    pub fn card_rect(&self, area: Rect, entrance: Entrance, scale: f32) -> Rect {
        let margin = match self.chrome {
            Chrome::Card => 32.0 * scale,
            Chrome::Paper => 0.0,
        };
        let card = area.shrink(margin);
        if self.animate_entrance {
            Rect::from_center_size(card.center(), card.size() * entrance.zoom)
        } else {
            card
        }
    }

    /// Paint the chrome and return the rect the content should fill.
    pub fn draw(&self, ui: &egui::Ui, card: Rect, theme: &Theme, opacity: f32, scale: f32) -> Rect {
        match self.chrome {
            Chrome::Card => {
                let radius = CornerRadius::same((24.0 * scale).clamp(0.0, 255.0) as u8);
                let shadow = egui::epaint::Shadow {
                    offset: [0, (12.0 * scale) as i8],
                    blur: (40.0 * scale).clamp(0.0, 255.0) as u8,
                    spread: 0,
                    color: Theme::with_opacity(egui::Color32::BLACK, 0.45 * opacity),
                };
                ui.painter().add(shadow.as_shape(card, radius));
                ui.painter().rect_filled(
                    card,
                    radius,
                    Theme::with_opacity(theme.surface, 0.9 * opacity),
                );
                ui.painter().rect_stroke(
                    card,
                    radius,
                    Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
                    egui::StrokeKind::Inside,
                );
                card.shrink(48.0 * scale)
            }
            Chrome::Paper => {
                ui.painter().rect_filled(card, 0.0, egui::Color32::WHITE);
                card.shrink(24.0 * scale)
            }
        }
    }
}

/// Progress of the focus entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub opacity: f32,
    pub zoom: f32,
}

impl Entrance {
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        zoom: 1.0,
    };

    pub fn at(shown_at: Option<Instant>, now: Instant) -> Self {
        let Some(shown_at) = shown_at else {
            return Self::SETTLED;
        };
        let t = (now.saturating_duration_since(shown_at).as_secs_f32() / ENTRANCE_DURATION)
            .clamp(0.0, 1.0);
        if t >= 1.0 {
            return Self::SETTLED;
        }
        let eased = 1.0 - (1.0 - t).powi(3);
        Self {
            opacity: eased,
            zoom: ENTRANCE_ZOOM + (1.0 - ENTRANCE_ZOOM) * eased,
        }
    }

    pub fn is_running(&self) -> bool {
        self.opacity < 1.0
    }
}
