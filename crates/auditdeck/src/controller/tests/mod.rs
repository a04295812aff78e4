mod keyboard;
mod navigation;
mod printing;

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use eframe::egui;

use super::Controller;
use crate::print::{PrintPhase, PrintTiming};

/// Helper to build a controller over `len` slides with default timings.
fn controller(len: usize) -> Controller {
    Controller::new(
        NonZeroUsize::new(len).expect("test decks are non-empty"),
        PrintTiming::default(),
    )
}

/// Helper to build a key press event.
fn press(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Tick well past every deadline until the sequence is idle again.
/// Returns the time of the last tick.
fn run_to_idle(c: &mut Controller, mut now: Instant) -> Instant {
    for _ in 0..10 {
        if c.phase() == PrintPhase::Idle {
            break;
        }
        now += ms(5_000);
        c.tick(now);
    }
    now
}

/// Assert which slides are visible.
fn assert_visible(c: &Controller, expected: &[bool]) {
    let actual: Vec<bool> = (0..c.len()).map(|i| c.is_visible(i)).collect();
    assert_eq!(actual, expected, "visibility at slide {}", c.current() + 1);
}
