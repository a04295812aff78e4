//! Single owner of the focused slide and the print sequence.
//!
//! Everything that can move focus or start a print goes through here. While a
//! print sequence is running every slide is visible, focus is frozen and the
//! keyboard is ignored; once the sequence is back to idle the previously
//! focused slide is the only visible one again.

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;
use std::time::Instant;

use eframe::egui;

use crate::input::{Intent, KeyListener};
use crate::print::{PrintEvent, PrintPhase, PrintSequence, PrintTiming};

#[derive(Debug)]
pub struct Controller {
    len: usize,
    current: usize,
    print: PrintSequence,
    /// `None` once torn down.
    keys: Option<KeyListener>,
}

impl Controller {
    pub fn new(len: NonZeroUsize, timing: PrintTiming) -> Self {
        Self {
            len: len.get(),
            current: 0,
            print: PrintSequence::new(timing),
            keys: Some(KeyListener::register()),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> PrintPhase {
        self.print.phase()
    }

    pub fn completed_prints(&self) -> u32 {
        self.print.completed_cycles()
    }

    pub fn is_live(&self) -> bool {
        self.keys.is_some()
    }

    /// The blocking "preparing" overlay is only up while charts settle.
    pub fn shows_overlay(&self) -> bool {
        self.phase() == PrintPhase::Preparing
    }

    /// Slide `index` is drawn if it has focus or a print is in progress.
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.len && (index == self.current || !self.phase().is_idle())
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.len
    }

    pub fn go_to_next(&mut self) {
        if self.accepts_navigation() {
            self.focus((self.current + 1).min(self.len - 1));
        }
    }

    pub fn go_to_previous(&mut self) {
        if self.accepts_navigation() {
            self.focus(self.current.saturating_sub(1));
        }
    }

    /// Focus `index`, clamped into the deck. Stray indices never error.
    pub fn go_to_slide(&mut self, index: isize) {
        if self.accepts_navigation() {
            let last = self.len - 1;
            let clamped = index.clamp(0, last as isize) as usize;
            self.focus(clamped);
        }
    }

    pub fn go_to_first(&mut self) {
        self.go_to_slide(0);
    }

    pub fn go_to_last(&mut self) {
        self.go_to_slide(isize::MAX);
    }

    /// Start a print cycle. A request while one is already running is dropped.
    pub fn request_print(&mut self, now: Instant) -> bool {
        if !self.is_live() {
            return false;
        }
        let started = self.print.start(now);
        if started {
            log::info!("Preparing {} slides for print", self.len);
        }
        started
    }

    /// Run any print transition that is due.
    pub fn tick(&mut self, now: Instant) -> Option<PrintEvent> {
        if !self.is_live() {
            return None;
        }
        let event = self.print.tick(now)?;
        if event == PrintEvent::Finished {
            log::debug!("Print cycle done, focus back on slide {}", self.current + 1);
        }
        Some(event)
    }

    /// When the host should call [`Controller::tick`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.print.deadline()
    }

    /// Feed one frame of input events through the keyboard listener.
    ///
    /// Navigation and print intents are applied here; window-level intents
    /// (fullscreen, quit, escape) are handed back. Nothing is returned or
    /// applied while a print is in progress.
    pub fn handle_events(&mut self, events: &[egui::Event], now: Instant) -> Vec<Intent> {
        let Some(keys) = &self.keys else {
            return Vec::new();
        };
        if !self.phase().is_idle() {
            return Vec::new();
        }
        let intents = keys.intents(events);
        let mut window = Vec::new();
        for intent in intents {
            if intent.is_navigation() {
                self.apply(intent, now);
            } else {
                window.push(intent);
            }
        }
        window
    }

    pub fn apply(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::Next => self.go_to_next(),
            Intent::Previous => self.go_to_previous(),
            Intent::First => self.go_to_first(),
            Intent::Last => self.go_to_last(),
            Intent::Print => {
                self.request_print(now);
            }
            Intent::ToggleFullscreen | Intent::Escape | Intent::Quit => {}
        }
    }

    /// Cancel the pending print timer and drop the keyboard listener.
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        self.print.cancel();
        if let Some(keys) = self.keys.take() {
            log::debug!(
                "Controller torn down in phase {}, listener {} released",
                self.phase().name(),
                keys.id()
            );
        }
    }

    fn accepts_navigation(&self) -> bool {
        self.is_live() && self.phase().is_idle()
    }

    fn focus(&mut self, index: usize) {
        if index != self.current {
            log::trace!("Focus slide {} -> {}", self.current + 1, index + 1);
            self.current = index;
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.teardown();
    }
}
