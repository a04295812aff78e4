//! Print preparation sequence.
//!
//! Printing runs through `Idle → Preparing → Rendering → Printing → Idle`.
//! Each step waits a fixed delay measured from the moment the previous step
//! was entered:
//!
//! - `Preparing`: every slide is laid out on the print sheet behind a blocking
//!   overlay so charts can settle at full size.
//! - `Rendering`: the overlay is gone; a short delay lets that frame reach the
//!   screen before capture.
//! - `Printing`: the page capture has been handed to the host. Whether the host
//!   print step succeeds, fails or is cancelled cannot be observed here, so the
//!   sequence returns to `Idle` after the reset delay no matter what.

pub mod output;

use std::time::{Duration, Instant};

use crate::config::PrintConfig;

pub const DEFAULT_PREPARE_MS: u64 = 1500;
pub const DEFAULT_SETTLE_MS: u64 = 100;
pub const DEFAULT_RESET_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintPhase {
    Idle,
    Preparing,
    Rendering,
    Printing,
}

impl PrintPhase {
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Rendering => "rendering",
            Self::Printing => "printing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintTiming {
    /// Preparing → Rendering
    pub prepare: Duration,
    /// Rendering → Printing
    pub settle: Duration,
    /// Printing → Idle
    pub reset: Duration,
}

impl Default for PrintTiming {
    fn default() -> Self {
        Self {
            prepare: Duration::from_millis(DEFAULT_PREPARE_MS),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            reset: Duration::from_millis(DEFAULT_RESET_MS),
        }
    }
}

impl PrintTiming {
    pub fn from_config(config: Option<&PrintConfig>) -> Self {
        let ms = |value: Option<u64>, default: u64| Duration::from_millis(value.unwrap_or(default));
        match config {
            Some(c) => Self {
                prepare: ms(c.prepare_ms, DEFAULT_PREPARE_MS),
                settle: ms(c.settle_ms, DEFAULT_SETTLE_MS),
                reset: ms(c.reset_ms, DEFAULT_RESET_MS),
            },
            None => Self::default(),
        }
    }
}

/// What a call to [`PrintSequence::tick`] just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintEvent {
    /// Entered `Rendering`; the preparing overlay is no longer drawn.
    OverlayLifted,
    /// Entered `Printing`; the host should capture and print now.
    Invoke,
    /// Back to `Idle`.
    Finished,
}

#[derive(Debug)]
pub struct PrintSequence {
    phase: PrintPhase,
    deadline: Option<Instant>,
    timing: PrintTiming,
    completed: u32,
}

impl PrintSequence {
    pub fn new(timing: PrintTiming) -> Self {
        Self {
            phase: PrintPhase::Idle,
            deadline: None,
            timing,
            completed: 0,
        }
    }

    pub fn phase(&self) -> PrintPhase {
        self.phase
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Number of cycles that made it back to `Idle`.
    pub fn completed_cycles(&self) -> u32 {
        self.completed
    }

    /// Begin a cycle. Returns `false` (and changes nothing) if one is in flight.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.phase.is_idle() {
            log::debug!("Print already {}, ignoring request", self.phase.name());
            return false;
        }
        self.enter(PrintPhase::Preparing, Some(now + self.timing.prepare));
        true
    }

    /// Advance at most one step if the pending deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<PrintEvent> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        let (next, event, delay) = match self.phase {
            PrintPhase::Preparing => (
                PrintPhase::Rendering,
                PrintEvent::OverlayLifted,
                Some(self.timing.settle),
            ),
            PrintPhase::Rendering => (
                PrintPhase::Printing,
                PrintEvent::Invoke,
                Some(self.timing.reset),
            ),
            PrintPhase::Printing => (PrintPhase::Idle, PrintEvent::Finished, None),
            PrintPhase::Idle => {
                self.deadline = None;
                return None;
            }
        };
        self.enter(next, delay.map(|d| now + d));
        if next.is_idle() {
            self.completed += 1;
        }
        Some(event)
    }

    /// Drop the pending deadline. The phase is left where it is and no further
    /// transition happens.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            log::debug!("Print timer cancelled in phase {}", self.phase.name());
        }
    }

    fn enter(&mut self, phase: PrintPhase, deadline: Option<Instant>) {
        log::debug!("Print phase {} -> {}", self.phase.name(), phase.name());
        self.phase = phase;
        self.deadline = deadline;
    }
}
