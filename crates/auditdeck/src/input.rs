use std::sync::atomic::{AtomicU64, Ordering};

use eframe::egui;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Something the user asked for, independent of how they asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    First,
    Last,
    Print,
    ToggleFullscreen,
    Escape,
    Quit,
}

impl Intent {
    /// Intents the controller resolves itself; the rest belong to the window.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Next | Self::Previous | Self::First | Self::Last | Self::Print
        )
    }
}

/// Map a key press to an intent.
pub fn intent_for_key(key: egui::Key, modifiers: egui::Modifiers) -> Option<Intent> {
    if modifiers.command && key == egui::Key::P {
        return Some(Intent::Print);
    }
    if modifiers.command || modifiers.alt {
        return None;
    }
    match key {
        egui::Key::ArrowRight | egui::Key::Space => Some(Intent::Next),
        egui::Key::ArrowLeft => Some(Intent::Previous),
        egui::Key::Home => Some(Intent::First),
        egui::Key::End => Some(Intent::Last),
        egui::Key::F => Some(Intent::ToggleFullscreen),
        egui::Key::Escape => Some(Intent::Escape),
        egui::Key::Q => Some(Intent::Quit),
        _ => None,
    }
}

/// The keyboard subscription of one live controller.
///
/// Created when the controller is built and dropped on teardown, so there is
/// never more than one per controller no matter how often the window repaints.
#[derive(Debug)]
pub struct KeyListener {
    id: u64,
}

impl KeyListener {
    pub fn register() -> Self {
        let id = NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!("Keyboard listener {id} registered");
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Intents for this frame's key presses, in the order they happened.
    pub fn intents(&self, events: &[egui::Event]) -> Vec<Intent> {
        events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => intent_for_key(*key, *modifiers),
                _ => None,
            })
            .collect()
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        log::debug!("Keyboard listener {} removed", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_and_space_mapping() {
        let none = egui::Modifiers::NONE;
        assert_eq!(intent_for_key(egui::Key::ArrowRight, none), Some(Intent::Next));
        assert_eq!(intent_for_key(egui::Key::Space, none), Some(Intent::Next));
        assert_eq!(intent_for_key(egui::Key::ArrowLeft, none), Some(Intent::Previous));
        assert_eq!(intent_for_key(egui::Key::ArrowUp, none), None);
    }

    #[test]
    fn test_command_p_prints() {
        assert_eq!(
            intent_for_key(egui::Key::P, egui::Modifiers::COMMAND),
            Some(Intent::Print)
        );
        assert_eq!(intent_for_key(egui::Key::P, egui::Modifiers::NONE), None);
        assert_eq!(intent_for_key(egui::Key::Q, egui::Modifiers::COMMAND), None);
    }

    #[test]
    fn test_releases_are_ignored() {
        let listener = KeyListener::register();
        let release = egui::Event::Key {
            key: egui::Key::ArrowRight,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert!(listener.intents(&[release]).is_empty());
    }

    #[test]
    fn test_intents_keep_event_order() {
        let listener = KeyListener::register();
        let events = [
            press(egui::Key::ArrowRight),
            egui::Event::Text(" ".to_string()),
            press(egui::Key::Space),
            press(egui::Key::ArrowLeft),
        ];
        assert_eq!(
            listener.intents(&events),
            vec![Intent::Next, Intent::Next, Intent::Previous]
        );
    }

    #[test]
    fn test_listener_ids_are_unique() {
        let a = KeyListener::register();
        let b = KeyListener::register();
        assert_ne!(a.id(), b.id());
    }
}
