use super::*;
use crate::input::Intent;

#[test]
fn arrows_and_space_navigate() {
    let now = Instant::now();
    let mut c = controller(4);
    c.handle_events(&[press(egui::Key::ArrowRight)], now);
    assert_eq!(c.current(), 1);
    c.handle_events(&[press(egui::Key::Space), press(egui::Key::Space)], now);
    assert_eq!(c.current(), 3);
    c.handle_events(&[press(egui::Key::ArrowLeft)], now);
    assert_eq!(c.current(), 2);
}

#[test]
fn home_and_end_jump() {
    let now = Instant::now();
    let mut c = controller(6);
    c.handle_events(&[press(egui::Key::End)], now);
    assert_eq!(c.current(), 5);
    c.handle_events(&[press(egui::Key::Home)], now);
    assert_eq!(c.current(), 0);
}

#[test]
fn window_intents_are_returned() {
    let now = Instant::now();
    let mut c = controller(2);
    let intents = c.handle_events(
        &[
            press(egui::Key::F),
            press(egui::Key::ArrowRight),
            press(egui::Key::Q),
        ],
        now,
    );
    assert_eq!(intents, vec![Intent::ToggleFullscreen, Intent::Quit]);
    assert_eq!(c.current(), 1);
}

#[test]
fn keyboard_print_shortcut() {
    let now = Instant::now();
    let mut c = controller(2);
    let print = egui::Event::Key {
        key: egui::Key::P,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::COMMAND,
    };
    c.handle_events(&[print], now);
    assert_eq!(c.phase(), PrintPhase::Preparing);
}

#[test]
fn keys_inert_during_print() {
    let t0 = Instant::now();
    let mut c = controller(4);
    c.go_to_slide(1);
    c.request_print(t0);

    let keys = [
        press(egui::Key::ArrowRight),
        press(egui::Key::Space),
        press(egui::Key::ArrowLeft),
        press(egui::Key::End),
        press(egui::Key::Q),
    ];
    let mut now = t0;
    while c.phase() != PrintPhase::Idle {
        assert!(c.handle_events(&keys, now).is_empty());
        assert_eq!(c.current(), 1);
        now += ms(700);
        c.tick(now);
    }
    c.handle_events(&[press(egui::Key::ArrowRight)], now);
    assert_eq!(c.current(), 2);
}

#[test]
fn torn_down_controller_ignores_keys() {
    let mut c = controller(3);
    c.teardown();
    let intents = c.handle_events(
        &[press(egui::Key::ArrowRight), press(egui::Key::Q)],
        Instant::now(),
    );
    assert!(intents.is_empty());
    assert_eq!(c.current(), 0);
}

#[test]
fn each_controller_owns_one_listener() {
    let a = controller(2);
    let b = controller(2);
    let a_id = a.keys.as_ref().map(|k| k.id());
    let b_id = b.keys.as_ref().map(|k| k.id());
    assert!(a_id.is_some());
    assert_ne!(a_id, b_id);
}
