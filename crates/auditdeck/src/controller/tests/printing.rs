use super::*;
use crate::print::PrintEvent;

#[test]
fn print_shows_every_slide_then_restores_focus() {
    let t0 = Instant::now();
    let mut c = controller(3);
    c.go_to_slide(1);

    assert!(c.request_print(t0));
    assert_eq!(c.phase(), PrintPhase::Preparing);
    assert_visible(&c, &[true, true, true]);

    run_to_idle(&mut c, t0);
    assert_eq!(c.phase(), PrintPhase::Idle);
    assert_eq!(c.current(), 1);
    assert_visible(&c, &[false, true, false]);
}

#[test]
fn every_phase_keeps_all_slides_visible() {
    let t0 = Instant::now();
    let mut c = controller(4);
    c.request_print(t0);

    let mut now = t0;
    let mut seen = Vec::new();
    while c.phase() != PrintPhase::Idle {
        seen.push(c.phase());
        assert_visible(&c, &[true, true, true, true]);
        now += ms(2_000);
        c.tick(now);
    }
    assert_eq!(
        seen,
        vec![
            PrintPhase::Preparing,
            PrintPhase::Rendering,
            PrintPhase::Printing
        ]
    );
}

#[test]
fn events_arrive_in_order() {
    let t0 = Instant::now();
    let mut c = controller(2);
    c.request_print(t0);
    assert!(c.shows_overlay());

    let t1 = t0 + ms(1_500);
    assert_eq!(c.tick(t1), Some(PrintEvent::OverlayLifted));
    assert!(!c.shows_overlay());

    let t2 = t1 + ms(100);
    assert_eq!(c.tick(t2), Some(PrintEvent::Invoke));

    assert_eq!(c.tick(t2 + ms(500)), Some(PrintEvent::Finished));
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn double_request_runs_one_cycle() {
    let t0 = Instant::now();
    let mut c = controller(3);
    assert!(c.request_print(t0));
    assert!(!c.request_print(t0 + ms(1)));

    let mut now = t0;
    let mut invokes = 0;
    let mut finishes = 0;
    for _ in 0..20 {
        now += ms(250);
        match c.tick(now) {
            Some(PrintEvent::Invoke) => invokes += 1,
            Some(PrintEvent::Finished) => finishes += 1,
            _ => {}
        }
        if c.phase() == PrintPhase::Idle {
            break;
        }
        // A second trigger mid-cycle is dropped too.
        assert!(!c.request_print(now));
    }
    assert_eq!(invokes, 1);
    assert_eq!(finishes, 1);
    assert_eq!(c.completed_prints(), 1);
}

#[test]
fn navigation_ignored_while_printing() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(2);
    c.request_print(t0);

    let mut now = t0;
    while c.phase() != PrintPhase::Idle {
        let before = c.current();
        c.go_to_next();
        c.go_to_previous();
        c.go_to_slide(0);
        c.go_to_last();
        assert_eq!(c.current(), before);
        now += ms(1_000);
        c.tick(now);
    }
    assert_eq!(c.current(), 2);

    c.go_to_next();
    assert_eq!(c.current(), 3);
}

#[test]
fn teardown_mid_preparing_stops_the_sequence() {
    let t0 = Instant::now();
    let mut c = controller(3);
    c.request_print(t0);
    c.tick(t0 + ms(200));
    assert_eq!(c.phase(), PrintPhase::Preparing);

    c.teardown();
    assert!(!c.is_live());
    assert_eq!(c.next_deadline(), None);
    for step in 1..10 {
        assert_eq!(c.tick(t0 + ms(step * 1_000)), None);
    }
    assert_eq!(c.phase(), PrintPhase::Preparing);
    assert_eq!(c.completed_prints(), 0);
}

#[test]
fn teardown_is_idempotent_and_blocks_new_prints() {
    let mut c = controller(3);
    c.teardown();
    c.teardown();
    assert!(!c.request_print(Instant::now()));
    assert_eq!(c.phase(), PrintPhase::Idle);
}

#[test]
fn second_cycle_after_first_completes() {
    let t0 = Instant::now();
    let mut c = controller(2);
    c.request_print(t0);
    let done = run_to_idle(&mut c, t0);
    assert!(c.request_print(done));
    run_to_idle(&mut c, done);
    assert_eq!(c.completed_prints(), 2);
}
