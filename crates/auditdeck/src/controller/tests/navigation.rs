use super::*;

#[test]
fn next_twice_then_clamps_at_end() {
    let mut c = controller(3);
    assert_eq!(c.current(), 0);
    c.go_to_next();
    c.go_to_next();
    assert_eq!(c.current(), 2);
    c.go_to_next();
    assert_eq!(c.current(), 2);
}

#[test]
fn previous_clamps_at_start() {
    let mut c = controller(3);
    c.go_to_previous();
    assert_eq!(c.current(), 0);
    c.go_to_slide(2);
    c.go_to_previous();
    c.go_to_previous();
    c.go_to_previous();
    assert_eq!(c.current(), 0);
}

#[test]
fn go_to_slide_clamps_any_integer() {
    let mut c = controller(5);
    for (requested, expected) in [
        (3, 3),
        (-1, 0),
        (-1000, 0),
        (5, 4),
        (99, 4),
        (isize::MAX, 4),
        (isize::MIN, 0),
        (0, 0),
    ] {
        c.go_to_slide(requested);
        assert_eq!(c.current(), expected, "go_to_slide({requested})");
    }
}

#[test]
fn mixed_walk_stays_in_range() {
    // Deterministic pseudo-random walk over several deck sizes.
    let mut seed: u32 = 0x2545_F491;
    for len in 1..=6 {
        let mut c = controller(len);
        for _ in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 2 == 0 {
                c.go_to_next();
            } else {
                c.go_to_previous();
            }
            assert!(c.current() < len);
        }
    }
}

#[test]
fn single_slide_deck_is_inert() {
    let mut c = controller(1);
    c.go_to_next();
    c.go_to_previous();
    c.go_to_last();
    assert_eq!(c.current(), 0);
    assert!(!c.can_go_next());
    assert!(!c.can_go_previous());
}

#[test]
fn boundary_buttons_follow_focus() {
    let mut c = controller(3);
    assert!(!c.can_go_previous());
    assert!(c.can_go_next());
    c.go_to_next();
    assert!(c.can_go_previous());
    assert!(c.can_go_next());
    c.go_to_last();
    assert!(c.can_go_previous());
    assert!(!c.can_go_next());
}

#[test]
fn idle_visibility_is_focus_only() {
    let mut c = controller(4);
    assert_visible(&c, &[true, false, false, false]);
    c.go_to_slide(2);
    assert_visible(&c, &[false, false, true, false]);
    assert!(!c.is_visible(4));
}
