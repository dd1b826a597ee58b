use crossterm::event::{KeyCode, KeyEventKind};

use space_survival::input::{InputProvider, Key};
use space_survival::keys::{KeyTracker, HOLD_WINDOW, SHOT_REPEAT_WINDOW};

const SPACE: KeyCode = KeyCode::Char(' ');

fn advance(keys: &mut KeyTracker, frames: u64) {
    for _ in 0..frames {
        keys.next_frame();
    }
}

#[test]
fn space_press_fires_for_one_frame() {
    let mut keys = KeyTracker::default();
    keys.record(SPACE, KeyEventKind::Press);
    assert!(keys.shoot_pressed());
    keys.next_frame();
    assert!(!keys.shoot_pressed());
}

#[test]
fn auto_repeat_press_does_not_fire_again() {
    let mut keys = KeyTracker::default();
    keys.record(SPACE, KeyEventKind::Press);
    advance(&mut keys, SHOT_REPEAT_WINDOW);
    keys.record(SPACE, KeyEventKind::Press);
    assert!(!keys.shoot_pressed());
}

#[test]
fn quick_second_tap_fires_without_release_events() {
    let mut keys = KeyTracker::default();
    keys.record(SPACE, KeyEventKind::Press);
    // Well inside the movement hold window, past the repeat window.
    advance(&mut keys, SHOT_REPEAT_WINDOW + 1);
    assert!(SHOT_REPEAT_WINDOW + 1 < HOLD_WINDOW);
    keys.record(SPACE, KeyEventKind::Press);
    assert!(keys.shoot_pressed());
}

#[test]
fn press_after_release_fires_on_the_next_frame() {
    let mut keys = KeyTracker::default();
    keys.record(SPACE, KeyEventKind::Press);
    keys.record(SPACE, KeyEventKind::Release);
    keys.next_frame();
    keys.record(SPACE, KeyEventKind::Press);
    assert!(keys.shoot_pressed());
}

#[test]
fn repeat_events_never_fire() {
    let mut keys = KeyTracker::default();
    advance(&mut keys, 20);
    keys.record(SPACE, KeyEventKind::Repeat);
    assert!(!keys.shoot_pressed());
}

#[test]
fn direction_expires_after_hold_window() {
    let mut keys = KeyTracker::default();
    keys.record(KeyCode::Left, KeyEventKind::Press);
    advance(&mut keys, HOLD_WINDOW);
    assert!(keys.is_key_held(Key::Left));
    keys.next_frame();
    assert!(!keys.is_key_held(Key::Left));
}

#[test]
fn release_drops_a_direction_at_once() {
    let mut keys = KeyTracker::default();
    keys.record(KeyCode::Char('d'), KeyEventKind::Press);
    assert!(keys.is_key_held(Key::Right));
    keys.record(KeyCode::Char('d'), KeyEventKind::Release);
    assert!(!keys.is_key_held(Key::Right));
    assert!(!keys.is_key_held(Key::Left));
}
