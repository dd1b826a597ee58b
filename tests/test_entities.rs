mod common;

use glam::Vec2;

use space_survival::entities::*;
use space_survival::events::{Notification, NotificationSink};
use space_survival::input::{InputProvider, Key, TickInput};
use space_survival::snapshot::{snapshot, SpriteKind};

use common::{parked_rock, power_up_at, quiet_state};

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    assert_eq!(Rect::from_center(r.center(), 30.0, 40.0), r);
}

#[test]
fn set_center_keeps_size() {
    let mut r = Rect::new(0.0, 0.0, 10.0, 6.0);
    r.set_center(Vec2::new(100.0, 50.0));
    assert_eq!(r, Rect::new(95.0, 47.0, 10.0, 6.0));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let beside = Rect::new(10.0, 0.0, 10.0, 10.0);
    let below = Rect::new(0.0, 10.0, 10.0, 10.0);
    let inside = Rect::new(2.0, 2.0, 3.0, 3.0);
    let crossing = Rect::new(9.0, 9.0, 10.0, 10.0);

    assert!(!a.overlaps(&beside));
    assert!(!a.overlaps(&below));
    assert!(a.overlaps(&inside));
    assert!(inside.overlaps(&a));
    assert!(a.overlaps(&crossing));
}

#[test]
fn hidden_state_is_reported() {
    let mut player = quiet_state().player;
    assert!(!player.is_hidden());
    player.state = PlayerState::Hidden { since: 5 };
    assert!(player.is_hidden());
}

#[test]
fn state_clone_is_independent() {
    let original = quiet_state();
    let mut cloned = original.clone();
    cloned.player.rect.x = 99.0;
    cloned.score = 999;
    cloned.obstacles.push(parked_rock(1, Vec2::new(5.0, 5.0), 3));

    assert_eq!(original.player.rect.x, 225.0);
    assert_eq!(original.score, 0);
    assert!(original.obstacles.is_empty());
}

#[test]
fn tick_input_answers_key_queries() {
    let input = TickInput { left: true, right: false, shoot: true };
    assert!(input.is_key_held(Key::Left));
    assert!(!input.is_key_held(Key::Right));
    assert!(input.shoot_pressed());
    assert!(!TickInput::idle().shoot_pressed());
}

#[test]
fn vec_collects_notifications_in_order() {
    let mut sink: Vec<Notification> = Vec::new();
    sink.notify(Notification::Shoot);
    sink.notify(Notification::PlayerDeath);
    assert_eq!(sink, vec![Notification::Shoot, Notification::PlayerDeath]);
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[test]
fn snapshot_lists_every_live_entity() {
    let mut s = quiet_state();
    s.obstacles.push(parked_rock(500, Vec2::new(100.0, 100.0), 17));
    s.power_ups
        .push(power_up_at(700, Vec2::new(200.0, 200.0), PowerUpKind::Shield));
    s.effects.push(Effect {
        id: 800,
        kind: EffectKind::Large,
        center: Vec2::new(300.0, 300.0),
        frame: 4,
        last_frame_at: 0,
    });
    s.score = 42;
    s.player.health = 60;

    let snap = snapshot(&s);
    assert_eq!(snap.width, 500.0);
    assert_eq!(snap.height, 600.0);
    assert_eq!(snap.score, 42);
    assert_eq!(snap.health, 60);
    assert_eq!(snap.lives, 3);
    assert_eq!(snap.sprites.len(), 4);

    let kinds: Vec<SpriteKind> = snap.sprites.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&SpriteKind::Obstacle));
    assert!(kinds.contains(&SpriteKind::PowerUp(PowerUpKind::Shield)));
    assert!(kinds.contains(&SpriteKind::Player));
    assert!(kinds.contains(&SpriteKind::Effect {
        kind: EffectKind::Large,
        frame: 4
    }));

    let blast = snap
        .sprites
        .iter()
        .find(|s| matches!(s.kind, SpriteKind::Effect { .. }))
        .unwrap();
    assert_eq!(blast.rect, Rect::from_center(Vec2::new(300.0, 300.0), 75.0, 75.0));
}

#[test]
fn snapshot_leaves_out_a_hidden_ship() {
    let mut s = quiet_state();
    s.player.state = PlayerState::Hidden { since: 0 };
    let snap = snapshot(&s);
    assert!(snap.sprites.iter().all(|s| s.kind != SpriteKind::Player));
}
