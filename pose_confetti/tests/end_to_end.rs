//! Pose stream → tracker → simulator, driven frame by frame.

use confetti_burst::ConfettiConfig;
use hand_gesture::{ManualClock, Side, Vec2};
use pose_confetti::source::{standing_figure, LEFT_REST, RIGHT_REST};
use pose_confetti::{AppConfig, AppState};

const FPS: f64 = 60.0;

fn app() -> AppState {
    let mut cfg = AppConfig::default();
    cfg.confetti = ConfettiConfig::default().seed(2024);
    AppState::new(&cfg)
}

#[test]
fn still_then_quick_raise_launches_one_left_burst() {
    let mut app = app();
    let mut clock = ManualClock::new();
    let mut step = |app: &mut AppState, left_hand: Vec2| {
        clock.advance(1.0 / FPS);
        app.step(Some(standing_figure(left_hand, RIGHT_REST)), &clock)
    };

    // A second standing still.
    for _ in 0..60 {
        assert!(!step(&mut app, LEFT_REST).any());
    }

    // 0.15 s of raising at 600 px/s: six shoulder widths per second.
    let mut hand = LEFT_REST;
    for _ in 0..9 {
        hand = Vec2::new(hand.x, hand.y - 10.0);
        assert!(!step(&mut app, hand).any());
    }
    let pre_stop = app.tracker().left().position();

    // Stop.
    let events = step(&mut app, hand);
    assert!(events.fired(Side::Left));
    assert!(!events.fired(Side::Right));

    let pool = app.confetti().pool(Side::Left);
    assert_eq!(pool.visible_count(), 1);
    assert_eq!(app.confetti().pool(Side::Right).visible_count(), 0);
    assert_eq!(app.tracker().left().stopped_position(), pre_stop);

    let group = pool.groups().iter().position(|g| g.visible).unwrap();
    for p in pool.arena().group_iter(group) {
        assert!((p.position.x - pre_stop.x).abs() <= 10.0 + 1e-3);
        assert!((p.position.y - pre_stop.y - 10.0).abs() <= 10.0 + 1e-3);
        assert_eq!(p.alpha, 1.0);
    }

    // Holding still afterwards does not fire again.
    for _ in 0..60 {
        assert!(!step(&mut app, hand).any());
    }
    assert_eq!(app.bursts_fired(), 1);
}

#[test]
fn losing_the_body_mid_raise_cancels() {
    let mut app = app();
    let mut clock = ManualClock::new();
    let dt = 1.0 / FPS;

    for _ in 0..30 {
        clock.advance(dt);
        app.step(Some(standing_figure(LEFT_REST, RIGHT_REST)), &clock);
    }
    let mut hand = LEFT_REST;
    for _ in 0..5 {
        hand = Vec2::new(hand.x, hand.y - 10.0);
        clock.advance(dt);
        app.step(Some(standing_figure(hand, RIGHT_REST)), &clock);
    }
    clock.advance(dt);
    assert!(!app.step(None, &clock).any());
    clock.advance(dt);
    assert!(!app.step(Some(standing_figure(hand, RIGHT_REST)), &clock).any());
    assert_eq!(app.confetti().active_bursts(), 0);
}
