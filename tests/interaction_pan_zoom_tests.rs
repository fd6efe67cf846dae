use std::time::Instant;

use chrono::{DateTime, TimeZone, Utc};
use timeline_atlas::api::EngineEvent;
use timeline_atlas::core::{ViewTransform, Viewport};
use timeline_atlas::render::NullRenderer;
use timeline_atlas::{TimelineEngine, TimelineEngineConfig};

const WIDTH: f64 = 1_000.0;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn engine() -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(Viewport::new(1_000, 300), Viewport::new(800, 400));
    TimelineEngine::new_at(NullRenderer::default(), config, now()).expect("engine")
}

fn visible_start_ms(engine: &TimelineEngine<NullRenderer>) -> f64 {
    engine
        .transform()
        .date_millis_at(engine.base_scale(), 0.0)
        .expect("visible start")
}

#[test]
fn engine_starts_at_identity_over_history() {
    let engine = engine();
    assert_eq!(engine.transform(), ViewTransform::identity());
    assert_eq!(
        engine.domain().min(),
        Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(engine.domain().max(), now());
}

#[test]
fn panning_before_year_one_is_pinned_to_domain_start() {
    let mut engine = engine();
    let t0 = Instant::now();

    // 2^(500 * 0.002) doubles the scale around the left edge.
    engine.wheel_zoom(-500.0, 0.0, t0).expect("zoom");
    assert!((engine.transform().scale_k - 2.0).abs() < 1e-12);

    engine.pan_start();
    engine.pan_by_pixels(500.0, t0).expect("pan");
    engine.pan_end();

    let min_ms = engine.domain().min_millis();
    assert!((visible_start_ms(&engine) - min_ms).abs() <= 1.0);
    let (start, _) = engine.visible_range().expect("visible range");
    assert_eq!(start, engine.domain().min());
    assert!((engine.transform().scale_k - 2.0).abs() < 1e-12);
}

#[test]
fn panning_past_now_is_pinned_to_domain_end() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.wheel_zoom(-1_000.0, WIDTH, t0).expect("zoom");
    engine.pan_by_pixels(-2_000.0, t0).expect("pan");

    let end_ms = engine
        .transform()
        .date_millis_at(engine.base_scale(), WIDTH)
        .expect("visible end");
    assert!((end_ms - engine.domain().max_millis()).abs() <= 1.0);
}

#[test]
fn wheel_zoom_keeps_the_date_under_the_pointer() {
    let mut engine = engine();
    let pointer_x = 400.0;
    let before = engine
        .transform()
        .date_millis_at(engine.base_scale(), pointer_x)
        .expect("before");

    engine
        .wheel_zoom(-300.0, pointer_x, Instant::now())
        .expect("zoom");
    let after = engine
        .transform()
        .date_millis_at(engine.base_scale(), pointer_x)
        .expect("after");

    assert!(engine.transform().scale_k > 1.0);
    assert!((after - before).abs() <= 1.0);
}

#[test]
fn zooming_out_past_the_extent_clamps_to_one() {
    let mut engine = engine();
    engine
        .wheel_zoom(500.0, 250.0, Instant::now())
        .expect("zoom out");
    assert_eq!(engine.transform(), ViewTransform::identity());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn zero_deltas_are_ignored() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.pan_by_pixels(0.0, t0).expect("pan");
    engine.wheel_zoom(0.0, 100.0, t0).expect("zoom");
    assert!(!engine.has_pending_recompute());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn non_finite_deltas_are_rejected() {
    let mut engine = engine();
    let t0 = Instant::now();
    assert!(engine.pan_by_pixels(f64::NAN, t0).is_err());
    assert!(engine.wheel_zoom(f64::INFINITY, 100.0, t0).is_err());
    assert_eq!(engine.transform(), ViewTransform::identity());
}

#[test]
fn go_to_date_near_year_one_pins_left_edge() {
    let mut engine = engine();
    engine
        .go_to_date(Utc.with_ymd_and_hms(1, 3, 1, 0, 0, 0).unwrap())
        .expect("go to date");

    assert!(engine.transform().scale_k > 1.0);
    let (start, end) = engine.visible_range().expect("visible range");
    assert_eq!(start, engine.domain().min());
    assert!(end > Utc.with_ymd_and_hms(1, 3, 1, 0, 0, 0).unwrap());
}

#[test]
fn go_to_date_frames_a_year_around_the_date() {
    let mut engine = engine();
    let date = Utc.with_ymd_and_hms(1815, 6, 18, 0, 0, 0).unwrap();
    engine.go_to_date(date).expect("go to date");

    let (start, end) = engine.visible_range().expect("visible range");
    let drift = (end - start) - chrono::Duration::days(365);
    assert!(drift.num_seconds().abs() <= 1);
    let midpoint = start + (end - start) / 2;
    assert!((midpoint - date).num_days().abs() <= 1);

    let events = engine.drain_events();
    assert!(matches!(events[0], EngineEvent::TransformChanged { .. }));
    assert!(matches!(events[1], EngineEvent::ClustersRecomputed { .. }));
}

#[test]
fn reset_zoom_returns_to_identity() {
    let mut engine = engine();
    engine
        .go_to_date(Utc.with_ymd_and_hms(1492, 10, 12, 0, 0, 0).unwrap())
        .expect("go to date");
    assert_ne!(engine.transform(), ViewTransform::identity());

    engine.reset_zoom().expect("reset");
    assert_eq!(engine.transform(), ViewTransform::identity());
}

#[test]
fn pan_mode_follows_drag_lifecycle() {
    use timeline_atlas::interaction::InteractionMode;

    let mut engine = engine();
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    engine.pan_start();
    assert_eq!(engine.interaction_mode(), InteractionMode::Panning);
    engine.pan_end();
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}
