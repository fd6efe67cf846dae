use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use timeline_atlas::api::{
    FitTuning, fit_transform, fit_transform_unconstrained, go_to_date_transform, reset_transform,
};
use timeline_atlas::core::{Event, TimeDomain, TimeScale, ViewTransform, Viewport};
use timeline_atlas::error::TimelineError;
use timeline_atlas::render::NullRenderer;
use timeline_atlas::{TimelineEngine, TimelineEngineConfig};

const WIDTH: f64 = 1_200.0;

fn twentieth_century() -> (TimeDomain, TimeScale) {
    let domain = TimeDomain::new(
        Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
    )
    .expect("domain");
    (domain, TimeScale::new(domain, 0.0, WIDTH).expect("scale"))
}

fn event_days_after_1900(days: i64, title: &str) -> Event {
    Event::new(
        Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap() + Duration::days(days),
        title,
        0.0,
        0.0,
    )
    .expect("event")
}

proptest! {
    #[test]
    fn fit_maps_target_center_to_viewport_center(
        first_day in 400i64..36_000,
        second_day in 400i64..36_000,
    ) {
        let (_, base) = twentieth_century();
        let targets = vec![
            event_days_after_1900(first_day, "first"),
            event_days_after_1900(second_day, "second"),
        ];
        let transform =
            fit_transform_unconstrained(&targets, base, WIDTH, FitTuning::default())
                .expect("fit");

        let center_ms = (targets[0].millis() + targets[1].millis()) / 2.0;
        let center_px = transform.apply_x(base.scale_millis(center_ms).expect("center px"));
        prop_assert!((center_px - WIDTH / 2.0).abs() <= 1e-6);
    }

    #[test]
    fn fit_window_covers_every_target(
        first_day in 0i64..36_500,
        spread_days in 0i64..16_000,
    ) {
        let (domain, base) = twentieth_century();
        let second_day = (first_day + spread_days).min(36_500);
        let targets = vec![
            event_days_after_1900(first_day, "first"),
            event_days_after_1900(second_day, "second"),
        ];
        let transform =
            fit_transform(&targets, domain, base, WIDTH, FitTuning::default()).expect("fit");

        let start = transform.date_millis_at(base, 0.0).expect("start");
        let end = transform.date_millis_at(base, WIDTH).expect("end");
        for target in &targets {
            prop_assert!(target.millis() >= start - 1.0);
            prop_assert!(target.millis() <= end + 1.0);
        }
        prop_assert!(start >= domain.min_millis() - 1.0);
        prop_assert!(end <= domain.max_millis() + 1.0);
    }
}

#[test]
fn fit_near_domain_start_is_pinned_to_domain_min() {
    let (domain, base) = twentieth_century();
    let targets = vec![event_days_after_1900(9, "early")];
    let unconstrained =
        fit_transform_unconstrained(&targets, base, WIDTH, FitTuning::default()).expect("raw");
    assert!(unconstrained.date_millis_at(base, 0.0).expect("raw start") < domain.min_millis());

    let transform =
        fit_transform(&targets, domain, base, WIDTH, FitTuning::default()).expect("fit");
    let start = transform.date_millis_at(base, 0.0).expect("start");
    assert!((start - domain.min_millis()).abs() <= 1.0);
    assert_eq!(transform.scale_k, unconstrained.scale_k);
}

#[test]
fn empty_target_set_is_rejected() {
    let (domain, base) = twentieth_century();
    let targets: Vec<Event> = Vec::new();
    let err = fit_transform(&targets, domain, base, WIDTH, FitTuning::default())
        .expect_err("empty targets");
    assert!(matches!(err, TimelineError::EmptyTargetSet));
}

#[test]
fn reset_is_identity_when_base_spans_domain() {
    let (domain, base) = twentieth_century();
    let transform = reset_transform(domain, base, WIDTH).expect("reset");
    assert_eq!(transform, ViewTransform::identity());
}

#[test]
fn go_to_date_centers_the_date() {
    let (_, base) = twentieth_century();
    let date = Utc.with_ymd_and_hms(1950, 3, 15, 0, 0, 0).unwrap();
    let transform =
        go_to_date_transform(date, base, WIDTH, FitTuning::default()).expect("go to date");
    let center_px = transform.apply_x(base.scale(date));
    assert!((center_px - WIDTH / 2.0).abs() <= 1e-6);
}

#[test]
fn zoom_to_single_event_frames_sixty_days_around_it() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let config = TimelineEngineConfig::new(Viewport::new(1_200, 400), Viewport::new(800, 400));
    let mut engine = TimelineEngine::new_at(NullRenderer::default(), config, now).expect("engine");

    let event = Event::new(
        Utc.with_ymd_and_hms(1850, 6, 15, 0, 0, 0).unwrap(),
        "treaty",
        48.2,
        16.4,
    )
    .expect("event");
    engine.zoom_to_events(std::slice::from_ref(&event)).expect("zoom");

    let (start, end) = engine.visible_range().expect("visible range");
    let span = end - start;
    assert!(span >= Duration::days(60) - Duration::seconds(1));
    assert!(span <= Duration::days(60) + Duration::seconds(1));

    let midpoint = start + span / 2;
    assert!((midpoint - event.date).num_milliseconds().abs() <= 1_000);
    assert!(!engine.has_pending_recompute());
}
