use chrono::{DateTime, TimeZone, Utc};
use timeline_atlas::api::EngineEvent;
use timeline_atlas::core::{EquirectangularProjection, Event, TimeDomain, Viewport};
use timeline_atlas::extensions::ClusterKey;
use timeline_atlas::render::NullRenderer;
use timeline_atlas::{TimelineEngine, TimelineEngineConfig};

fn date(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, month, day, 0, 0, 0).unwrap()
}

fn engine() -> TimelineEngine<NullRenderer> {
    let domain = TimeDomain::new(
        date(1, 1),
        Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(),
    )
    .expect("domain");
    let config = TimelineEngineConfig::new(Viewport::new(1_000, 400), Viewport::new(800, 400))
        .with_domain(domain);
    let mut engine = TimelineEngine::new_at(
        NullRenderer::default(),
        config,
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    )
    .expect("engine");
    engine
        .set_events(vec![
            Event::new(date(3, 1), "paris", 48.9, 2.4).expect("event"),
            Event::new(date(3, 2), "tokyo", 35.7, 139.7).expect("event"),
            Event::new(date(4, 1), "lisbon", 38.7, -9.1).expect("event"),
            Event::new(date(9, 1), "lima", -12.0, -77.0).expect("event"),
        ])
        .expect("events");
    engine.drain_events();
    engine
}

#[test]
fn nearby_clusters_stack_labels() {
    let engine = engine();
    let clusters = engine.timeline_clusters();
    assert_eq!(clusters.len(), 3);
    assert_eq!(clusters[0].count, 2);
    assert_eq!(clusters[0].y_offset, 0.0);
    assert_eq!(clusters[1].y_offset, 20.0);
    assert_eq!(clusters[2].y_offset, 0.0);
}

#[test]
fn hover_reports_only_transitions() {
    let mut engine = engine();
    let first_x = engine.timeline_clusters()[0].centroid_x;
    let key = ClusterKey(date(3, 1));

    let entered = engine.pointer_move(first_x, 200.0).expect("hover enters");
    assert_eq!(entered.previous, None);
    assert_eq!(entered.current, Some(key));
    assert_eq!(engine.hovered_cluster(), Some(key));

    assert!(engine.pointer_move(first_x + 3.0, 201.0).is_none());

    let left = engine.pointer_move(first_x + 40.0, 200.0).expect("hover leaves");
    assert_eq!(left.previous, Some(key));
    assert_eq!(left.current, None);

    assert!(engine.pointer_leave().is_none());

    let hover_events = engine
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, EngineEvent::HoverChanged(_)))
        .count();
    assert_eq!(hover_events, 2);
}

#[test]
fn hover_follows_stacked_label_anchor() {
    let mut engine = engine();
    let stacked_x = engine.timeline_clusters()[1].centroid_x;

    assert!(engine.pointer_move(stacked_x, 200.0).is_none());
    let change = engine.pointer_move(stacked_x, 180.0).expect("hover");
    assert_eq!(change.current, Some(ClusterKey(date(4, 1))));

    let cleared = engine.pointer_leave().expect("leave clears hover");
    assert_eq!(cleared.current, None);
    assert_eq!(engine.hovered_cluster(), None);
}

#[test]
fn map_clusters_are_temporal_until_geography_loads() {
    let mut engine = engine();
    assert!(!engine.geography().is_loaded());
    assert_eq!(engine.map_clusters().len(), 3);

    let projection = EquirectangularProjection::new(Viewport::new(800, 400)).expect("projection");
    engine.load_map_geography(projection).expect("load");

    assert!(engine.geography().is_loaded());
    assert_eq!(engine.timeline_clusters().len(), 3);
    assert_eq!(engine.map_clusters().len(), 4);
    assert!(engine.map_clusters().iter().all(|cluster| cluster.is_singleton()));
    assert!(
        engine
            .drain_events()
            .iter()
            .any(|event| matches!(event, EngineEvent::ClustersRecomputed { map_clusters: 4, .. }))
    );
}

#[test]
fn geography_loads_only_once() {
    let mut engine = engine();
    let projection = EquirectangularProjection::new(Viewport::new(800, 400)).expect("projection");
    engine.load_map_geography(projection).expect("first load");
    assert!(engine.load_map_geography(projection).is_err());
}

#[test]
fn invalid_event_keeps_previous_list() {
    let mut engine = engine();
    let bad = vec![Event {
        date: date(5, 5),
        title: "nowhere".to_owned(),
        lat: 120.0,
        lng: 0.0,
    }];
    assert!(engine.set_events(bad).is_err());
    assert_eq!(engine.events().len(), 4);
}

#[test]
fn navigation_away_clears_stale_hover() {
    let mut engine = engine();
    let first_x = engine.timeline_clusters()[0].centroid_x;
    let key = ClusterKey(date(3, 1));
    engine.pointer_move(first_x, 200.0).expect("hover enters");
    engine.drain_events();

    engine.go_to_date(date(12, 1)).expect("go to date");
    assert!(
        engine
            .timeline_clusters()
            .iter()
            .all(|cluster| cluster.key() != key)
    );
    assert_eq!(engine.hovered_cluster(), None);

    let changes: Vec<_> = engine
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::HoverChanged(change) => Some(change),
            _ => None,
        })
        .collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].previous, Some(key));
    assert_eq!(changes[0].current, None);
}

#[test]
fn recompute_keeps_hover_when_cluster_stays_put() {
    let mut engine = engine();
    let first_x = engine.timeline_clusters()[0].centroid_x;
    engine.pointer_move(first_x, 200.0).expect("hover enters");
    engine.drain_events();

    engine.recompute_clusters().expect("recompute");
    assert_eq!(engine.hovered_cluster(), Some(ClusterKey(date(3, 1))));
    assert!(
        !engine
            .drain_events()
            .iter()
            .any(|event| matches!(event, EngineEvent::HoverChanged(_)))
    );
}

#[test]
fn empty_visible_set_reports_zero_clusters_and_drops_hover() {
    let mut engine = engine();
    let first_x = engine.timeline_clusters()[0].centroid_x;
    engine.pointer_move(first_x, 200.0).expect("hover enters");
    engine.drain_events();

    engine.set_events(Vec::new()).expect("clear events");
    assert!(engine.timeline_clusters().is_empty());
    assert!(engine.map_clusters().is_empty());
    assert_eq!(engine.hovered_cluster(), None);

    let events = engine.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        EngineEvent::ClustersRecomputed {
            timeline_clusters: 0,
            map_clusters: 0
        }
    )));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, EngineEvent::HoverChanged(change) if change.current.is_none()))
    );
}
