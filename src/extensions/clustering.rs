use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Event, Projection, ScreenPoint, TimeScale};
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_SPATIAL_RADIUS_PX: f64 = 30.0;

/// Zoom-dependent merge distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterTuning {
    /// Floor applied to the temporal threshold at high zoom.
    pub min_threshold_px: f64,
    /// Temporal threshold at `scale_k == 1`; divided by `scale_k` when zooming.
    pub base_threshold_px: f64,
    /// Maximum projected map distance for spatial merging.
    pub spatial_radius_px: f64,
}

impl Default for ClusterTuning {
    fn default() -> Self {
        Self {
            min_threshold_px: 20.0,
            base_threshold_px: 50.0,
            spatial_radius_px: DEFAULT_SPATIAL_RADIUS_PX,
        }
    }
}

impl ClusterTuning {
    pub fn validate(self) -> TimelineResult<Self> {
        for (value, name) in [
            (self.min_threshold_px, "min_threshold_px"),
            (self.base_threshold_px, "base_threshold_px"),
            (self.spatial_radius_px, "spatial_radius_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "cluster tuning `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    /// `max(min_threshold_px, base_threshold_px / scale_k)`.
    #[must_use]
    pub fn threshold_for_scale(self, scale_k: f64) -> f64 {
        self.min_threshold_px.max(self.base_threshold_px / scale_k)
    }
}

/// Display key of a cluster: the date of its first member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterKey(pub DateTime<Utc>);

/// Group of events merged under the active threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCluster {
    /// Members in discovery order; the seed comes first.
    pub events: SmallVec<[Event; 2]>,
    pub centroid_x: f64,
    pub centroid_lat: f64,
    pub centroid_lng: f64,
    pub count: usize,
    pub y_offset: f64,
}

impl EventCluster {
    #[must_use]
    pub fn key(&self) -> ClusterKey {
        ClusterKey(self.events[0].date)
    }

    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.count == 1
    }

    /// Date at the cluster's horizontal centroid under `scale`.
    pub fn centroid_date(&self, scale: TimeScale) -> TimelineResult<DateTime<Utc>> {
        scale.invert_date(self.centroid_x)
    }
}

/// Running mean of an in-progress cluster.
#[derive(Debug)]
struct ClusterAccumulator {
    events: SmallVec<[Event; 2]>,
    centroid_x: f64,
    centroid_lat: f64,
    centroid_lng: f64,
}

impl ClusterAccumulator {
    fn seed(event: &Event, x: f64) -> Self {
        let mut events = SmallVec::new();
        events.push(event.clone());
        Self {
            events,
            centroid_x: x,
            centroid_lat: event.lat,
            centroid_lng: event.lng,
        }
    }

    fn absorb(&mut self, event: &Event, x: f64) {
        let count = self.events.len() as f64;
        self.centroid_x = (self.centroid_x * count + x) / (count + 1.0);
        self.centroid_lat = (self.centroid_lat * count + event.lat) / (count + 1.0);
        self.centroid_lng = (self.centroid_lng * count + event.lng) / (count + 1.0);
        self.events.push(event.clone());
    }

    fn finish(self) -> EventCluster {
        let count = self.events.len();
        EventCluster {
            events: self.events,
            centroid_x: self.centroid_x,
            centroid_lat: self.centroid_lat,
            centroid_lng: self.centroid_lng,
            count,
            y_offset: 0.0,
        }
    }
}

/// Greedy single-pass clustering with the default spatial radius.
///
/// See [`cluster_events_within_radius`].
pub fn cluster_events<E: Borrow<Event>>(
    events: &[E],
    effective: TimeScale,
    threshold_px: f64,
    projection: Option<&dyn Projection>,
) -> TimelineResult<Vec<EventCluster>> {
    cluster_events_within_radius(
        events,
        effective,
        threshold_px,
        projection,
        DEFAULT_SPATIAL_RADIUS_PX,
    )
}

/// Greedy single-pass clustering.
///
/// Each unclaimed event, in input order, seeds a cluster and absorbs every
/// later unclaimed event whose effective x lies strictly within
/// `threshold_px` of the seed. With a projection, the projected map distance
/// to the seed must also be below `spatial_radius_px`. The result depends on
/// input order and is not a globally optimal partition.
pub fn cluster_events_within_radius<E: Borrow<Event>>(
    events: &[E],
    effective: TimeScale,
    threshold_px: f64,
    projection: Option<&dyn Projection>,
    spatial_radius_px: f64,
) -> TimelineResult<Vec<EventCluster>> {
    if !threshold_px.is_finite() || threshold_px <= 0.0 {
        return Err(TimelineError::InvalidThreshold {
            threshold: threshold_px,
        });
    }
    if !spatial_radius_px.is_finite() || spatial_radius_px <= 0.0 {
        return Err(TimelineError::InvalidData(
            "spatial radius must be finite and > 0".to_owned(),
        ));
    }
    if events.is_empty() {
        return Ok(Vec::new());
    }

    let events: Vec<&Event> = events.iter().map(Borrow::<Event>::borrow).collect();
    let xs = project_x(&events, effective);
    let points: Option<Vec<ScreenPoint>> = projection.map(|projection| {
        events
            .iter()
            .map(|event| projection.project_event(event))
            .collect()
    });

    let mut claimed = vec![false; events.len()];
    let mut clusters = Vec::new();

    for seed in 0..events.len() {
        if claimed[seed] {
            continue;
        }
        claimed[seed] = true;
        let mut accumulator = ClusterAccumulator::seed(events[seed], xs[seed]);

        for other in (seed + 1)..events.len() {
            if claimed[other] {
                continue;
            }
            if (xs[seed] - xs[other]).abs() >= threshold_px {
                continue;
            }
            if let Some(points) = points.as_deref() {
                if points[seed].distance_to(points[other]) >= spatial_radius_px {
                    continue;
                }
            }
            accumulator.absorb(events[other], xs[other]);
            claimed[other] = true;
        }

        clusters.push(accumulator.finish());
    }

    Ok(clusters)
}

#[cfg(not(feature = "parallel-projection"))]
fn project_x(events: &[&Event], effective: TimeScale) -> Vec<f64> {
    events
        .iter()
        .map(|event| effective.scale(event.date))
        .collect()
}

#[cfg(feature = "parallel-projection")]
fn project_x(events: &[&Event], effective: TimeScale) -> Vec<f64> {
    use rayon::prelude::*;

    // The serial path wins for small visible sets.
    if events.len() < 4_096 {
        return events
            .iter()
            .map(|event| effective.scale(event.date))
            .collect();
    }
    events
        .par_iter()
        .map(|event| effective.scale(event.date))
        .collect()
}
