use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{TimeDomain, ViewTransform, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::EventCluster;
use crate::render::Renderer;

use super::TimelineEngine;

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Compact view of one cluster for regression snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub key: DateTime<Utc>,
    pub count: usize,
    pub centroid_x: f64,
    pub centroid_lat: f64,
    pub centroid_lng: f64,
    pub y_offset: f64,
}

impl From<&EventCluster> for ClusterSnapshot {
    fn from(cluster: &EventCluster) -> Self {
        Self {
            key: cluster.key().0,
            count: cluster.count,
            centroid_x: cluster.centroid_x,
            centroid_lat: cluster.centroid_lat,
            centroid_lng: cluster.centroid_lng,
            y_offset: cluster.y_offset,
        }
    }
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub map_viewport: Viewport,
    pub domain: TimeDomain,
    pub transform: ViewTransform,
    pub visible_range: (DateTime<Utc>, DateTime<Utc>),
    pub event_count: usize,
    pub timeline_clusters: Vec<ClusterSnapshot>,
    pub map_clusters: Vec<ClusterSnapshot>,
    /// Member titles keyed by `{index}:{first member date}`.
    pub timeline_members: IndexMap<String, Vec<String>>,
    pub pending_recompute: bool,
    pub map_geography_loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn snapshot(&self) -> TimelineResult<EngineSnapshot> {
        let mut timeline_members = IndexMap::new();
        for (index, cluster) in self.timeline_clusters.iter().enumerate() {
            let titles = cluster.events.iter().map(|event| event.title.clone()).collect();
            timeline_members.insert(format!("{index}:{}", cluster.key().0.to_rfc3339()), titles);
        }

        Ok(EngineSnapshot {
            viewport: self.config.viewport,
            map_viewport: self.config.map_viewport,
            domain: self.domain,
            transform: self.transform,
            visible_range: self.visible_range()?,
            event_count: self.events.len(),
            timeline_clusters: self.timeline_clusters.iter().map(ClusterSnapshot::from).collect(),
            map_clusters: self.map_clusters.iter().map(ClusterSnapshot::from).collect(),
            timeline_members,
            pending_recompute: self.scheduler.has_pending(),
            map_geography_loaded: self.geography.is_loaded(),
        })
    }

    pub fn snapshot_json_pretty(&self) -> TimelineResult<String> {
        self.snapshot()?.to_json_contract_v1_pretty()
    }
}
