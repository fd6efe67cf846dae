use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::clustering::EventCluster;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelLayoutTuning {
    pub line_height_px: f64,
    /// Two labels closer than this horizontally are stacked.
    pub overlap_px: f64,
    /// Stable-sorts clusters by `centroid_x` before stacking.
    ///
    /// Off by default: the scan then runs in cluster discovery order.
    #[serde(default)]
    pub sort_by_x: bool,
}

impl Default for LabelLayoutTuning {
    fn default() -> Self {
        Self {
            line_height_px: 20.0,
            overlap_px: 100.0,
            sort_by_x: false,
        }
    }
}

impl LabelLayoutTuning {
    pub fn validate(self) -> TimelineResult<Self> {
        for (value, name) in [
            (self.line_height_px, "line_height_px"),
            (self.overlap_px, "overlap_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "label layout `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Assigns vertical label offsets so nearby cluster labels do not overlap.
///
/// Greedy forward scan: each cluster is lifted one line above every earlier
/// cluster within `overlap_px`. Later clusters are never revisited.
pub fn layout_labels(
    mut clusters: Vec<EventCluster>,
    tuning: LabelLayoutTuning,
) -> TimelineResult<Vec<EventCluster>> {
    let tuning = tuning.validate()?;
    if tuning.sort_by_x {
        clusters.sort_by_key(|cluster| OrderedFloat(cluster.centroid_x));
    }

    for index in 0..clusters.len() {
        let x = clusters[index].centroid_x;
        if !x.is_finite() {
            return Err(TimelineError::InvalidData(
                "cluster centroid must be finite".to_owned(),
            ));
        }
        let mut offset = clusters[index].y_offset;
        for earlier in &clusters[..index] {
            if (x - earlier.centroid_x).abs() < tuning.overlap_px {
                offset = offset.max(earlier.y_offset + tuning.line_height_px);
            }
        }
        clusters[index].y_offset = offset;
    }

    Ok(clusters)
}
