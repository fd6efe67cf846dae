//! Clustering, label stacking and hit testing over projected events.
//!
//! These are pure functions over engine outputs; the engine facade in `api`
//! wires them to the current transform.

pub mod clustering;
pub mod label_layout;

pub use clustering::{
    ClusterKey, ClusterTuning, DEFAULT_SPATIAL_RADIUS_PX, EventCluster, cluster_events,
    cluster_events_within_radius,
};
pub use hit_test::{cluster_key_at, hit_test_clusters};
pub use label_layout::{LabelLayoutTuning, layout_labels};
