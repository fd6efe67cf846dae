use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::types::{Event, ScreenPoint, Viewport};

/// Maps geographic coordinates onto map-container pixels.
pub trait Projection {
    fn project(&self, lng: f64, lat: f64) -> ScreenPoint;

    fn project_event(&self, event: &Event) -> ScreenPoint {
        self.project(event.lng, event.lat)
    }
}

impl<F> Projection for F
where
    F: Fn(f64, f64) -> ScreenPoint,
{
    fn project(&self, lng: f64, lat: f64) -> ScreenPoint {
        self(lng, lat)
    }
}

/// Plate carrée projection stretched over a map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquirectangularProjection {
    viewport: Viewport,
}

impl EquirectangularProjection {
    pub fn new(viewport: Viewport) -> TimelineResult<Self> {
        Ok(Self {
            viewport: viewport.validate()?,
        })
    }
}

impl Projection for EquirectangularProjection {
    fn project(&self, lng: f64, lat: f64) -> ScreenPoint {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        ScreenPoint::new((lng + 180.0) / 360.0 * width, (90.0 - lat) / 180.0 * height)
    }
}

type SharedProjection = Arc<dyn Projection + Send + Sync>;

/// Geography backing the map view.
///
/// Unset until loaded, then immutable for the lifetime of the value.
#[derive(Default)]
pub struct MapGeography {
    projection: OnceLock<SharedProjection>,
}

impl MapGeography {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the projection once; a second load is rejected.
    pub fn load(&self, projection: impl Projection + Send + Sync + 'static) -> TimelineResult<()> {
        self.projection
            .set(Arc::new(projection))
            .map_err(|_| TimelineError::InvalidData("map geography is already loaded".to_owned()))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.projection.get().is_some()
    }

    #[must_use]
    pub fn projection(&self) -> Option<&(dyn Projection + Send + Sync)> {
        self.projection.get().map(|projection| projection.as_ref())
    }
}

impl fmt::Debug for MapGeography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapGeography")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
