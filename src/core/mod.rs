pub mod domain;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod time_scale;
pub mod transform;
pub mod types;

pub use domain::TimeDomain;
pub use projection::{EquirectangularProjection, MapGeography, Projection};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use transform::{ScaleExtent, ViewTransform};
pub use types::{Event, ScreenPoint, Viewport};
