use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid instant: {0}")]
    InvalidInstant(String),

    #[error("invalid clustering threshold: {threshold} (must be finite and > 0)")]
    InvalidThreshold { threshold: f64 },

    #[error("zoom-to-fit requires at least one target event")]
    EmptyTargetSet,

    #[error("degenerate viewport: width={width}, height={height}")]
    DegenerateViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
