use thiserror::Error;

/// Construction-time failures. The engine validates its configuration up
/// front and never starts a frame loop from an invalid state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("point count {got} is too small, need at least 2")]
    PointCountTooSmall { got: usize },

    #[error("no cities configured")]
    NoCities,

    #[error("connection references unknown city {name:?}")]
    UnknownCity { name: String },

    #[error("drawing surface has a zero dimension ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
}
