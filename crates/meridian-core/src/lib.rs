pub mod arcs;
pub mod camera;
pub mod constants;
pub mod deform;
pub mod engine;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod labels;
pub mod markers;
pub mod scene;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use arcs::{ArcPhase, FlightArc};
pub use camera::{Camera, OrbitCamera, PointerState};
pub use deform::SurfaceWaves;
pub use engine::{GlobeConfig, GlobeEngine, RunHandle};
pub use error::EngineError;
pub use geometry::PointCloud;
pub use labels::{LabelFrame, LabelPlacement};
pub use markers::{City, CityMarker};
pub use scene::{Node, NodeId, NodeKind, Scene};
