//! Wirecube Core Library - Wireframe geometry, rotation and projection
//!
//! This library holds the platform-independent part of the rotating cube:
//! the fixed geometry, the rotation pipeline, orthographic projection, the
//! edge renderer and the frame loop that drives them against a platform.

pub mod clock;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use clock::{FrameClock, FramePacer};
pub use config::SceneConfig;
pub use frame::{FrameLoop, FrameStats, LoopState, Platform, PlatformEvent};
pub use geometry::{CubeWireframe, Edge, Vertex, Wireframe};
pub use projection::{ProjectedPoint, Projection};
pub use render::{Color, Stroke, Surface, WireframeRenderer};
pub use transform::{RotationAngles, Transform, SPIN_RATE};
