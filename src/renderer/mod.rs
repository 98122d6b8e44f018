//! WebGPU rendering module
//!
//! The scene is rebuilt into a clip-space triangle list every frame and drawn
//! back to front with a single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{NodeKind, Scene, SceneNode};
pub use vertex::Vertex;
