//! WebGPU rendering module
//!
//! Each frame is a single triangle list built on the CPU in screen space
//! and drawn with one flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
