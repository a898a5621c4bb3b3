//! WebGPU rendering module
//!
//! Turns a `RenderSnapshot` into flat-colored triangles.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use vertex::Vertex;
