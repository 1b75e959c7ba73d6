//! Basalt Render - wgpu renderer for untextured box scenes
//!
//! - `RenderContext` — surface, device, queue, depth buffer
//! - `Camera` — first-person view and projection matrices
//! - `BoxVisual` — the renderable component (box extents + color)
//! - `SceneRenderer` — one Blinn-Phong pipeline, per-frame and per-object
//!   uniforms, draws every entity carrying a `BoxVisual`

mod camera;
mod context;
mod gpu_mesh;
mod primitives;
mod scene_renderer;

pub use camera::Camera;
pub use context::{RenderContext, RenderError};
pub use gpu_mesh::GpuMesh;
pub use primitives::{create_box_mesh, Mesh, Vertex};
pub use scene_renderer::{BoxVisual, SceneRenderer};
