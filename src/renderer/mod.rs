//! Software renderer
//!
//! Projects the voxel world, the runner and its companions onto any
//! [`Surface`] with a painter's algorithm. Everything runs on the CPU.

pub mod camera;
pub mod color;
pub mod cube;
pub mod decor;
pub mod figure;
pub mod overlay;
pub mod scene;
pub mod surface;
pub mod vertex;

pub use camera::{Camera, Projected, apply_fog, fog_factor, project};
pub use color::{BlockColors, Color, palette};
pub use scene::{Companion, FrameStats, RenderOptions, SceneRenderer};
pub use surface::Surface;
pub use vertex::{TextLabel, Vertex, VertexBatch};
