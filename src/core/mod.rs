//! Core rendering abstractions
//!
//! Mid-level wrappers over the wgpu primitives the renderer needs.

pub mod buffer;
pub mod pipeline;
pub mod render_states;
pub mod render_target;
pub mod texture;
pub mod vertex;

pub use buffer::{IndexBuffer, UniformBuffer, VertexBuffer};
pub use pipeline::PipelineBuilder;
pub use render_states::{BlendState, ClearState, CullState, DepthState};
pub use render_target::RenderTarget;
pub use texture::{DepthTexture, Texture2D};
pub use vertex::{OverlayVertex, VertexPU};
