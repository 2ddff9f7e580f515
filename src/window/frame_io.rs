//! Frame input/output types
//!
//! Types for passing data to and from the render loop callback.

use crate::context::WgpuContext;
use crate::coords::Viewport;
use crate::core::texture::DepthTexture;
use crate::core::RenderTarget;
use crate::input::Event;

/// Input data for a frame.
pub struct FrameInput<'a> {
    /// Events that occurred since the last frame.
    pub events: Vec<Event>,
    /// Time elapsed since the start of the application in seconds.
    pub elapsed_time: f64,
    /// Time elapsed since the last frame in seconds.
    pub delta_time: f64,
    /// The viewport dimensions.
    pub viewport: Viewport,
    /// The wgpu context.
    pub ctx: &'a WgpuContext,
    /// The surface texture view to render to.
    pub surface_view: &'a wgpu::TextureView,
    /// The depth texture.
    pub depth_texture: &'a DepthTexture,
    /// The surface format.
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> FrameInput<'a> {
    /// The window surface with its depth buffer as a render target.
    pub fn screen_target(&self) -> RenderTarget<'a> {
        RenderTarget::new(self.ctx, self.surface_view, self.depth_texture)
    }
}

/// Output data from a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Whether to exit the application.
    pub exit: bool,
    /// Grab and hide (`true`) or release (`false`) the cursor.
    pub grab_cursor: Option<bool>,
}

impl FrameOutput {
    /// Create a new frame output that doesn't exit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame output that exits the application.
    pub fn exit() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }

    pub fn grab_cursor(mut self, grab: bool) -> Self {
        self.grab_cursor = Some(grab);
        self
    }
}
