//! The frame's color and depth attachments
//!
//! Both the annotation view and the fly-through draw straight to the window
//! surface. The depth buffer is always attached so the flat and the
//! depth-tested pipelines share one pass layout.

use crate::context::WgpuContext;
use crate::core::render_states::ClearState;
use crate::core::texture::DepthTexture;

/// Surface view plus depth buffer for one frame.
pub struct RenderTarget<'a> {
    ctx: &'a WgpuContext,
    color: &'a wgpu::TextureView,
    depth: &'a DepthTexture,
}

impl<'a> RenderTarget<'a> {
    pub fn new(
        ctx: &'a WgpuContext,
        color: &'a wgpu::TextureView,
        depth: &'a DepthTexture,
    ) -> Self {
        Self { ctx, color, depth }
    }

    pub fn context(&self) -> &'a WgpuContext {
        self.ctx
    }

    /// Start a pass that clears both attachments.
    pub fn begin_render_pass<'p>(
        &self,
        encoder: &'p mut wgpu::CommandEncoder,
        label: &str,
        clear: ClearState,
    ) -> wgpu::RenderPass<'p> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color,
                resolve_target: None,
                ops: clear.color_ops(),
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth.view(),
                depth_ops: Some(clear.depth_ops()),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
