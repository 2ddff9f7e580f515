//! Textured material for the reconstructed box

use crate::context::WgpuContext;
use crate::core::buffer::UniformBuffer;
use crate::core::pipeline::PipelineBuilder;
use crate::core::render_states::{CullState, DepthState};
use crate::core::texture::Texture2D;
use crate::core::vertex::VertexPU;
use crate::renderer::viewer::{CameraUniform, Viewer};
use bytemuck::Zeroable;

/// Samples the photograph at per-vertex texture coordinates under a camera.
///
/// Bind groups: 0 camera, 1 texture and sampler.
pub struct TexturedMaterial {
    pipeline: wgpu::RenderPipeline,
    camera: UniformBuffer<CameraUniform>,
    texture_bind_group: wgpu::BindGroup,
}

impl TexturedMaterial {
    pub fn new(
        ctx: &WgpuContext,
        format: wgpu::TextureFormat,
        texture: &Texture2D,
    ) -> anyhow::Result<Self> {
        let shader = include_str!("../shaders/textured.wgsl");

        let camera = UniformBuffer::new(
            ctx,
            &CameraUniform::zeroed(),
            0,
            Some("textured camera uniform"),
        );
        let texture_layout = Texture2D::bind_group_layout(ctx);
        let texture_bind_group = texture.bind_group(ctx, &texture_layout);

        let pipeline = PipelineBuilder::new(ctx)
            .label("textured material pipeline")
            .shader(shader)
            .vertex_layout(VertexPU::layout())
            .bind_group_layout(camera.bind_group_layout())
            .bind_group_layout(&texture_layout)
            .color_format(format)
            .depth(DepthState::Tested)
            .cull(CullState::Back)
            .build()?;

        Ok(Self {
            pipeline,
            camera,
            texture_bind_group,
        })
    }

    /// Upload the camera for the coming draw.
    pub fn update_uniforms(&self, ctx: &WgpuContext, viewer: &dyn Viewer) {
        self.camera.update(ctx, &CameraUniform::from_viewer(viewer));
    }

    /// Set the pipeline and both bind groups on `pass`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.camera.bind_group(), &[]);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);
    }
}
