//! Annotation overlay
//!
//! The photograph drawn across the whole window, with marker dots and guide
//! lines on top. Everything here lives in normalized device coordinates.

use crate::annotation::{Annotation, AnnotationController, AnnotationState, Status};
use crate::context::WgpuContext;
use crate::coords::{ndc_to_texture, texture_to_ndc, Viewport};
use crate::core::buffer::VertexBuffer;
use crate::core::pipeline::PipelineBuilder;
use crate::core::render_states::{BlendState, CullState, DepthState};
use crate::core::texture::Texture2D;
use crate::core::vertex::{OverlayVertex, VertexPU};
use crate::reconstruct::ray_to_image_edge;
use glam::Vec2;

/// Marker dot radius in pixels.
pub const DOT_RADIUS_PX: f32 = 4.0;

pub const CORNER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const VANISHING_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const GUIDE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
/// Replaces every overlay color after a rejected confirm.
pub const REJECTED_COLOR: [f32; 4] = [1.0, 0.6, 0.0, 1.0];

const DOT_VERTEX_CAPACITY: u32 = 5 * 6;
const GUIDE_VERTEX_CAPACITY: u32 = 8 * 2;

/// Full-window quad; `v = 0` is the top image row.
const IMAGE_QUAD: [VertexPU; 6] = [
    VertexPU::new([-1.0, -1.0, 0.0], [0.0, 1.0]),
    VertexPU::new([1.0, -1.0, 0.0], [1.0, 1.0]),
    VertexPU::new([1.0, 1.0, 0.0], [1.0, 0.0]),
    VertexPU::new([-1.0, -1.0, 0.0], [0.0, 1.0]),
    VertexPU::new([1.0, 1.0, 0.0], [1.0, 0.0]),
    VertexPU::new([-1.0, 1.0, 0.0], [0.0, 0.0]),
];

fn pick(color: [f32; 4], rejected: bool) -> [f32; 4] {
    if rejected {
        REJECTED_COLOR
    } else {
        color
    }
}

/// Two triangles per marker: four rear corners, then the vanishing point.
pub fn dot_vertices(state: &AnnotationState, viewport: Viewport, rejected: bool) -> Vec<OverlayVertex> {
    let extent = viewport.pixels_to_ndc_extent(DOT_RADIUS_PX);
    let corners = state.rect.corners().map(|c| (c, pick(CORNER_COLOR, rejected)));
    let vanishing = (state.vanishing, pick(VANISHING_COLOR, rejected));

    corners
        .into_iter()
        .chain(std::iter::once(vanishing))
        .flat_map(|(screen, color)| {
            let center = viewport.screen_to_ndc(screen);
            let vertex = |lx: f32, ly: f32| {
                let p = center + Vec2::new(lx, ly) * extent;
                OverlayVertex::new(p.to_array(), [lx, ly], color)
            };
            [
                vertex(-1.0, -1.0),
                vertex(1.0, -1.0),
                vertex(1.0, 1.0),
                vertex(-1.0, -1.0),
                vertex(1.0, 1.0),
                vertex(-1.0, 1.0),
            ]
        })
        .collect()
}

/// Line list: the rectangle outline, then a ray from the vanishing point
/// through each corner to the image edge.
pub fn guide_vertices(
    state: &AnnotationState,
    viewport: Viewport,
    rejected: bool,
) -> Vec<OverlayVertex> {
    let color = pick(GUIDE_COLOR, rejected);
    let line = |a: Vec2, b: Vec2| {
        [
            OverlayVertex::new(a.to_array(), [0.0, 0.0], color),
            OverlayVertex::new(b.to_array(), [0.0, 0.0], color),
        ]
    };

    let corners = state.rect.corners().map(|c| viewport.screen_to_ndc(c));
    let markers = Annotation::from_screen(state, viewport).markers();
    let vanishing_ndc = texture_to_ndc(markers.vanishing);

    let mut vertices = Vec::with_capacity(GUIDE_VERTEX_CAPACITY as usize);
    for i in 0..4 {
        vertices.extend(line(corners[i], corners[(i + 1) % 4]));
    }
    for corner in corners {
        let through = ndc_to_texture(corner);
        let end = ray_to_image_edge(markers.vanishing, through);
        vertices.extend(line(vanishing_ndc, texture_to_ndc(end)));
    }
    vertices
}

/// GPU resources for the annotation screen.
pub struct Overlay {
    image_pipeline: wgpu::RenderPipeline,
    image_bind_group: wgpu::BindGroup,
    image_quad: VertexBuffer,
    dot_pipeline: wgpu::RenderPipeline,
    dots: VertexBuffer,
    line_pipeline: wgpu::RenderPipeline,
    lines: VertexBuffer,
}

impl Overlay {
    pub fn new(
        ctx: &WgpuContext,
        format: wgpu::TextureFormat,
        texture: &Texture2D,
    ) -> anyhow::Result<Self> {
        let texture_layout = Texture2D::bind_group_layout(ctx);
        let image_pipeline = PipelineBuilder::new(ctx)
            .label("image pipeline")
            .shader(include_str!("../shaders/image.wgsl"))
            .vertex_layout(VertexPU::layout())
            .bind_group_layout(&texture_layout)
            .color_format(format)
            .depth(DepthState::Ignored)
            .cull(CullState::None)
            .build()?;

        let marker_pipeline = |label: &'static str, topology: wgpu::PrimitiveTopology| {
            PipelineBuilder::new(ctx)
                .label(label)
                .shader(include_str!("../shaders/overlay.wgsl"))
                .vertex_layout(OverlayVertex::layout())
                .color_format(format)
                .depth(DepthState::Ignored)
                .blend(BlendState::Alpha)
                .cull(CullState::None)
                .topology(topology)
                .build()
        };

        Ok(Self {
            image_bind_group: texture.bind_group(ctx, &texture_layout),
            image_pipeline,
            image_quad: VertexBuffer::new(ctx, &IMAGE_QUAD, Some("image quad")),
            dot_pipeline: marker_pipeline("dot pipeline", wgpu::PrimitiveTopology::TriangleList)?,
            dots: VertexBuffer::with_capacity::<OverlayVertex>(
                ctx,
                DOT_VERTEX_CAPACITY,
                Some("dot vertices"),
            ),
            line_pipeline: marker_pipeline("guide pipeline", wgpu::PrimitiveTopology::LineList)?,
            lines: VertexBuffer::with_capacity::<OverlayVertex>(
                ctx,
                GUIDE_VERTEX_CAPACITY,
                Some("guide vertices"),
            ),
        })
    }

    /// Rebuild marker geometry from the controller.
    pub fn update(&mut self, ctx: &WgpuContext, controller: &AnnotationController, viewport: Viewport) {
        let rejected = matches!(controller.status(), Status::Rejected(_));
        let state = controller.state();
        self.dots
            .write(ctx, &dot_vertices(state, viewport, rejected));
        self.lines
            .write(ctx, &guide_vertices(state, viewport, rejected));
    }

    /// Draw the image, then guides, then dots.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.image_pipeline);
        pass.set_bind_group(0, &self.image_bind_group, &[]);
        pass.set_vertex_buffer(0, self.image_quad.slice());
        pass.draw(0..self.image_quad.count(), 0..1);

        pass.set_pipeline(&self.line_pipeline);
        pass.set_vertex_buffer(0, self.lines.slice());
        pass.draw(0..self.lines.count(), 0..1);

        pass.set_pipeline(&self.dot_pipeline);
        pass.set_vertex_buffer(0, self.dots.slice());
        pass.draw(0..self.dots.count(), 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        x: 0,
        y: 0,
        width: 800,
        height: 600,
    };

    #[test]
    fn test_dots_are_centred_on_markers() {
        let state = AnnotationState::centered(VIEWPORT);
        let dots = dot_vertices(&state, VIEWPORT, false);
        assert_eq!(dots.len(), DOT_VERTEX_CAPACITY as usize);

        // Last quad is the vanishing point at the window centre
        let vp = &dots[24..];
        let cx: f32 = vp.iter().map(|v| v.position[0]).sum::<f32>() / 6.0;
        let cy: f32 = vp.iter().map(|v| v.position[1]).sum::<f32>() / 6.0;
        assert!(cx.abs() < 1e-5 && cy.abs() < 1e-5);
        assert!(vp.iter().all(|v| v.color == VANISHING_COLOR));
        assert!(dots[..24].iter().all(|v| v.color == CORNER_COLOR));

        // Radius is in pixels regardless of axis
        let half_width = vp.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((half_width - 2.0 * DOT_RADIUS_PX / 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejected_recolors_everything() {
        let state = AnnotationState::centered(VIEWPORT);
        assert!(dot_vertices(&state, VIEWPORT, true)
            .iter()
            .all(|v| v.color == REJECTED_COLOR));
        assert!(guide_vertices(&state, VIEWPORT, true)
            .iter()
            .all(|v| v.color == REJECTED_COLOR));
    }

    #[test]
    fn test_guides_reach_image_corners_when_centred() {
        let state = AnnotationState::centered(VIEWPORT);
        let guides = guide_vertices(&state, VIEWPORT, false);
        assert_eq!(guides.len(), GUIDE_VERTEX_CAPACITY as usize);

        // Rays through the corners of a centred rectangle end at the
        // window corners
        for pair in guides[8..].chunks(2) {
            assert_eq!(pair[0].position, [0.0, 0.0]);
            let end = pair[1].position;
            assert!((end[0].abs() - 1.0).abs() < 1e-5);
            assert!((end[1].abs() - 1.0).abs() < 1e-5);
        }
    }
}
