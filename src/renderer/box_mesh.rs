//! GPU copy of the reconstructed box

use crate::context::WgpuContext;
use crate::core::buffer::{IndexBuffer, VertexBuffer};
use crate::core::vertex::VertexPU;
use crate::reconstruct::ReconstructedBox;

/// Vertex and index buffers for a [`ReconstructedBox`], uploaded once.
pub struct BoxMesh {
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
}

impl BoxMesh {
    pub fn new(ctx: &WgpuContext, mesh: &ReconstructedBox) -> Self {
        let vertices: Vec<VertexPU> = mesh.vertices.iter().copied().map(VertexPU::from).collect();
        let indices = mesh.indices();

        tracing::debug!(
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "uploading box mesh"
        );

        Self {
            vertex_buffer: VertexBuffer::new(ctx, &vertices, Some("box vertices")),
            index_buffer: IndexBuffer::new(ctx, &indices, Some("box indices")),
        }
    }

    /// Draw with whatever material is bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice());
        pass.set_index_buffer(self.index_buffer.slice(), IndexBuffer::FORMAT);
        pass.draw_indexed(0..self.index_buffer.count(), 0, 0..1);
    }
}
