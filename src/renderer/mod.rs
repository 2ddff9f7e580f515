//! Rendering
//!
//! [`SceneRenderer`] owns every GPU resource and draws whichever
//! [`Mode`](crate::scene::Mode) is active: the photograph with its
//! annotation overlay, or the textured box under the fly camera.

pub mod box_mesh;
pub mod material;
pub mod overlay;
pub mod viewer;

pub use box_mesh::BoxMesh;
pub use material::TexturedMaterial;
pub use overlay::Overlay;
pub use viewer::{Camera, CameraUniform, Viewer};

use crate::asset::ImageAsset;
use crate::context::WgpuContext;
use crate::coords::Viewport;
use crate::core::{ClearState, RenderTarget, Texture2D};
use crate::scene::{FlyThrough, Mode};

struct BoxPass {
    mesh: BoxMesh,
    material: TexturedMaterial,
}

/// Draws the active scene into a render target.
pub struct SceneRenderer {
    format: wgpu::TextureFormat,
    photo: Texture2D,
    overlay: Overlay,
    box_pass: Option<BoxPass>,
}

impl SceneRenderer {
    pub fn new(
        ctx: &WgpuContext,
        format: wgpu::TextureFormat,
        image: &ImageAsset,
    ) -> anyhow::Result<Self> {
        let photo = Texture2D::from_image(ctx, image);
        let overlay = Overlay::new(ctx, format, &photo)?;
        Ok(Self {
            format,
            photo,
            overlay,
            box_pass: None,
        })
    }

    /// Record and submit one frame.
    pub fn render(
        &mut self,
        target: &RenderTarget<'_>,
        mode: &Mode,
        viewport: Viewport,
        clear_color: [f32; 4],
    ) -> anyhow::Result<()> {
        let ctx = target.context();
        let clear = ClearState::new(clear_color);

        match mode {
            Mode::Annotating(controller) => {
                self.overlay.update(ctx, controller, viewport);

                let mut encoder = ctx.create_encoder(Some("annotation encoder"));
                {
                    let mut pass = target.begin_render_pass(&mut encoder, "annotation pass", clear);
                    self.overlay.draw(&mut pass);
                }
                ctx.submit([encoder.finish()]);
            }
            Mode::FlyingThrough(fly) => {
                let box_pass = self.box_pass(ctx, fly)?;
                box_pass
                    .material
                    .update_uniforms(ctx, &Camera::new(fly.camera, viewport));

                let mut encoder = ctx.create_encoder(Some("fly-through encoder"));
                {
                    let mut pass = target.begin_render_pass(&mut encoder, "box pass", clear);
                    box_pass.material.bind(&mut pass);
                    box_pass.mesh.draw(&mut pass);
                }
                ctx.submit([encoder.finish()]);
            }
        }
        Ok(())
    }

    /// The box is uploaded on the first fly-through frame and never changes.
    fn box_pass(&mut self, ctx: &WgpuContext, fly: &FlyThrough) -> anyhow::Result<&BoxPass> {
        let pass = match self.box_pass.take() {
            Some(pass) => pass,
            None => BoxPass {
                mesh: BoxMesh::new(ctx, &fly.reconstruction.mesh),
                material: TexturedMaterial::new(ctx, self.format, &self.photo)?,
            },
        };
        Ok(self.box_pass.insert(pass))
    }
}
