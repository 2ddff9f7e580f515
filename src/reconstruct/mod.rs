//! Box reconstruction from a single annotated image
//!
//! Given the rear wall rectangle and vanishing point in texture space, the
//! image aspect ratio and a vertical field of view, build an open box whose
//! walls are textured with the matching parts of the image, plus the camera
//! pose from which the box looks like the photograph.
//!
//! The rear wall is fixed at [`ReconstructConfig::rear_height`] world units
//! tall; everything else scales from it.

mod geometry;
mod pose;
mod texture;

pub use geometry::{box_positions, BOX_TRIANGLES};
pub use texture::{ray_to_image_edge, texture_coords};

use crate::camera::CameraPose;
use crate::error::GeometryError;
use geometry::{is_rear, REAR_CORNER_OF};
use glam::{Vec2, Vec3};

/// Default rear wall height in world units.
pub const REAR_H: f32 = 20.0;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEG: f32 = 54.0;

/// Rear wall and vanishing point in texture space (`[0, 1]`, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Markers {
    pub top_left: Vec2,
    pub bot_right: Vec2,
    pub vanishing: Vec2,
}

impl Markers {
    pub fn bot_left(&self) -> Vec2 {
        Vec2::new(self.top_left.x, self.bot_right.y)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.bot_right.x, self.top_left.y)
    }

    /// Check the preconditions every formula downstream divides by.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.top_left.is_finite() && self.bot_right.is_finite() && self.vanishing.is_finite())
        {
            return Err(GeometryError::NonFinite);
        }

        let width = self.bot_right.x - self.top_left.x;
        let height = self.top_left.y - self.bot_right.y;
        if width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::DegenerateRectangle { width, height });
        }

        // Walls are cut from the image between the rear wall and the border
        for corner in [self.top_left, self.bot_right] {
            if corner.cmplt(Vec2::ZERO).any() || corner.cmpgt(Vec2::ONE).any() {
                return Err(GeometryError::RectangleOutsideImage {
                    x: corner.x,
                    y: corner.y,
                });
            }
        }

        let vp = self.vanishing;
        let inside = self.top_left.x < vp.x
            && vp.x < self.bot_right.x
            && self.bot_right.y < vp.y
            && vp.y < self.top_left.y;
        if !inside {
            return Err(GeometryError::VanishingPointOutside { x: vp.x, y: vp.y });
        }
        Ok(())
    }
}

/// How far the open side of the box reaches toward the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// Each open-side vertex sits at the depth where the camera sees it at
    /// its image-border texture coordinate.
    #[default]
    Perspective,
    /// Every open-side vertex at a depth equal to the rear wall width.
    Constant,
}

/// Reconstruction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructConfig {
    /// Rear wall height in world units.
    pub rear_height: f32,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub depth: DepthMode,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            rear_height: REAR_H,
            fov_deg: DEFAULT_FOV_DEG,
            depth: DepthMode::default(),
        }
    }
}

impl ReconstructConfig {
    pub fn fov(mut self, fov_deg: f32) -> Self {
        self.fov_deg = fov_deg;
        self
    }

    pub fn depth(mut self, depth: DepthMode) -> Self {
        self.depth = depth;
        self
    }
}

/// One box vertex: position in world units, texture coordinate y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

/// Twelve textured vertices over the fixed [`BOX_TRIANGLES`] topology.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedBox {
    pub vertices: [BoxVertex; 12],
}

impl ReconstructedBox {
    pub fn triangles(&self) -> &'static [[u32; 3]; 10] {
        &BOX_TRIANGLES
    }

    /// Flattened index list.
    pub fn indices(&self) -> Vec<u32> {
        BOX_TRIANGLES.iter().flatten().copied().collect()
    }
}

/// Output of [`reconstruct`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub mesh: ReconstructedBox,
    pub camera: CameraPose,
}

/// Markers scaled into view space, where x and y distances are comparable.
pub(crate) struct ViewFrame {
    top_left: Vec2,
    bot_right: Vec2,
    vanishing: Vec2,
    /// World units.
    pub(crate) rear_width: f32,
    /// World units.
    pub(crate) rear_height: f32,
}

impl ViewFrame {
    fn new(markers: &Markers, aspect: f32, rear_height: f32) -> Self {
        let scale = Vec2::new(aspect, 1.0);
        let top_left = markers.top_left * scale;
        let bot_right = markers.bot_right * scale;
        let rear_aspect = (bot_right.x - top_left.x) / (top_left.y - bot_right.y);

        Self {
            top_left,
            bot_right,
            vanishing: markers.vanishing * scale,
            rear_width: rear_height * rear_aspect,
            rear_height,
        }
    }

    /// Vanishing point as a fraction of the rear wall, from its bottom-left.
    pub(crate) fn vanishing_relative(&self) -> Vec2 {
        let size = Vec2::new(
            self.bot_right.x - self.top_left.x,
            self.top_left.y - self.bot_right.y,
        );
        (self.vanishing - Vec2::new(self.top_left.x, self.bot_right.y)) / size
    }
}

/// Build the textured box and initial camera pose.
pub fn reconstruct(
    markers: &Markers,
    aspect: f32,
    config: &ReconstructConfig,
) -> Result<Reconstruction, GeometryError> {
    markers.validate()?;
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(GeometryError::InvalidAspect(aspect));
    }
    if !(config.fov_deg > 0.0 && config.fov_deg < 180.0) {
        return Err(GeometryError::InvalidFov(config.fov_deg));
    }

    let frame = ViewFrame::new(markers, aspect, config.rear_height);
    let camera = pose::camera_pose(&frame, config.fov_deg)?;
    let uv = texture_coords(markers);

    let depths: [f32; 12] = match config.depth {
        DepthMode::Constant => [frame.rear_width; 12],
        DepthMode::Perspective => {
            let vp = frame.vanishing;
            let scale = Vec2::new(aspect, 1.0);
            std::array::from_fn(|i| {
                if is_rear(i) {
                    return 0.0;
                }
                // Image distance from the vanishing point is inversely
                // proportional to distance from the camera along the ray.
                let rear = (uv[REAR_CORNER_OF[i]] * scale).distance(vp);
                let open = (uv[i] * scale).distance(vp);
                (camera.position.z * (1.0 - rear / open)).max(0.0)
            })
        }
    };

    let positions = box_positions(frame.rear_width, frame.rear_height, &depths);
    let vertices = std::array::from_fn(|i| BoxVertex {
        position: positions[i],
        uv: uv[i],
    });

    tracing::info!(
        rear_width = frame.rear_width,
        rear_height = frame.rear_height,
        depth = ?config.depth,
        "reconstructed box"
    );

    Ok(Reconstruction {
        mesh: ReconstructedBox { vertices },
        camera,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotation, AnnotationState, ScreenRect};
    use crate::coords::Viewport;

    fn centered() -> Markers {
        Markers {
            top_left: Vec2::new(0.25, 0.75),
            bot_right: Vec2::new(0.75, 0.25),
            vanishing: Vec2::new(0.5, 0.5),
        }
    }

    #[test]
    fn test_scenario_800x600_gives_finite_pose() {
        let state = AnnotationState::new(
            ScreenRect::from_corners(Vec2::new(200.0, 160.0), Vec2::new(600.0, 480.0)),
            Vec2::new(400.0, 320.0),
        );
        let viewport = Viewport::from_size(800, 600);
        let markers = Annotation::from_screen(&state, viewport).markers();

        let out = reconstruct(&markers, 800.0 / 600.0, &ReconstructConfig::default().fov(54.0))
            .expect("centred vanishing point reconstructs");

        let cam = out.camera;
        assert!(cam.is_finite());
        assert!(cam.position.z > 0.0);
        assert_eq!(cam.yaw, -90.0);
        assert_eq!(cam.fov_deg, 54.0);
        // Vanishing point is halfway across the rear wall and 0.5 of its height up
        assert!((cam.position.x - out.mesh.vertices[1].position.x / 2.0).abs() < 1e-3);
        assert!((cam.position.y - 10.0).abs() < 1e-3);
        for v in &out.mesh.vertices {
            assert!(v.position.is_finite() && v.uv.is_finite());
        }
    }

    #[test]
    fn test_rear_wall_keeps_image_aspect() {
        // 0.5 x 0.5 of a 4:3 image is a 4:3 rear wall
        let out = reconstruct(&centered(), 4.0 / 3.0, &ReconstructConfig::default()).unwrap();
        let v = &out.mesh.vertices;
        assert!((v[1].position.x - 20.0 * 4.0 / 3.0).abs() < 1e-4);
        assert!((v[6].position.y - 20.0).abs() < 1e-4);
        assert_eq!(v[0].position, Vec3::ZERO);
    }

    #[test]
    fn test_constant_depth_matches_rear_width() {
        let config = ReconstructConfig::default().depth(DepthMode::Constant);
        let out = reconstruct(&centered(), 1.0, &config).unwrap();
        let width = out.mesh.vertices[1].position.x;
        for (i, v) in out.mesh.vertices.iter().enumerate() {
            let expected = if is_rear(i) { 0.0 } else { width };
            assert!((v.position.z - expected).abs() < 1e-4, "vertex {i}");
        }
    }

    #[test]
    fn test_perspective_depth_between_wall_and_camera() {
        let out = reconstruct(&centered(), 1.0, &ReconstructConfig::default()).unwrap();
        let cam_z = out.camera.position.z;
        for (i, v) in out.mesh.vertices.iter().enumerate() {
            if is_rear(i) {
                assert_eq!(v.position.z, 0.0);
            } else {
                assert!(v.position.z > 0.0 && v.position.z < cam_z, "vertex {i}");
            }
        }
        // Centred vanishing point: every open corner is equally deep, half the camera distance
        let z = out.mesh.vertices[2].position.z;
        assert!((z - cam_z / 2.0).abs() < 1e-3);
        assert!(out
            .mesh
            .vertices
            .iter()
            .filter(|v| v.position.z != 0.0)
            .all(|v| (v.position.z - z).abs() < 1e-3));
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        let flat = Markers {
            top_left: Vec2::new(0.25, 0.5),
            bot_right: Vec2::new(0.75, 0.5),
            vanishing: Vec2::new(0.5, 0.5),
        };
        assert!(matches!(
            reconstruct(&flat, 1.0, &ReconstructConfig::default()),
            Err(GeometryError::DegenerateRectangle { .. })
        ));

        let on_floor = Markers {
            vanishing: Vec2::new(0.5, 0.25),
            ..centered()
        };
        assert!(matches!(
            reconstruct(&on_floor, 1.0, &ReconstructConfig::default()),
            Err(GeometryError::VanishingPointOutside { .. })
        ));

        let nan = Markers {
            vanishing: Vec2::new(f32::NAN, 0.5),
            ..centered()
        };
        assert_eq!(
            reconstruct(&nan, 1.0, &ReconstructConfig::default()),
            Err(GeometryError::NonFinite)
        );

        assert!(matches!(
            reconstruct(&centered(), 1.0, &ReconstructConfig::default().fov(180.0)),
            Err(GeometryError::InvalidFov(_))
        ));
        assert!(matches!(
            reconstruct(&centered(), 0.0, &ReconstructConfig::default()),
            Err(GeometryError::InvalidAspect(_))
        ));
    }

    #[test]
    fn test_rear_wall_past_image_border_is_rejected() {
        let off_left = Markers {
            top_left: Vec2::new(-0.1, 0.75),
            bot_right: Vec2::new(0.75, 0.25),
            vanishing: Vec2::new(0.4, 0.5),
        };
        assert_eq!(
            reconstruct(&off_left, 1.0, &ReconstructConfig::default()),
            Err(GeometryError::RectangleOutsideImage { x: -0.1, y: 0.75 })
        );

        // Touching the border is still a valid wall
        let full = Markers {
            top_left: Vec2::new(0.0, 1.0),
            bot_right: Vec2::new(0.75, 0.25),
            vanishing: Vec2::new(0.4, 0.5),
        };
        assert!(reconstruct(&full, 1.0, &ReconstructConfig::default()).is_ok());
    }

    #[test]
    fn test_vanishing_point_hugging_floor_is_degenerate() {
        let low = Markers {
            vanishing: Vec2::new(0.5, 0.25 + 1e-6),
            ..centered()
        };
        assert!(matches!(
            reconstruct(&low, 1.0, &ReconstructConfig::default()),
            Err(GeometryError::DegenerateFloorAngle { .. })
        ));
    }

    #[test]
    fn test_steep_floor_angle_is_degenerate() {
        // 0.9 of a 120 degree fov puts the vanishing point past straight down
        let high = Markers {
            vanishing: Vec2::new(0.5, 0.25 + 0.9 * 0.5),
            ..centered()
        };
        assert!(matches!(
            reconstruct(&high, 1.0, &ReconstructConfig::default().fov(120.0)),
            Err(GeometryError::DegenerateFloorAngle { .. })
        ));
    }

    #[test]
    fn test_indices_cover_ten_triangles() {
        let out = reconstruct(&centered(), 1.0, &ReconstructConfig::default()).unwrap();
        let indices = out.mesh.indices();
        assert_eq!(indices.len(), 30);
        assert!(indices.iter().all(|&i| i < 12));
    }
}
