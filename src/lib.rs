//! Single view modeling
//!
//! Turn one perspective photograph into an open, textured box that can be
//! flown through. The user marks the rear wall and the vanishing point on
//! the image; the box and a matching camera pose are reconstructed from
//! those marks.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **coords** / **input** - Coordinate spaces and polled input snapshots
//! 2. **annotation** - Rectangle and vanishing point editing, confirm lifecycle
//! 3. **reconstruct** - Box geometry, texture coordinates and camera pose
//! 4. **camera** / **control** - Fly camera pose and first-person control
//! 5. **scene** - Annotating / flying-through mode machine
//! 6. **context** / **core** / **renderer** - wgpu resources and drawing
//! 7. **window** - Window management with winit (feature = "window")

pub mod annotation;
pub mod asset;
pub mod camera;
pub mod config;
pub mod context;
pub mod control;
pub mod coords;
pub mod core;
pub mod error;
pub mod input;
pub mod reconstruct;
pub mod renderer;
pub mod scene;

#[cfg(feature = "window")]
pub mod window;

// Re-export commonly used types
pub use annotation::{Annotation, AnnotationController, AnnotationState, DragTarget, Status};
pub use asset::{load_image, ImageAsset};
pub use camera::CameraPose;
pub use config::SvmConfig;
pub use context::WgpuContext;
pub use control::FirstPersonControl;
pub use coords::Viewport;
pub use error::{Error, GeometryError, Result};
pub use input::{Event, InputSnapshot, InputState, Key, MouseButton, PointerSnapshot};
pub use reconstruct::{
    reconstruct, DepthMode, Markers, ReconstructConfig, ReconstructedBox, Reconstruction,
};
pub use renderer::SceneRenderer;
pub use scene::{FlyThrough, FrameContext, Mode};

#[cfg(feature = "window")]
pub use window::{FrameInput, FrameOutput, Window, WindowSettings};

// Re-export glam for convenience
pub use glam;
