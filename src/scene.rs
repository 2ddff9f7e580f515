//! Scene modes
//!
//! The program starts in annotation mode and moves to fly-through mode once
//! a confirmed annotation reconstructs. There is no way back.

use crate::annotation::{Annotation, AnnotationController};
use crate::camera::CameraPose;
use crate::config::SvmConfig;
use crate::coords::Viewport;
use crate::input::{InputSnapshot, Key};
use crate::reconstruct::{reconstruct, Reconstruction};

/// Key that confirms the annotation.
pub const CONFIRM_KEY: Key = Key::Enter;

/// Per-frame inputs to a mode transition.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub input: &'a InputSnapshot,
    pub viewport: Viewport,
    /// Image width over height.
    pub image_aspect: f32,
    /// Seconds since the previous frame.
    pub delta_time: f32,
}

/// Fly-through state: the frozen reconstruction and the moving camera.
#[derive(Debug, Clone)]
pub struct FlyThrough {
    pub annotation: Annotation,
    pub reconstruction: Reconstruction,
    pub camera: CameraPose,
}

impl FlyThrough {
    pub fn new(annotation: Annotation, reconstruction: Reconstruction) -> Self {
        let camera = reconstruction.camera;
        Self {
            annotation,
            reconstruction,
            camera,
        }
    }
}

/// The active scene.
#[derive(Debug, Clone)]
pub enum Mode {
    Annotating(AnnotationController),
    FlyingThrough(FlyThrough),
}

impl Mode {
    pub fn new(viewport: Viewport) -> Self {
        Mode::Annotating(AnnotationController::new(viewport))
    }

    pub fn is_flying(&self) -> bool {
        matches!(self, Mode::FlyingThrough(_))
    }

    /// Advance one frame.
    #[must_use]
    pub fn update(self, ctx: &FrameContext<'_>, config: &SvmConfig) -> Self {
        match self {
            Mode::Annotating(mut ctrl) => {
                if !ctx.input.was_pressed(CONFIRM_KEY) {
                    ctrl.update(ctx.input.pointer().clamped_to(ctx.viewport));
                    return Mode::Annotating(ctrl);
                }

                let accepted = ctrl.confirm(ctx.viewport).and_then(|annotation| {
                    reconstruct(&annotation.markers(), ctx.image_aspect, &config.reconstruct)
                        .map(|reconstruction| FlyThrough::new(annotation, reconstruction))
                });

                match accepted {
                    Ok(fly) => {
                        tracing::info!(camera = ?fly.camera.position, "entering fly-through");
                        Mode::FlyingThrough(fly)
                    }
                    Err(err) => {
                        // confirm() already reopens on its own errors
                        if ctrl.is_confirmed() {
                            ctrl.reject(err);
                        }
                        Mode::Annotating(ctrl)
                    }
                }
            }
            Mode::FlyingThrough(mut fly) => {
                config
                    .control
                    .update(&mut fly.camera, ctx.input, ctx.delta_time);
                Mode::FlyingThrough(fly)
            }
        }
    }

    /// Keep annotation marks attached to the image when the window changes size.
    pub fn resize(&mut self, from: Viewport, to: Viewport) {
        if let Mode::Annotating(ctrl) = self {
            ctrl.resize(from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Status;
    use crate::input::{Event, InputState, MouseButton};
    use glam::Vec2;

    const VIEWPORT: Viewport = Viewport {
        x: 0,
        y: 0,
        width: 800,
        height: 600,
    };

    fn step(mode: Mode, input: &mut InputState, events: &[Event]) -> Mode {
        let snap = input.update(events);
        let ctx = FrameContext {
            input: &snap,
            viewport: VIEWPORT,
            image_aspect: 800.0 / 600.0,
            delta_time: 0.1,
        };
        mode.update(&ctx, &SvmConfig::default())
    }

    #[test]
    fn test_confirm_enters_fly_through() {
        let mut input = InputState::new();
        let mode = step(Mode::new(VIEWPORT), &mut input, &[Event::KeyPress { key: Key::Enter }]);

        let Mode::FlyingThrough(fly) = mode else {
            panic!("expected fly-through");
        };
        assert!(fly.camera.is_finite());
        assert_eq!(fly.camera, fly.reconstruction.camera);
    }

    #[test]
    fn test_bad_vanishing_point_rejects_confirm() {
        let mut input = InputState::new();
        let mut mode = Mode::new(VIEWPORT);

        // Grab the vanishing point and drag it above the rectangle
        let grab = (400.0, 300.0);
        mode = step(
            mode,
            &mut input,
            &[Event::MousePress {
                button: MouseButton::Left,
                position: grab,
            }],
        );
        mode = step(mode, &mut input, &[Event::CursorMoved { position: (400.0, 50.0) }]);
        mode = step(
            mode,
            &mut input,
            &[Event::MouseRelease {
                button: MouseButton::Left,
                position: (400.0, 50.0),
            }],
        );
        mode = step(mode, &mut input, &[Event::KeyPress { key: Key::Enter }]);

        let Mode::Annotating(ctrl) = &mode else {
            panic!("confirm should have been rejected");
        };
        assert_eq!(ctrl.state().vanishing, Vec2::new(400.0, 50.0));
        assert!(matches!(ctrl.status(), Status::Rejected(_)));
        assert!(!ctrl.is_confirmed());
    }

    #[test]
    fn test_edge_dragged_off_window_stops_at_border() {
        let mut input = InputState::new();
        let mut mode = step(
            Mode::new(VIEWPORT),
            &mut input,
            &[Event::MousePress {
                button: MouseButton::Left,
                position: (100.0, 300.0),
            }],
        );
        mode = step(mode, &mut input, &[Event::CursorMoved { position: (-100.0, 300.0) }]);

        let Mode::Annotating(ctrl) = &mode else {
            panic!("still annotating");
        };
        assert_eq!(ctrl.state().rect.top_left().x, 0.0);

        mode = step(
            mode,
            &mut input,
            &[
                Event::MouseRelease {
                    button: MouseButton::Left,
                    position: (-100.0, 300.0),
                },
                Event::KeyPress { key: Key::Enter },
            ],
        );
        let Mode::FlyingThrough(fly) = mode else {
            panic!("a wall on the image border reconstructs");
        };
        assert_eq!(fly.annotation.top_left.x, -1.0);
        assert!(fly.camera.is_finite());
    }

    #[test]
    fn test_fly_through_ignores_pointer_and_moves_camera() {
        let mut input = InputState::new();
        let mode = step(Mode::new(VIEWPORT), &mut input, &[Event::KeyPress { key: Key::Enter }]);
        let start = match &mode {
            Mode::FlyingThrough(fly) => fly.camera.position,
            Mode::Annotating(_) => panic!("expected fly-through"),
        };

        let mode = step(
            mode,
            &mut input,
            &[
                Event::KeyRelease { key: Key::Enter },
                Event::KeyPress { key: Key::W },
                Event::MousePress {
                    button: MouseButton::Left,
                    position: (0.0, 0.0),
                },
            ],
        );
        let Mode::FlyingThrough(fly) = mode else {
            panic!("no way back to annotation");
        };
        assert!(fly.camera.position.z < start.z);
        assert_eq!(fly.camera.position.x, start.x);
    }
}
