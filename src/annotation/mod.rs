//! Interactive annotation of the rear wall and vanishing point
//!
//! The user drags the four edges of a rectangle and a vanishing point over
//! the image. [`AnnotationState::step`] is the pure per-tick transition;
//! [`AnnotationController`] wraps it with the confirm/freeze lifecycle.

mod drag;
mod rect;

pub use drag::{DragTarget, VANISHING_DRAG_RADIUS};
pub use rect::ScreenRect;

use crate::coords::{ndc_to_texture, Viewport};
use crate::error::GeometryError;
use crate::input::PointerSnapshot;
use crate::reconstruct::Markers;
use glam::Vec2;

/// Rectangle, vanishing point and drag state in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationState {
    pub rect: ScreenRect,
    pub vanishing: Vec2,
    pub drag: DragTarget,
    pointer_was_held: bool,
}

impl AnnotationState {
    pub fn new(rect: ScreenRect, vanishing: Vec2) -> Self {
        Self {
            rect,
            vanishing,
            drag: DragTarget::None,
            pointer_was_held: false,
        }
    }

    /// Rear wall over the middle half of the window, vanishing point centred.
    pub fn centered(viewport: Viewport) -> Self {
        let size = Vec2::new(viewport.width as f32, viewport.height as f32);
        Self::new(
            ScreenRect::from_corners(size * 0.25, size * 0.75),
            size * 0.5,
        )
    }

    /// Advance one input tick.
    ///
    /// A target is picked only on the tick the button goes down, at the
    /// position of the press; a press inside the rectangle therefore drags
    /// nothing until it is released and pressed again. The picking tick
    /// does not move anything.
    #[must_use]
    pub fn step(mut self, pointer: PointerSnapshot) -> Self {
        if !pointer.held {
            self.drag = DragTarget::None;
            self.pointer_was_held = false;
            return self;
        }

        let pick_at = match pointer.pressed_at {
            Some(at) => Some(at),
            None if !self.pointer_was_held => Some(pointer.position),
            None => None,
        };
        self.pointer_was_held = true;

        if let Some(at) = pick_at {
            self.drag = DragTarget::pick(at, &self.rect, self.vanishing);
            return self;
        }

        match self.drag {
            DragTarget::None => {}
            DragTarget::Vanishing => self.vanishing = pointer.position,
            edge => self.drag = self.rect.set_edge(edge, pointer.position),
        }
        self
    }

    /// The same annotation expressed for a window of a different size.
    #[must_use]
    pub fn rescaled(mut self, from: Viewport, to: Viewport) -> Self {
        let scale = Vec2::new(
            to.width as f32 / from.width.max(1) as f32,
            to.height as f32 / from.height.max(1) as f32,
        );
        self.rect = ScreenRect::from_corners(
            self.rect.top_left() * scale,
            self.rect.bot_right() * scale,
        );
        self.vanishing *= scale;
        self
    }
}

/// A confirmed annotation in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub top_left: Vec2,
    pub bot_right: Vec2,
    pub vanishing: Vec2,
}

impl Annotation {
    pub fn from_screen(state: &AnnotationState, viewport: Viewport) -> Self {
        Self {
            top_left: viewport.screen_to_ndc(state.rect.top_left()),
            bot_right: viewport.screen_to_ndc(state.rect.bot_right()),
            vanishing: viewport.screen_to_ndc(state.vanishing),
        }
    }

    /// The annotation in texture space, as the reconstructor expects it.
    pub fn markers(&self) -> Markers {
        Markers {
            top_left: ndc_to_texture(self.top_left),
            bot_right: ndc_to_texture(self.bot_right),
            vanishing: ndc_to_texture(self.vanishing),
        }
    }
}

/// Lifecycle of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Editing,
    /// The last confirm was refused; cleared by the next edit.
    Rejected(GeometryError),
    Confirmed,
}

/// Owns the annotation while the user edits it.
#[derive(Debug, Clone)]
pub struct AnnotationController {
    state: AnnotationState,
    status: Status,
}

impl AnnotationController {
    pub fn new(viewport: Viewport) -> Self {
        Self::from_state(AnnotationState::centered(viewport))
    }

    pub fn from_state(state: AnnotationState) -> Self {
        Self {
            state,
            status: Status::Editing,
        }
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == Status::Confirmed
    }

    /// Feed one pointer snapshot. Returns whether the annotation changed.
    pub fn update(&mut self, pointer: PointerSnapshot) -> bool {
        if self.is_confirmed() {
            return false;
        }

        let next = self.state.step(pointer);
        let changed = next.rect != self.state.rect || next.vanishing != self.state.vanishing;
        self.state = next;

        if changed && matches!(self.status, Status::Rejected(_)) {
            self.status = Status::Editing;
        }
        changed
    }

    /// Follow a window resize so the marks stay over the same image pixels.
    pub fn resize(&mut self, from: Viewport, to: Viewport) {
        if !self.is_confirmed() {
            self.state = self.state.rescaled(from, to);
        }
    }

    /// Freeze the annotation and hand it out in normalized coordinates.
    pub fn confirm(&mut self, viewport: Viewport) -> Result<Annotation, GeometryError> {
        let rect = &self.state.rect;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            let err = GeometryError::DegenerateRectangle {
                width: rect.width(),
                height: rect.height(),
            };
            self.reject(err);
            return Err(err);
        }

        self.state.drag = DragTarget::None;
        self.status = Status::Confirmed;
        Ok(Annotation::from_screen(&self.state, viewport))
    }

    /// Reopen a confirmed annotation after downstream geometry refused it.
    pub fn reject(&mut self, err: GeometryError) {
        tracing::warn!("annotation rejected: {err}");
        self.status = Status::Rejected(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::from_size(800, 640)
    }

    fn state() -> AnnotationState {
        AnnotationState::new(
            ScreenRect::from_corners(Vec2::new(200.0, 160.0), Vec2::new(600.0, 480.0)),
            Vec2::new(400.0, 320.0),
        )
    }

    fn held(x: f32, y: f32) -> PointerSnapshot {
        PointerSnapshot::new(Vec2::new(x, y), true)
    }

    fn released(x: f32, y: f32) -> PointerSnapshot {
        PointerSnapshot::new(Vec2::new(x, y), false)
    }

    fn assert_ordered(s: &AnnotationState) {
        assert!(s.rect.top_left().x <= s.rect.bot_right().x);
        assert!(s.rect.top_left().y <= s.rect.bot_right().y);
    }

    #[test]
    fn test_centered_layout() {
        let s = AnnotationState::centered(viewport());
        assert_eq!(s.rect.top_left(), Vec2::new(200.0, 160.0));
        assert_eq!(s.rect.bot_right(), Vec2::new(600.0, 480.0));
        assert_eq!(s.vanishing, Vec2::new(400.0, 320.0));
        assert_eq!(s.drag, DragTarget::None);
    }

    #[test]
    fn test_press_on_vanishing_point_inside_rect() {
        let s = state().step(held(400.0, 320.0));
        assert_eq!(s.drag, DragTarget::Vanishing);

        let s = s.step(held(420.0, 300.0));
        assert_eq!(s.vanishing, Vec2::new(420.0, 300.0));
        assert_eq!(s.rect, state().rect);
    }

    #[test]
    fn test_press_inside_rect_drags_nothing() {
        let mut s = state().step(held(300.0, 300.0));
        assert_eq!(s.drag, DragTarget::None);

        // Sliding out of the rectangle while still held does not pick an edge
        s = s.step(held(300.0, 50.0));
        assert_eq!(s.drag, DragTarget::None);
        assert_eq!(s.rect, state().rect);
    }

    #[test]
    fn test_top_dragged_below_bottom_becomes_bottom() {
        let mut s = state().step(held(400.0, 100.0));
        assert_eq!(s.drag, DragTarget::Top);

        s = s.step(held(400.0, 550.0));
        assert_eq!(s.drag, DragTarget::Bottom);
        assert_eq!(s.rect.top_left().y, 480.0);
        assert_eq!(s.rect.bot_right().y, 550.0);

        // The edge under the pointer keeps following it without a jump
        s = s.step(held(400.0, 560.0));
        assert_eq!(s.drag, DragTarget::Bottom);
        assert_eq!(s.rect.top_left().y, 480.0);
        assert_eq!(s.rect.bot_right().y, 560.0);

        // And can be dragged back across again
        s = s.step(held(400.0, 300.0));
        assert_eq!(s.drag, DragTarget::Top);
        assert_eq!(s.rect.top_left().y, 300.0);
        assert_eq!(s.rect.bot_right().y, 480.0);
    }

    #[test]
    fn test_left_and_right_edges_move_x() {
        let mut s = state().step(held(100.0, 300.0));
        assert_eq!(s.drag, DragTarget::Left);
        s = s.step(held(150.0, 10.0));
        assert_eq!(s.rect.top_left(), Vec2::new(150.0, 160.0));

        s = s.step(released(150.0, 10.0)).step(held(700.0, 300.0));
        assert_eq!(s.drag, DragTarget::Right);
        s = s.step(held(50.0, 300.0));
        assert_eq!(s.drag, DragTarget::Left);
        assert_eq!(s.rect.top_left().x, 50.0);
        assert_eq!(s.rect.bot_right().x, 150.0);
    }

    #[test]
    fn test_release_always_resets_target() {
        for press in [
            held(400.0, 100.0),
            held(400.0, 500.0),
            held(100.0, 300.0),
            held(700.0, 300.0),
            held(400.0, 320.0),
            held(300.0, 300.0),
        ] {
            let s = state().step(press).step(released(0.0, 0.0));
            assert_eq!(s.drag, DragTarget::None);
        }
    }

    #[test]
    fn test_pick_uses_press_position() {
        // Pressed above the top edge, then moved into the rectangle in the same frame
        let s = state().step(held(400.0, 300.0).with_press(Vec2::new(400.0, 100.0)));
        assert_eq!(s.drag, DragTarget::Top);
        assert_eq!(s.rect, state().rect);

        let s = s.step(held(400.0, 120.0));
        assert_eq!(s.rect.top_left().y, 120.0);
    }

    #[test]
    fn test_release_and_press_in_one_frame_repicks() {
        let s = state().step(held(400.0, 100.0));
        assert_eq!(s.drag, DragTarget::Top);

        let s = s.step(held(100.0, 300.0).with_press(Vec2::new(100.0, 300.0)));
        assert_eq!(s.drag, DragTarget::Left);
        assert_eq!(s.rect, state().rect);
    }

    #[test]
    fn test_repeated_press_without_release_keeps_target() {
        let first = state().step(held(400.0, 100.0));
        let second = first.step(held(400.0, 100.0));
        assert_eq!(first.drag, DragTarget::Top);
        assert_eq!(second.drag, DragTarget::Top);
    }

    #[test]
    fn test_rect_stays_ordered_under_event_sequence() {
        use rand::{Rng as _, SeedableRng as _};
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x2545_f491);

        let mut s = state();
        for _ in 0..5000 {
            let x = rng.random_range(-100.0..900.0);
            let y = rng.random_range(-100.0..740.0);
            let pointer = if rng.random_bool(1.0 / 7.0) {
                released(x, y)
            } else {
                held(x, y)
            };
            s = s.step(pointer);
            assert_ordered(&s);
        }
    }

    #[test]
    fn test_confirm_freezes_annotation() {
        let mut ctrl = AnnotationController::from_state(state());
        let annotation = ctrl.confirm(viewport()).expect("valid rectangle");
        assert!(ctrl.is_confirmed());
        assert!((annotation.vanishing - Vec2::ZERO).length() < 1e-6);

        let before = *ctrl.state();
        assert!(!ctrl.update(held(400.0, 100.0)));
        assert!(!ctrl.update(held(400.0, 10.0)));
        assert_eq!(ctrl.state().rect, before.rect);
        assert_eq!(ctrl.state().vanishing, before.vanishing);
    }

    #[test]
    fn test_confirm_rejects_flat_rectangle() {
        let flat = AnnotationState::new(
            ScreenRect::from_corners(Vec2::new(100.0, 200.0), Vec2::new(300.0, 200.0)),
            Vec2::new(200.0, 200.0),
        );
        let mut ctrl = AnnotationController::from_state(flat);
        let err = ctrl.confirm(viewport()).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateRectangle { .. }));
        assert!(matches!(ctrl.status(), Status::Rejected(_)));

        // Still editable; the next edit clears the warning
        ctrl.update(held(200.0, 200.0));
        assert!(ctrl.update(held(250.0, 150.0)));
        assert_eq!(ctrl.status(), Status::Editing);
    }

    #[test]
    fn test_reject_reopens_for_editing() {
        let mut ctrl = AnnotationController::from_state(state());
        ctrl.confirm(viewport()).unwrap();
        ctrl.reject(GeometryError::DegenerateFloorAngle { degrees: 0.0 });
        assert!(!ctrl.is_confirmed());
        ctrl.update(held(400.0, 100.0));
        assert!(ctrl.update(held(400.0, 120.0)));
    }

    #[test]
    fn test_markers_are_texture_space() {
        let annotation = Annotation::from_screen(&state(), viewport());
        let m = annotation.markers();
        assert!((m.top_left - Vec2::new(0.25, 0.75)).length() < 1e-6);
        assert!((m.bot_right - Vec2::new(0.75, 0.25)).length() < 1e-6);
        assert!((m.vanishing - Vec2::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_rescale_keeps_relative_placement() {
        let s = state().rescaled(viewport(), Viewport::from_size(400, 320));
        assert_eq!(s.rect.top_left(), Vec2::new(100.0, 80.0));
        assert_eq!(s.vanishing, Vec2::new(200.0, 160.0));
    }
}
