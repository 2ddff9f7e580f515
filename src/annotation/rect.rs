//! Rear wall rectangle in screen space

use super::DragTarget;
use glam::Vec2;

/// Axis-aligned rectangle in screen pixels, y down.
///
/// `top_left` is never right of or below `bot_right`; every mutation goes
/// through [`ScreenRect::set_edge`], which restores that ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    top_left: Vec2,
    bot_right: Vec2,
}

impl ScreenRect {
    /// Build a rectangle from any two opposite corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            top_left: a.min(b),
            bot_right: a.max(b),
        }
    }

    pub fn top_left(&self) -> Vec2 {
        self.top_left
    }

    pub fn bot_right(&self) -> Vec2 {
        self.bot_right
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.bot_right.x, self.top_left.y)
    }

    pub fn bot_left(&self) -> Vec2 {
        Vec2::new(self.top_left.x, self.bot_right.y)
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.top_left,
            self.top_right(),
            self.bot_right,
            self.bot_left(),
        ]
    }

    pub fn width(&self) -> f32 {
        self.bot_right.x - self.top_left.x
    }

    pub fn height(&self) -> f32 {
        self.bot_right.y - self.top_left.y
    }

    /// Move the edge named by `target` to the pointer and return the target
    /// that now names that edge.
    ///
    /// Dragging an edge past its opposite swaps the two coordinates, so the
    /// returned target flips (`Top` <-> `Bottom`, `Left` <-> `Right`) and the
    /// pointer keeps moving the same screen-space edge on the next tick.
    pub fn set_edge(&mut self, target: DragTarget, pointer: Vec2) -> DragTarget {
        match target {
            DragTarget::Top => self.top_left.y = pointer.y,
            DragTarget::Bottom => self.bot_right.y = pointer.y,
            DragTarget::Left => self.top_left.x = pointer.x,
            DragTarget::Right => self.bot_right.x = pointer.x,
            DragTarget::None | DragTarget::Vanishing => return target,
        }
        self.correct_crossover(target)
    }

    fn correct_crossover(&mut self, mut target: DragTarget) -> DragTarget {
        if self.bot_right.y < self.top_left.y {
            std::mem::swap(&mut self.bot_right.y, &mut self.top_left.y);
            target = match target {
                DragTarget::Top => DragTarget::Bottom,
                DragTarget::Bottom => DragTarget::Top,
                other => unreachable!("top/bottom crossed while dragging {other:?}"),
            };
        }
        if self.bot_right.x < self.top_left.x {
            std::mem::swap(&mut self.bot_right.x, &mut self.top_left.x);
            target = match target {
                DragTarget::Left => DragTarget::Right,
                DragTarget::Right => DragTarget::Left,
                other => unreachable!("left/right crossed while dragging {other:?}"),
            };
        }
        target
    }
}
