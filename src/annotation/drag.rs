//! Drag targets and hit testing

use super::ScreenRect;
use glam::Vec2;

/// Radius around the vanishing point, in pixels, that grabs it.
pub const VANISHING_DRAG_RADIUS: f32 = 15.0;

/// Which annotation handle the pointer is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragTarget {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
    Vanishing,
}

impl DragTarget {
    /// Pick the handle under `pointer`.
    ///
    /// The vanishing point wins inside its grab radius, even when it sits
    /// inside the rectangle. Otherwise the pointer selects the edge it lies
    /// beyond, checking vertical edges before horizontal ones. A pointer
    /// inside the rectangle selects nothing.
    pub fn pick(pointer: Vec2, rect: &ScreenRect, vanishing: Vec2) -> Self {
        if pointer.distance_squared(vanishing) <= VANISHING_DRAG_RADIUS * VANISHING_DRAG_RADIUS {
            DragTarget::Vanishing
        } else if pointer.y < rect.top_left().y {
            DragTarget::Top
        } else if pointer.y > rect.bot_right().y {
            DragTarget::Bottom
        } else if pointer.x < rect.top_left().x {
            DragTarget::Left
        } else if pointer.x > rect.bot_right().x {
            DragTarget::Right
        } else {
            DragTarget::None
        }
    }
}
