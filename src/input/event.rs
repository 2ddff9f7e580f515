//! Event types for input handling
//!
//! Platform-independent mouse and keyboard events, produced by the window
//! module and folded into an [`InputState`](super::InputState) once per frame.

/// Mouse button type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Enter,
    Escape,
    Space,
    Shift,
    Control,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Convert from winit key.
    #[cfg(feature = "window")]
    pub fn from_winit(key: &winit::keyboard::Key) -> Option<Self> {
        use winit::keyboard::{Key as WKey, NamedKey};

        match key {
            WKey::Character(c) => match c.chars().next()?.to_ascii_lowercase() {
                'w' => Some(Key::W),
                'a' => Some(Key::A),
                's' => Some(Key::S),
                'd' => Some(Key::D),
                _ => None,
            },
            WKey::Named(named) => match named {
                NamedKey::Enter => Some(Key::Enter),
                NamedKey::Escape => Some(Key::Escape),
                NamedKey::Space => Some(Key::Space),
                NamedKey::Shift => Some(Key::Shift),
                NamedKey::Control => Some(Key::Control),
                NamedKey::ArrowLeft => Some(Key::Left),
                NamedKey::ArrowRight => Some(Key::Right),
                NamedKey::ArrowUp => Some(Key::Up),
                NamedKey::ArrowDown => Some(Key::Down),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    MousePress {
        button: MouseButton,
        position: (f32, f32),
    },

    /// Mouse button released.
    MouseRelease {
        button: MouseButton,
        position: (f32, f32),
    },

    /// Cursor moved to a new window position.
    CursorMoved { position: (f32, f32) },

    /// Raw mouse motion, reported even while the cursor is grabbed.
    MouseMotion { delta: (f32, f32) },

    /// Key pressed.
    KeyPress { key: Key },

    /// Key released.
    KeyRelease { key: Key },
}
