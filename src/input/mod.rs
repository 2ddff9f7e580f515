//! Polled input
//!
//! The window hands over the events of one frame; [`InputState`] folds them
//! into a persistent view of the devices and produces an [`InputSnapshot`]
//! that scene logic reads. Nothing downstream keeps references into the
//! window.

pub mod event;

pub use event::{Event, Key, MouseButton};

use crate::coords::Viewport;
use glam::Vec2;
use std::collections::HashSet;

/// Pointer state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSnapshot {
    /// Cursor position in screen pixels.
    pub position: Vec2,
    /// Whether the primary button is held.
    pub held: bool,
    /// Where the primary button last went down, if it did during this tick.
    pub pressed_at: Option<Vec2>,
}

impl PointerSnapshot {
    pub fn new(position: Vec2, held: bool) -> Self {
        Self {
            position,
            held,
            pressed_at: None,
        }
    }

    /// Mark a press at `at` during this tick.
    pub fn with_press(mut self, at: Vec2) -> Self {
        self.pressed_at = Some(at);
        self
    }

    /// The same snapshot with every position inside `viewport`.
    ///
    /// A held button keeps reporting positions outside the window.
    pub fn clamped_to(mut self, viewport: Viewport) -> Self {
        self.position = viewport.clamp_screen(self.position);
        self.pressed_at = self.pressed_at.map(|at| viewport.clamp_screen(at));
        self
    }
}

/// Device state as seen by one frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Cursor position in screen pixels.
    pub pointer: Vec2,
    /// Primary (left) button held.
    pub pointer_held: bool,
    /// Position of the last primary press this frame.
    pub pointer_pressed_at: Option<Vec2>,
    /// Raw mouse motion accumulated this frame.
    pub mouse_delta: Vec2,
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl InputSnapshot {
    /// The pointer part of the snapshot.
    pub fn pointer(&self) -> PointerSnapshot {
        PointerSnapshot {
            position: self.pointer,
            held: self.pointer_held,
            pressed_at: self.pointer_pressed_at,
        }
    }

    /// Whether `key` is currently held.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Whether `key` went down during this frame.
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Accumulates events across frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Vec2,
    pointer_held: bool,
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's events and return the resulting snapshot.
    pub fn update(&mut self, events: &[Event]) -> InputSnapshot {
        let mut pressed = HashSet::new();
        let mut pointer_pressed_at = None;
        let mut mouse_delta = Vec2::ZERO;

        for event in events {
            match *event {
                Event::MousePress {
                    button: MouseButton::Left,
                    position,
                } => {
                    self.pointer = position.into();
                    self.pointer_held = true;
                    pointer_pressed_at = Some(self.pointer);
                }
                Event::MouseRelease {
                    button: MouseButton::Left,
                    position,
                } => {
                    self.pointer = position.into();
                    self.pointer_held = false;
                }
                Event::CursorMoved { position } => self.pointer = position.into(),
                Event::MouseMotion { delta } => mouse_delta += Vec2::from(delta),
                Event::KeyPress { key } => {
                    if self.held.insert(key) {
                        pressed.insert(key);
                    }
                }
                Event::KeyRelease { key } => {
                    self.held.remove(&key);
                }
                _ => {}
            }
        }

        InputSnapshot {
            pointer: self.pointer,
            pointer_held: self.pointer_held,
            pointer_pressed_at,
            mouse_delta,
            held: self.held.clone(),
            pressed,
        }
    }
}
