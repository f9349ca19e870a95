//! Window input state: page scroll, cursor, and palette keys.
//!
//! The showcase has no document to scroll, so wheel and touchpad input is
//! accumulated into a virtual page offset in pixels, clamped to the
//! scrollable range of the section layout. The cursor is tracked in window
//! pixels and exposed normalized to [-0.5, 0.5] around the viewport center,
//! which is what the parallax rig consumes.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of page scroll per wheel "line".
const LINE_HEIGHT_PX: f32 = 60.0;

/// Tracks input state between frames.
pub struct Input {
    keys_pressed: HashSet<KeyCode>,
    cursor_px: Vec2,
    viewport: Vec2,
    scroll_px: f32,
    max_scroll: f32,
}

impl Input {
    /// Create input state for a viewport of the given pixel size and
    /// scrollable range.
    pub fn new(viewport: Vec2, max_scroll: f32) -> Self {
        Self {
            keys_pressed: HashSet::new(),
            // Center until the first cursor event, so parallax starts neutral.
            cursor_px: viewport * 0.5,
            viewport,
            scroll_px: 0.0,
            max_scroll: max_scroll.max(0.0),
        }
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Update the viewport size and scrollable range after a resize.
    ///
    /// The current scroll offset is re-clamped so it stays inside the new
    /// range.
    pub fn set_viewport(&mut self, viewport: Vec2, max_scroll: f32) {
        self.viewport = viewport;
        self.max_scroll = max_scroll.max(0.0);
        self.scroll_px = self.scroll_px.clamp(0.0, self.max_scroll);
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key
                    && event.state == ElementState::Pressed
                    && !event.repeat
                {
                    self.keys_pressed.insert(key);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_px = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * LINE_HEIGHT_PX,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.apply_scroll(pixels);
            }
            _ => {}
        }
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Current virtual page scroll offset in pixels, 0 at the top.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_px
    }

    /// Cursor position normalized to [-0.5, 0.5] per axis, 0 at the
    /// viewport center. Positive x is right, positive y is down.
    pub fn normalized_cursor(&self) -> Vec2 {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Vec2::ZERO;
        }
        (self.cursor_px / self.viewport - 0.5).clamp(Vec2::splat(-0.5), Vec2::splat(0.5))
    }

    // Wheel up (positive delta) scrolls toward the top of the page.
    fn apply_scroll(&mut self, delta_px: f32) {
        self.scroll_px = (self.scroll_px - delta_px).clamp(0.0, self.max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_accumulates_and_clamps() {
        let mut input = Input::new(Vec2::new(1280.0, 800.0), 1600.0);
        input.apply_scroll(-500.0);
        assert_eq!(input.scroll_offset(), 500.0);
        input.apply_scroll(-5000.0);
        assert_eq!(input.scroll_offset(), 1600.0);
        input.apply_scroll(400.0);
        assert_eq!(input.scroll_offset(), 1200.0);
        input.apply_scroll(9999.0);
        assert_eq!(input.scroll_offset(), 0.0);
    }

    #[test]
    fn resize_reclamps_scroll() {
        let mut input = Input::new(Vec2::new(1280.0, 800.0), 1600.0);
        input.apply_scroll(-1600.0);
        input.set_viewport(Vec2::new(1280.0, 400.0), 800.0);
        assert_eq!(input.scroll_offset(), 800.0);
    }

    #[test]
    fn cursor_normalizes_around_center() {
        let mut input = Input::new(Vec2::new(1000.0, 800.0), 1600.0);
        assert_eq!(input.normalized_cursor(), Vec2::ZERO);

        input.cursor_px = Vec2::new(1000.0, 0.0);
        assert_eq!(input.normalized_cursor(), Vec2::new(0.5, -0.5));

        input.cursor_px = Vec2::new(250.0, 600.0);
        assert_eq!(input.normalized_cursor(), Vec2::new(-0.25, 0.25));
    }
}
