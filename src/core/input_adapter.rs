use winit::event::WindowEvent;

use super::pointer::{PointerPosition, SharedPointer};
use crate::traits::Viewport;

/// What a window event meant for the animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputUpdate {
    Pointer(PointerPosition),
    Resized(Viewport),
    Ignored,
}

/// Adapter that bridges winit events to the shared pointer
#[derive(Debug, Clone)]
pub struct PointerInput {
    pointer: SharedPointer,
    viewport: Viewport,
}

impl PointerInput {
    pub fn new(pointer: SharedPointer, viewport: Viewport) -> Self {
        Self { pointer, viewport }
    }

    /// Process a winit `WindowEvent` and publish any pointer change
    pub fn process_event(&mut self, event: &WindowEvent) -> InputUpdate {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::Resized(size) => self.resized(Viewport::new(size.width, size.height)),
            _ => InputUpdate::Ignored,
        }
    }

    /// Pixel position inside the current viewport
    pub fn cursor_moved(&mut self, px: f32, py: f32) -> InputUpdate {
        match PointerPosition::from_pixels(px, py, self.viewport) {
            Some(position) => {
                self.pointer.store(position);
                InputUpdate::Pointer(position)
            }
            None => {
                log::warn!("pointer move ignored: viewport is empty");
                InputUpdate::Ignored
            }
        }
    }

    pub fn resized(&mut self, viewport: Viewport) -> InputUpdate {
        self.viewport = viewport;
        InputUpdate::Resized(viewport)
    }
}
