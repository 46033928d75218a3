/// Viewport size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A minimised window reports a zero-sized viewport
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, 1.0 for an empty viewport
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Window abstraction - exposes size and redraw scheduling
pub trait WindowContext {
    /// Get window dimensions in physical pixels
    fn viewport(&self) -> Viewport;

    /// Ask for another frame
    fn request_redraw(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::new(1920, 1080).aspect(), 1920.0 / 1080.0);
        assert_eq!(Viewport::new(800, 800).aspect(), 1.0);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(Viewport::new(800, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
        assert_eq!(Viewport::new(0, 0).aspect(), 1.0);
    }

    struct MockWindow {
        viewport: Viewport,
        redraws: Cell<usize>,
    }

    impl WindowContext for MockWindow {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }
    }

    #[test]
    fn test_window_context_redraw() {
        let window = MockWindow {
            viewport: Viewport::new(640, 480),
            redraws: Cell::new(0),
        };

        window.request_redraw();
        window.request_redraw();
        assert_eq!(window.redraws.get(), 2);
        assert_eq!(window.viewport(), Viewport::new(640, 480));
    }
}
