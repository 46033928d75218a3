use std::sync::Arc;

use winit::window::Window as WinitWindow;

use crate::traits::{Viewport, WindowContext};

/// Wrapper around the winit window the scene is shown in
#[derive(Clone)]
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }
}

impl WindowContext for Window {
    fn viewport(&self) -> Viewport {
        let size = self.inner.inner_size();
        Viewport::new(size.width, size.height)
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
