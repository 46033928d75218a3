use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::traits::Viewport;

/// Pointer in normalised device coordinates, both axes in [-1, 1], +y up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const CENTER: PointerPosition = PointerPosition { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a pixel position inside `viewport`.
    ///
    /// Screen y grows downward, so it is flipped. Returns `None` for an empty
    /// viewport.
    pub fn from_pixels(px: f32, py: f32, viewport: Viewport) -> Option<Self> {
        if viewport.is_empty() {
            return None;
        }
        Some(Self {
            x: -1.0 + (px / viewport.width as f32) * 2.0,
            y: 1.0 - (py / viewport.height as f32) * 2.0,
        })
    }

    fn pack(self) -> u64 {
        ((self.x.to_bits() as u64) << 32) | self.y.to_bits() as u64
    }

    fn unpack(bits: u64) -> Self {
        Self {
            x: f32::from_bits((bits >> 32) as u32),
            y: f32::from_bits(bits as u32),
        }
    }
}

/// Latest pointer position, shared between the input source and the frame loop.
///
/// Both components live in one atomic word so a reader never sees a torn
/// pair. Writes overwrite; moves between two reads are dropped.
#[derive(Debug, Clone)]
pub struct SharedPointer {
    bits: Arc<AtomicU64>,
}

impl SharedPointer {
    pub fn new(initial: PointerPosition) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(initial.pack())),
        }
    }

    pub fn store(&self, position: PointerPosition) {
        self.bits.store(position.pack(), Ordering::Release);
    }

    pub fn load(&self) -> PointerPosition {
        PointerPosition::unpack(self.bits.load(Ordering::Acquire))
    }
}

impl Default for SharedPointer {
    fn default() -> Self {
        Self::new(PointerPosition::CENTER)
    }
}
