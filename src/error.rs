use thiserror::Error;

/// Failures while wiring the animation to a scene graph.
///
/// These only surface during construction; once a `FrameDriver` exists every
/// handle it holds has been checked.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("scene node '{name}' not found")]
    MissingNode { name: String },

    #[error("scene handle {id} does not refer to a live node")]
    InvalidHandle { id: usize },

    #[error("scene node '{name}' has no vertex buffer")]
    NotAMesh { name: String },

    #[error("vertex count mismatch: expected {expected}, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },
}
