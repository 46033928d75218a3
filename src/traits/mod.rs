pub mod scene;
pub mod window;

pub use scene::*;
pub use window::*;
