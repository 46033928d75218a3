pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod math;
pub mod palette;
pub mod renderer;
pub mod scene;
pub mod scene_pass;
pub mod scenes;
pub mod time_of_day;
pub mod traits;
pub mod window;

pub use config::AnimationConfig;
pub use core::{FrameDriver, PointerPosition, SharedPointer};
pub use error::SceneError;
pub use palette::{select_palette, PaletteConfig};
pub use scene::MemoryScene;
pub use scenes::build_world;
pub use time_of_day::{classify_hour, TimeCategory};
