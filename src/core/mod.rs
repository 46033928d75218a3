pub mod frame_driver;
pub mod input_adapter;
pub mod pointer;
pub mod pose;
pub mod sway;
pub mod wave_field;

pub use frame_driver::{CancelToken, FrameDriver, SceneHandles, World};
pub use input_adapter::{InputUpdate, PointerInput};
pub use pointer::{PointerPosition, SharedPointer};
pub use pose::{Pose, PoseState, PoseTuning};
pub use sway::{SwayCluster, SwayProfile};
pub use wave_field::{WaveField, WaveVertex};
