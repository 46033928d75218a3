mod color;
mod normalize;

pub use color::Rgb;
pub use normalize::{ease_toward, normalize, wrap_angle};
