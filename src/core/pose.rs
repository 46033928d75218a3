use serde::Deserialize;

use super::pointer::PointerPosition;
use crate::math::{ease_toward, normalize};

/// Fraction of the remaining height gap closed per tick
pub const POSE_BLEND: f32 = 0.1;
/// Roll per unit of remaining height gap
pub const POSE_ROLL_GAIN: f32 = 0.0128;
/// Pitch per unit of remaining height gap
pub const POSE_PITCH_GAIN: f32 = 0.0064;
/// Pointer span that maps onto the full height and pan ranges
pub const POSE_POINTER_SPAN: (f32, f32) = (-0.75, 0.75);
pub const POSE_HEIGHT_RANGE: (f32, f32) = (25.0, 175.0);
pub const POSE_PAN_RANGE: (f32, f32) = (-100.0, 100.0);
/// Field of view range in degrees across the full pointer width
pub const POSE_FOV_RANGE: (f32, f32) = (40.0, 80.0);
/// Starting height of the character
pub const POSE_START_HEIGHT: f32 = 100.0;

/// Tuning for [`Pose`]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoseTuning {
    pub blend: f32,
    pub roll_gain: f32,
    pub pitch_gain: f32,
    pub pointer_span: (f32, f32),
    pub height_range: (f32, f32),
    pub pan_range: (f32, f32),
    pub fov_range: (f32, f32),
}

impl Default for PoseTuning {
    fn default() -> Self {
        Self {
            blend: POSE_BLEND,
            roll_gain: POSE_ROLL_GAIN,
            pitch_gain: POSE_PITCH_GAIN,
            pointer_span: POSE_POINTER_SPAN,
            height_range: POSE_HEIGHT_RANGE,
            pan_range: POSE_PAN_RANGE,
            fov_range: POSE_FOV_RANGE,
        }
    }
}

/// Current eased pose of the character and camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseState {
    pub position_y: f32,
    pub rotation_z: f32,
    pub rotation_x: f32,
    /// Camera field of view in degrees
    pub fov: f32,
}

impl PoseState {
    pub fn at_height(position_y: f32) -> Self {
        Self {
            position_y,
            rotation_z: 0.0,
            rotation_x: 0.0,
            fov: 60.0,
        }
    }
}

impl Default for PoseState {
    fn default() -> Self {
        Self::at_height(POSE_START_HEIGHT)
    }
}

/// Eases the character toward the height the pointer asks for
#[derive(Debug, Clone)]
pub struct Pose {
    state: PoseState,
    tuning: PoseTuning,
    target_x: f32,
}

impl Pose {
    pub fn new(state: PoseState, tuning: PoseTuning) -> Self {
        Self {
            state,
            tuning,
            target_x: 0.0,
        }
    }

    pub fn state(&self) -> PoseState {
        self.state
    }

    /// Horizontal target from the last tick.
    ///
    /// Computed every tick but not applied to any transform.
    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    /// Height the pointer currently asks for
    pub fn target_y(&self, pointer: PointerPosition) -> f32 {
        let t = &self.tuning;
        normalize(
            pointer.y,
            t.pointer_span.0,
            t.pointer_span.1,
            t.height_range.0,
            t.height_range.1,
        )
    }

    /// Step one tick toward the pointer target
    pub fn advance(&mut self, pointer: PointerPosition) -> PoseState {
        let t = self.tuning;
        let target_y = self.target_y(pointer);
        self.target_x = normalize(
            pointer.x,
            t.pointer_span.0,
            t.pointer_span.1,
            t.pan_range.0,
            t.pan_range.1,
        );

        let s = &mut self.state;
        s.position_y = ease_toward(s.position_y, target_y, t.blend);
        s.rotation_z = (target_y - s.position_y) * t.roll_gain;
        s.rotation_x = (s.position_y - target_y) * t.pitch_gain;
        s.fov = normalize(pointer.x, -1.0, 1.0, t.fov_range.0, t.fov_range.1);

        self.state
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(PoseState::default(), PoseTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centered_pointer_holds_start_height() {
        let mut pose = Pose::default();
        for _ in 0..50 {
            let state = pose.advance(PointerPosition::CENTER);
            assert_eq!(state.position_y, 100.0);
            assert_eq!(state.rotation_z, 0.0);
            assert_eq!(state.fov, 60.0);
        }
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut pose = Pose::default();
        let pointer = PointerPosition::new(0.0, 0.75);
        let target = pose.target_y(pointer);
        assert_eq!(target, 175.0);

        let mut gap = target - pose.state().position_y;
        for _ in 0..100 {
            let state = pose.advance(pointer);
            let next_gap = target - state.position_y;
            assert!(next_gap >= 0.0);
            assert!(next_gap <= gap);
            assert_relative_eq!(next_gap, gap * 0.9, epsilon = 1e-3);
            gap = next_gap;
        }
        assert!(gap < 0.01);
    }

    #[test]
    fn test_rotation_follows_remaining_gap() {
        let mut pose = Pose::default();
        let state = pose.advance(PointerPosition::new(0.0, -1.0));
        // target 25, start 100 -> 92.5 after one tick
        assert_relative_eq!(state.position_y, 92.5);
        assert_relative_eq!(state.rotation_z, (25.0 - 92.5) * 0.0128);
        assert_relative_eq!(state.rotation_x, (92.5 - 25.0) * 0.0064);
    }

    #[test]
    fn test_fov_tracks_pointer_x() {
        let mut pose = Pose::default();
        assert_eq!(pose.advance(PointerPosition::new(-1.0, 0.0)).fov, 40.0);
        assert_eq!(pose.advance(PointerPosition::new(1.0, 0.0)).fov, 80.0);
        assert_eq!(pose.advance(PointerPosition::new(7.0, 0.0)).fov, 80.0);
    }

    #[test]
    fn test_target_x_is_computed() {
        let mut pose = Pose::default();
        pose.advance(PointerPosition::new(0.75, 0.0));
        assert_eq!(pose.target_x(), 100.0);
        pose.advance(PointerPosition::new(-2.0, 0.0));
        assert_eq!(pose.target_x(), -100.0);
    }
}
