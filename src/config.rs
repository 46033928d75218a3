use std::ops::Range;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::core::frame_driver::SKY_SPIN;
use crate::core::pose::PoseTuning;
use crate::core::sway::{SwayProfile, SWAY_MEMBER_SPREAD, SWAY_PHASE_STEP};
use crate::core::wave_field::{SURFACE_SPIN, WAVE_AMPLITUDE, WAVE_SPEED};

/// Wave field seeding and spin
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub amplitude_min: f32,
    pub amplitude_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub surface_spin: f32,
}

impl WaveTuning {
    pub fn amplitude(&self) -> Range<f32> {
        self.amplitude_min..self.amplitude_max
    }

    pub fn speed(&self) -> Range<f32> {
        self.speed_min..self.speed_max
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            amplitude_min: WAVE_AMPLITUDE.start,
            amplitude_max: WAVE_AMPLITUDE.end,
            speed_min: WAVE_SPEED.start,
            speed_max: WAVE_SPEED.end,
            surface_spin: SURFACE_SPIN,
        }
    }
}

/// Hair sway envelopes and phase step
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwayTuning {
    pub phase_step: f32,
    pub member_spread: f32,
    pub head: SwayProfile,
    pub tail: SwayProfile,
}

impl Default for SwayTuning {
    fn default() -> Self {
        Self {
            phase_step: SWAY_PHASE_STEP,
            member_spread: SWAY_MEMBER_SPREAD,
            head: SwayProfile::HEAD_TUFT,
            tail: SwayProfile::TAIL,
        }
    }
}

/// All animation tuning, loadable from JSON. Missing fields keep defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub wave: WaveTuning,
    pub sway: SwayTuning,
    pub pose: PoseTuning,
    pub sky_spin: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            wave: WaveTuning::default(),
            sway: SwayTuning::default(),
            pose: PoseTuning::default(),
            sky_spin: SKY_SPIN,
        }
    }
}

impl AnimationConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid animation config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Reject values that would break the remaps or random ranges
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named_values() {
            ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
        }

        let w = &self.wave;
        ensure!(
            0.0 <= w.amplitude_min && w.amplitude_min < w.amplitude_max,
            "wave amplitude range must be non-negative and non-empty"
        );
        ensure!(
            0.0 < w.speed_min && w.speed_min < w.speed_max,
            "wave speed range must be positive and non-empty"
        );
        ensure!(self.sway.member_spread != 0.0, "sway member spread must be non-zero");
        let p = &self.pose;
        ensure!(
            p.pointer_span.0 < p.pointer_span.1,
            "pose pointer span must be increasing"
        );
        ensure!(
            (0.0..=1.0).contains(&p.blend),
            "pose blend must lie in [0, 1]"
        );
        Ok(())
    }

    fn named_values(&self) -> [(&'static str, f32); 23] {
        let (w, s, p) = (&self.wave, &self.sway, &self.pose);
        [
            ("wave.amplitude_min", w.amplitude_min),
            ("wave.amplitude_max", w.amplitude_max),
            ("wave.speed_min", w.speed_min),
            ("wave.speed_max", w.speed_max),
            ("wave.surface_spin", w.surface_spin),
            ("sway.phase_step", s.phase_step),
            ("sway.member_spread", s.member_spread),
            ("sway.head.baseline", s.head.baseline),
            ("sway.head.range", s.head.range),
            ("sway.tail.baseline", s.tail.baseline),
            ("sway.tail.range", s.tail.range),
            ("pose.blend", p.blend),
            ("pose.roll_gain", p.roll_gain),
            ("pose.pitch_gain", p.pitch_gain),
            ("pose.pointer_span[0]", p.pointer_span.0),
            ("pose.pointer_span[1]", p.pointer_span.1),
            ("pose.height_range[0]", p.height_range.0),
            ("pose.height_range[1]", p.height_range.1),
            ("pose.pan_range[0]", p.pan_range.0),
            ("pose.pan_range[1]", p.pan_range.1),
            ("pose.fov_range[0]", p.fov_range.0),
            ("pose.fov_range[1]", p.fov_range.1),
            ("sky_spin", self.sky_spin),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = AnimationConfig::default();
        assert_eq!(config.wave.amplitude(), 5.0..20.0);
        assert_eq!(config.wave.speed(), 0.016..0.048);
        assert_eq!(config.sway.phase_step, 0.12);
        assert_eq!(config.sway.head, SwayProfile::HEAD_TUFT);
        assert_eq!(config.pose.blend, 0.1);
        assert_eq!(config.sky_spin, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AnimationConfig::from_json(r#"{ "sway": { "phase_step": 0.2 }, "sky_spin": 0.0 }"#)
                .unwrap();
        assert_eq!(config.sway.phase_step, 0.2);
        assert_eq!(config.sway.tail, SwayProfile::TAIL);
        assert_eq!(config.sky_spin, 0.0);
        assert_eq!(config.wave, WaveTuning::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AnimationConfig::from_json("{}").unwrap(), AnimationConfig::default());
    }

    #[test]
    fn test_rejects_degenerate_ranges() {
        assert!(AnimationConfig::from_json(r#"{ "wave": { "speed_min": 0.0 } }"#).is_err());
        assert!(
            AnimationConfig::from_json(r#"{ "pose": { "pointer_span": [1.0, 1.0] } }"#).is_err()
        );
        assert!(AnimationConfig::from_json(r#"{ "sway": { "member_spread": 0.0 } }"#).is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        // 1e39 overflows f32 to infinity
        let err = AnimationConfig::from_json(r#"{ "wave": { "amplitude_max": 1e39 } }"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("wave.amplitude_max must be finite"));

        assert!(AnimationConfig::from_json(r#"{ "sky_spin": -1e39 }"#).is_err());
        assert!(
            AnimationConfig::from_json(r#"{ "pose": { "fov_range": [40.0, 1e40] } }"#).is_err()
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AnimationConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnimationConfig::load(Path::new("/nonexistent/seascape.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
