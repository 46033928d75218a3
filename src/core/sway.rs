use crate::math::wrap_angle;

/// Phase step applied after every tick, radians
pub const SWAY_PHASE_STEP: f32 = 0.12;
/// Divisor spreading the phase across member indices
pub const SWAY_MEMBER_SPREAD: f32 = 8.0;

/// Scale envelope of one appendage type
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct SwayProfile {
    pub baseline: f32,
    pub range: f32,
}

impl SwayProfile {
    /// Hair tuft on the head, swings between 50% and 100%
    pub const HEAD_TUFT: SwayProfile = SwayProfile {
        baseline: 0.75,
        range: 0.25,
    };

    /// Tail strips, sit a little shorter than the head tuft
    pub const TAIL: SwayProfile = SwayProfile {
        baseline: 0.6,
        range: 0.25,
    };
}

/// Phase state shared by every layer of one appendage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwayCluster {
    pub phase: f32,
    pub profile: SwayProfile,
    pub phase_step: f32,
    pub member_spread: f32,
}

impl SwayCluster {
    pub fn new(profile: SwayProfile) -> Self {
        Self {
            phase: 0.0,
            profile,
            phase_step: SWAY_PHASE_STEP,
            member_spread: SWAY_MEMBER_SPREAD,
        }
    }

    pub fn with_step(mut self, phase_step: f32, member_spread: f32) -> Self {
        self.phase_step = phase_step;
        self.member_spread = member_spread;
        self
    }

    /// Vertical scale of member `index` at the current phase
    #[inline]
    pub fn scale_at(&self, index: usize) -> f32 {
        self.profile.baseline
            + self.profile.range * (self.phase + index as f32 / self.member_spread).cos()
    }

    /// Scales for members `0..member_count`, then step the phase once
    pub fn advance(&mut self, member_count: usize) -> Vec<f32> {
        let scales = (0..member_count).map(|i| self.scale_at(i)).collect();
        self.phase = wrap_angle(self.phase + self.phase_step);
        scales
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_output_length_matches_members() {
        let mut cluster = SwayCluster::new(SwayProfile::HEAD_TUFT);
        assert_eq!(cluster.advance(24).len(), 24);
        assert_eq!(cluster.advance(0).len(), 0);
    }

    #[test]
    fn test_phase_steps_once_per_call() {
        for members in [0, 1, 24, 1000] {
            let mut cluster = SwayCluster::new(SwayProfile::TAIL);
            cluster.advance(members);
            assert_eq!(cluster.phase, SWAY_PHASE_STEP);
        }
    }

    #[test]
    fn test_first_member_starts_at_peak() {
        let mut cluster = SwayCluster::new(SwayProfile::HEAD_TUFT);
        let scales = cluster.advance(3);
        assert_relative_eq!(scales[0], 1.0);
        assert_relative_eq!(scales[1], 0.75 + 0.25 * (1.0f32 / 8.0).cos());
    }

    #[test]
    fn test_scales_stay_inside_envelope() {
        let mut cluster = SwayCluster::new(SwayProfile::TAIL);
        for _ in 0..200 {
            for s in cluster.advance(24) {
                assert!(s >= 0.35 - 1e-6 && s <= 0.85 + 1e-6);
            }
        }
    }

    #[test]
    fn test_phase_keeps_moving_after_long_runs() {
        let mut cluster = SwayCluster::new(SwayProfile::HEAD_TUFT);
        cluster.phase = 3.0e6;

        cluster.advance(1);
        let settled = cluster.phase;
        assert!((0.0..std::f32::consts::TAU).contains(&settled));

        let before = cluster.advance(1);
        let after = cluster.advance(1);
        assert_ne!(before, after);
        assert_relative_eq!(
            cluster.phase,
            wrap_angle(settled + 2.0 * SWAY_PHASE_STEP),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_clusters_keep_independent_phase() {
        let mut head = SwayCluster::new(SwayProfile::HEAD_TUFT);
        let mut tail = SwayCluster::new(SwayProfile::TAIL);
        head.advance(24);
        head.advance(24);
        tail.advance(24);
        assert_relative_eq!(head.phase, 0.24);
        assert_relative_eq!(tail.phase, 0.12);
    }
}
