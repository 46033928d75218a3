use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec3;
use rand::Rng;

use crate::math::wrap_angle;

/// Wave amplitude range in scene units
pub const WAVE_AMPLITUDE: Range<f32> = 5.0..20.0;
/// Wave angular speed range in radians per tick
pub const WAVE_SPEED: Range<f32> = 0.016..0.048;
/// Constant roll of the whole surface, radians per tick
pub const SURFACE_SPIN: f32 = 0.005;

/// Oscillation state for one surface vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveVertex {
    /// Rest position the vertex circles around
    pub base: Vec3,
    pub angle: f32,
    pub amplitude: f32,
    pub speed: f32,
}

impl WaveVertex {
    pub fn new(base: Vec3, angle: f32, amplitude: f32, speed: f32) -> Self {
        Self {
            base,
            angle,
            amplitude,
            speed,
        }
    }

    /// Offset position for the current angle; z stays at rest
    #[inline]
    pub fn displaced(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(
            self.base.x + cos * self.amplitude,
            self.base.y + sin * self.amplitude,
            self.base.z,
        )
    }
}

/// Per-vertex wave state for a surface mesh plus its slow spin
#[derive(Debug, Clone)]
pub struct WaveField {
    vertices: Vec<WaveVertex>,
    rotation_z: f32,
    spin: f32,
}

impl WaveField {
    pub fn new(vertices: Vec<WaveVertex>, spin: f32) -> Self {
        Self {
            vertices,
            rotation_z: 0.0,
            spin,
        }
    }

    /// Seed wave state for a mesh with random phase, amplitude and speed
    pub fn from_rest_positions<R: Rng + ?Sized>(
        rest: &[Vec3],
        amplitude: Range<f32>,
        speed: Range<f32>,
        spin: f32,
        rng: &mut R,
    ) -> Self {
        let vertices = rest
            .iter()
            .map(|&base| {
                WaveVertex::new(
                    base,
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(amplitude.clone()),
                    rng.gen_range(speed.clone()),
                )
            })
            .collect();
        Self::new(vertices, spin)
    }

    pub fn vertices(&self) -> &[WaveVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Accumulated surface roll in radians
    pub fn rotation_z(&self) -> f32 {
        self.rotation_z
    }

    /// Displaced positions for this tick, then step every angle forward
    pub fn advance(&mut self, dt_ticks: f32) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.vertices.len());
        self.advance_into(dt_ticks, &mut out);
        out
    }

    /// Same as [`WaveField::advance`] but reuses `out`.
    ///
    /// `out` is index-aligned with the mesh vertex buffer.
    pub fn advance_into(&mut self, dt_ticks: f32, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(self.vertices.iter_mut().map(|v| {
            let position = v.displaced();
            v.angle = wrap_angle(v.angle + v.speed * dt_ticks);
            position
        }));
        self.rotation_z = wrap_angle(self.rotation_z + self.spin * dt_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single(angle: f32) -> WaveField {
        WaveField::new(
            vec![WaveVertex::new(Vec3::new(10.0, 20.0, 30.0), angle, 5.0, 0.02)],
            SURFACE_SPIN,
        )
    }

    #[test]
    fn test_advance_uses_angle_before_step() {
        let mut field = single(0.0);
        let out = field.advance(1.0);
        assert_eq!(out, vec![Vec3::new(15.0, 20.0, 30.0)]);
        assert_relative_eq!(field.vertices()[0].angle, 0.02);
    }

    #[test]
    fn test_z_never_moves() {
        let mut field = single(1.3);
        for _ in 0..100 {
            let out = field.advance(1.0);
            assert_eq!(out[0].z, 30.0);
        }
    }

    #[test]
    fn test_displacement_stays_on_circle() {
        let mut field = single(0.7);
        for _ in 0..50 {
            let p = field.advance(1.0)[0];
            let offset = (p - Vec3::new(10.0, 20.0, 30.0)).truncate();
            assert_relative_eq!(offset.length(), 5.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_only_angle_mutates() {
        let mut field = single(0.0);
        let before = field.vertices()[0];
        field.advance(3.0);
        let after = field.vertices()[0];
        assert_eq!(before.base, after.base);
        assert_eq!(before.amplitude, after.amplitude);
        assert_eq!(before.speed, after.speed);
    }

    #[test]
    fn test_surface_spin_accumulates() {
        let mut field = single(0.0);
        for _ in 0..10 {
            field.advance(1.0);
        }
        assert_relative_eq!(field.rotation_z(), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_large_angle_keeps_its_speed() {
        let mut field = WaveField::new(
            vec![WaveVertex::new(Vec3::ZERO, 300_000.0, 5.0, 0.016)],
            SURFACE_SPIN,
        );
        field.advance(1.0);
        let settled = field.vertices()[0].angle;
        assert!((0.0..TAU).contains(&settled));

        field.advance(1.0);
        field.advance(1.0);
        let moved = wrap_angle(field.vertices()[0].angle - settled);
        assert_relative_eq!(moved, 0.032, epsilon = 1e-5);
    }

    #[test]
    fn test_surface_spin_stays_within_one_turn() {
        let mut field = WaveField::new(Vec::new(), 1.0);
        for _ in 0..100 {
            field.advance(1.0);
        }
        assert!((0.0..TAU).contains(&field.rotation_z()));
        assert_relative_eq!(field.rotation_z(), wrap_angle(100.0), epsilon = 1e-4);
    }

    #[test]
    fn test_random_seed_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let rest = vec![Vec3::ZERO; 500];
        let field =
            WaveField::from_rest_positions(&rest, WAVE_AMPLITUDE, WAVE_SPEED, SURFACE_SPIN, &mut rng);

        assert_eq!(field.len(), 500);
        for v in field.vertices() {
            assert!(WAVE_AMPLITUDE.contains(&v.amplitude));
            assert!(WAVE_SPEED.contains(&v.speed));
            assert!((0.0..TAU).contains(&v.angle));
        }
    }

    #[test]
    fn test_advance_into_reuses_buffer() {
        let mut field = single(0.0);
        let mut out = vec![Vec3::ZERO; 8];
        field.advance_into(1.0, &mut out);
        assert_eq!(out.len(), 1);
    }
}
