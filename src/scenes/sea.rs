use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::WaveTuning;
use crate::core::wave_field::WaveField;
use crate::math::Rgb;
use crate::traits::{NodeId, SceneGraph};

pub const SEA_NAME: &str = "sea";
pub const SEA_RADIUS: f32 = 600.0;
pub const SEA_LENGTH: f32 = 800.0;
pub const SEA_RADIAL_SEGMENTS: usize = 40;
pub const SEA_LENGTH_SEGMENTS: usize = 10;
/// The sea sits below the scene so only its upper arc shows
pub const SEA_DEPTH: f32 = -600.0;

/// Vertices of a closed cylinder lying along Z, seam and cap centres merged.
///
/// Rings run from +Z to -Z, each starting at the top of the circle; the two
/// cap centres come last.
pub fn cylinder_vertices(radius: f32, length: f32, radial: usize, rings: usize) -> Vec<Vec3> {
    let half = length * 0.5;
    let mut vertices = Vec::with_capacity(radial * (rings + 1) + 2);

    for ring in 0..=rings {
        let z = -half + ring as f32 / rings as f32 * length;
        for seg in 0..radial {
            let angle = seg as f32 / radial as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            vertices.push(Vec3::new(radius * sin, radius * cos, -z));
        }
    }

    vertices.push(Vec3::new(0.0, 0.0, -half));
    vertices.push(Vec3::new(0.0, 0.0, half));
    vertices
}

/// Triangle list for [`cylinder_vertices`] with the same segment counts
pub fn cylinder_indices(radial: usize, rings: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity((rings + 1) * radial * 6);
    let at = |ring: usize, seg: usize| (ring * radial + seg % radial) as u32;

    for ring in 0..rings {
        for seg in 0..radial {
            let (a, b) = (at(ring, seg), at(ring, seg + 1));
            let (c, d) = (at(ring + 1, seg), at(ring + 1, seg + 1));
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    // Cap centres follow the rings: -Z first, then +Z
    let back = (radial * (rings + 1)) as u32;
    let front = back + 1;
    for seg in 0..radial {
        indices.extend_from_slice(&[back, at(rings, seg + 1), at(rings, seg)]);
        indices.extend_from_slice(&[front, at(0, seg), at(0, seg + 1)]);
    }
    indices
}

/// Add the sea mesh and seed its wave field
pub fn create_sea<S: SceneGraph, R: Rng + ?Sized>(
    scene: &mut S,
    color: Rgb,
    tuning: &WaveTuning,
    rng: &mut R,
) -> (NodeId, WaveField) {
    let rest = cylinder_vertices(
        SEA_RADIUS,
        SEA_LENGTH,
        SEA_RADIAL_SEGMENTS,
        SEA_LENGTH_SEGMENTS,
    );
    let waves = WaveField::from_rest_positions(
        &rest,
        tuning.amplitude(),
        tuning.speed(),
        tuning.surface_spin,
        rng,
    );

    let indices = cylinder_indices(SEA_RADIAL_SEGMENTS, SEA_LENGTH_SEGMENTS);
    let sea = scene.add_mesh(SEA_NAME, None, rest, indices, color);
    scene.set_position(sea, Vec3::new(0.0, SEA_DEPTH, 0.0));

    log::debug!("sea created: {} vertices, color {}", waves.len(), color);
    (sea, waves)
}
