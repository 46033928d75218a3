use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use rand::Rng;

use super::common::{box_indices, box_vertices, polar_xy};
use crate::palette::colors::WHITE;
use crate::traits::{NodeId, SceneGraph};

pub const SKY_NAME: &str = "sky";
pub const CLOUD_COUNT: usize = 20;
pub const CLOUD_BLOCK_SIZE: f32 = 20.0;

/// Add one cloud of 3-5 jittered cubes under `parent`
pub fn create_cloud<S: SceneGraph, R: Rng + ?Sized>(
    scene: &mut S,
    parent: NodeId,
    rng: &mut R,
) -> NodeId {
    let cloud = scene.add_node("cloud", Some(parent));
    let blocks = rng.gen_range(3..6);
    let cube = box_vertices(Vec3::splat(CLOUD_BLOCK_SIZE), Vec3::ZERO);
    let faces = box_indices();

    for i in 0..blocks {
        let block = scene.add_mesh(
            "cloud-block",
            Some(cloud),
            cube.clone(),
            faces.clone(),
            WHITE,
        );
        scene.set_position(
            block,
            Vec3::new(
                i as f32 * 15.0,
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
            ),
        );
        scene.set_rotation(
            block,
            Vec3::new(0.0, rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU)),
        );
        scene.set_scale(block, Vec3::splat(rng.gen_range(0.1..1.0)));
    }
    cloud
}

/// Ring of clouds spaced evenly in angle around the sea axis
pub fn create_sky<S: SceneGraph, R: Rng + ?Sized>(
    scene: &mut S,
    depth: f32,
    rng: &mut R,
) -> NodeId {
    let sky = scene.add_node(SKY_NAME, None);
    scene.set_position(sky, Vec3::new(0.0, depth, 0.0));

    let step = TAU / CLOUD_COUNT as f32;
    for i in 0..CLOUD_COUNT {
        let cloud = create_cloud(scene, sky, rng);
        let angle = step * i as f32;
        let (x, y) = polar_xy(angle, 750.0 + rng.gen_range(0.0..200.0));
        let z = -400.0 - rng.gen_range(0.0..400.0);

        scene.set_position(cloud, Vec3::new(x, y, z));
        scene.set_rotation(cloud, Vec3::new(0.0, 0.0, angle + FRAC_PI_2));
        scene.set_scale(cloud, Vec3::splat(1.0 + rng.gen_range(0.0..2.0)));
    }

    log::debug!("sky created: {} clouds", CLOUD_COUNT);
    sky
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sky_places_clouds_on_ring() {
        let mut scene = MemoryScene::new();
        let mut rng = StdRng::seed_from_u64(11);
        let sky = create_sky(&mut scene, -600.0, &mut rng);

        let clouds = scene.children(sky).to_vec();
        assert_eq!(clouds.len(), CLOUD_COUNT);
        for (i, &cloud) in clouds.iter().enumerate() {
            let p = scene.position(cloud);
            let r = p.truncate().length();
            assert!((749.9..=950.1).contains(&r));
            assert!(p.z <= -400.0 && p.z > -800.0);

            let expected = TAU / CLOUD_COUNT as f32 * i as f32 + FRAC_PI_2;
            assert!((scene.rotation(cloud).z - expected).abs() < 1e-5);

            let blocks = scene.children(cloud).len();
            assert!((3..=5).contains(&blocks));
        }
    }
}
