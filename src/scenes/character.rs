use glam::Vec3;

use super::common::{box_indices, box_vertices};
use crate::math::Rgb;
use crate::palette::colors::{AQUA, BLUE, CORAL, PINK, PURPLE, YELLOW};
use crate::traits::{NodeId, SceneGraph};

pub const BODY_NAME: &str = "body";
pub const BODY_SCALE: f32 = 0.4;
pub const BODY_START_HEIGHT: f32 = 100.0;
/// Hair strips per layer
pub const HAIR_MEMBERS: usize = 24;
/// Columns in the hair grid
const HAIR_COLUMNS: usize = 3;

/// One hair layer: strip size, pivot offset and colour
#[derive(Debug, Clone, Copy)]
pub struct HairLayer {
    pub size: Vec3,
    /// Shifts the strip so it scales from its bottom edge
    pub offset: Vec3,
    pub color: Rgb,
}

/// An appendage made of stacked hair layers that sway together
#[derive(Debug, Clone, Copy)]
pub struct AppendageSpec {
    pub name: &'static str,
    pub position: Vec3,
    pub layers: [HairLayer; 3],
}

pub const HEAD_TUFT: AppendageSpec = AppendageSpec {
    name: "head-tuft",
    position: Vec3::new(-6.0, 27.0, 20.0),
    layers: [
        HairLayer {
            size: Vec3::new(30.0, 6.0, 8.0),
            offset: Vec3::new(0.0, 2.0, 0.0),
            color: CORAL,
        },
        HairLayer {
            size: Vec3::new(30.0, 5.0, 8.0),
            offset: Vec3::new(-4.0, 7.0, 0.0),
            color: YELLOW,
        },
        HairLayer {
            size: Vec3::new(30.0, 3.0, 8.0),
            offset: Vec3::new(-6.0, 11.0, 0.0),
            color: BLUE,
        },
    ],
};

pub const TAIL: AppendageSpec = AppendageSpec {
    name: "tail",
    position: Vec3::new(-70.0, -10.0, 20.0),
    layers: [
        HairLayer {
            size: Vec3::new(15.0, 6.0, 8.0),
            offset: Vec3::new(-2.0, 8.0, 0.0),
            color: PINK,
        },
        HairLayer {
            size: Vec3::new(18.0, 6.0, 8.0),
            offset: Vec3::new(0.0, 14.0, 0.0),
            color: AQUA,
        },
        HairLayer {
            size: Vec3::new(15.0, 4.0, 8.0),
            offset: Vec3::new(-1.0, 20.0, 0.0),
            color: PURPLE,
        },
    ],
};

/// Grid slot of hair member `index`: three columns along z, rows along x
pub fn hair_slot(index: usize) -> Vec3 {
    let col = index % HAIR_COLUMNS;
    let row = index / HAIR_COLUMNS;
    Vec3::new(-8.0 + row as f32 * 4.0, 0.0, -4.0 + col as f32 * 4.0)
}

/// Add an appendage under `parent`, returning its layer containers
pub fn create_appendage<S: SceneGraph>(
    scene: &mut S,
    parent: NodeId,
    spec: &AppendageSpec,
) -> Vec<NodeId> {
    let root = scene.add_node(spec.name, Some(parent));
    scene.set_position(root, spec.position);

    spec.layers
        .iter()
        .enumerate()
        .map(|(depth, layer)| {
            let container = scene.add_node(&format!("{}-layer{}", spec.name, depth), Some(root));
            let strip = box_vertices(layer.size, layer.offset);
            let faces = box_indices();
            for i in 0..HAIR_MEMBERS {
                let hair = scene.add_mesh(
                    "hair",
                    Some(container),
                    strip.clone(),
                    faces.clone(),
                    layer.color,
                );
                scene.set_position(hair, hair_slot(i));
            }
            container
        })
        .collect()
}

/// The character body with its head tuft and tail
pub struct Character {
    pub body: NodeId,
    pub head_layers: Vec<NodeId>,
    pub tail_layers: Vec<NodeId>,
}

pub fn create_character<S: SceneGraph>(scene: &mut S) -> Character {
    let body = scene.add_node(BODY_NAME, None);
    scene.set_scale(body, Vec3::splat(BODY_SCALE));
    scene.set_position(body, Vec3::new(0.0, BODY_START_HEIGHT, 0.0));

    let head_layers = create_appendage(scene, body, &HEAD_TUFT);
    let tail_layers = create_appendage(scene, body, &TAIL);

    log::debug!(
        "character created: {} hair strips",
        (head_layers.len() + tail_layers.len()) * HAIR_MEMBERS
    );

    Character {
        body,
        head_layers,
        tail_layers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;

    #[test]
    fn test_hair_slots_form_grid() {
        assert_eq!(hair_slot(0), Vec3::new(-8.0, 0.0, -4.0));
        assert_eq!(hair_slot(2), Vec3::new(-8.0, 0.0, 4.0));
        assert_eq!(hair_slot(3), Vec3::new(-4.0, 0.0, -4.0));
        assert_eq!(hair_slot(23), Vec3::new(20.0, 0.0, 4.0));
    }

    #[test]
    fn test_character_layout() {
        let mut scene = MemoryScene::new();
        let character = create_character(&mut scene);

        assert_eq!(scene.scale(character.body), Vec3::splat(0.4));
        assert_eq!(scene.position(character.body).y, 100.0);
        assert_eq!(character.head_layers.len(), 3);
        assert_eq!(character.tail_layers.len(), 3);
        for &layer in character.head_layers.iter().chain(&character.tail_layers) {
            assert_eq!(scene.children(layer).len(), HAIR_MEMBERS);
        }

        let tail = scene.require("tail").unwrap();
        assert_eq!(scene.position(tail), Vec3::new(-70.0, -10.0, 20.0));
    }
}
