mod common;

pub mod character;
pub mod lights;
pub mod sea;
pub mod sky;

use rand::Rng;

use crate::config::AnimationConfig;
use crate::core::frame_driver::{SceneHandles, World};
use crate::error::SceneError;
use crate::palette::PaletteConfig;
use crate::traits::{SceneGraph, Viewport};

pub use character::create_character;
pub use lights::apply_palette;
pub use sea::create_sea;
pub use sky::create_sky;

/// Build the whole scene and collect the handles the animation needs.
///
/// Lighting and fog are fixed here from `palette`; nothing re-reads it per
/// tick. The returned handles are looked up again by name so a provider
/// that renames or drops a node fails here rather than mid-animation.
pub fn build_world<S: SceneGraph, R: Rng + ?Sized>(
    scene: &mut S,
    palette: &PaletteConfig,
    config: &AnimationConfig,
    viewport: Viewport,
    rng: &mut R,
) -> Result<World, SceneError> {
    scene.set_camera_aspect(viewport.aspect());
    apply_palette(scene, palette);

    let character = create_character(scene);
    let (_, waves) = create_sea(scene, palette.secondary_color, &config.wave, rng);
    create_sky(scene, sea::SEA_DEPTH, rng);

    let handles = SceneHandles {
        body: scene.require(character::BODY_NAME)?,
        head_layers: character.head_layers,
        tail_layers: character.tail_layers,
        sea: scene.require(sea::SEA_NAME)?,
        sky: scene.require(sky::SKY_NAME)?,
    };

    log::info!(
        "scene built: {} wave vertices, sky {}",
        waves.len(),
        palette.css_gradient()
    );

    Ok(World { handles, waves })
}
