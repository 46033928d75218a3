use glam::Vec3;

use crate::palette::PaletteConfig;
use crate::traits::{Fog, Light, SceneGraph};

pub const SHADOW_LIGHT_POSITION: Vec3 = Vec3::new(150.0, 350.0, 350.0);
pub const SHADOW_LIGHT_INTENSITY: f32 = 0.2;
pub const FOG_NEAR: f32 = 100.0;
pub const FOG_FAR: f32 = 950.0;

/// Light the scene and set its fog for `palette`. Runs once at startup.
pub fn apply_palette<S: SceneGraph>(scene: &mut S, palette: &PaletteConfig) {
    scene.add_light(Light::Hemisphere {
        sky: palette.hemisphere.sky,
        ground: palette.hemisphere.ground,
        intensity: palette.hemisphere.intensity,
    });
    scene.add_light(Light::Directional {
        color: palette.primary_color,
        intensity: SHADOW_LIGHT_INTENSITY,
        position: SHADOW_LIGHT_POSITION,
        cast_shadow: true,
    });
    scene.add_light(Light::Ambient {
        color: palette.primary_color,
        intensity: palette.light_intensity,
    });

    scene.set_fog(Fog {
        color: palette.primary_color,
        near: FOG_NEAR,
        far: FOG_FAR,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::select_palette;
    use crate::scene::MemoryScene;
    use crate::time_of_day::TimeCategory;

    #[test]
    fn test_night_rig() {
        let mut scene = MemoryScene::new();
        let palette = select_palette(TimeCategory::Night);
        apply_palette(&mut scene, palette);

        let lights = scene.lights();
        assert_eq!(lights.len(), 3);
        assert!(matches!(
            lights[0],
            Light::Hemisphere { sky, ground, intensity }
                if sky == palette.hemisphere.sky
                    && ground == palette.hemisphere.ground
                    && intensity == 0.9
        ));
        assert!(matches!(
            lights[1],
            Light::Directional { intensity, cast_shadow: true, .. } if intensity == 0.2
        ));
        assert!(matches!(
            lights[2],
            Light::Ambient { color, intensity } if color == palette.primary_color && intensity == 0.9
        ));

        let fog = scene.fog().unwrap();
        assert_eq!(fog.color, palette.primary_color);
        assert_eq!((fog.near, fog.far), (100.0, 950.0));
    }
}
