use crate::math::Rgb;
use crate::time_of_day::TimeCategory;

/// Named colours used across the scene
pub mod colors {
    use crate::math::Rgb;

    pub const WAVE_BLUE: Rgb = Rgb::from_hex(0x3763cc);
    pub const WAVE_LIGHT_BLUE: Rgb = Rgb::from_hex(0x3788cc);
    pub const GREY: Rgb = Rgb::from_hex(0xb2b2b2);
    pub const DARK_GREY: Rgb = Rgb::from_hex(0x515151);
    pub const BLUE: Rgb = Rgb::from_hex(0xa3cffe);
    pub const YELLOW: Rgb = Rgb::from_hex(0xfeda79);
    pub const CORAL: Rgb = Rgb::from_hex(0xfe99b7);
    pub const PURPLE: Rgb = Rgb::from_hex(0xe39dff);
    pub const AQUA: Rgb = Rgb::from_hex(0xa3ffea);
    pub const PINK: Rgb = Rgb::from_hex(0xfaa2df);
    pub const WHITE: Rgb = Rgb::from_hex(0xffffff);
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);
}

use colors::*;

pub const HEMISPHERE_INTENSITY: f32 = 0.9;
pub const NIGHT_AMBIENT_INTENSITY: f32 = 0.9;
pub const DAY_AMBIENT_INTENSITY: f32 = 0.2;

/// Gradient-coloured light between sky and ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Rgb,
    pub ground: Rgb,
    pub intensity: f32,
}

/// Colours and intensities for one time of day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteConfig {
    /// Fog, ambient and directional light colour
    pub primary_color: Rgb,
    /// Sea colour
    pub secondary_color: Rgb,
    /// Ambient light intensity
    pub light_intensity: f32,
    /// Background gradient, top stop first
    pub sky_gradient: [Rgb; 2],
    pub hemisphere: HemisphereLight,
}

const fn hemisphere(sky: Rgb, ground: Rgb) -> HemisphereLight {
    HemisphereLight {
        sky,
        ground,
        intensity: HEMISPHERE_INTENSITY,
    }
}

/// Used for any category name the table does not know
pub const DEFAULT_PALETTE: PaletteConfig = PaletteConfig {
    primary_color: DARK_GREY,
    secondary_color: WAVE_BLUE,
    light_intensity: DAY_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x4f96ff), Rgb::from_hex(0x8df2ff)],
    hemisphere: hemisphere(WHITE, WHITE),
};

const NIGHT: PaletteConfig = PaletteConfig {
    primary_color: DARK_GREY,
    secondary_color: WAVE_BLUE,
    light_intensity: NIGHT_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x000000), Rgb::from_hex(0x114271)],
    hemisphere: hemisphere(BLUE, BLACK),
};

const SUNRISE: PaletteConfig = PaletteConfig {
    primary_color: YELLOW,
    secondary_color: WAVE_BLUE,
    light_intensity: DAY_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x99e4f7), Rgb::from_hex(0xf7e7b4)],
    hemisphere: hemisphere(WHITE, BLUE),
};

const MORNING: PaletteConfig = PaletteConfig {
    primary_color: BLUE,
    secondary_color: WAVE_BLUE,
    light_intensity: DAY_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x4f96ff), Rgb::from_hex(0x8df2ff)],
    hemisphere: hemisphere(WHITE, WHITE),
};

const MIDDAY: PaletteConfig = PaletteConfig {
    primary_color: WHITE,
    secondary_color: WAVE_LIGHT_BLUE,
    light_intensity: DAY_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x4f96ff), Rgb::from_hex(0x8df2ff)],
    hemisphere: hemisphere(WHITE, BLUE),
};

const AFTERNOON: PaletteConfig = PaletteConfig {
    primary_color: YELLOW,
    secondary_color: WAVE_LIGHT_BLUE,
    light_intensity: DAY_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x22a7ff), Rgb::from_hex(0xffd04f)],
    hemisphere: hemisphere(YELLOW, PINK),
};

const SUNSET: PaletteConfig = PaletteConfig {
    primary_color: CORAL,
    secondary_color: WAVE_BLUE,
    light_intensity: DAY_AMBIENT_INTENSITY,
    sky_gradient: [Rgb::from_hex(0x9a1abf), Rgb::from_hex(0xff6600)],
    hemisphere: hemisphere(PURPLE, PINK),
};

/// Palette for a time-of-day category
pub fn select_palette(category: TimeCategory) -> &'static PaletteConfig {
    match category {
        TimeCategory::Night => &NIGHT,
        TimeCategory::Sunrise => &SUNRISE,
        TimeCategory::Morning => &MORNING,
        TimeCategory::Midday => &MIDDAY,
        TimeCategory::Afternoon => &AFTERNOON,
        TimeCategory::Sunset => &SUNSET,
    }
}

impl PaletteConfig {
    /// Resolve a category by name, falling back to [`DEFAULT_PALETTE`]
    pub fn for_name(name: &str) -> &'static PaletteConfig {
        match name.parse::<TimeCategory>() {
            Ok(category) => select_palette(category),
            Err(_) => &DEFAULT_PALETTE,
        }
    }

    /// Gradient stops formatted the way a CSS background would take them
    pub fn css_gradient(&self) -> String {
        format!(
            "linear-gradient({}, {})",
            self.sky_gradient[0], self.sky_gradient[1]
        )
    }
}
