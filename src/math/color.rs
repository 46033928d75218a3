use std::fmt;

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` word
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channels as 0..1 floats, still in sRGB space
    pub fn to_array(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Channels converted to linear light for blending on the GPU
    pub fn to_linear(self) -> [f32; 3] {
        self.to_array().map(srgb_to_linear)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_splits_channels() {
        let c = Rgb::from_hex(0x3763cc);
        assert_eq!(c, Rgb::new(0x37, 0x63, 0xcc));
        assert_eq!(c.to_hex(), 0x3763cc);
    }

    #[test]
    fn test_display_is_css_hex() {
        assert_eq!(Rgb::from_hex(0x000000).to_string(), "#000000");
        assert_eq!(Rgb::from_hex(0xfe99b7).to_string(), "#fe99b7");
    }

    #[test]
    fn test_to_array_white_black() {
        assert_eq!(Rgb::from_hex(0xffffff).to_array(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb::from_hex(0x000000).to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_to_linear_darkens_midtones() {
        let lin = Rgb::new(128, 128, 128).to_linear();
        assert!(lin[0] < 0.5 && lin[0] > 0.2);
    }
}
