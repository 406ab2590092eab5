//! Packed RGBA8 color with HSL conversion and hex-string parsing.

use bytemuck::{Pod, Zeroable};

use crate::math::Vector4f;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack `0xRRGGBBAA`.
    #[inline]
    pub const fn from_u32(packed: u32) -> Self {
        Self::rgba(
            (packed >> 24) as u8,
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
        )
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Opaque color from hue in degrees and saturation/lightness in `[0, 1]`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma * 0.5;
        Self::new(to_byte(r + m), to_byte(g + m), to_byte(b + m))
    }

    /// Returns `(hue_degrees, saturation, lightness)`. Alpha is ignored.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        let delta = max - min;
        if delta == 0.0 {
            return (0.0, 0.0, l);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (h, s, l)
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    /// Anything else yields transparent black.
    pub fn from_hex(text: &str) -> Self {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::TRANSPARENT;
        }

        let nibbles: Vec<u8> = digits.bytes().filter_map(hex_value).collect();
        match nibbles.as_slice() {
            [r, g, b] => Self::new(r * 17, g * 17, b * 17),
            [r, g, b, a] => Self::rgba(r * 17, g * 17, b * 17, a * 17),
            [r1, r0, g1, g0, b1, b0] => Self::new(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0),
            [r1, r0, g1, g0, b1, b0, a1, a0] => {
                Self::rgba(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0, a1 << 4 | a0)
            }
            _ => Self::TRANSPARENT,
        }
    }

    /// `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.to_u32())
    }

    /// Components normalized to `[0, 1]`.
    pub fn to_vector4(self) -> Vector4f {
        Vector4f::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|d| d as u8)
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
