//! Scene palette and the color notation accepted by configuration files.

use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// Panel background behind the sky (AWT light gray).
pub const LIGHT_GRAY: Rgba8Premul = Rgba8Premul::opaque(192, 192, 192);
/// Panel border (AWT dark gray).
pub const DARK_GRAY: Rgba8Premul = Rgba8Premul::opaque(64, 64, 64);
/// Opaque black.
pub const BLACK: Rgba8Premul = Rgba8Premul::opaque(0, 0, 0);
/// Opaque white.
pub const WHITE: Rgba8Premul = Rgba8Premul::opaque(255, 255, 255);

pub(crate) const SKY: Rgba8Premul = Rgba8Premul::opaque(200, 200, 255);
pub(crate) const GROUND: Rgba8Premul = Rgba8Premul::opaque(0, 150, 30);
pub(crate) const ROAD: Rgba8Premul = Rgba8Premul::opaque(100, 100, 150);
pub(crate) const SUN_RAY: Rgba8Premul = Rgba8Premul::from_rgb_hex(0xDD8800);
pub(crate) const SUN_DISC: Rgba8Premul = Rgba8Premul::opaque(255, 255, 0);
pub(crate) const WINDMILL_POLE: Rgba8Premul = Rgba8Premul::opaque(225, 200, 200);
pub(crate) const WINDMILL_VANE: Rgba8Premul = Rgba8Premul::from_rgb_hex(0xAA9999);
pub(crate) const CART_BODY: Rgba8Premul = Rgba8Premul::opaque(255, 0, 0);
pub(crate) const WHEEL_FACE: Rgba8Premul = LIGHT_GRAY;

/// Color as written in config files: `"#RRGGBB"`, `"#RRGGBBAA"`, `[r, g, b]` or
/// `[r, g, b, a]` with 0..=255 straight-alpha channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[u8; 4]")]
pub struct ColorDef {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl ColorDef {
    /// Straight-alpha color.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to the premultiplied form used by draw ops.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba8Premul> for ColorDef {
    fn from(c: Rgba8Premul) -> Self {
        use crate::foundation::math::unpremul_u8;
        Self::rgba(
            unpremul_u8(c.r, c.a),
            unpremul_u8(c.g, c.a),
            unpremul_u8(c.b, c.a),
            c.a,
        )
    }
}

impl From<ColorDef> for [u8; 4] {
    fn from(c: ColorDef) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(ColorDef::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(ColorDef::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
