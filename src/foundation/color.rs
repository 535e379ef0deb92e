use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;

/// Straight-alpha RGBA8 color as written in configuration.
///
/// Accepts `"#rrggbb"`, `"#rrggbbaa"`, CSS-style `"rgba(r, g, b, a)"` / `"rgb(r, g, b)"` with
/// `a` in `0..=1`, `{ "r": .., "g": .., "b": .., "a": .. }` objects with the same ranges, or
/// `[r, g, b]` / `[r, g, b, a]` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Build a color from straight channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied form used by the raster pipeline.
    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// Parse any supported string form.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_css_rgba(body);
        }
        match s {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "transparent" => Ok(Self::rgba(0, 0, 0, 0)),
            _ => parse_hex(s),
        }
    }

    fn from_components(r: f64, g: f64, b: f64, a: f64) -> Result<Self, String> {
        fn channel(v: f64, name: &str) -> Result<u8, String> {
            if !v.is_finite() || !(0.0..=255.0).contains(&v) {
                return Err(format!("color channel {name} must be within 0..=255"));
            }
            Ok(v.round() as u8)
        }
        if !a.is_finite() || !(0.0..=1.0).contains(&a) {
            return Err("color alpha must be within 0..=1".to_owned());
        }
        Ok(Self::rgba(
            channel(r, "r")?,
            channel(g, "g")?,
            channel(b, "b")?,
            (a * 255.0).round() as u8,
        ))
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        ))
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Rgba8::parse(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => {
                Rgba8::from_components(r, g, b, a).map_err(serde::de::Error::custom)
            }
            Repr::Arr(v) => {
                let parsed = match v.as_slice() {
                    [r, g, b] => Rgba8::from_components(*r, *g, *b, 1.0),
                    [r, g, b, a] => Rgba8::from_components(*r, *g, *b, *a),
                    _ => Err("rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])".to_owned()),
                };
                parsed.map_err(serde::de::Error::custom)
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn parse_css_rgba(body: &str) -> Result<Rgba8, String> {
    let parts = body
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid color component \"{}\"", p.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [r, g, b] => Rgba8::from_components(*r, *g, *b, 1.0),
        [r, g, b, a] => Rgba8::from_components(*r, *g, *b, *a),
        _ => Err("rgb()/rgba() expects 3 or 4 components".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
