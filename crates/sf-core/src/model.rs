//! Shared value types: colour, bounds, viewport.

use crate::rng::RandomSource;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────

/// A 24-bit RGB colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Parse `#RGB`, `#RRGGBB` or `0xRRGGBB`. The prefix is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex
            .strip_prefix('#')
            .or_else(|| hex.strip_prefix("0x"))
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// CSS form, `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Random colour built one hex digit at a time, each digit uniform
    /// over `0-F`.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        let mut digits = [0u8; 6];
        for d in &mut digits {
            *d = HEX_DIGITS[rng.pick_index(HEX_DIGITS.len())];
        }
        // Every byte comes from HEX_DIGITS, so both the str and the parse succeed.
        std::str::from_utf8(&digits)
            .ok()
            .and_then(Self::from_hex)
            .unwrap_or(Self::BLACK)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid colour {s:?}")))
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// The canvas (viewport) dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;

    #[test]
    fn hex_forms_parse() {
        assert_eq!(Color::from_hex("#d0ba98"), Some(Color::rgb(0xD0, 0xBA, 0x98)));
        assert_eq!(Color::from_hex("0xD0BA98"), Some(Color::rgb(0xD0, 0xBA, 0x98)));
        assert_eq!(Color::from_hex("fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn hex_and_u32_agree() {
        let c = Color::from_u32(0x336699);
        assert_eq!(c.to_hex(), "#336699");
        assert_eq!(c.to_u32(), 0x336699);
    }

    #[test]
    fn random_colours_vary() {
        let mut rng = SplitMix64::new(11);
        let a = Color::random(&mut rng);
        let b = Color::random(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds {
            x: 10.0,
            y: 10.0,
            width: 70.0,
            height: 30.0,
        };
        assert!(b.contains(10.0, 10.0));
        assert!(b.contains(80.0, 40.0));
        assert!(!b.contains(80.1, 40.0));
        assert!(!b.contains(9.9, 20.0));
    }
}
