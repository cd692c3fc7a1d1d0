//! Color values and the target-color resolver.
//!
//! The classifier reports colors as CSS-style hex strings. They are resolved
//! once per classification into an [`Rgb`] target that the animator blends
//! toward every frame.

use glam::Vec3;
use thiserror::Error;

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("expected 3 or 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let channel = |hex: &str| -> Result<f32, ColorParseError> {
            u8::from_str_radix(hex, 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let expand = |i: usize| digits[i..i + 1].repeat(2);
                Ok(Self::new(
                    channel(&expand(0))?,
                    channel(&expand(1))?,
                    channel(&expand(2))?,
                ))
            }
            n => Err(ColorParseError::BadLength(n)),
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    /// Move `alpha` of the way from `self` toward `target`.
    pub fn lerp(self, target: Rgb, alpha: f32) -> Rgb {
        Rgb::from(Vec3::from(self).lerp(Vec3::from(target), alpha))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

impl From<Rgb> for Vec3 {
    fn from(c: Rgb) -> Self {
        Vec3::new(c.r, c.g, c.b)
    }
}

impl From<Vec3> for Rgb {
    fn from(v: Vec3) -> Self {
        Rgb::new(v.x, v.y, v.z)
    }
}

/// Resolve a reported color string into a target color.
///
/// Absent or unparsable input falls back to white; this never fails.
pub fn resolve_target_color(reported: Option<&str>) -> Rgb {
    match reported.map(Rgb::from_hex) {
        Some(Ok(c)) => c,
        Some(Err(e)) => {
            log::debug!("[color] falling back to white: {e}");
            Rgb::WHITE
        }
        None => Rgb::WHITE,
    }
}
