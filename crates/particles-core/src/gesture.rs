//! Gesture classification results and their lenient wire decoding.
//!
//! A classifier reports `{gesture, expansion, color, shape}` as a JSON object.
//! Decoding never fails: every missing or malformed field falls back to its
//! own default, so a noisy classifier degrades the visuals instead of
//! stalling them.

use crate::color::{resolve_target_color, Rgb};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hand gestures the classifier may report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Peace,
    One,
    Fist,
    Palm,
    ThumbsUp,
    Rock,
    PointDown,
    Okay,
    #[default]
    None,
}

/// Target shapes of the particle field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Sphere,
    Heart,
    Flower,
    Saturn,
    Fireworks,
    Spiral,
    Star,
    Wave,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gesture {0:?}")]
pub struct ParseGestureError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown shape {0:?}")]
pub struct ParseShapeError(pub String);

impl Gesture {
    pub const ALL: [Gesture; 9] = [
        Gesture::Peace,
        Gesture::One,
        Gesture::Fist,
        Gesture::Palm,
        Gesture::ThumbsUp,
        Gesture::Rock,
        Gesture::PointDown,
        Gesture::Okay,
        Gesture::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Peace => "peace",
            Gesture::One => "one",
            Gesture::Fist => "fist",
            Gesture::Palm => "palm",
            Gesture::ThumbsUp => "thumbs_up",
            Gesture::Rock => "rock",
            Gesture::PointDown => "point_down",
            Gesture::Okay => "okay",
            Gesture::None => "none",
        }
    }

    /// Shape conventionally associated with this gesture.
    pub fn shape(&self) -> Shape {
        match self {
            Gesture::Peace => Shape::Flower,
            Gesture::One => Shape::Heart,
            Gesture::Fist => Shape::Saturn,
            Gesture::Palm | Gesture::None => Shape::Sphere,
            Gesture::ThumbsUp => Shape::Fireworks,
            Gesture::Rock => Shape::Spiral,
            Gesture::PointDown => Shape::Wave,
            Gesture::Okay => Shape::Star,
        }
    }
}

impl FromStr for Gesture {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseGestureError(s.to_string()))
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Shape {
    pub const ALL: [Shape; 8] = [
        Shape::Sphere,
        Shape::Heart,
        Shape::Flower,
        Shape::Saturn,
        Shape::Fireworks,
        Shape::Spiral,
        Shape::Star,
        Shape::Wave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Heart => "heart",
            Shape::Flower => "flower",
            Shape::Saturn => "saturn",
            Shape::Fireworks => "fireworks",
            Shape::Spiral => "spiral",
            Shape::Star => "star",
            Shape::Wave => "wave",
        }
    }

    /// Lenient lookup: any name that is not an exact wire name maps to
    /// [`Shape::Sphere`].
    pub fn from_name(name: &str) -> Shape {
        name.parse::<Shape>().unwrap_or_else(|e| {
            log::debug!("[gesture] {e}, using sphere");
            Shape::Sphere
        })
    }

    /// Upper bound on the distance from the origin of any generated point.
    pub fn bounding_radius(&self, scale: f32) -> f32 {
        let s = scale.abs();
        match self {
            Shape::Sphere => s,
            // |x| <= 16, |y| <= 13 + 5 + 2 + 1, |z| <= 2.5, all times 0.15 * scale
            Shape::Heart => 0.15 * s * (16.0f32 * 16.0 + 21.0 * 21.0 + 2.5 * 2.5).sqrt(),
            Shape::Flower => s * (1.0f32 + 0.25 * 0.25).sqrt(),
            Shape::Saturn => {
                let ring = ((1.2 * s) * (1.2 * s) + 0.1 * 0.1).sqrt();
                ring.max(0.5 * s)
            }
            Shape::Fireworks => 2.0 * s,
            Shape::Spiral => {
                let planar = 2.0 * s + 0.25 * std::f32::consts::SQRT_2;
                (planar * planar + (0.15 * s) * (0.15 * s)).sqrt()
            }
            Shape::Star => s * (1.2f32 * 1.2 + 0.15 * 0.15).sqrt(),
            Shape::Wave => s * (1.5f32 * 1.5 + 1.0 + 0.5 * 0.5).sqrt(),
        }
    }
}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_EXPANSION: f32 = 0.5;

/// One classification result. Replaced wholesale, never edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureState {
    pub gesture: Gesture,
    pub expansion: f32,
    pub color: Rgb,
    pub shape: Shape,
}

impl Default for GestureState {
    /// The per-field wire defaults: `none`, `0.5`, `#ffffff`, `sphere`.
    fn default() -> Self {
        Self {
            gesture: Gesture::None,
            expansion: DEFAULT_EXPANSION,
            color: Rgb::WHITE,
            shape: Shape::Sphere,
        }
    }
}

#[derive(Serialize)]
struct GestureWire<'a> {
    gesture: Gesture,
    expansion: f32,
    color: &'a str,
    shape: Shape,
}

impl GestureState {
    pub fn new(gesture: Gesture, expansion: f32, color: Rgb, shape: Shape) -> Self {
        Self {
            gesture,
            expansion,
            color,
            shape,
        }
    }

    /// State shown before the first classification arrives.
    pub fn initial() -> Self {
        Self::new(
            Gesture::None,
            DEFAULT_EXPANSION,
            Rgb::new(0.0, 242.0 / 255.0, 1.0),
            Shape::Sphere,
        )
    }

    /// State substituted when a classification attempt fails outright.
    pub fn fallback() -> Self {
        Self::new(
            Gesture::None,
            DEFAULT_EXPANSION,
            Rgb::new(68.0 / 255.0, 68.0 / 255.0, 1.0),
            Shape::Sphere,
        )
    }

    /// `scale = 2 + 3 * expansion`.
    pub fn scale(&self) -> f32 {
        crate::shapes::scale_for(self.expansion)
    }

    /// Decode a classifier response. Never fails; see [`GestureState::from_value`].
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(v) => Self::from_value(&v),
            Err(e) => {
                log::debug!("[gesture] unparsable classifier output: {e}");
                Self::default()
            }
        }
    }

    /// Decode each field independently, defaulting whatever is missing or invalid.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            return defaults;
        };

        let gesture = obj
            .get("gesture")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.gesture);

        let expansion = obj
            .get("expansion")
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
            .map(|x| x as f32)
            .filter(|x| x.is_finite())
            .unwrap_or(defaults.expansion);

        let color = resolve_target_color(obj.get("color").and_then(Value::as_str));

        let shape = obj
            .get("shape")
            .and_then(Value::as_str)
            .map(Shape::from_name)
            .unwrap_or(defaults.shape);

        Self {
            gesture,
            expansion,
            color,
            shape,
        }
    }

    pub fn to_json(&self) -> String {
        let color = self.color.to_hex();
        let wire = GestureWire {
            gesture: self.gesture,
            expansion: self.expansion,
            color: &color,
            shape: self.shape,
        };
        serde_json::to_string(&wire).unwrap_or_default()
    }
}

const DEMO_TABLE: [(Gesture, f32, &str, Shape); 8] = [
    (Gesture::Peace, 0.8, "#ff69b4", Shape::Flower),
    (Gesture::One, 0.6, "#ff4444", Shape::Heart),
    (Gesture::Fist, 0.2, "#ffd700", Shape::Saturn),
    (Gesture::Palm, 1.0, "#00f2ff", Shape::Sphere),
    (Gesture::ThumbsUp, 0.7, "#ff6600", Shape::Fireworks),
    (Gesture::Rock, 0.5, "#9900ff", Shape::Spiral),
    (Gesture::Okay, 0.6, "#ffff00", Shape::Star),
    (Gesture::PointDown, 0.4, "#00ff88", Shape::Wave),
];

/// Canned classifications cycled through when no live classifier is wired up.
pub fn demo_sequence() -> Vec<GestureState> {
    DEMO_TABLE
        .iter()
        .map(|&(gesture, expansion, hex, shape)| {
            GestureState::new(gesture, expansion, resolve_target_color(Some(hex)), shape)
        })
        .collect()
}
