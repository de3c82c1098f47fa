use serde::{Deserialize, Serialize};

use crate::color::hex_to_rgb;

/// An RGB color.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#RgbColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    /// The red component of the color, from 0.0 to 1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<f32>,
    /// The green component of the color, from 0.0 to 1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<f32>,
    /// The blue component of the color, from 0.0 to 1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<f32>,
}

impl RgbColor {
    /// Builds an API color from a hex string. Returns `None` for malformed input.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb = hex_to_rgb(hex)?;
        Some(RgbColor {
            red: Some(f32::from(rgb.r) / 255.0),
            green: Some(f32::from(rgb.g) / 255.0),
            blue: Some(f32::from(rgb.b) / 255.0),
        })
    }
}

/// A themeable solid color value. Only RGB colors are produced by this crate.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#OpaqueColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

impl OpaqueColor {
    pub fn from_hex(hex: &str) -> Option<Self> {
        RgbColor::from_hex(hex).map(|rgb_color| OpaqueColor { rgb_color })
    }
}

/// A color that can either be fully opaque or fully transparent.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#OptionalColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    /// If set, this will be used as an opaque color. If unset, the color is rendered as transparent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_color: Option<OpaqueColor>,
}

impl OptionalColor {
    pub fn from_hex(hex: &str) -> Self {
        OptionalColor {
            opaque_color: OpaqueColor::from_hex(hex),
        }
    }
}
