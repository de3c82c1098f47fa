use serde::{Deserialize, Serialize};

use crate::models::colors::OpaqueColor;
use crate::models::common::Dimension;

// --- Enums (PropertyState, DashStyle, ContentAlignment) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyState {
    Rendered,
    NotRendered,
    #[default]
    Inherit,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashStyle {
    #[default]
    Solid,
    Dot,
    Dash,
    DashDot,
    LongDash,
    LongDashDot,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

// --- Structs (SolidFill, OutlineFill, ShapeBackgroundFill, Outline) ---
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<OpaqueColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

impl SolidFill {
    pub fn from_hex(hex: &str) -> Self {
        SolidFill {
            color: OpaqueColor::from_hex(hex),
            alpha: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBackgroundFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_state: Option<PropertyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_fill: Option<OutlineFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_style: Option<DashStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_state: Option<PropertyState>,
}

/// The writable subset of a Shape's properties, as sent in `updateShapeProperties`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#ShapeProperties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_background_fill: Option<ShapeBackgroundFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_alignment: Option<ContentAlignment>,
}
