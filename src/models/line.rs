use serde::{Deserialize, Serialize};

use crate::models::common::Dimension;
use crate::models::shape_properties::{DashStyle, SolidFill};

/// The style of an arrow head.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/lines#ArrowStyle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArrowStyle {
    /// No arrow head.
    #[default]
    None,
    /// Arrow head with notched back.
    StealthArrow,
    /// Filled arrow head.
    FillArrow,
    /// Filled circle arrow head.
    FillCircle,
    /// Hollow arrow head.
    OpenArrow,
}

/// The category of the line, as chosen in `createLine`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/lines#LineCategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCategory {
    /// Straight connectors (including STRAIGHT_CONNECTOR_1).
    #[default]
    Straight,
    /// Bent connectors (BENT_CONNECTOR_2 to 5).
    Bent,
    /// Curved connectors (CURVED_CONNECTOR_2 to 5).
    Curved,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

/// The writable properties of a Line, as sent in `updateLineProperties`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/lines#LineProperties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProperties {
    /// The fill of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_fill: Option<LineFill>,
    /// The thickness of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Dimension>,
    /// The dash style of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_style: Option<DashStyle>,
    /// The style of the arrow at the beginning of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_arrow: Option<ArrowStyle>,
    /// The style of the arrow at the end of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_arrow: Option<ArrowStyle>,
}
