use serde::{Deserialize, Serialize};

use crate::models::placeholder::Placeholder;

/// The shape types this crate creates.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    /// Text box shape.
    TextBox,
    /// Rectangle shape.
    Rectangle,
    /// Round corner rectangle shape.
    RoundRectangle,
    /// Ellipse shape.
    Ellipse,
    /// Triangle shape.
    Triangle,
    /// Trapezoid shape.
    Trapezoid,
    /// Chevron shape.
    Chevron,
    /// Home plate shape.
    HomePlate,
    /// Donut shape.
    Donut,
    /// Right arrow shape.
    RightArrow,
    /// Down arrow shape.
    DownArrow,
}

/// The fields of a fetched Shape needed to locate placeholders.
/// The shape type is kept as the raw API string because fetched pages may contain
/// any of the ~140 shape types.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The type of the shape.
    pub shape_type: Option<String>,

    /// The placeholder information for the shape. If set, the shape is a placeholder shape.
    pub placeholder: Option<Placeholder>,
}
