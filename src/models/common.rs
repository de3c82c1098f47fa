use serde::{Deserialize, Serialize};

/// English Metric Units per point (914400 EMU per inch / 72 pt per inch).
pub const EMU_PER_PT: f64 = 12700.0;

/// Specifies a unit of length.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension#Unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// The units are unknown. Should not be used.
    #[serde(rename = "UNIT_UNSPECIFIED")]
    UnitUnspecified,
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch = 1/360000 cm.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// The magnitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// The units for magnitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Dimension {
    /// A magnitude expressed in points.
    pub fn pt(magnitude: f64) -> Self {
        Dimension {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }

    /// Converts the dimension to points.
    /// Missing magnitudes and unspecified units count as 0.
    pub fn to_pt(&self) -> f64 {
        let magnitude = self.magnitude.unwrap_or(0.0);
        match self.unit {
            Some(Unit::Pt) => magnitude,
            Some(Unit::Emu) => magnitude / EMU_PER_PT,
            _ => 0.0,
        }
    }
}

/// Converts an optional `Dimension` to points, treating `None` as 0.
pub fn dimension_to_pt(dim: Option<&Dimension>) -> f64 {
    dim.map_or(0.0, Dimension::to_pt)
}

/// A width and height.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// The width. Missing width does not inherit from parents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    /// The height. Missing height does not inherit from parents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

impl Size {
    pub fn pt(width: f64, height: f64) -> Self {
        Size {
            width: Some(Dimension::pt(width)),
            height: Some(Dimension::pt(height)),
        }
    }
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ]
/// to transform source coordinates (x,y) into destination coordinates (x', y').
///
/// Formula:
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
///
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/AffineTransform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    /// The X coordinate scaling element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// The Y coordinate scaling element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// The X coordinate shearing element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear_x: Option<f64>,
    /// The Y coordinate shearing element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear_y: Option<f64>,
    /// The X coordinate translation element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    /// The Y coordinate translation element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    /// The units for the translation elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl AffineTransform {
    /// A pure translation in points: `{scaleX: 1, scaleY: 1, translateX, translateY, unit: PT}`.
    pub fn translation_pt(x: f64, y: f64) -> Self {
        AffineTransform {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            shear_x: None,
            shear_y: None,
            translate_x: Some(x),
            translate_y: Some(y),
            unit: Some(Unit::Pt),
        }
    }

    /// Translation components converted to points.
    /// The API reports EMU when the unit is absent.
    pub fn translation_in_pt(&self) -> (f64, f64) {
        let unit = self.unit.unwrap_or(Unit::Emu);
        let convert = |v: Option<f64>| {
            Dimension {
                magnitude: Some(v.unwrap_or(0.0)),
                unit: Some(unit),
            }
            .to_pt()
        };
        (convert(self.translate_x), convert(self.translate_y))
    }
}
