// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Size};
use crate::models::shape::Shape;

/// A visual element rendered on a page.
///
/// Only shapes are decoded; other element kinds (tables, images, groups, ...) are
/// accepted and left as `shape: None`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageElement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// The object ID for this page element.
    pub object_id: String,

    /// The size of the page element.
    pub size: Option<Size>,

    /// The transform of the page element.
    pub transform: Option<AffineTransform>,

    /// Set when the element is a shape.
    pub shape: Option<Shape>,
}
