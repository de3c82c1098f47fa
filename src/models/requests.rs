//! Request payloads for `presentations.batchUpdate`.
//!
//! Each variant of [`Request`] serializes as a single-key object whose key is the
//! request name (`{"createShape": {...}}`), matching the REST representation.
//! Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::common::{AffineTransform, Size};
use crate::models::line::{LineCategory, LineProperties};
use crate::models::properties::{ParagraphStyle, TextStyle};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ShapeProperties;
use crate::models::table_properties::{TableCellLocation, TableCellProperties, TableRange};

/// One operation in a batch update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlideRequest),
    CreateShape(CreateShapeRequest),
    CreateLine(CreateLineRequest),
    CreateTable(CreateTableRequest),
    CreateImage(CreateImageRequest),
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    UpdateParagraphStyle(UpdateParagraphStyleRequest),
    UpdateShapeProperties(UpdateShapePropertiesRequest),
    UpdateLineProperties(UpdateLinePropertiesRequest),
    UpdateTableCellProperties(UpdateTableCellPropertiesRequest),
    GroupObjects(GroupObjectsRequest),
    UpdatePageElementTransform(UpdatePageElementTransformRequest),
    DeleteObject(DeleteObjectRequest),
}

impl Request {
    /// The request name as it appears in the JSON body (`createShape`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Request::CreateSlide(_) => "createSlide",
            Request::CreateShape(_) => "createShape",
            Request::CreateLine(_) => "createLine",
            Request::CreateTable(_) => "createTable",
            Request::CreateImage(_) => "createImage",
            Request::InsertText(_) => "insertText",
            Request::UpdateTextStyle(_) => "updateTextStyle",
            Request::UpdateParagraphStyle(_) => "updateParagraphStyle",
            Request::UpdateShapeProperties(_) => "updateShapeProperties",
            Request::UpdateLineProperties(_) => "updateLineProperties",
            Request::UpdateTableCellProperties(_) => "updateTableCellProperties",
            Request::GroupObjects(_) => "groupObjects",
            Request::UpdatePageElementTransform(_) => "updatePageElementTransform",
            Request::DeleteObject(_) => "deleteObject",
        }
    }
}

/// Common properties for a page element being created.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#PageElementProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    pub page_object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

/// Predefined layouts available in every presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#PredefinedLayout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredefinedLayout {
    #[default]
    Blank,
    CaptionOnly,
    Title,
    TitleAndBody,
    TitleAndTwoColumns,
    TitleOnly,
    SectionHeader,
    SectionTitleAndDescription,
    OneColumnText,
    MainPoint,
    BigNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_layout: Option<PredefinedLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_layout_reference: Option<LayoutReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    pub object_id: String,
    pub shape_type: ShapeType,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    pub object_id: String,
    pub line_category: LineCategory,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub rows: i32,
    pub columns: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub object_id: String,
    pub url: String,
    pub element_properties: PageElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text: String,
    pub insertion_index: i32,
}

/// The kinds of text range.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Type_3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    FixedRange,
    FromStartIndex,
    All,
}

/// A contiguous range of text, indexed in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    #[serde(rename = "type")]
    pub range_type: RangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<i32>,
}

impl TextRange {
    pub fn all() -> Self {
        TextRange {
            range_type: RangeType::All,
            start_index: None,
            end_index: None,
        }
    }

    pub fn fixed(start_index: i32, end_index: i32) -> Self {
        TextRange {
            range_type: RangeType::FixedRange,
            start_index: Some(start_index),
            end_index: Some(end_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub style: TextStyle,
    pub text_range: TextRange,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyleRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub style: ParagraphStyle,
    pub text_range: TextRange,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShapePropertiesRequest {
    pub object_id: String,
    pub shape_properties: ShapeProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinePropertiesRequest {
    pub object_id: String,
    pub line_properties: LineProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableCellPropertiesRequest {
    pub object_id: String,
    pub table_range: TableRange,
    pub table_cell_properties: TableCellProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupObjectsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_object_id: Option<String>,
    pub children_object_ids: Vec<String>,
}

/// How a transform update combines with the element's existing transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyMode {
    Relative,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageElementTransformRequest {
    pub object_id: String,
    pub transform: AffineTransform,
    pub apply_mode: ApplyMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

/// Body of `POST /v1/presentations/{presentationId}:batchUpdate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

/// Response of a batch update; replies are kept opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    pub presentation_id: String,
    #[serde(default)]
    pub replies: Vec<JsonValue>,
}
