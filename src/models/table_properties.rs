use serde::{Deserialize, Serialize};

use crate::models::shape_properties::{ContentAlignment, PropertyState, SolidFill};

/// A location of a single table cell within a table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCellLocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    /// The 0-based row index.
    pub row_index: i32,
    /// The 0-based column index.
    pub column_index: i32,
}

/// The background fill of a table cell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCellBackgroundFill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellBackgroundFill {
    /// The background fill property state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_state: Option<PropertyState>,
    /// Solid color fill. Only solid fill is currently supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

/// Properties of a TableCell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCellProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellProperties {
    /// The background fill of the table cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_cell_background_fill: Option<TableCellBackgroundFill>,
    /// The alignment of the content in the table cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_alignment: Option<ContentAlignment>,
}

/// A rectangular range of table cells.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableRange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRange {
    /// The starting location of the range.
    pub location: TableCellLocation,
    /// The row span of the table range.
    pub row_span: i32,
    /// The column span of the table range.
    pub column_span: i32,
}

impl TableRange {
    pub fn single_cell(row_index: i32, column_index: i32) -> Self {
        TableRange {
            location: TableCellLocation {
                row_index,
                column_index,
            },
            row_span: 1,
            column_span: 1,
        }
    }
}
