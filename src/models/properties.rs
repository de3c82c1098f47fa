// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::OptionalColor;
use crate::models::common::Dimension;
use crate::models::page::Page;

/// The writable subset of the styling applied to a TextRun.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextStyle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// The background color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    /// The foreground color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    /// The font family of the text. If unrecognized, rendered in Arial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// The size of the text's font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    /// Whether the text is rendered as bold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Whether the text is italicized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

/// The text alignment for a paragraph.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#Alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Aligned to the start of the line (left for LTR, right for RTL).
    #[default]
    Start,
    /// Centered.
    Center,
    /// Aligned to the end of the line (right for LTR, left for RTL).
    End,
    /// Text is stretched to fill the line (justified).
    Justified,
}

/// The writable subset of a paragraph's style.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#ParagraphStyle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// The text alignment for this paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// The amount of space between lines, as a percentage of normal (100.0 corresponds to 100%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
}

/// The properties specific to a page with type `SLIDE`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#SlideProperties
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    /// Output only. The object ID of the layout that this slide is based on.
    pub layout_object_id: Option<String>,
    /// Output only. The notes page that this slide is associated with.
    /// Boxed to handle recursive type (`SlideProperties` -> `Page` -> `SlideProperties`).
    pub notes_page: Option<Box<Page>>,
}

/// The properties specific to a page with type `LAYOUT`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#LayoutProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    /// The object ID of the master that this layout is based on.
    pub master_object_id: Option<String>,
    /// The name of the layout (e.g., "TITLE_AND_BODY").
    pub name: Option<String>,
    /// Output only. The human-readable name of the layout (e.g., "Title and body").
    pub display_name: Option<String>,
}

/// The properties specific to a page with type `NOTES`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#NotesProperties
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesProperties {
    /// The object ID of the shape on this notes page that contains the speaker notes
    /// for the corresponding slide.
    pub speaker_notes_object_id: Option<String>,
}
