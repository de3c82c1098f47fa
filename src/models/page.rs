// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::PageElement;
use crate::models::properties::{LayoutProperties, NotesProperties, SlideProperties};

/// The type of the page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    /// The page type is unspecified or unknown.
    #[default]
    PageTypeUnspecified,
    /// A slide page.
    Slide,
    /// A master slide page.
    Master,
    /// A layout page.
    Layout,
    /// A notes page.
    Notes,
    /// A notes master page.
    NotesMaster,
}

/// A page in a presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The object ID for this page.
    pub object_id: String,

    /// The type of the page. This might be omitted in some contexts (e.g., top-level slides).
    #[serde(default)]
    pub page_type: Option<PageType>,

    /// The page elements rendered on the page.
    pub page_elements: Option<Vec<PageElement>>,

    /// Slide specific properties. Only set if page_type = SLIDE.
    pub slide_properties: Option<SlideProperties>,

    /// Layout specific properties. Only set if page_type = LAYOUT.
    pub layout_properties: Option<LayoutProperties>,

    /// Notes specific properties. Only set if page_type = NOTES.
    pub notes_properties: Option<NotesProperties>,
}

impl Page {
    /// The object id of the shape holding this slide's speaker notes, if the API reported one.
    pub fn speaker_notes_object_id(&self) -> Option<&str> {
        self.slide_properties
            .as_ref()?
            .notes_page
            .as_ref()?
            .notes_properties
            .as_ref()?
            .speaker_notes_object_id
            .as_deref()
    }
}
