use serde::{Deserialize, Serialize};

use crate::models::common::{dimension_to_pt, Size};
use crate::models::page::Page;

/// Represents a Google Slides presentation, reduced to what layout generation reads.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The ID of the presentation.
    pub presentation_id: String,

    /// The size of pages in the presentation.
    pub page_size: Option<Size>,

    /// The slides in the presentation.
    pub slides: Option<Vec<Page>>,

    /// The title of the presentation.
    pub title: Option<String>,

    /// The layouts in the presentation.
    pub layouts: Option<Vec<Page>>,
}

impl Presentation {
    /// Page size in points, `(width, height)`. Missing dimensions come back as 0.
    pub fn page_size_pt(&self) -> (f64, f64) {
        match &self.page_size {
            Some(size) => (
                dimension_to_pt(size.width.as_ref()),
                dimension_to_pt(size.height.as_ref()),
            ),
            None => (0.0, 0.0),
        }
    }

    /// Names of the layouts (`LayoutProperties.name`) in document order.
    pub fn layout_names(&self) -> Vec<&str> {
        self.layouts
            .iter()
            .flatten()
            .filter_map(|page| page.layout_properties.as_ref()?.name.as_deref())
            .collect()
    }

    /// Finds a layout's object id by its `name` or `displayName`.
    pub fn layout_id_by_name(&self, name: &str) -> Option<&str> {
        self.layouts.iter().flatten().find_map(|page| {
            let props = page.layout_properties.as_ref()?;
            let matches = props.name.as_deref() == Some(name)
                || props.display_name.as_deref() == Some(name);
            matches.then_some(page.object_id.as_str())
        })
    }

    pub fn slide(&self, object_id: &str) -> Option<&Page> {
        self.slides
            .iter()
            .flatten()
            .find(|page| page.object_id == object_id)
    }
}
