//! The inbound deck description: what an HTTP front end hands over after parsing
//! a generation request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::settings::Settings;
use crate::theme::Theme;

/// A whole presentation to generate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckRequest {
    pub title: String,
    /// Presentation to copy as the starting document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Drive folder receiving the copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    pub slides: Vec<SlideSpec>,
    pub settings: Settings,
    /// Partial theme overlaid on the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<JsonValue>,
}

impl DeckRequest {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The effective theme: the built-in one with `theme` merged over it.
    pub fn theme(&self) -> serde_json::Result<Theme> {
        match &self.theme {
            Some(overlay) => Theme::from_json_value(overlay.clone()),
            None => Ok(Theme::default()),
        }
    }
}

fn default_layout() -> String {
    "CONTENT".to_string()
}

/// One slide. Anything not named here lands in `extra`, which is where diagram
/// slides carry their content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Default for SlideSpec {
    fn default() -> Self {
        SlideSpec {
            title: String::new(),
            subtitle: None,
            content: Vec::new(),
            layout: default_layout(),
            notes: None,
            extra: Map::new(),
        }
    }
}

impl SlideSpec {
    /// The diagram archetype named by `diagramType` (or `type`).
    pub fn diagram_type(&self) -> Option<&str> {
        self.extra
            .get("diagramType")
            .or_else(|| self.extra.get("type"))
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(JsonValue::as_str)
    }

    pub fn extra_bool(&self, key: &str) -> bool {
        self.extra
            .get(key)
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slide_defaults_apply() {
        let slide: SlideSpec = serde_json::from_value(json!({"title": "Hello"})).unwrap();
        assert_eq!(slide.layout, "CONTENT");
        assert!(slide.content.is_empty());
        assert!(slide.extra.is_empty());
        assert_eq!(slide, SlideSpec { title: "Hello".into(), ..SlideSpec::default() });
    }

    #[test]
    fn unknown_fields_become_diagram_content() {
        let slide: SlideSpec = serde_json::from_value(json!({
            "title": "Plan",
            "layout": "DIAGRAM",
            "diagramType": "timeline",
            "milestones": [{"label": "Kickoff", "date": "Q1"}]
        }))
        .unwrap();
        assert_eq!(slide.diagram_type(), Some("timeline"));
        assert!(slide.extra.contains_key("milestones"));
    }

    #[test]
    fn deck_theme_overlays_defaults() {
        let deck = DeckRequest::from_json_str(
            r##"{"title": "Q3", "slides": [], "theme": {"colors": {"primary": "#123456"}}}"##,
        )
        .unwrap();
        let theme = deck.theme().unwrap();
        assert_eq!(theme.color("primary"), "#123456");
        assert_eq!(theme.color("white"), "#ffffff");
        assert!(deck.settings.show_page_number);
    }
}
