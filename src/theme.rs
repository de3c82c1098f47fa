//! The Theme Model: canvas size, fonts, palette, diagram spacing constants and the
//! tree of named regions, all authored in pixels on the base canvas.
//!
//! A theme is plain data. It deserializes from camelCase JSON and every field is
//! optional on input, so a partial document overlays [`Theme::default`].

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Width and height of the authoring canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    pub family: String,
    /// Point sizes keyed by text role (`title`, `body`, ...).
    pub sizes: IndexMap<String, f64>,
}

/// A named region in base-canvas pixels.
///
/// Exactly one horizontal anchor is meaningful: `left` wins when both are present,
/// `right` is measured from the right edge of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionPx {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PositionPx {
    pub fn left(left: f64, top: f64, width: f64, height: f64) -> Self {
        PositionPx {
            left: Some(left),
            right: None,
            top: Some(top),
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn right(right: f64, top: f64, width: f64, height: f64) -> Self {
        PositionPx {
            left: None,
            right: Some(right),
            top: Some(top),
            width: Some(width),
            height: Some(height),
        }
    }
}

/// A node of the position tree: either a region or a group of named children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionNode {
    Rect(PositionPx),
    Group(IndexMap<String, PositionNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub base_px: CanvasSize,
    pub fonts: Fonts,
    /// Hex colors keyed by palette name.
    pub colors: IndexMap<String, String>,
    /// Diagram spacing constants in pixels.
    pub diagram: IndexMap<String, f64>,
    pub positions: IndexMap<String, PositionNode>,
    pub footer_text: String,
}

impl Theme {
    /// Parses a JSON theme and deep-merges it over [`Theme::default`].
    ///
    /// Maps merge key by key; a region object replaces the default region whole, so
    /// switching a region from `left` to `right` anchoring does not leave both set.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    /// Same as [`Theme::from_json_str`] for an already parsed overlay.
    pub fn from_json_value(overlay: JsonValue) -> serde_json::Result<Self> {
        let mut merged = serde_json::to_value(Theme::default())?;
        merge_json(&mut merged, overlay);
        serde_json::from_value(merged)
    }

    /// Resolves a dot path (`"contentSlide.body"`) to a region.
    pub fn position(&self, path: &str) -> Option<&PositionPx> {
        let mut segments = path.split('.');
        let mut node = self.positions.get(segments.next()?)?;
        for segment in segments {
            match node {
                PositionNode::Group(children) => node = children.get(segment)?,
                PositionNode::Rect(_) => return None,
            }
        }
        match node {
            PositionNode::Rect(rect) => Some(rect),
            PositionNode::Group(_) => None,
        }
    }

    /// Font size for a role in points, falling back to the `body` size.
    pub fn font_size(&self, role: &str) -> f64 {
        self.fonts
            .sizes
            .get(role)
            .or_else(|| self.fonts.sizes.get("body"))
            .copied()
            .unwrap_or(14.0)
    }

    /// Palette color by name, falling back to `textPrimary`.
    pub fn color(&self, name: &str) -> &str {
        match self.colors.get(name) {
            Some(color) => color,
            None => {
                debug!("[Theme::color] '{name}' missing from palette, using textPrimary");
                self.colors
                    .get("textPrimary")
                    .map_or("#333333", String::as_str)
            }
        }
    }

    /// Diagram constant in pixels; 0 when the theme does not define it.
    pub fn diagram_px(&self, name: &str) -> f64 {
        self.diagram.get(name).copied().unwrap_or_else(|| {
            debug!("[Theme::diagram_px] constant '{name}' not defined, using 0");
            0.0
        })
    }
}

const REGION_KEYS: [&str; 5] = ["left", "right", "top", "width", "height"];

fn merge_json(base: &mut JsonValue, overlay: JsonValue) {
    match (base, overlay) {
        (JsonValue::Object(base_map), JsonValue::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                let is_region = value
                    .as_object()
                    .is_some_and(|m| m.keys().any(|k| REGION_KEYS.contains(&k.as_str())));
                match base_map.get_mut(&key) {
                    Some(existing) if !is_region => merge_json(existing, value),
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn group(entries: Vec<(&str, PositionNode)>) -> PositionNode {
    PositionNode::Group(
        entries
            .into_iter()
            .map(|(name, node)| (name.to_string(), node))
            .collect(),
    )
}

fn rect(left: f64, top: f64, width: f64, height: f64) -> PositionNode {
    PositionNode::Rect(PositionPx::left(left, top, width, height))
}

fn rect_right(right: f64, top: f64, width: f64, height: f64) -> PositionNode {
    PositionNode::Rect(PositionPx::right(right, top, width, height))
}

fn string_map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn number_map(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
    entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

impl Default for Fonts {
    fn default() -> Self {
        Fonts {
            family: "Arial".to_string(),
            sizes: number_map(&[
                ("title", 40.0),
                ("sectionTitle", 38.0),
                ("contentTitle", 24.0),
                ("subhead", 18.0),
                ("body", 14.0),
                ("small", 10.0),
                ("footer", 9.0),
                ("chip", 10.0),
                ("date", 16.0),
                ("kpiValue", 32.0),
                ("quote", 24.0),
                ("ghostNum", 180.0),
            ]),
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize {
            width: 960.0,
            height: 540.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        let positions: IndexMap<String, PositionNode> = [
            (
                "titleSlide",
                group(vec![
                    ("logo", rect(55.0, 60.0, 135.0, 40.0)),
                    ("title", rect(60.0, 200.0, 830.0, 90.0)),
                    ("date", rect(60.0, 440.0, 300.0, 24.0)),
                ]),
            ),
            (
                "contentSlide",
                group(vec![
                    ("title", rect(25.0, 20.0, 830.0, 65.0)),
                    ("titleUnderline", rect(25.0, 80.0, 260.0, 4.0)),
                    ("subhead", rect(25.0, 90.0, 910.0, 40.0)),
                    ("body", rect(25.0, 132.0, 910.0, 330.0)),
                    ("twoColLeft", rect(25.0, 132.0, 440.0, 330.0)),
                    ("twoColRight", rect_right(25.0, 132.0, 440.0, 330.0)),
                ]),
            ),
            (
                "sectionSlide",
                group(vec![
                    ("ghostNum", rect(35.0, 120.0, 400.0, 200.0)),
                    ("title", rect(55.0, 230.0, 840.0, 80.0)),
                ]),
            ),
            (
                "diagramSlide",
                group(vec![("area", rect(25.0, 132.0, 910.0, 340.0))]),
            ),
            (
                "footer",
                group(vec![
                    ("leftText", rect(15.0, 505.0, 250.0, 20.0)),
                    ("rightPage", rect_right(15.0, 505.0, 50.0, 20.0)),
                ]),
            ),
            ("bottomBar", rect(0.0, 534.0, 960.0, 6.0)),
        ]
        .into_iter()
        .map(|(name, node)| (name.to_string(), node))
        .collect();

        Theme {
            base_px: CanvasSize::default(),
            fonts: Fonts::default(),
            colors: string_map(&[
                ("primary", "#4285f4"),
                ("textPrimary", "#333333"),
                ("textSmall", "#595959"),
                ("white", "#ffffff"),
                ("backgroundGray", "#f8f9fa"),
                ("faintGray", "#e8eaed"),
                ("lightGray", "#f1f3f4"),
                ("neutralGray", "#9aa0a6"),
                ("ghostGray", "#efefed"),
                ("cardBorder", "#dadce0"),
                ("positive", "#34a853"),
                ("negative", "#ea4335"),
            ]),
            diagram: number_map(&[
                ("cardGap", 16.0),
                ("cardAccentW", 5.0),
                ("timelinePad", 40.0),
                ("timelineConnectorH", 24.0),
                ("timelineDotSize", 14.0),
                ("timelineDateH", 22.0),
                ("timelineLabelH", 56.0),
                ("timelineCardMaxW", 170.0),
                ("processGap", 10.0),
                ("processNumberW", 56.0),
                ("processIndent", 60.0),
                ("cycleNodeMax", 110.0),
                ("cycleLabelW", 170.0),
                ("cycleConnector", 14.0),
                ("pyramidGap", 6.0),
                ("pyramidTextGap", 30.0),
                ("compareGap", 30.0),
                ("compareHeaderH", 44.0),
                ("compareRowMaxH", 48.0),
                ("barRowGap", 14.0),
                ("stepUpGap", 12.0),
                ("laneGap", 24.0),
                ("laneTitleH", 34.0),
                ("laneCardGap", 12.0),
                ("laneCardMaxH", 64.0),
                ("lanePad", 10.0),
                ("flowArrowGap", 28.0),
                ("flowRowGap", 24.0),
                ("flowBoxMaxH", 90.0),
                ("kpiGap", 18.0),
                ("tableRowH", 34.0),
                ("faqGap", 12.0),
                ("progressRowMaxH", 46.0),
                ("progressBarH", 14.0),
                ("imageTextGap", 30.0),
                ("agendaRowMaxH", 56.0),
                ("agendaNumSize", 36.0),
            ]),
            positions,
            footer_text: String::new(),
        }
    }
}
